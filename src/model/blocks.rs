//! Per-variant block payloads.
//!
//! Every struct deserializes from the object stored under the block's type
//! key (`"paragraph": { ... }`). The `common` section is skipped during
//! deserialization and filled in by the parser from the block envelope.

use super::common::BlockCommon;
use crate::types::{Color, RichTextSpan};
use serde::{Deserialize, Deserializer};

/// Text content block
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextSpan>,
    pub color: Color,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextSpan>) -> Self {
        Self {
            rich_text,
            color: Color::Default,
        }
    }
}

macro_rules! text_block {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Default, Deserialize)]
        pub struct $name {
            #[serde(skip)]
            pub common: BlockCommon,
            #[serde(flatten)]
            pub content: TextBlockContent,
        }
    };
}

macro_rules! heading_block {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Default, Deserialize)]
        pub struct $name {
            #[serde(skip)]
            pub common: BlockCommon,
            #[serde(flatten)]
            pub content: TextBlockContent,
            #[serde(default)]
            pub is_toggleable: bool,
        }
    };
}

macro_rules! media_block {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Default, Deserialize)]
        pub struct $name {
            #[serde(skip)]
            pub common: BlockCommon,
            #[serde(flatten)]
            pub media: MediaSource,
        }
    };
}

macro_rules! bare_block {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Default, Deserialize)]
        pub struct $name {
            #[serde(skip)]
            pub common: BlockCommon,
        }
    };
}

text_block!(
    /// Paragraph block
    ParagraphBlock
);
heading_block!(
    /// Heading 1 block
    Heading1Block
);
heading_block!(
    /// Heading 2 block
    Heading2Block
);
heading_block!(
    /// Heading 3 block
    Heading3Block
);
text_block!(
    /// Bulleted list item block
    BulletedListItemBlock
);
text_block!(
    /// Numbered list item block
    NumberedListItemBlock
);
text_block!(
    /// Toggle block
    ToggleBlock
);
text_block!(
    /// Quote block
    QuoteBlock
);

/// To-do block
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ToDoBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub content: TextBlockContent,
    #[serde(default)]
    pub checked: bool,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CalloutBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default, deserialize_with = "lenient_icon")]
    pub icon: Option<Icon>,
    #[serde(flatten)]
    pub content: TextBlockContent,
}

/// Icon types
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Icon {
    #[serde(rename = "emoji")]
    Emoji { emoji: String },
    #[serde(rename = "external")]
    External { external: ExternalFile },
    #[serde(rename = "file")]
    File { file: NotionFile },
}

/// Icon shapes outside the known set are dropped rather than failing the
/// whole callout.
fn lenient_icon<'de, D>(deserializer: D) -> Result<Option<Icon>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match serde_json::from_value(v) {
        Ok(icon) => Some(icon),
        Err(e) => {
            log::debug!("Ignoring unrecognized callout icon: {}", e);
            None
        }
    }))
}

/// Code block
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CodeBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub caption: Vec<RichTextSpan>,
    #[serde(flatten)]
    pub content: TextBlockContent,
}

/// Equation block
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EquationBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub expression: String,
}

bare_block!(
    /// Divider block
    DividerBlock
);
bare_block!(
    /// Table of contents block
    TableOfContentsBlock
);
bare_block!(
    /// Column list block; its children are the columns
    ColumnListBlock
);
bare_block!(
    /// Column block
    ColumnBlock
);

media_block!(
    /// Image block
    ImageBlock
);
media_block!(
    /// Video block
    VideoBlock
);
media_block!(
    /// Audio block
    AudioBlock
);
media_block!(
    /// File block
    FileBlock
);
media_block!(
    /// PDF block
    PdfBlock
);

/// Externally hosted file reference
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

/// File hosted by Notion, with a signed URL that expires
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NotionFile {
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<chrono::DateTime<chrono::Utc>>,
}

/// Shared payload of image, video, audio, file and pdf blocks.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MediaSource {
    /// Which of the two URL fields the source declared as authoritative.
    #[serde(rename = "type", default)]
    pub variant: String,
    #[serde(default)]
    pub external: Option<ExternalFile>,
    #[serde(default)]
    pub file: Option<NotionFile>,
    #[serde(default)]
    pub caption: Vec<RichTextSpan>,
    #[serde(default)]
    pub name: Option<String>,
}

impl MediaSource {
    /// Picks the URL named by the variant tag, falling back to the other
    /// field when the preferred one is absent.
    pub fn resolve_url(&self) -> Option<&str> {
        let external = self.external.as_ref().map(|e| e.url.as_str());
        let hosted = self.file.as_ref().map(|f| f.url.as_str());

        let url = if self.variant == "external" {
            external.or(hosted)
        } else {
            hosted.or(external)
        };
        url.filter(|u| !u.is_empty())
    }

    pub fn external(url: &str) -> Self {
        Self {
            variant: "external".to_string(),
            external: Some(ExternalFile {
                url: url.to_string(),
            }),
            ..Self::default()
        }
    }

    pub fn hosted(url: &str) -> Self {
        Self {
            variant: "file".to_string(),
            file: Some(NotionFile {
                url: url.to_string(),
                expiry_time: None,
            }),
            ..Self::default()
        }
    }

    pub fn with_caption(mut self, caption: Vec<RichTextSpan>) -> Self {
        self.caption = caption;
        self
    }
}

/// Bookmark block
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BookmarkBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichTextSpan>,
}

/// Embed block
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EmbedBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichTextSpan>,
}

/// Child page block
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChildPageBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub title: String,
}

/// Table block; its children are table rows
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TableBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub table_width: usize,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
}

/// Table row block
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TableRowBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub cells: Vec<Vec<RichTextSpan>>,
}

/// Synced block, either the original or a reference to one
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SyncedBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub synced_from: Option<SyncedFrom>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SyncedFrom {
    pub block_id: String,
}

/// Any block whose tag is outside the known set
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}
