use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, RichTextSpan};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::TableOfContents($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::Audio($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Pdf($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Synced($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// Block represents all possible Notion block types
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(Heading1Block),
    Heading2(Heading2Block),
    Heading3(Heading3Block),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Divider(DividerBlock),
    TableOfContents(TableOfContentsBlock),
    Image(ImageBlock),
    Video(VideoBlock),
    Audio(AudioBlock),
    File(FileBlock),
    Pdf(PdfBlock),
    Bookmark(BookmarkBlock),
    Embed(EmbedBlock),
    ChildPage(ChildPageBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(ColumnListBlock),
    Column(ColumnBlock),
    Synced(SyncedBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    /// Get the block's children
    pub fn children(&self) -> &[Block] {
        match_all_blocks!(self, b => &b.common.children)
    }

    /// Check if block has children
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get mutable common block data
    pub(crate) fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    /// Consumes the block, attaching a resolved child list.
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.common_mut().children = children;
        self
    }

    /// The rich text a block carries as its primary content, if any.
    pub fn rich_text(&self) -> Option<&[RichTextSpan]> {
        match self {
            Block::Paragraph(b) => Some(&b.content.rich_text),
            Block::Heading1(b) => Some(&b.content.rich_text),
            Block::Heading2(b) => Some(&b.content.rich_text),
            Block::Heading3(b) => Some(&b.content.rich_text),
            Block::BulletedListItem(b) => Some(&b.content.rich_text),
            Block::NumberedListItem(b) => Some(&b.content.rich_text),
            Block::ToDo(b) => Some(&b.content.rich_text),
            Block::Toggle(b) => Some(&b.content.rich_text),
            Block::Quote(b) => Some(&b.content.rich_text),
            Block::Callout(b) => Some(&b.content.rich_text),
            Block::Code(b) => Some(&b.content.rich_text),
            _ => None,
        }
    }

    /// Get block type name
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Equation(_) => "equation",
            Block::Divider(_) => "divider",
            Block::TableOfContents(_) => "table_of_contents",
            Block::Image(_) => "image",
            Block::Video(_) => "video",
            Block::Audio(_) => "audio",
            Block::File(_) => "file",
            Block::Pdf(_) => "pdf",
            Block::Bookmark(_) => "bookmark",
            Block::Embed(_) => "embed",
            Block::ChildPage(_) => "child_page",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Synced(_) => "synced_block",
            Block::Unsupported(b) => &b.block_type,
        }
    }

    /// Total number of blocks in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children().iter().map(Block::subtree_len).sum::<usize>()
    }
}
