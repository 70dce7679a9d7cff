// src/types/rich_text.rs
//! Annotated text runs as they arrive from the content API.

use super::Color;
use serde::{Deserialize, Serialize};

/// One run of text with uniform decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextSpan {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default, deserialize_with = "lenient_annotations")]
    pub annotations: Annotations,
    #[serde(default)]
    pub href: Option<String>,
}

impl RichTextSpan {
    /// A span with no decoration and no link.
    pub fn plain_text(text: &str) -> Self {
        Self {
            plain_text: text.to_string(),
            annotations: Annotations::default(),
            href: None,
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

/// Decoration flags for a span. Every field defaults to "off".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl Annotations {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// `null` or a malformed annotations object both mean "no decoration".
fn lenient_annotations<'de, D>(deserializer: D) -> Result<Annotations, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        log::debug!("Ignoring malformed annotations: {}", e);
        Annotations::default()
    }))
}

/// Concatenates the plain text of a span list.
pub fn plain_text_of(spans: &[RichTextSpan]) -> String {
    spans.iter().map(|s| s.plain_text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_annotations_mean_no_decoration() {
        let span: RichTextSpan = serde_json::from_value(json!({
            "type": "text",
            "plain_text": "hi"
        }))
        .unwrap();
        assert_eq!(span.annotations, Annotations::default());
        assert_eq!(span.href, None);
    }

    #[test]
    fn null_and_malformed_annotations_are_tolerated() {
        let span: RichTextSpan =
            serde_json::from_value(json!({"plain_text": "a", "annotations": null})).unwrap();
        assert_eq!(span.annotations, Annotations::default());

        let span: RichTextSpan =
            serde_json::from_value(json!({"plain_text": "a", "annotations": "bold"})).unwrap();
        assert_eq!(span.annotations, Annotations::default());
    }

    #[test]
    fn partial_annotations_fill_with_defaults() {
        let span: RichTextSpan = serde_json::from_value(json!({
            "plain_text": "x",
            "annotations": {"italic": true, "color": "chartreuse"},
            "href": "https://example.com"
        }))
        .unwrap();
        assert!(span.annotations.italic);
        assert!(!span.annotations.bold);
        assert_eq!(span.annotations.color, Color::Default);
        assert_eq!(span.href.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn plain_text_concatenates_in_order() {
        let spans = vec![RichTextSpan::plain_text("Hel"), RichTextSpan::plain_text("lo")];
        assert_eq!(plain_text_of(&spans), "Hello");
    }
}
