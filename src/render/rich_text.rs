// src/render/rich_text.rs
//! Rich-text composition: annotated spans to nested inline elements.
//!
//! Decorations are applied innermost to outermost in a fixed order:
//! bold, italic, code, strikethrough, underline, color. A link, when
//! present, wraps everything.

use super::node::{Element, Node};
use crate::types::{Annotations, RichTextSpan};
use url::Url;

/// Schemes a link may navigate to. Relative links are also allowed.
const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Schemes an embedded resource may be loaded from.
const SOURCE_SCHEMES: &[&str] = &["http", "https"];

/// Renders a span list as a flat sequence of inline nodes.
///
/// An empty list yields no nodes at all, never an empty wrapper.
pub fn render_spans(spans: &[RichTextSpan]) -> Vec<Node> {
    spans.iter().map(render_span).collect()
}

/// Renders one span with its decorations and optional link.
pub fn render_span(span: &RichTextSpan) -> Node {
    let styled = apply_annotations(Node::text(span.plain_text.as_str()), &span.annotations);

    match span.href.as_deref().and_then(link) {
        Some(anchor) => anchor.child(styled).into(),
        None => styled,
    }
}

fn apply_annotations(text: Node, annotations: &Annotations) -> Node {
    let mut node = text;

    if annotations.bold {
        node = wrap("strong", node);
    }
    if annotations.italic {
        node = wrap("em", node);
    }
    if annotations.code {
        node = Element::new("code")
            .class("notion-inline-code")
            .child(node)
            .into();
    }
    if annotations.strikethrough {
        node = wrap("s", node);
    }
    if annotations.underline {
        node = wrap("u", node);
    }
    if let Some(class) = annotations.color.css_class() {
        node = Element::new("span").class(class).child(node).into();
    }

    node
}

fn wrap(tag: &'static str, node: Node) -> Node {
    Element::new(tag).child(node).into()
}

/// An anchor that opens in a new browsing context, or `None` when `href`
/// uses a scheme outside [`LINK_SCHEMES`].
pub fn link(href: &str) -> Option<Element> {
    let href = safe_href(href)?;
    Some(
        Element::new("a")
            .attr("href", href)
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer"),
    )
}

/// Returns `href` when it is relative or absolute with an allowed scheme.
pub fn safe_href(href: &str) -> Option<&str> {
    match Url::parse(href) {
        Ok(url) if LINK_SCHEMES.contains(&url.scheme()) => Some(href),
        Err(url::ParseError::RelativeUrlWithoutBase) if !href.trim().is_empty() => Some(href),
        _ => {
            log::debug!("Dropping link with disallowed target: {}", href);
            None
        }
    }
}

/// Returns `src` when it is an absolute http(s) URL.
pub fn safe_src(src: &str) -> Option<&str> {
    match Url::parse(src) {
        Ok(url) if SOURCE_SCHEMES.contains(&url.scheme()) => Some(src),
        _ => {
            log::debug!("Dropping embedded resource with disallowed source: {}", src);
            None
        }
    }
}
