// src/render/block_renderer.rs
//! Block rendering engine: converts Notion blocks to presentation nodes.
//!
//! Rendering is total. Every block, including ones whose type is unknown
//! or whose media has no URL, produces a node; nothing here returns an
//! error. Children are already resolved by the fetcher, so rendering is a
//! plain top-down walk.

use super::node::{Element, Node};
use super::rich_text::{link, render_spans, safe_src};
use crate::model::*;
use crate::types::{Color, RichTextSpan};

/// Which kind of list a run of list items belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    fn of(block: &Block) -> Option<Self> {
        match block {
            Block::BulletedListItem(_) => Some(ListKind::Bulleted),
            Block::NumberedListItem(_) => Some(ListKind::Numbered),
            _ => None,
        }
    }

    fn container(self) -> Element {
        match self {
            ListKind::Bulleted => Element::new("ul").class("notion-bulleted-list"),
            ListKind::Numbered => Element::new("ol").class("notion-numbered-list"),
        }
    }
}

/// Renders a sequence of sibling blocks in document order.
///
/// Consecutive list items of the same kind are grouped into one `<ul>` or
/// `<ol>`; every other block maps to exactly one node.
pub fn render_blocks(blocks: &[Block]) -> Vec<Node> {
    let mut output = Vec::with_capacity(blocks.len());
    let mut open_list: Option<(ListKind, Element)> = None;

    for block in blocks {
        let kind = ListKind::of(block);

        if let Some((open_kind, list)) = open_list.take() {
            if Some(open_kind) == kind {
                open_list = Some((open_kind, list.child(render_block(block))));
                continue;
            }
            output.push(list.into());
        }

        match kind {
            Some(kind) => open_list = Some((kind, kind.container().child(render_block(block)))),
            None => output.push(render_block(block)),
        }
    }

    if let Some((_, list)) = open_list {
        output.push(list.into());
    }

    output
}

/// Renders one block and its subtree.
pub fn render_block(block: &Block) -> Node {
    match block {
        Block::Paragraph(b) => with_children(text_element("p", &b.content), &b.common),
        Block::Heading1(b) => render_heading("h1", &b.content, b.is_toggleable, &b.common),
        Block::Heading2(b) => render_heading("h2", &b.content, b.is_toggleable, &b.common),
        Block::Heading3(b) => render_heading("h3", &b.content, b.is_toggleable, &b.common),
        Block::BulletedListItem(b) => list_item(&b.content, &b.common),
        Block::NumberedListItem(b) => list_item(&b.content, &b.common),
        Block::Quote(b) => text_element("blockquote", &b.content)
            .children(children_container(&b.common))
            .into(),
        Block::Code(b) => render_code(b),
        Block::Callout(b) => render_callout(b),
        Block::Toggle(b) => Element::new("details")
            .class(with_color("notion-toggle", b.content.color))
            .child(Element::new("summary").children(render_spans(&b.content.rich_text)))
            .children(children_container(&b.common))
            .into(),
        Block::ToDo(b) => render_to_do(b),
        Block::Image(b) => render_image(&b.media),
        Block::Video(b) => render_player("video", "notion-video", &b.media),
        Block::Audio(b) => render_player("audio", "notion-audio", &b.media),
        Block::File(b) => render_file(&b.media),
        Block::Pdf(b) => render_pdf(&b.media),
        Block::Embed(b) => render_embed(b),
        Block::Bookmark(b) => render_bookmark(b),
        Block::Divider(_) => Element::new("hr").class("notion-divider").into(),
        Block::TableOfContents(_) => Element::new("div")
            .class("notion-table-of-contents")
            .child(Element::new("p").text("Table of Contents"))
            .child(
                Element::new("p")
                    .child(Element::new("em").text("(Auto-generated table of contents)")),
            )
            .into(),
        Block::ColumnList(b) => render_column_list(b),
        Block::Column(b) => Element::new("div")
            .class("notion-column")
            .children(render_blocks(&b.common.children))
            .into(),
        Block::Table(b) => render_table(b),
        Block::TableRow(b) => render_table_row(&b.cells, 0, false, false),
        Block::Equation(b) => Element::new("div")
            .class("notion-equation")
            .child(Element::new("code").text(b.expression.as_str()))
            .into(),
        Block::ChildPage(b) => {
            let title = if b.title.trim().is_empty() {
                "Untitled"
            } else {
                b.title.as_str()
            };
            Element::new("div")
                .class("notion-child-page")
                .text(format!("📄 {}", title))
                .into()
        }
        Block::Synced(b) => render_synced(b),
        Block::Unsupported(b) => render_unsupported(&b.block_type),
    }
}

// --- Text blocks ---

fn text_element(tag: &'static str, content: &TextBlockContent) -> Element {
    let element = Element::new(tag);
    let element = match content.color.css_class() {
        Some(class) => element.class(class),
        None => element,
    };
    element.children(render_spans(&content.rich_text))
}

/// The indented container holding a block's rendered children, if any.
fn children_container(common: &BlockCommon) -> Option<Node> {
    if common.children.is_empty() {
        return None;
    }
    Some(
        Element::new("div")
            .class("notion-children")
            .children(render_blocks(&common.children))
            .into(),
    )
}

/// Places the children container after an element that cannot hold it.
fn with_children(element: Element, common: &BlockCommon) -> Node {
    match children_container(common) {
        Some(children) => Element::new("div")
            .class("notion-block")
            .child(element)
            .child(children)
            .into(),
        None => element.into(),
    }
}

fn with_color(base: &str, color: Color) -> String {
    match color.css_class() {
        Some(class) => format!("{} {}", base, class),
        None => base.to_string(),
    }
}

fn render_heading(
    tag: &'static str,
    content: &TextBlockContent,
    toggleable: bool,
    common: &BlockCommon,
) -> Node {
    let heading = text_element(tag, content);
    if toggleable {
        Element::new("details")
            .class("notion-toggle notion-toggle-heading")
            .child(Element::new("summary").child(heading))
            .children(children_container(common))
            .into()
    } else {
        with_children(heading, common)
    }
}

fn list_item(content: &TextBlockContent, common: &BlockCommon) -> Node {
    text_element("li", content)
        .children(children_container(common))
        .into()
}

fn render_code(block: &CodeBlock) -> Node {
    let mut code = Element::new("code").children(render_spans(&block.content.rich_text));
    if !block.language.is_empty() {
        code = code
            .class(format!("language-{}", block.language.replace(' ', "-")))
            .attr("data-language", block.language.as_str());
    }
    let pre = Element::new("pre").class("notion-code").child(code);

    match caption(&block.caption) {
        Some(caption) => Element::new("figure")
            .class("notion-code-block")
            .child(pre)
            .child(caption)
            .into(),
        None => pre.into(),
    }
}

fn render_callout(block: &CalloutBlock) -> Node {
    let icon = block.icon.as_ref().and_then(|icon| -> Option<Node> {
        match icon {
            Icon::Emoji { emoji } => Some(
                Element::new("span")
                    .class("notion-callout-icon")
                    .text(emoji.as_str())
                    .into(),
            ),
            Icon::External { external } => callout_icon_image(&external.url),
            Icon::File { file } => callout_icon_image(&file.url),
        }
    });

    Element::new("div")
        .class(with_color("notion-callout", block.content.color))
        .children(icon)
        .child(
            Element::new("div")
                .class("notion-callout-text")
                .children(render_spans(&block.content.rich_text))
                .children(children_container(&block.common)),
        )
        .into()
}

fn callout_icon_image(url: &str) -> Option<Node> {
    let url = safe_src(url)?;
    Some(
        Element::new("img")
            .class("notion-callout-icon")
            .attr("src", url)
            .attr("alt", "")
            .into(),
    )
}

fn render_to_do(block: &ToDoBlock) -> Node {
    let mut checkbox = Element::new("input")
        .attr("type", "checkbox")
        .attr("disabled", "");
    if block.checked {
        checkbox = checkbox.attr("checked", "");
    }

    let text = render_spans(&block.content.rich_text);
    let label = if block.checked {
        Element::new("span").child(Element::new("s").children(text))
    } else {
        Element::new("span").children(text)
    };

    let class = if block.checked {
        "notion-to-do notion-checked"
    } else {
        "notion-to-do"
    };

    Element::new("div")
        .class(with_color(class, block.content.color))
        .child(checkbox)
        .child(label)
        .children(children_container(&block.common))
        .into()
}

// --- Media ---

/// A `<figcaption>` for a non-empty caption.
fn caption(spans: &[RichTextSpan]) -> Option<Element> {
    if spans.is_empty() {
        return None;
    }
    Some(Element::new("figcaption").children(render_spans(spans)))
}

fn render_image(media: &MediaSource) -> Node {
    let alt = media
        .caption
        .first()
        .map(|span| span.plain_text.as_str())
        .filter(|text| !text.is_empty())
        .unwrap_or("Image");

    let img = media.resolve_url().and_then(safe_src).map(|url| -> Node {
        Element::new("img")
            .attr("src", url)
            .attr("alt", alt)
            .attr("loading", "lazy")
            .into()
    });

    Element::new("figure")
        .class("notion-image")
        .children(img)
        .children(caption(&media.caption).map(Node::from))
        .into()
}

fn render_player(tag: &'static str, class: &str, media: &MediaSource) -> Node {
    let player = media.resolve_url().and_then(safe_src).map(|url| -> Node {
        Element::new(tag)
            .attr("controls", "")
            .attr("src", url)
            .into()
    });

    Element::new("figure")
        .class(class.to_string())
        .children(player)
        .children(caption(&media.caption).map(Node::from))
        .into()
}

fn render_file(media: &MediaSource) -> Node {
    let label = media
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or("Download file");

    let anchor = media
        .resolve_url()
        .and_then(link)
        .map(|anchor| Node::from(anchor.attr("download", "").text(label)));

    Element::new("div")
        .class("notion-file")
        .children(anchor)
        .children(caption(&media.caption).map(Node::from))
        .into()
}

fn render_pdf(media: &MediaSource) -> Node {
    let viewer = media.resolve_url().and_then(safe_src).map(|url| -> Node {
        Element::new("iframe")
            .attr("src", url)
            .attr("title", media.name.as_deref().unwrap_or("PDF"))
            .attr("loading", "lazy")
            .into()
    });

    Element::new("figure")
        .class("notion-pdf")
        .children(viewer)
        .children(caption(&media.caption).map(Node::from))
        .into()
}

fn render_embed(block: &EmbedBlock) -> Node {
    let frame = safe_src(&block.url).map(|url| -> Node {
        Element::new("iframe")
            .attr("src", url)
            .attr("sandbox", "allow-scripts allow-popups")
            .attr("loading", "lazy")
            .attr("allowfullscreen", "")
            .into()
    });

    Element::new("figure")
        .class("notion-embed")
        .children(frame)
        .children(caption(&block.caption).map(Node::from))
        .into()
}

fn render_bookmark(block: &BookmarkBlock) -> Node {
    let card = link(&block.url).unwrap_or_else(|| Element::new("div"));
    let mut card = card.class("notion-bookmark").child(
        Element::new("div")
            .class("notion-bookmark-url")
            .text(block.url.as_str()),
    );

    if !block.caption.is_empty() {
        card = card.child(
            Element::new("div")
                .class("notion-bookmark-caption")
                .children(render_spans(&block.caption)),
        );
    }

    card.into()
}

// --- Layout ---

fn render_column_list(block: &ColumnListBlock) -> Node {
    let columns = block.common.children.len().max(1);
    Element::new("div")
        .class("notion-column-list")
        .attr(
            "style",
            format!(
                "display: grid; grid-template-columns: repeat({}, minmax(0, 1fr)); gap: 1rem",
                columns
            ),
        )
        .children(block.common.children.iter().map(render_block))
        .into()
}

fn render_table(block: &TableBlock) -> Node {
    let rows = block
        .common
        .children
        .iter()
        .enumerate()
        .map(|(index, child)| match child {
            Block::TableRow(row) => render_table_row(
                &row.cells,
                block.table_width,
                block.has_column_header && index == 0,
                block.has_row_header,
            ),
            other => render_block(other),
        });

    Element::new("table")
        .class("notion-table")
        .child(Element::new("tbody").children(rows))
        .into()
}

/// Renders one row, padded with empty cells up to `width`; header rows
/// and the leading cell of rows in a table with row headers use `<th>`.
fn render_table_row(
    cells: &[Vec<RichTextSpan>],
    width: usize,
    header_row: bool,
    row_header: bool,
) -> Node {
    let cells = (0..cells.len().max(width)).map(|column| {
        let tag = if header_row || (row_header && column == 0) {
            "th"
        } else {
            "td"
        };
        let spans = cells.get(column).map(Vec::as_slice).unwrap_or_default();
        Node::from(Element::new(tag).children(render_spans(spans)))
    });

    Element::new("tr").children(cells).into()
}

/// Synced content renders in place; a reference records its original.
fn render_synced(block: &SyncedBlock) -> Node {
    let container = Element::new("div").class("notion-synced-block");
    let container = match &block.synced_from {
        Some(origin) => container.attr("data-synced-from", origin.block_id.as_str()),
        None => container,
    };
    container
        .children(render_blocks(&block.common.children))
        .into()
}

fn render_unsupported(block_type: &str) -> Node {
    Element::new("div")
        .class("notion-unsupported")
        .text("⚠️ Unsupported block type: ")
        .child(Element::new("code").text(block_type))
        .into()
}
