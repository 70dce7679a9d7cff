// src/render/page_renderer.rs
//! Top-level composition of a fetched document.

use super::block_renderer::render_blocks;
use super::node::{html_escape, Element, Node};
use crate::model::{Document, Page};

/// Renders every root block in document order inside one container.
pub fn render_page(document: &Document) -> Node {
    Element::new("article")
        .class("notion-document")
        .attr("data-page-id", document.page.id.as_str())
        .children(render_blocks(&document.blocks))
        .into()
}

/// Wraps a rendered body in a minimal HTML5 document titled after the page.
pub fn standalone_html(page: &Page, body: &Node) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        html_escape(page.display_title()),
        body.to_html()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockCommon, DividerBlock};
    use crate::types::{BlockId, PageId};

    fn page() -> Page {
        Page::new(PageId::parse("550e8400e29b41d4a716446655440000").unwrap())
    }

    #[test]
    fn test_empty_document_renders_empty_container() {
        let node = render_page(&Document::new(page(), Vec::new()));
        assert_eq!(
            node.to_html(),
            "<article class=\"notion-document\" data-page-id=\"550e8400e29b41d4a716446655440000\"></article>"
        );
    }

    #[test]
    fn test_root_blocks_keep_order() {
        let divider = |n: u32| {
            Block::Divider(DividerBlock {
                common: BlockCommon::new(BlockId::parse(&format!("{:032x}", n)).unwrap()),
            })
        };
        let node = render_page(&Document::new(page(), vec![divider(1), divider(2)]));
        assert_eq!(node.as_element().unwrap().children.len(), 2);
    }

    #[test]
    fn test_standalone_escapes_title() {
        let page = page().with_title("Q&A <draft>");
        let html = standalone_html(&page, &Node::text("body"));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Q&amp;A &lt;draft&gt;</title>"));
        assert!(html.contains("\nbody\n"));
    }

    #[test]
    fn test_standalone_untitled() {
        let html = standalone_html(&page(), &Node::text(""));
        assert!(html.contains("<title>Untitled</title>"));
    }
}
