// src/render/mod.rs
//! Pure rendering from a fetched [`Document`](crate::model::Document) to
//! presentation nodes. Nothing in this module performs I/O or fails.

pub mod block_renderer;
pub mod node;
pub mod page_renderer;
pub mod rich_text;

pub use block_renderer::{render_block, render_blocks};
pub use node::{html_escape, Element, Node};
pub use page_renderer::{render_page, standalone_html};
pub use rich_text::render_spans;
