mod block;
pub mod blocks;
pub mod common;

pub use block::Block;
pub use blocks::*;
pub use common::*;

use crate::types::PageId;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Document-level metadata of a Notion page, fetched independently of its blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    /// Plain text of the page's title property; empty when there is none.
    pub title: String,
    pub url: String,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
    pub archived: bool,
    /// Raw property values in the order the API returned them.
    pub properties: IndexMap<String, serde_json::Value>,
}

impl Page {
    /// A page with only an id, as used by fakes and tests.
    pub fn new(id: PageId) -> Self {
        Self {
            id,
            title: String::new(),
            url: String::new(),
            created_time: None,
            last_edited_time: None,
            archived: false,
            properties: IndexMap::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Title suitable for display, never empty.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

/// A page together with its fully resolved block tree.
///
/// Built once by the tree fetcher and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page: Page,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(page: Page, blocks: Vec<Block>) -> Self {
        Self { page, blocks }
    }

    /// Number of blocks at every depth.
    pub fn block_count(&self) -> usize {
        self.blocks.iter().map(Block::subtree_len).sum()
    }
}
