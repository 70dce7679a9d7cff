// tests/common/mod.rs
//! In-memory content source and block builders shared by integration tests.

#![allow(dead_code)]

use notion2html::model::{DividerBlock, ParagraphBlock, TextBlockContent, ToDoBlock};
use notion2html::{
    Block, BlockCommon, BlockId, ChildrenPage, ContentSource, NotionId, Page, PageId,
    RichTextSpan, SourceError,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

pub const PAGE_SIZE: usize = 100;

pub fn page_id() -> PageId {
    PageId::parse("550e8400e29b41d4a716446655440000").unwrap()
}

pub fn block_id(n: u32) -> BlockId {
    BlockId::parse(&format!("{:032x}", n)).unwrap()
}

pub fn paragraph(n: u32, text: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common: BlockCommon::new(block_id(n)),
        content: TextBlockContent::new(vec![RichTextSpan::plain_text(text)]),
    })
}

/// A paragraph that reports children which have not been fetched yet.
pub fn parent_paragraph(n: u32, text: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common: BlockCommon::new(block_id(n)).with_has_children(true),
        content: TextBlockContent::new(vec![RichTextSpan::plain_text(text)]),
    })
}

pub fn divider(n: u32) -> Block {
    Block::Divider(DividerBlock {
        common: BlockCommon::new(block_id(n)),
    })
}

pub fn to_do(n: u32, text: &str, checked: bool) -> Block {
    Block::ToDo(ToDoBlock {
        common: BlockCommon::new(block_id(n)),
        content: TextBlockContent::new(vec![RichTextSpan::plain_text(text)]),
        checked,
    })
}

/// Plain text of each block's own rich text, in order.
pub fn texts(blocks: &[Block]) -> Vec<String> {
    blocks
        .iter()
        .map(|b| {
            b.rich_text()
                .map(|spans| spans.iter().map(|s| s.plain_text.as_str()).collect::<String>())
                .unwrap_or_default()
        })
        .collect()
}

/// A content source backed by maps, serving children in batches of
/// [`PAGE_SIZE`] with offset cursors.
#[derive(Default)]
pub struct MockSource {
    pages: HashMap<String, Page>,
    children: HashMap<String, Vec<Block>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.insert(page.id.as_str().to_string(), page);
        self
    }

    pub fn with_children(mut self, parent: impl Into<NotionId>, blocks: Vec<Block>) -> Self {
        self.children
            .insert(parent.into().as_str().to_string(), blocks);
        self
    }

    /// Every listing of `parent` fails with a server error.
    pub fn failing_on(mut self, parent: impl Into<NotionId>) -> Self {
        self.failing.insert(parent.into().as_str().to_string());
        self
    }

    /// Every listing of `parent` sleeps before answering.
    pub fn delayed(mut self, parent: impl Into<NotionId>, delay: Duration) -> Self {
        self.delays
            .insert(parent.into().as_str().to_string(), delay);
        self
    }

    /// Parents whose children were listed, one entry per request.
    pub fn list_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls_for(&self, parent: impl Into<NotionId>) -> usize {
        let parent = parent.into();
        self.list_calls()
            .iter()
            .filter(|c| c.as_str() == parent.as_str())
            .count()
    }
}

#[async_trait::async_trait]
impl ContentSource for MockSource {
    async fn get_page(&self, id: &PageId) -> Result<Page, SourceError> {
        self.pages
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| SourceError::Api {
                code: notion2html::NotionErrorCode::ObjectNotFound,
                message: format!("Could not find page with ID: {}", id),
                status: 404,
            })
    }

    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<&str>,
    ) -> Result<ChildrenPage, SourceError> {
        let key = parent.as_str().to_string();
        self.calls.lock().unwrap().push(key.clone());

        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&key) {
            return Err(SourceError::Api {
                code: notion2html::NotionErrorCode::InternalError,
                message: "Unexpected error".to_string(),
                status: 500,
            });
        }

        let all = self.children.get(&key).cloned().unwrap_or_default();
        let offset: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
        let end = (offset + PAGE_SIZE).min(all.len());
        let batch = all[offset..end].to_vec();

        if end < all.len() {
            Ok(ChildrenPage::more(batch, end.to_string()))
        } else {
            Ok(ChildrenPage::last(batch))
        }
    }
}
