// src/api/mod.rs
//! Notion API interaction: the ability to retrieve pages and their blocks.
//!
//! Fetching logic depends on the [`ContentSource`] trait, never on HTTP
//! details, so the tree fetcher runs unchanged against an in-memory fake.

pub mod client;
pub mod fetcher;
mod pagination;
pub mod parser;

use crate::error::SourceError;
use crate::model::{Block, Page};
use crate::types::{NotionId, PageId};

/// One batch of results from a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// The final (or only) batch of a listing.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            results,
            next_cursor: None,
            has_more: false,
        }
    }

    /// A batch followed by more results at `cursor`.
    pub fn more(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            results,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }
}

/// A single page of child blocks.
pub type ChildrenPage = PaginatedResponse<Block>;

/// The ability to retrieve content from a Notion workspace.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches page metadata. Not paginated.
    async fn get_page(&self, id: &PageId) -> Result<Page, SourceError>;

    /// Fetches one batch of child blocks of `parent`, continuing from
    /// `cursor` when given.
    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<&str>,
    ) -> Result<ChildrenPage, SourceError>;
}

// Re-export the public interface
pub use client::NotionHttpClient;
pub use fetcher::{FetchOptions, TreeFetcher};
