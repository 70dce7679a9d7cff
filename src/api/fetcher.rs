// src/api/fetcher.rs
//! Materialises a page and its complete block tree.
//!
//! Children of every block that reports `has_children` are fetched
//! recursively, page by page, and attached bottom-up. Sibling subtrees are
//! resolved with bounded fan-out and reassembled in document order. The
//! whole fetch runs under one deadline, and any failure aborts it: callers
//! get either a complete tree or `AppError::SourceUnavailable`.

use super::pagination::fetch_all_pages;
use super::ContentSource;
use crate::constants::{
    DEFAULT_FETCH_DEADLINE, DEFAULT_FETCH_DEPTH, MAX_FETCH_CONCURRENCY, MAX_FETCH_DEPTH,
};
use crate::error::{AppError, SourceError};
use crate::model::{Block, Document};
use crate::types::{NotionId, PageId};
use futures::future::{BoxFuture, FutureExt};
use futures::{StreamExt, TryStreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Limits applied to a single tree fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Deepest nesting level whose children may be fetched.
    pub max_depth: usize,
    /// Maximum number of requests in flight at once.
    pub concurrency: usize,
    /// Budget for the whole fetch, page metadata included.
    pub deadline: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_FETCH_DEPTH,
            concurrency: num_cpus::get().clamp(1, MAX_FETCH_CONCURRENCY),
            deadline: DEFAULT_FETCH_DEADLINE,
        }
    }
}

impl FetchOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        if max_depth > MAX_FETCH_DEPTH {
            log::warn!(
                "Requested fetch depth {} exceeds maximum safe depth {}. Clamping to safe value.",
                max_depth,
                MAX_FETCH_DEPTH
            );
        }
        self.max_depth = max_depth.min(MAX_FETCH_DEPTH);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, MAX_FETCH_CONCURRENCY);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Per-branch recursion state.
///
/// Holds the chain of ancestor ids rather than every id seen so far, so a
/// block legitimately appearing in two branches is not mistaken for a
/// cycle. The persistent set makes the per-child clone cheap.
#[derive(Debug, Clone)]
struct FetchContext {
    ancestors: im::HashSet<String>,
    depth: usize,
    max_depth: usize,
}

impl FetchContext {
    fn root(id: &NotionId, max_depth: usize) -> Self {
        Self {
            ancestors: im::HashSet::unit(id.as_str().to_string()),
            depth: 0,
            max_depth,
        }
    }

    /// Context for fetching the children of `id`, one level down.
    fn descend(&self, id: &NotionId) -> Result<Self, SourceError> {
        if self.ancestors.contains(id.as_str()) {
            return Err(SourceError::CycleDetected(id.as_str().to_string()));
        }
        if self.depth >= self.max_depth {
            return Err(SourceError::DepthLimitExceeded(self.max_depth));
        }
        Ok(Self {
            ancestors: self.ancestors.update(id.as_str().to_string()),
            depth: self.depth + 1,
            max_depth: self.max_depth,
        })
    }
}

/// Drives a [`ContentSource`] to build complete [`Document`]s.
#[derive(Clone)]
pub struct TreeFetcher {
    source: Arc<dyn ContentSource>,
    options: FetchOptions,
}

impl TreeFetcher {
    pub fn new(source: Arc<dyn ContentSource>, options: FetchOptions) -> Self {
        Self { source, options }
    }

    /// Fetches page metadata and its fully resolved block tree.
    pub async fn fetch_tree(&self, page_id: &PageId) -> Result<Document, AppError> {
        log::info!(
            "Fetching page {} (max depth: {}, concurrency: {}, deadline: {:?})",
            page_id,
            self.options.max_depth,
            self.options.concurrency,
            self.options.deadline
        );

        let started = Instant::now();
        let outcome = tokio::time::timeout(self.options.deadline, self.fetch_document(page_id))
            .await
            .unwrap_or(Err(SourceError::DeadlineExceeded(self.options.deadline)));

        match outcome {
            Ok(document) => {
                log::info!(
                    "Fetched page {} with {} root blocks ({} total) in {:?}",
                    page_id,
                    document.blocks.len(),
                    document.block_count(),
                    started.elapsed()
                );
                Ok(document)
            }
            Err(cause) => {
                log::warn!("Failed to fetch page {}: {}", page_id, cause);
                Err(AppError::source_unavailable(page_id, cause))
            }
        }
    }

    async fn fetch_document(&self, page_id: &PageId) -> Result<Document, SourceError> {
        let permits = Arc::new(Semaphore::new(self.options.concurrency));
        let page = {
            let _permit = acquire(&permits).await?;
            self.source.get_page(page_id).await?
        };

        let root = NotionId::from(page_id);
        let context = FetchContext::root(&root, self.options.max_depth);
        let blocks = self.fetch_children(root, context, permits).await?;

        Ok(Document::new(page, blocks))
    }

    /// Fetches every child of `parent` and, recursively, their subtrees.
    fn fetch_children(
        &self,
        parent: NotionId,
        context: FetchContext,
        permits: Arc<Semaphore>,
    ) -> BoxFuture<'_, Result<Vec<Block>, SourceError>> {
        async move {
            let blocks = fetch_all_pages(|cursor| {
                let parent = &parent;
                let permits = &permits;
                async move {
                    let _permit = acquire(permits).await?;
                    self.source.list_children(parent, cursor.as_deref()).await
                }
            })
            .await?;

            log::debug!(
                "Listed {} children of {} at depth {}",
                blocks.len(),
                parent,
                context.depth
            );

            futures::stream::iter(blocks)
                .map(|block| self.resolve_block(block, context.clone(), Arc::clone(&permits)))
                .buffered(self.options.concurrency)
                .try_collect()
                .await
        }
        .boxed()
    }

    /// Attaches children to a block that has them; passes others through
    /// without touching the source.
    async fn resolve_block(
        &self,
        block: Block,
        context: FetchContext,
        permits: Arc<Semaphore>,
    ) -> Result<Block, SourceError> {
        if !block.has_children() {
            return Ok(block);
        }

        let id = NotionId::from(block.id());
        let child_context = context.descend(&id)?;
        let children = self.fetch_children(id, child_context, permits).await?;
        Ok(block.with_children(children))
    }
}

async fn acquire(permits: &Semaphore) -> Result<tokio::sync::SemaphorePermit<'_>, SourceError> {
    permits
        .acquire()
        .await
        .map_err(|e| SourceError::MalformedResponse(format!("Fetch permits closed: {}", e)))
}
