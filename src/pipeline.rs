// src/pipeline.rs
//! Entry point for callers: fetch a page, render it, and map the outcome
//! to a view.
//!
//! Access decisions are made elsewhere; this module only consumes a yes/no
//! answer through [`AccessPolicy`] and never touches the content source
//! when the answer is no.

use crate::api::TreeFetcher;
use crate::error::AppError;
use crate::model::Page;
use crate::render::{render_page, Element, Node};
use crate::types::PageId;

/// A page and its rendered body.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub page: Page,
    pub body: Node,
}

/// Fetches the complete tree for `page_id` and renders it.
pub async fn fetch_and_render(
    fetcher: &TreeFetcher,
    page_id: &PageId,
) -> Result<RenderedPage, AppError> {
    let document = fetcher.fetch_tree(page_id).await?;
    let body = render_page(&document);
    log::debug!("Rendered page {} ({} blocks)", page_id, document.block_count());
    Ok(RenderedPage {
        page: document.page,
        body,
    })
}

/// Answers whether the current caller may view a page.
pub trait AccessPolicy: Send + Sync {
    fn may_view(&self, page_id: &PageId) -> bool;
}

/// A precomputed decision from the session layer.
impl AccessPolicy for bool {
    fn may_view(&self, _page_id: &PageId) -> bool {
        *self
    }
}

/// Grants access to every page. Used by the command-line tool, where the
/// API key itself is the access boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn may_view(&self, _page_id: &PageId) -> bool {
        true
    }
}

/// What a caller should display for a page.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentView {
    Ready(RenderedPage),
    /// Content has been requested but is not available yet.
    Loading,
    /// The fetch failed; details are in the logs, not the view.
    Unavailable,
    NoAccess,
}

impl ContentView {
    pub fn is_ready(&self) -> bool {
        matches!(self, ContentView::Ready(_))
    }

    /// The node to display for this view.
    pub fn to_node(&self) -> Node {
        match self {
            ContentView::Ready(rendered) => rendered.body.clone(),
            ContentView::Loading => Element::new("div")
                .class("notion-loading")
                .attr("aria-busy", "true")
                .text("Loading…")
                .into(),
            ContentView::Unavailable => Element::new("div")
                .class("notion-error")
                .attr("role", "alert")
                .text("Failed to load content")
                .into(),
            ContentView::NoAccess => Element::new("div")
                .class("notion-no-access")
                .text("You do not have access to this content")
                .into(),
        }
    }
}

/// Checks access, then fetches and renders.
pub async fn present(
    policy: &dyn AccessPolicy,
    fetcher: &TreeFetcher,
    page_id: &PageId,
) -> ContentView {
    if !policy.may_view(page_id) {
        log::info!("Access to page {} denied", page_id);
        return ContentView::NoAccess;
    }

    match fetch_and_render(fetcher, page_id).await {
        Ok(rendered) => ContentView::Ready(rendered),
        Err(e) => {
            log::error!("{}: {:?}", e, e.source_cause());
            ContentView::Unavailable
        }
    }
}
