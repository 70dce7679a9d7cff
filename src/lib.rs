// src/lib.rs
//! notion2html library: fetches Notion pages as complete block trees and
//! renders them into HTML presentation nodes.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `SourceError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `RenderConfig`
//! - **Domain model**: `Page`, `Document`, `Block` and its per-variant payloads
//! - **Domain types**: `NotionId`, `PageId`, `BlockId`, `RichTextSpan`, `Color`
//! - **API client**: `ContentSource`, `NotionHttpClient`, `TreeFetcher`
//! - **Rendering**: `render_page`, `render_block`, `render_spans`, `Node`
//! - **Entry point**: `fetch_and_render`, `present`, `ContentView`

pub mod api;
mod config;
pub mod constants;
mod error;
pub mod model;
mod pipeline;
pub mod render;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, SourceError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, RenderConfig};

// --- Domain Model ---
pub use crate::model::{Block, BlockCommon, Document, Page};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiBaseUrl, ApiKey, BlockId, Color, NotionId, PageId, RichTextSpan,
};

// --- API Client ---
pub use crate::api::{
    ChildrenPage, ContentSource, FetchOptions, NotionHttpClient, PaginatedResponse, TreeFetcher,
};

// --- Rendering ---
pub use crate::render::{
    render_block, render_blocks, render_page, render_spans, standalone_html, Element, Node,
};

// --- Entry Point ---
pub use crate::pipeline::{
    fetch_and_render, present, AccessPolicy, AllowAll, ContentView, RenderedPage,
};
