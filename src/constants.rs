// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story
//! of how the system operates: how deep it recurses, how much it fetches,
//! how long it waits.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Base URL of the public Notion API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// API version sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips during recursive fetching.
pub const NOTION_API_PAGE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Tree fetching boundaries
// ---------------------------------------------------------------------------

/// Default nesting depth when recursively fetching a block tree.
pub const DEFAULT_FETCH_DEPTH: usize = 32;

/// Hard ceiling on the fetch depth, whatever the caller asks for.
///
/// Real pages rarely nest beyond a dozen levels. Anything deeper is
/// treated as a malformed or cyclic tree.
pub const MAX_FETCH_DEPTH: usize = 64;

/// Upper bound on sibling subtrees fetched at the same time.
pub const MAX_FETCH_CONCURRENCY: usize = 8;

/// Wall-clock budget for fetching one whole page tree.
pub const DEFAULT_FETCH_DEADLINE: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
