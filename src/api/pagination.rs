// src/api/pagination.rs
//! Cursor pagination over a single listing.

use super::PaginatedResponse;
use crate::error::SourceError;

/// Drains a cursor-paginated listing into one vector, preserving arrival
/// order. Calls are strictly sequential since each cursor comes from the
/// previous response.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_fn: F) -> Result<Vec<T>, SourceError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, SourceError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_fn(cursor).await?;

        pages_fetched += 1;
        cursor = response.next_cursor;
        all_items.extend(response.results);

        if !response.has_more || cursor.is_none() {
            break;
        }
    }

    log::trace!(
        "Pagination finished: {} items over {} requests",
        all_items.len(),
        pages_fetched
    );

    Ok(all_items)
}
