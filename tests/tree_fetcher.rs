// tests/tree_fetcher.rs
//! Tree fetching against an in-memory content source.

mod common;

use common::*;
use notion2html::{AppError, FetchOptions, Page, SourceError, TreeFetcher};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn fetcher(source: MockSource, options: FetchOptions) -> (Arc<MockSource>, TreeFetcher) {
    let source = Arc::new(source);
    let fetcher = TreeFetcher::new(source.clone(), options);
    (source, fetcher)
}

fn base_source() -> MockSource {
    MockSource::new().with_page(Page::new(page_id()).with_title("Test Page"))
}

fn cause(error: &AppError) -> &SourceError {
    error
        .source_cause()
        .unwrap_or_else(|| panic!("expected SourceUnavailable, got {:?}", error))
}

#[tokio::test]
async fn paginated_root_children_are_concatenated_in_order() {
    let blocks: Vec<_> = (1..=240).map(|n| paragraph(n, &format!("p{}", n))).collect();
    let source = base_source().with_children(&page_id(), blocks);
    let (source, fetcher) = fetcher(source, FetchOptions::default());

    let document = fetcher.fetch_tree(&page_id()).await.unwrap();

    assert_eq!(document.page.title, "Test Page");
    assert_eq!(document.blocks.len(), 240);
    let expected: Vec<String> = (1..=240).map(|n| format!("p{}", n)).collect();
    assert_eq!(texts(&document.blocks), expected);
    assert_eq!(source.list_calls_for(&page_id()), 3);
}

#[tokio::test]
async fn nested_children_are_attached() {
    let source = base_source()
        .with_children(&page_id(), vec![parent_paragraph(1, "parent")])
        .with_children(&block_id(1), vec![paragraph(2, "a"), paragraph(3, "b")]);
    let (_, fetcher) = fetcher(source, FetchOptions::default());

    let document = fetcher.fetch_tree(&page_id()).await.unwrap();

    assert_eq!(document.blocks.len(), 1);
    let parent = &document.blocks[0];
    assert!(parent.has_children());
    assert_eq!(texts(parent.children()), vec!["a", "b"]);
    assert_eq!(document.block_count(), 3);
}

#[tokio::test]
async fn childless_blocks_are_never_listed() {
    let source = base_source()
        .with_children(
            &page_id(),
            vec![paragraph(1, "leaf"), divider(2), to_do(3, "task", false)],
        )
        .with_children(&block_id(1), vec![paragraph(9, "hidden")]);
    let (source, fetcher) = fetcher(source, FetchOptions::default());

    let document = fetcher.fetch_tree(&page_id()).await.unwrap();

    assert!(document.blocks[0].children().is_empty());
    assert_eq!(source.list_calls().len(), 1);
    assert_eq!(source.list_calls_for(&block_id(1)), 0);
}

#[tokio::test]
async fn parent_with_no_children_gets_an_empty_list() {
    let source = base_source().with_children(&page_id(), vec![parent_paragraph(1, "empty")]);
    let (source, fetcher) = fetcher(source, FetchOptions::default());

    let document = fetcher.fetch_tree(&page_id()).await.unwrap();

    assert!(document.blocks[0].children().is_empty());
    assert_eq!(source.list_calls_for(&block_id(1)), 1);
}

#[tokio::test]
async fn any_failure_aborts_the_whole_fetch() {
    let source = base_source()
        .with_children(
            &page_id(),
            vec![parent_paragraph(1, "ok"), parent_paragraph(2, "broken")],
        )
        .with_children(&block_id(1), vec![paragraph(10, "fine")])
        .failing_on(&block_id(2));
    let (_, fetcher) = fetcher(source, FetchOptions::default());

    let error = fetcher.fetch_tree(&page_id()).await.unwrap_err();

    assert_eq!(error.to_string(), "Failed to load content from Notion");
    assert!(matches!(cause(&error), SourceError::Api { status: 500, .. }));
}

#[tokio::test]
async fn missing_page_is_unavailable() {
    let (source, fetcher) = fetcher(MockSource::new(), FetchOptions::default());

    let error = fetcher.fetch_tree(&page_id()).await.unwrap_err();

    assert!(matches!(cause(&error), SourceError::Api { status: 404, .. }));
    assert!(source.list_calls().is_empty());
}

fn chain_source() -> MockSource {
    base_source()
        .with_children(&page_id(), vec![parent_paragraph(1, "one")])
        .with_children(&block_id(1), vec![parent_paragraph(2, "two")])
        .with_children(&block_id(2), vec![parent_paragraph(3, "three")])
        .with_children(&block_id(3), vec![paragraph(4, "four")])
}

#[tokio::test]
async fn depth_limit_is_an_error() {
    let (_, fetcher) = fetcher(chain_source(), FetchOptions::default().with_max_depth(2));

    let error = fetcher.fetch_tree(&page_id()).await.unwrap_err();

    assert!(matches!(cause(&error), SourceError::DepthLimitExceeded(2)));
}

#[tokio::test]
async fn tree_within_depth_limit_is_complete() {
    let (_, fetcher) = fetcher(chain_source(), FetchOptions::default().with_max_depth(3));

    let document = fetcher.fetch_tree(&page_id()).await.unwrap();

    assert_eq!(document.block_count(), 4);
    let deepest = &document.blocks[0].children()[0].children()[0].children()[0];
    assert_eq!(texts(std::slice::from_ref(deepest)), vec!["four"]);
}

#[tokio::test]
async fn block_listed_beneath_itself_is_a_cycle() {
    let source = base_source()
        .with_children(&page_id(), vec![parent_paragraph(1, "loop")])
        .with_children(&block_id(1), vec![parent_paragraph(1, "loop again")]);
    let (source, fetcher) = fetcher(source, FetchOptions::default());

    let error = fetcher.fetch_tree(&page_id()).await.unwrap_err();

    assert!(matches!(cause(&error), SourceError::CycleDetected(_)));
    assert_eq!(source.list_calls_for(&block_id(1)), 1);
}

#[tokio::test]
async fn same_block_in_two_branches_is_not_a_cycle() {
    let source = base_source()
        .with_children(
            &page_id(),
            vec![parent_paragraph(1, "left"), parent_paragraph(2, "right")],
        )
        .with_children(&block_id(1), vec![parent_paragraph(3, "shared")])
        .with_children(&block_id(2), vec![parent_paragraph(3, "shared")])
        .with_children(&block_id(3), vec![paragraph(4, "leaf")]);
    let (_, fetcher) = fetcher(source, FetchOptions::default());

    let document = fetcher.fetch_tree(&page_id()).await.unwrap();

    assert_eq!(document.block_count(), 6);
}

#[tokio::test]
async fn slow_source_hits_the_deadline() {
    let source = base_source()
        .with_children(&page_id(), vec![paragraph(1, "late")])
        .delayed(&page_id(), Duration::from_millis(200));
    let options = FetchOptions::default().with_deadline(Duration::from_millis(50));
    let (_, fetcher) = fetcher(source, options);

    let error = fetcher.fetch_tree(&page_id()).await.unwrap_err();

    assert!(matches!(cause(&error), SourceError::DeadlineExceeded(_)));
}

#[tokio::test]
async fn concurrent_subtrees_keep_document_order() {
    let source = base_source()
        .with_children(
            &page_id(),
            vec![
                parent_paragraph(1, "slow"),
                parent_paragraph(2, "fast"),
                paragraph(3, "leaf"),
            ],
        )
        .with_children(&block_id(1), vec![paragraph(10, "slow child")])
        .with_children(&block_id(2), vec![paragraph(20, "fast child")])
        .delayed(&block_id(1), Duration::from_millis(50));
    let (_, fetcher) = fetcher(source, FetchOptions::default().with_concurrency(4));

    let document = fetcher.fetch_tree(&page_id()).await.unwrap();

    assert_eq!(texts(&document.blocks), vec!["slow", "fast", "leaf"]);
    assert_eq!(texts(document.blocks[0].children()), vec!["slow child"]);
    assert_eq!(texts(document.blocks[1].children()), vec!["fast child"]);
}

#[tokio::test]
async fn single_permit_still_completes() {
    let source = base_source()
        .with_children(
            &page_id(),
            vec![parent_paragraph(1, "a"), parent_paragraph(2, "b")],
        )
        .with_children(&block_id(1), vec![parent_paragraph(3, "c")])
        .with_children(&block_id(3), vec![paragraph(4, "d")])
        .with_children(&block_id(2), vec![paragraph(5, "e")]);
    let (_, fetcher) = fetcher(source, FetchOptions::default().with_concurrency(1));

    let document = fetcher.fetch_tree(&page_id()).await.unwrap();

    assert_eq!(document.block_count(), 5);
}
