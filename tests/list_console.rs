mod common;

use std::sync::Arc;

use catalog_console::catalog::{ProductInput, SortField, SortSpec};
use catalog_console::config::ConsoleConfig;
use catalog_console::store::MemoryStore;
use catalog_console::ui::query::QueryIntent;
use catalog_console::ui::ListConsole;
use common::{catalogue, ids};
use tokio::time::Instant;

fn console(records: usize, location: &str) -> ListConsole {
    let store = Arc::new(MemoryStore::with_records(catalogue(records)));
    ListConsole::new(store, location.into(), &ConsoleConfig::default())
}

/// Test that the console fetches as soon as it is created.
#[tokio::test]
async fn test_initial_fetch() {
    let mut console = console(12, "/products");
    assert!(console.snapshot().loading);

    let snapshot = console.settle().await;
    assert_eq!(snapshot.total, 12);
    assert_eq!(snapshot.total_pages, 2);
    assert_eq!(snapshot.items.len(), 10);
}

/// Test that changing the sort refetches from page one.
#[tokio::test]
async fn test_sort_change_refetches() {
    let mut console = console(12, "/products?page=2");
    console.settle().await;

    console
        .query()
        .dispatch(QueryIntent::SetSort(Some(SortSpec::descending(SortField::Stock))));
    let snapshot = console.settle().await;

    assert_eq!(snapshot.served_page, Some(1));
    assert_eq!(ids(&snapshot.items)[..2], ["p11", "p10"]);
}

/// Test that typed search reaches the list only after the quiet period.
#[tokio::test(start_paused = true)]
async fn test_typed_search_is_debounced() {
    let mut console = console(30, "/products?page=3");
    console.settle().await;
    let start = Instant::now();

    console.search().edit("item 2");
    let snapshot = console.settle().await;

    assert!(start.elapsed() >= std::time::Duration::from_millis(300));
    assert_eq!(snapshot.total, 12);
    assert_eq!(snapshot.served_page, Some(1));
    assert_eq!(console.query().read().filter, "item 2");
}

/// Test that deleting the only row of the last page moves back a page.
#[tokio::test]
async fn test_delete_last_row_moves_to_previous_page() {
    let mut console = console(11, "/products?page=2");
    let snapshot = console.settle().await;
    assert_eq!(ids(&snapshot.items), vec!["p10"]);

    console.mutations().delete("p10").await.unwrap();
    let snapshot = console.settle().await;

    assert_eq!(snapshot.total, 10);
    assert_eq!(snapshot.served_page, Some(1));
    assert_eq!(console.query().read().page, 1);
}

/// Test that a created product shows up first in the unsorted list.
#[tokio::test]
async fn test_created_product_listed_first() {
    let mut console = console(3, "/products");
    console.settle().await;

    let created = console
        .mutations()
        .create(&ProductInput {
            name: "Foldable Chair".into(),
            price: "59.00".parse().unwrap(),
            stock: "4".parse().unwrap(),
        })
        .await
        .unwrap();
    let snapshot = console.settle().await;

    assert_eq!(snapshot.items[0].id, created.id);
    assert_eq!(snapshot.total, 4);
}
