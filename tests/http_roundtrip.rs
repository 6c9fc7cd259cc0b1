mod common;

use std::sync::Arc;
use std::time::Duration;

use catalog_console::catalog::{
    ListParams, NewProduct, ProductChanges, ProductStatus, SortField, SortSpec,
};
use catalog_console::config::ConsoleConfig;
use catalog_console::store::{HttpStore, MemoryStore, RecordStore, StoreError};
use catalog_console::ui::ListConsole;
use common::{catalogue, ids, start_server};
use rust_decimal::Decimal;

async fn client_for(records: usize) -> (HttpStore, Arc<MemoryStore>) {
    let backend = Arc::new(MemoryStore::with_records(catalogue(records)));
    let (addr, _handle) = start_server(backend.clone()).await;
    let store = HttpStore::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    (store, backend)
}

/// Test that listing over HTTP matches the reference query.
#[tokio::test]
async fn test_list_over_http() {
    let (store, _) = client_for(25).await;

    let params = ListParams {
        filter: "item 1".into(),
        page: 2,
        page_size: 5,
        sort: Some(SortSpec::descending(SortField::Price)),
    };
    let page = store.list(&params).await.unwrap();

    assert_eq!(page.total, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 2);
    assert_eq!(ids(&page.items), vec!["p15", "p14", "p13", "p12", "p11"]);
}

/// Test the create, update and delete lifecycle over HTTP.
#[tokio::test]
async fn test_write_lifecycle_over_http() {
    let (store, backend) = client_for(2).await;

    let created = store
        .create(NewProduct {
            name: "Brushed Kettle".into(),
            price: Decimal::new(4999, 2),
            stock: 12,
        })
        .await
        .unwrap();
    assert_eq!(created.status, ProductStatus::Draft);
    assert_eq!(created.price, Decimal::new(4999, 2));
    assert_eq!(backend.records()[0].id, created.id);

    let activated = store
        .update(
            &created.id,
            ProductChanges {
                status: Some(ProductStatus::Active),
                ..ProductChanges::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(activated.status, ProductStatus::Active);
    let published = activated.published_at.expect("stamped on activation");

    let archived = store
        .update(
            &created.id,
            ProductChanges {
                status: Some(ProductStatus::Archived),
                stock: Some(0),
                ..ProductChanges::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(archived.published_at, Some(published));
    assert_eq!(archived.stock, 0);

    store.delete(&created.id).await.unwrap();
    assert_eq!(backend.len(), 2);
}

/// Test that unknown ids come back as NotFound.
#[tokio::test]
async fn test_unknown_id_over_http() {
    let (store, _) = client_for(1).await;

    let err = store
        .update("nope", ProductChanges::default())
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::not_found("nope"));

    let err = store.delete("nope").await.unwrap_err();
    assert_eq!(err, StoreError::not_found("nope"));
}

/// Test that an unreachable backend is a transport error.
#[tokio::test]
async fn test_unreachable_backend() {
    let port = common::free_port();
    let store = HttpStore::new(&format!("http://127.0.0.1:{}", port), Duration::from_secs(1)).unwrap();

    let err = store.list(&ListParams::default()).await.unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)));
}

/// Test that a console opened on a page past the end moves to the last page.
#[tokio::test]
async fn test_console_corrects_page_drift_over_http() {
    let (store, _) = client_for(23).await;
    let settings = ConsoleConfig {
        page_size: 10,
        debounce_ms: 300,
    };

    let mut console = ListConsole::new(Arc::new(store), "/products?page=9&tab=x".into(), &settings);
    let snapshot = console.settle().await;

    assert_eq!(snapshot.served_page, Some(3));
    assert_eq!(snapshot.items.len(), 3);
    assert_eq!(console.query().read().page, 3);
    assert_eq!(console.query().location().get("tab"), Some("x"));
}
