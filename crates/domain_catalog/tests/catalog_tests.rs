//! Integration tests for the catalog domain

use std::sync::Arc;

use core_kernel::Money;
use domain_catalog::ports::mock::InMemoryCatalogStore;
use domain_catalog::{CatalogService, NewItem};
use rust_decimal_macros::dec;

#[tokio::test]
async fn sku_lookup_round_trips() {
    let svc = CatalogService::new(Arc::new(InMemoryCatalogStore::new()));
    let created = svc
        .create(NewItem::new("BK-100", "Intro to Rust", Money::new(dec!(25.00))))
        .await
        .unwrap();

    let found = svc.find_by_sku("BK-100").await.unwrap().unwrap();
    assert_eq!(found, created);
    assert!(svc.find_by_sku("BK-999").await.unwrap().is_none());
    assert!(svc.find_by_sku("").await.unwrap().is_none());
}

#[tokio::test]
async fn price_change_does_not_touch_other_fields() {
    let svc = CatalogService::new(Arc::new(InMemoryCatalogStore::new()));
    let created = svc
        .create(NewItem::new("BK-100", "Intro to Rust", Money::new(dec!(25.00))))
        .await
        .unwrap();

    let repriced = svc
        .update(
            created.id,
            NewItem::new("BK-100", "Intro to Rust", Money::new(dec!(29.99))),
        )
        .await
        .unwrap();

    assert_eq!(repriced.unit_price, Money::new(dec!(29.99)));
    assert_eq!(repriced.sku, created.sku);
    assert!(repriced.active);
}

#[tokio::test]
async fn search_matches_sku_and_name() {
    let svc = CatalogService::new(Arc::new(InMemoryCatalogStore::new()));
    svc.create(NewItem::new("BK-100", "Intro to Rust", Money::new(dec!(25.00))))
        .await
        .unwrap();
    svc.create(NewItem::new("PEN-01", "Ballpoint Pen", Money::new(dec!(0.50))))
        .await
        .unwrap();

    assert_eq!(svc.search("bk-").await.unwrap().len(), 1);
    assert_eq!(svc.search("pen").await.unwrap().len(), 1);
    assert!(svc.search("").await.unwrap().is_empty());
}
