//! Cart snapshots survive a restart when backed by a file store.

use std::sync::Arc;

use async_trait::async_trait;
use rocket_cache::{FileStore, KeyValueStore};
use rocket_cart::{
    CartError, CartStore, Notice, Product, ProductCatalog, ProductId, RecordingNotifier, Stock,
    StockLookup,
};

struct Shelf;

#[async_trait]
impl StockLookup for Shelf {
    async fn stock(&self, id: ProductId) -> Result<Stock, CartError> {
        Ok(Stock::new(id, 2))
    }
}

#[async_trait]
impl ProductCatalog for Shelf {
    async fn product(&self, id: ProductId) -> Result<Product, CartError> {
        Ok(Product::new(id, format!("Shoe {id}"), 149.9, "https://img/shoe.jpg"))
    }
}

fn open(path: &std::path::Path, notices: &RecordingNotifier) -> CartStore {
    let shelf = Arc::new(Shelf);
    CartStore::restore(FileStore::open(path), shelf.clone(), shelf, notices.clone())
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let notices = RecordingNotifier::new();

    let first = open(&path, &notices);
    first.add_product(ProductId::new(1)).await;
    first.add_product(ProductId::new(1)).await;
    first.add_product(ProductId::new(2)).await;
    let expected = first.cart();
    drop(first);

    let second = open(&path, &notices);
    assert_eq!(second.cart(), expected);
    assert_eq!(second.cart().amount_of(ProductId::new(1)), 2);

    // Stock of 2 still applies to the restored line.
    second.add_product(ProductId::new(1)).await;
    assert_eq!(second.cart().amount_of(ProductId::new(1)), 2);
    assert_eq!(notices.notices(), vec![Notice::StockExceeded]);
}

#[tokio::test]
async fn test_snapshot_is_json_array_under_namespaced_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let notices = RecordingNotifier::new();

    let store = open(&path, &notices);
    store.add_product(ProductId::new(5)).await;

    let raw = FileStore::open(&path).get("@RocketShoes:cart").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "id": 5,
            "title": "Shoe 5",
            "price": 149.9,
            "image": "https://img/shoe.jpg",
            "amount": 1
        }])
    );
}

#[tokio::test]
async fn test_removing_last_item_persists_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let notices = RecordingNotifier::new();

    let store = open(&path, &notices);
    store.add_product(ProductId::new(5)).await;
    store.remove_product(ProductId::new(5)).await;

    let raw = FileStore::open(&path).get("@RocketShoes:cart").unwrap();
    assert_eq!(raw.as_deref(), Some("[]"));
    assert!(open(&path, &notices).cart().is_empty());
}
