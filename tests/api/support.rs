//! Shared fixtures: a seeded in-memory catalog served on an ephemeral port.

use std::sync::Arc;

use async_trait::async_trait;
use autos_catalog::{
    api, CatalogService, InMemoryListingStore, Listing, ListingField, ListingFilter,
    ListingStore, StoreError,
};

/// Listings shared by most tests.
pub fn seeded_store() -> InMemoryListingStore {
    InMemoryListingStore::with_listings([
        Listing::new("a1-1", "AUDI", "A1", "1.4 TFSi MT"),
        Listing::new("a1-2", "AUDI", "A1", "1.0 TFSi"),
        Listing::new("a1-3", "AUDI", "A1", "  "),
        Listing::new("a1-4", "AUDI", "A1", ""),
        Listing::new("a3-1", "AUDI", "A3", "2.0 TDI"),
        Listing::new("a3-2", " Audi ", "A3", "1.5 TFSI"),
        Listing::new("bmw-1", "BMW", "X1", "sDrive18i"),
        Listing::new("fiat-1", "FIAT", "500", "1.2 Pop"),
        Listing::new("blank-1", "   ", "Nada", "Nada"),
        Listing::new("blank-2", "", "Nada", "Nada"),
    ])
}

/// Bind to port 0 and return the base URL.
pub async fn start_server<S: ListingStore + 'static>(store: S) -> String {
    let app = api::router(Arc::new(CatalogService::new(store)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn get(url: String) -> (u16, serde_json::Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status().as_u16();
    let body = resp.json().await.unwrap();
    (status, body)
}

/// A store whose every query fails, as when the connection drops.
pub struct BrokenStore;

#[async_trait]
impl ListingStore for BrokenStore {
    async fn distinct(
        &self,
        _field: ListingField,
        _filter: &ListingFilter,
    ) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Query("server selection timeout: secret-host:27017".into()))
    }

    async fn find(&self, _filter: &ListingFilter) -> Result<Vec<Listing>, StoreError> {
        Err(StoreError::Query("server selection timeout: secret-host:27017".into()))
    }

    async fn find_first(&self, _filter: &ListingFilter) -> Result<Option<Listing>, StoreError> {
        Err(StoreError::Query("server selection timeout: secret-host:27017".into()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Connection("down".into()))
    }
}
