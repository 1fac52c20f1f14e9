//! autos_catalog — read-only lookup API over a vehicle catalog collection.
//!
//! Given a brand it lists models, given a brand and model it lists
//! versions, and given all three it returns a single listing.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use autos_catalog::{api, CatalogService, InMemoryListingStore, Listing};
//!
//! let store = InMemoryListingStore::with_listings([
//!     Listing::new("1", "AUDI", "A1", "1.4 TFSi MT"),
//! ]);
//! let catalog = Arc::new(CatalogService::new(store));
//! api::serve(catalog, ([0, 0, 0, 0], 3000).into()).await?;
//! ```

pub mod api;
mod catalog;
pub mod config;
mod error;
mod listing;
mod store;

pub use catalog::{Brand, CatalogService, ListingSummary, ModelVersion};
pub use error::ApiError;
pub use listing::{
    normalize, Listing, ListingField, ListingFilter, BRAND_FIELD, ID_FIELD, MODEL_FIELD,
    VERSION_FIELD,
};
pub use store::{InMemoryListingStore, ListingStore, StoreError};

#[cfg(feature = "mongo")]
pub use store::{MongoConfig, MongoListingStore};
