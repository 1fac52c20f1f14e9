//! ListingStore — the backing document store seam.
//!
//! The catalog service only ever needs three read shapes from the store:
//! distinct values of one field, all matching listings, and the first
//! matching listing. Each backend implements those and nothing else;
//! trimming, sorting and de-duplication happen in the service.
//!
//! ## Backends
//!
//! - [`InMemoryListingStore`] — Vec-backed, for tests and local development.
//! - `MongoListingStore` — MongoDB collection (requires the `mongo` feature).

mod in_memory;
#[cfg(feature = "mongo")]
mod mongo;

use std::fmt;

use async_trait::async_trait;

use crate::listing::{Listing, ListingField, ListingFilter};

pub use in_memory::InMemoryListingStore;
#[cfg(feature = "mongo")]
pub use mongo::{MongoConfig, MongoListingStore};

/// Read-only query surface over the listing collection.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Raw distinct values of `field` among listings matching `filter`.
    ///
    /// Values are returned as stored: not trimmed, not sorted.
    async fn distinct(
        &self,
        field: ListingField,
        filter: &ListingFilter,
    ) -> Result<Vec<String>, StoreError>;

    /// Every listing matching `filter`, in no particular order.
    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError>;

    /// The matching listing with the lowest identifier, if any.
    ///
    /// "Lowest" is the backend's own order: MongoDB sorts `_id` by BSON type
    /// and value, the in-memory store compares ids as strings. The two agree
    /// for ObjectId hex ids but not for numeric ids (`"10"` sorts before `"9"`
    /// as a string).
    async fn find_first(&self, filter: &ListingFilter) -> Result<Option<Listing>, StoreError>;

    /// Round-trip to the store to prove it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Error type for listing store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Could not establish or use the connection to the store.
    Connection(String),
    /// The store rejected or failed a query.
    Query(String),
    /// The query did not finish within the configured timeout.
    Timeout { operation: &'static str },
    /// A stored document could not be read.
    Decode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Connection(msg) => write!(f, "store connection error: {}", msg),
            StoreError::Query(msg) => write!(f, "store query error: {}", msg),
            StoreError::Timeout { operation } => {
                write!(f, "store query timed out during {}", operation)
            }
            StoreError::Decode(msg) => write!(f, "store decode error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
