//! InMemoryListingStore - Vec-backed listing store for testing and development.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use super::{ListingStore, StoreError};
use crate::listing::{
    Listing, ListingField, ListingFilter, BRAND_FIELD, ID_FIELD, MODEL_FIELD, VERSION_FIELD,
};

/// In-memory listing store.
///
/// Clone-friendly via Arc; clones share the same listings.
#[derive(Debug, Clone, Default)]
pub struct InMemoryListingStore {
    listings: Arc<RwLock<Vec<Listing>>>,
}

impl InMemoryListingStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given listings.
    pub fn with_listings(listings: impl IntoIterator<Item = Listing>) -> Self {
        Self {
            listings: Arc::new(RwLock::new(listings.into_iter().collect())),
        }
    }

    /// Build a store from raw catalog documents (`{"_id", "Marca", "Modelo", "Submodelo"}`).
    ///
    /// Missing or non-string fields become empty strings. Documents without an
    /// `_id` get their position in the array as identifier.
    pub fn from_documents(documents: &[Value]) -> Result<Self, StoreError> {
        let listings = documents
            .iter()
            .enumerate()
            .map(|(index, document)| listing_from_json(index, document))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_listings(listings))
    }

    /// Load raw catalog documents from a JSON array file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| StoreError::Connection(format!("{}: {}", path.display(), e)))?;
        let documents: Vec<Value> =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode(e.to_string()))?;
        Self::from_documents(&documents)
    }

    /// Add a listing.
    pub fn insert(&self, listing: Listing) -> Result<(), StoreError> {
        self.listings
            .write()
            .map_err(|_| StoreError::Connection("lock poisoned".into()))?
            .push(listing);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listings.read().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn matching(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError> {
        let listings = self
            .listings
            .read()
            .map_err(|_| StoreError::Connection("lock poisoned".into()))?;
        Ok(listings
            .iter()
            .filter(|listing| filter.matches(listing))
            .cloned()
            .collect())
    }
}

fn listing_from_json(index: usize, document: &Value) -> Result<Listing, StoreError> {
    let object = document
        .as_object()
        .ok_or_else(|| StoreError::Decode(format!("document {} is not an object", index)))?;

    let text = |field: &str| {
        object
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let id = match object.get(ID_FIELD) {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Object(oid)) => oid
            .get("$oid")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::Decode(format!("document {} has an unreadable _id", index)))?,
        Some(Value::Null) | None => index.to_string(),
        Some(other) => other.to_string(),
    };

    Ok(Listing::new(
        id,
        text(BRAND_FIELD),
        text(MODEL_FIELD),
        text(VERSION_FIELD),
    ))
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn distinct(
        &self,
        field: ListingField,
        filter: &ListingFilter,
    ) -> Result<Vec<String>, StoreError> {
        let values: BTreeSet<String> = self
            .matching(filter)?
            .iter()
            .map(|listing| listing.get(field).to_string())
            .collect();
        Ok(values.into_iter().collect())
    }

    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError> {
        self.matching(filter)
    }

    async fn find_first(&self, filter: &ListingFilter) -> Result<Option<Listing>, StoreError> {
        Ok(self
            .matching(filter)?
            .into_iter()
            .min_by(|a, b| a.id.cmp(&b.id)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
