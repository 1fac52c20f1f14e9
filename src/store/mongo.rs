//! MongoListingStore - listing store backed by a MongoDB collection.
//!
//! The connection is established once, proven with a `ping`, and the
//! collection handle is then shared by every request. The driver keeps its
//! own connection pool behind the handle; nothing here reconnects.
//!
//! Lookups compare `$toLower`/`$trim` of the stored value inside `$expr`.
//! That keeps stored values untouched and matches them trimmed, but no index
//! can serve it, so every filtered lookup scans the collection. A
//! case-insensitive collation index or a stored normalized field would avoid
//! the scan at the cost of an extra index or a migration of the catalog.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection, Database};

use super::{ListingStore, StoreError};
use crate::listing::{
    Listing, ListingField, ListingFilter, BRAND_FIELD, ID_FIELD, MODEL_FIELD, VERSION_FIELD,
};

/// Where the catalog collection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

/// Listing store over a MongoDB collection.
#[derive(Clone)]
pub struct MongoListingStore {
    database: Database,
    collection: Collection<Document>,
}

impl MongoListingStore {
    /// Connect to MongoDB and verify the database answers.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let database = client.database(&config.database);
        let store = Self {
            collection: database.collection(&config.collection),
            database,
        };
        store.ping().await?;
        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "connected to MongoDB"
        );
        Ok(store)
    }
}

/// Translate a filter into a query document.
///
/// Each condition compares the trimmed, lowercased stored value with the
/// normalized input wrapped in `$literal`, so input is never read as a
/// pattern or a field path. Stored values that are not strings (arrays,
/// embedded documents) convert to null and simply fail to match.
pub(crate) fn filter_document(filter: &ListingFilter) -> Document {
    let conditions: Vec<Bson> = filter
        .conditions()
        .into_iter()
        .map(|(field, wanted)| {
            let path = format!("${}", field.store_name());
            Bson::Document(doc! {
                "$eq": [
                    { "$toLower": { "$trim": { "input": as_string(path) } } },
                    { "$literal": wanted }
                ]
            })
        })
        .collect();

    if conditions.is_empty() {
        Document::new()
    } else {
        doc! { "$expr": { "$and": conditions } }
    }
}

/// Convert a field to a string without ever raising a conversion error.
fn as_string(path: String) -> Document {
    doc! {
        "$convert": {
            "input": path,
            "to": "string",
            "onError": Bson::Null,
            "onNull": Bson::Null
        }
    }
}

/// Read a listing out of a raw catalog document.
pub(crate) fn listing_from_document(document: &Document) -> Listing {
    let id = match document.get(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let text = |field: &str| document.get_str(field).unwrap_or_default().to_string();

    Listing::new(
        id,
        text(BRAND_FIELD),
        text(MODEL_FIELD),
        text(VERSION_FIELD),
    )
}

fn projection() -> Document {
    let mut projection = Document::new();
    for field in [BRAND_FIELD, MODEL_FIELD, VERSION_FIELD] {
        projection.insert(field, 1);
    }
    projection
}

fn query_error(err: mongodb::error::Error) -> StoreError {
    StoreError::Query(err.to_string())
}

#[async_trait]
impl ListingStore for MongoListingStore {
    async fn distinct(
        &self,
        field: ListingField,
        filter: &ListingFilter,
    ) -> Result<Vec<String>, StoreError> {
        let values = self
            .collection
            .distinct(field.store_name(), filter_document(filter))
            .await
            .map_err(query_error)?;

        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(s) => Some(s),
                _ => None,
            })
            .collect())
    }

    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError> {
        let documents: Vec<Document> = self
            .collection
            .find(filter_document(filter))
            .projection(projection())
            .await
            .map_err(query_error)?
            .try_collect()
            .await
            .map_err(query_error)?;

        Ok(documents.iter().map(listing_from_document).collect())
    }

    async fn find_first(&self, filter: &ListingFilter) -> Result<Option<Listing>, StoreError> {
        let document = self
            .collection
            .find_one(filter_document(filter))
            .projection(projection())
            .sort(doc! { "_id": 1 })
            .await
            .map_err(query_error)?;

        Ok(document.as_ref().map(listing_from_document))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(())
    }
}
