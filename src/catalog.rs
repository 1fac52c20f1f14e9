//! CatalogService — the lookups behind every catalog endpoint.
//!
//! Each operation issues exactly one store query and shapes the result.
//! Distinct-value lists are trimmed, stripped of blank values,
//! de-duplicated and sorted in ordinal (byte-wise) order.

use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::listing::{Listing, ListingField, ListingFilter};
use crate::store::{ListingStore, StoreError};

/// A brand entry in the brand list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
}

/// A single listing as returned by the auto-info lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub marca: String,
    pub modelo: String,
    pub version: String,
    pub id: String,
}

impl From<Listing> for ListingSummary {
    fn from(listing: Listing) -> Self {
        Self {
            marca: listing.brand,
            modelo: listing.model,
            version: listing.version,
            id: listing.id,
        }
    }
}

/// A model/version pair for the legacy model-versions shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVersion {
    pub model: String,
    pub version: String,
    pub combined: String,
}

impl From<Listing> for ModelVersion {
    fn from(listing: Listing) -> Self {
        Self {
            combined: format!("{} - {}", listing.model, listing.version),
            model: listing.model,
            version: listing.version,
        }
    }
}

/// Catalog lookups over a [`ListingStore`].
pub struct CatalogService<S> {
    store: S,
    query_timeout: Option<Duration>,
}

impl<S: ListingStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            query_timeout: None,
        }
    }

    /// Fail any store query that runs longer than `timeout`.
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All distinct brands.
    pub async fn brands(&self) -> Result<Vec<Brand>, ApiError> {
        let values = self
            .query(
                "brands",
                self.store.distinct(ListingField::Brand, &ListingFilter::all()),
            )
            .await?;
        Ok(clean_sorted(values)
            .into_iter()
            .map(|name| Brand { name })
            .collect())
    }

    /// Distinct models of one brand.
    pub async fn models(&self, brand: Option<&str>) -> Result<Vec<String>, ApiError> {
        let [brand] = required([("brand", brand)])?;
        let filter = ListingFilter::all().brand(brand);
        let values = self
            .query("models", self.store.distinct(ListingField::Model, &filter))
            .await?;
        Ok(clean_sorted(values))
    }

    /// Distinct versions of one brand and model.
    pub async fn versions(
        &self,
        brand: Option<&str>,
        model: Option<&str>,
    ) -> Result<Vec<String>, ApiError> {
        let [brand, model] = required([("brand", brand), ("model", model)])?;
        let filter = ListingFilter::all().brand(brand).model(model);
        let values = self
            .query("versions", self.store.distinct(ListingField::Version, &filter))
            .await?;
        Ok(clean_sorted(values))
    }

    /// The listing for an exact brand, model and version.
    ///
    /// When several listings match, the one with the lowest identifier wins.
    pub async fn listing(
        &self,
        brand: Option<&str>,
        model: Option<&str>,
        version: Option<&str>,
    ) -> Result<ListingSummary, ApiError> {
        let [brand, model, version] =
            required([("brand", brand), ("model", model), ("version", version)])?;
        let filter = ListingFilter::all()
            .brand(brand)
            .model(model)
            .version(version);

        self.query("listing", self.store.find_first(&filter))
            .await?
            .map(ListingSummary::from)
            .ok_or_else(|| {
                ApiError::NotFound(format!("no listing for {} {} {}", brand, model, version))
            })
    }

    /// Every listing of one brand, as model/version pairs.
    ///
    /// Not de-duplicated; values are returned as stored, ordered by model,
    /// then version, then identifier.
    pub async fn model_versions(&self, brand: Option<&str>) -> Result<Vec<ModelVersion>, ApiError> {
        let [brand] = required([("brand", brand)])?;
        let filter = ListingFilter::all().brand(brand);
        let mut listings = self.query("model_versions", self.store.find(&filter)).await?;
        listings.sort_by(|a, b| {
            (&a.model, &a.version, &a.id).cmp(&(&b.model, &b.version, &b.id))
        });
        Ok(listings.into_iter().map(ModelVersion::from).collect())
    }

    async fn query<T>(
        &self,
        operation: &'static str,
        query: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        let result = match self.query_timeout {
            Some(timeout) => tokio::time::timeout(timeout, query)
                .await
                .unwrap_or(Err(StoreError::Timeout { operation })),
            None => query.await,
        };
        if let Err(e) = &result {
            tracing::error!(operation, error = %e, "catalog query failed");
        }
        result
    }
}

/// Check that every named parameter is present and not blank.
fn required<'a, const N: usize>(
    params: [(&'static str, Option<&'a str>); N],
) -> Result<[&'a str; N], ApiError> {
    let missing: Vec<&'static str> = params
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::MissingParameters(missing));
    }
    Ok(params.map(|(_, value)| value.unwrap_or_default()))
}

/// Trim, drop blanks, de-duplicate and sort.
fn clean_sorted(values: Vec<String>) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
