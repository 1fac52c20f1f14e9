//! Listing — one vehicle catalog record and the filters used to look it up.
//!
//! Brand, model and version comparisons are whole-value, case-insensitive
//! and ignore surrounding whitespace. They are never substring or pattern
//! matches.

use serde::{Deserialize, Serialize};

/// Store field holding the listing identifier.
pub const ID_FIELD: &str = "_id";
/// Store field holding the brand.
pub const BRAND_FIELD: &str = "Marca";
/// Store field holding the model.
pub const MODEL_FIELD: &str = "Modelo";
/// Store field holding the submodel, exposed as "version".
pub const VERSION_FIELD: &str = "Submodelo";

/// A single vehicle catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub version: String,
}

impl Listing {
    pub fn new(
        id: impl Into<String>,
        brand: impl Into<String>,
        model: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
            model: model.into(),
            version: version.into(),
        }
    }

    /// Returns the stored value for a field.
    pub fn get(&self, field: ListingField) -> &str {
        match field {
            ListingField::Brand => &self.brand,
            ListingField::Model => &self.model,
            ListingField::Version => &self.version,
        }
    }
}

/// One level of the brand / model / version hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingField {
    Brand,
    Model,
    Version,
}

impl ListingField {
    /// Name of the field in the backing store.
    pub fn store_name(self) -> &'static str {
        match self {
            ListingField::Brand => BRAND_FIELD,
            ListingField::Model => MODEL_FIELD,
            ListingField::Version => VERSION_FIELD,
        }
    }
}

/// Normalize a value for matching: trimmed and lowercased.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Equality filter over brand, model and version.
///
/// Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
}

impl ListingFilter {
    /// A filter that matches every listing.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The constrained fields paired with their normalized wanted values.
    pub fn conditions(&self) -> Vec<(ListingField, String)> {
        [
            (ListingField::Brand, &self.brand),
            (ListingField::Model, &self.model),
            (ListingField::Version, &self.version),
        ]
        .into_iter()
        .filter_map(|(field, wanted)| wanted.as_deref().map(|w| (field, normalize(w))))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.model.is_none() && self.version.is_none()
    }

    /// Whether the listing satisfies every constrained field.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.conditions()
            .iter()
            .all(|(field, wanted)| normalize(listing.get(*field)) == *wanted)
    }
}
