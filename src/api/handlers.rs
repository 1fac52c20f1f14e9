//! HTTP route handlers for the catalog API.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use super::response::{Failure, Success};
use crate::catalog::{Brand, CatalogService, ListingSummary, ModelVersion};
use crate::error::ApiError;
use crate::store::ListingStore;

/// Query string accepted by the catalog endpoints.
///
/// Every field is optional here; each endpoint decides which are required.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
}

/// Query extraction result; rejections become JSON 400s instead of axum's plain text.
type ParamsResult = Result<Query<CatalogParams>, QueryRejection>;

fn params(query: ParamsResult) -> Result<CatalogParams, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))
}

/// Handle GET /
pub async fn handle_root() -> Json<Value> {
    Json(json!({
        "message": "Vehicle catalog API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "brands": "/api/brands",
            "models": "/api/models?brand={brand}",
            "versions": "/api/versions?brand={brand}&model={model}",
            "autoInfo": "/api/auto-info?brand={brand}&model={model}&version={version}",
            "modelVersions": "/api/model-versions?brand={brand}",
            "health": "/health",
        },
        "description": "Read-only lookups of brands, models and versions from the vehicle catalog",
        "examples": {
            "brands": "/api/brands",
            "models": "/api/models?brand=AUDI",
            "versions": "/api/versions?brand=AUDI&model=A1",
            "autoInfo": "/api/auto-info?brand=AUDI&model=A1&version=1.4%20TFSi%20MT",
            "modelVersions": "/api/model-versions?brand=AUDI",
        },
    }))
}

/// Handle GET /health
///
/// Never touches the store.
pub async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// Handle GET /api/brands
pub async fn handle_brands<S: ListingStore>(
    State(catalog): State<Arc<CatalogService<S>>>,
) -> Result<Success<Vec<Brand>>, ApiError> {
    Ok(Success::counted(catalog.brands().await?))
}

/// Handle GET /api/models?brand=
pub async fn handle_models<S: ListingStore>(
    State(catalog): State<Arc<CatalogService<S>>>,
    query: ParamsResult,
) -> Result<Success<Vec<String>>, ApiError> {
    let params = params(query)?;
    let models = catalog.models(params.brand.as_deref()).await?;
    Ok(Success::counted(models))
}

/// Handle GET /api/versions?brand=&model=
pub async fn handle_versions<S: ListingStore>(
    State(catalog): State<Arc<CatalogService<S>>>,
    query: ParamsResult,
) -> Result<Success<Vec<String>>, ApiError> {
    let params = params(query)?;
    let versions = catalog
        .versions(params.brand.as_deref(), params.model.as_deref())
        .await?;
    Ok(Success::counted(versions))
}

/// Handle GET /api/auto-info?brand=&model=&version=
pub async fn handle_auto_info<S: ListingStore>(
    State(catalog): State<Arc<CatalogService<S>>>,
    query: ParamsResult,
) -> Result<Success<ListingSummary>, ApiError> {
    let params = params(query)?;
    let listing = catalog
        .listing(
            params.brand.as_deref(),
            params.model.as_deref(),
            params.version.as_deref(),
        )
        .await?;
    Ok(Success::new(listing))
}

/// Handle GET /api/model-versions?brand=
pub async fn handle_model_versions<S: ListingStore>(
    State(catalog): State<Arc<CatalogService<S>>>,
    query: ParamsResult,
) -> Result<Success<Vec<ModelVersion>>, ApiError> {
    let params = params(query)?;
    let pairs = catalog.model_versions(params.brand.as_deref()).await?;
    Ok(Success::new(pairs))
}

/// Fallback for unknown routes.
pub async fn handle_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(Failure::new("Route not found")))
}

/// Fallback for known routes hit with a method other than GET or HEAD.
pub async fn handle_method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, HEAD")],
        Json(Failure::new("Method not allowed")),
    )
}
