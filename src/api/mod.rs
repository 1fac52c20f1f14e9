//! HTTP transport for the catalog — maps GET requests to catalog lookups.
//!
//! ## Routes
//!
//! - `GET /` — static description of the API.
//! - `GET /health` — `{ "status": "OK", "timestamp": ... }`, independent of the store.
//! - `GET /api/brands` — distinct brands.
//! - `GET /api/models?brand=` — distinct models of a brand.
//! - `GET /api/versions?brand=&model=` — distinct versions of a model.
//! - `GET /api/auto-info?brand=&model=&version=` — a single listing.
//! - `GET /api/model-versions?brand=` — every model/version pair of a brand.
//!
//! Cross-origin requests are allowed from any origin.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use autos_catalog::{api, CatalogService, InMemoryListingStore};
//!
//! let catalog = Arc::new(CatalogService::new(InMemoryListingStore::new()));
//!
//! // Get the router to compose with other axum routes
//! let app = api::router(catalog.clone());
//!
//! // Or serve directly
//! api::serve(catalog, ([0, 0, 0, 0], 3000).into()).await?;
//! ```

mod handlers;
mod response;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::handler::Handler;
use axum::routing::{get, MethodRouter};
use axum::Router;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::CatalogService;
use crate::store::ListingStore;

pub use handlers::CatalogParams;
pub use response::{Failure, Success};

/// Build an axum `Router` serving the catalog endpoints.
pub fn router<S: ListingStore + 'static>(catalog: Arc<CatalogService<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", read_only(handlers::handle_root))
        .route("/health", read_only(handlers::handle_health))
        .route("/api/brands", read_only(handlers::handle_brands::<S>))
        .route("/api/models", read_only(handlers::handle_models::<S>))
        .route("/api/versions", read_only(handlers::handle_versions::<S>))
        .route("/api/auto-info", read_only(handlers::handle_auto_info::<S>))
        .route("/api/model-versions", read_only(handlers::handle_model_versions::<S>))
        .fallback(handlers::handle_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(catalog)
}

/// A GET route whose other methods answer with a JSON 405.
fn read_only<H, T, St>(handler: H) -> MethodRouter<St>
where
    H: Handler<T, St>,
    T: 'static,
    St: Clone + Send + Sync + 'static,
{
    get(handler).fallback(handlers::handle_method_not_allowed)
}

/// Serve the catalog over HTTP until Ctrl+C or SIGTERM.
pub async fn serve<S: ListingStore + 'static>(
    catalog: Arc<CatalogService<S>>,
    addr: SocketAddr,
) -> Result<(), std::io::Error> {
    let app = router(catalog);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("catalog API listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server shut down gracefully");
    Ok(())
}

/// Resolves on SIGTERM or SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
