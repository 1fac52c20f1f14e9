//! Catalog HTTP server binary entry point.

use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use autos_catalog::config::CliArgs;
use autos_catalog::{api, CatalogService, InMemoryListingStore, ListingStore};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "catalog server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &args.seed_file {
        let store = InMemoryListingStore::from_json_file(path)?;
        tracing::info!(listings = store.len(), file = %path.display(), "loaded seed file");
        return serve(store, &args).await;
    }

    connect_and_serve(&args).await
}

#[cfg(feature = "mongo")]
async fn connect_and_serve(args: &CliArgs) -> Result<(), Box<dyn Error>> {
    // The store must be reachable before the port opens.
    let store = autos_catalog::MongoListingStore::connect(&args.mongo_config()).await?;
    serve(store, args).await
}

#[cfg(not(feature = "mongo"))]
async fn connect_and_serve(_args: &CliArgs) -> Result<(), Box<dyn Error>> {
    Err("built without the `mongo` feature; pass --seed-file".into())
}

async fn serve<S: ListingStore + 'static>(store: S, args: &CliArgs) -> Result<(), Box<dyn Error>> {
    let mut catalog = CatalogService::new(store);
    if let Some(timeout) = args.query_timeout() {
        catalog = catalog.with_query_timeout(timeout);
    }
    api::serve(Arc::new(catalog), args.listen_addr()).await?;
    Ok(())
}
