//! Command-line and environment configuration for the catalog server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Command-line arguments for the catalog server.
///
/// Every option can also be supplied through the environment variable
/// named next to it.
#[derive(Debug, Clone, Parser)]
#[command(name = "autos-catalog", version, about = "Vehicle catalog lookup API")]
pub struct CliArgs {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// MongoDB connection string.
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// Database holding the catalog collection.
    #[arg(long, env = "DATABASE_NAME", default_value = "hubsautos")]
    pub database: String,

    /// Catalog collection name.
    #[arg(long, env = "COLLECTION_NAME", default_value = "formAutos")]
    pub collection: String,

    /// Per-query timeout in seconds; 0 disables it.
    #[arg(long, env = "QUERY_TIMEOUT_SECS", default_value_t = 10)]
    pub query_timeout_secs: u64,

    /// Serve listings from this JSON file instead of MongoDB.
    #[arg(long, env = "SEED_FILE")]
    pub seed_file: Option<PathBuf>,
}

impl CliArgs {
    /// Address the HTTP server binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        (self.query_timeout_secs > 0).then(|| Duration::from_secs(self.query_timeout_secs))
    }

    #[cfg(feature = "mongo")]
    pub fn mongo_config(&self) -> crate::store::MongoConfig {
        crate::store::MongoConfig {
            uri: self.mongodb_uri.clone(),
            database: self.database.clone(),
            collection: self.collection.clone(),
        }
    }
}
