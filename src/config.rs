use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::error::{CatalogError, Result};

pub const PRODUCTS_TABLE: &str = "products";
pub const PRODUCTS_SEQUENCE: &str = "product_seq";

/// Fallback image service used when a product is created without an image.
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://placehold.co/600x400/a2e4b8/333333?text=";

/// Database path value that selects an in-memory DuckDB database.
pub const IN_MEMORY: &str = ":memory:";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

pub fn default_database_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("agri-catalog").join("catalog.duckdb"))
}

/// Where the catalog keeps its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    InMemory,
    File(PathBuf),
}

impl DatabaseLocation {
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == IN_MEMORY {
            DatabaseLocation::InMemory
        } else {
            DatabaseLocation::File(PathBuf::from(raw.trim()))
        }
    }
}

impl std::fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseLocation::InMemory => f.write_str(IN_MEMORY),
            DatabaseLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

/// Process configuration for the HTTP server, loaded from the environment.
///
/// | Variable | Default |
/// |---|---|
/// | `CATALOG_DATABASE` | `<data dir>/agri-catalog/catalog.duckdb` |
/// | `HOST` | `0.0.0.0` |
/// | `PORT` | `3000` |
/// | `CATALOG_LOG_JSON` | `false` |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database: DatabaseLocation,
    pub host: String,
    pub port: u16,
    pub log_json: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Fails fast on values that
    /// are present but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup("CATALOG_DATABASE").filter(|v| !v.trim().is_empty()) {
            Some(raw) => DatabaseLocation::parse(&raw),
            None => DatabaseLocation::File(default_database_path().ok_or_else(|| {
                CatalogError::Config(
                    "CATALOG_DATABASE is not set and no platform data directory is available"
                        .into(),
                )
            })?),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| CatalogError::Config(format!("PORT must be a port number, got '{raw}'")))?,
            None => DEFAULT_PORT,
        };

        let host = lookup("HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let log_json = lookup("CATALOG_LOG_JSON")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        Ok(Self {
            database,
            host,
            port,
            log_json,
        })
    }

    /// Socket address to listen on. `host` must be an IPv4 or IPv6 literal.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|e| {
            CatalogError::Config(format!("HOST must be an IP address, got '{}': {e}", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "true" | "TRUE" | "yes" | "YES")
}
