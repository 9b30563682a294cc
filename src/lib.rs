//! Agricultural product catalog.
//!
//! Keeps product records (seeds, fertilizers, pesticides, equipment) in an
//! embedded DuckDB database, validates them on the way in, and serves them
//! over a small REST API consumed by a browser front end.
//!
//! # Quick start
//!
//! ```no_run
//! use agri_catalog::Catalog;
//! use agri_catalog::models::ProductDraft;
//!
//! let catalog = Catalog::builder().in_memory().build().unwrap();
//!
//! let draft: ProductDraft = serde_json::from_value(serde_json::json!({
//!     "name": "Neem Oil",
//!     "type": "Pesticide",
//!     "price": 250,
//!     "supplier": "AgroCorp"
//! })).unwrap();
//! let product = catalog.products().create(&draft).unwrap();
//!
//! let all = catalog.products().list_all().unwrap();
//! catalog.products().delete_by_id(product.id.as_str()).unwrap();
//! ```

pub mod api;
pub mod async_client;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod queries;
pub mod sql_builder;

pub use async_client::AsyncCatalog;
pub use config::{DatabaseLocation, ServerConfig};
pub use connection::Connection;
pub use error::{CatalogError, Result};
pub use sql_builder::SqlBuilder;

use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// CatalogBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Catalog`].
///
/// Use [`Catalog::builder()`] to obtain a builder, choose where records
/// live, and call [`build()`](CatalogBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    location: Option<DatabaseLocation>,
}

impl CatalogBuilder {
    /// Store records in a DuckDB file at `path`, creating it if needed.
    ///
    /// If neither this nor [`in_memory`](Self::in_memory) is called, the
    /// platform data directory is used (e.g. `~/.local/share/agri-catalog`
    /// on Linux).
    pub fn database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.location = Some(DatabaseLocation::File(path.as_ref().to_path_buf()));
        self
    }

    /// Keep records in memory only. They are gone once the catalog is dropped.
    pub fn in_memory(mut self) -> Self {
        self.location = Some(DatabaseLocation::InMemory);
        self
    }

    pub fn location(mut self, location: DatabaseLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Open the database and ensure the catalog schema exists.
    pub fn build(self) -> Result<Catalog> {
        let location = match self.location {
            Some(loc) => loc,
            None => DatabaseLocation::File(config::default_database_path().ok_or_else(|| {
                CatalogError::Config("no platform data directory for the default database".into())
            })?),
        };
        let conn = Connection::open(location)?;
        Ok(Catalog { conn })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The product catalog: an open database handle plus its query interfaces.
///
/// Created via [`Catalog::builder()`].
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Access the product store.
    ///
    /// Returns a lightweight wrapper that borrows from the underlying
    /// connection.
    pub fn products(&self) -> queries::ProductStore<'_> {
        queries::ProductStore::new(&self.conn)
    }

    pub fn location(&self) -> &DatabaseLocation {
        self.conn.location()
    }

    /// Flush pending writes to disk without closing.
    pub fn checkpoint(&self) -> Result<()> {
        self.conn.checkpoint()
    }

    /// Consume the catalog, flush it and close the database.
    pub fn close(self) -> Result<()> {
        self.conn.checkpoint()?;
        tracing::info!(database = %self.conn.location(), "catalog database closed");
        Ok(())
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Catalog(database={})", self.conn.location())
    }
}
