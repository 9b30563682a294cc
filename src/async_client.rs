//! Async wrapper around [`Catalog`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every catalog operation on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! DuckDB works.
//!
//! # Example
//!
//! ```no_run
//! use agri_catalog::AsyncCatalog;
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = AsyncCatalog::builder().in_memory().build().await.unwrap();
//!
//!     let products = catalog.list_all().await.unwrap();
//!     let count = catalog.run(|c| c.products().count()).await.unwrap();
//! }
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::config::DatabaseLocation;
use crate::error::{CatalogError, Result};
use crate::models::{Product, ProductDraft, ProductId};
use crate::{Catalog, CatalogBuilder};

// ---------------------------------------------------------------------------
// AsyncCatalogBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncCatalog`].
#[derive(Debug, Clone, Default)]
pub struct AsyncCatalogBuilder {
    inner: CatalogBuilder,
}

impl AsyncCatalogBuilder {
    pub fn database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.inner = self.inner.database_path(path);
        self
    }

    pub fn in_memory(mut self) -> Self {
        self.inner = self.inner.in_memory();
        self
    }

    pub fn location(mut self, location: DatabaseLocation) -> Self {
        self.inner = self.inner.location(location);
        self
    }

    /// Open the database on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncCatalog> {
        let builder = self.inner;
        let catalog = tokio::task::spawn_blocking(move || builder.build())
            .await
            .map_err(|e| CatalogError::Runtime(format!("Task join error: {e}")))??;
        Ok(AsyncCatalog::from_catalog(catalog))
    }
}

// ---------------------------------------------------------------------------
// AsyncCatalog
// ---------------------------------------------------------------------------

/// Async, cloneable handle to a [`Catalog`].
///
/// The catalog sits behind a [`Mutex`], so each operation has the database
/// to itself for its duration.
#[derive(Clone)]
pub struct AsyncCatalog {
    inner: Arc<Mutex<Catalog>>,
}

impl AsyncCatalog {
    pub fn builder() -> AsyncCatalogBuilder {
        AsyncCatalogBuilder::default()
    }

    /// Wrap an already opened catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(catalog)),
        }
    }

    /// Run a sync catalog operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Catalog) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let catalog = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = catalog
                .lock()
                .map_err(|_| CatalogError::Runtime("catalog lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| CatalogError::Runtime(format!("Task join error: {e}")))?
    }

    pub async fn list_all(&self) -> Result<Vec<Product>> {
        self.run(|c| c.products().list_all()).await
    }

    pub async fn create(&self, draft: ProductDraft) -> Result<Product> {
        self.run(move |c| c.products().create(&draft)).await
    }

    pub async fn delete_by_id(&self, id: String) -> Result<ProductId> {
        self.run(move |c| c.products().delete_by_id(&id)).await
    }

    pub async fn count(&self) -> Result<i64> {
        self.run(|c| c.products().count()).await
    }

    /// Close the database.
    ///
    /// When other clones are still alive (a server's in-flight connections,
    /// say) the catalog is only checkpointed; the handle itself closes when
    /// the last clone drops.
    pub async fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => {
                let catalog = mutex
                    .into_inner()
                    .map_err(|_| CatalogError::Runtime("catalog lock poisoned".into()))?;
                tokio::task::spawn_blocking(move || catalog.close())
                    .await
                    .map_err(|e| CatalogError::Runtime(format!("Task join error: {e}")))?
            }
            Err(inner) => {
                let shared = AsyncCatalog { inner };
                shared.run(|c| c.checkpoint()).await?;
                tracing::debug!("catalog still shared, checkpointed and released this handle");
                Ok(())
            }
        }
    }
}
