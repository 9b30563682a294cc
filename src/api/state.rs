use crate::AsyncCatalog;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Catalog handle. Dispatches each store operation to the blocking pool.
    pub catalog: AsyncCatalog,
}
