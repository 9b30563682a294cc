//! HTTP surface: the product REST API plus the pages that consume it.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/api/products` | 200, JSON array, newest first |
//! | POST | `/api/products` | 303 to `/products` |
//! | DELETE | `/api/products/{id}` | 200 `{message, id}` |
//!
//! Failures are mapped in [`error`].

pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::routing::{delete, get};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AsyncCatalog;
use routes::{pages, products};
use state::AppState;

pub use error::ApiError;

/// Build the application router around an open catalog.
pub fn build_router(catalog: AsyncCatalog) -> Router {
    let state = Arc::new(AppState { catalog });

    Router::new()
        .route(pages::HOME_PAGE, get(pages::home))
        .route(pages::PRODUCTS_PAGE, get(pages::products_page))
        .route(pages::ADD_PRODUCT_PAGE, get(pages::add_product_page))
        .route(pages::PRODUCTS_SCRIPT, get(pages::products_script))
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/products/{id}", delete(products::delete_product))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
