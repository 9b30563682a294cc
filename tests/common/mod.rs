//! Shared test fixtures for the catalog integration tests.
//!
//! Provides an in-memory catalog, draft helpers, and a running HTTP server
//! bound to an ephemeral local port.

#![allow(dead_code)]

use agri_catalog::models::{Product, ProductDraft};
use agri_catalog::{api, AsyncCatalog, Catalog};

/// Open an empty in-memory catalog.
pub fn setup_catalog() -> Catalog {
    Catalog::builder().in_memory().build().unwrap()
}

/// Build a draft from wire-format JSON, the same way the API does.
pub fn draft(value: serde_json::Value) -> ProductDraft {
    serde_json::from_value(value).unwrap()
}

/// A draft that passes validation.
pub fn valid_draft(name: &str, product_type: &str, price: f64) -> ProductDraft {
    draft(serde_json::json!({
        "name": name,
        "type": product_type,
        "price": price,
        "supplier": "AgroCorp"
    }))
}

/// Open an in-memory catalog seeded with three products, created in order
/// seed, fertilizer, equipment.
pub fn setup_seeded_catalog() -> (Catalog, Vec<Product>) {
    let catalog = setup_catalog();
    let created = [
        valid_draft("Hybrid Maize Seed", "seed", 1200.0),
        valid_draft("Urea 46%", "fertilizer", 850.5),
        valid_draft("Knapsack Sprayer", "equipment", 3499.0),
    ]
    .iter()
    .map(|d| catalog.products().create(d).unwrap())
    .collect();
    (catalog, created)
}

/// Serve the full router on `127.0.0.1:0`.
///
/// Returns the base URL and a handle to the same catalog the server uses.
pub async fn spawn_server() -> (String, AsyncCatalog) {
    let catalog = AsyncCatalog::builder().in_memory().build().await.unwrap();
    let app = api::build_router(catalog.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), catalog)
}

/// HTTP client that reports redirects instead of following them.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
