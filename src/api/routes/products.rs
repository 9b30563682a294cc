use std::sync::Arc;

use axum::extract::{Form, FromRequest, Path, Request, State};
use axum::http::header;
use axum::response::{Json, Redirect};
use serde_json::{json, Value};

use crate::api::error::ApiError;
use crate::api::routes::pages::PRODUCTS_PAGE;
use crate::api::state::AppState;
use crate::models::{Product, ProductDraft};

/// Creation fields from either a JSON or an urlencoded form body.
///
/// Only a body that cannot be parsed at all is rejected here. Field values of
/// the wrong shape reach validation and come back as a `Validation Error`.
pub struct ProductBody(pub ProductDraft);

impl<S> FromRequest<S> for ProductBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false);

        let draft = if is_json {
            Json::<ProductDraft>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request("Invalid request body", e.body_text()))?
                .0
        } else {
            Form::<ProductDraft>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request("Invalid request body", e.body_text()))?
                .0
        };
        Ok(ProductBody(draft))
    }
}

/// GET /api/products
///
/// Every product, newest first. An empty catalog is an empty array.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.catalog.list_all().await?;
    Ok(Json(products))
}

/// POST /api/products
///
/// Validate and store a new product, then send the browser to the listing.
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    ProductBody(draft): ProductBody,
) -> Result<Redirect, ApiError> {
    let product = state.catalog.create(draft).await?;
    tracing::info!(id = %product.id, name = %product.name, "created product");
    Ok(Redirect::to(PRODUCTS_PAGE))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = state.catalog.delete_by_id(id).await?;
    tracing::info!(id = %id, "deleted product");
    Ok(Json(json!({ "message": "Product deleted successfully", "id": id })))
}
