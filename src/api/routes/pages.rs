//! Page shells and the client script. Embedded at compile time; all
//! catalog data reaches the browser through `/api/products`.

use axum::http::header;
use axum::response::{Html, IntoResponse};

pub const HOME_PAGE: &str = "/";
pub const PRODUCTS_PAGE: &str = "/products";
pub const ADD_PRODUCT_PAGE: &str = "/add-product";
pub const PRODUCTS_SCRIPT: &str = "/js/products.js";

const INDEX_HTML: &str = include_str!("../../../static/index.html");
const PRODUCTS_HTML: &str = include_str!("../../../static/products.html");
const ADD_PRODUCT_HTML: &str = include_str!("../../../static/add-product.html");
const PRODUCTS_JS: &str = include_str!("../../../static/js/products.js");

pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn products_page() -> Html<&'static str> {
    Html(PRODUCTS_HTML)
}

pub async fn add_product_page() -> Html<&'static str> {
    Html(ADD_PRODUCT_HTML)
}

pub async fn products_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        PRODUCTS_JS,
    )
}
