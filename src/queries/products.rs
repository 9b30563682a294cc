//! Product queries against the DuckDB-backed catalog table.

use chrono::{SecondsFormat, SubsecRound, Utc};
use duckdb::types::Value;

use crate::config::PRODUCTS_TABLE;
use crate::connection::Connection;
use crate::error::{CatalogError, Result};
use crate::models::{NewProduct, Product, ProductDraft, ProductId};
use crate::sql_builder::SqlBuilder;

const PRODUCT_COLUMNS: [&str; 9] = [
    "id",
    "name",
    "\"type\"",
    "price",
    "description",
    "supplier",
    "\"imageUrl\"",
    "\"createdAt\"",
    "\"updatedAt\"",
];

// ---------------------------------------------------------------------------
// ProductStore
// ---------------------------------------------------------------------------

/// Query interface for the product catalog.
pub struct ProductStore<'a> {
    conn: &'a Connection,
}

impl<'a> ProductStore<'a> {
    /// Create a new `ProductStore` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All products, newest first.
    pub fn list_all(&self) -> Result<Vec<Product>> {
        let (sql, params) = SqlBuilder::new(PRODUCTS_TABLE)
            .select(&PRODUCT_COLUMNS)
            .order_by(&["\"createdAt\" DESC", "seq DESC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Validate `draft`, then persist it with a fresh id and timestamps.
    ///
    /// Fails with [`CatalogError::Validation`] listing every violated field;
    /// nothing is written in that case.
    pub fn create(&self, draft: &ProductDraft) -> Result<Product> {
        let new = draft.validate()?;
        self.insert(new)
    }

    /// Remove the product with the given id and return that id.
    ///
    /// A malformed id is [`CatalogError::InvalidId`] and never reaches the
    /// database; a well-formed id with no record is [`CatalogError::NotFound`].
    pub fn delete_by_id(&self, raw_id: &str) -> Result<ProductId> {
        let id = ProductId::parse(raw_id)?;

        let (sql, params) = SqlBuilder::new(PRODUCTS_TABLE)
            .where_eq("id", id.as_str().to_string())
            .returning(&["id"])
            .build_delete();

        let deleted = self.conn.execute(&sql, &params)?;
        if deleted.is_empty() {
            return Err(CatalogError::NotFound(format!("product {id}")));
        }
        Ok(id)
    }

    /// Number of products in the catalog.
    pub fn count(&self) -> Result<i64> {
        let (sql, params) = SqlBuilder::new(PRODUCTS_TABLE)
            .select(&["COUNT(*) AS cnt"])
            .build();
        let cnt = self
            .conn
            .execute_scalar(&sql, &params)?
            .and_then(|v| v.as_i64())
            .unwrap_or(0);
        Ok(cnt)
    }

    fn insert(&self, new: NewProduct) -> Result<Product> {
        let id = ProductId::generate();
        // Stored at microsecond precision; truncate so the returned record
        // matches what a later read yields.
        let now = Utc::now().trunc_subsecs(6);
        let stamp = now.to_rfc3339_opts(SecondsFormat::Micros, true);

        let sql = format!(
            "INSERT INTO {} ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            PRODUCTS_TABLE,
            PRODUCT_COLUMNS.join(", ")
        );
        let params = [
            Value::Text(id.as_str().to_string()),
            Value::Text(new.name.clone()),
            Value::Text(new.product_type.as_str().to_string()),
            Value::Double(new.price),
            Value::Text(new.description.clone()),
            Value::Text(new.supplier.clone()),
            Value::Text(new.image_url.clone()),
            Value::Text(stamp.clone()),
            Value::Text(stamp),
        ];
        self.conn.execute_statement(&sql, &params)?;

        Ok(Product {
            id,
            name: new.name,
            product_type: new.product_type,
            price: new.price,
            description: new.description,
            supplier: new.supplier,
            image_url: new.image_url,
            created_at: now,
            updated_at: now,
        })
    }
}
