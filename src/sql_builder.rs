//! SQL builder with parameterized query construction.
//!
//! All user-supplied values go through DuckDB's parameter binding (`?` placeholders),
//! never through string interpolation. Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use agri_catalog::SqlBuilder;
//! let (sql, params) = SqlBuilder::new("products")
//!     .where_eq("type", "seed".to_string())
//!     .order_by(&["\"createdAt\" DESC"])
//!     .build();
//! ```

use duckdb::types::Value;

/// Builds parameterized SELECT and DELETE statements.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    from_table: String,
    where_clauses: Vec<String>,
    params: Vec<Value>,
    order_by_cols: Vec<String>,
    returning_cols: Vec<String>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table or view.
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            from_table: table.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_by_cols: Vec::new(),
            returning_cols: Vec::new(),
        }
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add an equality condition: `{column} = ?`.
    pub fn where_eq(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.params.push(value.into());
        self
    }

    /// Add ORDER BY clauses (e.g. `"name ASC"`, `"price DESC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols
            .extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    /// Columns for a RETURNING clause; only used by [`build_delete`](Self::build_delete).
    pub fn returning(&mut self, cols: &[&str]) -> &mut Self {
        self.returning_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Build the SELECT statement and its parameter list.
    pub fn build(&self) -> (String, Vec<Value>) {
        let mut parts = vec![
            format!("SELECT {}", self.select_cols.join(", ")),
            format!("FROM {}", self.from_table),
        ];

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        (parts.join("\n"), self.params.clone())
    }

    /// Build a DELETE statement from the same table and WHERE conditions.
    ///
    /// Refuses to produce an unconditional delete: with no conditions the
    /// statement matches nothing.
    pub fn build_delete(&self) -> (String, Vec<Value>) {
        let condition = if self.where_clauses.is_empty() {
            "FALSE".to_string()
        } else {
            self.where_clauses.join(" AND ")
        };
        let mut parts = vec![
            format!("DELETE FROM {}", self.from_table),
            format!("WHERE {}", condition),
        ];

        if !self.returning_cols.is_empty() {
            parts.push(format!("RETURNING {}", self.returning_cols.join(", ")));
        }

        (parts.join("\n"), self.params.clone())
    }
}
