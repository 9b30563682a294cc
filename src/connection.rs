//! DuckDB connection wrapper with schema bootstrap and query execution.
//!
//! Rows come back as `serde_json::Value` maps so record types can be
//! deserialized with serde instead of hand-written column access.

use std::collections::HashMap;
use std::fs;

use duckdb::types::{Value, ValueRef};
use duckdb::Connection as DuckDbConnection;
use serde::de::DeserializeOwned;

use crate::config::{DatabaseLocation, PRODUCTS_SEQUENCE, PRODUCTS_TABLE};
use crate::error::Result;

/// Schema for the product catalog. Idempotent; run on every open.
///
/// Timestamps are fixed-width UTC RFC 3339 strings, so lexical order is
/// chronological order. `seq` breaks ties between records created in the
/// same microsecond.
fn schema_sql() -> String {
    format!(
        "CREATE SEQUENCE IF NOT EXISTS {seq} START 1;
         CREATE TABLE IF NOT EXISTS {table} (
             seq BIGINT NOT NULL DEFAULT nextval('{seq}'),
             id VARCHAR PRIMARY KEY,
             name VARCHAR NOT NULL,
             \"type\" VARCHAR NOT NULL
                 CHECK (\"type\" IN ('seed', 'fertilizer', 'pesticide', 'equipment')),
             price DOUBLE NOT NULL CHECK (price >= 0),
             description VARCHAR NOT NULL DEFAULT '',
             supplier VARCHAR NOT NULL,
             \"imageUrl\" VARCHAR NOT NULL,
             \"createdAt\" VARCHAR NOT NULL,
             \"updatedAt\" VARCHAR NOT NULL
         );",
        seq = PRODUCTS_SEQUENCE,
        table = PRODUCTS_TABLE,
    )
}

/// Wraps a DuckDB connection holding the product catalog.
pub struct Connection {
    conn: DuckDbConnection,
    location: DatabaseLocation,
}

impl Connection {
    /// Open (or create) the database at `location` and ensure the schema exists.
    pub fn open(location: DatabaseLocation) -> Result<Self> {
        let conn = match &location {
            DatabaseLocation::InMemory => DuckDbConnection::open_in_memory()?,
            DatabaseLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                DuckDbConnection::open(path)?
            }
        };
        conn.execute_batch(&schema_sql())?;
        tracing::debug!(database = %location, "catalog schema ready");
        Ok(Self { conn, location })
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the statement has run
        let column_names: Vec<String> = rows_result
            .as_ref()
            .map(|s| s.column_names().into_iter().map(|c| c.to_string()).collect())
            .unwrap_or_default();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                map.insert(col_name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[Value]) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(
                row.into_iter().collect::<serde_json::Map<String, serde_json::Value>>(),
            );
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(&self, sql: &str, params: &[Value]) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Execute a statement that returns no rows; yields the affected row count.
    pub fn execute_statement(&self, sql: &str, params: &[Value]) -> Result<usize> {
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();
        Ok(self.conn.execute(sql, param_values.as_slice())?)
    }

    /// Flush the write-ahead log into the database file.
    pub fn checkpoint(&self) -> Result<()> {
        self.conn.execute_batch("CHECKPOINT")?;
        Ok(())
    }

    pub fn location(&self) -> &DatabaseLocation {
        &self.location
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => match i64::try_from(n) {
            Ok(i) => serde_json::Value::Number(i.into()),
            Err(_) => serde_json::Value::String(n.to_string()),
        },
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        // The catalog schema only uses the types above
        _ => serde_json::Value::Null,
    }
}
