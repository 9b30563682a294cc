use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

// ---------------------------------------------------------------------------
// ProductId — 12-byte object id rendered as 24 hex characters
// ---------------------------------------------------------------------------

/// Identifier assigned by the store when a product is created.
///
/// Layout: 4-byte big-endian Unix seconds, 5 bytes fixed per process, and a
/// 3-byte counter. Always 24 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

pub const PRODUCT_ID_LEN: usize = 24;

struct IdState {
    process: [u8; 5],
    counter: AtomicU32,
}

static ID_STATE: OnceLock<IdState> = OnceLock::new();

fn id_state() -> &'static IdState {
    ID_STATE.get_or_init(|| {
        let mut rng = rand::thread_rng();
        IdState {
            process: rng.gen(),
            counter: AtomicU32::new(rng.gen::<u32>() & 0x00ff_ffff),
        }
    })
}

impl ProductId {
    /// Allocate a fresh id.
    pub fn generate() -> Self {
        let state = id_state();
        let secs = Utc::now().timestamp() as u32;
        let count = state.counter.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&state.process);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);

        ProductId(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Parse a client-supplied id. Hex digits may be in either case.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        if raw.len() != PRODUCT_ID_LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CatalogError::InvalidId(format!(
                "'{raw}' is not a {PRODUCT_ID_LEN}-character hexadecimal id"
            )));
        }
        Ok(ProductId(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation second encoded in the id's leading bytes.
    pub fn timestamp(&self) -> u32 {
        u32::from_str_radix(&self.0[..8], 16).unwrap_or(0)
    }
}

impl FromStr for ProductId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductId::parse(s)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// ProductType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Seed,
    Fertilizer,
    Pesticide,
    Equipment,
}

impl ProductType {
    pub const ALL: [ProductType; 4] = [
        ProductType::Seed,
        ProductType::Fertilizer,
        ProductType::Pesticide,
        ProductType::Equipment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Seed => "seed",
            ProductType::Fertilizer => "fertilizer",
            ProductType::Pesticide => "pesticide",
            ProductType::Equipment => "equipment",
        }
    }
}

/// Case-insensitive; surrounding whitespace is ignored.
impl FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ProductType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Product — a stored catalog record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub price: f64,
    pub description: String,
    pub supplier: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
