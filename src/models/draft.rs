use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PLACEHOLDER_IMAGE_BASE;
use crate::models::product::ProductType;

// ---------------------------------------------------------------------------
// ProductDraft — raw creation input, as submitted by a client
// ---------------------------------------------------------------------------

/// Unvalidated creation fields. Every field is optional here; [`validate`]
/// decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: Option<TextInput>,
    #[serde(rename = "type")]
    pub product_type: Option<TextInput>,
    pub price: Option<PriceInput>,
    pub description: Option<TextInput>,
    pub supplier: Option<TextInput>,
    pub image_url: Option<TextInput>,
}

/// A free-text field. JSON numbers and booleans are taken in their text
/// form; arrays and objects are kept so validation can reject them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Text(String),
    Other(serde_json::Value),
}

impl TextInput {
    /// The field as text, or `None` when it is an array or object.
    pub fn as_text(&self) -> Option<String> {
        match self {
            TextInput::Text(s) => Some(s.clone()),
            TextInput::Other(serde_json::Value::Number(n)) => Some(n.to_string()),
            TextInput::Other(serde_json::Value::Bool(b)) => Some(b.to_string()),
            TextInput::Other(_) => None,
        }
    }
}

impl From<&str> for TextInput {
    fn from(s: &str) -> Self {
        TextInput::Text(s.to_string())
    }
}

impl From<String> for TextInput {
    fn from(s: String) -> Self {
        TextInput::Text(s)
    }
}

/// JSON clients send a number, HTML forms send text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl ProductDraft {
    pub fn validate(&self) -> Result<NewProduct, Violations> {
        validate(self)
    }
}

// ---------------------------------------------------------------------------
// NewProduct — validated and normalized, ready to persist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub product_type: ProductType,
    pub price: f64,
    pub description: String,
    pub supplier: String,
    pub image_url: String,
}

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Every constraint a draft failed, one entry per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|v| v.message.clone()).collect()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

/// Check a draft against the product schema and normalize it.
///
/// - `name`, `supplier`: required, trimmed, non-empty
/// - `type`: required, one of seed/fertilizer/pesticide/equipment (any case)
/// - `price`: required, finite, `>= 0`
/// - `description`: trimmed, defaults to empty
/// - text fields: JSON numbers and booleans are read as text; arrays and
///   objects are a violation
/// - `imageUrl`: trimmed; a placeholder embedding the name when absent or blank
pub fn validate(draft: &ProductDraft) -> Result<NewProduct, Violations> {
    let mut violations = Violations::default();

    let name = text_field(&mut violations, "name", &draft.name);
    if name.is_empty() && !violations.has_field("name") {
        violations.push("name", "Product name is required.");
    }

    let product_type = match text_field(&mut violations, "type", &draft.product_type) {
        _ if violations.has_field("type") => None,
        t if t.is_empty() => {
            violations.push("type", "Product type is required.");
            None
        }
        t => match t.parse::<ProductType>() {
            Ok(pt) => Some(pt),
            Err(raw) => {
                violations.push("type", format!("`{raw}` is not a valid product type."));
                None
            }
        },
    };

    let price = match parse_price(draft.price.as_ref()) {
        Ok(p) => Some(p),
        Err(msg) => {
            violations.push("price", msg);
            None
        }
    };

    let supplier = text_field(&mut violations, "supplier", &draft.supplier);
    if supplier.is_empty() && !violations.has_field("supplier") {
        violations.push("supplier", "Supplier name is required.");
    }

    let description = text_field(&mut violations, "description", &draft.description);
    let image_url = text_field(&mut violations, "imageUrl", &draft.image_url);

    let (Some(product_type), Some(price)) = (product_type, price) else {
        return Err(violations);
    };
    if !violations.is_empty() {
        return Err(violations);
    }

    let image_url = if image_url.is_empty() {
        placeholder_image_url(&name)
    } else {
        image_url
    };

    Ok(NewProduct {
        name,
        product_type,
        price,
        description,
        supplier,
        image_url,
    })
}

/// Trimmed text of a field, empty when absent. Arrays and objects are
/// recorded as a violation of `field`.
fn text_field(
    violations: &mut Violations,
    field: &'static str,
    input: &Option<TextInput>,
) -> String {
    match input.as_ref().map(TextInput::as_text) {
        None => String::new(),
        Some(Some(text)) => text.trim().to_string(),
        Some(None) => {
            violations.push(field, format!("`{field}` must be text."));
            String::new()
        }
    }
}

fn parse_price(input: Option<&PriceInput>) -> Result<f64, &'static str> {
    let value = match input {
        None => return Err("Product price is required."),
        Some(PriceInput::Number(n)) => *n,
        Some(PriceInput::Text(s)) if s.trim().is_empty() => return Err("Product price is required."),
        Some(PriceInput::Text(s)) => s.trim().parse::<f64>().map_err(|_| "Price must be a number.")?,
        Some(PriceInput::Other(_)) => return Err("Price must be a number."),
    };
    if !value.is_finite() {
        return Err("Price must be a number.");
    }
    if value < 0.0 {
        return Err("Price cannot be negative.");
    }
    // normalizes -0.0
    Ok(value + 0.0)
}

// ---------------------------------------------------------------------------
// Placeholder image
// ---------------------------------------------------------------------------

/// Fallback image URL with the product name as its caption.
pub fn placeholder_image_url(name: &str) -> String {
    let caption = if name.is_empty() { "Product" } else { name };
    format!("{}{}", PLACEHOLDER_IMAGE_BASE, encode_uri_component(caption))
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, byte by
/// byte over the UTF-8 encoding.
pub fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
