//! On-storage shape of the cart.
//!
//! Current writes are an envelope object:
//!
//! ```json
//! {"items": [...], "version": "1.0", "lastUpdated": "2026-10-19T09:30:00Z"}
//! ```
//!
//! Older builds of the storefront stored the bare item array. Both shapes
//! decode; only the envelope is ever written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::cart::CartLineItem;
use crate::error::CartError;

/// Storage key holding the cart.
pub const CART_STORAGE_KEY: &str = "accvaultng_cart";

/// Envelope schema version written today.
pub const CART_VERSION: &str = "1.0";

/// Field name the storefront backend uses for product ids.
const LEGACY_ID_FIELD: &str = "_id";

/// The persisted envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCartEnvelope {
    /// Line items.
    pub items: Vec<CartLineItem>,
    /// Schema tag.
    pub version: String,
    /// Time of the write.
    pub last_updated: DateTime<Utc>,
}

impl PersistedCartEnvelope {
    /// Wrap line items in a current-version envelope.
    pub fn new(items: Vec<CartLineItem>, last_updated: DateTime<Utc>) -> Self {
        Self {
            items,
            version: CART_VERSION.to_string(),
            last_updated,
        }
    }

    /// Encode as the JSON string written to the store.
    pub fn to_json(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Which layout a stored value used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CartShape {
    /// `{items, version, lastUpdated}` object.
    Envelope,
    /// Bare JSON array of line items.
    Legacy,
}

/// Result of decoding a stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCart {
    /// Line items that decoded, in stored order.
    pub items: Vec<CartLineItem>,
    /// Layout of the stored value.
    pub shape: CartShape,
    /// Stored schema tag, if any.
    pub version: Option<String>,
    /// Stored write time, if present and parseable.
    pub last_updated: Option<DateTime<Utc>>,
    /// Number of stored rows that could not be read as line items.
    pub skipped: usize,
}

/// Decode a stored cart value.
///
/// Accepts the envelope and the legacy bare array. The envelope's version
/// is reported but does not gate anything. An object without an `items`
/// array yields no items. Rows that are not valid line items are skipped
/// and counted instead of failing the whole cart.
pub fn decode(raw: &str) -> Result<DecodedCart, CartError> {
    let value: Value = serde_json::from_str(raw)?;

    let (rows, shape, version, last_updated) = match value {
        Value::Array(rows) => (rows, CartShape::Legacy, None, None),
        Value::Object(mut map) => {
            let rows = match map.remove("items") {
                Some(Value::Array(rows)) => rows,
                _ => Vec::new(),
            };
            let version = map
                .get("version")
                .and_then(Value::as_str)
                .map(str::to_string);
            let last_updated = map
                .get("lastUpdated")
                .and_then(Value::as_str)
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc));
            (rows, CartShape::Envelope, version, last_updated)
        }
        other => return Err(CartError::UnsupportedShape(json_kind(&other).to_string())),
    };

    let mut items = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for (index, row) in rows.into_iter().enumerate() {
        match decode_row(row) {
            Ok(item) => items.push(item),
            Err(e) => {
                skipped += 1;
                warn!(index, error = %e, "skipping unreadable cart line item");
            }
        }
    }

    Ok(DecodedCart {
        items,
        shape,
        version,
        last_updated,
        skipped,
    })
}

/// Decode one stored row, accepting the backend's `_id` in place of `id`.
fn decode_row(mut row: Value) -> Result<CartLineItem, serde_json::Error> {
    if let Value::Object(map) = &mut row {
        if !map.contains_key("id") {
            if let Some(id) = map.get(LEGACY_ID_FIELD).cloned() {
                map.insert("id".to_string(), id);
            }
        }
    }
    serde_json::from_value(row)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
