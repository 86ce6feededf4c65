//! Newtype identifiers.
//!
//! Product ids are opaque strings minted by the backend (Mongo ObjectIds in
//! practice). The cart never generates them, it only compares them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a marketplace product (one purchasable account listing).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("64f1c0ffee");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""64f1c0ffee""#);

        let back: ProductId = serde_json::from_str(r#""64f1c0ffee""#).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_from_str_and_display() {
        let id: ProductId = "p1".into();
        assert_eq!(id.as_str(), "p1");
        assert_eq!(format!("{}", id), "p1");
        assert_eq!(id.into_inner(), "p1");
    }
}
