//! Product snapshots and cart line items.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::ProductId;
use crate::money::Money;

/// Product fields captured when the product is added to the cart.
///
/// The snapshot is taken by value and never refreshed: a later price
/// change in the catalog does not reach a cart that already holds the
/// product. Display-only fields the engine does not know about ride along
/// in `extra` and are written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Product identifier.
    pub id: ProductId,
    /// Listing title.
    #[serde(default)]
    pub title: String,
    /// Unit price at add time.
    pub price: Money,
    /// Social platform (e.g., "Instagram").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Product classification used by the storefront's badges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Image URLs, first one is the thumbnail.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Opaque pass-through fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductSnapshot {
    /// Create a snapshot with only the fields the engine needs.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            platform: None,
            product_type: None,
            images: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Set the platform.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Set the product type.
    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    /// Add an image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Attach a pass-through field.
    pub fn with_extra(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product as it looked when first added.
    #[serde(flatten)]
    pub product: ProductSnapshot,
    /// Quantity, always at least 1 while the item is in a cart.
    pub quantity: i64,
}

impl CartLineItem {
    /// Create a new line item.
    pub fn new(product: ProductSnapshot, quantity: i64) -> Self {
        Self { product, quantity }
    }

    /// Product identifier.
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Line subtotal (snapshot price times quantity).
    pub fn subtotal(&self) -> Money {
        self.product.price.saturating_mul(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_item_json_is_flat() {
        let item = CartLineItem::new(
            ProductSnapshot::new("p1", "Aged IG account", Money::from_major_units(500))
                .with_platform("Instagram")
                .with_product_type("aged_account"),
            2,
        );

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "p1",
                "title": "Aged IG account",
                "price": 500,
                "platform": "Instagram",
                "productType": "aged_account",
                "quantity": 2
            })
        );
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let raw = json!({
            "id": "p1",
            "title": "FB page",
            "price": 1200.5,
            "quantity": 1,
            "followers": 15000,
            "description": "Verified",
            "images": ["https://cdn.example/1.jpg"]
        });

        let item: CartLineItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.product.extra.get("followers"), Some(&json!(15000)));
        assert_eq!(item.product.images.len(), 1);
        assert_eq!(item.product.price.minor(), 120_050);

        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn test_subtotal_uses_snapshot_price() {
        let item = CartLineItem::new(ProductSnapshot::new("p1", "x", Money::from_major_units(100)), 3);
        assert_eq!(item.subtotal(), Money::from_major_units(300));
        assert_eq!(item.id().as_str(), "p1");
    }
}
