//! Catalog and cart record types.
//!
//! These mirror the backend's JSON shapes. The catalog is the source of
//! truth for product data; cart entries reference products by ID and are
//! denormalized into [`CartLineItem`]s for display (see [`crate::cart`]).

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product available to buy, as returned by the backend catalog.
///
/// Immutable from the storefront's point of view: products are never
/// created or modified locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product name or title.
    pub name: String,
    /// Category the product belongs to.
    pub category: String,
    /// Price to buy the product. Non-negative.
    pub cost: Price,
    /// Aggregate rating, an integer out of five.
    pub rating: u8,
    /// URL for the product image.
    #[serde(rename = "image")]
    pub image_url: String,
}

/// A raw persisted cart record: which product, how many.
///
/// Owned by the backend; the storefront only reads and writes these through
/// the cart endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// ID of the product in the cart. Must reference a catalog product.
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    /// Quantity of the product in the cart. At least 1 once persisted.
    pub qty: u32,
}

/// A cart entry enriched with catalog details, used for display and totals.
///
/// Derived data: regenerated from the current entries and catalog snapshot
/// on every merge, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    /// ID of the product.
    pub product_id: ProductId,
    /// Quantity in the cart.
    pub qty: u32,
    /// Product name, copied from the catalog.
    pub name: String,
    /// Product category, copied from the catalog.
    pub category: String,
    /// Unit price, copied from the catalog.
    pub cost: Price,
    /// Rating out of five, copied from the catalog.
    pub rating: u8,
    /// Image URL, copied from the catalog.
    pub image_url: String,
}

impl CartLineItem {
    /// Join a cart entry with its catalog product.
    #[must_use]
    pub fn from_entry(entry: &CartEntry, product: &Product) -> Self {
        Self {
            product_id: entry.product_id.clone(),
            qty: entry.qty,
            name: product.name.clone(),
            category: product.category.clone(),
            cost: product.cost,
            rating: product.rating,
            image_url: product.image_url.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_names() {
        let json = r#"{
            "name": "iPhone XR",
            "category": "Phones",
            "cost": 100,
            "rating": 4,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": "v4sLtEcMpzabRyfx"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::from("v4sLtEcMpzabRyfx"));
        assert_eq!(product.name, "iPhone XR");
        assert_eq!(product.cost, Price::from(100u32));
        assert_eq!(product.rating, 4);
        assert_eq!(product.image_url, "https://i.imgur.com/lulqWzW.jpg");
    }

    #[test]
    fn test_cart_entry_wire_names() {
        let json = r#"[{"productId": "upLK9JbQ4rMhTwt4", "qty": 2}]"#;
        let entries: Vec<CartEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(
            entries,
            vec![CartEntry {
                product_id: ProductId::from("upLK9JbQ4rMhTwt4"),
                qty: 2,
            }]
        );

        let out = serde_json::to_string(&entries).unwrap();
        assert!(out.contains("\"productId\""));
        assert!(out.contains("\"qty\""));
    }
}
