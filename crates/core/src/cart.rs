//! Cart model: merging, totals, and quantity resolution.
//!
//! Everything in this module is a pure function of its arguments. The
//! orchestration layer (route handlers in the storefront crate) fetches the
//! cart and catalog, calls in here to derive what to display or persist,
//! and performs the backend call itself. No I/O, storage write, or
//! notification happens inside these functions.

use std::collections::HashMap;

use crate::catalog::{CartEntry, CartLineItem, Product};
use crate::types::{Price, ProductId};

/// Merge raw cart entries with a catalog snapshot into display line items.
///
/// The result preserves entry order. Entries whose `product_id` has no
/// match in the catalog are dropped rather than erroring: the cart may
/// reference products the backend has since delisted, and a missing line is
/// preferable to a broken page.
///
/// The catalog is indexed by ID up front, so the merge runs in time linear
/// in `entries.len() + catalog.len()`.
#[must_use]
pub fn merge_cart_with_catalog(entries: &[CartEntry], catalog: &[Product]) -> Vec<CartLineItem> {
    let by_id: HashMap<&ProductId, &Product> =
        catalog.iter().map(|product| (&product.id, product)).collect();

    entries
        .iter()
        .filter_map(|entry| {
            by_id
                .get(&entry.product_id)
                .map(|product| CartLineItem::from_entry(entry, product))
        })
        .collect()
}

/// Total monetary value of the given line items: sum of `cost * qty`.
///
/// Returns [`Price::ZERO`] for an empty slice.
#[must_use]
pub fn total_value(items: &[CartLineItem]) -> Price {
    items.iter().map(|item| item.cost.times(item.qty)).sum()
}

/// Total number of units across the given line items.
///
/// Returns 0 for an empty slice.
#[must_use]
pub fn total_count(items: &[CartLineItem]) -> u32 {
    items.iter().map(|item| item.qty).sum()
}

/// Outcome of resolving a quantity change for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityResolution {
    /// The product is already in the cart and duplicate prevention is on.
    /// The caller should surface a warning and make no backend call.
    Duplicate,
    /// Persist this quantity for the product. May be zero or negative when
    /// a decrement lands on an empty line; see [`persistable_quantity`].
    Set(i64),
}

/// Compute the quantity to persist when the user adds or removes a unit.
///
/// * `items` - the current merged cart line items
/// * `product_id` - the product being changed
/// * `delta` - `+1` to add one unit, `-1` to remove one unit
/// * `prevent_duplicate` - reject the change outright if the product is
///   already in the cart (the product-card "add" button), instead of
///   adjusting its quantity (the cart sidebar controls)
///
/// With duplicate prevention on and the product absent, the result is
/// exactly `delta`: a first add always starts the line at the delta, which
/// in practice is 1. Without duplicate prevention the result is
/// `existing + delta`, with `existing` taken as 0 when the product is
/// absent.
#[must_use]
pub fn resolve_quantity(
    items: &[CartLineItem],
    product_id: &ProductId,
    delta: i64,
    prevent_duplicate: bool,
) -> QuantityResolution {
    let existing = items
        .iter()
        .find(|item| &item.product_id == product_id)
        .map(|item| i64::from(item.qty));

    if prevent_duplicate {
        return match existing {
            Some(_) => QuantityResolution::Duplicate,
            None => QuantityResolution::Set(delta),
        };
    }

    QuantityResolution::Set(existing.unwrap_or(0) + delta)
}

/// Clamp a resolved quantity to the value the cart endpoint accepts.
///
/// A resolution of zero or less means the line should not survive; the
/// backend removes a line when it is written with quantity 0.
#[must_use]
pub fn persistable_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity).unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, cost: u32) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            category: "Sports".to_owned(),
            cost: Price::from(cost),
            rating: 4,
            image_url: "https://i.imgur.com/lulqWzW.jpg".to_owned(),
        }
    }

    fn entry(id: &str, qty: u32) -> CartEntry {
        CartEntry {
            product_id: ProductId::from(id),
            qty,
        }
    }

    #[test]
    fn test_merge_empty_entries() {
        let catalog = vec![product("A", 10), product("B", 5)];
        assert!(merge_cart_with_catalog(&[], &catalog).is_empty());
    }

    #[test]
    fn test_merge_copies_catalog_fields() {
        let catalog = vec![product("A", 10)];
        let merged = merge_cart_with_catalog(&[entry("A", 2)], &catalog);

        assert_eq!(merged.len(), 1);
        let line = merged.first().unwrap();
        assert_eq!(line.product_id, ProductId::from("A"));
        assert_eq!(line.qty, 2);
        assert_eq!(line.cost, Price::from(10u32));
        assert_eq!(line.name, "Product A");
    }

    #[test]
    fn test_merge_drops_unknown_products() {
        let catalog = vec![product("A", 10)];
        let entries = vec![entry("A", 1), entry("ghost", 3)];
        let merged = merge_cart_with_catalog(&entries, &catalog);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged.first().unwrap().product_id, ProductId::from("A"));
    }

    #[test]
    fn test_merge_preserves_entry_order() {
        let catalog = vec![product("A", 10), product("B", 5), product("C", 7)];
        let entries = vec![entry("C", 1), entry("A", 1)];
        let merged = merge_cart_with_catalog(&entries, &catalog);

        let order: Vec<&str> = merged.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(order, vec!["C", "A"]);
    }

    #[test]
    fn test_total_value() {
        assert_eq!(total_value(&[]), Price::ZERO);

        let catalog = vec![product("A", 10), product("B", 5)];
        let items = merge_cart_with_catalog(&[entry("A", 2), entry("B", 3)], &catalog);
        assert_eq!(total_value(&items), Price::from(35u32));
    }

    #[test]
    fn test_total_count() {
        assert_eq!(total_count(&[]), 0);

        let catalog = vec![product("A", 10), product("B", 5)];
        let items = merge_cart_with_catalog(&[entry("A", 2), entry("B", 3)], &catalog);
        assert_eq!(total_count(&items), 5);
    }

    #[test]
    fn test_resolve_duplicate_rejected() {
        let catalog = vec![product("A", 10)];
        let items = merge_cart_with_catalog(&[entry("A", 1)], &catalog);

        let resolution = resolve_quantity(&items, &ProductId::from("A"), 1, true);
        assert_eq!(resolution, QuantityResolution::Duplicate);
    }

    #[test]
    fn test_resolve_first_add_uses_delta() {
        let resolution = resolve_quantity(&[], &ProductId::from("A"), 1, true);
        assert_eq!(resolution, QuantityResolution::Set(1));
    }

    #[test]
    fn test_resolve_increment_counts_once() {
        // existing 3, delta +1 -> 4. The original UI double-counted here;
        // the deterministic semantics is existing + delta.
        let catalog = vec![product("A", 10)];
        let items = merge_cart_with_catalog(&[entry("A", 3)], &catalog);

        let resolution = resolve_quantity(&items, &ProductId::from("A"), 1, false);
        assert_eq!(resolution, QuantityResolution::Set(4));
    }

    #[test]
    fn test_resolve_decrement_to_zero() {
        let catalog = vec![product("A", 10)];
        let items = merge_cart_with_catalog(&[entry("A", 1)], &catalog);

        let resolution = resolve_quantity(&items, &ProductId::from("A"), -1, false);
        assert_eq!(resolution, QuantityResolution::Set(0));
    }

    #[test]
    fn test_resolve_decrement_absent_product() {
        let resolution = resolve_quantity(&[], &ProductId::from("A"), -1, false);
        assert_eq!(resolution, QuantityResolution::Set(-1));
    }

    #[test]
    fn test_persistable_quantity_clamps_non_positive() {
        assert_eq!(persistable_quantity(4), 4);
        assert_eq!(persistable_quantity(0), 0);
        assert_eq!(persistable_quantity(-1), 0);
    }

    #[test]
    fn test_add_then_merge_end_to_end() {
        // Catalog with one product, empty cart, add one unit with duplicate
        // prevention on: persisted qty 1, merged line carries the catalog
        // cost, totals follow.
        let catalog = vec![Product {
            id: ProductId::from("p1"),
            name: "Ball".to_owned(),
            category: "Sports".to_owned(),
            cost: Price::from(20u32),
            rating: 5,
            image_url: "https://i.imgur.com/lulqWzW.jpg".to_owned(),
        }];

        let cart: Vec<CartEntry> = Vec::new();
        let items = merge_cart_with_catalog(&cart, &catalog);

        let QuantityResolution::Set(quantity) =
            resolve_quantity(&items, &ProductId::from("p1"), 1, true)
        else {
            panic!("first add must not be a duplicate");
        };
        let persisted = persistable_quantity(quantity);
        assert_eq!(persisted, 1);

        // The backend would echo the updated entries back.
        let cart = vec![entry("p1", persisted)];
        let items = merge_cart_with_catalog(&cart, &catalog);

        assert_eq!(items.len(), 1);
        let line = items.first().unwrap();
        assert_eq!(line.product_id, ProductId::from("p1"));
        assert_eq!(line.qty, 1);
        assert_eq!(line.cost, Price::from(20u32));
        assert_eq!(total_value(&items), Price::from(20u32));
        assert_eq!(total_count(&items), 1);
    }
}
