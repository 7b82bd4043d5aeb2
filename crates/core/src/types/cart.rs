//! Shopping cart value type.
//!
//! A cart maps product ids to held quantities. Entries keep insertion
//! order so the cart fragment lists items in the order they were first
//! added. A key is present only while its quantity is at least 1.

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Per-session mapping from product id to quantity.
///
/// Serializes as a plain JSON object, e.g. `{"iphone": 2, "imac": 1}`.
///
/// # Example
///
/// ```rust
/// # use apple_store_core::Cart;
/// let mut cart = Cart::new();
/// cart.add_item("iphone".into());
/// cart.add_item("iphone".into());
/// assert_eq!(cart.quantity("iphone"), 2);
///
/// cart.remove_item("iphone");
/// cart.remove_item("iphone");
/// assert!(cart.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: IndexMap<ProductId, u32>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the quantity held for `id`, inserting it at 1 if absent.
    ///
    /// The id is not checked against the catalog. The counter saturates
    /// at `u32::MAX`.
    pub fn add_item(&mut self, id: ProductId) -> u32 {
        let quantity = self.items.entry(id).or_insert(0);
        *quantity = quantity.saturating_add(1);
        *quantity
    }

    /// Decrement the quantity held for `id`, dropping the entry at zero.
    ///
    /// Absent ids are a no-op. Returns the remaining quantity.
    pub fn remove_item(&mut self, id: &str) -> u32 {
        let Some(quantity) = self.items.get_mut(id) else {
            return 0;
        };

        *quantity = quantity.saturating_sub(1);
        let remaining = *quantity;
        if remaining == 0 {
            // shift_remove keeps the order of the remaining entries
            self.items.shift_remove(id);
        }
        remaining
    }

    /// Quantity held for `id` (0 when absent).
    #[must_use]
    pub fn quantity(&self, id: &str) -> u32 {
        self.items.get(id).copied().unwrap_or(0)
    }

    /// Whether `id` has an entry.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.values().map(|&q| u64::from(q)).sum()
    }

    /// Iterate over `(id, quantity)` pairs in insertion order.
    pub fn iter(&self) -> Iter<'_, ProductId, u32> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = (&'a ProductId, &'a u32);
    type IntoIter = Iter<'a, ProductId, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<(ProductId, u32)> for Cart {
    /// Build a cart from pairs, skipping zero quantities.
    fn from_iter<I: IntoIterator<Item = (ProductId, u32)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().filter(|(_, q)| *q > 0).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cart_of(pairs: &[(&str, u32)]) -> Cart {
        pairs
            .iter()
            .map(|&(id, q)| (ProductId::from(id), q))
            .collect()
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item("iphone".into()), 1);
        assert_eq!(cart, cart_of(&[("iphone", 1)]));
    }

    #[test]
    fn test_add_increments_existing() {
        let mut cart = cart_of(&[("iphone", 2)]);
        cart.add_item("iphone".into());
        assert_eq!(cart, cart_of(&[("iphone", 3)]));
    }

    #[test]
    fn test_n_adds_yield_quantity_n() {
        for n in 1..=25_u32 {
            let mut cart = Cart::new();
            for _ in 0..n {
                cart.add_item("ipad".into());
            }
            assert_eq!(cart.quantity("ipad"), n);
            assert_eq!(cart.len(), 1);
        }
    }

    #[test]
    fn test_remove_decrements_and_keeps_key() {
        for q in 2..=10_u32 {
            let mut cart = cart_of(&[("imac", q)]);
            assert_eq!(cart.remove_item("imac"), q - 1);
            assert!(cart.contains("imac"));
            assert_eq!(cart.quantity("imac"), q - 1);
        }
    }

    #[test]
    fn test_remove_last_unit_drops_key() {
        let mut cart = cart_of(&[("iphone", 1)]);
        assert_eq!(cart.remove_item("iphone"), 0);
        assert!(!cart.contains("iphone"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.remove_item("ipad");
        assert!(cart.is_empty());

        let mut cart = cart_of(&[("imac", 2)]);
        let before = cart.clone();
        cart.remove_item("ipad");
        assert_eq!(cart, before);
    }

    #[test]
    fn test_unknown_ids_are_accepted() {
        let mut cart = Cart::new();
        cart.add_item("zune".into());
        assert_eq!(cart.quantity("zune"), 1);
    }

    #[test]
    fn test_insertion_order_survives_removal() {
        let mut cart = Cart::new();
        cart.add_item("ipad".into());
        cart.add_item("iphone".into());
        cart.add_item("imac".into());
        cart.remove_item("iphone");

        let ids: Vec<&str> = cart.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["ipad", "imac"]);
    }

    #[test]
    fn test_add_saturates() {
        let mut cart = cart_of(&[("iphone", u32::MAX)]);
        assert_eq!(cart.add_item("iphone".into()), u32::MAX);
    }

    #[test]
    fn test_total_quantity() {
        let cart = cart_of(&[("iphone", 2), ("imac", 3)]);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_json_shape_is_plain_object() {
        let cart = cart_of(&[("iphone", 2), ("imac", 1)]);
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"{"iphone":2,"imac":1}"#);

        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }

    #[test]
    fn test_from_iter_skips_zero_quantities() {
        let cart = cart_of(&[("iphone", 0), ("imac", 1)]);
        assert!(!cart.contains("iphone"));
        assert_eq!(cart.len(), 1);
    }
}
