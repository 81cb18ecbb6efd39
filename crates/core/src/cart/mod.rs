//! Cart aggregator.
//!
//! A [`Cart`] holds one line per distinct (product, customization set) pair.
//! Adding a product that is already present with the same customizations
//! bumps that line's quantity instead of creating a duplicate; see
//! [`CartItem::is_same_line`] for the identity rule.
//!
//! Every operation is total. Increasing, decreasing or removing a line that is
//! not in the cart leaves the cart untouched; the returned `bool` only tells
//! the caller whether a line matched.
//!
//! Totals are recomputed from the lines on every call, so they can never go
//! stale after a mutation.
//!
//! ```
//! use quickbite_core::{Cart, CartItem, Price};
//!
//! let mut cart = Cart::new();
//! let burger = CartItem::new("burger", "Burger", Price::from_cents(500), "");
//! cart.add_item(burger.clone());
//! cart.add_item(burger);
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price(), Price::from_cents(1000));
//! ```

mod item;

pub use item::{CartCustomization, CartItem, same_customizations};

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// The shopping cart for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    lines: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the line for `product_id` with the given customizations.
    #[must_use]
    pub fn find_line(
        &self,
        product_id: &ProductId,
        customizations: &[CartCustomization],
    ) -> Option<&CartItem> {
        self.lines
            .iter()
            .find(|line| line.is_same_line(product_id, customizations))
    }

    fn position(&self, product_id: &ProductId, customizations: &[CartCustomization]) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.is_same_line(product_id, customizations))
    }

    /// Add `candidate` to the cart.
    ///
    /// Merges into the matching line if there is one, otherwise appends a new
    /// line. A candidate quantity of zero counts as one.
    pub fn add_item(&mut self, mut candidate: CartItem) {
        let quantity = candidate.quantity.max(1);
        match self.position(&candidate.id, &candidate.customizations) {
            Some(index) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.quantity = line.quantity.saturating_add(quantity);
                }
            }
            None => {
                candidate.quantity = quantity;
                self.lines.push(candidate);
            }
        }
    }

    /// Increase the matching line's quantity by one.
    ///
    /// Returns `false` (and changes nothing) if no line matches.
    pub fn increase_qty(&mut self, product_id: &ProductId, customizations: &[CartCustomization]) -> bool {
        let Some(index) = self.position(product_id, customizations) else {
            return false;
        };
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = line.quantity.saturating_add(1);
        }
        true
    }

    /// Decrease the matching line's quantity by one, removing the line when
    /// it would reach zero.
    ///
    /// Returns `false` (and changes nothing) if no line matches.
    pub fn decrease_qty(&mut self, product_id: &ProductId, customizations: &[CartCustomization]) -> bool {
        let Some(index) = self.position(product_id, customizations) else {
            return false;
        };
        match self.lines.get_mut(index) {
            Some(line) if line.quantity > 1 => line.quantity -= 1,
            _ => {
                self.lines.remove(index);
            }
        }
        true
    }

    /// Remove the matching line regardless of quantity.
    ///
    /// Returns `false` (and changes nothing) if no line matches.
    pub fn remove_item(&mut self, product_id: &ProductId, customizations: &[CartCustomization]) -> bool {
        let Some(index) = self.position(product_id, customizations) else {
            return false;
        };
        self.lines.remove(index);
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of line totals, unrounded.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartItem::line_total).sum()
    }

    /// Total price formatted for display.
    #[must_use]
    pub fn total_price_display(&self) -> String {
        self.total_price().display()
    }
}

impl FromIterator<CartItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        let mut cart = Self::new();
        for item in iter {
            cart.add_item(item);
        }
        cart
    }
}

// Rebuilding through `add_item` keeps deserialized carts free of duplicate lines.
impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        items.into_iter().collect()
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn item(id: &str, cents: i64) -> CartItem {
        CartItem::new(id, id.to_uppercase(), Price::from_cents(cents), "")
    }

    fn cust(id: &str, cents: i64) -> CartCustomization {
        CartCustomization::new(id, id, Price::from_cents(cents), "topping")
    }

    fn pid(id: &str) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn test_add_same_item_twice_merges() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 500));
        cart.add_item(item("A", 500));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_price(), Price::from_cents(1000));
    }

    #[test]
    fn test_add_with_different_customizations_creates_new_line() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 500));
        cart.add_item(item("A", 500).with_customizations(vec![cust("c1", 100)]));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_add_merges_regardless_of_customization_order() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 500).with_customizations(vec![cust("c1", 100), cust("c2", 50)]));
        cart.add_item(item("A", 500).with_customizations(vec![cust("c2", 50), cust("c1", 100)]));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_add_uses_candidate_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 500).with_quantity(3));
        cart.add_item(item("A", 500).with_quantity(2));
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_add_zero_quantity_counts_as_one() {
        let mut cart = Cart::new();
        let mut candidate = item("A", 500);
        candidate.quantity = 0;
        cart.add_item(candidate.clone());
        cart.add_item(candidate);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_increase_qty() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 500));
        assert!(cart.increase_qty(&pid("A"), &[]));
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_increase_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 500));
        let before = cart.clone();

        assert!(!cart.increase_qty(&pid("A"), &[cust("c1", 100)]));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrease_qty_decrements() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 500).with_quantity(2));
        assert!(cart.decrease_qty(&pid("A"), &[]));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_decrease_qty_at_one_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 500));
        cart.add_item(item("B", 300));

        assert!(cart.decrease_qty(&pid("A"), &[]));
        assert_eq!(cart.len(), 1);
        assert!(cart.find_line(&pid("A"), &[]).is_none());
        assert!(cart.items().iter().all(|line| line.quantity >= 1));
    }

    #[test]
    fn test_decrease_and_remove_missing_line_are_noops() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 500));
        let before = cart.clone();

        assert!(!cart.decrease_qty(&pid("Z"), &[]));
        assert!(!cart.remove_item(&pid("Z"), &[]));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item_ignores_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 500).with_quantity(7));
        assert!(cart.remove_item(&pid("A"), &[]));
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Price::ZERO);
    }

    #[test]
    fn test_remove_targets_only_matching_customizations() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 500));
        cart.add_item(item("A", 500).with_customizations(vec![cust("c1", 100)]));

        assert!(cart.remove_item(&pid("A"), &[cust("c1", 100)]));
        assert_eq!(cart.len(), 1);
        assert!(cart.items()[0].customizations.is_empty());
    }

    #[test]
    fn test_total_price_includes_customizations() {
        let mut cart = Cart::new();
        cart.add_item(item("A", 500).with_quantity(2).with_customizations(vec![cust("c1", 125)]));
        cart.add_item(item("B", 199));

        // (5.00 + 1.25) * 2 + 1.99
        assert_eq!(cart.total_price(), Price::from_cents(1449));
        assert_eq!(cart.total_price_display(), "$14.49");
    }

    #[test]
    fn test_total_price_is_not_rounded_internally() {
        let mut cart = Cart::new();
        cart.add_item(CartItem::new("A", "A", Price::new(Decimal::new(3333, 3)), "").with_quantity(3));
        assert_eq!(cart.total_price().amount(), Decimal::new(9999, 3));
        assert_eq!(cart.total_price_display(), "$10.00");
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let cart: Cart = [item("B", 1), item("A", 1), item("B", 1)].into_iter().collect();
        let ids: Vec<&str> = cart.items().iter().map(|line| line.id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);
    }

    #[test]
    fn test_clear() {
        let mut cart: Cart = [item("A", 1), item("B", 1)].into_iter().collect();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_deserialize_merges_duplicate_lines() {
        let json = r#"[
            {"id":"A","name":"A","price":"5","image_url":"","quantity":1},
            {"id":"A","name":"A","price":"5","image_url":"","quantity":2}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 3);
    }
}
