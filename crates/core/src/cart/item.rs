//! Cart line items and the same-line predicate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{CustomizationId, Price, ProductId};

/// An optional add-on selected for a line item (extra cheese, a side, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCustomization {
    pub id: CustomizationId,
    pub name: String,
    pub price: Price,
    /// Free-form grouping from the catalog, e.g. "topping" or "side".
    #[serde(rename = "type")]
    pub kind: String,
}

impl CartCustomization {
    /// Create a new customization.
    #[must_use]
    pub fn new(
        id: impl Into<CustomizationId>,
        name: impl Into<String>,
        price: Price,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            kind: kind.into(),
        }
    }
}

/// Returns `true` if both customization lists select the same add-ons.
///
/// Comparison is by customization ID as a set: order does not matter and a
/// repeated ID on either side counts once.
#[must_use]
pub fn same_customizations(a: &[CartCustomization], b: &[CartCustomization]) -> bool {
    customization_ids(a) == customization_ids(b)
}

fn customization_ids(customizations: &[CartCustomization]) -> BTreeSet<&CustomizationId> {
    customizations.iter().map(|c| &c.id).collect()
}

/// A product in the cart together with its chosen customizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    /// Base unit price, before customizations.
    pub price: Price,
    pub image_url: String,
    pub quantity: u32,
    #[serde(default)]
    pub customizations: Vec<CartCustomization>,
}

impl CartItem {
    /// Create a line for one unit of a product with no customizations.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Price,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_url: image_url.into(),
            quantity: 1,
            customizations: Vec::new(),
        }
    }

    /// Set the quantity. Zero is treated as one.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// Attach customizations.
    #[must_use]
    pub fn with_customizations(mut self, customizations: Vec<CartCustomization>) -> Self {
        self.customizations = customizations;
        self
    }

    /// Returns `true` if this line is for `product_id` with exactly the
    /// given set of customizations.
    #[must_use]
    pub fn is_same_line(&self, product_id: &ProductId, customizations: &[CartCustomization]) -> bool {
        self.id == *product_id && same_customizations(&self.customizations, customizations)
    }

    /// Base price plus every customization, for a single unit.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.price + self.customizations.iter().map(|c| c.price).sum::<Price>()
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price() * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topping(id: &str, cents: i64) -> CartCustomization {
        CartCustomization::new(id, id, Price::from_cents(cents), "topping")
    }

    #[test]
    fn test_same_customizations_ignores_order() {
        let a = [topping("cheese", 100), topping("bacon", 200)];
        let b = [topping("bacon", 200), topping("cheese", 100)];
        assert!(same_customizations(&a, &b));
    }

    #[test]
    fn test_same_customizations_collapses_duplicates() {
        let a = [topping("cheese", 100), topping("cheese", 100)];
        let b = [topping("cheese", 100)];
        assert!(same_customizations(&a, &b));
    }

    #[test]
    fn test_same_customizations_compares_ids_only() {
        // A stale price on one side does not split the line.
        let a = [topping("cheese", 100)];
        let b = [topping("cheese", 150)];
        assert!(same_customizations(&a, &b));
    }

    #[test]
    fn test_different_customizations() {
        assert!(!same_customizations(&[], &[topping("cheese", 100)]));
        assert!(!same_customizations(
            &[topping("cheese", 100)],
            &[topping("bacon", 100)]
        ));
    }

    #[test]
    fn test_is_same_line_requires_product_match() {
        let item = CartItem::new("burger", "Burger", Price::from_cents(500), "");
        assert!(item.is_same_line(&ProductId::new("burger"), &[]));
        assert!(!item.is_same_line(&ProductId::new("pizza"), &[]));
    }

    #[test]
    fn test_with_quantity_floors_at_one() {
        let item = CartItem::new("burger", "Burger", Price::from_cents(500), "").with_quantity(0);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_line_total_includes_customizations() {
        let item = CartItem::new("burger", "Burger", Price::from_cents(500), "")
            .with_quantity(3)
            .with_customizations(vec![topping("cheese", 100), topping("bacon", 150)]);
        assert_eq!(item.unit_price(), Price::from_cents(750));
        assert_eq!(item.line_total(), Price::from_cents(2250));
    }

    #[test]
    fn test_customization_type_field_name() {
        let json = serde_json::to_value(topping("cheese", 100)).unwrap_or_default();
        assert_eq!(json["type"], "topping");
    }
}
