//! Integration tests for cart line merging and totals.
//!
//! Long mutation sequences are replayed against the cart and checked after
//! every step: one line per (product, customization set), quantities of at
//! least one, and totals that agree with the lines.

#![allow(clippy::unwrap_used)]

use std::collections::{BTreeSet, HashSet};

use quickbite_core::{Cart, CartCustomization, CartItem, Price, ProductId};

fn cheese() -> CartCustomization {
    CartCustomization::new("cheese", "Cheese", Price::from_cents(50), "topping")
}

fn bacon() -> CartCustomization {
    CartCustomization::new("bacon", "Bacon", Price::from_cents(100), "topping")
}

fn customization_sets() -> Vec<Vec<CartCustomization>> {
    vec![
        vec![],
        vec![cheese()],
        vec![cheese(), bacon()],
        vec![bacon(), cheese()],
    ]
}

fn assert_invariants(cart: &Cart) {
    let mut keys = HashSet::new();
    for line in cart.items() {
        assert!(line.quantity >= 1, "line {} has quantity 0", line.id);
        let set: BTreeSet<_> = line.customizations.iter().map(|c| c.id.clone()).collect();
        assert!(keys.insert((line.id.clone(), set)), "duplicate line for {}", line.id);
    }

    let expected_items: u64 = cart.items().iter().map(|l| u64::from(l.quantity)).sum();
    assert_eq!(cart.total_items(), expected_items);

    let expected_total: Price = cart.items().iter().map(CartItem::line_total).sum();
    assert_eq!(cart.total_price(), expected_total);
}

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        usize::try_from(self.0 >> 33).unwrap() % bound
    }
}

// =============================================================================
// Mutation Sequences
// =============================================================================

#[test]
fn test_random_mutation_sequences_keep_invariants() {
    let products = ["burger", "fries", "shake"];
    let sets = customization_sets();

    for seed in 0..20 {
        let mut rng = Lcg(seed);
        let mut cart = Cart::new();

        for _ in 0..200 {
            let product = ProductId::new(products[rng.next(products.len())]);
            let customizations = &sets[rng.next(sets.len())];

            match rng.next(4) {
                0 => {
                    let quantity = u32::try_from(rng.next(4)).unwrap();
                    cart.add_item(
                        CartItem::new(product, "Item", Price::from_cents(500), "")
                            .with_quantity(quantity)
                            .with_customizations(customizations.clone()),
                    );
                }
                1 => {
                    cart.increase_qty(&product, customizations);
                }
                2 => {
                    cart.decrease_qty(&product, customizations);
                }
                _ => {
                    cart.remove_item(&product, customizations);
                }
            }
            assert_invariants(&cart);
        }
    }
}

#[test]
fn test_customization_order_is_one_line() {
    let mut cart = Cart::new();
    for set in customization_sets().into_iter().skip(2) {
        cart.add_item(CartItem::new("burger", "Burger", Price::from_cents(500), "").with_customizations(set));
    }

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_invariants(&cart);
}

#[test]
fn test_unknown_line_mutations_change_nothing() {
    let mut cart = Cart::new();
    cart.add_item(CartItem::new("burger", "Burger", Price::from_cents(500), "").with_customizations(vec![cheese()]));
    let before = cart.clone();

    let burger = ProductId::new("burger");
    assert!(!cart.increase_qty(&burger, &[]));
    assert!(!cart.decrease_qty(&burger, &[bacon()]));
    assert!(!cart.remove_item(&ProductId::new("fries"), &[cheese()]));

    assert_eq!(cart, before);
}

// =============================================================================
// Totals
// =============================================================================

#[test]
fn test_totals_with_customizations() {
    let mut cart = Cart::new();
    cart.add_item(
        CartItem::new("burger", "Burger", Price::from_cents(599), "")
            .with_quantity(2)
            .with_customizations(vec![cheese(), bacon()]),
    );
    cart.add_item(CartItem::new("fries", "Fries", Price::from_cents(299), ""));

    // (5.99 + 0.50 + 1.00) * 2 + 2.99
    assert_eq!(cart.total_price(), Price::from_cents(1797));
    assert_eq!(cart.total_price_display(), "$17.97");
    assert_eq!(cart.total_items(), 3);
}

#[test]
fn test_cart_from_lines_merges_duplicates() {
    let burger = || CartItem::new("burger", "Burger", Price::from_cents(500), "");
    let cart = Cart::from(vec![burger(), burger().with_quantity(2), burger().with_customizations(vec![cheese()])]);

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total_items(), 4);
    assert_invariants(&cart);
}
