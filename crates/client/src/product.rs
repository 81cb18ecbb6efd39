//! Product detail flow: load a menu item, pick a quantity, add it to the cart.

use tracing::instrument;

use quickbite_core::{CartItem, ProductId, build_image_url};

use crate::models::MenuItem;
use crate::services::auth::AuthProvider;
use crate::services::catalog::{Catalog, CatalogError};
use crate::state::AppSession;

/// Highest star count a rating can show.
const MAX_STARS: u8 = 5;

/// A loaded product with the quantity the user has picked.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    item: MenuItem,
    quantity: u32,
}

/// Load the product for a detail screen.
///
/// # Errors
///
/// Returns the catalog error; an unknown ID is `Ok(None)`.
#[instrument(skip(catalog), fields(id = %id))]
pub async fn load_product<C: Catalog>(catalog: &C, id: &ProductId) -> Result<Option<ProductDetail>, CatalogError> {
    Ok(catalog.get_menu_item(id).await?.map(ProductDetail::new))
}

impl ProductDetail {
    /// Start at a quantity of one.
    #[must_use]
    pub const fn new(item: MenuItem) -> Self {
        Self { item, quantity: 1 }
    }

    #[must_use]
    pub const fn item(&self) -> &MenuItem {
        &self.item
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    pub const fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Decrease the quantity, stopping at one.
    pub const fn decrement(&mut self) {
        if self.quantity > 1 {
            self.quantity -= 1;
        }
    }

    /// Number of whole stars to draw for the rating.
    #[must_use]
    pub fn rating_stars(&self) -> u8 {
        let rating = self.item.rating;
        if !rating.is_finite() || rating <= 0.0 {
            return 0;
        }
        // Clamped to 0..=5 above and below, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let stars = rating.floor().min(f64::from(MAX_STARS)) as u8;
        stars
    }

    /// Image URL ready to load.
    #[must_use]
    pub fn image_url(&self, project_id: Option<&str>) -> String {
        build_image_url(&self.item.image_url, project_id)
    }

    /// Cart line for the selected quantity, with no customizations.
    #[must_use]
    pub fn to_cart_item(&self, project_id: Option<&str>) -> CartItem {
        CartItem::new(
            self.item.id.clone(),
            self.item.name.clone(),
            self.item.price,
            self.image_url(project_id),
        )
        .with_quantity(self.quantity)
    }

    /// Add the selected quantity to the session cart.
    pub fn add_to_cart<A: AuthProvider>(&self, session: &mut AppSession<A>, project_id: Option<&str>) {
        session.add_item(self.to_cart_item(project_id));
    }
}

#[cfg(test)]
mod tests {
    use quickbite_core::Price;

    use super::*;

    fn fries(rating: f64) -> MenuItem {
        MenuItem {
            id: ProductId::new("fries"),
            name: "Fries".to_string(),
            price: Price::from_cents(399),
            image_url: "https://img/fries.png".to_string(),
            rating,
            calories: 300,
            protein: 4,
            description: String::new(),
            category: None,
        }
    }

    #[test]
    fn test_quantity_never_below_one() {
        let mut detail = ProductDetail::new(fries(4.0));
        detail.decrement();
        assert_eq!(detail.quantity(), 1);
        detail.increment();
        detail.increment();
        detail.decrement();
        assert_eq!(detail.quantity(), 2);
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(ProductDetail::new(fries(4.7)).rating_stars(), 4);
        assert_eq!(ProductDetail::new(fries(9.0)).rating_stars(), 5);
        assert_eq!(ProductDetail::new(fries(-1.0)).rating_stars(), 0);
        assert_eq!(ProductDetail::new(fries(f64::NAN)).rating_stars(), 0);
    }

    #[test]
    fn test_to_cart_item() {
        let mut detail = ProductDetail::new(fries(4.0));
        detail.increment();
        detail.increment();

        let item = detail.to_cart_item(Some("proj"));
        assert_eq!(item.quantity, 3);
        assert_eq!(item.image_url, "https://img/fries.png?project=proj");
        assert!(item.customizations.is_empty());
        assert_eq!(item.line_total(), Price::from_cents(1197));
    }
}
