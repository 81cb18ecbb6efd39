//! Build a cart from product IDs and print its totals.
//!
//! # Usage
//!
//! ```bash
//! qb cart burger-1:2 fries burger-1
//! ```
//!
//! Repeated IDs merge into one line, the same way the app's cart does.

use thiserror::Error;
use tracing::{info, instrument};

use quickbite_client::AppError;
use quickbite_client::config::ClientConfig;
use quickbite_client::product::load_product;
use quickbite_core::{Cart, ProductId};

/// Errors from parsing an `ID[:QTY]` argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartArgError {
    #[error("product ID is empty in '{0}'")]
    EmptyId(String),

    #[error("invalid quantity in '{0}'")]
    InvalidQuantity(String),
}

impl From<CartArgError> for AppError {
    fn from(err: CartArgError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// A parsed `ID[:QTY]` argument.
#[derive(Debug, PartialEq, Eq)]
struct CartArg {
    id: ProductId,
    quantity: u32,
}

fn parse_arg(arg: &str) -> Result<CartArg, CartArgError> {
    let (id, quantity) = match arg.rsplit_once(':') {
        Some((id, qty)) => {
            let quantity = qty
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|q| *q > 0)
                .ok_or_else(|| CartArgError::InvalidQuantity(arg.to_string()))?;
            (id, quantity)
        }
        None => (arg, 1),
    };

    let id = ProductId::parse(id).map_err(|_| CartArgError::EmptyId(arg.to_string()))?;
    Ok(CartArg { id, quantity })
}

/// Look up each product and print the resulting cart.
///
/// # Errors
///
/// Returns an error if an argument is malformed, a product does not exist,
/// or the catalog cannot be read.
#[instrument(skip(config))]
pub async fn build(config: &ClientConfig, items: &[String]) -> quickbite_client::Result<()> {
    let args = items
        .iter()
        .map(|item| parse_arg(item))
        .collect::<Result<Vec<_>, _>>()?;

    let client = super::appwrite(config)?;
    let project_id = Some(client.project_id());
    let mut cart = Cart::new();

    for arg in args {
        let detail = load_product(&client, &arg.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {}", arg.id)))?;
        cart.add_item(detail.to_cart_item(project_id).with_quantity(arg.quantity));
    }

    info!(lines = cart.len(), items = cart.total_items(), "Built cart");
    print_cart(&cart);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &Cart) {
    for line in cart.items() {
        println!(
            "{:>3} x {:<32} {:>8}",
            line.quantity,
            line.name,
            line.line_total().display()
        );
    }
    println!("Items: {}", cart.total_items());
    println!("Total: {}", cart.total_price_display());
}
