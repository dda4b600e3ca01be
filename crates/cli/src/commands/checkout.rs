//! Checkout command.
//!
//! The cart is not persisted, so it is built from `--product` flags and
//! checked out in the same invocation.
//!
//! # Usage
//!
//! ```bash
//! heen checkout -p 1 -p 1 -p 7 --name Maria --email maria@exemplo.com
//! ```

use std::io::{self, Write};

use clap::Args;
use heen_core::ProductId;
use heen_storefront::AppState;
use heen_storefront::services::checkout::CheckoutForm;
use heen_storefront::storage::Storage;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Product id to add to the cart (repeat to add more units)
    #[arg(short, long = "product", required = true)]
    products: Vec<ProductId>,

    /// Full name
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,
}

/// Fill the cart and check out.
///
/// # Errors
///
/// Returns an error for unknown products, incomplete contact details or
/// failed output.
pub fn run<S: Storage>(
    state: &mut AppState<S>,
    args: &CheckoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    for id in &args.products {
        state.add_to_cart(*id)?;
    }

    let mut out = io::stdout().lock();
    for item in state.cart().items() {
        writeln!(
            out,
            "{:>3} x {:<28} {:>12}",
            item.quantity,
            item.product.name,
            item.line_total()
        )?;
    }

    let form = CheckoutForm {
        name: args.name.clone(),
        email: args.email.clone(),
    };
    let confirmation = state.checkout(&form)?;
    writeln!(
        out,
        "Total: {} ({} itens)",
        confirmation.total, confirmation.item_count
    )?;
    writeln!(out, "{}", confirmation.message)?;
    Ok(())
}
