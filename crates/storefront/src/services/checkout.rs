//! Checkout stub.
//!
//! Validates the cart and contact details and produces a confirmation.
//! No payment is taken and no order is stored.

use heen_core::{Email, EmailError, Price};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::cart::Cart;

/// Message shown after a successful checkout.
pub const SUCCESS_MESSAGE: &str = "Compra finalizada com sucesso!";

/// Errors that block a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("O carrinho está vazio.")]
    EmptyCart,

    /// Name or email is blank.
    #[error("Por favor, preencha todos os campos.")]
    MissingFields,

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Contact details entered on the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
}

/// Summary returned once the checkout is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub name: String,
    pub email: Email,
    pub item_count: u64,
    pub total: Price,
    pub message: &'static str,
}

/// Validate the form against `cart` and build the confirmation.
///
/// Does not touch the cart; the caller clears it on success.
///
/// # Errors
///
/// Returns [`CheckoutError`] if the cart is empty or the contact details
/// are incomplete or invalid.
#[instrument(skip_all, fields(items = cart.item_count()))]
pub fn checkout(cart: &Cart, form: &CheckoutForm) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let name = form.name.trim();
    if name.is_empty() || form.email.trim().is_empty() {
        return Err(CheckoutError::MissingFields);
    }
    let email = Email::parse(&form.email)?;

    let confirmation = OrderConfirmation {
        name: name.to_owned(),
        email,
        item_count: cart.item_count(),
        total: cart.total(),
        message: SUCCESS_MESSAGE,
    };
    info!(total = %confirmation.total, "Checkout completed");
    Ok(confirmation)
}
