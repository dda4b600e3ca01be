//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Mock sign-in and sign-up
//! - `checkout` - Cart and contact validation, order confirmation

pub mod auth;
pub mod checkout;
