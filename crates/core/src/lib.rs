//! Heen Core - Shared types library.
//!
//! This crate provides common types used across all Heen components:
//! - `storefront` - Catalog, cart, session and admin operations
//! - `cli` - Command-line front end over the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no storage
//! access, no clock. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, slugs and enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
