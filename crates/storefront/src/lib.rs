//! Heen Fragrâncias storefront library.
//!
//! The storefront keeps its whole state in memory and mirrors it to a
//! key-value [`storage::Storage`] backend:
//!
//! - [`catalog`] - products, brands, collections and site settings, written
//!   wholesale on every change
//! - [`session`] - the signed-in user, stored under its own key
//! - [`cart`] - never persisted
//!
//! [`state::AppState`] ties them together for a front end. Admin mutations
//! go through [`admin::AdminPanel`], which is only handed out after an
//! [`access::authorize`] check.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
pub use state::AppState;
