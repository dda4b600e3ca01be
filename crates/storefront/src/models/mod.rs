//! Domain models for the storefront.
//!
//! Field names serialize in camelCase so documents stay readable by the
//! browser storefront that shares the same storage format.

mod catalog;
mod product;
mod user;

pub use catalog::{Brand, CatalogDocument, Collection, SiteSettings};
pub use product::{Product, ProductDraft, parse_notes};
pub(crate) use product::validate_image;
pub use user::User;

/// Mint a millisecond-timestamp id that is unique among `existing`.
///
/// Uses `now_ms` unless an existing id is already at or past it, in which case
/// the next integer after the largest existing id is used.
pub(crate) fn mint_id(now_ms: i64, existing: impl IntoIterator<Item = i64>) -> i64 {
    match existing.into_iter().max() {
        Some(max) if max >= now_ms => max.saturating_add(1),
        _ => now_ms,
    }
}

/// Current Unix time in milliseconds.
pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
