//! Built-in catalog used when nothing usable is stored.

use tracing::error;

use crate::models::CatalogDocument;

const DEFAULT_CATALOG_JSON: &str = include_str!("../../data/default_catalog.json");

/// The catalog shipped with the storefront.
///
/// Falls back to an empty catalog (with default site settings) if the
/// bundled document cannot be parsed.
#[must_use]
pub fn default_catalog() -> CatalogDocument {
    serde_json::from_str(DEFAULT_CATALOG_JSON).unwrap_or_else(|e| {
        error!(error = %e, "Bundled default catalog is invalid, starting empty");
        CatalogDocument::default()
    })
}
