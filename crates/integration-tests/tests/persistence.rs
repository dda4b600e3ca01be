//! Integration tests for catalog persistence in file storage.
//!
//! Each `launch()` is a fresh process reading the same data directory.

#![allow(clippy::unwrap_used)]

use heen_core::{Price, ProductId};
use heen_integration_tests::TestContext;
use heen_storefront::catalog::default_catalog;
use heen_storefront::storage::{CATALOG_KEY, SESSION_KEY};

// =============================================================================
// Fallback to Defaults
// =============================================================================

#[test]
fn test_first_launch_shows_default_catalog() {
    let ctx = TestContext::new();
    let state = ctx.launch();
    assert_eq!(state.catalog().document(), &default_catalog());
    // Nothing is written until something changes.
    assert!(ctx.read_raw(CATALOG_KEY).is_none());
}

#[test]
fn test_malformed_catalog_falls_back_to_defaults() {
    let ctx = TestContext::new();
    for raw in ["{\"products\": [", "42", "{\"brands\": []}", "null"] {
        ctx.write_raw(CATALOG_KEY, raw);
        let state = ctx.launch();
        assert_eq!(state.catalog().document(), &default_catalog(), "{raw}");
    }
}

#[test]
fn test_minimal_stored_catalog_is_used_as_is() {
    let ctx = TestContext::new();
    ctx.write_raw(CATALOG_KEY, r#"{"products": []}"#);
    let state = ctx.launch();
    assert!(state.catalog().products().is_empty());
    assert!(state.catalog().brands().is_empty());
}

// =============================================================================
// Mutations Survive Relaunch
// =============================================================================

#[test]
fn test_admin_changes_survive_relaunch() {
    let ctx = TestContext::new();
    {
        let mut state = ctx.launch();
        state.login("admin@heein.com", "adminlucas").unwrap();
        let mut admin = state.admin().unwrap();
        admin.set_all_prices("199,90").unwrap();
        admin.delete_product(ProductId::new(8)).unwrap();
        admin
            .create_collection("Coleção Árabe", "Duplicada de propósito")
            .unwrap();
    }

    let state = ctx.launch();
    let products = state.catalog().products();
    assert_eq!(products.len(), default_catalog().products.len() - 1);
    assert!(products.iter().all(|p| p.price == Price::from_cents(19990)));
    assert!(
        state
            .catalog()
            .collections()
            .iter()
            .any(|c| c.id.as_str() == "coleo-rabe")
    );
}

#[test]
fn test_stored_document_keeps_blob_shape() {
    let ctx = TestContext::new();
    {
        let mut state = ctx.launch();
        state.login("admin@heein.com", "adminlucas").unwrap();
        state.admin().unwrap().set_all_prices("250").unwrap();
    }

    let raw = ctx.read_raw(CATALOG_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value["products"].is_array());
    assert!(value["siteSettings"]["heroImage"].is_string());
    assert_eq!(value["products"][0]["price"], 250.0);
}

#[test]
fn test_invalid_bulk_price_writes_nothing() {
    let ctx = TestContext::new();
    let mut state = ctx.launch();
    state.login("admin@heein.com", "adminlucas").unwrap();
    {
        let mut admin = state.admin().unwrap();
        assert!(admin.set_all_prices("-5").is_err());
        assert!(admin.set_all_prices("abc").is_err());
    }
    assert!(ctx.read_raw(CATALOG_KEY).is_none());
    assert!(ctx.read_raw(SESSION_KEY).is_some());
    assert_eq!(state.catalog().document(), &default_catalog());
}

#[test]
fn test_cart_is_not_persisted() {
    let ctx = TestContext::new();
    {
        let mut state = ctx.launch();
        state.add_to_cart(ProductId::new(1)).unwrap();
        assert_eq!(state.cart().item_count(), 1);
    }
    let state = ctx.launch();
    assert!(state.cart().is_empty());
}
