//! Integration tests for the session and admin access control.

#![allow(clippy::unwrap_used)]

use heen_core::Role;
use heen_integration_tests::TestContext;
use heen_storefront::AppError;
use heen_storefront::access::{AccessError, Capability};
use heen_storefront::storage::{CATALOG_KEY, SESSION_KEY};

#[test]
fn test_session_survives_relaunch() {
    let ctx = TestContext::new();
    {
        let mut state = ctx.launch();
        state.sign_up("Maria", "maria@exemplo.com", "segredo").unwrap();
    }
    let state = ctx.launch();
    let user = state.current_user().unwrap();
    assert_eq!(user.name, "Maria");
    assert_eq!(user.role, Role::User);
}

#[test]
fn test_logout_clears_only_the_session() {
    let ctx = TestContext::new();
    {
        let mut state = ctx.launch();
        state.login("admin@heein.com", "adminlucas").unwrap();
        state.admin().unwrap().create_brand("Rasasi").unwrap();
        state.logout();
    }
    assert!(ctx.read_raw(SESSION_KEY).is_none());
    assert!(ctx.read_raw(CATALOG_KEY).is_some());

    let state = ctx.launch();
    assert!(state.current_user().is_none());
    assert!(state.catalog().brands().iter().any(|b| b.name == "Rasasi"));
}

#[test]
fn test_malformed_session_means_signed_out() {
    let ctx = TestContext::new();
    ctx.write_raw(SESSION_KEY, r#"{"name":"Sem id"}"#);
    assert!(ctx.launch().current_user().is_none());

    ctx.write_raw(SESSION_KEY, "{{{");
    assert!(ctx.launch().current_user().is_none());
}

#[test]
fn test_regular_user_cannot_manage_catalog() {
    let ctx = TestContext::new();
    let mut state = ctx.launch();
    state.login("cliente@exemplo.com", "qualquer").unwrap();

    let err = state.admin().unwrap_err();
    assert!(matches!(
        err,
        AppError::Access(AccessError::Forbidden(Capability::ViewAdminPanel))
    ));
    assert!(ctx.read_raw(CATALOG_KEY).is_none());
}

#[test]
fn test_admin_role_restored_from_storage() {
    let ctx = TestContext::new();
    {
        let mut state = ctx.launch();
        state.login("admin@heein.com", "adminlucas").unwrap();
    }
    let mut state = ctx.launch();
    assert_eq!(state.current_user().unwrap().role, Role::Admin);
    assert!(state.admin().is_ok());
}

#[test]
fn test_admin_email_variant_gets_no_admin_panel() {
    let ctx = TestContext::new();
    let mut state = ctx.launch();
    let user = state.login("  ADMIN@HEEIN.COM ", "adminlucas").unwrap();
    assert_eq!(user.role, Role::User);
    assert!(matches!(
        state.admin().unwrap_err(),
        AppError::Access(AccessError::Forbidden(Capability::ViewAdminPanel))
    ));
}

#[test]
fn test_custom_admin_credential() {
    let ctx = TestContext::new();
    let mut config = ctx.config();
    config.admin.email = "dono@heein.com".to_string();
    config.admin.password = "outra-senha".into();

    let mut state = heen_storefront::AppState::open(config).unwrap();
    let user = state.login("admin@heein.com", "adminlucas").unwrap();
    assert_eq!(user.role, Role::User);
    let user = state.login("dono@heein.com", "outra-senha").unwrap();
    assert_eq!(user.role, Role::Admin);
}
