//! Admin login gate and full reset.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use vitrine_core::Theme;
use vitrine_integration_tests::{TestContext, open_as_admin};
use vitrine_storefront::AppError;
use vitrine_storefront::models::ProductInput;
use vitrine_storefront::services::auth::{ADMIN_SECRET, AuthError};
use vitrine_storefront::store::keys;

#[test]
fn test_wrong_password_is_rejected() {
    let ctx = TestContext::new();
    let mut shop = ctx.open().unwrap();

    let err = shop.login(&SecretString::from("letmein")).unwrap_err();
    assert!(matches!(err, AppError::Auth(AuthError::IncorrectCredential)));
    assert_eq!(err.user_message(), "Incorrect password");
    assert!(!shop.is_admin());
    assert!(ctx.read_raw(keys::ADMIN_LOGGED).is_none());
}

#[test]
fn test_password_is_trimmed_and_login_persists() {
    let ctx = TestContext::new();
    let mut shop = ctx.open().unwrap();

    shop.login(&SecretString::from(format!("  {ADMIN_SECRET}\n")))
        .unwrap();
    assert!(shop.is_admin());
    assert!(ctx.open().unwrap().is_admin());

    shop.logout().unwrap();
    assert!(!ctx.open().unwrap().is_admin());
}

#[test]
fn test_catalog_changes_require_admin() {
    let ctx = TestContext::new();
    let mut shop = ctx.open().unwrap();
    let id = shop.catalog().products()[0].id.clone();

    let input = ProductInput::new("n", "1", "d", "i");
    assert!(matches!(
        shop.upsert_product(&input),
        Err(AppError::Unauthorized)
    ));
    assert!(matches!(
        shop.delete_product(&id),
        Err(AppError::Unauthorized)
    ));
    assert_eq!(shop.catalog().len(), 6);
}

#[test]
fn test_reset_restores_defaults_but_keeps_topbar() {
    let ctx = TestContext::new();
    let mut shop = open_as_admin(&ctx).unwrap();
    let first = shop.catalog().products()[0].id.clone();

    shop.delete_product(&first).unwrap();
    shop.quick_add_demo().unwrap();
    let id = shop.catalog().products()[0].id.clone();
    shop.add_to_cart(&id, 3).unwrap();
    shop.set_theme(Theme::Dark).unwrap();
    shop.dismiss_topbar().unwrap();

    shop.reset_all_state().unwrap();

    assert!(!shop.is_admin());
    assert!(shop.cart().is_empty());
    assert_eq!(shop.theme(), Theme::Light);
    assert!(shop.topbar_dismissed());
    assert_eq!(shop.catalog().len(), 6);
    assert_eq!(shop.catalog().products()[0].name, "UI Kit Premium");

    let reopened = ctx.open().unwrap();
    assert_eq!(reopened.catalog().len(), 6);
    assert!(reopened.cart().is_empty());
    assert!(reopened.topbar_dismissed());
}
