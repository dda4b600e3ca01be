//! Integration tests for admin catalog management as seen by shoppers.

#![allow(clippy::unwrap_used)]

use heen_core::{CollectionId, Gender, Price, ProductId};
use heen_integration_tests::TestContext;
use heen_storefront::AppState;
use heen_storefront::catalog::default_catalog;
use heen_storefront::models::{CatalogDocument, ProductDraft, parse_notes};
use heen_storefront::search::{CollectionView, Facets, ProductFilter};
use heen_storefront::services::checkout::CheckoutForm;
use heen_storefront::storage::FileStorage;

fn admin_state(ctx: &TestContext) -> AppState<FileStorage> {
    let mut state = ctx.launch();
    state.login("admin@heein.com", "adminlucas").unwrap();
    state
}

fn draft() -> ProductDraft {
    ProductDraft {
        name: "Oud Mood".to_string(),
        brand: "Lattafa".to_string(),
        gender: Gender::Unissex,
        category: "Oriental".to_string(),
        price: Price::from_cents(21990),
        notes: parse_notes("Oud, Rosa, Açafrão"),
        image: "https://picsum.photos/seed/oud-mood/600/800".to_string(),
        description: "Oud e rosa.".to_string(),
        collection: Some(CollectionId::new("colecao_arabe")),
    }
}

#[test]
fn test_created_product_is_searchable_and_in_collection() {
    let ctx = TestContext::new();
    let mut state = admin_state(&ctx);
    let created = state.admin().unwrap().create_product(draft()).unwrap();
    assert_eq!(created.slug, "oud-mood");

    let filter = ProductFilter {
        query: Some("açafrão".to_string()),
        ..ProductFilter::default()
    };
    let found = state.search(&filter);
    assert_eq!(found.len(), 1);
    assert_eq!(found.first().unwrap().id, created.id);

    let document = state.catalog().document();
    let view = CollectionView::find(document, &CollectionId::new("colecao_arabe")).unwrap();
    assert!(view.products.iter().any(|p| p.id == created.id));
    assert!(document.product_by_slug("oud-mood").is_some());
}

#[test]
fn test_deleted_brand_leaves_products_and_facets() {
    let ctx = TestContext::new();
    let mut state = admin_state(&ctx);
    let afnan = state
        .catalog()
        .brands()
        .iter()
        .find(|b| b.name == "Afnan")
        .unwrap()
        .id;
    state.admin().unwrap().delete_brand(afnan).unwrap();

    let document = state.catalog().document();
    let facets = Facets::from_document(document);
    assert!(facets.brands.iter().all(|b| b.name != "Afnan"));
    assert!(document.product(ProductId::new(6)).is_some());
    assert_eq!(document.products_without_brand().len(), 1);
}

#[test]
fn test_seed_from_yaml_then_reset() {
    let ctx = TestContext::new();
    let mut state = admin_state(&ctx);

    let yaml = r"
products:
  - id: 100
    slug: musk-blanc
    name: Musk Blanc
    brand: Afnan
    category: Almiscarado
    price: '159.90'
    image: https://picsum.photos/seed/musk/600/800
    gender: Feminino
";
    let document: CatalogDocument = serde_yaml::from_str(yaml).unwrap();
    state.admin().unwrap().replace_catalog(document).unwrap();
    assert_eq!(state.catalog().products().len(), 1);

    let relaunched = ctx.launch();
    assert_eq!(relaunched.catalog().products().len(), 1);
    assert_eq!(
        relaunched.catalog().products().first().unwrap().price,
        Price::from_cents(15990)
    );

    state.admin().unwrap().reset_catalog().unwrap();
    assert_eq!(ctx.launch().catalog().document(), &default_catalog());
}

#[test]
fn test_checkout_after_price_change_uses_cart_snapshot() {
    let ctx = TestContext::new();
    let mut state = admin_state(&ctx);
    state.add_to_cart(ProductId::new(1)).unwrap();
    state.admin().unwrap().set_all_prices("10").unwrap();
    state.add_to_cart(ProductId::new(2)).unwrap();

    let confirmation = state
        .checkout(&CheckoutForm {
            name: "Admin Heen".to_string(),
            email: "admin@heein.com".to_string(),
        })
        .unwrap();
    // Khamrah was added at 289,90; Asad after the change at 10,00.
    assert_eq!(confirmation.total, Price::from_cents(29990));
    assert_eq!(confirmation.total.to_string(), "R$ 299,90");
    assert!(state.cart().is_empty());
}
