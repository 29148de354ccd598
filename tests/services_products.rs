use frostline_catalog::domain::product::Availability;
use frostline_catalog::domain::translation::Language;
use frostline_catalog::forms::TranslationForm;
use frostline_catalog::forms::categories::AddCategoryForm;
use frostline_catalog::forms::products::ProductForm;
use frostline_catalog::repository::ProductReader;
use frostline_catalog::services::{ServiceError, categories, products};

mod common;

fn category_form(name: &str, parent_id: Option<i32>) -> AddCategoryForm {
    AddCategoryForm {
        parent_id,
        brand_id: None,
        translations: vec![TranslationForm::new(Language::Uk, name)],
    }
}

fn product_form(category_id: i32, sku: &str, name: &str) -> ProductForm {
    ProductForm {
        sku: sku.to_string(),
        main_image: "img/main.jpg".to_string(),
        gallery: vec!["img/1.jpg".to_string()],
        technical_images: Vec::new(),
        price_cents: 49_900,
        is_discounted: false,
        discount_price_cents: None,
        availability: Availability::InStock,
        category_id,
        translations: vec![TranslationForm::new(Language::Uk, name)],
    }
}

#[test]
fn duplicate_names_and_skus_end_to_end() {
    let test_db = common::TestDb::new("service_duplicate_names_and_skus.db");
    let repo = test_db.repo();

    let first = categories::create_category(&repo, category_form("Насоси", None))
        .expect("create first category");
    let second = categories::create_category(&repo, category_form("Насоси", None))
        .expect("create second category");
    assert_eq!(first.slug, "nasosi");
    assert_eq!(second.slug, "nasosi-2");

    let product = products::create_product(&repo, product_form(first.id, "P-100", "Насос"))
        .expect("create product");
    assert_eq!(product.sku, "P-100");

    let result = products::create_product(&repo, product_form(second.id, "P-100", "Інший насос"));
    match result {
        Err(ServiceError::Conflict { field, .. }) => assert_eq!(field, "sku"),
        other => panic!("expected duplicate SKU conflict, got {other:?}"),
    }

    let second_products = categories::get_products_by_category_id(&repo, second.id, 0)
        .expect("list products");
    assert!(second_products.is_empty());
}

#[test]
fn update_product_accepts_own_sku_and_rejects_foreign_sku() {
    let test_db = common::TestDb::new("service_update_product_sku.db");
    let repo = test_db.repo();

    let leaf = categories::create_category(&repo, category_form("Компресори", None))
        .expect("create category");
    let p1 = products::create_product(&repo, product_form(leaf.id, "P-1", "Компресор 1"))
        .expect("create p1");
    let p2 = products::create_product(&repo, product_form(leaf.id, "P-2", "Компресор 2"))
        .expect("create p2");

    let mut form = product_form(leaf.id, "P-1", "Компресор 1 (оновлено)");
    form.price_cents = 59_900;
    let updated = products::update_product(&repo, p1.id, form).expect("own sku is fine");
    assert_eq!(updated.price_cents, 59_900);

    let result = products::update_product(&repo, p2.id, product_form(leaf.id, "P-1", "Компресор 2"));
    assert!(matches!(result, Err(ServiceError::Conflict { field: "sku", .. })));

    let stored = repo
        .get_product_by_id(p2.id)
        .expect("read p2")
        .expect("p2 exists");
    assert_eq!(stored.sku, "P-2");
}

#[test]
fn products_only_go_into_end_categories() {
    let test_db = common::TestDb::new("service_end_category_products.db");
    let repo = test_db.repo();

    let electronics = categories::create_category(&repo, category_form("Електроніка", None))
        .expect("create electronics");
    categories::create_category(&repo, category_form("Контролери", Some(electronics.id)))
        .expect("create child");
    let compressors = categories::create_category(&repo, category_form("Компресори", None))
        .expect("create compressors");

    let flat = categories::get_all_flat_categories_for_product(&repo, Language::Uk)
        .expect("flat categories");
    let electronics_entry = flat
        .iter()
        .find(|entry| entry.id == electronics.id)
        .expect("electronics listed");
    assert!(!electronics_entry.is_end_category);

    let result = products::create_product(&repo, product_form(electronics.id, "E-1", "Плата"));
    assert!(matches!(result, Err(ServiceError::Invariant(_))));

    let result = products::create_product(&repo, product_form(compressors.id, "C-1", "Компресор"));
    assert!(result.is_ok(), "expected product creation to succeed: {result:?}");

    let result = products::create_product(&repo, product_form(9_999, "X-1", "Привид"));
    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[test]
fn storefront_lookup_by_slug_resolves_language() {
    let test_db = common::TestDb::new("service_product_by_slug.db");
    let repo = test_db.repo();

    let leaf = categories::create_category(&repo, category_form("Насоси", None))
        .expect("create category");
    let mut form = product_form(leaf.id, "P-7", "Насос циркуляційний");
    form.translations.push(TranslationForm::new(Language::En, "Circulation pump"));
    let product = products::create_product(&repo, form).expect("create product");
    assert_eq!(product.slug, "nasos-cirkulyacijnij");

    let page = products::get_product_by_slug(&repo, &product.slug, Language::En)
        .expect("product page");
    assert_eq!(page.name, "Circulation pump");

    let result = products::get_product_by_slug(&repo, "missing", Language::Uk);
    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[test]
fn delete_category_guard_is_enforced_through_service() {
    let test_db = common::TestDb::new("service_delete_category_guard.db");
    let repo = test_db.repo();

    let leaf = categories::create_category(&repo, category_form("Насоси", None))
        .expect("create category");
    let product = products::create_product(&repo, product_form(leaf.id, "P-1", "Насос"))
        .expect("create product");

    let result = categories::delete_category(&repo, leaf.id);
    assert!(matches!(result, Err(ServiceError::Invariant(_))));

    products::delete_product(&repo, product.id).expect("delete product");
    categories::delete_category(&repo, leaf.id).expect("delete empty category");

    let roots = categories::get_root_categories(&repo).expect("roots");
    assert!(roots.is_empty());
}
