use frostline_catalog::domain::brand::{BrandDescription, NewBrand, UpdateBrand};
use frostline_catalog::domain::category::UpdateCategory;
use frostline_catalog::domain::product::{Availability, NewProduct, ProductDetails, UpdateProduct};
use frostline_catalog::domain::translation::{Language, Translation};
use frostline_catalog::repository::{
    BrandReader, BrandWriter, CategoryReader, CategoryWriter, InvariantViolation, ProductReader,
    ProductWriter, RepositoryError,
};

mod common;

use common::{category, uk};

fn brand(repo: &impl BrandWriter, name: &str) -> i32 {
    repo.create_brand(&NewBrand::new(
        name.to_lowercase(),
        format!("logos/{}.svg", name.to_lowercase()),
        name,
        vec![BrandDescription {
            language: Language::Uk,
            description: format!("{name} опис"),
        }],
    ))
    .unwrap()
    .id
}

fn details(category_id: i32, sku: &str, name: &str) -> ProductDetails {
    ProductDetails {
        category_id,
        sku: sku.to_string(),
        main_image: "img/main.jpg".to_string(),
        gallery: vec!["img/1.jpg".to_string(), "img/2.jpg".to_string()],
        technical_images: vec!["img/scheme.png".to_string()],
        price_cents: 125_000,
        is_discounted: false,
        discount_price_cents: None,
        availability: Availability::InStock,
        translations: uk(name),
    }
}

#[test]
fn test_category_repository_crud() {
    let test_db = common::TestDb::new("test_category_repository_crud.db");
    let repo = test_db.repo();

    let root = category(&repo, "Обладнання", None);
    let child = category(&repo, "Компресори", Some(root.id));

    let roots = repo.list_root_categories().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].id, root.id);
    assert_eq!(roots[0].child_count, 1);
    assert_eq!(roots[0].level, 0);
    assert!(!roots[0].is_end_category);

    let children = repo.list_subcategories(root.id, 0).unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, child.id);
    assert_eq!(children[0].level, 1);
    assert!(children[0].is_end_category);

    let updated = repo
        .update_category(
            child.id,
            &UpdateCategory::new(
                None,
                vec![
                    Translation::new(Language::Uk, "Компресори Bitzer"),
                    Translation::new(Language::En, "Bitzer compressors"),
                ],
            ),
        )
        .unwrap();
    assert_eq!(updated.cascaded, 0);
    assert_eq!(updated.category.translations.len(), 2);
    assert_eq!(updated.category.slug, "kompresori");

    let by_slug = repo.get_category_by_slug("kompresori").unwrap().unwrap();
    assert_eq!(by_slug.id, child.id);

    repo.delete_category(child.id).unwrap();
    assert!(repo.get_category_by_id(child.id).unwrap().is_none());
    assert!(repo.list_subcategories(root.id, 0).unwrap().is_empty());

    let err = repo.delete_category(child.id).unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_colliding_category_names_get_suffixed_slugs() {
    let test_db = common::TestDb::new("test_colliding_category_slugs.db");
    let repo = test_db.repo();

    let slugs: Vec<String> = (0..3)
        .map(|_| category(&repo, "Насоси", None).slug)
        .collect();

    assert_eq!(slugs, vec!["nasosi", "nasosi-2", "nasosi-3"]);
}

#[test]
fn test_brand_change_cascades_to_all_descendants() {
    let test_db = common::TestDb::new("test_brand_cascade.db");
    let repo = test_db.repo();

    let bitzer = brand(&repo, "Bitzer");
    let danfoss = brand(&repo, "Danfoss");

    let a = category(&repo, "A", None);
    let b = category(&repo, "B", Some(a.id));
    let c = category(&repo, "C", Some(b.id));
    let d = category(&repo, "D", Some(c.id));
    let sibling = category(&repo, "Sibling", None);

    repo.update_category(sibling.id, &UpdateCategory::new(Some(bitzer), uk("Sibling")))
        .unwrap();
    let first = repo
        .update_category(a.id, &UpdateCategory::new(Some(bitzer), uk("A")))
        .unwrap();
    assert_eq!(first.cascaded, 3);

    let second = repo
        .update_category(a.id, &UpdateCategory::new(Some(danfoss), uk("A")))
        .unwrap();
    assert_eq!(second.cascaded, 3);
    assert_eq!(second.category.brand_id, Some(danfoss));

    for id in [b.id, c.id, d.id] {
        let stored = repo.get_category_by_id(id).unwrap().unwrap();
        assert_eq!(stored.brand_id, Some(danfoss), "category {id}");
    }

    let untouched = repo.get_category_by_id(sibling.id).unwrap().unwrap();
    assert_eq!(untouched.brand_id, Some(bitzer));

    let nodes = repo.list_subcategories(c.id, 2).unwrap();
    assert_eq!(nodes[0].brand_name, "Danfoss");
}

#[test]
fn test_unchanged_brand_does_not_cascade() {
    let test_db = common::TestDb::new("test_unchanged_brand.db");
    let repo = test_db.repo();

    let bitzer = brand(&repo, "Bitzer");
    let danfoss = brand(&repo, "Danfoss");
    let parent = category(&repo, "Parent", None);
    let child = category(&repo, "Child", Some(parent.id));

    repo.update_category(parent.id, &UpdateCategory::new(Some(bitzer), uk("Parent")))
        .unwrap();
    repo.update_category(child.id, &UpdateCategory::new(Some(danfoss), uk("Child")))
        .unwrap();

    let outcome = repo
        .update_category(parent.id, &UpdateCategory::new(Some(bitzer), uk("Батьківська")))
        .unwrap();

    assert_eq!(outcome.cascaded, 0);
    let child = repo.get_category_by_id(child.id).unwrap().unwrap();
    assert_eq!(child.brand_id, Some(danfoss));
}

#[test]
fn test_delete_rejects_non_empty_categories() {
    let test_db = common::TestDb::new("test_delete_guard.db");
    let repo = test_db.repo();

    let root = category(&repo, "Обладнання", None);
    let leaf = category(&repo, "Компресори", Some(root.id));
    repo.create_product(&NewProduct::new("kompresor", details(leaf.id, "P-1", "Компресор")))
        .unwrap();

    let err = repo.delete_category(root.id).unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Invariant(InvariantViolation::CategoryHasChildren { count: 1 })
    ));

    let err = repo.delete_category(leaf.id).unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Invariant(InvariantViolation::CategoryHasProducts { count: 1 })
    ));

    assert_eq!(repo.list_root_categories().unwrap().len(), 1);
}

#[test]
fn test_move_rejects_cycles_and_keeps_brand() {
    let test_db = common::TestDb::new("test_move_category.db");
    let repo = test_db.repo();

    let bitzer = brand(&repo, "Bitzer");
    let a = category(&repo, "A", None);
    let b = category(&repo, "B", Some(a.id));
    let c = category(&repo, "C", Some(b.id));
    let other = category(&repo, "Other", None);
    repo.update_category(other.id, &UpdateCategory::new(Some(bitzer), uk("Other")))
        .unwrap();

    let err = repo.move_category(a.id, Some(c.id)).unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Invariant(InvariantViolation::CyclicParent)
    ));

    let err = repo.move_category(a.id, Some(a.id)).unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Invariant(InvariantViolation::CyclicParent)
    ));

    let moved = repo.move_category(c.id, Some(other.id)).unwrap();
    assert_eq!(moved.parent_id, Some(other.id));
    assert_eq!(moved.brand_id, None);

    let promoted = repo.move_category(b.id, None).unwrap();
    assert_eq!(promoted.parent_id, None);
    assert_eq!(repo.list_root_categories().unwrap().len(), 3);
}

#[test]
fn test_child_cannot_be_added_under_category_with_products() {
    let test_db = common::TestDb::new("test_parent_holds_products.db");
    let repo = test_db.repo();

    let leaf = category(&repo, "Компресори", None);
    repo.create_product(&NewProduct::new("kompresor", details(leaf.id, "P-1", "Компресор")))
        .unwrap();

    let err = repo
        .create_category(
            &frostline_catalog::domain::category::NewCategory::new("gvinti", uk("Гвинтові"))
                .with_parent_id(leaf.id),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::Invariant(InvariantViolation::ParentHoldsProducts)
    ));
}

#[test]
fn test_product_repository_crud() {
    let test_db = common::TestDb::new("test_product_repository_crud.db");
    let repo = test_db.repo();

    let leaf = category(&repo, "Компресори", None);
    let created = repo
        .create_product(&NewProduct::new("bitzer-4fes", details(leaf.id, "4FES-3Y", "Bitzer 4FES")))
        .unwrap();

    assert_eq!(created.slug, "bitzer-4fes");
    assert_eq!(created.gallery.len(), 2);
    assert_eq!(created.technical_images, vec!["img/scheme.png".to_string()]);

    let nodes = repo.list_category_products(leaf.id, 0).unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].level, 1);
    assert!(nodes[0].is_end_category);

    let mut changes = details(leaf.id, "4FES-3Y", "Bitzer 4FES-3Y");
    changes.is_discounted = true;
    changes.discount_price_cents = Some(99_000);
    changes.availability = Availability::OnOrder;
    let updated = repo
        .update_product(created.id, &UpdateProduct::new(changes))
        .unwrap();

    assert_eq!(updated.slug, "bitzer-4fes");
    assert_eq!(updated.effective_price_cents(), 99_000);
    assert_eq!(updated.availability, Availability::OnOrder);
    assert_eq!(updated.translations[0].name, "Bitzer 4FES-3Y");

    let by_slug = repo.get_product_by_slug("bitzer-4fes").unwrap().unwrap();
    assert_eq!(by_slug.id, created.id);

    repo.delete_product(created.id).unwrap();
    assert!(repo.get_product_by_id(created.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_product(created.id).unwrap_err(),
        RepositoryError::NotFound
    ));
}

#[test]
fn test_update_missing_product_is_not_found() {
    let test_db = common::TestDb::new("test_update_missing_product.db");
    let repo = test_db.repo();
    let leaf = category(&repo, "Компресори", None);

    let err = repo
        .update_product(42, &UpdateProduct::new(details(leaf.id, "P-1", "Насос")))
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_brand_repository_crud() {
    let test_db = common::TestDb::new("test_brand_repository_crud.db");
    let repo = test_db.repo();

    let danfoss = brand(&repo, "Danfoss");
    let bitzer = brand(&repo, "Bitzer");

    let names: Vec<String> = repo
        .list_brands()
        .unwrap()
        .into_iter()
        .map(|brand| brand.name)
        .collect();
    assert_eq!(names, vec!["Bitzer", "Danfoss"]);

    let updated = repo
        .update_brand(
            bitzer,
            &UpdateBrand::new(
                "logos/bitzer-new.svg",
                "Bitzer",
                vec![BrandDescription {
                    language: Language::En,
                    description: "German compressors".to_string(),
                }],
            ),
        )
        .unwrap();
    assert_eq!(updated.logo, "logos/bitzer-new.svg");
    assert_eq!(updated.description(Language::Uk), Some("German compressors"));

    let branded = category(&repo, "Компресори", None);
    repo.update_category(branded.id, &UpdateCategory::new(Some(danfoss), uk("Компресори")))
        .unwrap();

    repo.delete_brand(danfoss).unwrap();
    assert!(repo.get_brand_by_id(danfoss).unwrap().is_none());
    let branded = repo.get_category_by_id(branded.id).unwrap().unwrap();
    assert_eq!(branded.brand_id, None);

    assert!(matches!(
        repo.update_brand(danfoss, &UpdateBrand::new("x.svg", "Gone", Vec::new()))
            .unwrap_err(),
        RepositoryError::NotFound
    ));
}

#[test]
fn test_cascade_brand_reports_affected_descendants() {
    let test_db = common::TestDb::new("test_cascade_brand_direct.db");
    let repo = test_db.repo();

    let bitzer = brand(&repo, "Bitzer");
    let root = category(&repo, "Root", None);
    let child = category(&repo, "Child", Some(root.id));
    category(&repo, "Grandchild", Some(child.id));

    assert_eq!(repo.cascade_brand(root.id, Some(bitzer)).unwrap(), 2);
    assert_eq!(repo.cascade_brand(child.id, None).unwrap(), 1);

    let root = repo.get_category_by_id(root.id).unwrap().unwrap();
    assert_eq!(root.brand_id, None);
    let child = repo.get_category_by_id(child.id).unwrap().unwrap();
    assert_eq!(child.brand_id, Some(bitzer));

    assert!(matches!(
        repo.cascade_brand(9_999, None).unwrap_err(),
        RepositoryError::NotFound
    ));
}
