use chrono::Utc;
use storefront_catalog::domain::category::NewCategory;
use storefront_catalog::domain::product::{NewProduct, ProductPatch};
use storefront_catalog::domain::types::{
    CategoryId, CategoryName, ImageSource, ProductId, ProductName, ProductPrice,
};
use storefront_catalog::repository::{
    CategoryReader, CategoryWriter, DieselRepository, ProductListQuery, ProductReader,
    ProductWriter, RepositoryError,
};

mod common;

#[test]
fn pool_shares_one_catalog_across_clones() {
    let catalog = common::TestCatalog::new();

    catalog
        .repo()
        .create_category(&new_category("Electronics"))
        .expect("migrated schema should accept writes");

    // A second repository over a cloned pool sees the same database.
    let second = DieselRepository::new(catalog.pool());
    assert_eq!(second.list_categories().unwrap().len(), 1);
}

fn new_category(name: &str) -> NewCategory {
    NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        created_at: Utc::now().naive_utc(),
    }
}

fn new_product(name: &str, category_id: CategoryId) -> NewProduct {
    NewProduct {
        name: ProductName::new(name).expect("valid product name"),
        price: ProductPrice::new(1500).expect("valid price"),
        image: ImageSource::new("x.png").expect("valid image"),
        images: vec![
            ImageSource::new("a.png").unwrap(),
            ImageSource::new("b.png").unwrap(),
        ],
        category_id,
        description: None,
        count_in_stock: None,
        rating: None,
        num_reviews: None,
        created_at: Utc::now().naive_utc(),
    }
}

#[test]
fn duplicate_category_name_conflicts_at_commit() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    let created = repo
        .create_category(&new_category("Electronics"))
        .expect("first create should succeed");
    assert_eq!(created.name.as_str(), "Electronics");

    let err = repo
        .create_category(&new_category("Electronics"))
        .expect_err("second create should conflict");
    match err {
        RepositoryError::Conflict { field, value } => {
            assert_eq!(field, "name");
            assert_eq!(value, "Electronics");
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    let categories = repo.list_categories().expect("should list categories");
    assert_eq!(categories.len(), 1);
}

#[test]
fn uniqueness_is_case_sensitive() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    repo.create_category(&new_category("Electronics")).unwrap();
    repo.create_category(&new_category("electronics"))
        .expect("different case is a different name");
}

#[test]
fn rename_to_existing_name_conflicts() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    repo.create_category(&new_category("Electronics")).unwrap();
    let books = repo.create_category(&new_category("Books")).unwrap();

    let err = repo
        .update_category(books.id, &CategoryName::new("Electronics").unwrap())
        .expect_err("rename should conflict");
    assert!(matches!(err, RepositoryError::Conflict { .. }));

    // Keeping its own name is not a collision.
    let kept = repo
        .update_category(books.id, &CategoryName::new("Books").unwrap())
        .expect("own name should be allowed");
    assert_eq!(kept.name.as_str(), "Books");
}

#[test]
fn update_missing_category_is_not_found() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    let err = repo
        .update_category(
            CategoryId::new(42).unwrap(),
            &CategoryName::new("Books").unwrap(),
        )
        .expect_err("missing id should fail");
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[test]
fn delete_category_reports_affected_rows() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    let created = repo.create_category(&new_category("Electronics")).unwrap();
    assert_eq!(repo.delete_category(created.id).unwrap(), 1);
    assert_eq!(repo.delete_category(created.id).unwrap(), 0);
}

#[test]
fn product_round_trips_with_ordered_gallery() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    let category = repo.create_category(&new_category("Electronics")).unwrap();
    let created = repo
        .create_product(&new_product("Phone", category.id))
        .expect("should create product");

    let fetched = repo
        .get_product_by_id(created.id)
        .expect("should fetch")
        .expect("product should exist");
    assert_eq!(fetched.name.as_str(), "Phone");
    assert_eq!(fetched.price, 1500);
    assert_eq!(fetched.category.id(), category.id);
    let gallery: Vec<&str> = fetched.images.iter().map(|i| i.as_str()).collect();
    assert_eq!(gallery, vec!["a.png", "b.png"]);
}

#[test]
fn partial_update_leaves_other_fields_unchanged() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    let category = repo.create_category(&new_category("Electronics")).unwrap();
    let created = repo
        .create_product(&new_product("Phone", category.id))
        .unwrap();

    let patch = ProductPatch {
        price: Some(ProductPrice::new(2000).unwrap()),
        ..ProductPatch::default()
    };
    let updated = repo.update_product(created.id, &patch).unwrap();

    assert_eq!(updated.price, 2000);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.image, created.image);
    assert_eq!(updated.images, created.images);
    assert_eq!(updated.category.id(), category.id);
    assert_eq!(updated.created_at, created.created_at);
}

#[test]
fn update_replaces_gallery_when_supplied() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    let category = repo.create_category(&new_category("Electronics")).unwrap();
    let created = repo
        .create_product(&new_product("Phone", category.id))
        .unwrap();

    let patch = ProductPatch {
        images: Some(vec![ImageSource::new("c.png").unwrap()]),
        ..ProductPatch::default()
    };
    let updated = repo.update_product(created.id, &patch).unwrap();
    let gallery: Vec<&str> = updated.images.iter().map(|i| i.as_str()).collect();
    assert_eq!(gallery, vec!["c.png"]);
}

#[test]
fn update_missing_product_is_not_found() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    let err = repo
        .update_product(ProductId::new(9).unwrap(), &ProductPatch::default())
        .expect_err("missing id should fail");
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[test]
fn failed_update_commits_no_gallery_rows() {
    use diesel::prelude::*;
    use storefront_catalog::schema::product_images;

    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    let patch = ProductPatch {
        images: Some(vec![ImageSource::new("ghost.png").unwrap()]),
        ..ProductPatch::default()
    };
    let err = repo
        .update_product(ProductId::new(77).unwrap(), &patch)
        .expect_err("missing id should fail");
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    // The gallery write must roll back with the rest of the transaction.
    let mut conn = catalog.pool().get().unwrap();
    let rows: i64 = product_images::table.count().get_result(&mut conn).unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn delete_product_removes_gallery_rows() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    let category = repo.create_category(&new_category("Electronics")).unwrap();
    let created = repo
        .create_product(&new_product("Phone", category.id))
        .unwrap();

    assert_eq!(repo.delete_product(created.id).unwrap(), 1);
    assert!(repo.get_product_by_id(created.id).unwrap().is_none());
    assert_eq!(repo.delete_product(created.id).unwrap(), 0);
}

#[test]
fn list_products_filters_by_category() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    let electronics = repo.create_category(&new_category("Electronics")).unwrap();
    let books = repo.create_category(&new_category("Books")).unwrap();
    repo.create_product(&new_product("Phone", electronics.id))
        .unwrap();
    repo.create_product(&new_product("Novel", books.id)).unwrap();

    let (total, items) = repo
        .list_products(ProductListQuery::default().category(electronics.id))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name.as_str(), "Phone");

    let (total, items) = repo
        .list_products(ProductListQuery::default().category(CategoryId::new(404).unwrap()))
        .unwrap();
    assert_eq!(total, 0);
    assert!(items.is_empty());
}

#[test]
fn list_products_paginates_while_reporting_full_total() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    let category = repo.create_category(&new_category("Electronics")).unwrap();
    for i in 0..5 {
        repo.create_product(&new_product(&format!("Item {i}"), category.id))
            .unwrap();
    }

    let (total, items) = repo
        .list_products(ProductListQuery::default().paginate(2, 2))
        .unwrap();
    assert_eq!(total, 5);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name.as_str(), "Item 2");
}

#[test]
fn category_delete_leaves_products_behind() {
    let catalog = common::TestCatalog::new();
    let repo = catalog.repo();

    let category = repo.create_category(&new_category("Electronics")).unwrap();
    let product = repo
        .create_product(&new_product("Phone", category.id))
        .unwrap();

    repo.delete_category(category.id).unwrap();

    let fetched = repo
        .get_product_by_id(product.id)
        .unwrap()
        .expect("product should survive category deletion");
    assert_eq!(fetched.category.id(), category.id);
    assert!(fetched.category.projection().is_none());
}
