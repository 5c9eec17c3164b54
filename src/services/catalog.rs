//! Read-side catalog queries.
//!
//! These join products with their categories without duplicating write-side
//! validation. They never produce a conflict, and a reference to a deleted
//! category degrades to an unresolved projection instead of failing the
//! read.

use std::collections::HashMap;

use crate::domain::category::{CategoryProjection, CategoryRef};
use crate::domain::product::Product;
use crate::domain::types::{CategoryId, CategoryName, ProductId};
use crate::dto::products::ProductDto;
use crate::repository::{CategoryReader, Pagination, ProductListQuery, ProductReader};

use super::{ServiceError, ServiceResult};

fn resolve(product: Product, names: &HashMap<CategoryId, CategoryName>) -> Product {
    match &product.category {
        CategoryRef::Id(id) => match names.get(id) {
            Some(name) => Product {
                category: CategoryRef::Resolved(CategoryProjection {
                    id: *id,
                    name: name.clone(),
                }),
                ..product
            },
            // Orphaned reference: leave unresolved, the read still succeeds.
            None => product,
        },
        CategoryRef::Resolved(_) => product,
    }
}

fn category_names<R>(repo: &R) -> ServiceResult<HashMap<CategoryId, CategoryName>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories.into_iter().map(|c| (c.id, c.name)).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(e.into())
        }
    }
}

/// Fetches one product with its category joined in.
pub fn get_product_with_category<R>(product_id: ProductId, repo: &R) -> ServiceResult<ProductDto>
where
    R: ProductReader + CategoryReader,
{
    let product = match repo.get_product_by_id(product_id) {
        Ok(Some(product)) => product,
        Ok(None) => return Err(ServiceError::NotFound(format!("product {product_id}"))),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            return Err(e.into());
        }
    };

    let category = match repo.get_category_by_id(product.category.id()) {
        Ok(category) => category,
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(e.into());
        }
    };

    let product = match category {
        Some(category) => Product {
            category: CategoryRef::Resolved(category.into()),
            ..product
        },
        None => product,
    };

    Ok(product.into())
}

/// Lists every product paired with its resolved category projection.
///
/// Iteration order is storage order; callers must not rely on it.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<ProductDto>>
where
    R: ProductReader + CategoryReader,
{
    let names = category_names(repo)?;

    match repo.list_products(ProductListQuery::default()) {
        Ok((_total, products)) => Ok(products
            .into_iter()
            .map(|p| resolve(p, &names).into())
            .collect()),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Err(e.into())
        }
    }
}

/// Lists one page of products, each with its resolved category projection.
///
/// Returns the total match count alongside the page so callers can render
/// page controls.
pub fn list_products_page<R>(
    pagination: Pagination,
    repo: &R,
) -> ServiceResult<(usize, Vec<ProductDto>)>
where
    R: ProductReader + CategoryReader,
{
    let names = category_names(repo)?;

    let query = ProductListQuery::default().paginate(pagination.page, pagination.per_page);
    match repo.list_products(query) {
        Ok((total, products)) => Ok((
            total,
            products
                .into_iter()
                .map(|p| resolve(p, &names).into())
                .collect(),
        )),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Err(e.into())
        }
    }
}

/// Lists products referencing `category_id`.
///
/// The category itself is not required to exist; an unknown id yields an
/// empty sequence.
pub fn list_products_by_category<R>(
    category_id: CategoryId,
    repo: &R,
) -> ServiceResult<Vec<ProductDto>>
where
    R: ProductReader + CategoryReader,
{
    let names = category_names(repo)?;

    match repo.list_products(ProductListQuery::default().category(category_id)) {
        Ok((_total, products)) => Ok(products
            .into_iter()
            .map(|p| resolve(p, &names).into())
            .collect()),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::categories::{AddCategoryForm, AddCategoryFormPayload, DeleteCategoryForm};
    use crate::forms::products::AddProductForm;
    use crate::models::config::CatalogConfig;
    use crate::repository::CategoryWriter;
    use crate::repository::test::TestRepository;
    use crate::services::{categories, products};

    fn seed_category(repo: &TestRepository, name: &str) -> i32 {
        let payload: AddCategoryFormPayload = AddCategoryForm {
            name: name.to_string(),
        }
        .try_into()
        .unwrap();
        repo.create_category(&payload.into_new_category())
            .unwrap()
            .id
            .get()
    }

    fn seed_product(repo: &TestRepository, name: &str, category_id: i32) -> i32 {
        let form = AddProductForm {
            name: name.to_string(),
            price: 1500,
            image: "x.png".to_string(),
            images: vec![],
            category_id,
            description: None,
            count_in_stock: None,
            rating: None,
            num_reviews: None,
        };
        products::create_product(
            form.into_payload(&CatalogConfig::default()).unwrap(),
            repo,
        )
        .unwrap()
        .id
    }

    #[test]
    fn get_product_joins_category_name() {
        let repo = TestRepository::new();
        let category_id = seed_category(&repo, "Electronics");
        let product_id = seed_product(&repo, "Phone", category_id);

        let dto =
            get_product_with_category(ProductId::new(product_id).unwrap(), &repo).unwrap();
        let category = dto.category.unwrap();
        assert_eq!(category.id, category_id);
        assert_eq!(category.name, "Electronics");
    }

    #[test]
    fn get_missing_product_is_not_found() {
        let repo = TestRepository::new();
        let err = get_product_with_category(ProductId::new(7).unwrap(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn orphaned_reference_degrades_to_placeholder() {
        let repo = TestRepository::new();
        let category_id = seed_category(&repo, "Electronics");
        let product_id = seed_product(&repo, "Phone", category_id);

        categories::delete_category(
            DeleteCategoryForm { category_id }.try_into().unwrap(),
            &repo,
        )
        .unwrap();

        let dto =
            get_product_with_category(ProductId::new(product_id).unwrap(), &repo).unwrap();
        assert!(dto.category.is_none());
        assert_eq!(dto.name, "Phone");
    }

    #[test]
    fn list_by_category_with_no_products_is_empty() {
        let repo = TestRepository::new();
        let category_id = seed_category(&repo, "Empty");

        let items =
            list_products_by_category(CategoryId::new(category_id).unwrap(), &repo).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn list_by_category_ignores_unknown_category() {
        let repo = TestRepository::new();
        let items = list_products_by_category(CategoryId::new(404).unwrap(), &repo).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn paged_listing_reports_full_total() {
        let repo = TestRepository::new();
        let category_id = seed_category(&repo, "Electronics");
        for i in 0..5 {
            seed_product(&repo, &format!("Item {i}"), category_id);
        }

        let (total, items) = list_products_page(
            Pagination {
                page: 2,
                per_page: 2,
            },
            &repo,
        )
        .unwrap();
        assert_eq!(total, 5);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Item 2");
        assert!(items.iter().all(|p| p.category.is_some()));
    }

    #[test]
    fn list_filters_on_exact_category() {
        let repo = TestRepository::new();
        let electronics = seed_category(&repo, "Electronics");
        let books = seed_category(&repo, "Books");
        seed_product(&repo, "Phone", electronics);
        seed_product(&repo, "Novel", books);

        let items =
            list_products_by_category(CategoryId::new(electronics).unwrap(), &repo).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Phone");

        let all = list_products(&repo).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|p| p.category.is_some()));
    }
}
