//! Product CRUD operations.
//!
//! A product write never commits against a missing category: the reference
//! is checked through [`CategoryReader`] before the repository is asked to
//! persist anything.

use crate::domain::category::{Category, CategoryRef};
use crate::domain::product::Product;
use crate::domain::types::CategoryId;
use crate::dto::products::ProductDto;
use crate::forms::products::{
    AddProductFormPayload, DeleteProductFormPayload, UpdateProductFormPayload,
};
use crate::repository::{CategoryReader, ProductReader, ProductWriter};

use super::{ServiceError, ServiceResult};

/// Confirms the referenced category exists; a miss is a validation failure
/// on the `category` field, not a not-found on the whole operation.
fn require_category<R>(category_id: CategoryId, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::Validation {
            field: "category".to_string(),
            reason: format!("category {category_id} does not exist"),
        }),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(e.into())
        }
    }
}

fn resolve_with(product: Product, category: Category) -> Product {
    Product {
        category: CategoryRef::Resolved(category.into()),
        ..product
    }
}

pub fn create_product<R>(payload: AddProductFormPayload, repo: &R) -> ServiceResult<ProductDto>
where
    R: ProductWriter + CategoryReader,
{
    let category = require_category(payload.category_id, repo)?;

    match repo.create_product(&payload.into_new_product()) {
        Ok(product) => Ok(resolve_with(product, category).into()),
        Err(e) => {
            log::error!("Failed to create product: {e}");
            Err(e.into())
        }
    }
}

pub fn update_product<R>(payload: UpdateProductFormPayload, repo: &R) -> ServiceResult<ProductDto>
where
    R: ProductReader + ProductWriter + CategoryReader,
{
    match repo.get_product_by_id(payload.product_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(ServiceError::NotFound(format!(
                "product {}",
                payload.product_id
            )));
        }
        Err(e) => {
            log::error!("Failed to get product: {e}");
            return Err(e.into());
        }
    }

    if let Some(category_id) = payload.patch.category_id {
        require_category(category_id, repo)?;
    }

    let product = match repo.update_product(payload.product_id, &payload.patch) {
        Ok(product) => product,
        Err(e) => {
            log::error!("Failed to update product: {e}");
            return Err(e.into());
        }
    };

    // Resolve for the response; a vanished category degrades to None.
    let category = match repo.get_category_by_id(product.category.id()) {
        Ok(category) => category,
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(e.into());
        }
    };

    Ok(match category {
        Some(category) => resolve_with(product, category).into(),
        None => product.into(),
    })
}

pub fn delete_product<R>(payload: DeleteProductFormPayload, repo: &R) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter,
{
    match repo.get_product_by_id(payload.product_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(ServiceError::NotFound(format!(
                "product {}",
                payload.product_id
            )));
        }
        Err(e) => {
            log::error!("Failed to get product: {e}");
            return Err(e.into());
        }
    }

    match repo.delete_product(payload.product_id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete product: {e}");
            Err(e.into())
        }
    }
}
