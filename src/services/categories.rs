//! Category CRUD operations.
//!
//! The admin-role check happens in the transport layer before these are
//! invoked; payloads arrive already validated by the forms layer.

use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryRecordDto;
use crate::forms::categories::{
    AddCategoryFormPayload, DeleteCategoryFormPayload, UpdateCategoryFormPayload,
};
use crate::repository::{CategoryReader, CategoryWriter, RepositoryError};

use super::{ServiceError, ServiceResult};

pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryRecordDto>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories.into_iter().map(CategoryRecordDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(e.into())
        }
    }
}

pub fn get_category<R>(category_id: CategoryId, repo: &R) -> ServiceResult<CategoryRecordDto>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(category.into()),
        Ok(None) => Err(ServiceError::NotFound(format!("category {category_id}"))),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(e.into())
        }
    }
}

pub fn create_category<R>(
    payload: AddCategoryFormPayload,
    repo: &R,
) -> ServiceResult<CategoryRecordDto>
where
    R: CategoryWriter,
{
    match repo.create_category(&payload.into_new_category()) {
        Ok(category) => Ok(category.into()),
        Err(e) => {
            if !matches!(e, RepositoryError::Conflict { .. }) {
                log::error!("Failed to create category: {e}");
            }
            Err(e.into())
        }
    }
}

pub fn update_category<R>(
    payload: UpdateCategoryFormPayload,
    repo: &R,
) -> ServiceResult<CategoryRecordDto>
where
    R: CategoryReader + CategoryWriter,
{
    match repo.get_category_by_id(payload.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(ServiceError::NotFound(format!(
                "category {}",
                payload.category_id
            )));
        }
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(e.into());
        }
    }

    match repo.update_category(payload.category_id, &payload.name) {
        Ok(category) => Ok(category.into()),
        Err(e) => {
            if !matches!(e, RepositoryError::Conflict { .. }) {
                log::error!("Failed to update category: {e}");
            }
            Err(e.into())
        }
    }
}

/// Deletes a category.
///
/// No dependent-product check is made: products keep their category id and
/// the read side falls back to an unresolved projection.
pub fn delete_category<R>(payload: DeleteCategoryFormPayload, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    match repo.get_category_by_id(payload.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(ServiceError::NotFound(format!(
                "category {}",
                payload.category_id
            )));
        }
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(e.into());
        }
    }

    match repo.delete_category(payload.category_id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::categories::{AddCategoryForm, DeleteCategoryForm, UpdateCategoryForm};
    use crate::repository::test::TestRepository;

    fn payload(name: &str) -> AddCategoryFormPayload {
        AddCategoryForm {
            name: name.to_string(),
        }
        .try_into()
        .unwrap()
    }

    #[test]
    fn duplicate_name_yields_one_success_one_conflict() {
        let repo = TestRepository::new();

        let first = create_category(payload("Electronics"), &repo).unwrap();
        assert_eq!(first.name, "Electronics");

        let err = create_category(payload("Electronics"), &repo).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Conflict {
                field: "name".to_string(),
                value: "Electronics".to_string(),
            }
        );

        assert_eq!(list_categories(&repo).unwrap().len(), 1);
    }

    #[test]
    fn update_rejects_name_collision_with_other_record() {
        let repo = TestRepository::new();
        create_category(payload("Electronics"), &repo).unwrap();
        let books = create_category(payload("Books"), &repo).unwrap();

        let update = UpdateCategoryForm {
            category_id: books.id,
            name: "Electronics".to_string(),
        };
        let err = update_category(update.try_into().unwrap(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict { .. }));
    }

    #[test]
    fn update_allows_keeping_own_name() {
        let repo = TestRepository::new();
        let created = create_category(payload("Books"), &repo).unwrap();

        let update = UpdateCategoryForm {
            category_id: created.id,
            name: "Books".to_string(),
        };
        let updated = update_category(update.try_into().unwrap(), &repo).unwrap();
        assert_eq!(updated.name, "Books");
    }

    #[test]
    fn update_missing_category_is_not_found() {
        let repo = TestRepository::new();
        let update = UpdateCategoryForm {
            category_id: 42,
            name: "Books".to_string(),
        };
        let err = update_category(update.try_into().unwrap(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn get_missing_category_is_not_found() {
        let repo = TestRepository::new();
        let err = get_category(CategoryId::new(8).unwrap(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let created = create_category(payload("Books"), &repo).unwrap();
        let fetched = get_category(CategoryId::new(created.id).unwrap(), &repo).unwrap();
        assert_eq!(fetched.name, "Books");
    }

    #[test]
    fn delete_missing_category_is_not_found() {
        let repo = TestRepository::new();
        let delete = DeleteCategoryForm { category_id: 42 };
        let err = delete_category(delete.try_into().unwrap(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
