use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryId, CategoryName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub name: CategoryName,
}

impl AddCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            name: self.name,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = FormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: CategoryName::new(value.name)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryFormPayload {
    pub category_id: CategoryId,
    pub name: CategoryName,
}

impl TryFrom<UpdateCategoryForm> for UpdateCategoryFormPayload {
    type Error = FormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            name: CategoryName::new(value.name)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCategoryFormPayload {
    pub category_id: CategoryId,
}

impl TryFrom<DeleteCategoryForm> for DeleteCategoryFormPayload {
    type Error = FormError;

    fn try_from(value: DeleteCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
        })
    }
}
