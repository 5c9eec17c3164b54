use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::{Category, CategoryProjection};

/// Denormalized category slice joined into product reads.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
}

impl From<CategoryProjection> for CategoryDto {
    fn from(value: CategoryProjection) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
        }
    }
}

/// Full category record as returned by admin listings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRecordDto {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<Category> for CategoryRecordDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            created_at: value.created_at,
        }
    }
}
