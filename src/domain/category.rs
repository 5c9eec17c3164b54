use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName};

/// Canonical category record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub created_at: NaiveDateTime,
}

/// The `{id, name}` slice of a category joined into product reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryProjection {
    pub id: CategoryId,
    pub name: CategoryName,
}

impl From<Category> for CategoryProjection {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

/// A product's reference to its category.
///
/// Everything below the catalog query service only ever handles the `Id`
/// form; the query service upgrades it to `Resolved` on read. A reference
/// left as `Id` after resolution means the category no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CategoryRef {
    Id(CategoryId),
    Resolved(CategoryProjection),
}

impl CategoryRef {
    /// The referenced category id, resolved or not.
    pub fn id(&self) -> CategoryId {
        match self {
            Self::Id(id) => *id,
            Self::Resolved(projection) => projection.id,
        }
    }

    /// The resolved projection, if the category existed at read time.
    pub fn projection(&self) -> Option<&CategoryProjection> {
        match self {
            Self::Id(_) => None,
            Self::Resolved(projection) => Some(projection),
        }
    }
}
