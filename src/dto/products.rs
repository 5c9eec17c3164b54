use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::CategoryRef;
use crate::domain::product::Product;
use crate::domain::types::{
    ImageSource, ProductDescription, Rating, ReviewCount, StockCount,
};
use crate::dto::categories::CategoryDto;

/// Product representation returned to callers, with the category reference
/// denormalized into `{id, name}`. `category: None` means the referenced
/// category no longer exists (degraded read, not an error).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub image: String,
    pub images: Vec<String>,
    pub category: Option<CategoryDto>,
    pub description: Option<String>,
    pub count_in_stock: Option<i32>,
    pub rating: Option<f64>,
    pub num_reviews: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        let category = match value.category {
            CategoryRef::Id(_) => None,
            CategoryRef::Resolved(projection) => Some(projection.into()),
        };

        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            price: value.price.get(),
            image: value.image.into_inner(),
            images: value.images.into_iter().map(ImageSource::into_inner).collect(),
            category,
            description: value.description.map(ProductDescription::into_inner),
            count_in_stock: value.count_in_stock.map(StockCount::get),
            rating: value.rating.map(Rating::get),
            num_reviews: value.num_reviews.map(ReviewCount::get),
            created_at: value.created_at,
        }
    }
}
