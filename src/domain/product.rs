use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::CategoryRef;
use crate::domain::types::{
    CategoryId, ImageSource, ProductDescription, ProductId, ProductName, ProductPrice, Rating,
    ReviewCount, StockCount,
};

/// A product in the storefront catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub price: ProductPrice,
    /// Primary image shown on listing pages.
    pub image: ImageSource,
    /// Ordered secondary gallery, at most five entries.
    pub images: Vec<ImageSource>,
    pub category: CategoryRef,
    pub description: Option<ProductDescription>,
    pub count_in_stock: Option<StockCount>,
    pub rating: Option<Rating>,
    pub num_reviews: Option<ReviewCount>,
    pub created_at: NaiveDateTime,
}

/// Information required to create a new [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub price: ProductPrice,
    pub image: ImageSource,
    pub images: Vec<ImageSource>,
    pub category_id: CategoryId,
    pub description: Option<ProductDescription>,
    pub count_in_stock: Option<StockCount>,
    pub rating: Option<Rating>,
    pub num_reviews: Option<ReviewCount>,
    pub created_at: NaiveDateTime,
}

/// Partial update for a [`Product`]; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductPatch {
    pub name: Option<ProductName>,
    pub price: Option<ProductPrice>,
    pub image: Option<ImageSource>,
    pub images: Option<Vec<ImageSource>>,
    pub category_id: Option<CategoryId>,
    pub description: Option<ProductDescription>,
    pub count_in_stock: Option<StockCount>,
    pub rating: Option<Rating>,
    pub num_reviews: Option<ReviewCount>,
}

impl ProductPatch {
    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.images.is_none()
            && self.category_id.is_none()
            && self.description.is_none()
            && self.count_in_stock.is_none()
            && self.rating.is_none()
            && self.num_reviews.is_none()
    }
}
