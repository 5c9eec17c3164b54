use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, ProductPatch};
use crate::domain::types::{
    CategoryId, ImageSource, MAX_GALLERY_IMAGES, ProductDescription, ProductId, ProductName,
    ProductPrice, Rating, ReviewCount, StockCount, TypeConstraintError,
};
use crate::forms::FormError;
use crate::models::config::CatalogConfig;

fn gallery_from(
    urls: Vec<String>,
) -> Result<Vec<ImageSource>, TypeConstraintError> {
    if urls.len() > MAX_GALLERY_IMAGES {
        return Err(TypeConstraintError::TooMany("images", MAX_GALLERY_IMAGES));
    }
    urls.into_iter().map(ImageSource::new).collect()
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub price: i64,
    #[validate(length(min = 1))]
    pub image: String,
    #[serde(default)]
    #[validate(length(max = 5))]
    pub images: Vec<String>,
    #[validate(range(min = 1))]
    pub category_id: i32,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub count_in_stock: Option<i32>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    #[validate(range(min = 0))]
    pub num_reviews: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddProductFormPayload {
    pub name: ProductName,
    pub price: ProductPrice,
    pub image: ImageSource,
    pub images: Vec<ImageSource>,
    pub category_id: CategoryId,
    pub description: Option<ProductDescription>,
    pub count_in_stock: Option<StockCount>,
    pub rating: Option<Rating>,
    pub num_reviews: Option<ReviewCount>,
}

impl AddProductForm {
    /// Validates the form against `config` and builds the typed payload.
    ///
    /// The price floor is configuration, so this conversion takes it as an
    /// argument instead of implementing `TryFrom`.
    pub fn into_payload(self, config: &CatalogConfig) -> Result<AddProductFormPayload, FormError> {
        self.validate()?;
        Ok(AddProductFormPayload {
            name: ProductName::new(self.name)?,
            price: ProductPrice::with_floor(self.price, config.min_price)?,
            image: ImageSource::new(self.image)?,
            images: gallery_from(self.images)?,
            category_id: CategoryId::new(self.category_id)?,
            description: self.description.map(ProductDescription::new).transpose()?,
            count_in_stock: self.count_in_stock.map(StockCount::new).transpose()?,
            rating: self.rating.map(Rating::new).transpose()?,
            num_reviews: self.num_reviews.map(ReviewCount::new).transpose()?,
        })
    }
}

impl AddProductFormPayload {
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            price: self.price,
            image: self.image,
            images: self.images,
            category_id: self.category_id,
            description: self.description,
            count_in_stock: self.count_in_stock,
            rating: self.rating,
            num_reviews: self.num_reviews,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductForm {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub price: Option<i64>,
    #[validate(length(min = 1))]
    pub image: Option<String>,
    #[validate(length(max = 5))]
    pub images: Option<Vec<String>>,
    #[validate(range(min = 1))]
    pub category_id: Option<i32>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub count_in_stock: Option<i32>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    #[validate(range(min = 0))]
    pub num_reviews: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProductFormPayload {
    pub product_id: ProductId,
    pub patch: ProductPatch,
}

impl UpdateProductForm {
    /// Validates supplied fields under the same rules as creation.
    pub fn into_payload(
        self,
        config: &CatalogConfig,
    ) -> Result<UpdateProductFormPayload, FormError> {
        self.validate()?;
        Ok(UpdateProductFormPayload {
            product_id: ProductId::new(self.product_id)?,
            patch: ProductPatch {
                name: self.name.map(ProductName::new).transpose()?,
                price: self
                    .price
                    .map(|p| ProductPrice::with_floor(p, config.min_price))
                    .transpose()?,
                image: self.image.map(ImageSource::new).transpose()?,
                images: self.images.map(gallery_from).transpose()?,
                category_id: self.category_id.map(CategoryId::new).transpose()?,
                description: self.description.map(ProductDescription::new).transpose()?,
                count_in_stock: self.count_in_stock.map(StockCount::new).transpose()?,
                rating: self.rating.map(Rating::new).transpose()?,
                num_reviews: self.num_reviews.map(ReviewCount::new).transpose()?,
            },
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteProductForm {
    #[validate(range(min = 1))]
    pub product_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteProductFormPayload {
    pub product_id: ProductId,
}

impl TryFrom<DeleteProductForm> for DeleteProductFormPayload {
    type Error = FormError;

    fn try_from(value: DeleteProductForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            product_id: ProductId::new(value.product_id)?,
        })
    }
}
