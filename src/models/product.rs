use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::CategoryRef;
use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductPatch,
};
use crate::domain::types::{
    ImageSource, ProductDescription, ProductName, ProductPrice, Rating, ReviewCount, StockCount,
    TypeConstraintError,
};

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub image: String,
    pub description: Option<String>,
    pub count_in_stock: Option<i32>,
    pub rating: Option<f64>,
    pub num_reviews: Option<i32>,
    pub category_id: i32,
    pub created_at: NaiveDateTime,
}

impl Product {
    /// Converts a row plus its gallery urls into a domain [`Product`].
    ///
    /// The category reference comes back in `Id` form; resolution is the
    /// catalog query service's job.
    pub fn into_domain(self, images: Vec<String>) -> Result<DomainProduct, TypeConstraintError> {
        let images = images
            .into_iter()
            .map(ImageSource::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DomainProduct {
            id: self.id.try_into()?,
            name: ProductName::new(self.name)?,
            // Stored rows passed the floor on write; re-check against the
            // absolute floor only, not the current config.
            price: ProductPrice::with_floor(self.price, 0)?,
            image: ImageSource::new(self.image)?,
            images,
            category: CategoryRef::Id(self.category_id.try_into()?),
            description: self.description.map(ProductDescription::new).transpose()?,
            count_in_stock: self.count_in_stock.map(StockCount::new).transpose()?,
            rating: self.rating.map(Rating::new).transpose()?,
            num_reviews: self.num_reviews.map(ReviewCount::new).transpose()?,
            created_at: self.created_at,
        })
    }
}

/// Insertable form of [`Product`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub image: String,
    pub description: Option<String>,
    pub count_in_stock: Option<i32>,
    pub rating: Option<f64>,
    pub num_reviews: Option<i32>,
    pub category_id: i32,
    pub created_at: NaiveDateTime,
}

impl From<DomainNewProduct> for NewProduct {
    fn from(product: DomainNewProduct) -> Self {
        Self {
            name: product.name.into_inner(),
            price: product.price.get(),
            image: product.image.into_inner(),
            description: product.description.map(ProductDescription::into_inner),
            count_in_stock: product.count_in_stock.map(StockCount::get),
            rating: product.rating.map(Rating::get),
            num_reviews: product.num_reviews.map(ReviewCount::get),
            category_id: product.category_id.get(),
            created_at: product.created_at,
        }
    }
}

/// Changeset for partial product updates; `None` fields are left untouched.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct ProductChangeset {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub count_in_stock: Option<i32>,
    pub rating: Option<f64>,
    pub num_reviews: Option<i32>,
    pub category_id: Option<i32>,
}

impl ProductChangeset {
    /// True when the changeset would set no column.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.description.is_none()
            && self.count_in_stock.is_none()
            && self.rating.is_none()
            && self.num_reviews.is_none()
            && self.category_id.is_none()
    }
}

impl From<&ProductPatch> for ProductChangeset {
    fn from(patch: &ProductPatch) -> Self {
        Self {
            name: patch.name.clone().map(ProductName::into_inner),
            price: patch.price.map(ProductPrice::get),
            image: patch.image.clone().map(ImageSource::into_inner),
            description: patch
                .description
                .clone()
                .map(ProductDescription::into_inner),
            count_in_stock: patch.count_in_stock.map(StockCount::get),
            rating: patch.rating.map(Rating::get),
            num_reviews: patch.num_reviews.map(ReviewCount::get),
            category_id: patch.category_id.map(|id| id.get()),
        }
    }
}
