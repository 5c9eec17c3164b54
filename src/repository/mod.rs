use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{NewProduct, Product, ProductPatch};
use crate::domain::types::{CategoryId, CategoryName, ProductId};

pub mod category;
pub mod errors;
pub mod product;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Page selection for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Query parameters used when listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Restrict to products referencing this category.
    pub category_id: Option<CategoryId>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories, ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return the stored record.
    ///
    /// A duplicate name surfaces as [`RepositoryError::Conflict`], decided by
    /// the storage unique constraint at commit, not by a read-then-write
    /// check.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Rename a category and return the updated record.
    fn update_category(&self, id: CategoryId, name: &CategoryName) -> RepositoryResult<Category>;
    /// Delete a category, returning the number of rows removed.
    ///
    /// Dependent products are left untouched; their reference dangles and
    /// reads degrade to an unresolved projection.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products matching the supplied query parameters.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
}

/// Write operations for product entities.
pub trait ProductWriter {
    /// Persist a new product and its gallery, returning the stored record.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Apply a partial update; unspecified fields keep their prior values.
    fn update_product(&self, id: ProductId, patch: &ProductPatch) -> RepositoryResult<Product>;
    /// Delete a product and its gallery, returning the number of rows removed.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize>;
}
