use crate::domain::types::DEFAULT_MIN_PRICE;

/// Configuration options for the catalog core.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Minimum accepted product price, in minor currency units.
    pub min_price: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            min_price: DEFAULT_MIN_PRICE,
        }
    }
}
