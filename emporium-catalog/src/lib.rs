pub mod product;
pub mod registry;

pub use product::{NewProduct, Product};
pub use registry::{CatalogEntry, ProductQuery, ProductRegistry};

use emporium_shared::{ErrorKind, ProductId};

/// Catalog-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Products {left} and {right} are not the same item")]
    LineageMismatch {
        left: ProductId,
        right: ProductId,
    },
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) | CatalogError::LineageMismatch { .. } => ErrorKind::Validation,
            CatalogError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            CatalogError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
