use emporium_catalog::CatalogError;
use emporium_shared::{ErrorKind, OrderId, ProductId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Order {0} is already checked out")]
    Closed(OrderId),

    #[error("Item not in order: {0}")]
    ItemNotFound(ProductId),

    #[error("Order validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Closed(_) => ErrorKind::OrderClosed,
            OrderError::ItemNotFound(_) => ErrorKind::NotFound,
            OrderError::Validation(_) => ErrorKind::Validation,
            OrderError::Catalog(err) => err.kind(),
        }
    }
}

pub type OrderResult<T> = Result<T, OrderError>;
