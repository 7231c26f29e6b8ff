pub mod session;
pub mod shop;
pub mod views;

pub use session::{CustomerSession, SessionState};
pub use shop::Shop;
pub use views::{CartRow, CartView, CatalogRow, CatalogView};

use emporium_catalog::CatalogError;
use emporium_order::OrderError;
use emporium_shared::ErrorKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShopError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No active session for customer: {0}")]
    CustomerNotFound(String),

    #[error("{0} has no completed order")]
    NoCompletedOrder(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl ShopError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShopError::Validation(_) => ErrorKind::Validation,
            ShopError::CustomerNotFound(_) | ShopError::NoCompletedOrder(_) => ErrorKind::NotFound,
            ShopError::Catalog(err) => err.kind(),
            ShopError::Order(err) => err.kind(),
        }
    }
}

pub type ShopResult<T> = Result<T, ShopError>;
