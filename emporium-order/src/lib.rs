pub mod models;
pub mod changes;
pub mod checkout;
pub mod error;

pub use models::{Order, OrderStatus};
pub use error::{OrderError, OrderResult};
