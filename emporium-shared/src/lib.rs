pub mod ids;
pub mod money;
pub mod error;
pub mod text;

pub use ids::{OrderId, ProductId};
pub use money::Money;
pub use error::ErrorKind;
