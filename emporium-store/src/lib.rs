pub mod app_config;
pub mod seed;

pub use app_config::Config;
pub use seed::{bootstrap, SeedError};
