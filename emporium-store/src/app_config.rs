use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use emporium_catalog::NewProduct;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is not set
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

fn default_filter() -> String {
    "emporium_app=info,emporium_core=info,emporium_order=info,emporium_catalog=info".into()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub customer_name: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Products registered at startup
    #[serde(default)]
    pub products: Vec<NewProduct>,
    /// Optional JSON file holding more products, as an array of `NewProduct`
    pub seed_file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the files in `dir`, then the environment.
    ///
    /// Later sources override earlier ones:
    /// `default` → `{RUN_MODE}` (optional) → `local` (optional) → `EMPORIUM__*` variables.
    pub fn load_from(dir: &str) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{}/default", dir)))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // Eg. `EMPORIUM__SESSION__CUSTOMER_NAME=Ana`
            .add_source(config::Environment::with_prefix("EMPORIUM").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> Result<Config, config::ConfigError> {
        config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_config_deserialization() {
        let config = parse(
            r#"
            [logging]
            filter = "debug"

            [session]
            customer_name = "Toby"

            [[catalog.products]]
            name = "Laptop"
            category = "Electronics"
            price = 1200.0
            quantity = 10
            "#,
        )
        .expect("Failed to deserialize");

        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.session.customer_name, "Toby");
        assert_eq!(config.catalog.products, vec![NewProduct::new("Laptop", "Electronics", 1200.0, 10)]);
        assert!(config.catalog.seed_file.is_none());
    }

    #[test]
    fn test_defaults() {
        let config = parse("[session]\ncustomer_name = \"Ana\"").unwrap();
        assert!(config.logging.filter.contains("emporium_core=info"));
        assert!(config.catalog.products.is_empty());
    }

    #[test]
    fn test_session_is_required() {
        assert!(parse("[logging]\nfilter = \"info\"").is_err());
    }

    #[test]
    fn test_load_from_missing_dir_fails() {
        assert!(Config::load_from("/definitely/not/a/config/dir").is_err());
    }
}
