// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{LoaderError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub engine: EngineConfig,
    pub source: SourceConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    pub host: String,
    pub port: u16,
}

impl EngineConfig {
    /// Base URL of the engine's REST API. Plain HTTP only.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    pub csv_path: PathBuf,
    /// Whether row 0 of the source file is a header row. With a header, the
    /// column table below is checked against it before any row is indexed.
    pub has_header: bool,
    /// Column name to zero-based position in each row.
    pub columns: HashMap<String, usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoConfig {
    pub name_collection: String,
    pub phone_collection: String,
    pub delete_id: String,
    pub facet_field: String,
    pub on_error: ErrorPolicy,
}

/// What the demo driver does when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the sequence at the first failure.
    Abort,
    /// Log the failure and run the remaining steps.
    Continue,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("ES_LOADER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| LoaderError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| LoaderError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            engine: EngineConfig {
                host: "localhost".to_string(),
                port: 9200,
            },
            source: SourceConfig {
                csv_path: PathBuf::from("Downloads/employee_data.csv"),
                has_header: false,
                columns: HashMap::from([
                    ("Department".to_string(), 1),
                    ("Gender".to_string(), 2),
                ]),
            },
            demo: DemoConfig {
                name_collection: "Hash_Maha".to_string(),
                phone_collection: "Hash_9847".to_string(),
                delete_id: "E02003".to_string(),
                facet_field: "Department".to_string(),
                on_error: ErrorPolicy::Abort,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.engine.port == 0 {
            return Err(LoaderError::Config("engine.port cannot be 0".to_string()));
        }

        if self.source.columns.is_empty() {
            return Err(LoaderError::Config(
                "source.columns must map at least one column".to_string(),
            ));
        }

        if self.demo.name_collection.is_empty() || self.demo.phone_collection.is_empty() {
            return Err(LoaderError::Config(
                "demo collection names cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.base_url(), "http://localhost:9200");
        assert_eq!(config.source.columns.get("Department"), Some(&1));
        assert_eq!(config.source.columns.get("Gender"), Some(&2));
    }

    #[test]
    fn test_validate_rejects_empty_columns() {
        let mut config = Config::default_config();
        config.source.columns.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default_config();
        config.engine.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_error_policy_parses_lowercase() {
        let policy: ErrorPolicy = serde_json::from_str("\"continue\"").unwrap();
        assert_eq!(policy, ErrorPolicy::Continue);
        let policy: ErrorPolicy = serde_json::from_str("\"abort\"").unwrap();
        assert_eq!(policy, ErrorPolicy::Abort);
    }
}
