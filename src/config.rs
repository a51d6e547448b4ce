use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{CatalogError, Result};

/// Settings for the catalog, read from a TOML file:
///
/// ```toml
/// [database]
/// path = "catalog.sqlite3"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
}

impl CatalogConfig {
    /// Loads settings from `path`. Any missing file, unparsable content or
    /// absent `database.path` key is a configuration error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            CatalogError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: CatalogConfig = toml::from_str(&raw).map_err(|e| {
            CatalogError::Configuration(format!("cannot parse {}: {e}", path.display()))
        })?;
        if config.database.path.trim().is_empty() {
            return Err(CatalogError::Configuration(
                "database.path must not be empty".into(),
            ));
        }
        Ok(config)
    }
}
