use crate::conf::validate::validate_config;
use crate::conf::{ConfigError, DashboardConfig};
use std::fs;
use std::path::Path;

pub fn load_config(path: &Path) -> Result<DashboardConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let cfg = parse_config(&contents).map_err(|e| ConfigError::parse(path, e))?;

    //--------------------------------------------------------------------------
    // Semantic validation (aggregate all errors)
    //--------------------------------------------------------------------------
    validate_config(&cfg)?;

    tracing::debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

pub fn parse_config(contents: &str) -> Result<DashboardConfig, toml::de::Error> {
    toml::from_str(contents)
}

impl DashboardConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_config(path.as_ref())
    }

    /// The default configuration rendered as TOML.
    pub fn default_toml() -> String {
        // Serializing plain structs of strings, numbers and enums cannot fail.
        toml::to_string_pretty(&DashboardConfig::default()).unwrap_or_default()
    }
}
