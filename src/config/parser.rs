use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads, parses, and validates a TOML configuration file.
///
/// Unknown keys anywhere in the file are an error; a typo in a setting name
/// fails loudly here instead of silently falling back to a default.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}
