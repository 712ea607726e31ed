//! Configuration module for Orbweave
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Parsing is strict: unknown keys are rejected, so configuration
//! typos fail at load time rather than silently doing nothing.
//!
//! # Example
//!
//! ```no_run
//! use orbweave::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling from: {:?}", config.session.start_urls);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DriverConfig, IgnoreRuleConfig, SessionConfig, StorageBackend, StorageConfig,
};

// Re-export parser functions
pub use parser::load_config;
