//! Orbweave: a stateful URL frontier and crawl-session controller
//!
//! This crate implements the bookkeeping half of a page-by-page site crawler:
//! which links are eligible to be visited, the guarantee that no URL is ever
//! visited or re-queued twice, persistence for crash recovery, and pacing
//! between page loads. Navigation itself is delegated to a [`driver::PageDriver`]
//! implementation; durable state goes through a [`storage::Storage`] backend.

pub mod config;
pub mod driver;
pub mod frontier;
pub mod routing;
pub mod session;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Orbweave operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Driver error: {0}")]
    Driver(#[from] driver::DriverError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Router error: {0}")]
    Router(#[from] routing::RouterError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    /// A `current_page` hook failed. Deliberately fatal: a broken user
    /// callback should stop the crawl rather than silently corrupt results.
    #[error("Page hook failed on {url}: {source}")]
    Callback {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    /// No start URL was configured. Fatal before the loop starts.
    #[error("No start url was provided. Add at least one entry to [session] start-urls")]
    MissingStartUrl,

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid ignore or route pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// Result type alias for Orbweave operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use frontier::{Admission, Frontier, FrontierSnapshot};
pub use routing::{Matcher, Router};
pub use session::{Performance, SessionController, SessionState};
pub use url::PageUrl;
