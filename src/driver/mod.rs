//! The page-driver capability the session controller consumes.
//!
//! A driver is anything that can navigate to a URL, report when the page is
//! ready, extract anchor hrefs, and surface a page title: a browser
//! automation surface, an HTTP fetcher, or a scripted fake in tests. The
//! controller never inspects how navigation happens.

mod http;

pub use http::{build_http_client, HttpDriver};

use std::time::Duration;
use thiserror::Error;

/// Driver-specific errors
#[derive(Debug, Error)]
pub enum DriverError {
    /// Navigation failed. Per-URL, recorded and counted; the crawl moves on.
    #[error("Navigation failed for {url}: {message}")]
    Navigation { url: String, message: String },

    /// The page never reported ready within the bounded wait.
    #[error("Page {url} not ready after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("No page is loaded")]
    NoPage,

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// A surface that can visit pages and report what it finds.
///
/// One driver instance owns one page context at a time; multi-surface
/// sessions hold one driver per surface.
pub trait PageDriver {
    /// Navigates to a URL, replacing the current page context.
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    /// Blocks until the current page is ready, up to `timeout`.
    async fn wait_ready(&mut self, timeout: Duration) -> Result<(), DriverError>;

    /// Extracts anchor hrefs from the current page.
    ///
    /// When `restrict_selectors` is non-empty, only anchors inside the given
    /// page sections are collected, falling back to a whole-document scan
    /// when the sections yield nothing. An empty list always scans the whole
    /// document.
    async fn extract_links(
        &mut self,
        restrict_selectors: &[String],
    ) -> Result<Vec<String>, DriverError>;

    /// Title of the current page, if one was found.
    fn current_title(&self) -> Option<String>;
}
