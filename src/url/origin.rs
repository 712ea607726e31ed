//! The crawl origin: the scheme + host every relative link resolves against.

use crate::url::PageUrl;
use crate::UrlError;
use url::Url;

/// Scheme and host of the start URL, plus the start path used by the
/// duplicate-home-page admission rule.
#[derive(Debug, Clone)]
pub struct Origin {
    base: Url,
    start_path: String,
}

impl Origin {
    /// Derives the origin from the session's start URL.
    pub fn from_start_url(start: &PageUrl) -> Self {
        let mut base = start.url().clone();
        base.set_path("/");
        base.set_query(None);
        base.set_fragment(None);

        Self {
            base,
            start_path: start.path().to_string(),
        }
    }

    pub fn host(&self) -> &str {
        self.base.host_str().unwrap_or_default()
    }

    /// Path of the start URL (`/` for a homepage start).
    pub fn start_path(&self) -> &str {
        &self.start_path
    }

    pub fn is_same_host(&self, url: &PageUrl) -> bool {
        self.base.host_str() == Some(url.host())
    }

    /// Resolves a raw link against the origin.
    ///
    /// Absolute URLs pass through untouched; paths and relative references
    /// resolve against `scheme://host/`. Empty or unparseable input fails.
    pub fn resolve(&self, raw: &str) -> Result<PageUrl, UrlError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UrlError::Parse("empty url".to_string()));
        }

        let joined = self
            .base
            .join(trimmed)
            .map_err(|e| UrlError::Parse(format!("{}: {}", trimmed, e)))?;

        if joined.host_str().is_none() {
            return Err(UrlError::MissingHost(trimmed.to_string()));
        }

        Ok(PageUrl::from(joined))
    }
}
