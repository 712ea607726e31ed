//! URL handling module for Orbweave
//!
//! This module provides the [`PageUrl`] value type used throughout the
//! frontier and session controller, the [`Origin`] that relative links are
//! resolved against, and the ignore-rule admission pipeline.

mod filters;
mod origin;

pub use filters::{rejecting_rule, IgnoreRule, IgnoreTest};
pub use origin::Origin;

use crate::UrlError;
use regex::Regex;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// Path extensions treated as images during admission when `ignore-images`
/// is enabled.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "3dm", "3ds", "max", "avif", "bmp", "dds", "gif", "heif", "jpg", "jpeg", "jxl", "png", "psd",
    "xcf", "tga", "thm", "tif", "tiff", "yuv", "ai", "eps", "ps", "svg", "dwg", "dxf", "gpx",
    "kml", "kmz", "webp",
];

/// A normalized, comparable URL.
///
/// Two `PageUrl`s are equal iff their normalized serializations are equal;
/// hashing and ordering agree with equality. `/x` and `/x/` are distinct —
/// no path normalization happens beyond what URL parsing itself does.
#[derive(Debug, Clone)]
pub struct PageUrl {
    inner: Url,
}

impl PageUrl {
    /// Parses an absolute URL.
    ///
    /// Fails on empty input, unparseable input, or a URL without a host
    /// (relative paths are resolved through [`Origin::resolve`] instead).
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UrlError::Parse("empty url".to_string()));
        }

        let inner =
            Url::parse(trimmed).map_err(|e| UrlError::Parse(format!("{}: {}", trimmed, e)))?;

        if inner.host_str().is_none() {
            return Err(UrlError::MissingHost(trimmed.to_string()));
        }

        Ok(Self { inner })
    }

    /// The normalized serialization this value compares and hashes by.
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.inner
    }

    pub fn scheme(&self) -> &str {
        self.inner.scheme()
    }

    pub fn host(&self) -> &str {
        // Guaranteed by the parse/resolve constructors.
        self.inner.host_str().unwrap_or_default()
    }

    pub fn path(&self) -> &str {
        self.inner.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.inner.query()
    }

    /// True when the URL carries a fragment. A raw link ending in a bare `#`
    /// parses as an empty fragment, so this covers both rejection cases.
    pub fn has_fragment(&self) -> bool {
        self.inner.fragment().is_some()
    }

    /// The lowercased extension of the last path segment, if any.
    pub fn extension(&self) -> Option<String> {
        let segment = self.inner.path().rsplit('/').next()?;
        let (stem, ext) = segment.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// True when the path extension is a known image extension.
    pub fn is_image(&self) -> bool {
        match self.extension() {
            Some(ext) => IMAGE_EXTENSIONS.contains(&ext.as_str()),
            None => false,
        }
    }

    pub fn same_host(&self, other: &PageUrl) -> bool {
        self.inner.host_str() == other.inner.host_str()
    }

    /// Tests a regex against the whole serialized URL.
    pub fn matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(self.as_str())
    }

    /// Tests a regex against the path only.
    pub fn path_matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(self.path())
    }
}

impl PartialEq for PageUrl {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for PageUrl {}

impl Hash for PageUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Ord for PageUrl {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for PageUrl {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for PageUrl {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<Url> for PageUrl {
    fn from(inner: Url) -> Self {
        Self { inner }
    }
}
