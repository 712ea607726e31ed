//! Named admission filters.
//!
//! An ignore rule rejects a URL when its test returns true. An ordered list
//! of rules forms the admission pipeline with OR semantics: any rule that
//! fires rejects the URL, regardless of the others.

use crate::url::PageUrl;
use regex::Regex;

/// The predicate half of an ignore rule.
#[derive(Debug, Clone)]
pub enum IgnoreTest {
    /// Exact path equality against any entry in the list.
    Paths(Vec<String>),
    /// Regex search over the whole serialized URL.
    Regex(Regex),
}

/// A named predicate that, when it matches, rejects a URL during admission.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    name: String,
    test: IgnoreTest,
}

impl IgnoreRule {
    pub fn paths(name: impl Into<String>, paths: Vec<String>) -> Self {
        Self {
            name: name.into(),
            test: IgnoreTest::Paths(paths),
        }
    }

    pub fn regex(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            test: IgnoreTest::Regex(Regex::new(pattern)?),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when this rule rejects the URL.
    pub fn rejects(&self, url: &PageUrl) -> bool {
        match &self.test {
            IgnoreTest::Paths(paths) => paths.iter().any(|p| p == url.path()),
            IgnoreTest::Regex(pattern) => url.matches(pattern),
        }
    }
}

/// Runs the pipeline in order and returns the name of the first rule that
/// rejects the URL, or `None` when every rule admits it.
pub fn rejecting_rule<'a>(rules: &'a [IgnoreRule], url: &PageUrl) -> Option<&'a str> {
    rules
        .iter()
        .find(|rule| rule.rejects(url))
        .map(|rule| rule.name())
}
