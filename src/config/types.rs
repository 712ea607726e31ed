use crate::frontier::AdmissionPolicy;
use crate::session::WaitPolicy;
use crate::url::IgnoreRule;
use crate::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Orbweave
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub session: SessionConfig,
    pub driver: DriverConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ignore: Vec<IgnoreRuleConfig>,
}

/// Crawl session behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Session name, recorded in the crash-recovery cache
    pub name: String,

    /// URLs the crawl starts from; the first one defines the crawl origin
    #[serde(rename = "start-urls")]
    pub start_urls: Vec<String>,

    /// Whether to follow links at all; false visits only the start URLs
    #[serde(default = "default_crawl")]
    pub crawl: bool,

    /// Reject candidates carrying a query string
    #[serde(rename = "ignore-queries", default)]
    pub ignore_queries: bool,

    /// Reject candidates with an image file extension
    #[serde(rename = "ignore-images", default)]
    pub ignore_images: bool,

    /// CSS selectors scoping link extraction to parts of the page
    #[serde(rename = "restrict-search-to", default)]
    pub restrict_search_to: Vec<String>,

    /// Fixed pause between page loads (seconds)
    #[serde(rename = "wait-time", default = "default_wait_time")]
    pub wait_time: u64,

    /// When set, overrides wait-time with a uniform [min, max) draw (seconds)
    #[serde(rename = "wait-time-range", default)]
    pub wait_time_range: Option<(u64, u64)>,

    /// Upper bound on the page-ready wait after navigation (seconds)
    #[serde(rename = "page-ready-timeout", default = "default_page_ready_timeout")]
    pub page_ready_timeout: u64,
}

fn default_crawl() -> bool {
    true
}

fn default_wait_time() -> u64 {
    25
}

fn default_page_ready_timeout() -> u64 {
    5
}

/// Driver identification, baked into the user-agent string
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriverConfig {
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    #[serde(rename = "contact-url")]
    pub contact_url: String,

    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Which storage backend holds the session documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per document under `path`
    Json,
    /// A single SQLite database at `path`
    Sqlite,
}

/// Persistence configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_storage_path(),
        }
    }
}

fn default_backend() -> StorageBackend {
    StorageBackend::Json
}

fn default_storage_path() -> String {
    "./crawl-state".to_string()
}

/// One named admission filter; exactly one of `paths` or `regex` is set
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgnoreRuleConfig {
    pub name: String,

    /// Exact paths this rule rejects
    #[serde(default)]
    pub paths: Option<Vec<String>>,

    /// Pattern searched over the whole serialized URL
    #[serde(default)]
    pub regex: Option<String>,
}

impl IgnoreRuleConfig {
    /// Compiles the configured rule into its runtime form.
    pub fn compile(&self) -> Result<IgnoreRule, ConfigError> {
        match (&self.paths, &self.regex) {
            (Some(paths), None) => Ok(IgnoreRule::paths(self.name.clone(), paths.clone())),
            (None, Some(pattern)) => IgnoreRule::regex(self.name.clone(), pattern).map_err(|e| {
                ConfigError::InvalidPattern(format!("ignore rule '{}': {}", self.name, e))
            }),
            _ => Err(ConfigError::Validation(format!(
                "ignore rule '{}' must set exactly one of 'paths' or 'regex'",
                self.name
            ))),
        }
    }
}

impl Config {
    /// Builds the admission policy, compiling every ignore rule.
    pub fn admission_policy(&self) -> Result<AdmissionPolicy, ConfigError> {
        let ignore_rules = self
            .ignore
            .iter()
            .map(|rule| rule.compile())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AdmissionPolicy {
            ignore_queries: self.session.ignore_queries,
            ignore_images: self.session.ignore_images,
            ignore_rules,
        })
    }

    /// The pacing policy between page loads.
    pub fn wait_policy(&self) -> WaitPolicy {
        match self.session.wait_time_range {
            Some((min, max)) => {
                WaitPolicy::Range(Duration::from_secs(min), Duration::from_secs(max))
            }
            None => WaitPolicy::Fixed(Duration::from_secs(self.session.wait_time)),
        }
    }

    pub fn page_ready_timeout(&self) -> Duration {
        Duration::from_secs(self.session.page_ready_timeout)
    }
}
