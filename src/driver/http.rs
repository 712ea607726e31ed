//! HTTP-backed page driver.
//!
//! The default [`PageDriver`]: fetches pages over HTTP and extracts links
//! from the static document. Sites that only materialize links through
//! scripting need a browser-automation driver instead; the controller does
//! not care which it gets.

use crate::config::DriverConfig;
use crate::driver::{DriverError, PageDriver};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

/// Builds an HTTP client identifying itself from the driver configuration.
///
/// User agent format: `CrawlerName/Version (+ContactURL; ContactEmail)`.
pub fn build_http_client(config: &DriverConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// The page most recently navigated to.
#[derive(Debug)]
struct LoadedPage {
    url: String,
    body: String,
    title: Option<String>,
}

/// A [`PageDriver`] backed by plain HTTP fetches.
#[derive(Debug)]
pub struct HttpDriver {
    client: Client,
    current: Option<LoadedPage>,
}

impl HttpDriver {
    pub fn new(config: &DriverConfig) -> Result<Self, DriverError> {
        Ok(Self {
            client: build_http_client(config)?,
            current: None,
        })
    }

    /// Wraps an existing client, used by tests and callers with custom
    /// client settings.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            current: None,
        }
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|page| page.url.as_str())
    }

    fn anchors_in(document: &Html, selector: &str) -> Result<Vec<String>, DriverError> {
        let parsed =
            Selector::parse(selector).map_err(|e| DriverError::Selector(e.to_string()))?;

        let mut links = Vec::new();
        for element in document.select(&parsed) {
            if let Some(href) = element.value().attr("href") {
                if let Some(href) = usable_href(href) {
                    links.push(href.to_string());
                }
            }
        }
        Ok(links)
    }
}

/// Filters out hrefs that can never become crawlable URLs.
fn usable_href(href: &str) -> Option<&str> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    Some(href)
}

impl PageDriver for HttpDriver {
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.current = None;

        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| DriverError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DriverError::Navigation {
                url: url.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| DriverError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        // Html is parsed and dropped here; it is not kept across awaits.
        let title = extract_title(&body);

        self.current = Some(LoadedPage {
            url: final_url,
            body,
            title,
        });
        Ok(())
    }

    async fn wait_ready(&mut self, _timeout: Duration) -> Result<(), DriverError> {
        // An HTTP fetch is ready the moment navigation returns.
        match self.current {
            Some(_) => Ok(()),
            None => Err(DriverError::NoPage),
        }
    }

    async fn extract_links(
        &mut self,
        restrict_selectors: &[String],
    ) -> Result<Vec<String>, DriverError> {
        let page = self.current.as_ref().ok_or(DriverError::NoPage)?;
        let document = Html::parse_document(&page.body);

        if !restrict_selectors.is_empty() {
            let mut links = Vec::new();
            for selector in restrict_selectors {
                let scoped = format!("{} a[href]", selector);
                let found = Self::anchors_in(&document, &scoped)?;
                if !found.is_empty() {
                    tracing::info!(
                        "Found {} url(s) in page section '{}'",
                        found.len(),
                        selector
                    );
                }
                links.extend(found);
            }

            // Restricted sections may legitimately be empty; fall back to a
            // whole-document scan rather than returning nothing.
            if !links.is_empty() {
                return Ok(links);
            }
        }

        Self::anchors_in(&document, "a[href]")
    }

    fn current_title(&self) -> Option<String> {
        self.current.as_ref().and_then(|page| page.title.clone())
    }
}

fn extract_title(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}
