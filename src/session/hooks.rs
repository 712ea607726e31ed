//! Per-page callbacks injected into the session.
//!
//! Hooks are where a crawl does its actual work: scraping data off the
//! current page, dismissing cookie-consent banners, driving in-page
//! pagination. The controller calls them at fixed points in the loop and
//! owns the error policy; implementations just return `anyhow` errors.

use crate::url::PageUrl;

/// Callbacks invoked around each page visit.
///
/// Error handling differs per hook and is deliberate: `post_navigation` and
/// `before_next_page` failures are logged and swallowed, while a
/// `current_page` failure aborts the whole session. The first two are page
/// grooming; the third is the reason the crawl exists.
pub trait PageHooks<D>: Send {
    /// Runs right after navigation succeeds, before the page counts as
    /// visited. The place to clear consent banners and overlays.
    fn post_navigation(&mut self, driver: &mut D, url: &PageUrl) -> anyhow::Result<()> {
        let _ = (driver, url);
        Ok(())
    }

    /// Runs once the page is visited and its links are banked. A failure
    /// here stops the session.
    fn current_page(&mut self, driver: &mut D, url: &PageUrl) -> anyhow::Result<()> {
        let _ = (driver, url);
        Ok(())
    }

    /// Runs after all processing for the page, before the inter-page pause.
    fn before_next_page(&mut self, driver: &mut D, url: &PageUrl) -> anyhow::Result<()> {
        let _ = (driver, url);
        Ok(())
    }
}

/// The default: visit pages, collect links, do nothing else.
#[derive(Debug, Default)]
pub struct NoHooks;

impl<D> PageHooks<D> for NoHooks {}
