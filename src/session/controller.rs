//! The session controller: one loop, one page at a time.

use crate::config::Config;
use crate::driver::PageDriver;
use crate::frontier::{Frontier, FrontierSnapshot};
use crate::routing::Router;
use crate::session::{NoHooks, PageHooks, Performance, SessionState, StopSignal, WaitPolicy};
use crate::storage::{
    CacheDocument, Storage, StorageError, CACHE_DOCUMENT, PERFORMANCE_DOCUMENT, SEEN_URLS_DOCUMENT,
};
use crate::url::{Origin, PageUrl};
use crate::{ConfigError, CrawlError};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// External controls for a running session.
///
/// Cheap to clone; hand one to a signal handler or supervisor task. A
/// stopped session finishes the page in flight and exits at the next loop
/// boundary.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    stop: StopSignal,
    paused: Arc<AtomicBool>,
}

impl SessionHandle {
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn unpause(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }
}

/// Drives a crawl session over one or more page surfaces.
///
/// Generic over the driver and the storage backend; the controller itself
/// never navigates or touches disk directly.
pub struct SessionController<D, S> {
    config: Config,
    frontier: Frontier,
    surfaces: Vec<D>,
    storage: S,
    hooks: Box<dyn PageHooks<D>>,
    router: Option<Router<D>>,
    performance: Performance,
    state: SessionState,
    stop: StopSignal,
    paused: Arc<AtomicBool>,
    wait: WaitPolicy,
    page_ready_timeout: Duration,
    next_slot: Option<tokio::time::Instant>,
}

impl<D: PageDriver, S: Storage> SessionController<D, S> {
    /// Builds a controller around one driver surface.
    pub fn new(config: Config, driver: D, storage: S) -> crate::Result<Self> {
        Self::with_surfaces(config, vec![driver], storage)
    }

    /// Builds a controller over several surfaces. Each loop round pops up
    /// to one URL per surface, navigates them all, then processes the
    /// loaded pages strictly one after another.
    pub fn with_surfaces(config: Config, surfaces: Vec<D>, storage: S) -> crate::Result<Self> {
        if surfaces.is_empty() {
            return Err(ConfigError::Validation(
                "at least one driver surface is required".to_string(),
            )
            .into());
        }

        let first = config
            .session
            .start_urls
            .first()
            .ok_or(ConfigError::MissingStartUrl)?;
        let start = PageUrl::parse(first)
            .map_err(|e| ConfigError::InvalidUrl(format!("start url '{}': {}", first, e)))?;
        let origin = Origin::from_start_url(&start);

        let policy = config.admission_policy()?;
        let wait = config.wait_policy();
        let page_ready_timeout = config.page_ready_timeout();

        Ok(Self {
            config,
            frontier: Frontier::new(origin, policy),
            surfaces,
            storage,
            hooks: Box::new(NoHooks),
            router: None,
            performance: Performance::start_now(),
            state: SessionState::Idle,
            stop: StopSignal::new(),
            paused: Arc::new(AtomicBool::new(false)),
            wait,
            page_ready_timeout,
            next_slot: None,
        })
    }

    pub fn with_hooks(mut self, hooks: impl PageHooks<D> + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn with_router(mut self, router: Router<D>) -> Self {
        self.router = Some(router);
        self
    }

    /// Controls usable from outside the running loop.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            stop: self.stop.clone(),
            paused: Arc::clone(&self.paused),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn performance(&self) -> &Performance {
        &self.performance
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Runs a fresh session: seeds the frontier from the configured start
    /// URLs, then visits pages until the frontier drains or a stop is
    /// requested.
    pub async fn start(&mut self) -> crate::Result<()> {
        self.state = SessionState::Starting;
        self.seed_start_urls()?;
        self.performance = Performance::start_now();
        self.run_loop().await
    }

    /// Resumes an interrupted session from its persisted documents.
    ///
    /// The frontier and performance counters come back from storage; the
    /// crawl origin is re-derived from configuration. Start URLs are not
    /// re-queued: they are already part of the snapshot. When no cache
    /// document exists this behaves like [`start`](Self::start).
    pub async fn resume(&mut self) -> crate::Result<()> {
        self.state = SessionState::Starting;

        if self.storage.has(CACHE_DOCUMENT) {
            let cache: CacheDocument = serde_json::from_value(self.storage.get(CACHE_DOCUMENT)?)
                .map_err(StorageError::from)?;

            let seen: Vec<String> = if self.storage.has(SEEN_URLS_DOCUMENT) {
                serde_json::from_value(self.storage.get(SEEN_URLS_DOCUMENT)?)
                    .map_err(StorageError::from)?
            } else {
                Vec::new()
            };

            tracing::info!(
                "Resuming session '{}': {} queued, {} visited",
                cache.spider,
                cache.urls_to_visit.len(),
                cache.visited_urls.len()
            );
            self.frontier.restore(FrontierSnapshot {
                to_visit: cache.urls_to_visit,
                visited: cache.visited_urls,
                seen,
            });
        } else {
            tracing::warn!("No cache document found; seeding a fresh session");
            self.seed_start_urls()?;
        }

        if self.storage.has(PERFORMANCE_DOCUMENT) {
            self.performance = serde_json::from_value(self.storage.get(PERFORMANCE_DOCUMENT)?)
                .map_err(StorageError::from)?;
            // The session is live again; the record re-seals when the
            // frontier drains.
            self.performance.end_time = None;
        }

        self.run_loop().await
    }

    fn seed_start_urls(&mut self) -> crate::Result<()> {
        if self.config.session.start_urls.is_empty() {
            return Err(ConfigError::MissingStartUrl.into());
        }

        for raw in &self.config.session.start_urls {
            let url = PageUrl::parse(raw)
                .map_err(|e| ConfigError::InvalidUrl(format!("start url '{}': {}", raw, e)))?;
            self.frontier.seed(url);
        }
        Ok(())
    }

    async fn run_loop(&mut self) -> crate::Result<()> {
        self.state = SessionState::Running;
        let result = self.drive().await;
        self.state = SessionState::Stopped;
        result
    }

    async fn drive(&mut self) -> crate::Result<()> {
        loop {
            self.wait_while_paused().await;
            if self.stop.is_stopped() {
                tracing::info!("Stop requested; ending session");
                self.persist_state();
                self.persist_performance();
                break;
            }

            self.wait_for_slot().await;
            if self.stop.is_stopped() {
                continue;
            }

            let batch = self.pop_batch();
            if batch.is_empty() {
                self.finish_drained();
                break;
            }

            let mut loaded = Vec::with_capacity(batch.len());
            for (surface, url) in batch {
                // The queue is filtered on admission, but restored
                // snapshots are not trusted blindly.
                if !self.frontier.origin().is_same_host(&url) {
                    tracing::warn!("Dropping off-origin url from queue: {}", url);
                    continue;
                }

                tracing::info!("Navigating to {}", url);
                match self.surfaces[surface].navigate(url.as_str()).await {
                    Ok(()) => loaded.push((surface, url)),
                    Err(e) => {
                        tracing::error!("Navigation failed: {}", e);
                        self.performance.record_error();
                    }
                }
            }

            for (surface, url) in loaded {
                self.process_page(surface, &url).await?;
                if self.stop.is_stopped() {
                    break;
                }
            }

            if self.frontier.is_drained() {
                self.finish_drained();
                break;
            }

            let pause = self.wait.sample();
            tracing::info!("Waiting {:.1}s before the next page", pause.as_secs_f64());
            self.next_slot = Some(tokio::time::Instant::now() + pause);
        }

        Ok(())
    }

    /// One visited page, start to finish. Only a failed `current_page` hook
    /// escapes as an error; everything else is logged and survived.
    async fn process_page(&mut self, surface: usize, url: &PageUrl) -> crate::Result<()> {
        let stop = self.stop.clone();
        let ready = tokio::select! {
            outcome = self.surfaces[surface].wait_ready(self.page_ready_timeout) => Some(outcome),
            _ = stop.cancelled() => None,
        };
        match ready {
            // Stop fired mid-wait; the loop exits at its next boundary.
            None => return Ok(()),
            Some(Err(e)) => {
                // Not marked visited; the URL stays out of the queue but a
                // later extraction may re-admit it.
                tracing::warn!("Page never became ready, skipping {}: {}", url, e);
                return Ok(());
            }
            Some(Ok(())) => {}
        }

        if let Err(e) = self.hooks.post_navigation(&mut self.surfaces[surface], url) {
            tracing::warn!("post_navigation hook failed on {}: {}", url, e);
        }

        self.frontier.mark_visited(url);

        if self.config.session.crawl {
            self.gather_links(surface, false).await;
            self.persist_state();
        }

        if let Err(e) = self.hooks.current_page(&mut self.surfaces[surface], url) {
            return Err(CrawlError::Callback {
                url: url.as_str().to_string(),
                source: e,
            });
        }

        // Second pass catches links the current_page hook materialized by
        // scrolling or paginating in place.
        if self.config.session.crawl {
            self.gather_links(surface, true).await;
            self.persist_state();
        }

        if let Some(router) = self.router.as_mut() {
            match router.resolve(&mut self.surfaces[surface], url) {
                Ok(Some(route)) => tracing::debug!("Matched route '{}'", route),
                Ok(None) => {}
                Err(e) => tracing::error!("Routing failed for {}: {}", url, e),
            }
        }

        self.performance
            .record_iteration(self.frontier.to_visit_len(), self.frontier.visited_len());
        self.persist_performance();

        if let Err(e) = self.hooks.before_next_page(&mut self.surfaces[surface], url) {
            tracing::warn!("before_next_page hook failed on {}: {}", url, e);
        }

        Ok(())
    }

    async fn gather_links(&mut self, surface: usize, refresh: bool) {
        let restrict = &self.config.session.restrict_search_to;
        match self.surfaces[surface].extract_links(restrict).await {
            Ok(links) => {
                self.frontier.add_urls(links, refresh);
            }
            Err(e) => tracing::warn!("Link extraction failed: {}", e),
        }
    }

    fn pop_batch(&mut self) -> Vec<(usize, PageUrl)> {
        let mut batch = Vec::new();
        for surface in 0..self.surfaces.len() {
            match self.frontier.next() {
                Some(url) => batch.push((surface, url)),
                None => break,
            }
        }
        batch
    }

    fn finish_drained(&mut self) {
        self.state = SessionState::Draining;
        tracing::info!(
            "Frontier drained: {} pages visited over {} iterations",
            self.frontier.visited_len(),
            self.performance.iteration_count
        );
        self.performance.finalize();
        self.persist_state();
        self.persist_performance();
    }

    async fn wait_for_slot(&mut self) {
        if let Some(at) = self.next_slot.take() {
            let stop = self.stop.clone();
            tokio::select! {
                _ = tokio::time::sleep_until(at) => {}
                _ = stop.cancelled() => {}
            }
        }
    }

    async fn wait_while_paused(&mut self) {
        while self.paused.load(Ordering::SeqCst) && !self.stop.is_stopped() {
            self.state = SessionState::Paused;
            let stop = self.stop.clone();
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(100)) => {}
                _ = stop.cancelled() => {}
            }
        }

        if self.state == SessionState::Paused {
            self.state = SessionState::Running;
        }
    }

    /// Best-effort: losing one snapshot must not kill a long crawl.
    fn persist_state(&mut self) {
        let snapshot = self.frontier.snapshot();
        let cache = CacheDocument {
            spider: self.config.session.name.clone(),
            timestamp: Utc::now(),
            urls_to_visit: snapshot.to_visit,
            visited_urls: snapshot.visited,
        };

        match serde_json::to_value(&cache) {
            Ok(doc) => {
                if let Err(e) = self.storage.save_or_create(CACHE_DOCUMENT, &doc) {
                    tracing::warn!("Failed to persist cache document: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize cache document: {}", e),
        }

        match serde_json::to_value(snapshot.seen) {
            Ok(doc) => {
                if let Err(e) = self.storage.save_or_create(SEEN_URLS_DOCUMENT, &doc) {
                    tracing::warn!("Failed to persist seen urls: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize seen urls: {}", e),
        }
    }

    fn persist_performance(&mut self) {
        match serde_json::to_value(&self.performance) {
            Ok(doc) => {
                if let Err(e) = self.storage.save_or_create(PERFORMANCE_DOCUMENT, &doc) {
                    tracing::warn!("Failed to persist performance record: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize performance record: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DriverConfig, SessionConfig, StorageConfig};
    use crate::driver::DriverError;
    use crate::routing::Matcher;
    use crate::storage::SqliteStorage;
    use std::collections::{HashMap, HashSet};

    struct ScriptedDriver {
        pages: HashMap<String, Vec<String>>,
        fail: HashSet<String>,
        current: Option<String>,
        navigated: Vec<String>,
    }

    impl ScriptedDriver {
        fn new(pages: &[(&str, &[&str])]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, links)| {
                        (
                            url.to_string(),
                            links.iter().map(|l| l.to_string()).collect(),
                        )
                    })
                    .collect(),
                fail: HashSet::new(),
                current: None,
                navigated: Vec::new(),
            }
        }

        fn failing_on(mut self, url: &str) -> Self {
            self.fail.insert(url.to_string());
            self
        }
    }

    impl PageDriver for ScriptedDriver {
        async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
            self.navigated.push(url.to_string());
            if self.fail.contains(url) {
                self.current = None;
                return Err(DriverError::Navigation {
                    url: url.to_string(),
                    message: "scripted failure".to_string(),
                });
            }
            self.current = Some(url.to_string());
            Ok(())
        }

        async fn wait_ready(&mut self, _timeout: Duration) -> Result<(), DriverError> {
            match self.current {
                Some(_) => Ok(()),
                None => Err(DriverError::NoPage),
            }
        }

        async fn extract_links(
            &mut self,
            _restrict_selectors: &[String],
        ) -> Result<Vec<String>, DriverError> {
            let current = self.current.as_ref().ok_or(DriverError::NoPage)?;
            Ok(self.pages.get(current).cloned().unwrap_or_default())
        }

        fn current_title(&self) -> Option<String> {
            None
        }
    }

    fn test_config() -> Config {
        Config {
            session: SessionConfig {
                name: "test".to_string(),
                start_urls: vec!["http://example.com/".to_string()],
                crawl: true,
                ignore_queries: false,
                ignore_images: false,
                restrict_search_to: vec![],
                wait_time: 0,
                wait_time_range: None,
                page_ready_timeout: 5,
            },
            driver: DriverConfig {
                crawler_name: "Orbweave".to_string(),
                crawler_version: "0.1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            storage: StorageConfig::default(),
            ignore: vec![],
        }
    }

    fn site() -> ScriptedDriver {
        ScriptedDriver::new(&[
            ("http://example.com/", &["/a", "/b"]),
            ("http://example.com/a", &["/b", "/c"]),
            ("http://example.com/b", &[]),
            (
                "http://example.com/c",
                &["/", "/a#frag", "http://other.com/z"],
            ),
        ])
    }

    #[tokio::test]
    async fn test_full_crawl_visits_every_page_once() {
        let mut controller =
            SessionController::new(test_config(), site(), SqliteStorage::in_memory().unwrap())
                .unwrap();

        controller.start().await.unwrap();

        assert_eq!(controller.state(), SessionState::Stopped);
        assert_eq!(controller.frontier().visited_len(), 4);
        assert!(controller.frontier().is_drained());
        assert_eq!(controller.performance().iteration_count, 4);
        assert!(controller.performance().is_finalized());

        // Each page navigated exactly once, start URL first, the rest in
        // deterministic pop order.
        assert_eq!(
            controller.surfaces[0].navigated,
            vec![
                "http://example.com/",
                "http://example.com/a",
                "http://example.com/b",
                "http://example.com/c",
            ]
        );
    }

    #[tokio::test]
    async fn test_final_documents_are_persisted() {
        let mut controller =
            SessionController::new(test_config(), site(), SqliteStorage::in_memory().unwrap())
                .unwrap();

        controller.start().await.unwrap();

        let cache: CacheDocument =
            serde_json::from_value(controller.storage().get(CACHE_DOCUMENT).unwrap()).unwrap();
        assert_eq!(cache.spider, "test");
        assert!(cache.urls_to_visit.is_empty());
        assert_eq!(cache.visited_urls.len(), 4);

        let perf: Performance =
            serde_json::from_value(controller.storage().get(PERFORMANCE_DOCUMENT).unwrap())
                .unwrap();
        assert_eq!(perf.iteration_count, 4);
        assert!(perf.end_time.is_some());

        let seen: Vec<String> =
            serde_json::from_value(controller.storage().get(SEEN_URLS_DOCUMENT).unwrap()).unwrap();
        assert!(seen.contains(&"http://example.com/c".to_string()));
    }

    #[tokio::test]
    async fn test_navigation_failure_is_counted_not_fatal() {
        let driver = ScriptedDriver::new(&[
            ("http://example.com/", &["/a", "/b"]),
            ("http://example.com/b", &[]),
        ])
        .failing_on("http://example.com/a");

        let mut controller =
            SessionController::new(test_config(), driver, SqliteStorage::in_memory().unwrap())
                .unwrap();

        controller.start().await.unwrap();

        assert_eq!(controller.performance().error_count, 1);
        assert_eq!(controller.frontier().visited_len(), 2);
        assert!(!controller
            .frontier()
            .is_visited(&PageUrl::parse("http://example.com/a").unwrap()));
    }

    #[tokio::test]
    async fn test_crawl_disabled_visits_only_start_urls() {
        let mut config = test_config();
        config.session.crawl = false;

        let mut controller =
            SessionController::new(config, site(), SqliteStorage::in_memory().unwrap()).unwrap();

        controller.start().await.unwrap();

        assert_eq!(controller.frontier().visited_len(), 1);
        assert_eq!(controller.surfaces[0].navigated, vec!["http://example.com/"]);
    }

    struct FailingHook;

    impl PageHooks<ScriptedDriver> for FailingHook {
        fn current_page(
            &mut self,
            _driver: &mut ScriptedDriver,
            url: &PageUrl,
        ) -> anyhow::Result<()> {
            if url.path() == "/a" {
                anyhow::bail!("scripted hook failure");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_current_page_hook_failure_is_fatal() {
        let mut controller =
            SessionController::new(test_config(), site(), SqliteStorage::in_memory().unwrap())
                .unwrap()
                .with_hooks(FailingHook);

        let result = controller.start().await;

        assert!(matches!(result, Err(CrawlError::Callback { .. })));
        assert_eq!(controller.state(), SessionState::Stopped);
    }

    struct SwallowedHooks;

    impl PageHooks<ScriptedDriver> for SwallowedHooks {
        fn post_navigation(
            &mut self,
            _driver: &mut ScriptedDriver,
            _url: &PageUrl,
        ) -> anyhow::Result<()> {
            anyhow::bail!("banner never found")
        }

        fn before_next_page(
            &mut self,
            _driver: &mut ScriptedDriver,
            _url: &PageUrl,
        ) -> anyhow::Result<()> {
            anyhow::bail!("cleanup failed")
        }
    }

    #[tokio::test]
    async fn test_grooming_hook_failures_are_swallowed() {
        let mut controller =
            SessionController::new(test_config(), site(), SqliteStorage::in_memory().unwrap())
                .unwrap()
                .with_hooks(SwallowedHooks);

        controller.start().await.unwrap();
        assert_eq!(controller.frontier().visited_len(), 4);
    }

    #[tokio::test]
    async fn test_stop_before_start_visits_nothing() {
        let mut controller =
            SessionController::new(test_config(), site(), SqliteStorage::in_memory().unwrap())
                .unwrap();

        controller.handle().stop();
        controller.start().await.unwrap();

        assert_eq!(controller.state(), SessionState::Stopped);
        assert_eq!(controller.frontier().visited_len(), 0);
        assert!(controller.surfaces[0].navigated.is_empty());
    }

    #[tokio::test]
    async fn test_router_dispatches_on_visited_pages() {
        use std::sync::{Arc, Mutex};

        let matched = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&matched);

        let mut router: Router<ScriptedDriver> = Router::new();
        router.register("record", move |_driver, url, _route| {
            sink.lock().unwrap().push(url.as_str().to_string());
            Ok(())
        });
        router
            .route("page-a", Matcher::Path("/a".to_string()), "record")
            .unwrap();

        let mut controller =
            SessionController::new(test_config(), site(), SqliteStorage::in_memory().unwrap())
                .unwrap()
                .with_router(router);

        controller.start().await.unwrap();

        assert_eq!(matched.lock().unwrap().as_slice(), ["http://example.com/a"]);
    }

    #[tokio::test]
    async fn test_resume_continues_from_snapshot() {
        let mut storage = SqliteStorage::in_memory().unwrap();

        let cache = CacheDocument {
            spider: "test".to_string(),
            timestamp: Utc::now(),
            urls_to_visit: vec!["http://example.com/b".to_string()],
            visited_urls: vec![
                "http://example.com/".to_string(),
                "http://example.com/a".to_string(),
            ],
        };
        storage
            .save_or_create(CACHE_DOCUMENT, &serde_json::to_value(&cache).unwrap())
            .unwrap();

        let mut prior = Performance::start_now();
        prior.record_iteration(1, 2);
        storage
            .save_or_create(
                PERFORMANCE_DOCUMENT,
                &serde_json::to_value(&prior).unwrap(),
            )
            .unwrap();

        let mut controller = SessionController::new(test_config(), site(), storage).unwrap();
        controller.resume().await.unwrap();

        // Only the queued URL is navigated; the start URL is not re-seeded.
        assert_eq!(controller.surfaces[0].navigated, vec!["http://example.com/b"]);
        assert_eq!(controller.frontier().visited_len(), 3);
        assert_eq!(controller.performance().iteration_count, 2);
        assert!(controller.performance().is_finalized());
    }

    #[tokio::test]
    async fn test_resume_without_cache_behaves_like_start() {
        let mut controller =
            SessionController::new(test_config(), site(), SqliteStorage::in_memory().unwrap())
                .unwrap();

        controller.resume().await.unwrap();
        assert_eq!(controller.frontier().visited_len(), 4);
    }

    #[tokio::test]
    async fn test_multi_surface_processes_sequentially() {
        let pages: &[(&str, &[&str])] = &[
            ("http://example.com/", &["/a", "/b"]),
            ("http://example.com/a", &[]),
            ("http://example.com/b", &[]),
        ];

        let surfaces = vec![ScriptedDriver::new(pages), ScriptedDriver::new(pages)];
        let mut controller = SessionController::with_surfaces(
            test_config(),
            surfaces,
            SqliteStorage::in_memory().unwrap(),
        )
        .unwrap();

        controller.start().await.unwrap();

        assert_eq!(controller.frontier().visited_len(), 3);
        assert_eq!(controller.performance().iteration_count, 3);
        // The second round splits the two discovered URLs across surfaces.
        assert_eq!(
            controller.surfaces[0].navigated,
            vec!["http://example.com/", "http://example.com/a"]
        );
        assert_eq!(controller.surfaces[1].navigated, vec!["http://example.com/b"]);
    }

    #[tokio::test]
    async fn test_no_surfaces_is_a_config_error() {
        let result: crate::Result<SessionController<ScriptedDriver, SqliteStorage>> =
            SessionController::with_surfaces(
                test_config(),
                vec![],
                SqliteStorage::in_memory().unwrap(),
            );

        assert!(matches!(result, Err(CrawlError::Config(_))));
    }
}
