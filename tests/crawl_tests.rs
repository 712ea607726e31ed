//! Integration tests for the crawl session
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full session cycle end-to-end: frontier, driver, and storage.

use orbweave::config::{
    Config, DriverConfig, IgnoreRuleConfig, SessionConfig, StorageConfig,
};
use orbweave::session::SessionController;
use orbweave::storage::{
    CacheDocument, JsonFileStorage, Storage, CACHE_DOCUMENT, PERFORMANCE_DOCUMENT,
};
use orbweave::driver::HttpDriver;
use orbweave::session::Performance;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the given start URL
fn create_test_config(start_url: &str) -> Config {
    Config {
        session: SessionConfig {
            name: "integration".to_string(),
            start_urls: vec![start_url.to_string()],
            crawl: true,
            ignore_queries: false,
            ignore_images: false,
            restrict_search_to: vec![],
            wait_time: 0, // no pacing in tests
            wait_time_range: None,
            page_ready_timeout: 5,
        },
        driver: DriverConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        storage: StorageConfig::default(),
        ignore: vec![],
    }
}

fn storage_in(dir: &tempfile::TempDir) -> JsonFileStorage {
    JsonFileStorage::new(dir.path()).expect("Failed to open storage dir")
}

async fn mount_page(server: &MockServer, at: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{base}/page1">Page 1</a>
            <a href="{base}/page2">Page 2</a>
            </body></html>"#,
            base = base_url
        ),
        1,
    )
    .await;

    // page1 links back home, to page2 again, to a fragment, and off-site;
    // none of those may produce a second fetch.
    mount_page(
        &mock_server,
        "/page1",
        format!(
            r#"<html><head><title>Page 1</title></head><body>
            <a href="{base}/">Home</a>
            <a href="{base}/page2">Page 2</a>
            <a href="{base}/page2#section">Section</a>
            <a href="http://elsewhere.invalid/x">Elsewhere</a>
            </body></html>"#,
            base = base_url
        ),
        1,
    )
    .await;

    mount_page(
        &mock_server,
        "/page2",
        "<html><head><title>Page 2</title></head><body>Done</body></html>".to_string(),
        1,
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&format!("{}/", base_url));
    let driver = HttpDriver::new(&config.driver).expect("Failed to build driver");

    let mut controller = SessionController::new(config, driver, storage_in(&dir))
        .expect("Failed to build controller");
    controller.start().await.expect("Crawl failed");

    assert_eq!(controller.frontier().visited_len(), 3);
    assert!(controller.frontier().is_drained());
    assert_eq!(controller.performance().iteration_count, 3);
    assert_eq!(controller.performance().error_count, 0);
    assert!(controller.performance().is_finalized());

    // The persisted cache must mirror the finished frontier.
    let cache: CacheDocument =
        serde_json::from_value(controller.storage().get(CACHE_DOCUMENT).unwrap()).unwrap();
    assert_eq!(cache.spider, "integration");
    assert!(cache.urls_to_visit.is_empty());
    assert_eq!(cache.visited_urls.len(), 3);

    // Per-page expectations are verified when the mock server drops.
}

#[tokio::test]
async fn test_resume_does_not_refetch_visited_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // One fetch per page across BOTH sessions.
    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><body><a href="{}/only">Only</a></body></html>"#,
            base_url
        ),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/only",
        "<html><body>Leaf</body></html>".to_string(),
        1,
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&format!("{}/", base_url));
    let driver = HttpDriver::new(&config.driver).unwrap();

    let mut first = SessionController::new(config.clone(), driver, storage_in(&dir)).unwrap();
    first.start().await.expect("First session failed");
    assert_eq!(first.frontier().visited_len(), 2);

    // Same storage directory, fresh controller: everything is already
    // visited, so the resumed session drains without a single request.
    let driver = HttpDriver::new(&config.driver).unwrap();
    let mut second = SessionController::new(config, driver, storage_in(&dir)).unwrap();
    second.resume().await.expect("Resumed session failed");

    assert_eq!(second.frontier().visited_len(), 2);
    assert!(second.frontier().is_drained());

    let perf: Performance =
        serde_json::from_value(second.storage().get(PERFORMANCE_DOCUMENT).unwrap()).unwrap();
    assert_eq!(perf.iteration_count, 2);
}

#[tokio::test]
async fn test_ignore_rules_prevent_fetches() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><body>
            <a href="{base}/keep">Keep</a>
            <a href="{base}/cart">Cart</a>
            <a href="{base}/keep?page=2">Pagination</a>
            </body></html>"#,
            base = base_url
        ),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/keep",
        "<html><body>Kept</body></html>".to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/cart",
        "<html><body>Never fetched</body></html>".to_string(),
        0,
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&format!("{}/", base_url));
    config.session.ignore_queries = true;
    config.ignore = vec![IgnoreRuleConfig {
        name: "no-cart".to_string(),
        paths: Some(vec!["/cart".to_string()]),
        regex: None,
    }];

    let driver = HttpDriver::new(&config.driver).unwrap();
    let mut controller = SessionController::new(config, driver, storage_in(&dir)).unwrap();
    controller.start().await.expect("Crawl failed");

    assert_eq!(controller.frontier().visited_len(), 2);
    // Rejected URLs still count as seen.
    assert_eq!(controller.frontier().seen_len(), 4);
}

#[tokio::test]
async fn test_navigation_error_is_counted_and_survived() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><body>
            <a href="{base}/missing">Missing</a>
            <a href="{base}/present">Present</a>
            </body></html>"#,
            base = base_url
        ),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/present",
        "<html><body>Here</body></html>".to_string(),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&format!("{}/", base_url));
    let driver = HttpDriver::new(&config.driver).unwrap();

    let mut controller = SessionController::new(config, driver, storage_in(&dir)).unwrap();
    controller.start().await.expect("Crawl failed");

    assert_eq!(controller.performance().error_count, 1);
    assert_eq!(controller.frontier().visited_len(), 2);
    assert!(controller.performance().is_finalized());
}

#[tokio::test]
async fn test_restricted_selectors_scope_link_discovery() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><body>
            <nav><a href="{base}/nav-page">Nav</a></nav>
            <div class="products"><a href="{base}/product">Product</a></div>
            </body></html>"#,
            base = base_url
        ),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/product",
        "<html><body>Product</body></html>".to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/nav-page",
        "<html><body>Never fetched</body></html>".to_string(),
        0,
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&format!("{}/", base_url));
    config.session.restrict_search_to = vec!["div.products".to_string()];

    let driver = HttpDriver::new(&config.driver).unwrap();
    let mut controller = SessionController::new(config, driver, storage_in(&dir)).unwrap();
    controller.start().await.expect("Crawl failed");

    assert_eq!(controller.frontier().visited_len(), 2);
}
