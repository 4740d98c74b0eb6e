//! Integration tests for the collect-check-persist pipeline
//!
//! These tests use wiremock to stand up mock catalog sites and exercise the
//! collector, the worker pool, and the full pipeline end-to-end.

use linkrake::config::{Config, CrawlConfig, OutputConfig};
use linkrake::crawler::{run_pipeline, LinkCollector, WorkerPool};
use linkrake::CheckStatus;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_page(body_links: &[&str], next: Option<&str>) -> String {
    let mut body = String::new();
    for link in body_links {
        body.push_str(&format!(r#"<a href="{}">link</a>"#, link));
    }
    if let Some(next_href) = next {
        body.push_str(&format!(r#"<a class="next" href="{}">Next</a>"#, next_href));
    }
    format!("<html><body>{}</body></html>", body)
}

async fn mount_page(server: &MockServer, at: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn collector(base: &str, timeout: Duration) -> LinkCollector {
    LinkCollector::new(
        Url::parse(base).unwrap(),
        Duration::ZERO,
        timeout,
        Duration::from_secs(5),
    )
}

fn test_config(base_url: &str, log_path: &str) -> Config {
    Config {
        crawl: CrawlConfig {
            base_url: base_url.to_string(),
            delay_ms: 0,
            worker_count: 2,
            collector_timeout_secs: 30,
            fetch_timeout_secs: 5,
        },
        output: OutputConfig {
            log_path: log_path.to_string(),
        },
    }
}

#[tokio::test]
async fn test_collector_follows_next_chain_and_dedups() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/catalog",
        html_page(&["/a", "/b", "https://elsewhere.example/off-site"], Some("/catalog2")),
    )
    .await;
    mount_page(&server, "/catalog2", html_page(&["/b", "/c"], None)).await;

    let links = collector(&format!("{}/catalog", base), Duration::from_secs(30))
        .collect()
        .await
        .unwrap();

    // /b appears on both pages but is collected once; the off-site link is
    // filtered out. The next anchor is a same-site link like any other, so
    // /catalog2 is part of the set.
    let expected: Vec<String> = {
        let mut v = vec![
            format!("{}/a", base),
            format!("{}/b", base),
            format!("{}/c", base),
            format!("{}/catalog2", base),
        ];
        v.sort();
        v
    };
    assert_eq!(links, expected);
}

#[tokio::test]
async fn test_collector_terminates_on_pagination_cycle() {
    let server = MockServer::start().await;
    let base = server.uri();

    // A's next points at B, B's next points back at A
    mount_page(&server, "/a", html_page(&["/item1"], Some("/b"))).await;
    mount_page(&server, "/b", html_page(&["/item2"], Some("/a"))).await;

    let links = collector(&format!("{}/a", base), Duration::from_secs(30))
        .collect()
        .await
        .unwrap();

    // Both item links plus the two pagination anchors themselves
    assert_eq!(links.len(), 4);
    assert!(links.contains(&format!("{}/item1", base)));
    assert!(links.contains(&format!("{}/item2", base)));
}

#[tokio::test]
async fn test_collector_terminates_when_next_points_at_current() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/loop", html_page(&["/item1"], Some("/loop"))).await;

    let links = collector(&format!("{}/loop", base), Duration::from_secs(30))
        .collect()
        .await
        .unwrap();

    // One pass over the page: its item link plus the self-referencing next
    assert_eq!(
        links,
        vec![format!("{}/item1", base), format!("{}/loop", base)]
    );
}

#[tokio::test]
async fn test_collector_fetch_failure_truncates_not_fails() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/page1", html_page(&["/a"], Some("/page2"))).await;
    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let links = collector(&format!("{}/page1", base), Duration::from_secs(30))
        .collect()
        .await
        .unwrap();

    // Page 2 failed, so only links gathered from page 1 survive (including
    // the next anchor pointing at page 2) - and that is not an error
    assert_eq!(
        links,
        vec![format!("{}/a", base), format!("{}/page2", base)]
    );
}

#[tokio::test]
async fn test_collector_stops_on_timeout() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/page1", html_page(&["/a"], Some("/page2"))).await;
    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page(&["/never"], None))
                .insert_header("content-type", "text/html"),
        )
        .expect(0)
        .mount(&server)
        .await;

    // The delay after page 1 pushes elapsed time past the timeout, so the
    // walk must stop before touching page 2
    let links = LinkCollector::new(
        Url::parse(&format!("{}/page1", base)).unwrap(),
        Duration::from_millis(100),
        Duration::from_millis(50),
        Duration::from_secs(5),
    )
    .collect()
    .await
    .unwrap();

    assert_eq!(
        links,
        vec![format!("{}/a", base), format!("{}/page2", base)]
    );
}

#[tokio::test]
async fn test_collector_handles_empty_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/empty", html_page(&[], None)).await;

    let links = collector(&format!("{}/empty", base), Duration::from_secs(30))
        .collect()
        .await
        .unwrap();

    assert!(links.is_empty());
}

#[tokio::test]
async fn test_pool_reports_all_reachable() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/a", "<html>a</html>".to_string()).await;
    mount_page(&server, "/b", "<html>b</html>".to_string()).await;

    let links = vec![format!("{}/a", base), format!("{}/b", base)];

    let mut pool = WorkerPool::new(2, Duration::ZERO, Duration::from_secs(5))
        .await
        .unwrap();
    let results = pool.run_checks(links.clone()).await.unwrap();
    pool.shutdown();

    assert_eq!(results.len(), 2);
    for result in &results {
        assert_eq!(result.status, CheckStatus::Ok, "{} should be OK", result.url);
    }

    let urls: HashSet<&String> = results.iter().map(|r| &r.url).collect();
    assert!(urls.contains(&links[0]));
    assert!(urls.contains(&links[1]));
}

#[tokio::test]
async fn test_pool_failure_does_not_affect_siblings() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/good", "<html>good</html>".to_string()).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let links = vec![format!("{}/good", base), format!("{}/missing", base)];

    let mut pool = WorkerPool::new(2, Duration::ZERO, Duration::from_secs(5))
        .await
        .unwrap();
    let results = pool.run_checks(links).await.unwrap();
    pool.shutdown();

    assert_eq!(results.len(), 2);
    for result in &results {
        if result.url.ends_with("/good") {
            assert_eq!(result.status.to_string(), "OK");
        } else {
            assert_eq!(result.status.to_string(), "ERROR: HTTP 404");
        }
    }
}

#[tokio::test]
async fn test_full_pipeline_appends_contiguous_ids() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/catalog", html_page(&["/a", "/b"], None)).await;
    mount_page(&server, "/a", "<html>a</html>".to_string()).await;
    mount_page(&server, "/b", "<html>b</html>".to_string()).await;

    let dir = tempfile::TempDir::new().unwrap();
    let log_path = dir.path().join("results.csv");
    let config = test_config(
        &format!("{}/catalog", base),
        log_path.to_str().unwrap(),
    );

    run_pipeline(config.clone()).await.unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "ID,URL,Status,Timestamp");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("1,"));
    assert!(lines[2].starts_with("2,"));
    assert!(lines[1].contains(",OK,"));
    assert!(lines[2].contains(",OK,"));

    // A second run continues the id sequence in the same file
    run_pipeline(config).await.unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[3].starts_with("3,"));
    assert!(lines[4].starts_with("4,"));
}

#[tokio::test]
async fn test_pipeline_short_circuits_on_zero_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/catalog", html_page(&[], None)).await;

    let dir = tempfile::TempDir::new().unwrap();
    let log_path = dir.path().join("results.csv");
    let config = test_config(
        &format!("{}/catalog", base),
        log_path.to_str().unwrap(),
    );

    run_pipeline(config).await.unwrap();

    // Nothing to check, so the log is never touched
    assert!(!log_path.exists());
}
