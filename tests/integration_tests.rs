//! Integration tests using mock HTTP server
//!
//! Tests the full flow: site config → feed requests → window and controls

use jetpager::config::{PagerConfig, SiteConfig};
use jetpager::controller::{load_all, PageAction, PagerController, PagerState};
use jetpager::feed::{BloggerFeed, FeedSource};
use jetpager::http::HttpClientConfig;
use jetpager::pagination::render_text;
use jetpager::posts::load_custom_posts;
use jetpager::{Error, PostListConfig};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BLOG: &str = "https://example.blogspot.com";

// ============================================================================
// Helpers
// ============================================================================

fn feed_body(total: u32, first: u32, count: u32) -> Value {
    let entries: Vec<Value> = (first..first + count)
        .map(|n| {
            json!({
                "link": [{"href": format!("{BLOG}/2024/01/post-{n}.html")}],
                "title": {"$t": format!("Post {n}")},
                "summary": {"$t": "Summary"},
                "published": {"$t": "2024-01-15T08:00:00.000+07:00"}
            })
        })
        .collect();

    json!({
        "feed": {
            "openSearch$totalResults": {"$t": total.to_string()},
            "category": [{"term": "Rust"}],
            "entry": entries
        }
    })
}

async fn mount_count(server: &MockServer, feed_path: &str, total: u32) {
    Mock::given(method("GET"))
        .and(path(feed_path))
        .and(query_param("alt", "json"))
        .and(query_param("max-results", "1"))
        .and(query_param_is_missing("start-index"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body(total, 1, 1)))
        .mount(server)
        .await;
}

fn feed_for(server: &MockServer) -> BloggerFeed {
    let http = HttpClientConfig::builder()
        .timeout(Duration::from_secs(5))
        .no_rate_limit()
        .build();
    BloggerFeed::new(&server.uri(), http).unwrap()
}

// ============================================================================
// Pager Flow
// ============================================================================

#[tokio::test]
async fn test_load_and_fetch_page() {
    let server = MockServer::start().await;
    mount_count(&server, "/feeds/posts/summary/", 95).await;

    Mock::given(method("GET"))
        .and(path("/feeds/posts/summary/"))
        .and(query_param("start-index", "60"))
        .and(query_param("max-results", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body(95, 61, 10)))
        .expect(1)
        .mount(&server)
        .await;

    let feed = feed_for(&server);
    let mut pager = PagerController::new(
        PagerConfig::new(BLOG).with_current_url(format!("{BLOG}/search?max-results=10&page=5")),
    );

    let controls = pager.load(&feed).await;
    assert_eq!(
        render_text(&controls),
        "\u{2039} 1 . . 3 4 [5] 6 7 . . 10 \u{203a}"
    );

    let action = pager.select(7, &feed).await.unwrap();
    assert_eq!(
        action,
        Some(PageAction::Fetch {
            page: 7,
            start_index: 60,
            max_results: 10,
        })
    );
    assert_eq!(pager.state().name(), "idle");
    assert_eq!(pager.state().items().len(), 10);
    assert_eq!(pager.state().items()[0].title, "Post 61");
    assert_eq!(
        render_text(&pager.controls()),
        "\u{2039} 1 . . 5 6 [7] 8 9 . . 10 \u{203a}"
    );
}

#[tokio::test]
async fn test_label_pager_navigates_to_first_page() {
    let server = MockServer::start().await;
    mount_count(&server, "/feeds/posts/summary/-/Rust%20Tips/", 40).await;

    let feed = feed_for(&server);
    let mut pager = PagerController::new(
        PagerConfig::new(BLOG)
            .with_label("Rust Tips")
            .with_page_size(8)
            .with_current_url(format!("{BLOG}/search/label/Rust%20Tips?page=3")),
    );

    pager.load(&feed).await;
    let action = pager.select(1, &feed).await.unwrap();

    assert_eq!(
        action,
        Some(PageAction::Navigate {
            url: format!("{BLOG}/search/label/Rust%20Tips?max-results=8&page=1")
        })
    );
    // Navigation leaves the pager on its current page
    assert_eq!(pager.state().window().unwrap().current_page, 3);
}

#[tokio::test]
async fn test_small_dataset_is_suppressed() {
    let server = MockServer::start().await;
    mount_count(&server, "/feeds/posts/summary/", 7).await;

    let feed = feed_for(&server);
    let mut pager = PagerController::new(PagerConfig::new(BLOG));

    assert!(pager.load(&feed).await.is_empty());
    assert_eq!(
        pager.state(),
        &PagerState::Suppressed {
            total_items: Some(7)
        }
    );
}

#[tokio::test]
async fn test_failed_page_fetch_keeps_window() {
    let server = MockServer::start().await;
    mount_count(&server, "/feeds/posts/summary/", 50).await;

    Mock::given(method("GET"))
        .and(path("/feeds/posts/summary/"))
        .and(query_param("start-index", "20"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let feed = feed_for(&server);
    let mut pager = PagerController::new(PagerConfig::new(BLOG));
    pager.load(&feed).await;

    let err = pager.select(3, &feed).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert_eq!(pager.state().window().unwrap().current_page, 1);
    assert_eq!(pager.pending_requests(), 0);
}

#[tokio::test]
async fn test_stale_page_response_is_discarded() {
    let server = MockServer::start().await;
    mount_count(&server, "/feeds/posts/summary/", 100).await;

    for start in [20, 50] {
        Mock::given(method("GET"))
            .and(path("/feeds/posts/summary/"))
            .and(query_param("start-index", start.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(feed_body(100, start + 1, 10)),
            )
            .mount(&server)
            .await;
    }

    let feed = feed_for(&server);
    let mut pager = PagerController::new(PagerConfig::new(BLOG));
    pager.load(&feed).await;

    // Two page requests in flight, page 6 issued last
    let older = pager.request_page(3).unwrap();
    let newer = pager.request_page(6).unwrap();

    let newer_page = feed.fetch(&newer.query).await.unwrap();
    let older_page = feed.fetch(&older.query).await.unwrap();

    assert!(pager.complete(newer.id, newer_page));
    assert!(!pager.complete(older.id, older_page));

    assert_eq!(pager.state().window().unwrap().current_page, 6);
    assert_eq!(pager.state().items()[0].title, "Post 51");
}

// ============================================================================
// Site Config
// ============================================================================

#[tokio::test]
async fn test_load_all_from_site_config() {
    let server = MockServer::start().await;
    mount_count(&server, "/feeds/posts/summary/", 60).await;
    mount_count(&server, "/feeds/posts/summary/-/Rust/", 4).await;

    let site = SiteConfig::from_yaml(
        r#"
site_url: example.blogspot.com
current_url: "https://example.blogspot.com/?page=2"
pagers:
  - name: main
    posts: 12
  - name: sidebar
    posts: 5
    label: Rust
  - name: archive
    pagination: "false"
"#,
    )
    .unwrap();

    let feed = feed_for(&server);
    let mut pagers: Vec<PagerController> = site
        .pager_configs()
        .into_iter()
        .map(PagerController::new)
        .collect();

    let controls = load_all(&mut pagers, &feed).await;

    assert_eq!(render_text(&controls[0]), "\u{2039} 1 [2] 3 4 5 \u{203a}");
    assert!(controls[1].is_empty());
    assert!(controls[2].is_empty());
    assert_eq!(pagers[1].state().name(), "suppressed");
    assert_eq!(
        pagers[2].state(),
        &PagerState::Suppressed { total_items: None }
    );
    assert_eq!(
        pagers[0].first_page_url(),
        "https://example.blogspot.com?max-results=12&page=1"
    );
}

// ============================================================================
// Custom Posts
// ============================================================================

#[tokio::test]
async fn test_custom_posts_exclude_current() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feeds/posts/summary/-/Rust/"))
        .and(query_param("max-results", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body(30, 1, 4)))
        .expect(1)
        .mount(&server)
        .await;

    let feed = feed_for(&server);
    let mut config = PostListConfig::new("related");
    config.label = Some("Rust".to_string());
    config.items = 3;
    config.no_item = Some(format!("{BLOG}/2024/01/post-1.html"));

    let collection = load_custom_posts(&feed, &config, &mut StdRng::seed_from_u64(1))
        .await
        .unwrap()
        .unwrap();

    let titles: Vec<_> = collection
        .posts
        .iter()
        .map(|p| p.entry.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Post 2", "Post 3", "Post 4"]);
    assert_eq!(collection.posts[0].date.as_deref(), Some("2024/1/15"));
    assert_eq!(collection.categories, vec!["Rust".to_string()]);
}
