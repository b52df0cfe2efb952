//! Integration tests for crawl expansion
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! fetch -> rank -> expand -> store cycle end-to-end.

use fiscrawl::config::{CrawlerConfig, UserAgentConfig};
use fiscrawl::crawler::{CrawlExpansion, HttpFetcher};
use fiscrawl::features::{EmbeddingTable, FeatureExtractor, KeywordConfig};
use fiscrawl::model::{LabeledExample, RelevanceClassifier};
use fiscrawl::storage::{SqliteStorage, Storage};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_agent_config() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

fn crawler_config(high_score_threshold: f64) -> CrawlerConfig {
    CrawlerConfig {
        fetch_timeout_ms: 2_000,
        high_score_threshold,
    }
}

/// Trains a small classifier on municipal-finance examples so finance
/// links outrank everything else
fn trained_classifier() -> RelevanceClassifier {
    let mut classifier = RelevanceClassifier::new(FeatureExtractor::new(
        KeywordConfig::default(),
        EmbeddingTable::empty(),
    ));
    classifier
        .train(&[
            LabeledExample::new("https://city.gov/finance/budget", "Annual Budget", 1),
            LabeledExample::new("https://city.gov/finance/acfr", "ACFR Report", 1),
            LabeledExample::new("https://city.gov/finance/audit", "Audit Report", 1),
            LabeledExample::new("https://city.gov/treasury/debt", "Debt Service", 1),
            LabeledExample::new("https://city.gov/finance/funds", "General Fund", 1),
            LabeledExample::new("https://city.gov/finance/fiscal", "Fiscal Year Summary", 1),
            LabeledExample::new("https://city.gov/parks/trails", "Hiking Trails", 0),
            LabeledExample::new("https://city.gov/events/festival", "Music Festival", 0),
            LabeledExample::new("https://city.gov/library", "Library Catalog", 0),
            LabeledExample::new("https://city.gov/police", "Report a Crime", 0),
            LabeledExample::new("https://city.gov/utilities", "Pay Utility Bill", 0),
            LabeledExample::new("https://city.gov/contact", "Contact Us", 0),
        ])
        .expect("training should succeed");
    classifier
}

fn expansion(threshold: f64) -> CrawlExpansion<HttpFetcher> {
    let fetcher = HttpFetcher::new(&user_agent_config()).expect("client should build");
    CrawlExpansion::new(fetcher, trained_classifier(), &crawler_config(threshold))
}

async fn mount_page(server: &MockServer, page_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(html.to_string()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_expansion_cycle() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r##"<html><body>
            <a href="/finance/budget">Annual Budget</a>
            <a href="/finance/acfr-2024.pdf">ACFR 2024</a>
            <a href="/parks">Parks and Recreation</a>
            <a href="#top">Back to top</a>
            <a href="javascript:void(0)">Menu</a>
        </body></html>"##,
    )
    .await;

    mount_page(
        &server,
        "/finance/budget",
        r#"<a href="/finance/debt-service">Debt Service Schedule</a>"#,
    )
    .await;

    mount_page(&server, "/parks", r#"<a href="/parks/pool">Swimming Pool</a>"#).await;

    // The document link is stored but must never be fetched itself
    Mock::given(method("GET"))
        .and(path("/finance/acfr-2024.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let results = expansion(0.01).crawl(&base).await.expect("crawl should succeed");

    // Fragment and javascript hrefs never make it into the results
    assert!(results.iter().all(|l| !l.url.contains('#')));
    assert!(results.iter().all(|l| !l.url.starts_with("javascript")));

    // Every score is a probability, and the set is sorted descending
    assert!(results.iter().all(|l| (0.0..=1.0).contains(&l.score)));
    for pair in results.links().windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    // First-pass links carry the seed as provenance
    let budget = results
        .iter()
        .find(|l| l.url == format!("{}/finance/budget", base))
        .expect("budget link present");
    assert_eq!(budget.scraped_from, base);

    // Second-pass links carry the page they were found on
    let debt = results
        .iter()
        .find(|l| l.url == format!("{}/finance/debt-service", base))
        .expect("expansion link present");
    assert_eq!(debt.scraped_from, format!("{}/finance/budget", base));
}

#[tokio::test]
async fn test_duplicate_link_keeps_first_discovery() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/finance/budget">Annual Budget</a>
           <a href="/finance/audit">Audit Report</a>"#,
    )
    .await;

    // The budget page links back to a URL already seen on the seed page
    mount_page(
        &server,
        "/finance/budget",
        r#"<a href="/finance/audit">Audit (footer link)</a>"#,
    )
    .await;

    mount_page(&server, "/finance/audit", "<html></html>").await;

    let results = expansion(0.01).crawl(&base).await.expect("crawl should succeed");

    let audit: Vec<_> = results
        .iter()
        .filter(|l| l.url == format!("{}/finance/audit", base))
        .collect();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].scraped_from, base);
    assert_eq!(audit[0].anchor_text, "Audit Report");
}

#[tokio::test]
async fn test_expansion_failure_keeps_first_pass_results() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/finance/budget">Annual Budget</a>
           <a href="/finance/acfr-2024.pdf">ACFR 2024</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/finance/budget"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let results = expansion(0.01).crawl(&base).await.expect("crawl should succeed");
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_seed_error_reported_as_no_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = expansion(0.9).crawl(&base).await;
    assert!(matches!(
        result,
        Err(fiscrawl::FiscrawlError::NoLinksFound { .. })
    ));
}

#[tokio::test]
async fn test_results_persist_and_query() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/finance/budget">Annual Budget</a>
           <a href="/finance/acfr-2024.pdf">ACFR 2024</a>
           <a href="/parks">Parks and Recreation</a>"#,
    )
    .await;
    mount_page(&server, "/finance/budget", "<html></html>").await;
    mount_page(&server, "/parks", "<html></html>").await;

    let results = expansion(0.01).crawl(&base).await.expect("crawl should succeed");

    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("links.db");
    let mut storage = SqliteStorage::new(&db_path).expect("storage opens");

    let written = storage.append_results(&results).expect("append succeeds");
    assert_eq!(written, results.len());
    assert_eq!(storage.count_links().expect("count"), results.len() as u64);

    let top = storage.top_links(10, None).expect("query succeeds");
    assert_eq!(top.len(), results.len());
    for pair in top.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    let docs = storage.document_links().expect("query succeeds");
    assert_eq!(docs.len(), 1);
    assert!(docs[0].url.ends_with(".pdf"));
}
