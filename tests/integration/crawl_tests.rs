//! End-to-end crawl tests against a mock listings site

use listing_sweep::config::{config_hash, Config};
use listing_sweep::crawler::{crawl, CrawlOutcome, CrawlSession};
use listing_sweep::{ListingRecord, SearchQuery, SweepError, PLACEHOLDER};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIRST_PAGE: &str = "/search/si/1/cook/toronto";
const SECOND_PAGE: &str = "/search/si/1/cook/toronto/page-2.html";
const THIRD_PAGE: &str = "/search/si/1/cook/toronto/page-3.html";

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.crawler.base_url = base_url.to_string();
    config.crawler.page_delay = 10; // Very short for testing
    config
}

fn query() -> SearchQuery {
    SearchQuery::new("cook", "toronto")
}

/// One listing block in the site's markup
fn listing(name: &str, address: &str, website: &str, phone: &str) -> String {
    format!(
        r#"<div class="listing__content">
            <h3 class="listing__name"><a href="/bus/x">{}</a></h3>
            <span class="listing__address">{}</span>
            <ul class="mlr">
                <li class="mlr__item--website"><a href="/gourl/x?redirect={}">Website</a></li>
                <li class="mlr__item--phone"><span>Phone</span> <span>Number</span> {}</li>
            </ul>
        </div>"#,
        name, address, website, phone
    )
}

/// A results page with the given listings and optional page count indicator
fn results_page(listings: &[String], page_count: Option<&str>) -> String {
    let indicator = page_count
        .map(|count| format!(r#"<span class="pageCount">{}</span>"#, count))
        .unwrap_or_default();

    format!(
        r#"<html><head><title>Results</title></head><body>
        <div class="resultList">{}</div>
        <div class="view_more_section_noScroll">{}</div>
        </body></html>"#,
        listings.join("\n"),
        indicator
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String, expected: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(expected)
        .mount(server)
        .await;
}

fn alpha() -> String {
    listing(
        "1 Alpha Cafe",
        "10 King St W Toronto ON",
        "https%3A%2F%2Falpha.example",
        "416-555-0101",
    )
}

fn bravo(rank: u32) -> String {
    listing(
        &format!("{} Bravo Grill", rank),
        "22 Queen St E Toronto ON",
        "https%3A%2F%2Fbravo.example",
        "416-555-0102",
    )
}

fn charlie() -> String {
    listing(
        "4 Charlie Kitchen",
        "9 Bay St Toronto ON",
        "https%3A%2F%2Fcharlie.example",
        "416-555-0103",
    )
}

fn names(records: &[ListingRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn test_full_crawl_across_pages() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        FIRST_PAGE,
        results_page(&[alpha(), bravo(2)], Some("1 / 2")),
        1,
    )
    .await;

    // Bravo shows up again under a different rank
    mount_page(
        &mock_server,
        SECOND_PAGE,
        results_page(&[bravo(3), charlie()], Some("2 / 2")),
        1,
    )
    .await;

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(create_test_config(&mock_server.uri()), query(), &mut sink).await;

    assert!(report.outcome.is_done(), "{:?}", report.outcome);
    assert_eq!(
        names(&report.records),
        vec!["Alpha Cafe", "Bravo Grill", "Charlie Kitchen"]
    );
    assert_eq!(sink, report.records);

    let alpha = &report.records[0];
    assert_eq!(alpha.location, "10 King St W");
    assert_eq!(alpha.website, "https://alpha.example");
    assert_eq!(alpha.phone, "416-555-0101");

    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.stats.listings_seen, 4);
    assert_eq!(report.stats.records_emitted, 3);
    assert_eq!(report.stats.duplicates_skipped, 1);
    assert!(report.stats.finished_at.is_some());
}

#[tokio::test]
async fn test_three_pages_follow_from_search_url() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, FIRST_PAGE, results_page(&[alpha()], Some("1 / 3")), 1).await;
    mount_page(&mock_server, SECOND_PAGE, results_page(&[bravo(2)], Some("2 / 3")), 1).await;
    mount_page(&mock_server, THIRD_PAGE, results_page(&[charlie()], Some("3 / 3")), 1).await;

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(create_test_config(&mock_server.uri()), query(), &mut sink).await;

    assert!(report.outcome.is_done(), "{:?}", report.outcome);
    assert_eq!(report.stats.pages_fetched, 3);
    assert_eq!(report.records.len(), 3);
}

#[tokio::test]
async fn test_single_page_without_indicator() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, FIRST_PAGE, results_page(&[alpha()], None), 1).await;

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(create_test_config(&mock_server.uri()), query(), &mut sink).await;

    assert!(report.outcome.is_done());
    assert_eq!(names(&report.records), vec!["Alpha Cafe"]);
}

#[tokio::test]
async fn test_duplicates_within_a_page() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        FIRST_PAGE,
        results_page(&[alpha(), alpha(), alpha()], Some("1 / 1")),
        1,
    )
    .await;

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(create_test_config(&mock_server.uri()), query(), &mut sink).await;

    assert_eq!(report.records.len(), 1);
    assert_eq!(sink.len(), 1);
    assert_eq!(report.stats.duplicates_skipped, 2);
}

#[tokio::test]
async fn test_missing_fields_use_placeholder() {
    let mock_server = MockServer::start().await;

    let bare = r#"<div class="listing__content"><h3 class="listing__name">5 Delta Deli</h3></div>"#;
    mount_page(&mock_server, FIRST_PAGE, results_page(&[bare.to_string()], None), 1).await;

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(create_test_config(&mock_server.uri()), query(), &mut sink).await;

    assert_eq!(
        report.records,
        vec![ListingRecord::new(
            "Delta Deli",
            PLACEHOLDER,
            PLACEHOLDER,
            PLACEHOLDER
        )]
    );
}

#[tokio::test]
async fn test_captcha_aborts_crawl() {
    let mock_server = MockServer::start().await;

    let challenge = format!(
        r#"<html><body>
        <form action="/verify"><div class="g-recaptcha"></div>
        <input type="hidden" name="g-recaptcha-response" value=""></form>
        {}
        <span class="pageCount">1 / 3</span>
        </body></html>"#,
        alpha()
    );
    mount_page(&mock_server, FIRST_PAGE, challenge, 1).await;
    mount_page(&mock_server, SECOND_PAGE, results_page(&[bravo(2)], None), 0).await;

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(create_test_config(&mock_server.uri()), query(), &mut sink).await;

    match &report.outcome {
        CrawlOutcome::Aborted(SweepError::CaptchaDetected { url }) => {
            assert!(url.ends_with(FIRST_PAGE), "{}", url)
        }
        other => panic!("expected captcha abort, got {:?}", other),
    }
    assert!(report.outcome.error().map_or(false, |e| e.needs_intervention()));
    assert!(report.records.is_empty());
    assert!(sink.is_empty());
    assert_eq!(report.stats.listings_seen, 0);
}

#[tokio::test]
async fn test_http_404_aborts_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FIRST_PAGE))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, SECOND_PAGE, results_page(&[bravo(2)], None), 0).await;

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(create_test_config(&mock_server.uri()), query(), &mut sink).await;

    match &report.outcome {
        CrawlOutcome::Aborted(SweepError::Fetch { status, reason, .. }) => {
            assert_eq!(*status, 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected fetch abort, got {:?}", other),
    }
    assert!(report.records.is_empty());
    assert_eq!(report.stats.pages_fetched, 0);
}

#[tokio::test]
async fn test_failure_after_first_page_keeps_records() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        FIRST_PAGE,
        results_page(&[alpha(), bravo(2)], Some("1 / 2")),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path(SECOND_PAGE))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(create_test_config(&mock_server.uri()), query(), &mut sink).await;

    assert!(matches!(
        report.outcome,
        CrawlOutcome::Aborted(SweepError::Fetch { status: 503, .. })
    ));
    assert_eq!(names(&report.records), vec!["Alpha Cafe", "Bravo Grill"]);
    assert_eq!(sink, report.records);
}

#[tokio::test]
async fn test_malformed_page_count_aborts() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        FIRST_PAGE,
        results_page(&[alpha()], Some("1 / many")),
        1,
    )
    .await;

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(create_test_config(&mock_server.uri()), query(), &mut sink).await;

    assert!(matches!(
        report.outcome,
        CrawlOutcome::Aborted(SweepError::PaginationParse { .. })
    ));
    // Listings on the page were read before the indicator
    assert_eq!(report.records.len(), 1);
}

#[tokio::test]
async fn test_stalled_page_count_aborts() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, FIRST_PAGE, results_page(&[alpha()], Some("1 / 4")), 1).await;
    // The second page claims to be page 1 again
    mount_page(&mock_server, SECOND_PAGE, results_page(&[bravo(2)], Some("1 / 4")), 1).await;

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(create_test_config(&mock_server.uri()), query(), &mut sink).await;

    assert!(matches!(
        report.outcome,
        CrawlOutcome::Aborted(SweepError::PaginationStalled {
            current: 1,
            previous: 1
        })
    ));
    assert_eq!(report.records.len(), 2);
}

#[tokio::test]
async fn test_cancellation_stops_after_fetch() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, FIRST_PAGE, results_page(&[alpha()], Some("1 / 2")), 1).await;
    mount_page(&mock_server, SECOND_PAGE, results_page(&[bravo(2)], None), 0).await;

    let token = CancellationToken::new();
    let session = CrawlSession::new(create_test_config(&mock_server.uri()), query())
        .expect("Failed to create session")
        .with_cancellation(token.clone());
    token.cancel();

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = session.run(&mut sink).await;

    assert!(matches!(report.outcome, CrawlOutcome::Cancelled));
    assert_eq!(report.stats.pages_fetched, 1);
    assert!(report.records.is_empty());
}

#[tokio::test]
async fn test_cancellation_during_delay() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, FIRST_PAGE, results_page(&[alpha()], Some("1 / 2")), 1).await;
    mount_page(&mock_server, SECOND_PAGE, results_page(&[bravo(2)], None), 0).await;

    let mut config = create_test_config(&mock_server.uri());
    config.crawler.page_delay = 30_000;

    let session = CrawlSession::new(config, query()).expect("Failed to create session");
    let token = session.cancellation_token();

    let (tx, mut rx) = mpsc::unbounded_channel::<ListingRecord>();
    let task = tokio::spawn(async move {
        let mut tx = tx;
        session.run(&mut tx).await
    });

    // The first record arrives before the delay starts
    let first = rx.recv().await.expect("no record streamed");
    assert_eq!(first.name, "Alpha Cafe");
    token.cancel();

    let report = tokio::time::timeout(std::time::Duration::from_secs(5), task)
        .await
        .expect("cancellation did not interrupt the delay")
        .expect("crawl task panicked");

    assert!(matches!(report.outcome, CrawlOutcome::Cancelled));
    assert_eq!(report.records.len(), 1);
}

#[tokio::test]
async fn test_records_stream_through_channel() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        FIRST_PAGE,
        results_page(&[alpha(), bravo(2)], Some("1 / 2")),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        SECOND_PAGE,
        results_page(&[charlie(), alpha()], Some("2 / 2")),
        1,
    )
    .await;

    let (mut tx, mut rx) = mpsc::unbounded_channel::<ListingRecord>();
    let report = crawl(create_test_config(&mock_server.uri()), query(), &mut tx).await;
    drop(tx);

    let mut streamed = Vec::new();
    while let Some(record) = rx.recv().await {
        streamed.push(record);
    }

    assert!(report.outcome.is_done());
    assert_eq!(streamed, report.records);
    assert_eq!(
        names(&streamed),
        vec!["Alpha Cafe", "Bravo Grill", "Charlie Kitchen"]
    );
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FIRST_PAGE))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[alpha()], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(create_test_config(&mock_server.uri()), query(), &mut sink).await;

    assert!(report.outcome.is_done(), "{:?}", report.outcome);
}

#[tokio::test]
async fn test_search_terms_are_escaped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/search/si/1/hair%20salon/Saint%20John",
        results_page(&[alpha()], None),
        1,
    )
    .await;

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(
        create_test_config(&mock_server.uri()),
        SearchQuery::new("hair salon", "Saint John"),
        &mut sink,
    )
    .await;

    assert!(report.outcome.is_done(), "{:?}", report.outcome);
    assert_eq!(report.records.len(), 1);
}

#[tokio::test]
async fn test_invalid_query_aborts_before_fetching() {
    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = crawl(
        create_test_config("http://127.0.0.1:9"),
        SearchQuery::new("cook", "  "),
        &mut sink,
    )
    .await;

    assert!(matches!(
        report.outcome,
        CrawlOutcome::Aborted(SweepError::Url(_))
    ));
    assert_eq!(report.stats.pages_fetched, 0);
}

#[tokio::test]
async fn test_report_records_config_hash() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, FIRST_PAGE, results_page(&[alpha()], None), 1).await;

    let hash = config_hash("[crawler]\npage-delay = 10\n");
    let session = CrawlSession::new(create_test_config(&mock_server.uri()), query())
        .expect("Failed to create session")
        .with_config_hash(hash.clone());

    let mut sink: Vec<ListingRecord> = Vec::new();
    let report = session.run(&mut sink).await;

    assert!(report.outcome.is_done(), "{:?}", report.outcome);
    assert_eq!(report.stats.config_hash, Some(hash));
}
