//! Integration tests for the detail-page fan-out engine.
//!
//! A single `wiremock` responder serves every detail page and decides per
//! `id` whether to answer quickly, stall past the client timeout, or fail.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use playscrape_core::AppConfig;
use playscrape_scraper::{FanOutReport, PlayClient};

#[derive(Clone, Copy)]
enum Behaviour {
    Delay(Duration),
    Status(u16),
    NoTitle,
}

/// Serves a minimal item page for any `id`, applying per-id overrides.
struct DetailResponder {
    overrides: HashMap<String, Behaviour>,
}

impl Respond for DetailResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let id = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "id")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();
        let page = format!(
            r#"<html><body><h1 itemprop="name"><span>Title of {id}</span></h1></body></html>"#
        );

        match self.overrides.get(&id) {
            None => ResponseTemplate::new(200).set_body_string(page),
            Some(Behaviour::Delay(delay)) => ResponseTemplate::new(200)
                .set_body_string(page)
                .set_delay(*delay),
            Some(Behaviour::Status(status)) => ResponseTemplate::new(*status),
            Some(Behaviour::NoTitle) => ResponseTemplate::new(200)
                .set_body_string("<html><body><p>We're sorry, not found.</p></body></html>"),
        }
    }
}

fn app_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("com.example.app{i}")).collect()
}

/// 1-second client timeout, no retries.
fn test_client(server: &MockServer) -> PlayClient {
    let mut config = AppConfig::default().with_origin(&server.uri());
    config.request_timeout_secs = 1;
    config.max_retries = 0;
    config.retry_backoff_base_ms = 0;
    PlayClient::new(&config).expect("failed to build test PlayClient")
}

async fn mount_details(server: &MockServer, overrides: HashMap<String, Behaviour>) {
    Mock::given(method("GET"))
        .and(path("/store/apps/details"))
        .respond_with(DetailResponder { overrides })
        .mount(server)
        .await;
}

fn assert_partitioned(report: &FanOutReport, input: &[String]) {
    assert_eq!(report.records.len() + report.failed.len(), input.len());
    let succeeded: HashSet<&str> = report.records.iter().map(|r| r.app_id.as_str()).collect();
    let failed: HashSet<&str> = report.failed.iter().map(String::as_str).collect();
    assert!(succeeded.is_disjoint(&failed));
    let all: HashSet<&str> = succeeded.union(&failed).copied().collect();
    let expected: HashSet<&str> = input.iter().map(String::as_str).collect();
    assert_eq!(all, expected);
}

#[tokio::test]
async fn sixty_items_with_two_timeouts() {
    let server = MockServer::start().await;
    let ids = app_ids(60);
    let overrides = HashMap::from([
        (ids[5].clone(), Behaviour::Delay(Duration::from_secs(3))),
        (ids[41].clone(), Behaviour::Delay(Duration::from_secs(3))),
    ]);
    mount_details(&server, overrides).await;

    let client = test_client(&server);
    let report = client.resolve_details_with_limit(&ids, 10).await;

    assert_eq!(report.records.len(), 58);
    let mut failed = report.failed.clone();
    failed.sort();
    assert_eq!(failed, vec![ids[41].clone(), ids[5].clone()]);
    assert_partitioned(&report, &ids);
    for record in &report.records {
        assert_eq!(record.title, format!("Title of {}", record.app_id));
    }
}

#[tokio::test]
async fn records_arrive_in_completion_order() {
    let server = MockServer::start().await;
    let ids = app_ids(3);
    let overrides = HashMap::from([(
        ids[0].clone(),
        Behaviour::Delay(Duration::from_millis(400)),
    )]);
    mount_details(&server, overrides).await;

    let client = test_client(&server);
    let report = client.resolve_details_with_limit(&ids, 3).await;

    assert!(report.failed.is_empty());
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.records.last().unwrap().app_id, ids[0]);
}

#[tokio::test]
async fn error_statuses_and_non_item_pages_are_reported() {
    let server = MockServer::start().await;
    let ids = app_ids(6);
    let overrides = HashMap::from([
        (ids[1].clone(), Behaviour::Status(404)),
        (ids[2].clone(), Behaviour::Status(500)),
        (ids[3].clone(), Behaviour::NoTitle),
        (ids[4].clone(), Behaviour::Status(302)),
    ]);
    mount_details(&server, overrides).await;

    let client = test_client(&server);
    let report = client.resolve_details_with_limit(&ids, 2).await;

    let mut succeeded: Vec<&str> = report.records.iter().map(|r| r.app_id.as_str()).collect();
    succeeded.sort_unstable();
    assert_eq!(succeeded, vec![ids[0].as_str(), ids[5].as_str()]);
    assert_eq!(report.failed.len(), 4);
    assert_partitioned(&report, &ids);
}

#[tokio::test]
async fn failed_items_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/store/apps/details"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let mut config = AppConfig::default().with_origin(&server.uri());
    config.max_retries = 3;
    config.retry_backoff_base_ms = 0;
    let client = PlayClient::new(&config).unwrap();

    let report = client.resolve_details(&app_ids(2)).await;
    assert!(report.records.is_empty());
    assert_eq!(report.failed.len(), 2);
}

#[tokio::test]
async fn duplicate_identifiers_resolve_twice() {
    let server = MockServer::start().await;
    mount_details(&server, HashMap::new()).await;

    let ids = vec!["com.dup".to_owned(), "com.dup".to_owned()];
    let report = test_client(&server).resolve_details_with_limit(&ids, 4).await;
    assert_eq!(report.records.len(), 2);
    assert!(report.records.iter().all(|r| r.app_id == "com.dup"));
}

#[tokio::test]
async fn empty_input_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = test_client(&server).resolve_details(&[]).await;
    assert_eq!(report, FanOutReport::default());
}

#[tokio::test]
async fn zero_concurrency_is_clamped() {
    let server = MockServer::start().await;
    mount_details(&server, HashMap::new()).await;

    let ids = app_ids(3);
    let report = test_client(&server).resolve_details_with_limit(&ids, 0).await;
    assert_eq!(report.records.len(), 3);
}
