use super::*;

use playscrape_core::AppConfig;

use crate::urls::generate_post_data;

fn test_config() -> AppConfig {
    AppConfig::default().with_origin("http://127.0.0.1:9")
}

#[test]
fn client_builds_from_default_config() {
    let client = PlayClient::new(&AppConfig::default()).expect("client construction");
    assert_eq!(client.config().language, "en");
}

#[test]
fn request_context_follows_config() {
    let mut config = test_config();
    config.language = "de".to_owned();
    config.country = "at".to_owned();
    let context = RequestContext::from_config(&config);
    assert_eq!(context.language, "de");
    assert_eq!(context.country, "at");
    assert_eq!(context.origin, "http://127.0.0.1:9");
}

#[test]
fn transport_exposes_context() {
    let transport = Transport::new(&test_config()).expect("transport construction");
    assert_eq!(transport.context().origin, "http://127.0.0.1:9");
}

#[test]
fn get_request_defaults() {
    let request = FetchRequest::get("https://play.google.com/store/apps/details?id=com.a");
    assert_eq!(request.method, Method::Get);
    assert!(request.form.is_empty());
    assert!(request.query.is_empty());
    assert!(!request.follow_redirects);
}

#[test]
fn empty_post_gets_default_form() {
    let request = FetchRequest::post("https://play.google.com/store/apps", Vec::new());
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.form, generate_post_data(None, None, None));
}

#[test]
fn post_keeps_explicit_form() {
    let form = generate_post_data(Some(60), Some(2), None);
    let request = FetchRequest::post("https://play.google.com/store/apps", form.clone());
    assert_eq!(request.form, form);
}

#[test]
fn builder_adds_query_and_redirects() {
    let request = FetchRequest::get("https://play.google.com/store/apps/similar?id=com.a")
        .with_query("q", "maps")
        .with_query("c", "apps")
        .following_redirects();
    assert_eq!(
        request.query,
        vec![("q", "maps".to_owned()), ("c", "apps".to_owned())]
    );
    assert!(request.follow_redirects);
}

#[test]
fn collection_query_new_has_no_filters() {
    let query = CollectionQuery::new("TOP_FREE");
    assert_eq!(query.collection, "TOP_FREE");
    assert!(query.category.is_none());
    assert!(query.results.is_none());
    assert!(query.page.is_none());
    assert!(query.age.is_none());
    assert!(!query.detailed);
}

// Validation runs before any request is built; the config points at a
// closed port, so reaching the network would surface as an Http error.

#[tokio::test]
async fn collection_rejects_unknown_names_before_sending() {
    let client = PlayClient::new(&test_config()).unwrap();

    let err = client.collection(&CollectionQuery::new("BOGUS")).await.unwrap_err();
    assert!(matches!(err, ScraperError::UnknownCollection(ref c) if c == "BOGUS"), "got: {err:?}");

    let mut query = CollectionQuery::new("TOP_FREE");
    query.category = Some("NOT_A_CATEGORY".to_owned());
    let err = client.collection(&query).await.unwrap_err();
    assert!(matches!(err, ScraperError::UnknownCategory(_)), "got: {err:?}");

    let mut query = CollectionQuery::new("TOP_FREE");
    query.age = Some("TEENS".to_owned());
    let err = client.collection(&query).await.unwrap_err();
    assert!(matches!(err, ScraperError::UnknownAgeRange(_)), "got: {err:?}");
}

#[tokio::test]
async fn collection_rejects_oversized_window() {
    let client = PlayClient::new(&test_config()).unwrap();
    let mut query = CollectionQuery::new("TOP_FREE");
    query.results = Some(100);
    query.page = Some(6);
    let err = client.collection(&query).await.unwrap_err();
    assert!(
        matches!(err, ScraperError::Validation { parameter: "page", .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn empty_queries_are_rejected() {
    let client = PlayClient::new(&test_config()).unwrap();
    assert!(matches!(
        client.search("   ", None, false).await,
        Err(ScraperError::InvalidQuery(_))
    ));
    assert!(matches!(
        client.suggestions("").await,
        Err(ScraperError::InvalidQuery(_))
    ));
}

#[tokio::test]
async fn search_page_past_token_table_rejected() {
    let client = PlayClient::new(&test_config()).unwrap();
    let err = client.search("maps", Some(13), false).await.unwrap_err();
    assert!(matches!(err, ScraperError::Validation { parameter: "page", .. }), "got: {err:?}");
}

#[tokio::test]
async fn developer_and_similar_validate_page_size() {
    let client = PlayClient::new(&test_config()).unwrap();
    let err = client.developer("Disney", Some(121), None, false).await.unwrap_err();
    assert!(matches!(err, ScraperError::Validation { parameter: "results", .. }), "got: {err:?}");
    let err = client.similar("com.a", Some(0), false).await.unwrap_err();
    assert!(matches!(err, ScraperError::Validation { parameter: "results", .. }), "got: {err:?}");
}
