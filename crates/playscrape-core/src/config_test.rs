use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.base_url, "https://play.google.com/store/apps");
    assert_eq!(cfg.language, "en");
    assert_eq!(cfg.country, "us");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.concurrent_requests, 10);
    assert_eq!(cfg.num_results, 60);
    assert_eq!(cfg.dev_results, 24);
    assert_eq!(cfg.similar_results, 24);
}

#[test]
fn locale_overrides_are_applied() {
    let mut map = HashMap::new();
    map.insert("PLAYSCRAPE_LANGUAGE", "de");
    map.insert("PLAYSCRAPE_COUNTRY", "at");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.language, "de");
    assert_eq!(cfg.country, "at");
}

#[test]
fn base_url_trailing_slash_is_stripped() {
    let mut map = HashMap::new();
    map.insert("PLAYSCRAPE_BASE_URL", "http://localhost:8080/store/apps/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, "http://localhost:8080/store/apps");
}

#[test]
fn base_url_without_scheme_is_rejected() {
    let mut map = HashMap::new();
    map.insert("PLAYSCRAPE_BASE_URL", "play.google.com/store/apps");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLAYSCRAPE_BASE_URL"),
        "expected InvalidEnvVar(PLAYSCRAPE_BASE_URL), got: {result:?}"
    );
}

#[test]
fn concurrent_requests_override() {
    let mut map = HashMap::new();
    map.insert("PLAYSCRAPE_CONCURRENT_REQUESTS", "4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.concurrent_requests, 4);
}

#[test]
fn concurrent_requests_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("PLAYSCRAPE_CONCURRENT_REQUESTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLAYSCRAPE_CONCURRENT_REQUESTS"),
        "expected InvalidEnvVar(PLAYSCRAPE_CONCURRENT_REQUESTS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("PLAYSCRAPE_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLAYSCRAPE_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PLAYSCRAPE_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_retries_override() {
    let mut map = HashMap::new();
    map.insert("PLAYSCRAPE_MAX_RETRIES", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_retries, 0);
}

#[test]
fn num_results_invalid() {
    let mut map = HashMap::new();
    map.insert("PLAYSCRAPE_NUM_RESULTS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PLAYSCRAPE_NUM_RESULTS"),
        "expected InvalidEnvVar(PLAYSCRAPE_NUM_RESULTS), got: {result:?}"
    );
}

#[test]
fn with_origin_rewrites_all_endpoints() {
    let cfg = AppConfig::default().with_origin("http://127.0.0.1:9000/");
    assert_eq!(cfg.base_url, "http://127.0.0.1:9000/store/apps");
    assert_eq!(cfg.search_url, "http://127.0.0.1:9000/store/search");
    assert_eq!(cfg.suggestion_url, "http://127.0.0.1:9000/suggest/SuggRequest");
    assert_eq!(cfg.language, "en");
}
