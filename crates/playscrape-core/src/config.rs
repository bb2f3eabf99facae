use crate::app_config::{
    AppConfig, DEFAULT_BASE_URL, DEFAULT_SEARCH_URL, DEFAULT_SUGGESTION_URL, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let base_url = parse_url(
        "PLAYSCRAPE_BASE_URL",
        &or_default("PLAYSCRAPE_BASE_URL", DEFAULT_BASE_URL),
    )?;
    let search_url = parse_url(
        "PLAYSCRAPE_SEARCH_URL",
        &or_default("PLAYSCRAPE_SEARCH_URL", DEFAULT_SEARCH_URL),
    )?;
    let suggestion_url = parse_url(
        "PLAYSCRAPE_SUGGESTION_URL",
        &or_default("PLAYSCRAPE_SUGGESTION_URL", DEFAULT_SUGGESTION_URL),
    )?;

    let language = or_default("PLAYSCRAPE_LANGUAGE", "en");
    let country = or_default("PLAYSCRAPE_COUNTRY", "us");
    let log_level = or_default("PLAYSCRAPE_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("PLAYSCRAPE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PLAYSCRAPE_USER_AGENT", DEFAULT_USER_AGENT);

    let concurrent_requests = parse_usize("PLAYSCRAPE_CONCURRENT_REQUESTS", "10")?;
    if concurrent_requests == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PLAYSCRAPE_CONCURRENT_REQUESTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let num_results = parse_u32("PLAYSCRAPE_NUM_RESULTS", "60")?;
    let dev_results = parse_u32("PLAYSCRAPE_DEV_RESULTS", "24")?;
    let similar_results = parse_u32("PLAYSCRAPE_SIMILAR_RESULTS", "24")?;
    let max_retries = parse_u32("PLAYSCRAPE_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("PLAYSCRAPE_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(AppConfig {
        base_url,
        search_url,
        suggestion_url,
        language,
        country,
        log_level,
        request_timeout_secs,
        user_agent,
        concurrent_requests,
        num_results,
        dev_results,
        similar_results,
        max_retries,
        retry_backoff_base_ms,
    })
}

/// Accepts only absolute `http`/`https` endpoints and strips a trailing slash.
fn parse_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("\"{raw}\" is not an absolute http(s) URL"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
