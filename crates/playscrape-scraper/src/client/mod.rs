//! Storefront client: single-item lookups and listing entry points.

mod listing;
mod origin;
mod transport;

use playscrape_core::AppConfig;

use crate::error::ScraperError;
use crate::fanout::{resolve_details, FanOutReport};
use crate::parse::{extract_app_ids, parse_app_details, parse_cards};
use crate::rate_limit::retry_with_backoff;
use crate::types::{DetailRecord, Listing};
use crate::urls::{build_url, ResourceKind};

pub use listing::CollectionQuery;
pub use origin::storefront_origin;
pub use transport::{FetchRequest, Method, RequestContext, Transport};

/// Client for the app storefront.
///
/// Listing and single-item requests are retried on transient errors (429,
/// 5xx, network failures) up to `max_retries` times. Detail pages fetched by
/// the fan-out engine are not retried.
#[derive(Debug, Clone)]
pub struct PlayClient {
    transport: Transport,
    config: AppConfig,
}

impl PlayClient {
    /// Creates a client from process configuration.
    ///
    /// Point `config` at a mock server with [`AppConfig::with_origin`] in tests.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScraperError::InvalidBaseUrl`] if the base
    /// URL cannot produce an `Origin` header.
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            transport: Transport::new(config)?,
            config: config.clone(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Fetches and parses one item's detail page.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidIdentifier`] wrapping the cause when the
    /// request fails (after retries) or the page has no title.
    pub async fn details(&self, app_id: &str) -> Result<DetailRecord, ScraperError> {
        let url = build_url(&self.config.base_url, ResourceKind::Details, app_id)?;
        let invalid = |source: ScraperError| ScraperError::InvalidIdentifier {
            app_id: app_id.to_owned(),
            source: Box::new(source),
        };

        let body = self
            .fetch_with_retry(&FetchRequest::get(url.as_str()))
            .await
            .map_err(invalid)?;

        parse_app_details(&body, app_id, &url).map_err(|e| {
            tracing::error!(app_id, error = %e, "detail page is not an item page");
            invalid(e)
        })
    }

    /// Resolves many identifiers to detail records with the configured
    /// concurrency limit. See [`crate::fanout`].
    pub async fn resolve_details(&self, app_ids: &[String]) -> FanOutReport {
        self.resolve_details_with_limit(app_ids, self.config.concurrent_requests)
            .await
    }

    /// Like [`PlayClient::resolve_details`] with an explicit concurrency limit.
    pub async fn resolve_details_with_limit(
        &self,
        app_ids: &[String],
        concurrency: usize,
    ) -> FanOutReport {
        resolve_details(&self.transport, &self.config.base_url, app_ids, concurrency).await
    }

    async fn fetch_with_retry(&self, request: &FetchRequest) -> Result<String, ScraperError> {
        retry_with_backoff(
            self.config.max_retries,
            self.config.retry_backoff_base_ms,
            || self.transport.fetch(request),
        )
        .await
    }

    /// Turns a listing document into cards, or into detail records when
    /// `detailed`. `limit` truncates the item list before any detail fetch.
    async fn into_listing(
        &self,
        body: &str,
        detailed: bool,
        limit: Option<usize>,
    ) -> Result<Listing, ScraperError> {
        if detailed {
            let mut app_ids = extract_app_ids(body)?;
            if let Some(limit) = limit {
                app_ids.truncate(limit);
            }
            let report = self.resolve_details(&app_ids).await;
            return Ok(Listing::Detailed(report.records));
        }

        let mut cards = parse_cards(body, &self.config.base_url)?;
        if let Some(limit) = limit {
            cards.truncate(limit);
        }
        Ok(Listing::Summary(cards))
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
