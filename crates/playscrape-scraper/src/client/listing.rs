//! Listing entry points: collections, developer pages, search, similar
//! items, plus the suggestion and category helpers.
//!
//! Every parameter is validated before a request is built, so a rejected
//! call never reaches the network.

use playscrape_core::{age_range_id, category_id, collection_id};
use serde::Deserialize;

use super::{FetchRequest, PlayClient};
use crate::error::ScraperError;
use crate::pagination::{
    developer_token, token_for_page, validate_page_size, validate_page_window,
};
use crate::parse::parse_categories;
use crate::types::Listing;
use crate::urls::{build_collection_url, build_url, generate_post_data, ResourceKind};

/// Parameters for [`PlayClient::collection`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    /// Collection name, e.g. `TOP_FREE`.
    pub collection: String,
    /// Category name, e.g. `GAME_ACTION`.
    pub category: Option<String>,
    /// Page size; defaults to `num_results` from config.
    pub results: Option<u32>,
    pub page: Option<u32>,
    /// Age range name (`FIVE_UNDER`, `SIX_EIGHT`, `NINE_UP`). Only sent for
    /// `FAMILY*` categories.
    pub age: Option<String>,
    pub detailed: bool,
}

impl CollectionQuery {
    #[must_use]
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct Suggestion {
    s: String,
}

impl PlayClient {
    /// Lists a collection, optionally within a category.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnknownCollection`], [`ScraperError::UnknownCategory`]
    ///   or [`ScraperError::UnknownAgeRange`] for names not in the catalog.
    /// - [`ScraperError::Validation`] when `results > 120` or
    ///   `page * results > 500`.
    /// - Transport and document errors from the listing request.
    pub async fn collection(&self, query: &CollectionQuery) -> Result<Listing, ScraperError> {
        let collection = collection_id(&query.collection)
            .ok_or_else(|| ScraperError::UnknownCollection(query.collection.clone()))?;
        let category = query
            .category
            .as_deref()
            .map(|name| {
                category_id(name).ok_or_else(|| ScraperError::UnknownCategory(name.to_owned()))
            })
            .transpose()?;
        let age = query
            .age
            .as_deref()
            .map(|name| {
                age_range_id(name).ok_or_else(|| ScraperError::UnknownAgeRange(name.to_owned()))
            })
            .transpose()?;

        let results = query.results.unwrap_or(self.config.num_results);
        let page = query.page.unwrap_or(0);
        validate_page_window(results, page)?;

        let url = build_collection_url(&self.config.base_url, category, Some(collection))?;
        let mut request =
            FetchRequest::post(url, generate_post_data(Some(results), Some(page), None));
        if let (Some(age), Some(category)) = (age, category) {
            if category.starts_with("FAMILY") {
                request = request.with_query("age", age);
            }
        }

        let body = self.fetch_with_retry(&request).await?;
        self.into_listing(&body, query.detailed, None).await
    }

    /// Lists a developer's apps.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Validation`] when `results > 120` or
    ///   `(results / 20) * page` is past the continuation-token table.
    /// - Transport and document errors from the listing request.
    pub async fn developer(
        &self,
        developer: &str,
        results: Option<u32>,
        page: Option<u32>,
        detailed: bool,
    ) -> Result<Listing, ScraperError> {
        let results = results.unwrap_or(self.config.dev_results);
        let token = developer_token(results, page.unwrap_or(0))?;

        let url = build_url(&self.config.base_url, ResourceKind::Developer, developer)?;
        let request = FetchRequest::post(
            url,
            generate_post_data(Some(results), Some(0), Some(token)),
        );

        let body = self.fetch_with_retry(&request).await?;
        self.into_listing(&body, detailed, None).await
    }

    /// Searches apps by free-text query.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidQuery`] for an empty query.
    /// - [`ScraperError::Validation`] when `page` is past the
    ///   continuation-token table (0..=12).
    /// - Transport and document errors from the search request.
    pub async fn search(
        &self,
        query: &str,
        page: Option<u32>,
        detailed: bool,
    ) -> Result<Listing, ScraperError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ScraperError::InvalidQuery(
                "search query must not be empty".to_owned(),
            ));
        }
        let token = token_for_page(page.unwrap_or(0))?;

        let request = FetchRequest::post(
            self.config.search_url.as_str(),
            generate_post_data(Some(0), Some(0), Some(token)),
        )
        .with_query("q", query)
        .with_query("c", "apps");

        let body = self.fetch_with_retry(&request).await?;
        self.into_listing(&body, detailed, None).await
    }

    /// Lists apps similar to `app_id`. The similar page is served behind a
    /// redirect, so this request follows redirects.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Validation`] when `results` is 0 or above 120.
    /// - Transport and document errors from the listing request.
    pub async fn similar(
        &self,
        app_id: &str,
        results: Option<u32>,
        detailed: bool,
    ) -> Result<Listing, ScraperError> {
        let results = results.unwrap_or(self.config.similar_results);
        validate_page_size(results)?;

        let url = build_url(&self.config.base_url, ResourceKind::Similar, app_id)?;
        let request = FetchRequest::get(url).following_redirects();

        let body = self.fetch_with_retry(&request).await?;
        let limit = usize::try_from(results).ok();
        self.into_listing(&body, detailed, limit).await
    }

    /// Autocomplete suggestions for a partial query (the storefront returns at
    /// most five).
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidQuery`] for an empty query.
    /// - [`ScraperError::Deserialize`] when the response is not the expected
    ///   JSON list.
    /// - Transport errors from the request.
    pub async fn suggestions(&self, query: &str) -> Result<Vec<String>, ScraperError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ScraperError::InvalidQuery(
                "cannot get suggestions for an empty query".to_owned(),
            ));
        }

        let request = FetchRequest::get(self.config.suggestion_url.as_str())
            .with_query("json", "1")
            .with_query("c", "0")
            .with_query("query", query);
        let body = self.fetch_with_retry(&request).await?;

        let suggestions: Vec<Suggestion> =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("suggestions(query={query})"),
                source: e,
            })?;
        Ok(suggestions.into_iter().map(|s| s.s).collect())
    }

    /// Category ids from the storefront's category menu.
    ///
    /// # Errors
    ///
    /// Transport errors, or [`ScraperError::UnrecognizedDocument`] when the
    /// front page is not HTML.
    pub async fn categories(&self, ignore_promotions: bool) -> Result<Vec<String>, ScraperError> {
        let request = FetchRequest::get(self.config.base_url.as_str());
        let body = self.fetch_with_retry(&request).await?;
        parse_categories(&body, ignore_promotions)
    }
}
