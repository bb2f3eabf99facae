//! Request plumbing shared by every storefront call.
//!
//! Two `reqwest` clients are kept: listing and detail requests must not follow
//! redirects (a redirect means the storefront rejected the request), while the
//! similar-items page is only reachable through one.

use std::time::Duration;

use playscrape_core::AppConfig;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, ORIGIN};
use reqwest::{redirect, Client};

use super::origin::storefront_origin;
use crate::error::ScraperError;
use crate::urls::{generate_post_data, PostData};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Locale and identity attached to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// `hl` query parameter.
    pub language: String,
    /// `gl` query parameter.
    pub country: String,
    /// `Origin` header value.
    pub origin: String,
}

impl RequestContext {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            language: config.language.clone(),
            country: config.country.clone(),
            origin: storefront_origin(&config.base_url),
        }
    }

    fn locale_params(&self) -> [(&'static str, &str); 2] {
        [("hl", &self.language), ("gl", &self.country)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One storefront request before locale parameters are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(&'static str, String)>,
    /// Form body; only sent with [`Method::Post`].
    pub form: PostData,
    pub follow_redirects: bool,
}

impl FetchRequest {
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query: Vec::new(),
            form: Vec::new(),
            follow_redirects: false,
        }
    }

    /// A POST with `form` as body. An empty form is replaced by the bare
    /// `ipf`/`xhr` pair the storefront expects on every listing POST.
    #[must_use]
    pub fn post(url: impl Into<String>, form: PostData) -> Self {
        let form = if form.is_empty() {
            generate_post_data(None, None, None)
        } else {
            form
        };
        Self {
            method: Method::Post,
            url: url.into(),
            query: Vec::new(),
            form,
            follow_redirects: false,
        }
    }

    #[must_use]
    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    #[must_use]
    pub fn following_redirects(mut self) -> Self {
        self.follow_redirects = true;
        self
    }
}

/// Sends [`FetchRequest`]s and maps HTTP outcomes onto [`ScraperError`].
///
/// Cloning is cheap: both `reqwest` clients are reference counted.
#[derive(Debug, Clone)]
pub struct Transport {
    direct: Client,
    redirecting: Client,
    context: RequestContext,
}

impl Transport {
    /// Builds both clients with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if a `reqwest::Client` cannot be
    /// constructed, or [`ScraperError::InvalidBaseUrl`] if the base URL's
    /// origin is not a valid header value.
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        let context = RequestContext::from_config(config);

        let mut headers = HeaderMap::new();
        let origin =
            HeaderValue::from_str(&context.origin).map_err(|e| ScraperError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: format!("origin \"{}\" is not a valid header: {e}", context.origin),
            })?;
        headers.insert(ORIGIN, origin);

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let connect_timeout = timeout.min(Duration::from_secs(10));
        let build = |policy: redirect::Policy| {
            Client::builder()
                .timeout(timeout)
                .connect_timeout(connect_timeout)
                .user_agent(config.user_agent.as_str())
                .default_headers(headers.clone())
                .redirect(policy)
                .build()
        };

        Ok(Self {
            direct: build(redirect::Policy::none())?,
            redirecting: build(redirect::Policy::limited(10))?,
            context,
        })
    }

    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Sends one request and returns the response body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429.
    /// - [`ScraperError::NotFound`]: HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status,
    ///   including an unfollowed redirect.
    /// - [`ScraperError::Http`]: network failure or timeout.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<String, ScraperError> {
        let client = if request.follow_redirects {
            &self.redirecting
        } else {
            &self.direct
        };

        tracing::debug!(
            method = ?request.method,
            url = %request.url,
            follow_redirects = request.follow_redirects,
            "sending storefront request"
        );

        let builder = match request.method {
            Method::Get => client.get(&request.url),
            Method::Post => client
                .post(&request.url)
                .form(&request.form)
                .headers(form_headers()),
        };
        let response = builder
            .query(&request.query)
            .query(&self.context.locale_params())
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ScraperError::RateLimited {
                url: request.url.clone(),
            });
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: request.url.clone(),
            });
        }
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: request.url.clone(),
            });
        }

        Ok(response.text().await?)
    }
}

/// `.form()` sets its own `Content-Type`; passing a map through `.headers()`
/// replaces it so exactly one value goes out.
fn form_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    headers
}
