//! URL and form-body construction for storefront requests.
//!
//! Everything here is pure: no I/O, and the base URL is passed in rather than
//! read from process state.

use reqwest::Url;

use crate::error::ScraperError;

/// Kind of per-identifier resource under the apps base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Details,
    Developer,
    Similar,
}

impl ResourceKind {
    fn path(self) -> &'static str {
        match self {
            ResourceKind::Details => "details",
            ResourceKind::Developer => "developer",
            ResourceKind::Similar => "similar",
        }
    }
}

/// Ordered form body for listing POST requests.
pub type PostData = Vec<(&'static str, String)>;

/// Builds `{base}/{kind}?id={id}`, form-encoding the id (spaces become `+`).
///
/// # Errors
///
/// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` is not an absolute URL.
pub fn build_url(base_url: &str, kind: ResourceKind, id: &str) -> Result<String, ScraperError> {
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), kind.path());
    let mut url = parse_base(&raw)?;
    url.query_pairs_mut().append_pair("id", id);
    Ok(url.to_string())
}

/// Builds `{base}[/category/{category}][/collection/{collection}]`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` is not an absolute URL.
pub fn build_collection_url(
    base_url: &str,
    category: Option<&str>,
    collection: Option<&str>,
) -> Result<String, ScraperError> {
    let mut raw = base_url.trim_end_matches('/').to_string();
    if let Some(category) = category.filter(|c| !c.is_empty()) {
        raw.push_str("/category/");
        raw.push_str(category);
    }
    if let Some(collection) = collection.filter(|c| !c.is_empty()) {
        raw.push_str("/collection/");
        raw.push_str(collection);
    }
    Ok(parse_base(&raw)?.to_string())
}

/// Builds the form body shared by listing requests.
///
/// `start` is `results * page` and is only sent together with `results`; a
/// page token is sent as `pagTok` even when empty so the first token-paginated
/// page matches later ones.
#[must_use]
pub fn generate_post_data(
    results: Option<u32>,
    page: Option<u32>,
    pagtok: Option<&str>,
) -> PostData {
    let mut data: PostData = vec![("ipf", "1".to_string()), ("xhr", "1".to_string())];
    if let Some(results) = results {
        if let Some(page) = page {
            let start = u64::from(results) * u64::from(page);
            data.push(("start", start.to_string()));
        }
        data.push(("num", results.to_string()));
    }
    if let Some(token) = pagtok {
        data.push(("pagTok", token.to_string()));
    }
    data
}

/// Resolves a possibly relative `href`/`src` against `base_url`.
///
/// Returns the input unchanged when it is already absolute or cannot be joined.
#[must_use]
pub fn absolutize(base_url: &str, href: &str) -> String {
    Url::parse(base_url)
        .and_then(|base| base.join(href))
        .map_or_else(|_| href.to_string(), |u| u.to_string())
}

fn parse_base(raw: &str) -> Result<Url, ScraperError> {
    Url::parse(raw).map_err(|e| ScraperError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
