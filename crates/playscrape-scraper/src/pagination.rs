//! Bounds checks for listing windows.
//!
//! The storefront serves at most [`MAX_RESULTS`] items per listing request and
//! refuses offsets past [`MAX_OFFSET`]. Token-paginated listings (search,
//! developer pages) can only reach pages that have an entry in the static
//! token table, see [`playscrape_core::catalog`].
//!
//! Every check here runs before a request is built, so a rejected window never
//! reaches the network.

use playscrape_core::catalog::{page_token, MAX_PAGE_TOKEN_INDEX};

use crate::error::ScraperError;

/// Largest page size the storefront honors.
pub const MAX_RESULTS: u32 = 120;

/// Largest `page * results` offset the storefront honors.
pub const MAX_OFFSET: u64 = 500;

/// Items per token step on developer listings.
const DEVELOPER_TOKEN_STRIDE: u32 = 20;

/// Validates an offset-paginated window (collections).
///
/// # Errors
///
/// Returns [`ScraperError::Validation`] naming `results` when the page size is
/// zero or above [`MAX_RESULTS`], or naming `page` when `page * results`
/// exceeds [`MAX_OFFSET`].
pub fn validate_page_window(results: u32, page: u32) -> Result<(), ScraperError> {
    validate_page_size(results)?;

    let offset = u64::from(page) * u64::from(results);
    if offset > MAX_OFFSET {
        return Err(ScraperError::Validation {
            parameter: "page",
            value: u64::from(page),
            bound: MAX_OFFSET,
            reason: "start offset (page * results) exceeds the maximum offset",
        });
    }
    Ok(())
}

/// Validates a requested page size on its own.
///
/// # Errors
///
/// Returns [`ScraperError::Validation`] when `results` is zero or above
/// [`MAX_RESULTS`].
pub fn validate_page_size(results: u32) -> Result<(), ScraperError> {
    if results == 0 {
        return Err(ScraperError::Validation {
            parameter: "results",
            value: 0,
            bound: 1,
            reason: "page size must be at least 1",
        });
    }
    if results > MAX_RESULTS {
        return Err(ScraperError::Validation {
            parameter: "results",
            value: u64::from(results),
            bound: u64::from(MAX_RESULTS),
            reason: "page size exceeds the maximum page size",
        });
    }
    Ok(())
}

/// Looks up the continuation token for a token-paginated page.
///
/// # Errors
///
/// Returns [`ScraperError::Validation`] naming `page` when it is past the
/// highest known token index.
pub fn token_for_page(page: u32) -> Result<&'static str, ScraperError> {
    usize::try_from(page)
        .ok()
        .and_then(page_token)
        .ok_or(ScraperError::Validation {
            parameter: "page",
            value: u64::from(page),
            bound: MAX_PAGE_TOKEN_INDEX as u64,
            reason: "no continuation token is known for this page",
        })
}

/// Looks up the continuation token for a developer listing page.
///
/// Developer pages advance the token table in strides of 20 items, so the
/// token index is `(results / 20) * page`.
///
/// # Errors
///
/// Returns [`ScraperError::Validation`] when `results` is out of range or the
/// derived token index is past the table.
pub fn developer_token(results: u32, page: u32) -> Result<&'static str, ScraperError> {
    validate_page_size(results)?;
    let index = (results / DEVELOPER_TOKEN_STRIDE).saturating_mul(page);
    token_for_page(index).map_err(|_| ScraperError::Validation {
        parameter: "page",
        value: u64::from(page),
        bound: MAX_PAGE_TOKEN_INDEX as u64,
        reason: "(results / 20) * page is past the highest known continuation token",
    })
}
