//! Storefront scraping pipeline: listing requests, card and detail-page
//! parsing, and bounded-concurrency fan-out over detail pages.

pub mod client;
pub mod error;
pub mod fanout;
pub mod pagination;
pub mod parse;
mod rate_limit;
pub mod types;
pub mod urls;

pub use client::{CollectionQuery, PlayClient};
pub use error::ScraperError;
pub use fanout::{resolve_details, FanOutReport};
pub use types::{DetailRecord, Listing, SummaryRecord};
