//! Records produced by the card and detail parsers.
//!
//! ## Observed shape of storefront pages
//!
//! ### Price
//! Listing cards show `Free`, a price like `$2.99`, `Coming Soon` for
//! pre-registration apps, or nothing at all when the app is not offered in the
//! requesting region. Detail pages carry the price in a
//! `meta[itemprop="price"]` tag as a bare amount (`"0"` when free).
//!
//! ### Rating
//! Scores are kept as the decimal string the page shows (e.g. `"4.3"`); the
//! storefront rounds them and converting to a float adds nothing.
//!
//! ### Histogram
//! The ratings bar chart lists counts 5-star first. Counts are the storefront's
//! rounded display values, so their sum need not equal `reviews`.
//!
//! Every field is always serialized, including empty ones, so consumers see a
//! stable key set regardless of which sections a page happened to carry.

use std::collections::BTreeMap;

use serde::Serialize;

/// Lightweight record read straight from a listing card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRecord {
    pub app_id: String,
    /// Absolute detail-page URL.
    pub url: String,
    /// Absolute icon URL with the `=wNN-hNN` size suffix removed.
    pub icon: String,
    pub title: String,
    pub developer: String,
    /// Numeric developer id. `None` when the storefront links the developer by name.
    pub developer_id: Option<String>,
    pub description: String,
    pub score: Option<String>,
    /// Price amount without its currency symbol. `"0"` when free; `None` when
    /// no price marker was shown.
    pub price: Option<String>,
    /// Pre-discount amount shown next to a promotional price.
    pub full_price: Option<String>,
    /// `true` when the resolved price marker carries no amount. A card with no
    /// marker at all is not offered in the region and is never free.
    pub free: bool,
}

/// Full record read from an item's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRecord {
    pub app_id: String,
    pub url: String,
    pub title: String,
    pub icon: Option<String>,
    pub screenshots: Vec<String>,
    /// Low-resolution carousel images, in carousel order.
    pub thumbnails: Vec<String>,
    /// Trailer URL without its query string.
    pub video: Option<String>,
    /// Category ids; the first entry is the primary category.
    pub category: Vec<String>,
    pub score: Option<String>,
    /// Star rank (1..=5) to count. All five keys are always present.
    pub histogram: BTreeMap<u8, u64>,
    pub reviews: u64,
    pub description: Option<String>,
    pub description_html: Option<String>,
    pub recent_changes: Option<String>,
    pub editors_choice: bool,
    pub top_developer: bool,
    pub price: Option<String>,
    pub free: bool,
    pub iap: bool,
    /// Lowest and highest in-app purchase price, e.g. `("$0.99", "$99.99")`.
    pub iap_range: Option<(String, String)>,
    pub updated: Option<String>,
    pub size: Option<String>,
    /// Install-count descriptor, e.g. `"1,000,000+"`.
    pub installs: Option<String>,
    pub current_version: Option<String>,
    pub required_android_version: Option<String>,
    pub content_rating: Vec<String>,
    pub interactive_elements: Vec<String>,
    pub developer: Option<String>,
    pub developer_id: Option<String>,
    pub developer_email: Option<String>,
    pub developer_url: Option<String>,
    pub developer_address: Option<String>,
}

/// Result of a listing call: cards only, or one resolved detail page per item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Listing {
    Summary(Vec<SummaryRecord>),
    Detailed(Vec<DetailRecord>),
}

impl Listing {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Listing::Summary(records) => records.len(),
            Listing::Detailed(records) => records.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Histogram with every rank present and zeroed.
#[must_use]
pub fn empty_histogram() -> BTreeMap<u8, u64> {
    (1..=5).map(|rank| (rank, 0)).collect()
}
