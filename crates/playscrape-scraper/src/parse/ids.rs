use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{attr, css, ensure_html};
use crate::error::ScraperError;

/// Cluster layout: one preview overlay per item.
static PREVIEW_OVERLAY: LazyLock<Selector> =
    LazyLock::new(|| css(r"span.preview-overlay-container[data-docid]"));
/// Card layout, served after a redirect or for collection pages.
static CARD_DOCID: LazyLock<Selector> =
    LazyLock::new(|| css(r#"div[data-uitype="500"][data-docid]"#));
static GENERIC_CARD_DOCID: LazyLock<Selector> = LazyLock::new(|| css(r".card[data-docid]"));

static SUBMENU_LINK: LazyLock<Selector> = LazyLock::new(|| css(r"a.child-submenu-link"));

/// Extracts item identifiers from a listing document in document order.
///
/// Duplicates are kept. An empty list is a valid result (an empty listing);
/// only a body that is not HTML at all is an error.
///
/// # Errors
///
/// Returns [`ScraperError::UnrecognizedDocument`] when `body` is not markup.
pub fn extract_app_ids(body: &str) -> Result<Vec<String>, ScraperError> {
    ensure_html(body, "listing identifiers")?;
    let document = Html::parse_document(body);

    for selector in [&*PREVIEW_OVERLAY, &*CARD_DOCID, &*GENERIC_CARD_DOCID] {
        let ids: Vec<String> = document
            .select(selector)
            .filter_map(|el| attr(el, "data-docid"))
            .collect();
        if !ids.is_empty() {
            return Ok(ids);
        }
    }
    Ok(Vec::new())
}

/// Extracts category ids from the storefront front page's category menu.
///
/// With `ignore_promotions`, links that do not point under `/category/`
/// (seasonal or editorial promotions placed in the menu) are skipped.
/// Ids are deduplicated keeping first occurrence.
///
/// # Errors
///
/// Returns [`ScraperError::UnrecognizedDocument`] when `body` is not markup.
pub fn parse_categories(body: &str, ignore_promotions: bool) -> Result<Vec<String>, ScraperError> {
    ensure_html(body, "category menu")?;
    let document = Html::parse_document(body);

    let mut seen = HashSet::new();
    let mut categories = Vec::new();
    for link in document.select(&SUBMENU_LINK) {
        let Some(href) = attr(link, "href") else {
            continue;
        };
        if ignore_promotions && !href.contains("/category/") {
            continue;
        }
        let path = href.split('?').next().unwrap_or(&href);
        let Some(id) = path.rsplit('/').next().filter(|id| !id.is_empty()) else {
            continue;
        };
        if seen.insert(id.to_owned()) {
            categories.push(id.to_owned());
        }
    }
    Ok(categories)
}
