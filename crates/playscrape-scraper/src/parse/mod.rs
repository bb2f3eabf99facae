//! HTML extraction for storefront listing and detail pages.
//!
//! The storefront's markup uses obfuscated class names that change between
//! revisions, so every selector here is best-effort: a missing element
//! yields `None` or an empty value for that one field and never aborts the
//! surrounding parse. Only a detail page without a title is rejected.
//!
//! `scraper::Html` is not `Send`; parsers take the raw body and build and drop
//! the DOM inside one synchronous call so async callers never hold it across
//! an `.await`.

mod additional_info;
mod card;
mod detail;
mod ids;

pub use additional_info::{parse_additional_info, AdditionalInfo};
pub use card::parse_cards;
pub use detail::parse_app_details;
pub use ids::{extract_app_ids, parse_categories};

use scraper::{ElementRef, Selector};

use crate::error::ScraperError;

/// Compiles a selector literal. Only called from `LazyLock` statics.
pub(crate) fn css(selector: &str) -> Selector {
    Selector::parse(selector).expect("valid CSS selector")
}

/// Non-empty, trimmed text nodes under `el` in document order.
pub(crate) fn stripped_strings(el: ElementRef<'_>) -> Vec<String> {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// All text under `el`, concatenated and trimmed. `None` when blank.
pub(crate) fn text_of(el: ElementRef<'_>) -> Option<String> {
    let text = el.text().collect::<String>();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Trimmed, non-empty attribute value.
pub(crate) fn attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Drops the `=w720-h310` style sizing suffix from an image URL.
pub(crate) fn strip_size_suffix(src: &str) -> &str {
    src.split('=').next().unwrap_or(src)
}

/// Value after the first `=` in a link, kept only when it is all digits.
///
/// Developer links carry either a numeric id (`/developer?id=5700313618786177705`)
/// or a display name (`/developer?id=Disney`); only the former is an identity.
pub(crate) fn numeric_id_from_href(href: &str) -> Option<String> {
    let raw = href.split_once('=').map(|(_, v)| v)?;
    let raw = raw.split('&').next().unwrap_or(raw);
    (!raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())).then(|| raw.to_owned())
}

/// Rejects bodies that cannot be an HTML listing (JSON, XSSI-prefixed
/// payloads, plain text, empty responses).
pub(crate) fn ensure_html(body: &str, context: &str) -> Result<(), ScraperError> {
    let trimmed = body.trim_start_matches('\u{feff}').trim();
    let looks_like_json =
        trimmed.starts_with('{') || trimmed.starts_with('[') || trimmed.starts_with(")]}'");
    if trimmed.is_empty() || looks_like_json || !trimmed.contains('<') {
        return Err(ScraperError::UnrecognizedDocument {
            context: context.to_owned(),
        });
    }
    Ok(())
}
