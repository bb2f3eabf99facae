use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{attr, css, ensure_html, numeric_id_from_href, strip_size_suffix, text_of};
use crate::error::ScraperError;
use crate::types::SummaryRecord;
use crate::urls::{absolutize, build_url, ResourceKind};

static CARD: LazyLock<Selector> = LazyLock::new(|| css(r#"div[data-uitype="500"][data-docid]"#));
static GENERIC_CARD: LazyLock<Selector> = LazyLock::new(|| css(r".card[data-docid]"));

static CLICK_TARGET: LazyLock<Selector> = LazyLock::new(|| css(r"a.card-click-target"));
static COVER_IMAGE: LazyLock<Selector> = LazyLock::new(|| css(r"img.cover-image"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| css(r"a.title"));
static SUBTITLE: LazyLock<Selector> = LazyLock::new(|| css(r"a.subtitle"));
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| css(r"div.description"));
static TINY_STAR: LazyLock<Selector> = LazyLock::new(|| css(r"div.tiny-star"));
static DISPLAY_PRICE: LazyLock<Selector> = LazyLock::new(|| css(r"span.display-price"));
static PREREGISTER_PRICE: LazyLock<Selector> = LazyLock::new(|| css(r".price"));
static FULL_PRICE: LazyLock<Selector> = LazyLock::new(|| css(r"span.full-price"));

/// Which price marker a card resolved to, in tier order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PriceMarker {
    /// Purchase button text: `Free`, `$2.99`, ...
    Listed(String),
    /// Pre-registration button, typically `Coming Soon`.
    PreRegistration(String),
    /// No purchase affordance: the item is not offered in this region.
    Unavailable,
}

/// Parses every card on a listing document into a [`SummaryRecord`].
///
/// # Errors
///
/// Returns [`ScraperError::UnrecognizedDocument`] when `body` is not markup.
pub fn parse_cards(body: &str, base_url: &str) -> Result<Vec<SummaryRecord>, ScraperError> {
    ensure_html(body, "listing cards")?;
    let document = Html::parse_document(body);

    let mut cards: Vec<SummaryRecord> = document
        .select(&CARD)
        .map(|card| parse_card(card, base_url))
        .collect();
    if cards.is_empty() {
        cards = document
            .select(&GENERIC_CARD)
            .map(|card| parse_card(card, base_url))
            .collect();
    }
    Ok(cards)
}

/// Reads one card. Every field is read independently.
pub(crate) fn parse_card(card: ElementRef<'_>, base_url: &str) -> SummaryRecord {
    let app_id = attr(card, "data-docid").unwrap_or_default();

    let url = card
        .select(&CLICK_TARGET)
        .next()
        .and_then(|a| attr(a, "href"))
        .map(|href| absolutize(base_url, &href))
        .or_else(|| build_url(base_url, ResourceKind::Details, &app_id).ok())
        .unwrap_or_default();

    let icon = card
        .select(&COVER_IMAGE)
        .next()
        .and_then(|img| attr(img, "src").or_else(|| attr(img, "data-cover-small")))
        .map(|src| absolutize(base_url, strip_size_suffix(&src)))
        .unwrap_or_default();

    let title = card
        .select(&TITLE)
        .next()
        .and_then(|a| attr(a, "title").or_else(|| text_of(a)))
        .unwrap_or_default();

    let subtitle = card.select(&SUBTITLE).next();
    let developer = subtitle
        .and_then(|a| attr(a, "title").or_else(|| text_of(a)))
        .unwrap_or_default();
    let developer_id = subtitle
        .and_then(|a| attr(a, "href"))
        .and_then(|href| numeric_id_from_href(&href));

    let description = card
        .select(&DESCRIPTION)
        .next()
        .and_then(text_of)
        .unwrap_or_default();

    // aria-label reads "Rated 4.3 stars out of five stars".
    let score = card
        .select(&TINY_STAR)
        .next()
        .and_then(|star| attr(star, "aria-label"))
        .and_then(|label| label.split_whitespace().nth(1).map(str::to_owned));

    let marker = resolve_price_marker(card);
    let full_price = match marker {
        PriceMarker::Unavailable => None,
        _ => card
            .select(&FULL_PRICE)
            .next()
            .and_then(text_of)
            .and_then(|text| amount(&text)),
    };
    let (price, free) = price_and_free(marker);

    SummaryRecord {
        app_id,
        url,
        icon,
        title,
        developer,
        developer_id,
        description,
        score,
        price,
        full_price,
        free,
    }
}

fn resolve_price_marker(card: ElementRef<'_>) -> PriceMarker {
    if let Some(el) = card.select(&DISPLAY_PRICE).next() {
        return PriceMarker::Listed(text_of(el).unwrap_or_default());
    }
    if let Some(text) = card.select(&PREREGISTER_PRICE).next().and_then(text_of) {
        return PriceMarker::PreRegistration(text);
    }
    PriceMarker::Unavailable
}

fn price_and_free(marker: PriceMarker) -> (Option<String>, bool) {
    match marker {
        PriceMarker::Listed(text) => match amount(&text) {
            Some(value) if !is_zero_amount(&value) => (Some(value), false),
            _ => (Some("0".to_owned()), true),
        },
        PriceMarker::PreRegistration(text) => (Some(text), false),
        PriceMarker::Unavailable => (None, false),
    }
}

/// Numeric part of a display price: `"$2.99"` -> `"2.99"`, `"1,99 €"` -> `"1,99"`.
fn amount(text: &str) -> Option<String> {
    let trimmed = text.trim_matches(|c: char| !c.is_ascii_digit());
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn is_zero_amount(value: &str) -> bool {
    value.chars().all(|c| matches!(c, '0' | '.' | ','))
}

#[cfg(test)]
#[path = "card_test.rs"]
mod tests;
