use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::additional_info::{parse_additional_info, AdditionalInfo};
use super::{attr, css, numeric_id_from_href, strip_size_suffix, stripped_strings, text_of};
use crate::error::ScraperError;
use crate::types::{empty_histogram, DetailRecord};
use crate::urls::absolutize;

static TITLE: LazyLock<Selector> = LazyLock::new(|| css(r#"h1[itemprop="name"] span"#));
static TITLE_HEADING: LazyLock<Selector> = LazyLock::new(|| css(r#"h1[itemprop="name"]"#));

static ICON: LazyLock<Selector> =
    LazyLock::new(|| css(r#".dQrBL img.ujDFqe, img.T75of, img[itemprop="image"]"#));
static SCREENSHOT: LazyLock<Selector> = LazyLock::new(|| css(r"button.NIc6yf img.lxGQyd"));
static CAROUSEL_SCREENSHOT: LazyLock<Selector> =
    LazyLock::new(|| css(r"[data-screenshot-item-index] img"));
static TOP_DEVELOPER: LazyLock<Selector> =
    LazyLock::new(|| css(r#"meta[itemprop="topDeveloperBadgeUrl"]"#));
static TRAILER: LazyLock<Selector> =
    LazyLock::new(|| css(r#"button[data-trailer-url^="https"]"#));
static PREVIEW_VIDEO: LazyLock<Selector> =
    LazyLock::new(|| css(r"span.preview-overlay-container[data-video-url]"));
static GENRE: LazyLock<Selector> = LazyLock::new(|| css(r#"[itemprop="genre"]"#));
static DESCRIPTION_BODY: LazyLock<Selector> =
    LazyLock::new(|| css(r#"div[itemprop="description"] content div"#));
static DESCRIPTION_CONTENT: LazyLock<Selector> =
    LazyLock::new(|| css(r#"div[itemprop="description"] content"#));
static EDITORS_CHOICE: LazyLock<Selector> =
    LazyLock::new(|| css(r#"meta[itemprop="editorsChoiceBadgeUrl"]"#));
static SCORE: LazyLock<Selector> = LazyLock::new(|| css(r"div.BHMmbe"));
static SCORE_META: LazyLock<Selector> =
    LazyLock::new(|| css(r#"meta[itemprop="ratingValue"]"#));
static REVIEW_COUNT: LazyLock<Selector> =
    LazyLock::new(|| css(r#"span[aria-label$="ratings"]"#));
static HISTOGRAM_BAR: LazyLock<Selector> =
    LazyLock::new(|| css(r#"div.VEF2C div span[style^="width:"]"#));
static PRICE_META: LazyLock<Selector> = LazyLock::new(|| css(r#"meta[itemprop="price"]"#));
static PREREGISTRATION: LazyLock<Selector> =
    LazyLock::new(|| css(r"div.preregistration-text-add"));
static IAP_BADGE: LazyLock<Selector> = LazyLock::new(|| css(r"div.rxic6"));
static DEVELOPER_LINK: LazyLock<Selector> = LazyLock::new(|| css(r"a.hrTbp.R8zArc"));

/// A parsed detail document plus the pieces several extractors share.
struct DetailPage<'a> {
    document: &'a Html,
    url: &'a str,
    info: AdditionalInfo,
}

impl DetailPage<'_> {
    fn first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.document.select(selector).next()
    }
}

/// Reads one group of fields into the record. Extractors never fail: a
/// missing element leaves the field at its default.
type FieldExtractor = fn(&DetailPage<'_>, &mut DetailRecord);

const FIELD_EXTRACTORS: &[(&str, FieldExtractor)] = &[
    ("icon", extract_icon),
    ("screenshots", extract_screenshots),
    ("thumbnails", extract_thumbnails),
    ("video", extract_video),
    ("category", extract_category),
    ("ratings", extract_ratings),
    ("description", extract_description),
    ("recent_changes", extract_recent_changes),
    ("editors_choice", extract_editors_choice),
    ("top_developer", extract_top_developer),
    ("price", extract_price),
    ("iap", extract_iap),
    ("additional_info", extract_additional_info),
    ("developer", extract_developer),
];

/// Parses an item's detail page.
///
/// `app_id` and `url` identify the item the page was fetched for; relative
/// links are resolved against `url`.
///
/// # Errors
///
/// Returns [`ScraperError::MissingTitle`] when the page has no title, which
/// means the storefront served something other than an item page (most often
/// for an identifier that does not exist).
pub fn parse_app_details(
    body: &str,
    app_id: &str,
    url: &str,
) -> Result<DetailRecord, ScraperError> {
    let document = Html::parse_document(body);

    let title = document
        .select(&TITLE)
        .next()
        .and_then(text_of)
        .or_else(|| document.select(&TITLE_HEADING).next().and_then(text_of))
        .ok_or_else(|| ScraperError::MissingTitle {
            context: app_id.to_owned(),
        })?;

    let page = DetailPage {
        document: &document,
        url,
        info: parse_additional_info(&document),
    };

    let mut record = DetailRecord {
        app_id: app_id.to_owned(),
        url: url.to_owned(),
        title,
        icon: None,
        screenshots: Vec::new(),
        thumbnails: Vec::new(),
        video: None,
        category: Vec::new(),
        score: None,
        histogram: empty_histogram(),
        reviews: 0,
        description: None,
        description_html: None,
        recent_changes: None,
        editors_choice: false,
        top_developer: false,
        price: None,
        free: false,
        iap: false,
        iap_range: None,
        updated: None,
        size: None,
        installs: None,
        current_version: None,
        required_android_version: None,
        content_rating: Vec::new(),
        interactive_elements: Vec::new(),
        developer: None,
        developer_id: None,
        developer_email: None,
        developer_url: None,
        developer_address: None,
    };

    for (field, extract) in FIELD_EXTRACTORS {
        tracing::trace!(app_id, field, "running field extractor");
        extract(&page, &mut record);
    }
    Ok(record)
}

fn extract_icon(page: &DetailPage<'_>, record: &mut DetailRecord) {
    record.icon = page
        .first(&ICON)
        .and_then(|img| attr(img, "src"))
        .map(|src| absolutize(page.url, strip_size_suffix(&src)));
}

/// Off-screen carousel images carry a placeholder `src` and the real URL in
/// `data-src`.
fn extract_screenshots(page: &DetailPage<'_>, record: &mut DetailRecord) {
    let mut screenshots: Vec<String> = page
        .document
        .select(&SCREENSHOT)
        .filter_map(|img| {
            attr(img, "src")
                .filter(|src| src.starts_with("https://"))
                .or_else(|| attr(img, "data-src"))
        })
        .collect();

    if screenshots.is_empty() {
        screenshots = page
            .document
            .select(&CAROUSEL_SCREENSHOT)
            .filter_map(|img| {
                attr(img, "srcset")
                    .and_then(|set| set.split_whitespace().next().map(str::to_owned))
                    .or_else(|| attr(img, "src"))
            })
            .map(|src| absolutize(page.url, &src))
            .collect();
    }
    record.screenshots = screenshots;
}

fn extract_thumbnails(page: &DetailPage<'_>, record: &mut DetailRecord) {
    record.thumbnails = page
        .document
        .select(&CAROUSEL_SCREENSHOT)
        .filter_map(|img| attr(img, "src"))
        .map(|src| absolutize(page.url, &src))
        .collect();
}

fn extract_video(page: &DetailPage<'_>, record: &mut DetailRecord) {
    record.video = page
        .first(&TRAILER)
        .and_then(|button| attr(button, "data-trailer-url"))
        .or_else(|| {
            page.first(&PREVIEW_VIDEO)
                .and_then(|span| attr(span, "data-video-url"))
        })
        .map(|video| video.split('?').next().unwrap_or(&video).to_owned());
}

fn extract_category(page: &DetailPage<'_>, record: &mut DetailRecord) {
    record.category = page
        .document
        .select(&GENRE)
        .filter_map(|a| attr(a, "href"))
        .filter_map(|href| {
            let path = href.split('?').next().unwrap_or(&href);
            path.rsplit('/')
                .next()
                .filter(|id| !id.is_empty())
                .map(str::to_owned)
        })
        .collect();
}

/// Histogram bars list counts 5-star first. Without a review total or with
/// fewer than five bars, the histogram and total both stay at zero.
fn extract_ratings(page: &DetailPage<'_>, record: &mut DetailRecord) {
    record.score = page
        .first(&SCORE)
        .and_then(text_of)
        .or_else(|| page.first(&SCORE_META).and_then(|m| attr(m, "content")));

    let reviews = page
        .first(&REVIEW_COUNT)
        .and_then(text_of)
        .and_then(|text| parse_count(&text));
    let counts: Vec<u64> = page
        .document
        .select(&HISTOGRAM_BAR)
        .filter_map(|bar| attr(bar, "title"))
        .filter_map(|title| parse_count(&title))
        .collect();

    match reviews {
        Some(total) if total > 0 && counts.len() >= 5 => {
            record.reviews = total;
            for (rank, count) in (1..=5u8).rev().zip(counts) {
                record.histogram.insert(rank, count);
            }
        }
        _ => {
            record.reviews = 0;
            record.histogram = empty_histogram();
        }
    }
}

fn extract_description(page: &DetailPage<'_>, record: &mut DetailRecord) {
    let Some(body) = page.first(&DESCRIPTION_BODY) else {
        return;
    };
    let lines = stripped_strings(body);
    record.description = (!lines.is_empty()).then(|| lines.join("\n"));
    let html = body.inner_html();
    let html = html.trim();
    record.description_html = (!html.is_empty()).then(|| html.to_owned());
}

/// The second description block is the "What's New" changelog.
fn extract_recent_changes(page: &DetailPage<'_>, record: &mut DetailRecord) {
    record.recent_changes = page
        .document
        .select(&DESCRIPTION_CONTENT)
        .nth(1)
        .map(stripped_strings)
        .filter(|lines| !lines.is_empty())
        .map(|lines| lines.join("\n"));
}

fn extract_editors_choice(page: &DetailPage<'_>, record: &mut DetailRecord) {
    record.editors_choice = page.first(&EDITORS_CHOICE).is_some();
}

fn extract_top_developer(page: &DetailPage<'_>, record: &mut DetailRecord) {
    record.top_developer = page.first(&TOP_DEVELOPER).is_some();
}

/// Pre-registration pages hide the price meta tag and show a notice instead.
fn extract_price(page: &DetailPage<'_>, record: &mut DetailRecord) {
    record.price = page
        .first(&PRICE_META)
        .and_then(|meta| attr(meta, "content"))
        .or_else(|| page.first(&PREREGISTRATION).and_then(text_of));
    record.free = record.price.as_deref() == Some("0");
}

fn extract_iap(page: &DetailPage<'_>, record: &mut DetailRecord) {
    record.iap = page.document.select(&IAP_BADGE).any(|badge| {
        badge
            .text()
            .collect::<String>()
            .to_ascii_lowercase()
            .contains("purchases")
    });
}

fn extract_additional_info(page: &DetailPage<'_>, record: &mut DetailRecord) {
    let info = &page.info;
    record.updated.clone_from(&info.updated);
    record.size.clone_from(&info.size);
    record.installs.clone_from(&info.installs);
    record.current_version.clone_from(&info.current_version);
    record
        .required_android_version
        .clone_from(&info.required_android_version);
    record.content_rating.clone_from(&info.content_rating);
    record.iap_range.clone_from(&info.iap_range);
    record
        .interactive_elements
        .clone_from(&info.interactive_elements);
    record.developer_email.clone_from(&info.developer_email);
    record.developer_url.clone_from(&info.developer_url);
    record.developer_address.clone_from(&info.developer_address);
}

/// "Offered By" names the developer; the header link is the fallback and the
/// only source of the numeric id.
fn extract_developer(page: &DetailPage<'_>, record: &mut DetailRecord) {
    let link = page.first(&DEVELOPER_LINK);
    record.developer = page
        .info
        .developer
        .clone()
        .or_else(|| link.and_then(text_of));
    record.developer_id = link
        .and_then(|a| attr(a, "href"))
        .and_then(|href| numeric_id_from_href(&href));
}

fn parse_count(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod tests;
