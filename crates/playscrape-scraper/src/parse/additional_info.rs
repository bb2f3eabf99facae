//! The "Additional Information" block at the bottom of a detail page.
//!
//! Each row is a title/value pair with identical markup, so rows are matched
//! on their human-readable title through [`SECTION_TITLES`]. Titles not in
//! the table are skipped: the storefront adds and removes optional rows over
//! time.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{attr, css, stripped_strings, text_of};

static CONTAINER: LazyLock<Selector> = LazyLock::new(|| css(r".IxB2fe, div.xyOfqd"));
static ROW: LazyLock<Selector> = LazyLock::new(|| css(r"div.hAyfc"));
static ROW_TITLE: LazyLock<Selector> = LazyLock::new(|| css(r"div.BgcNfc"));
static ROW_VALUE: LazyLock<Selector> = LazyLock::new(|| css(r"span.htlgb"));
static MAILTO: LazyLock<Selector> = LazyLock::new(|| css(r#"a[href^="mailto:"]"#));
static WEB_LINK: LazyLock<Selector> = LazyLock::new(|| css(r#"a[href^="http"]"#));
static DIV: LazyLock<Selector> = LazyLock::new(|| css(r"div"));

static IAP_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\$\d+\.\d{2}) - (\$\d+\.\d{2})").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Updated,
    Size,
    Installs,
    CurrentVersion,
    RequiresAndroid,
    ContentRating,
    InAppProducts,
    InteractiveElements,
    OfferedBy,
    DeveloperContact,
}

const SECTION_TITLES: &[(&str, Section)] = &[
    ("Updated", Section::Updated),
    ("Size", Section::Size),
    ("Installs", Section::Installs),
    ("Current Version", Section::CurrentVersion),
    ("Requires Android", Section::RequiresAndroid),
    ("Content Rating", Section::ContentRating),
    ("In-app Products", Section::InAppProducts),
    ("Interactive Elements", Section::InteractiveElements),
    ("Offered By", Section::OfferedBy),
    ("Developer", Section::DeveloperContact),
];

/// Values read from the additional-information block. Rows the page did not
/// carry stay at their empty default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionalInfo {
    pub updated: Option<String>,
    pub size: Option<String>,
    pub installs: Option<String>,
    pub current_version: Option<String>,
    pub required_android_version: Option<String>,
    pub content_rating: Vec<String>,
    pub iap_range: Option<(String, String)>,
    pub interactive_elements: Vec<String>,
    pub developer: Option<String>,
    pub developer_email: Option<String>,
    pub developer_url: Option<String>,
    pub developer_address: Option<String>,
}

/// Parses the additional-information block of a detail document.
#[must_use]
pub fn parse_additional_info(document: &Html) -> AdditionalInfo {
    let mut info = AdditionalInfo::default();
    let Some(container) = document.select(&CONTAINER).next() else {
        return info;
    };

    for row in container.select(&ROW) {
        let Some(title) = row.select(&ROW_TITLE).next().and_then(text_of) else {
            continue;
        };
        let Some(section) = section_for(&title) else {
            tracing::trace!(title = %title, "skipping unrecognized additional-info row");
            continue;
        };
        let Some(value) = row.select(&ROW_VALUE).next() else {
            continue;
        };
        apply_section(&mut info, section, value);
    }
    info
}

fn section_for(title: &str) -> Option<Section> {
    SECTION_TITLES
        .iter()
        .find(|(name, _)| *name == title)
        .map(|(_, section)| *section)
}

fn apply_section(info: &mut AdditionalInfo, section: Section, value: ElementRef<'_>) {
    match section {
        Section::Updated => info.updated = text_of(value),
        Section::Size => info.size = text_of(value),
        Section::Installs => info.installs = text_of(value),
        Section::CurrentVersion => info.current_version = text_of(value),
        Section::RequiresAndroid => info.required_android_version = text_of(value),
        Section::OfferedBy => info.developer = text_of(value),
        Section::ContentRating => info.content_rating = content_rating(value),
        Section::InAppProducts => info.iap_range = iap_range(value),
        Section::InteractiveElements => {
            info.interactive_elements = stripped_strings(value)
                .iter()
                .flat_map(|s| s.split(','))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();
        }
        Section::DeveloperContact => {
            info.developer_email = developer_email(value);
            info.developer_url = value.select(&WEB_LINK).next().and_then(|a| attr(a, "href"));
            info.developer_address = developer_address(value);
        }
    }
}

fn content_rating(value: ElementRef<'_>) -> Vec<String> {
    let mut ratings = stripped_strings(value);
    if ratings
        .last()
        .is_some_and(|last| last.eq_ignore_ascii_case("learn more"))
    {
        ratings.pop();
    }
    ratings
}

fn iap_range(value: ElementRef<'_>) -> Option<(String, String)> {
    let text = value.text().collect::<String>();
    IAP_RANGE
        .captures(&text)
        .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
}

fn developer_email(value: ElementRef<'_>) -> Option<String> {
    let href = value.select(&MAILTO).next().and_then(|a| attr(a, "href"))?;
    let address = href.strip_prefix("mailto:")?;
    let address = address.split('?').next().unwrap_or(address).trim();
    (!address.is_empty()).then(|| address.to_owned())
}

/// The postal address is bare text in the block's last `div`. When that div
/// starts with an element instead (a link), there is no address.
fn developer_address(value: ElementRef<'_>) -> Option<String> {
    let last = value.select(&DIV).last()?;
    let first = last.children().next()?;
    let text = first.value().as_text()?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_for(rows: &str) -> AdditionalInfo {
        let html = format!(r#"<html><body><div class="IxB2fe">{rows}</div></body></html>"#);
        parse_additional_info(&Html::parse_document(&html))
    }

    fn row(title: &str, value: &str) -> String {
        format!(
            r#"<div class="hAyfc"><div class="BgcNfc">{title}</div><span class="htlgb"><div class="IQ1z0d"><span class="htlgb">{value}</span></div></span></div>"#
        )
    }

    #[test]
    fn plain_rows_are_normalized() {
        let rows = [
            row("Updated", "May 5, 2018"),
            row("Size", "Varies with device"),
            row("Installs", "1,000,000,000+"),
            row("Current Version", "164.0.0.39.95"),
            row("Requires Android", "4.1 and up"),
            row("Offered By", "Facebook"),
        ]
        .concat();
        let info = info_for(&rows);
        assert_eq!(info.updated.as_deref(), Some("May 5, 2018"));
        assert_eq!(info.size.as_deref(), Some("Varies with device"));
        assert_eq!(info.installs.as_deref(), Some("1,000,000,000+"));
        assert_eq!(info.current_version.as_deref(), Some("164.0.0.39.95"));
        assert_eq!(info.required_android_version.as_deref(), Some("4.1 and up"));
        assert_eq!(info.developer.as_deref(), Some("Facebook"));
    }

    #[test]
    fn unknown_rows_are_ignored() {
        let rows = [row("Permissions", "View details"), row("Size", "12M")].concat();
        let info = info_for(&rows);
        assert_eq!(info.size.as_deref(), Some("12M"));
    }

    #[test]
    fn content_rating_drops_learn_more() {
        let info = info_for(&row(
            "Content Rating",
            r#"<div>Teen</div><div>Violence, Blood</div><div><a href="https://support.google.com/">Learn More</a></div>"#,
        ));
        assert_eq!(info.content_rating, vec!["Teen", "Violence, Blood"]);
    }

    #[test]
    fn content_rating_without_learn_more_is_kept_whole() {
        let info = info_for(&row("Content Rating", "<div>Everyone</div>"));
        assert_eq!(info.content_rating, vec!["Everyone"]);
    }

    #[test]
    fn iap_range_matched() {
        let info = info_for(&row("In-app Products", "$0.99 - $99.99 per item"));
        assert_eq!(
            info.iap_range,
            Some(("$0.99".to_owned(), "$99.99".to_owned()))
        );
    }

    #[test]
    fn iap_range_without_pattern_is_none() {
        let info = info_for(&row("In-app Products", "Varies per item"));
        assert!(info.iap_range.is_none());
    }

    #[test]
    fn interactive_elements_split() {
        let info = info_for(&row("Interactive Elements", "Users Interact, Digital Purchases"));
        assert_eq!(info.interactive_elements, vec!["Users Interact", "Digital Purchases"]);
    }

    #[test]
    fn full_developer_contact_block() {
        let info = info_for(&row(
            "Developer",
            r#"<div><a class="hrTbp" href="https://www.example.com">Visit website</a></div><div><a class="hrTbp" href="mailto:support@example.com">support@example.com</a></div><div>1 Hacker Way
Menlo Park, CA 94025</div>"#,
        ));
        assert_eq!(info.developer_email.as_deref(), Some("support@example.com"));
        assert_eq!(info.developer_url.as_deref(), Some("https://www.example.com"));
        assert_eq!(
            info.developer_address.as_deref(),
            Some("1 Hacker Way\nMenlo Park, CA 94025")
        );
    }

    #[test]
    fn developer_contact_fields_are_independent() {
        let info = info_for(&row(
            "Developer",
            r#"<div><a class="hrTbp" href="mailto:help@example.com">help@example.com</a></div>"#,
        ));
        assert_eq!(info.developer_email.as_deref(), Some("help@example.com"));
        assert!(info.developer_url.is_none());
        // Last div starts with a link, not an address.
        assert!(info.developer_address.is_none());
    }

    #[test]
    fn missing_block_is_all_defaults() {
        let document = Html::parse_document("<html><body><h1>nothing</h1></body></html>");
        assert_eq!(parse_additional_info(&document), AdditionalInfo::default());
    }
}
