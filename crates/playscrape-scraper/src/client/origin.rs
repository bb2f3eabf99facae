//! Origin extraction for the `Origin` request header.

/// Extracts the scheme+host origin from a storefront URL.
///
/// Given `"https://play.google.com/store/apps"`, returns
/// `"https://play.google.com"`. The storefront checks `Origin` on listing
/// POSTs, so it must name the host the request goes to.
#[must_use]
pub fn storefront_origin(base_url: &str) -> String {
    reqwest::Url::parse(base_url).map_or_else(
        |e| {
            tracing::warn!(
                base_url,
                error = %e,
                "could not parse base URL, falling back to string split for origin"
            );
            base_url
                .trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}
