/// Process-wide settings shared by every request a client issues.
///
/// Built once (usually via [`crate::load_app_config`]) and handed to the
/// scraper client, which derives its immutable request context from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root of the apps storefront, e.g. `https://play.google.com/store/apps`.
    pub base_url: String,
    pub search_url: String,
    pub suggestion_url: String,
    /// `hl` query parameter attached to every outbound request.
    pub language: String,
    /// `gl` query parameter attached to every outbound request.
    pub country: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Upper bound on in-flight detail fetches during a fan-out batch.
    pub concurrent_requests: usize,
    /// Default page size for collection listings.
    pub num_results: u32,
    /// Default page size for developer listings.
    pub dev_results: u32,
    /// Default page size for similar-app listings.
    pub similar_results: u32,
    /// Retries for listing and single-item requests. Fan-out fetches never retry.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

pub const DEFAULT_BASE_URL: &str = "https://play.google.com/store/apps";
pub const DEFAULT_SEARCH_URL: &str = "https://play.google.com/store/search";
pub const DEFAULT_SUGGESTION_URL: &str = "https://market.android.com/suggest/SuggRequest";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_5) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/45.0.2454.101 Safari/537.36";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            suggestion_url: DEFAULT_SUGGESTION_URL.to_string(),
            language: "en".to_string(),
            country: "us".to_string(),
            log_level: "info".to_string(),
            request_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrent_requests: 10,
            num_results: 60,
            dev_results: 24,
            similar_results: 24,
            max_retries: 2,
            retry_backoff_base_ms: 500,
        }
    }
}

impl AppConfig {
    /// Returns a copy of this config with every endpoint rooted at `origin`.
    ///
    /// Used to point a client at a local mock server; paths mirror the real
    /// storefront (`/store/apps`, `/store/search`, `/suggest/SuggRequest`).
    #[must_use]
    pub fn with_origin(&self, origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            base_url: format!("{origin}/store/apps"),
            search_url: format!("{origin}/store/search"),
            suggestion_url: format!("{origin}/suggest/SuggRequest"),
            ..self.clone()
        }
    }
}
