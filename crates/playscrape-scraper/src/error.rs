use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {url}")]
    RateLimited { url: String },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// A request parameter broke one of the listing bounds. Raised before any
    /// request is sent.
    #[error("invalid {parameter} = {value}: {reason} (bound {bound})")]
    Validation {
        parameter: &'static str,
        value: u64,
        bound: u64,
        reason: &'static str,
    },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("unknown collection \"{0}\"")]
    UnknownCollection(String),

    #[error("unknown category \"{0}\"")]
    UnknownCategory(String),

    #[error("unknown age range \"{0}\"")]
    UnknownAgeRange(String),

    /// Single-item lookup failed at the transport layer.
    #[error("invalid application id {app_id}: {source}")]
    InvalidIdentifier {
        app_id: String,
        #[source]
        source: Box<ScraperError>,
    },

    /// The page has no title marker, so it is not an item page.
    #[error("missing title marker in {context}")]
    MissingTitle { context: String },

    #[error("unrecognized document format for {context}")]
    UnrecognizedDocument { context: String },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
