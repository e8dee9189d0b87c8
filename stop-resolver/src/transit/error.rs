//! Transit API error types.

/// Errors from fetching catalogs and positions.
///
/// Every variant is transient from the point of view of a live session: the
/// session reports it and retries on its normal cadence.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized: check TRANSIT_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by transit API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Source cannot serve data right now (offline, missing fixture, ...)
    #[error("source unavailable: {0}")]
    Unavailable(String),
}
