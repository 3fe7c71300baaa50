#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client")]
    Setup(#[source] reqwest::Error),

    #[error("network error while requesting {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("rate limited by GitHub (HTTP {status})")]
    RateLimited {
        status: u16,
        /// Unix timestamp from `x-ratelimit-reset`, when GitHub sent one.
        reset_at: Option<u64>,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("could not decode the gist listing")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    /// Whether trying again with a fresh page might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network { .. }
            | FetchError::RateLimited { .. }
            | FetchError::Status { .. } => true,
            FetchError::Setup(_) | FetchError::Decode(_) => false,
        }
    }
}

/// GitHub answers 403 or 422 when it throttles anonymous listing requests, and 429 for
/// secondary rate limits.
pub fn is_rate_limit_status(status: u16) -> bool {
    matches!(status, 403 | 422 | 429)
}
