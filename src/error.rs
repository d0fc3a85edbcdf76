use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for the collection pipeline.
///
/// The retry layer dispatches on the variant: `Transient` and `Waitable`
/// are retried with fixed delays, everything else is returned to the
/// caller on first occurrence.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Connection-level failure before any HTTP status was received.
    #[error("network error: {0}")]
    Transient(#[source] reqwest::Error),

    /// HTTP status >= 429: the server asked us to slow down.
    #[error("rate limited (http {0})")]
    Waitable(StatusCode),

    /// HTTP status in 400..429: permanent client-side failure.
    #[error("http {0}")]
    NotWaitable(StatusCode),

    /// A 2xx response whose body did not parse as the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A match id without a parseable "{shard}_{ordinal}" structure.
    #[error("malformed match id: {0:?}")]
    MalformedMatchId(String),
}

impl CollectError {
    pub fn is_not_waitable(&self) -> bool {
        matches!(self, CollectError::NotWaitable(_))
    }
}
