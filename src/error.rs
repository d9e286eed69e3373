use thiserror::Error;

/// Failure classification for outbound content-API calls.
///
/// Collection readers swallow every variant and degrade to an empty list;
/// detail readers turn a 404 into an absent result and propagate the rest;
/// `add_news` propagates everything with the response body attached.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0} ms")]
    Timeout(u64),

    #[error("http status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl ApiError {
    /// True for failures worth retrying: the transport failed before the
    /// server gave an answer. Status errors are never retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Timeout(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}
