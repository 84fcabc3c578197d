use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API returned error status: {status}")]
    ApiError { status: reqwest::StatusCode },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SdkError {
    /// True when the exchange never completed at the connection level.
    pub fn is_transport(&self) -> bool {
        matches!(self, SdkError::HttpError(err) if !err.is_decode() && !err.is_status())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
