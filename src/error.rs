use thiserror::Error;

/// EnterMedia client error types
#[derive(Error, Debug)]
pub enum EnterMediaError {
    #[error("Could not connect to EnterMedia: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("EnterMedia rejected the request, check the configured credentials: {0}")]
    AuthConfig(String),

    #[error("Unexpected response from EnterMedia: {status} - {reason}")]
    UnexpectedStatus { status: u16, reason: String },

    #[error("Request to EnterMedia failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),

    #[error("File access failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for EnterMedia operations
pub type EnterMediaResult<T> = Result<T, EnterMediaError>;

impl EnterMediaError {
    /// Create an unexpected status error from a status code and reason phrase
    pub fn unexpected_status(status: u16, reason: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            reason: reason.into(),
        }
    }

    /// Create an authentication configuration error
    pub fn auth_config(message: impl Into<String>) -> Self {
        Self::AuthConfig(message.into())
    }

    /// Create a request failed error
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed(message.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Whether this error came from a 403 response
    pub fn is_auth_config(&self) -> bool {
        matches!(self, Self::AuthConfig(_))
    }
}
