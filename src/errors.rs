use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Caller input was rejected before any network access
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// The bulletin index page could not be retrieved
    #[error("Fetch error: {0}")]
    FetchError(String),
    /// The bulletin PDF could not be retrieved from its origin
    #[error("Upstream error: {0}")]
    UpstreamError(String),
    /// The index page was parsed but no row matched
    #[error("Not found: {0}")]
    NotFoundError(String),
    /// Anything else that went wrong while serving a request
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Transport-level failure (connect, timeout, TLS)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    UrlError(String),
    /// Invalid configuration or command-line input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
}

impl AppError {
    /// Returns the message without the variant prefix.
    ///
    /// This is what ends up in the `{"error": ...}` body of HTTP responses.
    pub fn message(&self) -> &str {
        match self {
            AppError::ValidationError(msg)
            | AppError::FetchError(msg)
            | AppError::UpstreamError(msg)
            | AppError::NotFoundError(msg)
            | AppError::InternalError(msg)
            | AppError::NetworkError(msg)
            | AppError::UrlError(msg)
            | AppError::InvalidInput(msg)
            | AppError::IoError(msg) => msg,
        }
    }

    /// HTTP status code reported for this error at the API boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::ValidationError(_) => 400,
            AppError::UpstreamError(_) => 502,
            _ => 500,
        }
    }
}

// Conversion implementations for common errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::UrlError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
