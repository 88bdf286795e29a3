use thiserror::Error;

#[derive(Debug, Error)]
pub enum GemcheckError {
    #[error("API Error: {0}")]
    ApiError(String),
    #[error("Parse Error: {0}")]
    ParseError(String),
    #[error("Validation Error: {0}")]
    ValidationError(String),
    #[error("Network Error: {0}")]
    NetworkError(String),
    #[error("Cache Error: {0}")]
    CacheError(String),
}

impl From<reqwest::Error> for GemcheckError {
    fn from(err: reqwest::Error) -> Self {
        GemcheckError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for GemcheckError {
    fn from(err: serde_json::Error) -> Self {
        GemcheckError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for GemcheckError {
    fn from(err: std::io::Error) -> Self {
        GemcheckError::CacheError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GemcheckError>;
