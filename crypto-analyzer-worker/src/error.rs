//! Error types for the analyzer
//!
//! Uses thiserror for ergonomic error definitions.
//! All errors are non-panicking; a failed symbol never takes the page down.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Analyzer errors
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// OKX API errors (non-2xx status or non-zero response code)
    #[error("OKX API error: {0}")]
    ExchangeApi(String),

    /// Response decoded as JSON but did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: retry after {0} seconds")]
    RateLimit(u64),

    /// Not enough candles to compute indicators
    #[error("Insufficient data for {symbol}: {available} candles, at least {required} required")]
    InsufficientData {
        symbol: String,
        available: usize,
        required: usize,
    },

    /// Bad request parameter or indicator argument
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// CSV export errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Worker runtime errors
    #[error("Worker error: {0}")]
    Worker(String),
}

impl AnalyzerError {
    /// HTTP status to answer with when this error ends a request
    pub fn status_code(&self) -> u16 {
        match self {
            AnalyzerError::InvalidParameter(_) => 400,
            AnalyzerError::InsufficientData { .. } => 422,
            AnalyzerError::RateLimit(_) => 429,
            AnalyzerError::Http(_)
            | AnalyzerError::ExchangeApi(_)
            | AnalyzerError::MalformedResponse(_)
            | AnalyzerError::Json(_) => 502,
            AnalyzerError::Config(_) | AnalyzerError::Csv(_) | AnalyzerError::Worker(_) => 500,
        }
    }
}

impl From<worker::Error> for AnalyzerError {
    fn from(err: worker::Error) -> Self {
        AnalyzerError::Worker(err.to_string())
    }
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(err: reqwest::Error) -> Self {
        AnalyzerError::Http(err.to_string())
    }
}

impl From<csv::Error> for AnalyzerError {
    fn from(err: csv::Error) -> Self {
        AnalyzerError::Csv(err.to_string())
    }
}

impl From<AnalyzerError> for worker::Error {
    fn from(err: AnalyzerError) -> Self {
        worker::Error::RustError(err.to_string())
    }
}
