use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response body for {0} is not valid UTF-8")]
    Decode(String, #[source] std::string::FromUtf8Error),

    #[error("I/O error writing forecast CSV '{0}'")]
    CsvWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing forecast CSV '{0}'")]
    CsvWritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed to build forecast DataFrame")]
    DataFrame(#[from] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ForecastError {
    /// Whether another attempt at the same request might succeed.
    ///
    /// Transport failures and 5xx responses are retried; 4xx responses and
    /// undecodable bodies are not.
    pub fn is_retriable(&self) -> bool {
        match self {
            ForecastError::NetworkRequest(_, e) => {
                e.is_timeout() || e.is_connect() || e.is_request() || e.is_body()
            }
            ForecastError::HttpStatus { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}
