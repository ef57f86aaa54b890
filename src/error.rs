use crate::forecast::error::ForecastError;
use crate::normalize::error::NormalizeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherCrawlerError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("Failed to read config file '{0}'")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    ConfigParse(PathBuf, #[source] serde_json::Error),
}
