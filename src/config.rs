//! Configuration for [`crate::WeatherCrawler`].
//!
//! Every field has a default, so `CrawlerConfig::default()` reproduces the
//! portal's expected request shape. Use the builder to override single fields:
//!
//! ```
//! use weather_crawler::CrawlerConfig;
//!
//! let config = CrawlerConfig::builder()
//!     .retry_times(0)
//!     .concurrency(2)
//!     .build();
//! assert_eq!(config.timeout_secs, 30);
//! ```

use crate::error::WeatherCrawlerError;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://www.weather.com.cn";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_TIMES: u32 = 3;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;
pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Scheme and host of the portal. Forecast pages live at `{base_url}/weather/{code}.shtml`.
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    #[builder(into, default = DEFAULT_USER_AGENT.to_string())]
    pub user_agent: String,
    #[builder(default = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
    /// Extra attempts after the first failed request.
    #[builder(default = DEFAULT_RETRY_TIMES)]
    pub retry_times: u32,
    /// Backoff before retry `n` is `n * retry_backoff_ms`.
    #[builder(default = DEFAULT_RETRY_BACKOFF_MS)]
    pub retry_backoff_ms: u64,
    /// Maximum number of cities fetched at once by batch operations.
    #[builder(default = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
    /// Directory that default CSV file names are resolved against.
    #[builder(into, default = PathBuf::from("."))]
    pub output_dir: PathBuf,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CrawlerConfig {
    /// Loads a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, WeatherCrawlerError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| WeatherCrawlerError::ConfigRead(path.to_path_buf(), e))?;
        serde_json::from_str(&text)
            .map_err(|e| WeatherCrawlerError::ConfigParse(path.to_path_buf(), e))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(crate) fn retry_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(attempt as u64))
    }

    pub(crate) fn forecast_url(&self, city_code: &str) -> String {
        format!(
            "{}/weather/{}.shtml",
            self.base_url.trim_end_matches('/'),
            city_code
        )
    }
}
