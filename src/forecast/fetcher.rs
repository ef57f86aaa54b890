use crate::config::CrawlerConfig;
use crate::forecast::error::ForecastError;
use log::{debug, info, warn};
use reqwest::Client;

/// Downloads forecast pages from the portal.
///
/// Holds one `reqwest::Client` configured with the user agent and timeout from
/// [`CrawlerConfig`], so connections are reused across cities.
pub struct ForecastFetcher {
    client: Client,
    config: CrawlerConfig,
}

impl ForecastFetcher {
    pub fn new(config: CrawlerConfig) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(ForecastError::ClientBuild)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Fetches the forecast page for `city_code` and decodes it as UTF-8.
    ///
    /// Retriable failures (see [`ForecastError::is_retriable`]) are attempted
    /// again up to `retry_times` times with a linearly growing delay.
    pub async fn fetch_page(&self, city_code: &str) -> Result<String, ForecastError> {
        let url = self.config.forecast_url(city_code);
        let mut attempt = 0;
        loop {
            match self.fetch_once(&url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retriable() && attempt < self.config.retry_times => {
                    attempt += 1;
                    let delay = self.config.retry_delay(attempt);
                    warn!(
                        "Request to {} failed ({}), retry {}/{} in {:?}",
                        url, e, attempt, self.config.retry_times, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, ForecastError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ForecastError::NetworkRequest(url.to_string(), e))?;

        let status = response.status();
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ForecastError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    ForecastError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ForecastError::NetworkRequest(url.to_string(), e))?;
        let html =
            String::from_utf8(bytes.to_vec()).map_err(|e| ForecastError::Decode(url.to_string(), e))?;
        info!("Fetched {} ({}, {} bytes)", url, status, html.len());
        Ok(html)
    }
}
