//! The main entry point: [`WeatherCrawler`] fetches a city's forecast page,
//! extracts the 7-day forecast and optionally saves it as CSV.

use crate::config::CrawlerConfig;
use crate::error::WeatherCrawlerError;
use crate::forecast::error::ForecastError;
use crate::forecast::extractor::extract_forecast;
use crate::forecast::fetcher::ForecastFetcher;
use crate::forecast::writer::{default_csv_path, write_forecast_csv};
use crate::types::city_report::CityReport;
use bon::bon;
use futures_util::stream::{self, StreamExt};
use log::{info, warn};
use std::path::PathBuf;
use tokio::task;

/// Client for scraping forecasts from weather.com.cn.
///
/// # Examples
///
/// ```no_run
/// # use weather_crawler::{WeatherCrawler, WeatherCrawlerError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeatherCrawlerError> {
/// let crawler = WeatherCrawler::new()?;
/// let report = crawler.forecast("101090114").call().await?;
/// if report.is_empty() {
///     println!("No forecast for {}", report.city_code);
/// }
/// # Ok(())
/// # }
/// ```
pub struct WeatherCrawler {
    fetcher: ForecastFetcher,
}

#[bon]
impl WeatherCrawler {
    /// Creates a crawler with [`CrawlerConfig::default`].
    pub fn new() -> Result<Self, WeatherCrawlerError> {
        Self::with_config(CrawlerConfig::default())
    }

    pub fn with_config(config: CrawlerConfig) -> Result<Self, WeatherCrawlerError> {
        Ok(Self {
            fetcher: ForecastFetcher::new(config)?,
        })
    }

    pub fn config(&self) -> &CrawlerConfig {
        self.fetcher.config()
    }

    /// Fetches and extracts one city's forecast, returning transport errors to the caller.
    pub async fn try_forecast(&self, city_code: &str) -> Result<CityReport, ForecastError> {
        let html = self.fetcher.fetch_page(city_code).await?;
        Ok(CityReport::from_extraction(city_code, extract_forecast(&html)))
    }

    /// Fetches one city's forecast and, unless disabled, writes it to CSV.
    ///
    /// Request failures are logged and produce an empty [`CityReport`]; check
    /// [`CityReport::is_empty`] to tell "no data" apart. Nothing is written for
    /// an empty report. Only a failed CSV write is returned as an error.
    ///
    /// * `save_csv` - defaults to `true`.
    /// * `output_path` - defaults to `<output_dir>/<city_name>_weather.csv`.
    #[builder(start_fn = forecast)]
    pub async fn build_forecast(
        &self,
        #[builder(start_fn)] city_code: &str,
        save_csv: Option<bool>,
        output_path: Option<PathBuf>,
    ) -> Result<CityReport, WeatherCrawlerError> {
        let report = self.report_or_empty(city_code).await;

        if report.is_empty() {
            warn!(
                "No forecast data for city {}; check the city code, the page structure or the network",
                city_code
            );
            return Ok(report);
        }

        if save_csv.unwrap_or(true) {
            self.save_csv(&report, output_path).await?;
        }
        info!(
            "Got {} forecast days for {} ({})",
            report.days.len(),
            report.city_name,
            city_code
        );
        Ok(report)
    }

    /// Writes a report's days to CSV on a blocking thread and returns the path written.
    pub async fn save_csv(
        &self,
        report: &CityReport,
        output_path: Option<PathBuf>,
    ) -> Result<PathBuf, WeatherCrawlerError> {
        let path = output_path
            .unwrap_or_else(|| default_csv_path(&self.config().output_dir, &report.city_name));
        let days = report.days.clone();
        let target = path.clone();
        task::spawn_blocking(move || write_forecast_csv(&days, &target))
            .await
            .map_err(ForecastError::from)??;
        Ok(path)
    }

    /// Fetches forecasts for several cities, at most `concurrency` at a time.
    ///
    /// Results come back in input order. Nothing is written to disk; failed
    /// cities get an empty report.
    pub async fn batch_forecast<I, S>(&self, city_codes: I) -> Vec<(String, CityReport)>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let concurrency = self.config().concurrency.max(1);
        stream::iter(city_codes.into_iter().map(Into::into))
            .map(|city_code: String| async move {
                info!("Fetching forecast for city {}", city_code);
                let report = self.report_or_empty(&city_code).await;
                (city_code, report)
            })
            .buffered(concurrency)
            .collect()
            .await
    }

    async fn report_or_empty(&self, city_code: &str) -> CityReport {
        match self.try_forecast(city_code).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Failed to fetch forecast for city {}: {}", city_code, e);
                CityReport::empty(city_code)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::fetcher::tests::{serve, Canned};
    use crate::types::city_report::UNKNOWN_CITY;
    use tempfile::tempdir;

    const PAGE: &str = include_str!("../tests/fixtures/forecast_7d.html");

    fn crawler_for(base_url: &str, output_dir: PathBuf, concurrency: usize) -> WeatherCrawler {
        let config = CrawlerConfig::builder()
            .base_url(base_url)
            .retry_times(0)
            .timeout_secs(5)
            .concurrency(concurrency)
            .output_dir(output_dir)
            .build();
        WeatherCrawler::with_config(config).unwrap()
    }

    fn not_found() -> Canned {
        Canned {
            status: "404 Not Found",
            body: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_forecast_writes_default_csv() -> Result<(), Box<dyn std::error::Error>> {
        let (base, _, _) = serve(vec![Canned::ok(PAGE)]).await;
        let dir = tempdir()?;
        let crawler = crawler_for(&base, dir.path().to_path_buf(), 1);

        let report = crawler.forecast("101090114").call().await?;

        assert_eq!(report.city_code, "101090114");
        assert_eq!(report.city_name, "石家庄");
        assert_eq!(report.days.len(), 7);
        assert!(report.skipped.is_empty());

        let csv = std::fs::read_to_string(dir.path().join("石家庄_weather.csv"))?;
        // BOM + header + 7 rows
        assert!(csv.starts_with('\u{feff}'));
        assert_eq!(csv.lines().count(), 8);
        Ok(())
    }

    #[tokio::test]
    async fn test_forecast_respects_output_path_and_save_flag(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (base, _, _) = serve(vec![Canned::ok(PAGE)]).await;
        let dir = tempdir()?;
        let crawler = crawler_for(&base, dir.path().to_path_buf(), 1);

        let custom = dir.path().join("custom.csv");
        crawler
            .forecast("101090114")
            .output_path(custom.clone())
            .call()
            .await?;
        assert!(custom.exists());
        assert!(!dir.path().join("石家庄_weather.csv").exists());

        let report = crawler
            .forecast("101090114")
            .save_csv(false)
            .call()
            .await?;
        assert_eq!(report.days.len(), 7);
        assert!(!dir.path().join("石家庄_weather.csv").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_forecast_failure_degrades_to_empty_report(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (base, _, _) = serve(vec![not_found()]).await;
        let dir = tempdir()?;
        let crawler = crawler_for(&base, dir.path().to_path_buf(), 1);

        let report = crawler.forecast("000000000").call().await?;

        assert!(report.is_empty());
        assert_eq!(report.city_name, UNKNOWN_CITY);
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_try_forecast_surfaces_transport_error() -> Result<(), Box<dyn std::error::Error>>
    {
        let (base, _, _) = serve(vec![not_found()]).await;
        let dir = tempdir()?;
        let crawler = crawler_for(&base, dir.path().to_path_buf(), 1);

        let result = crawler.try_forecast("000000000").await;

        assert!(matches!(result, Err(ForecastError::HttpStatus { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_batch_forecast_keeps_input_order() -> Result<(), Box<dyn std::error::Error>> {
        let (base, _, hits) = serve(vec![not_found(), Canned::ok(PAGE)]).await;
        let dir = tempdir()?;
        let crawler = crawler_for(&base, dir.path().to_path_buf(), 1);

        let results = crawler.batch_forecast(["101090114", "101010100"]).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "101090114");
        assert!(results[0].1.is_empty());
        assert_eq!(results[1].0, "101010100");
        assert_eq!(results[1].1.days.len(), 7);
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 2);
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_batch_forecast_concurrent() -> Result<(), Box<dyn std::error::Error>> {
        let (base, _, _) = serve(vec![Canned::ok(PAGE)]).await;
        let dir = tempdir()?;
        let crawler = crawler_for(&base, dir.path().to_path_buf(), 4);
        let codes: Vec<String> = (0..6).map(|i| format!("10101010{}", i)).collect();

        let results = crawler.batch_forecast(codes.clone()).await;

        let returned: Vec<String> = results.iter().map(|(code, _)| code.clone()).collect();
        assert_eq!(returned, codes);
        assert!(results.iter().all(|(_, report)| report.days.len() == 7));
        Ok(())
    }
}
