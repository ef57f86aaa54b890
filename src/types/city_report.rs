//! Contains [`CityReport`], the result of scraping one city's forecast page.

use crate::forecast::extractor::ExtractedForecast;
use crate::types::forecast_day::{ForecastDay, SkippedDay};
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

/// City name used when the page has no recognizable city node.
pub const UNKNOWN_CITY: &str = "未知城市";

/// The scraped forecast for one city code.
///
/// An empty `days` list means "no data": either the request failed or the page
/// did not contain a forecast block. Callers are expected to check
/// [`CityReport::is_empty`] rather than look for an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityReport {
    pub city_code: String,
    pub city_name: String,
    /// Parsed days in document order.
    pub days: Vec<ForecastDay>,
    /// Day-entries that were present but malformed.
    pub skipped: Vec<SkippedDay>,
    pub fetched_at: DateTime<Utc>,
}

impl CityReport {
    /// A report with no days, used when the page could not be fetched.
    pub fn empty(city_code: &str) -> Self {
        Self {
            city_code: city_code.to_string(),
            city_name: UNKNOWN_CITY.to_string(),
            days: Vec::new(),
            skipped: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Splits extracted day outcomes into parsed days and skips, logging each skip.
    pub fn from_extraction(city_code: &str, extracted: ExtractedForecast) -> Self {
        let city_name = extracted
            .city_name
            .unwrap_or_else(|| UNKNOWN_CITY.to_string());

        let mut days = Vec::with_capacity(extracted.days.len());
        let mut skipped = Vec::new();
        for outcome in extracted.days {
            match outcome {
                Ok(day) => days.push(day),
                Err(skip) => {
                    warn!("{} ({}): {}", city_name, city_code, skip);
                    skipped.push(skip);
                }
            }
        }

        Self {
            city_code: city_code.to_string(),
            city_name,
            days,
            skipped,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
