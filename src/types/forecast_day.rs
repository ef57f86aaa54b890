//! Defines the per-day forecast record and the reasons a day-entry can be skipped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One day of a scraped 7-day forecast.
///
/// All fields are kept as the text found in the page. Temperatures have their
/// degree suffix removed but are not parsed into numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// The day label as shown by the portal, e.g. `"20日（今天）"`.
    pub date: String,
    /// Weather description, e.g. `"晴"` or `"多云转阴"`.
    pub condition: String,
    /// Daytime high. The portal omits it for the trailing entry once the day is over.
    pub high_temp: Option<String>,
    /// Overnight low.
    pub low_temp: String,
}

impl ForecastDay {
    pub fn new(
        date: impl Into<String>,
        condition: impl Into<String>,
        high_temp: Option<String>,
        low_temp: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            condition: condition.into(),
            high_temp,
            low_temp: low_temp.into(),
        }
    }
}

/// Why a single day-entry could not be turned into a [`ForecastDay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DaySkipReason {
    #[error("day entry has no <h1> date label")]
    MissingDate,

    #[error("day entry has no condition paragraph")]
    MissingCondition,

    #[error("day entry has no temperature paragraph")]
    MissingTemperatures,

    #[error("temperature paragraph has no <i> low temperature")]
    MissingLowTemperature,
}

/// A day-entry that was skipped, with its position among the entries of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("day entry #{index} skipped: {reason}")]
pub struct SkippedDay {
    pub index: usize,
    pub reason: DaySkipReason,
}

/// Outcome of extracting one day-entry.
pub type DayOutcome = Result<ForecastDay, SkippedDay>;
