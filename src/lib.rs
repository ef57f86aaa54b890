mod config;
mod crawler;
mod error;
pub mod forecast;
pub mod normalize;
mod types;

pub use config::CrawlerConfig;
pub use crawler::WeatherCrawler;
pub use error::WeatherCrawlerError;

pub use forecast::error::ForecastError;
pub use forecast::extractor::{extract_forecast, ExtractedForecast};
pub use forecast::writer::{default_csv_path, write_forecast_csv, CSV_HEADER};

pub use types::city_report::{CityReport, UNKNOWN_CITY};
pub use types::forecast_day::{DayOutcome, DaySkipReason, ForecastDay, SkippedDay};

pub use normalize::error::NormalizeError;
pub use normalize::method::NormalizationMethod;
pub use normalize::normalizer::{
    minmax_normalize, normalize, normalize_weather_data, numeric_columns, zscore_normalize,
    EPSILON, WEATHER_COLUMNS,
};
pub use normalize::params::{ColumnStats, NormalizationParams};
