use crate::forecast::error::ForecastError;
use crate::types::forecast_day::ForecastDay;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Header row of the forecast CSV: date, condition, high (℃), low (℃).
pub const CSV_HEADER: [&str; 4] = ["日期", "天气", "最高温(℃)", "最低温(℃)"];

/// `<output_dir>/<city_name>_weather.csv`
pub fn default_csv_path(output_dir: &Path, city_name: &str) -> PathBuf {
    output_dir.join(format!("{}_weather.csv", city_name))
}

/// Builds a string-typed DataFrame with one row per day and [`CSV_HEADER`] as column names.
/// A missing high temperature becomes a null cell.
pub fn forecast_frame(days: &[ForecastDay]) -> PolarsResult<DataFrame> {
    let dates: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();
    let conditions: Vec<&str> = days.iter().map(|d| d.condition.as_str()).collect();
    let highs: Vec<Option<&str>> = days.iter().map(|d| d.high_temp.as_deref()).collect();
    let lows: Vec<&str> = days.iter().map(|d| d.low_temp.as_str()).collect();

    df!(
        CSV_HEADER[0] => dates,
        CSV_HEADER[1] => conditions,
        CSV_HEADER[2] => highs,
        CSV_HEADER[3] => lows,
    )
}

/// Writes `days` to `path` as UTF-8 CSV with a byte-order mark, so spreadsheet
/// tools pick up the encoding. Creates or truncates the file; a failure midway
/// leaves a partial file behind.
pub fn write_forecast_csv(days: &[ForecastDay], path: &Path) -> Result<(), ForecastError> {
    let mut df = forecast_frame(days)?;
    let file = File::create(path).map_err(|e| ForecastError::CsvWriteIo(path.to_path_buf(), e))?;
    CsvWriter::new(file)
        .include_bom(true)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| ForecastError::CsvWritePolars(path.to_path_buf(), e))?;
    info!("Wrote {} forecast rows to {}", days.len(), path.display());
    Ok(())
}
