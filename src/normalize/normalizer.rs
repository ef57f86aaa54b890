//! Z-score and min-max normalization of numeric DataFrame columns.
//!
//! Statistics are computed eagerly per column, then the rescaling runs as one
//! lazy `with_columns` pass over a copy of the input. The input frame is never
//! modified, column order and row order are kept, and columns that were not
//! selected pass through untouched. Selected columns come back as `Float64`.

use crate::normalize::error::NormalizeError;
use crate::normalize::method::NormalizationMethod;
use crate::normalize::params::{ColumnStats, NormalizationParams};
use log::{info, warn};
use polars::prelude::*;

/// Smallest divisor used when a column has zero spread.
pub const EPSILON: f64 = 1e-10;

/// Columns [`normalize_weather_data`] rescales when they are present.
pub const WEATHER_COLUMNS: [&str; 4] = ["temperature", "pressure", "humidity", "wind_speed"];

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Looks up `name` and checks that it holds numbers.
pub(crate) fn numeric_column<'a>(
    df: &'a DataFrame,
    name: &str,
) -> Result<&'a Column, NormalizeError> {
    let column = df
        .column(name)
        .map_err(|e| NormalizeError::ColumnNotFound(name.to_string(), e))?;
    if !is_numeric(column.dtype()) {
        return Err(NormalizeError::NonNumericColumn {
            column: name.to_string(),
            dtype: column.dtype().clone(),
        });
    }
    Ok(column)
}

fn float_column(df: &DataFrame, name: &str) -> Result<Float64Chunked, NormalizeError> {
    let column = numeric_column(df, name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.clone())
}

/// Names of all numeric columns, in frame order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|c| is_numeric(c.dtype()))
        .map(|c| c.name().to_string())
        .collect()
}

/// Explicit names are deduplicated, keeping first occurrence order.
fn resolve_columns(df: &DataFrame, columns: Option<&[&str]>) -> Vec<String> {
    match columns {
        Some(names) => {
            let mut resolved: Vec<String> = Vec::with_capacity(names.len());
            for name in names {
                if !resolved.iter().any(|r| r == name) {
                    resolved.push(name.to_string());
                }
            }
            resolved
        }
        None => numeric_columns(df),
    }
}

/// Values that take part in the statistics: nulls and NaNs are left out.
fn observed_values(df: &DataFrame, name: &str) -> Result<Float64Chunked, NormalizeError> {
    let values = float_column(df, name)?;
    let mask = values.is_not_nan();
    Ok(values.filter(&mask)?)
}

fn column_stats(
    df: &DataFrame,
    name: &str,
    method: NormalizationMethod,
) -> Result<ColumnStats, NormalizeError> {
    let values = observed_values(df, name)?;
    if values.is_empty() {
        warn!(
            "Column '{}' has no values to compute {} statistics from",
            name, method
        );
    }
    match method {
        NormalizationMethod::ZScore => {
            let mean = values.mean().unwrap_or(f64::NAN);
            // A single value has no sample deviation; treat it as constant.
            let std = if values.len() == 1 {
                0.0
            } else {
                values.std(1).unwrap_or(f64::NAN)
            };
            Ok(ColumnStats::ZScore { mean, std })
        }
        NormalizationMethod::MinMax => Ok(ColumnStats::MinMax {
            min: values.min().unwrap_or(f64::NAN),
            max: values.max().unwrap_or(f64::NAN),
        }),
    }
}

/// Normalizes the selected columns with `method`.
///
/// `columns = None` selects every numeric column. Returns the rescaled copy
/// together with the statistics used, so the same transform can be applied to
/// new data or inverted later.
pub fn normalize(
    df: &DataFrame,
    columns: Option<&[&str]>,
    method: NormalizationMethod,
) -> Result<(DataFrame, NormalizationParams), NormalizeError> {
    let mut params = NormalizationParams::new(method);
    for name in resolve_columns(df, columns) {
        let stats = column_stats(df, &name, method)?;
        params.columns.push((name, stats));
    }
    let normalized = params.apply(df)?;
    Ok((normalized, params))
}

/// Z-score normalization: `(x - mean) / max(std, 1e-10)` with the sample standard deviation.
pub fn zscore_normalize(
    df: &DataFrame,
    columns: Option<&[&str]>,
) -> Result<(DataFrame, NormalizationParams), NormalizeError> {
    normalize(df, columns, NormalizationMethod::ZScore)
}

/// Min-max normalization: `(x - min) / max(max - min, 1e-10)`.
pub fn minmax_normalize(
    df: &DataFrame,
    columns: Option<&[&str]>,
) -> Result<(DataFrame, NormalizationParams), NormalizeError> {
    normalize(df, columns, NormalizationMethod::MinMax)
}

/// Normalizes the standard weather columns ([`WEATHER_COLUMNS`]) found in `df`
/// using the method named `method` (`"zscore"` or `"minmax"`).
///
/// An unknown method name fails with [`NormalizeError::UnknownMethod`] before
/// any work is done.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use weather_crawler::normalize_weather_data;
///
/// let df = df!(
///     "temperature" => [20, 22, 19, 25, 18, 30, 15],
///     "humidity" => [60, 65, 58, 70, 55, 75, 50],
/// ).unwrap();
///
/// let (normalized, params) = normalize_weather_data(&df, "minmax").unwrap();
/// assert_eq!(normalized.shape(), (7, 2));
/// assert_eq!(params.column_names(), ["temperature", "humidity"]);
/// ```
pub fn normalize_weather_data(
    df: &DataFrame,
    method: &str,
) -> Result<(DataFrame, NormalizationParams), NormalizeError> {
    let method: NormalizationMethod = method.parse()?;
    let columns: Vec<&str> = WEATHER_COLUMNS
        .iter()
        .copied()
        .filter(|name| df.get_column_index(name).is_some())
        .collect();

    let (normalized, params) = normalize(df, Some(columns.as_slice()), method)?;

    info!("Applied {} normalization", method);
    info!("  columns: {:?}", columns);
    info!("  shape: {:?} -> {:?}", df.shape(), normalized.shape());
    Ok((normalized, params))
}
