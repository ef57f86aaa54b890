use polars::error::PolarsError;
use polars::prelude::DataType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Unknown normalization method '{0}', expected 'zscore' or 'minmax'")]
    UnknownMethod(String),

    #[error("Column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Column '{column}' has non-numeric type {dtype}")]
    NonNumericColumn { column: String, dtype: DataType },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
