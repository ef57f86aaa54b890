//! Statistics captured by a normalization run, reusable for new data or for
//! mapping normalized values back to their original scale.

use crate::normalize::error::NormalizeError;
use crate::normalize::method::NormalizationMethod;
use crate::normalize::normalizer::{numeric_column, EPSILON};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-column statistics for one method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnStats {
    /// Mean and sample standard deviation (ddof = 1).
    ZScore { mean: f64, std: f64 },
    MinMax { min: f64, max: f64 },
}

impl ColumnStats {
    /// `(offset, scale)` with `normalized = (x - offset) / scale`.
    /// The scale is floored at [`EPSILON`] so constant columns do not divide by zero.
    pub fn offset_scale(&self) -> (f64, f64) {
        match *self {
            ColumnStats::ZScore { mean, std } => (mean, std.max(EPSILON)),
            ColumnStats::MinMax { min, max } => (min, (max - min).max(EPSILON)),
        }
    }
}

/// The method and per-column statistics of a normalization, in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationParams {
    pub method: NormalizationMethod,
    pub columns: Vec<(String, ColumnStats)>,
}

impl NormalizationParams {
    pub fn new(method: NormalizationMethod) -> Self {
        Self {
            method,
            columns: Vec::new(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&ColumnStats> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, stats)| stats)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Normalizes `df` with these stored statistics instead of recomputing them.
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame, NormalizeError> {
        self.rescale(df, false)
    }

    /// Maps normalized values back to the original scale: `x * scale + offset`.
    pub fn invert(&self, df: &DataFrame) -> Result<DataFrame, NormalizeError> {
        self.rescale(df, true)
    }

    fn rescale(&self, df: &DataFrame, inverse: bool) -> Result<DataFrame, NormalizeError> {
        for (name, _) in &self.columns {
            numeric_column(df, name)?;
        }

        let exprs: Vec<Expr> = self
            .columns
            .iter()
            .map(|(name, stats)| {
                let (offset, scale) = stats.offset_scale();
                let x = col(name.as_str()).cast(DataType::Float64);
                let scaled = if inverse {
                    x * lit(scale) + lit(offset)
                } else {
                    (x - lit(offset)) / lit(scale)
                };
                scaled.alias(name.as_str())
            })
            .collect();

        Ok(df.clone().lazy().with_columns(exprs).collect()?)
    }
}
