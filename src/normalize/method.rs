use crate::normalize::error::NormalizeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which rescaling to apply to each selected column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMethod {
    /// `(x - mean) / std`, giving zero mean and unit sample variance.
    ZScore,
    /// `(x - min) / (max - min)`, mapping onto `[0, 1]`.
    MinMax,
}

impl NormalizationMethod {
    pub fn name(&self) -> &'static str {
        match self {
            NormalizationMethod::ZScore => "zscore",
            NormalizationMethod::MinMax => "minmax",
        }
    }
}

/// Parses the method names `zscore` and `minmax`.
///
/// # Examples
///
/// ```
/// use weather_crawler::NormalizationMethod;
///
/// assert_eq!("minmax".parse::<NormalizationMethod>().unwrap(), NormalizationMethod::MinMax);
/// assert!("robust".parse::<NormalizationMethod>().is_err());
/// ```
impl FromStr for NormalizationMethod {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zscore" => Ok(NormalizationMethod::ZScore),
            "minmax" => Ok(NormalizationMethod::MinMax),
            other => Err(NormalizeError::UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
