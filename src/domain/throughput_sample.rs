use std::num::NonZeroUsize;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::throughput::Throughput;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("throughput sample is empty")]
    Empty,
    #[error("throughput value at position {position} is not a number: {value}")]
    NonNumeric { position: usize, value: String },
    #[error("throughput value at position {position} is negative: {value}")]
    Negative { position: usize, value: f64 },
}

/// Historical completion counts, one value per period, in source order.
///
/// A sample is validated once at construction and immutable afterwards:
/// it holds at least one value and every value is finite and `>= 0`.
/// Periods with zero completions are kept, they are part of the observed
/// variability.
#[derive(Debug, Clone, PartialEq)]
pub struct ThroughputSample {
    values: Vec<f64>,
}

impl ThroughputSample {
    pub fn new(values: Vec<f64>) -> Result<Self, ValidationError> {
        if values.is_empty() {
            return Err(ValidationError::Empty);
        }
        for (position, value) in values.iter().copied().enumerate() {
            if !value.is_finite() {
                return Err(ValidationError::NonNumeric {
                    position,
                    value: value.to_string(),
                });
            }
            if value < 0.0 {
                return Err(ValidationError::Negative { position, value });
            }
        }
        Ok(Self { values })
    }

    pub fn from_throughput(records: &[Throughput]) -> Result<Self, ValidationError> {
        Self::new(records.iter().map(|t| t.completed_issues).collect())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Keeps the last `periods` values, or the whole sample when it is shorter.
    pub fn most_recent(&self, periods: NonZeroUsize) -> Self {
        let keep = periods.get().min(self.values.len());
        Self {
            values: self.values[self.values.len() - keep..].to_vec(),
        }
    }
}

/// Parses values separated by commas, semicolons or whitespace, e.g. `"2, 3, 5"`.
impl FromStr for ThroughputSample {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let values = input
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .enumerate()
            .map(|(position, token)| {
                token
                    .parse::<f64>()
                    .map_err(|_| ValidationError::NonNumeric {
                        position,
                        value: token.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(values)
    }
}
