//! Element-wise rescaling.
//!
//! | Method | Output |
//! |---|---|
//! | [`NormalizationMethod::ZScore`] | (x − mean) / σ |
//! | [`NormalizationMethod::MinMax`] | (x − min) / (max − min) |
//!
//! Both methods are undefined for data with zero spread and return
//! [`StatsError::NoVariance`] instead of dividing by zero.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{Result, StatsError};
use crate::stats;

/// Rescaling strategy for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMethod {
    /// Standard score using the population standard deviation.
    #[default]
    ZScore,
    /// Linear map of `[min, max]` onto `[0, 1]`.
    MinMax,
}

impl NormalizationMethod {
    const EXPECTED: &'static str = "'z_score' or 'min_max'";

    /// Selector string accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationMethod::ZScore => "z_score",
            NormalizationMethod::MinMax => "min_max",
        }
    }
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizationMethod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "z_score" => Ok(NormalizationMethod::ZScore),
            "min_max" => Ok(NormalizationMethod::MinMax),
            other => Err(StatsError::UnknownMethod {
                given: other.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// Rescales `data` element-wise, preserving order and length.
///
/// # Errors
/// - [`StatsError::Empty`] / [`StatsError::NonNumeric`] for invalid input.
/// - [`StatsError::NoVariance`] if σ = 0 (`ZScore`) or max = min
///   (`MinMax`). A single-element dataset always fails this way.
///
/// # Examples
/// ```
/// use u_insight::{normalize, NormalizationMethod};
/// let out = normalize(&[10.0, 20.0, 30.0], NormalizationMethod::MinMax).unwrap();
/// assert_eq!(out, vec![0.0, 0.5, 1.0]);
/// ```
pub fn normalize(data: &[f64], method: NormalizationMethod) -> Result<Vec<f64>> {
    let ds = Dataset::try_from(data)?;
    if stats::is_constant(&ds) {
        return Err(StatsError::NoVariance { subject: "Data" });
    }
    let (offset, upper, lower) = match method {
        NormalizationMethod::ZScore => (stats::mean(&ds), stats::population_std_dev(&ds), 0.0),
        NormalizationMethod::MinMax => {
            let lo = stats::min(&ds);
            (lo, stats::max(&ds), lo)
        }
    };
    tracing::debug!(%method, n = ds.len(), offset, upper, lower, "normalizing dataset");
    Ok(ds
        .iter()
        .map(|&x| stats::ratio_of_differences(x, offset, upper, lower))
        .collect())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn min_max_lands_in_unit_interval(
            data in proptest::collection::vec(-1e6_f64..1e6, 2..=80),
        ) {
            if let Ok(out) = normalize(&data, NormalizationMethod::MinMax) {
                prop_assert_eq!(out.len(), data.len());
                prop_assert!(out.iter().all(|&v| (0.0..=1.0).contains(&v)));
            }
        }

        #[test]
        fn z_score_has_zero_mean_unit_sd(
            data in proptest::collection::vec(-1e3_f64..1e3, 2..=80),
        ) {
            if let Ok(out) = normalize(&data, NormalizationMethod::ZScore) {
                let n = out.len() as f64;
                let mean = out.iter().sum::<f64>() / n;
                let sd = (out.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n).sqrt();
                prop_assert!(mean.abs() < 1e-9, "mean = {}", mean);
                prop_assert!((sd - 1.0).abs() < 1e-9, "sd = {}", sd);
            }
        }

        #[test]
        fn z_score_preserves_ordering(
            data in proptest::collection::vec(-1e6_f64..1e6, 2..=80),
        ) {
            if let Ok(out) = normalize(&data, NormalizationMethod::ZScore) {
                for i in 0..data.len() {
                    for j in 0..data.len() {
                        if data[i] < data[j] {
                            prop_assert!(out[i] <= out[j]);
                        }
                    }
                }
            }
        }
    }
}
