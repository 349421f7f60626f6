//! Outlier detection.
//!
//! Two predicates are supported:
//!
//! - [`OutlierMethod::Iqr`] — Tukey fences `[Q1 − k·IQR, Q3 + k·IQR]`
//!   with `k = 1.5` by default.
//! - [`OutlierMethod::ZScore`] — `|x − mean| / σ > t` with `t = 3` by
//!   default.
//!
//! Results are the offending *values* in the caller's original order, one
//! entry per occurrence.
//!
//! # Quartile index policy
//!
//! Q1 and Q3 are read directly from the sorted data at `n/4` and `3n/4`
//! (integer division). When `n` is a multiple of four, both indices are
//! shifted down by one. This is not one of the Hyndman & Fan sample
//! quantile definitions; it is kept exactly so that the flagged sets stay
//! stable for existing callers. See [`fence_quartiles`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{Result, StatsError};
use crate::stats;

/// Outlier predicate for [`detect_outliers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierMethod {
    /// Interquartile-range fences.
    #[default]
    Iqr,
    /// Distance from the mean in population standard deviations.
    ZScore,
}

impl OutlierMethod {
    const EXPECTED: &'static str = "'iqr' or 'z_score'";

    /// Selector string accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            OutlierMethod::Iqr => "iqr",
            OutlierMethod::ZScore => "z_score",
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutlierMethod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "iqr" => Ok(OutlierMethod::Iqr),
            "z_score" => Ok(OutlierMethod::ZScore),
            other => Err(StatsError::UnknownMethod {
                given: other.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// Tuning knobs for [`detect_outliers_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierOptions {
    /// IQR multiplier for the Tukey fences.
    pub iqr_fence: f64,
    /// Absolute z-score above which a value is flagged.
    pub z_threshold: f64,
}

impl Default for OutlierOptions {
    fn default() -> Self {
        Self {
            iqr_fence: 1.5,
            z_threshold: 3.0,
        }
    }
}

impl OutlierOptions {
    fn validate(&self) -> Result<()> {
        for (name, value) in [("iqr_fence", self.iqr_fence), ("z_threshold", self.z_threshold)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(StatsError::InvalidOption { name, value });
            }
        }
        Ok(())
    }
}

/// Flags outliers with the default [`OutlierOptions`].
///
/// # Errors
/// - [`StatsError::Empty`] / [`StatsError::NonNumeric`] for invalid input.
///
/// Constant data is never an error: with [`OutlierMethod::ZScore`] it
/// yields an empty result since σ = 0 leaves nothing to measure against.
///
/// # Examples
/// ```
/// use u_insight::{detect_outliers, OutlierMethod};
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 100.0];
/// assert_eq!(detect_outliers(&data, OutlierMethod::Iqr).unwrap(), vec![100.0]);
/// assert!(detect_outliers(&[5.0; 4], OutlierMethod::ZScore).unwrap().is_empty());
/// ```
pub fn detect_outliers(data: &[f64], method: OutlierMethod) -> Result<Vec<f64>> {
    detect_outliers_with(data, method, &OutlierOptions::default())
}

/// Flags outliers using caller-supplied fence width and z threshold.
///
/// # Errors
/// As [`detect_outliers`], plus [`StatsError::InvalidOption`] if either
/// option is non-finite or not strictly positive.
pub fn detect_outliers_with(
    data: &[f64],
    method: OutlierMethod,
    options: &OutlierOptions,
) -> Result<Vec<f64>> {
    let ds = Dataset::try_from(data)?;
    options.validate()?;
    let outliers = match method {
        OutlierMethod::Iqr => by_iqr(&ds, options.iqr_fence),
        OutlierMethod::ZScore => by_z_score(&ds, options.z_threshold),
    };
    tracing::debug!(
        %method,
        n = ds.len(),
        flagged = outliers.len(),
        "outlier detection finished"
    );
    Ok(outliers)
}

/// Returns `(Q1, Q3)` from ascending `sorted` data under the crate's index
/// policy, or `None` when `sorted` is empty.
///
/// | `n % 4` | Q1 | Q3 |
/// |---|---|---|
/// | `0` | `sorted[n/4 − 1]` | `sorted[3n/4 − 1]` |
/// | otherwise | `sorted[n/4]` | `sorted[3n/4]` |
///
/// # Examples
/// ```
/// use u_insight::outliers::fence_quartiles;
/// assert_eq!(fence_quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]), Some((2.0, 6.0)));
/// assert_eq!(fence_quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]), Some((3.0, 7.0)));
/// assert_eq!(fence_quartiles(&[]), None);
/// ```
pub fn fence_quartiles(sorted: &[f64]) -> Option<(f64, f64)> {
    let n = sorted.len();
    let shift = usize::from(n % 4 == 0);
    let q1 = *sorted.get((n / 4).checked_sub(shift)?)?;
    let q3 = *sorted.get((3 * n / 4).checked_sub(shift)?)?;
    Some((q1, q3))
}

fn by_iqr(data: &Dataset, fence: f64) -> Vec<f64> {
    let Some((q1, q3)) = fence_quartiles(&data.sorted()) else {
        return Vec::new();
    };
    let iqr = q3 - q1;
    let lower = q1 - fence * iqr;
    let upper = q3 + fence * iqr;
    tracing::trace!(q1, q3, lower, upper, "iqr fences");
    data.iter()
        .copied()
        .filter(|&x| x < lower || x > upper)
        .collect()
}

fn by_z_score(data: &Dataset, threshold: f64) -> Vec<f64> {
    if stats::is_constant(data) {
        tracing::debug!("data has no variance; no z-score outliers");
        return Vec::new();
    }
    let mean = stats::mean(data);
    let sd = stats::population_std_dev(data);
    data.iter()
        .copied()
        .filter(|&x| stats::ratio_of_differences(x, mean, sd, 0.0).abs() > threshold)
        .collect()
}
