//! Descriptive statistics: central tendency, dispersion and range in one
//! call.
//!
//! [`analyze`] validates the input, then derives every field of
//! [`StatisticsResult`] from the primitives in [`crate::stats`].

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::stats;

/// Most frequent value(s) of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Mode {
    /// Every value occurs exactly once (and there is more than one value).
    Absent,
    /// A single value attains the highest count.
    Unique(f64),
    /// Several values tie for the highest count, in first-seen order.
    Tied(Vec<f64>),
}

impl Mode {
    /// Returns the single modal value, if there is exactly one.
    pub fn as_unique(&self) -> Option<f64> {
        match self {
            Mode::Unique(v) => Some(*v),
            _ => None,
        }
    }

    /// `true` when the dataset has no mode.
    pub fn is_absent(&self) -> bool {
        matches!(self, Mode::Absent)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Absent => write!(f, "none"),
            Mode::Unique(v) => write!(f, "{v}"),
            Mode::Tied(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Summary of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsResult {
    /// Arithmetic mean; always within `[min, max]`.
    pub mean: f64,
    /// Middle value, or the midpoint of the two middle values.
    pub median: f64,
    /// Most frequent value(s); see [`Mode`].
    pub mode: Mode,
    /// Population standard deviation (divides by `count`).
    pub std_dev: f64,
    /// Number of samples.
    pub count: usize,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
}

impl fmt::Display for StatisticsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count={} mean={:.4} median={:.4} mode={} std_dev={:.4} min={} max={}",
            self.count, self.mean, self.median, self.mode, self.std_dev, self.min, self.max
        )
    }
}

/// Computes mean, median, mode, population standard deviation, count, min
/// and max of `data`.
///
/// # Errors
/// - [`StatsError::Empty`](crate::StatsError::Empty) for empty input.
/// - [`StatsError::NonNumeric`](crate::StatsError::NonNumeric) if any
///   sample is NaN or infinite.
///
/// # Complexity
/// Time: O(n log n) (median sort), Space: O(n)
///
/// # Examples
/// ```
/// use u_insight::{analyze, Mode};
/// let r = analyze(&[1.0, 2.0, 2.0, 3.0, 4.0, 2.0, 5.0]).unwrap();
/// assert_eq!(r.mode, Mode::Unique(2.0));
/// assert_eq!(r.count, 7);
/// ```
pub fn analyze(data: &[f64]) -> Result<StatisticsResult> {
    let ds = Dataset::try_from(data)?;
    let result = StatisticsResult {
        mean: stats::mean(&ds),
        median: stats::median(&ds),
        mode: mode(&ds),
        std_dev: stats::population_std_dev(&ds),
        count: ds.len(),
        min: stats::min(&ds),
        max: stats::max(&ds),
    };
    tracing::debug!(
        count = result.count,
        mean = result.mean,
        std_dev = result.std_dev,
        "analyzed dataset"
    );
    Ok(result)
}

/// Finds the mode of `data` using numeric equality (`-0.0 == 0.0`).
///
/// Returns [`Mode::Absent`] when every value is distinct and there is more
/// than one value; a single-element dataset has that element as its mode.
pub fn mode(data: &Dataset) -> Mode {
    let mut slots: HashMap<u64, usize> = HashMap::with_capacity(data.len());
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &x in data.iter() {
        let slot = *slots.entry(equality_key(x)).or_insert_with(|| {
            counts.push((x, 0));
            counts.len() - 1
        });
        counts[slot].1 += 1;
    }

    let max_count = counts.iter().map(|&(_, c)| c).max().unwrap_or(0);
    let candidates: Vec<f64> = counts
        .iter()
        .filter(|&&(_, c)| c == max_count)
        .map(|&(v, _)| v)
        .collect();

    if candidates.len() == data.len() && data.len() > 1 {
        Mode::Absent
    } else if candidates.len() == 1 {
        Mode::Unique(candidates[0])
    } else {
        Mode::Tied(candidates)
    }
}

/// Bit pattern under which numerically equal finite values collide.
fn equality_key(x: f64) -> u64 {
    if x == 0.0 {
        0.0_f64.to_bits()
    } else {
        x.to_bits()
    }
}
