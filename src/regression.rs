//! Simple (one-predictor) ordinary least squares.
//!
//! # Formula
//! ```text
//! slope     = Σ(xᵢ − x̄)(yᵢ − ȳ) / Σ(xᵢ − x̄)²
//! intercept = ȳ − slope · x̄
//! R²        = 1 − SSres / SStot
//! ```
//!
//! When `y` is constant (`SStot = 0`) the fit quality is undefined; this
//! module reports `R² = 0` and `correlation = 0` in that case rather than
//! treating the horizontal line as a perfect fit.

use std::fmt;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{Result, StatsError};
use crate::stats::{self, kahan_sum};

/// Fitted line and its quality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionResult {
    /// Change in `y` per unit of `x`; exactly `0` when `y` is constant.
    pub slope: f64,
    /// Value of the fitted line at `x = 0`.
    pub intercept: f64,
    /// Coefficient of determination in `[0, 1]`; `0` when `y` is constant.
    pub r_squared: f64,
    /// Display form, `y = {slope}x + {intercept}` with four decimals.
    pub equation: String,
    /// Pearson correlation, `±√R²` with the sign of the slope.
    pub correlation: f64,
}

impl RegressionResult {
    /// Evaluates the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl fmt::Display for RegressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (R² = {:.4}, r = {:.4})",
            self.equation, self.r_squared, self.correlation
        )
    }
}

/// Fits `y = slope·x + intercept` by least squares.
///
/// # Errors
/// - Type errors if either input contains NaN or an infinity.
/// - [`StatsError::Empty`] if either input is empty.
/// - [`StatsError::LengthMismatch`] if the lengths differ.
/// - [`StatsError::NoVariance`] if every `x` is identical.
/// - [`StatsError::Overflow`] if the slope or intercept is outside the
///   `f64` range.
///
/// # Complexity
/// Time: O(n), Space: O(n)
///
/// # Examples
/// ```
/// use u_insight::regress;
/// let fit = regress(&[1.0, 2.0, 3.0, 4.0, 5.0], &[10.0, 8.0, 6.0, 4.0, 2.0]).unwrap();
/// assert_eq!(fit.slope, -2.0);
/// assert_eq!(fit.intercept, 12.0);
/// assert_eq!(fit.correlation, -1.0);
/// ```
pub fn regress(x_data: &[f64], y_data: &[f64]) -> Result<RegressionResult> {
    let x = Dataset::try_from(x_data)?;
    let y = Dataset::try_from(y_data)?;
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if stats::is_constant(&x) {
        return Err(StatsError::NoVariance { subject: "x_data" });
    }
    let y_constant = stats::is_constant(&y);

    let mut fit = LineFit::of(&x, &y);
    if fit.is_degenerate(y_constant) {
        // Sums of squares left the f64 range; refit in units of the largest
        // magnitude of each axis.
        let x_scale = stats::max_abs(&x);
        let y_scale = match stats::max_abs(&y) {
            s if s > 0.0 => s,
            _ => 1.0,
        };
        let scaled = LineFit::of(&rescale(&x, x_scale)?, &rescale(&y, y_scale)?);
        fit = LineFit {
            slope: scaled.slope * (y_scale / x_scale),
            intercept: scaled.intercept * y_scale,
            ..scaled
        };
        tracing::debug!(x_scale, y_scale, "refitted on rescaled data");
        if fit.is_degenerate(y_constant) {
            return Err(StatsError::Overflow {
                operation: "Linear regression",
            });
        }
    }
    let LineFit {
        slope,
        intercept,
        ss_tot,
        ss_res,
    } = fit;

    let (r_squared, correlation) = if y_constant {
        tracing::debug!("y_data has no variance; reporting R² = 0");
        (0.0, 0.0)
    } else {
        let r2 = (1.0 - ss_res / ss_tot).clamp(0.0, 1.0);
        let r = if slope < 0.0 { -r2.sqrt() } else { r2.sqrt() };
        (r2, r)
    };

    tracing::debug!(
        n = x.len(),
        slope,
        intercept,
        r_squared,
        "fitted least-squares line"
    );

    Ok(RegressionResult {
        slope,
        intercept,
        r_squared,
        equation: format!("y = {slope:.4}x + {intercept:.4}"),
        correlation,
    })
}

/// Raw least-squares quantities for one pair of axes.
struct LineFit {
    slope: f64,
    intercept: f64,
    ss_tot: f64,
    ss_res: f64,
}

impl LineFit {
    fn of(x: &Dataset, y: &Dataset) -> Self {
        let x_mean = stats::mean(x);
        let y_mean = stats::mean(y);
        let pairs = || x.iter().copied().zip(y.iter().copied());

        let sxx = kahan_sum(x.iter().map(|&xi| (xi - x_mean) * (xi - x_mean)));
        let sxy = kahan_sum(pairs().map(|(xi, yi)| (xi - x_mean) * (yi - y_mean)));
        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let ss_tot = kahan_sum(y.iter().map(|&yi| (yi - y_mean) * (yi - y_mean)));
        let ss_res = kahan_sum(pairs().map(|(xi, yi)| {
            let residual = yi - (slope * xi + intercept);
            residual * residual
        }));

        LineFit {
            slope,
            intercept,
            ss_tot,
            ss_res,
        }
    }

    /// Some quantity overflowed, or a non-zero spread underflowed to zero.
    fn is_degenerate(&self, y_constant: bool) -> bool {
        let finite = self.slope.is_finite()
            && self.intercept.is_finite()
            && self.ss_tot.is_finite()
            && self.ss_res.is_finite();
        !finite || (!y_constant && self.ss_tot == 0.0)
    }
}

fn rescale(data: &Dataset, scale: f64) -> Result<Dataset> {
    Dataset::new(data.iter().map(|&v| v / scale).collect())
}
