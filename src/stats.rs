//! Shared numeric primitives.
//!
//! Every function here takes a validated [`Dataset`], so none of them can
//! fail: the data is non-empty and every sample is finite. The higher-level
//! routines ([`crate::descriptive`], [`crate::regression`],
//! [`crate::normalize`], [`crate::outliers`]) are built from these.
//!
//! # Algorithms
//!
//! - **Sum/Mean**: Neumaier compensated summation for O(ε) error
//!   independent of n. If the running sum leaves the `f64` range, the mean
//!   is recomputed from pre-divided samples.
//! - **Variance**: two-pass population form, Σ(x − x̄)² / n.
//! - **Standard deviation**: falls back to samples rescaled by the largest
//!   magnitude when squared deviations overflow or underflow.
//! - **Median**: sort a copy, take the middle element or the midpoint of
//!   the two middle elements.

use crate::dataset::Dataset;

/// Neumaier compensated sum of an arbitrary stream of values.
///
/// # Algorithm
/// Maintains a running compensation term `c`. At each step the branch
/// captures the low-order bits of whichever operand is smaller in
/// magnitude, so large and small addends can be mixed freely.
///
/// Reference: Neumaier (1974), *Zeitschrift für Angewandte Mathematik und
/// Mechanik* 54(1), pp. 39–51.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Returns
/// A non-finite value if the running sum overflows.
///
/// # Examples
/// ```
/// use u_insight::stats::kahan_sum;
/// let v = [1e16, 1.0, -1e16];
/// assert_eq!(kahan_sum(v.iter().copied()), 1.0);
/// ```
pub fn kahan_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for x in values {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Arithmetic mean, guaranteed to lie in `[min, max]`.
///
/// Constant data therefore has a mean exactly equal to its value, even
/// when that value (e.g. `0.1`) is not exactly representable.
///
/// # Examples
/// ```
/// use u_insight::{stats, Dataset};
/// let ds = Dataset::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(stats::mean(&ds), 3.0);
/// let constant = Dataset::new(vec![0.1; 3]).unwrap();
/// assert_eq!(stats::mean(&constant), 0.1);
/// ```
pub fn mean(data: &Dataset) -> f64 {
    mean_of(data).clamp(min(data), max(data))
}

fn mean_of(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let total = kahan_sum(values.iter().copied());
    if total.is_finite() {
        total / n
    } else {
        kahan_sum(values.iter().map(|&x| x / n))
    }
}

fn sum_sq_dev(values: &[f64], m: f64) -> f64 {
    kahan_sum(values.iter().map(|&x| {
        let d = x - m;
        d * d
    }))
}

/// Population variance: squared deviations divided by `n`, not `n − 1`.
///
/// A single-element or constant dataset has variance exactly `0.0`. The
/// variance itself can exceed `f64::MAX` for samples beyond ~1e154; use
/// [`population_std_dev`] when that matters.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn population_variance(data: &Dataset) -> f64 {
    sum_sq_dev(data, mean(data)) / data.len() as f64
}

/// Population standard deviation, `sqrt(population_variance)`.
///
/// Exactly `0.0` for constant data, and finite for every valid dataset.
///
/// # Examples
/// ```
/// use u_insight::{stats, Dataset};
/// let ds = Dataset::new(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert_eq!(stats::population_std_dev(&ds), 2.0);
/// let wide = Dataset::new(vec![-1e200, 0.0, 1e200]).unwrap();
/// assert!(stats::population_std_dev(&wide).is_finite());
/// ```
pub fn population_std_dev(data: &Dataset) -> f64 {
    if is_constant(data) {
        return 0.0;
    }
    let var = population_variance(data);
    if var.is_finite() && var > 0.0 {
        return var.sqrt();
    }
    // Squared deviations left the f64 range; work in units of the largest magnitude.
    let scale = max_abs(data);
    let scaled: Vec<f64> = data.iter().map(|&x| x / scale).collect();
    let ss = sum_sq_dev(&scaled, mean_of(&scaled));
    scale * (ss / data.len() as f64).sqrt()
}

/// Smallest sample.
pub fn min(data: &Dataset) -> f64 {
    data.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Largest sample.
pub fn max(data: &Dataset) -> f64 {
    data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Largest absolute value in `values`, `0.0` for an empty slice.
pub(crate) fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
}

/// `true` when every sample is numerically equal (zero spread).
///
/// This is an exact test and does not depend on rounding in the mean or
/// variance.
pub fn is_constant(data: &Dataset) -> bool {
    min(data) == max(data)
}

/// Median of `data`, computed on a sorted copy.
///
/// # Complexity
/// Time: O(n log n), Space: O(n)
///
/// # Examples
/// ```
/// use u_insight::{stats, Dataset};
/// let odd = Dataset::new(vec![3.0, 1.0, 2.0]).unwrap();
/// assert_eq!(stats::median(&odd), 2.0);
/// let even = Dataset::new(vec![4.0, 1.0, 3.0, 2.0]).unwrap();
/// assert_eq!(stats::median(&even), 2.5);
/// ```
pub fn median(data: &Dataset) -> f64 {
    median_sorted(&data.sorted())
}

/// Median of **pre-sorted**, non-empty data.
///
/// Lets callers that already hold a sorted copy skip a second sort.
pub(crate) fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        midpoint(sorted[n / 2 - 1], sorted[n / 2])
    }
}

/// Midpoint of `a <= b` that cannot overflow.
fn midpoint(a: f64, b: f64) -> f64 {
    if (a < 0.0) == (b < 0.0) {
        a + (b - a) / 2.0
    } else {
        (a + b) / 2.0
    }
}

/// `(a − b) / (c − d)` without overflowing either difference.
///
/// Halving is exact for normal values, so the result is unchanged whenever
/// the plain differences are finite.
pub(crate) fn ratio_of_differences(a: f64, b: f64, c: f64, d: f64) -> f64 {
    let num = a - b;
    let den = c - d;
    if num.is_finite() && den.is_finite() {
        num / den
    } else {
        (a * 0.5 - b * 0.5) / (c * 0.5 - d * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ds(values: &[f64]) -> Dataset {
        Dataset::new(values.to_vec()).unwrap()
    }

    // --- kahan_sum ---

    #[test]
    fn test_kahan_sum_basic() {
        assert_eq!(kahan_sum([1.0, 2.0, 3.0]), 6.0);
    }

    #[test]
    fn test_kahan_sum_precision() {
        // Naive summation loses the 1.0 entirely.
        let result = kahan_sum([1e16, 1.0, -1e16]);
        assert!(
            (result - 1.0).abs() < 1e-10,
            "compensated sum should preserve the 1.0: got {result}"
        );
    }

    #[test]
    fn test_kahan_sum_empty() {
        assert_eq!(kahan_sum(std::iter::empty()), 0.0);
    }

    // --- mean ---

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&ds(&[1.0, 2.0, 3.0, 4.0, 5.0])), 3.0);
    }

    #[test]
    fn test_mean_single() {
        assert_eq!(mean(&ds(&[42.0])), 42.0);
    }

    #[test]
    fn test_mean_symmetric_negatives() {
        assert_eq!(mean(&ds(&[-5.0, -3.0, -1.0, 1.0, 3.0, 5.0])), 0.0);
    }

    // --- variance ---

    #[test]
    fn test_population_variance_basic() {
        let v = ds(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(population_variance(&v), 4.0);
    }

    #[test]
    fn test_population_variance_single_is_zero() {
        assert_eq!(population_variance(&ds(&[7.5])), 0.0);
    }

    #[test]
    fn test_population_variance_constant() {
        assert_eq!(population_variance(&ds(&[5.0; 100])), 0.0);
    }

    #[test]
    fn test_population_std_dev_one_to_five() {
        assert_eq!(population_std_dev(&ds(&[1.0, 2.0, 3.0, 4.0, 5.0])), 2.0_f64.sqrt());
    }

    #[test]
    fn test_population_variance_large_offset() {
        // Two-pass form avoids cancellation around a large mean.
        let data: Vec<f64> = (1..=5).map(|i| 1e9 + i as f64).collect();
        let var = population_variance(&ds(&data));
        assert!((var - 2.0).abs() < 1e-5, "expected ~2.0, got {var}");
    }

    #[test]
    fn test_constant_unrepresentable_has_zero_spread() {
        for data in [vec![0.1; 3], vec![0.7; 6], vec![123.456; 5]] {
            let v = ds(&data);
            assert!(is_constant(&v));
            assert_eq!(mean(&v), data[0]);
            assert_eq!(population_variance(&v), 0.0);
            assert_eq!(population_std_dev(&v), 0.0);
        }
    }

    #[test]
    fn test_is_constant() {
        assert!(is_constant(&ds(&[0.0, -0.0])));
        assert!(!is_constant(&ds(&[1.0, 1.0 + f64::EPSILON])));
    }

    // --- extreme magnitudes ---

    #[test]
    fn test_mean_near_f64_max() {
        assert_eq!(mean(&ds(&[1e308, 1e308])), 1e308);
        let m = mean(&ds(&[f64::MAX, f64::MAX, 1.0]));
        assert!(m.is_finite() && m > 0.0, "mean = {m}");
    }

    #[test]
    fn test_std_dev_near_f64_max() {
        let sd = population_std_dev(&ds(&[-1e200, 0.0, 1e200]));
        let expected = 1e200 * (2.0_f64 / 3.0).sqrt();
        assert!((sd / expected - 1.0).abs() < 1e-12, "sd = {sd}");

        let sd = population_std_dev(&ds(&[-f64::MAX, f64::MAX]));
        assert!((sd / f64::MAX - 1.0).abs() < 1e-12, "sd = {sd}");
    }

    #[test]
    fn test_std_dev_subnormal_spread_is_positive() {
        let sd = population_std_dev(&ds(&[0.0, 1e-310, 2e-310]));
        assert!(sd > 0.0 && sd.is_finite(), "sd = {sd}");
    }

    #[test]
    fn test_median_near_f64_max() {
        assert_eq!(median(&ds(&[1e308, 1e308])), 1e308);
        assert_eq!(median(&ds(&[-f64::MAX, f64::MAX])), 0.0);
        let m = median(&ds(&[1.7e308, 1.79e308]));
        assert!((1.7e308..=1.79e308).contains(&m), "median = {m}");
    }

    #[test]
    fn test_ratio_of_differences() {
        assert_eq!(ratio_of_differences(3.0, 1.0, 5.0, 1.0), 0.5);
        let r = ratio_of_differences(f64::MAX, -f64::MAX, f64::MAX, -f64::MAX);
        assert_eq!(r, 1.0);
        let r = ratio_of_differences(0.0, -1e308, 1e308, -1e308);
        assert_eq!(r, 0.5);
    }

    // --- min / max ---

    #[test]
    fn test_min_max() {
        let v = ds(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
        assert_eq!(min(&v), 1.0);
        assert_eq!(max(&v), 9.0);
    }

    #[test]
    fn test_min_max_single() {
        let v = ds(&[-2.0]);
        assert_eq!(min(&v), -2.0);
        assert_eq!(max(&v), -2.0);
    }

    // --- median ---

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&ds(&[3.0, 1.0, 2.0])), 2.0);
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&ds(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])), 3.5);
    }

    #[test]
    fn test_median_single() {
        assert_eq!(median(&ds(&[7.0])), 7.0);
    }

    #[test]
    fn test_median_leaves_input_order() {
        let v = ds(&[9.0, 1.0, 5.0]);
        let _ = median(&v);
        assert_eq!(v.as_slice(), &[9.0, 1.0, 5.0]);
    }
}
