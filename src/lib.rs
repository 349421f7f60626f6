//! # u-insight
//!
//! Closed-form descriptive statistics for the U-Engine ecosystem.
//!
//! This crate summarizes, fits, rescales and screens one-dimensional
//! numeric data held fully in memory. It knows nothing about where the data
//! came from; every routine is a pure function of its arguments.
//!
//! ## Modules
//!
//! - [`stats`] — Shared primitives (compensated mean, population variance,
//!   median)
//! - [`descriptive`] — [`analyze`]: mean, median, mode, σ, count, min, max
//! - [`regression`] — [`regress`]: simple least-squares line with R²
//! - [`normalize`](mod@normalize) — [`normalize()`]: z-score and min-max
//!   rescaling
//! - [`outliers`] — [`detect_outliers`]: IQR fences and z-score screening
//! - [`dataset`] — [`Dataset`]: validated input, including untyped JSON
//!
//! ## Design Philosophy
//!
//! - **Validate first**: input is checked before any arithmetic; errors are
//!   classified as type or value errors ([`ErrorKind`])
//! - **Inputs are never mutated**: sorting always happens on a copy
//! - **Conventions are explicit**: constant `y` gives `R² = 0`, and
//!   constant data has no z-score outliers
//!
//! ## Example
//!
//! ```
//! use u_insight::{analyze, detect_outliers, OutlierMethod};
//!
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 100.0];
//! let summary = analyze(&data).unwrap();
//! assert_eq!(summary.median, 6.0);
//! assert_eq!(detect_outliers(&data, OutlierMethod::Iqr).unwrap(), vec![100.0]);
//! ```

pub mod dataset;
pub mod descriptive;
pub mod error;
pub mod normalize;
pub mod outliers;
pub mod regression;
pub mod stats;

pub use dataset::Dataset;
pub use descriptive::{analyze, Mode, StatisticsResult};
pub use error::{ErrorKind, Result, StatsError};
pub use normalize::{normalize, NormalizationMethod};
pub use outliers::{detect_outliers, detect_outliers_with, OutlierMethod, OutlierOptions};
pub use regression::{regress, RegressionResult};
