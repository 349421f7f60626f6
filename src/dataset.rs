//! Validated numeric input.
//!
//! A [`Dataset`] is a non-empty sequence of finite `f64` values. Every
//! routine in this crate validates its input into a `Dataset` before doing
//! any arithmetic, so the primitives in [`crate::stats`] never see empty
//! data, NaN, or infinities.
//!
//! Integral input is widened with [`Dataset::from_numbers`]; untyped input
//! (e.g. a JSON request body) goes through [`Dataset::from_json`], which is
//! where "not a sequence" and "non-numeric element" errors originate.
//! Paired regression input uses [`Dataset::pair_from_json`].

use std::ops::Deref;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, StatsError};

/// A non-empty, all-finite sequence of samples in caller order.
///
/// # Examples
/// ```
/// use u_insight::Dataset;
/// let ds = Dataset::from_numbers(&[3_i32, 1, 2]).unwrap();
/// assert_eq!(ds.as_slice(), &[3.0, 1.0, 2.0]);
/// assert_eq!(ds.sorted(), vec![1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset(Vec<f64>);

impl Dataset {
    /// Validates `values` and takes ownership of them.
    ///
    /// # Errors
    /// - [`StatsError::Empty`] if `values` is empty.
    /// - [`StatsError::NonNumeric`] for the first NaN or infinite element.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(StatsError::Empty);
        }
        if let Some((index, x)) = values.iter().enumerate().find(|(_, x)| !x.is_finite()) {
            return Err(StatsError::NonNumeric {
                index,
                found: x.to_string(),
            });
        }
        Ok(Self(values))
    }

    /// Widens any losslessly-convertible numeric slice (`i32`, `u32`,
    /// `f32`, ...) into a dataset.
    pub fn from_numbers<T>(values: &[T]) -> Result<Self>
    where
        T: Copy + Into<f64>,
    {
        Self::new(values.iter().map(|&v| v.into()).collect())
    }

    /// Builds a dataset from an untyped JSON value.
    ///
    /// Integers and floats are both accepted. Booleans, strings, nulls and
    /// nested containers are rejected as non-numeric.
    ///
    /// # Errors
    /// - [`StatsError::NotASequence`] if `value` is not an array.
    /// - [`StatsError::Empty`] if the array is empty.
    /// - [`StatsError::NonNumeric`] for the first non-number element.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use u_insight::{Dataset, ErrorKind};
    ///
    /// let ds = Dataset::from_json(&json!([1, 2.5, -3])).unwrap();
    /// assert_eq!(ds.len(), 3);
    ///
    /// let err = Dataset::from_json(&json!("not a list")).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Type);
    /// ```
    pub fn from_json(value: &Value) -> Result<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(StatsError::NotASequence {
                    found: json_type_name(other),
                })
            }
        };
        if items.is_empty() {
            return Err(StatsError::Empty);
        }
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_f64() {
                Some(x) => values.push(x),
                None => {
                    return Err(StatsError::NonNumeric {
                        index,
                        found: item.to_string(),
                    })
                }
            }
        }
        Self::new(values)
    }

    /// Builds the `x` and `y` datasets of a paired input from untyped JSON.
    ///
    /// Both values must be arrays before either one's elements are looked
    /// at; each array is then validated like [`Dataset::from_json`], `x`
    /// first. Lengths are not compared here.
    ///
    /// # Errors
    /// - [`StatsError::PairNotSequences`] if `x` or `y` is not an array.
    /// - Any error of [`Dataset::from_json`] for either array.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use u_insight::{regress, Dataset};
    ///
    /// let (x, y) = Dataset::pair_from_json(&json!([1, 2, 3]), &json!([2, 4, 6])).unwrap();
    /// assert_eq!(regress(&x, &y).unwrap().slope, 2.0);
    ///
    /// let err = Dataset::pair_from_json(&json!([1, 2]), &json!("nope")).unwrap_err();
    /// assert!(err.is_type_error());
    /// ```
    pub fn pair_from_json(x: &Value, y: &Value) -> Result<(Self, Self)> {
        if let Some(other) = [x, y].into_iter().find(|v| !v.is_array()) {
            return Err(StatsError::PairNotSequences {
                found: json_type_name(other),
            });
        }
        Ok((Self::from_json(x)?, Self::from_json(y)?))
    }

    /// Borrows the samples in caller order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consumes the dataset, returning the samples.
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    /// Returns an ascending copy; `self` is left untouched.
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.0.clone();
        sorted.sort_unstable_by(f64::total_cmp);
        sorted
    }
}

impl Deref for Dataset {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for Dataset {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for Dataset {
    type Error = StatsError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl TryFrom<&[f64]> for Dataset {
    type Error = StatsError;

    fn try_from(values: &[f64]) -> Result<Self> {
        Self::new(values.to_vec())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_new_valid() {
        let ds = Dataset::new(vec![1.0, -2.5, 3.0]).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.as_slice(), &[1.0, -2.5, 3.0]);
    }

    #[test]
    fn test_new_empty() {
        assert_eq!(Dataset::new(vec![]), Err(StatsError::Empty));
    }

    #[test]
    fn test_new_nan_is_type_error() {
        let err = Dataset::new(vec![1.0, f64::NAN, 3.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(matches!(err, StatsError::NonNumeric { index: 1, .. }));
    }

    #[test]
    fn test_new_infinity_is_type_error() {
        let err = Dataset::new(vec![f64::NEG_INFINITY]).unwrap_err();
        assert!(err.is_type_error());
    }

    #[test]
    fn test_from_numbers_integers() {
        let ds = Dataset::from_numbers(&[1_i32, 2, 3]).unwrap();
        assert_eq!(ds.as_slice(), &[1.0, 2.0, 3.0]);
        let ds = Dataset::from_numbers(&[0.5_f32, 1.5]).unwrap();
        assert_eq!(ds.as_slice(), &[0.5, 1.5]);
        assert_eq!(Dataset::from_numbers::<u8>(&[]), Err(StatsError::Empty));
    }

    #[test]
    fn test_from_json_mixed_numbers() {
        let ds = Dataset::from_json(&json!([1, 2.5, -3, 1e3])).unwrap();
        assert_eq!(ds.as_slice(), &[1.0, 2.5, -3.0, 1000.0]);
    }

    #[test]
    fn test_from_json_not_a_list() {
        let err = Dataset::from_json(&json!("not a list")).unwrap_err();
        assert_eq!(err, StatsError::NotASequence { found: "string" });
        assert!(err.to_string().contains("Data must be a list"));

        let err = Dataset::from_json(&json!({"a": 1})).unwrap_err();
        assert!(err.is_type_error());
    }

    #[test]
    fn test_from_json_non_numeric_element() {
        let err = Dataset::from_json(&json!([1, 2, "three", 4])).unwrap_err();
        assert!(err.is_type_error());
        assert!(err.to_string().contains("All data values must be numeric"));
        assert!(matches!(err, StatsError::NonNumeric { index: 2, .. }));

        let err = Dataset::from_json(&json!([1, true])).unwrap_err();
        assert!(err.is_type_error());
        let err = Dataset::from_json(&json!([null])).unwrap_err();
        assert!(err.is_type_error());
    }

    #[test]
    fn test_from_json_empty() {
        let err = Dataset::from_json(&json!([])).unwrap_err();
        assert_eq!(err, StatsError::Empty);
        assert!(err.is_value_error());
    }

    #[test]
    fn test_pair_from_json() {
        let (x, y) = Dataset::pair_from_json(&json!([1, 2, 3]), &json!([1.5, 2.5])).unwrap();
        assert_eq!(x.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(y.as_slice(), &[1.5, 2.5]);
    }

    #[test]
    fn test_pair_from_json_not_lists() {
        let err = Dataset::pair_from_json(&json!("1,2,3"), &json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, StatsError::PairNotSequences { found: "string" });
        assert!(err.to_string().contains("x_data and y_data must be lists"));
        assert_eq!(err.kind(), ErrorKind::Type);

        let err = Dataset::pair_from_json(&json!([1, 2, 3]), &json!(null)).unwrap_err();
        assert_eq!(err, StatsError::PairNotSequences { found: "null" });

        // The container check precedes element checks on either side.
        let err = Dataset::pair_from_json(&json!([1, "a"]), &json!(7)).unwrap_err();
        assert_eq!(err, StatsError::PairNotSequences { found: "number" });
    }

    #[test]
    fn test_pair_from_json_element_errors() {
        let err = Dataset::pair_from_json(&json!([1, 2]), &json!([1, "b"])).unwrap_err();
        assert!(matches!(err, StatsError::NonNumeric { index: 1, .. }));
        let err = Dataset::pair_from_json(&json!([]), &json!([1])).unwrap_err();
        assert_eq!(err, StatsError::Empty);
    }

    #[test]
    fn test_sorted_does_not_mutate() {
        let ds = Dataset::new(vec![3.0, 1.0, 2.0]).unwrap();
        assert_eq!(ds.sorted(), vec![1.0, 2.0, 3.0]);
        assert_eq!(ds.as_slice(), &[3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_serialize_transparent() {
        let ds = Dataset::new(vec![1.0, 2.0]).unwrap();
        assert_eq!(serde_json::to_string(&ds).unwrap(), "[1.0,2.0]");
    }
}
