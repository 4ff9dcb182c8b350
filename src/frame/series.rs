//! A named, typed column.

use serde::{Deserialize, Serialize};

use crate::frame::error::FrameError;
use crate::frame::scalar::{DType, Scalar};

/// A named column: declared dtype plus a same-length run of values.
/// Every value is either `Null` or of the declared dtype; this is enforced
/// at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    dtype: DType,
    values: Vec<Scalar>,
}

impl Series {
    /// Build a column, validating every value against the dtype.
    ///
    /// # Errors
    /// Returns [`FrameError::TypeMismatch`] if any non-null value has a
    /// different dtype.
    pub fn new(
        name: impl Into<String>,
        dtype: DType,
        values: Vec<Scalar>,
    ) -> Result<Self, FrameError> {
        let name = name.into();
        if values.iter().any(|v| !v.fits(dtype)) {
            return Err(FrameError::TypeMismatch { column: name, dtype });
        }
        Ok(Self { name, dtype, values })
    }

    /// Float column from raw values. NaN becomes `Null`.
    pub fn from_f64s(name: impl Into<String>, values: &[f64]) -> Self {
        Self {
            name: name.into(),
            dtype: DType::Float,
            values: values
                .iter()
                .map(|&v| if v.is_nan() { Scalar::Null } else { Scalar::Float(v) })
                .collect(),
        }
    }

    /// Integer column from raw values.
    pub fn from_i64s(name: impl Into<String>, values: &[i64]) -> Self {
        Self {
            name: name.into(),
            dtype: DType::Int,
            values: values.iter().map(|&v| Scalar::Int(v)).collect(),
        }
    }

    /// String column from raw values.
    pub fn from_strs(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            dtype: DType::Str,
            values: values.iter().map(|&v| Scalar::Str(v.to_string())).collect(),
        }
    }

    /// Boolean column from raw values.
    pub fn from_bools(name: impl Into<String>, values: &[bool]) -> Self {
        Self {
            name: name.into(),
            dtype: DType::Bool,
            values: values.iter().map(|&v| Scalar::Bool(v)).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Scalar> {
        self.values.get(position)
    }

    pub fn is_numeric(&self) -> bool {
        self.dtype.is_numeric()
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Same values under a new name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Numeric view of the column; `Null` becomes NaN.
    ///
    /// # Errors
    /// Returns [`FrameError::TypeMismatch`] for non-numeric columns.
    pub fn to_f64s(&self) -> Result<Vec<f64>, FrameError> {
        if !self.is_numeric() {
            return Err(FrameError::TypeMismatch {
                column: self.name.clone(),
                dtype: self.dtype,
            });
        }
        Ok(self
            .values
            .iter()
            .map(|v| v.as_f64().unwrap_or(f64::NAN))
            .collect())
    }

    /// A new column restricted to the given positions, in the given order.
    /// Positions must already be bounds-checked by the caller.
    pub fn take(&self, positions: &[usize]) -> Series {
        Series {
            name: self.name.clone(),
            dtype: self.dtype,
            values: positions.iter().map(|&p| self.values[p].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_dtype() {
        let ok = Series::new(
            "a",
            DType::Int,
            vec![Scalar::Int(1), Scalar::Null, Scalar::Int(3)],
        );
        assert!(ok.is_ok());

        let bad = Series::new("a", DType::Int, vec![Scalar::Int(1), Scalar::Str("x".into())]);
        assert!(matches!(bad, Err(FrameError::TypeMismatch { .. })));
    }

    #[test]
    fn test_from_f64s_maps_nan_to_null() {
        let s = Series::from_f64s("x", &[1.0, f64::NAN, 3.0]);
        assert_eq!(s.null_count(), 1);
        assert_eq!(s.get(0), Some(&Scalar::Float(1.0)));
    }

    #[test]
    fn test_to_f64s_non_numeric_fails() {
        let s = Series::from_strs("color", &["red", "blue"]);
        assert!(matches!(s.to_f64s(), Err(FrameError::TypeMismatch { .. })));
    }

    #[test]
    fn test_to_f64s_null_is_nan() {
        let s = Series::new("x", DType::Float, vec![Scalar::Float(1.5), Scalar::Null]).unwrap();
        let vals = s.to_f64s().unwrap();
        assert_eq!(vals[0], 1.5);
        assert!(vals[1].is_nan());
    }

    #[test]
    fn test_take() {
        let s = Series::from_i64s("n", &[10, 20, 30]);
        let t = s.take(&[2, 0]);
        assert_eq!(t.values(), &[Scalar::Int(30), Scalar::Int(10)]);
        assert_eq!(t.name(), "n");
    }
}
