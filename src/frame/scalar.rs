//! Cell values and column types.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell value.
///
/// A column holds values of one [`DType`]; `Null` is allowed in any column
/// and marks a missing value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Null,
}

impl Scalar {
    /// Whether this value is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Numeric view of the value. `Null` maps to NaN so numeric columns with
    /// missing entries can still be extracted as a float matrix.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            Scalar::Null => Some(f64::NAN),
            Scalar::Bool(_) | Scalar::Str(_) => None,
        }
    }

    /// The dtype this value belongs to, if any (`Null` belongs to every dtype).
    pub fn dtype(&self) -> Option<DType> {
        match self {
            Scalar::Int(_) => Some(DType::Int),
            Scalar::Float(_) => Some(DType::Float),
            Scalar::Bool(_) => Some(DType::Bool),
            Scalar::Str(_) => Some(DType::Str),
            Scalar::Null => None,
        }
    }

    /// Whether this value may be stored in a column of the given dtype.
    pub fn fits(&self, dtype: DType) -> bool {
        match self.dtype() {
            None => true,
            Some(d) => d == dtype,
        }
    }

    /// The string form used when a category value becomes part of an
    /// indicator column name. Missing values render as `nan`.
    pub fn label_string(&self) -> String {
        match self {
            Scalar::Int(v) => v.to_string(),
            Scalar::Float(v) => v.to_string(),
            Scalar::Bool(v) => v.to_string(),
            Scalar::Str(v) => v.clone(),
            Scalar::Null => "nan".to_string(),
        }
    }

    /// Ordering used when sorting observed categories. Values of the same
    /// dtype compare naturally; `Null` sorts last.
    pub fn category_cmp(&self, other: &Scalar) -> Ordering {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => Ordering::Equal,
            (Scalar::Null, _) => Ordering::Greater,
            (_, Scalar::Null) => Ordering::Less,
            (Scalar::Int(a), Scalar::Int(b)) => a.cmp(b),
            (Scalar::Float(a), Scalar::Float(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (Scalar::Str(a), Scalar::Str(b)) => a.cmp(b),
            // Columns hold one dtype; mixed comparisons fall back to the
            // string form to stay total.
            _ => self.label_string().cmp(&other.label_string()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Str(v) => write!(f, "{}", v),
            Scalar::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

/// Declared value type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DType {
    Int,
    Float,
    Bool,
    Str,
}

impl DType {
    /// Whether columns of this dtype participate in numeric operations.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Int | DType::Float)
    }
}
