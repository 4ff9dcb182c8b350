//! Error types for transformation stages.

use std::fmt;

use crate::frame::FrameError;

/// Error type for stage construction, fitting and transformation.
///
/// Every failure surfaces immediately to the caller; stages never retry and
/// never partially recover. The one designed silence is the encoder's
/// drop-unseen-category policy, which is schema enforcement, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// `transform` was called before `fit` on a stateful stage.
    NotFitted { stage: &'static str },
    /// A selector specification could not be interpreted (unknown type tag,
    /// malformed predicate return).
    InvalidSpec(String),
    /// An explicitly requested label is absent from the table axis.
    LabelNotFound { axis: &'static str, label: String },
    /// Construction-time invalid configuration (e.g. an unrecognized named
    /// table operation).
    InvalidConfig(String),
    /// A non-numeric column reached a numeric-only stage.
    TypeMismatch { column: String },
    /// Transform-time column count differs from what was seen during fit.
    ShapeMismatch { expected: usize, got: usize },
    /// Fit was attempted on a table with no rows.
    EmptyData(String),
    /// A table operation failed.
    Frame(FrameError),
    /// Learned state could not be (de)serialized.
    Serialization(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::NotFitted { stage } => {
                write!(f, "{} must be fit before transform", stage)
            }
            TransformError::InvalidSpec(msg) => {
                write!(f, "Invalid selector spec: {}", msg)
            }
            TransformError::LabelNotFound { axis, label } => {
                write!(f, "{} label not found: {:?}", axis, label)
            }
            TransformError::InvalidConfig(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            TransformError::TypeMismatch { column } => {
                write!(f, "Column {:?} is not numeric", column)
            }
            TransformError::ShapeMismatch { expected, got } => {
                write!(f, "Shape mismatch: expected {} columns, got {}", expected, got)
            }
            TransformError::EmptyData(msg) => {
                write!(f, "Empty data: {}", msg)
            }
            TransformError::Frame(err) => {
                write!(f, "Table error: {}", err)
            }
            TransformError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransformError::Frame(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FrameError> for TransformError {
    fn from(err: FrameError) -> Self {
        TransformError::Frame(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_not_fitted() {
        let err = TransformError::NotFitted { stage: "GetDummies" };
        assert!(err.to_string().contains("GetDummies"));
        assert!(err.to_string().contains("fit"));
    }

    #[test]
    fn test_display_label_not_found() {
        let err = TransformError::LabelNotFound {
            axis: "column",
            label: "age".to_string(),
        };
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_from_frame_error_keeps_source() {
        let err: TransformError = FrameError::ColumnNotFound("x".to_string()).into();
        assert!(matches!(err, TransformError::Frame(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display_shape_mismatch() {
        let err = TransformError::ShapeMismatch { expected: 4, got: 3 };
        assert!(err.to_string().contains('4'));
        assert!(err.to_string().contains('3'));
    }
}
