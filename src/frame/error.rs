//! Error types for table operations.

use std::fmt;

use crate::frame::scalar::DType;

/// Error type for table construction and access.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    /// A column's length does not match the table's row index.
    LengthMismatch { expected: usize, got: usize },
    /// A column name was requested that the table does not contain.
    ColumnNotFound(String),
    /// A row label was requested that the index does not contain.
    RowLabelNotFound(String),
    /// A value or operation conflicts with a column's declared dtype.
    TypeMismatch { column: String, dtype: DType },
    /// A row position is outside the table.
    PositionOutOfBounds { position: usize, len: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::LengthMismatch { expected, got } => {
                write!(f, "Length mismatch: index has {} rows, column has {}", expected, got)
            }
            FrameError::ColumnNotFound(name) => {
                write!(f, "Column not found: {:?}", name)
            }
            FrameError::RowLabelNotFound(label) => {
                write!(f, "Row label not found: {}", label)
            }
            FrameError::TypeMismatch { column, dtype } => {
                write!(f, "Type mismatch in column {:?} of dtype {:?}", column, dtype)
            }
            FrameError::PositionOutOfBounds { position, len } => {
                write!(f, "Row position {} out of bounds for table of {} rows", position, len)
            }
        }
    }
}

impl std::error::Error for FrameError {}
