//! Numeric scaling stages.
//!
//! Each scaler wraps an engine from [`crate::numeric`] and adds the table
//! bookkeeping the engines do not know about: extracting a float matrix from
//! the (all-numeric) input, validating the transform-time width against the
//! fit-time width, and rebuilding a table with the input's column names and
//! row index around the bare array the engine returns.

mod minmax;
mod quantile;
mod standard;

pub use minmax::{MinMaxScaler, MinMaxScalerState};
pub use quantile::{QuantileTransformer, QuantileTransformerState};
pub use standard::{StandardScaler, StandardScalerState};

use ndarray::Array2;

use crate::frame::Table;
use crate::preprocessing::error::TransformError;

/// Extract the numeric matrix and column names of an all-numeric table.
pub(crate) fn numeric_input(table: &Table) -> Result<(Array2<f64>, Vec<String>), TransformError> {
    if let Some(bad) = table.columns().iter().find(|c| !c.is_numeric()) {
        return Err(TransformError::TypeMismatch {
            column: bad.name().to_string(),
        });
    }
    let matrix = table.to_f64_matrix()?;
    let names = table.column_names().iter().map(|s| s.to_string()).collect();
    Ok((matrix, names))
}

/// Validate the transform-time width against the fit-time width.
pub(crate) fn check_width(expected: usize, got: usize) -> Result<(), TransformError> {
    if expected != got {
        return Err(TransformError::ShapeMismatch { expected, got });
    }
    Ok(())
}
