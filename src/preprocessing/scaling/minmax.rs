//! Range scaling with label/index bookkeeping.

use serde::{Deserialize, Serialize};

use crate::frame::{Series, Table};
use crate::numeric::RangeStats;
use crate::preprocessing::error::TransformError;
use crate::preprocessing::scaling::{check_width, numeric_input};
use crate::preprocessing::traits::Stage;

/// Learned state of a fitted [`MinMaxScaler`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScalerState {
    /// Column names seen at fit time.
    pub columns: Vec<String>,
    /// Per-column min/scale from the numeric collaborator.
    pub stats: RangeStats,
}

/// Scale numeric columns into a target range (default `[0, 1]`), keeping
/// column names and the row index intact.
#[derive(Clone, Debug)]
pub struct MinMaxScaler {
    range: (f64, f64),
    state: Option<MinMaxScalerState>,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self {
            range: (0.0, 1.0),
            state: None,
        }
    }

    /// Set the target range.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidConfig`] unless `min < max`.
    pub fn with_range(mut self, min: f64, max: f64) -> Result<Self, TransformError> {
        if !(min < max) {
            return Err(TransformError::InvalidConfig(format!(
                "target range requires min < max, got [{}, {}]",
                min, max
            )));
        }
        self.range = (min, max);
        Ok(self)
    }

    pub fn state(&self) -> Option<&MinMaxScalerState> {
        self.state.as_ref()
    }
}

impl Stage for MinMaxScaler {
    fn fit(&mut self, table: &Table, _target: Option<&Series>) -> Result<(), TransformError> {
        if table.n_rows() == 0 {
            return Err(TransformError::EmptyData(
                "cannot fit MinMaxScaler on a table with no rows".to_string(),
            ));
        }
        let (matrix, columns) = numeric_input(table)?;
        let stats = RangeStats::fit(&matrix, self.range.0, self.range.1);
        self.state = Some(MinMaxScalerState { columns, stats });
        Ok(())
    }

    fn transform(&self, table: &Table) -> Result<Table, TransformError> {
        let state = self.state.as_ref().ok_or(TransformError::NotFitted {
            stage: "MinMaxScaler",
        })?;
        let (matrix, names) = numeric_input(table)?;
        check_width(state.columns.len(), names.len())?;
        let scaled = state.stats.apply(&matrix);
        Ok(Table::from_f64_matrix(&scaled, &names, table.index().clone())?)
    }

    fn name(&self) -> &'static str {
        "MinMaxScaler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Scalar;

    #[test]
    fn test_scales_to_unit_interval() {
        let t = Table::from_columns(vec![Series::from_f64s("x", &[2.0, 4.0, 6.0])]).unwrap();
        let mut scaler = MinMaxScaler::new();
        let out = scaler.fit_transform(&t, None).unwrap();
        assert_eq!(
            out.column("x").unwrap().values(),
            &[Scalar::Float(0.0), Scalar::Float(0.5), Scalar::Float(1.0)]
        );
    }

    #[test]
    fn test_custom_range() {
        let t = Table::from_columns(vec![Series::from_f64s("x", &[0.0, 1.0])]).unwrap();
        let mut scaler = MinMaxScaler::new().with_range(-1.0, 1.0).unwrap();
        let out = scaler.fit_transform(&t, None).unwrap();
        assert_eq!(
            out.column("x").unwrap().values(),
            &[Scalar::Float(-1.0), Scalar::Float(1.0)]
        );
    }

    #[test]
    fn test_invalid_range_rejected() {
        assert!(matches!(
            MinMaxScaler::new().with_range(1.0, 1.0),
            Err(TransformError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_not_fitted() {
        let t = Table::from_columns(vec![Series::from_f64s("x", &[1.0])]).unwrap();
        assert!(matches!(
            MinMaxScaler::new().transform(&t),
            Err(TransformError::NotFitted { .. })
        ));
    }

    #[test]
    fn test_transform_uses_fit_time_bounds() {
        let train = Table::from_columns(vec![Series::from_f64s("x", &[0.0, 10.0])]).unwrap();
        let batch = Table::from_columns(vec![Series::from_f64s("x", &[20.0])]).unwrap();
        let mut scaler = MinMaxScaler::new();
        scaler.fit(&train, None).unwrap();
        let out = scaler.transform(&batch).unwrap();
        // out-of-range values extrapolate rather than clip
        assert_eq!(out.column("x").unwrap().values(), &[Scalar::Float(2.0)]);
    }
}
