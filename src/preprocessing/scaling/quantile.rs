//! Empirical-quantile scaling with label/index bookkeeping.

use serde::{Deserialize, Serialize};

use crate::frame::{Series, Table};
use crate::numeric::QuantileMap;
use crate::preprocessing::error::TransformError;
use crate::preprocessing::scaling::{check_width, numeric_input};
use crate::preprocessing::traits::Stage;

/// Learned state of a fitted [`QuantileTransformer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantileTransformerState {
    /// Column names seen at fit time.
    pub columns: Vec<String>,
    /// Per-column landmark grid from the numeric collaborator.
    pub map: QuantileMap,
}

/// Map numeric columns through their empirical CDF onto `[0, 1]`, keeping
/// column names and the row index intact. Values outside the fit-time range
/// clip to the interval ends.
#[derive(Clone, Debug)]
pub struct QuantileTransformer {
    n_quantiles: usize,
    state: Option<QuantileTransformerState>,
}

impl Default for QuantileTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantileTransformer {
    pub fn new() -> Self {
        Self {
            n_quantiles: 100,
            state: None,
        }
    }

    /// Set the number of landmark quantiles (at least two are kept).
    pub fn with_n_quantiles(mut self, n_quantiles: usize) -> Self {
        self.n_quantiles = n_quantiles;
        self
    }

    pub fn state(&self) -> Option<&QuantileTransformerState> {
        self.state.as_ref()
    }
}

impl Stage for QuantileTransformer {
    fn fit(&mut self, table: &Table, _target: Option<&Series>) -> Result<(), TransformError> {
        if table.n_rows() == 0 {
            return Err(TransformError::EmptyData(
                "cannot fit QuantileTransformer on a table with no rows".to_string(),
            ));
        }
        let (matrix, columns) = numeric_input(table)?;
        let map = QuantileMap::fit(&matrix, self.n_quantiles);
        self.state = Some(QuantileTransformerState { columns, map });
        Ok(())
    }

    fn transform(&self, table: &Table) -> Result<Table, TransformError> {
        let state = self.state.as_ref().ok_or(TransformError::NotFitted {
            stage: "QuantileTransformer",
        })?;
        let (matrix, names) = numeric_input(table)?;
        check_width(state.columns.len(), names.len())?;
        let mapped = state.map.apply(&matrix);
        Ok(Table::from_f64_matrix(&mapped, &names, table.index().clone())?)
    }

    fn name(&self) -> &'static str {
        "QuantileTransformer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Scalar;

    #[test]
    fn test_uniform_output() {
        let t = Table::from_columns(vec![Series::from_f64s("x", &[1.0, 2.0, 3.0, 4.0, 5.0])])
            .unwrap();
        let mut stage = QuantileTransformer::new().with_n_quantiles(5);
        let out = stage.fit_transform(&t, None).unwrap();
        let vals = out.column("x").unwrap().to_f64s().unwrap();
        assert_eq!(vals, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_out_of_range_clips() {
        let train = Table::from_columns(vec![Series::from_f64s("x", &[1.0, 2.0, 3.0])]).unwrap();
        let batch = Table::from_columns(vec![Series::from_f64s("x", &[-10.0, 10.0])]).unwrap();
        let mut stage = QuantileTransformer::new();
        stage.fit(&train, None).unwrap();
        let out = stage.transform(&batch).unwrap();
        assert_eq!(
            out.column("x").unwrap().values(),
            &[Scalar::Float(0.0), Scalar::Float(1.0)]
        );
    }

    #[test]
    fn test_not_fitted() {
        let t = Table::from_columns(vec![Series::from_f64s("x", &[1.0])]).unwrap();
        assert!(matches!(
            QuantileTransformer::new().transform(&t),
            Err(TransformError::NotFitted { .. })
        ));
    }

    #[test]
    fn test_keeps_names_and_index() {
        let t = Table::from_columns(vec![
            Series::from_f64s("a", &[1.0, 2.0]),
            Series::from_f64s("b", &[5.0, 6.0]),
        ])
        .unwrap();
        let mut stage = QuantileTransformer::new();
        let out = stage.fit_transform(&t, None).unwrap();
        assert_eq!(out.column_names(), vec!["a", "b"]);
        assert_eq!(out.index(), t.index());
    }
}
