//! Z-score scaling with label/index bookkeeping.

use serde::{Deserialize, Serialize};

use crate::frame::{Series, Table};
use crate::numeric::StandardStats;
use crate::preprocessing::error::TransformError;
use crate::preprocessing::scaling::{check_width, numeric_input};
use crate::preprocessing::traits::Stage;

/// Learned state of a fitted [`StandardScaler`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerState {
    /// Column names seen at fit time.
    pub columns: Vec<String>,
    /// Per-column mean/std from the numeric collaborator.
    pub stats: StandardStats,
}

/// Standardize numeric columns to zero mean and unit variance, keeping
/// column names and the row index intact.
///
/// The math lives in [`StandardStats`]; this stage only feeds it the numeric
/// matrix and re-attaches labels to its bare-array output.
///
/// # Example
/// ```
/// use tableprep::frame::{Series, Table};
/// use tableprep::preprocessing::{Stage, StandardScaler};
///
/// let table = Table::from_columns(vec![Series::from_f64s("x", &[1.0, 3.0])])?;
/// let mut scaler = StandardScaler::new();
/// let out = scaler.fit_transform(&table, None)?;
/// assert_eq!(out.column_names(), vec!["x"]);
/// assert_eq!(out.index(), table.index());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct StandardScaler {
    with_mean: bool,
    with_std: bool,
    state: Option<StandardScalerState>,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            with_mean: true,
            with_std: true,
            state: None,
        }
    }

    /// Set whether to center by the mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.with_mean = with_mean;
        self
    }

    /// Set whether to scale to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.with_std = with_std;
        self
    }

    pub fn state(&self) -> Option<&StandardScalerState> {
        self.state.as_ref()
    }
}

impl Stage for StandardScaler {
    fn fit(&mut self, table: &Table, _target: Option<&Series>) -> Result<(), TransformError> {
        if table.n_rows() == 0 {
            return Err(TransformError::EmptyData(
                "cannot fit StandardScaler on a table with no rows".to_string(),
            ));
        }
        let (matrix, columns) = numeric_input(table)?;
        let stats = StandardStats::fit(&matrix, self.with_mean, self.with_std);
        self.state = Some(StandardScalerState { columns, stats });
        Ok(())
    }

    fn transform(&self, table: &Table) -> Result<Table, TransformError> {
        let state = self.state.as_ref().ok_or(TransformError::NotFitted {
            stage: "StandardScaler",
        })?;
        let (matrix, names) = numeric_input(table)?;
        check_width(state.columns.len(), names.len())?;
        let scaled = state.stats.apply(&matrix);
        Ok(Table::from_f64_matrix(&scaled, &names, table.index().clone())?)
    }

    fn name(&self) -> &'static str {
        "StandardScaler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Label, RowIndex, Scalar};

    fn sample() -> Table {
        Table::new(
            vec![
                Series::from_f64s("a", &[1.0, 3.0]),
                Series::from_f64s("b", &[10.0, 10.0]),
            ],
            RowIndex::new(vec![Label::Str("r1".into()), Label::Str("r2".into())]),
        )
        .unwrap()
    }

    #[test]
    fn test_not_fitted() {
        let scaler = StandardScaler::new();
        assert!(matches!(
            scaler.transform(&sample()),
            Err(TransformError::NotFitted { .. })
        ));
    }

    #[test]
    fn test_scales_and_keeps_labels() {
        let t = sample();
        let mut scaler = StandardScaler::new();
        let out = scaler.fit_transform(&t, None).unwrap();

        assert_eq!(out.column_names(), vec!["a", "b"]);
        assert_eq!(out.index(), t.index());
        assert_eq!(
            out.column("a").unwrap().values(),
            &[Scalar::Float(-1.0), Scalar::Float(1.0)]
        );
        // constant column: centered, unit scale
        assert_eq!(
            out.column("b").unwrap().values(),
            &[Scalar::Float(0.0), Scalar::Float(0.0)]
        );
    }

    #[test]
    fn test_rejects_non_numeric() {
        let t = Table::from_columns(vec![Series::from_strs("c", &["x"])]).unwrap();
        let mut scaler = StandardScaler::new();
        assert!(matches!(
            scaler.fit(&t, None),
            Err(TransformError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_width_mismatch() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&sample(), None).unwrap();
        let narrow = Table::from_columns(vec![Series::from_f64s("a", &[1.0])]).unwrap();
        assert!(matches!(
            scaler.transform(&narrow),
            Err(TransformError::ShapeMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_empty_fit_fails() {
        let empty = Table::from_columns(vec![Series::from_f64s("a", &[])]).unwrap();
        let mut scaler = StandardScaler::new();
        assert!(matches!(
            scaler.fit(&empty, None),
            Err(TransformError::EmptyData(_))
        ));
    }

    #[test]
    fn test_disabled_centering() {
        let t = sample();
        let mut scaler = StandardScaler::new().with_mean(false).with_std(false);
        let out = scaler.fit_transform(&t, None).unwrap();
        assert_eq!(out, t);
    }
}
