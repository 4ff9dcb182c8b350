//! Principal component analysis with label/index bookkeeping.

use serde::{Deserialize, Serialize};

use crate::frame::{Label, RowIndex, Series, Table};
use crate::numeric::PrincipalComponents;
use crate::preprocessing::error::TransformError;
use crate::preprocessing::scaling::{check_width, numeric_input};
use crate::preprocessing::traits::Stage;

/// Learned state of a fitted [`Pca`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PcaState {
    /// Input column names seen at fit time.
    pub columns: Vec<String>,
    /// Fitted component basis from the decomposition collaborator.
    pub engine: PrincipalComponents,
}

/// Project numeric columns onto their principal components.
///
/// The decomposition itself is the [`PrincipalComponents`] engine's job;
/// this stage extracts the numeric matrix, names the projected columns
/// `pca_0..pca_{k-1}` and re-attaches the input row index to the bare array
/// the engine returns.
///
/// # Example
/// ```
/// use tableprep::frame::{Series, Table};
/// use tableprep::preprocessing::{Pca, Stage};
///
/// let table = Table::from_columns(vec![
///     Series::from_f64s("a", &[1.0, 2.0, 3.0]),
///     Series::from_f64s("b", &[1.0, 2.1, 2.9]),
/// ])?;
/// let mut pca = Pca::new().with_n_components(1);
/// let out = pca.fit_transform(&table, None)?;
/// assert_eq!(out.column_names(), vec!["pca_0"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pca {
    n_components: Option<usize>,
    state: Option<PcaState>,
}

impl Pca {
    /// PCA retaining every component the data supports.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain at most this many components.
    pub fn with_n_components(mut self, n_components: usize) -> Self {
        self.n_components = Some(n_components);
        self
    }

    pub fn state(&self) -> Option<&PcaState> {
        self.state.as_ref()
    }

    /// Component loadings as a table: one row per component (`pca_i`), one
    /// column per original feature. `None` before fit.
    pub fn components(&self) -> Option<Table> {
        let state = self.state.as_ref()?;
        let k = state.engine.n_components();
        let index = RowIndex::new(
            (0..k)
                .map(|i| Label::Str(format!("pca_{}", i)))
                .collect(),
        );
        let columns = state
            .columns
            .iter()
            .enumerate()
            .map(|(j, name)| {
                let loadings: Vec<f64> = state
                    .engine
                    .components
                    .iter()
                    .map(|component| component[j])
                    .collect();
                Series::from_f64s(name.clone(), &loadings)
            })
            .collect();
        Table::new(columns, index).ok()
    }
}

impl Stage for Pca {
    fn fit(&mut self, table: &Table, _target: Option<&Series>) -> Result<(), TransformError> {
        if table.n_rows() == 0 {
            return Err(TransformError::EmptyData(
                "cannot fit PCA on a table with no rows".to_string(),
            ));
        }
        let (matrix, columns) = numeric_input(table)?;
        let requested = self.n_components.unwrap_or(matrix.ncols());
        let engine = PrincipalComponents::fit(&matrix, requested);
        self.state = Some(PcaState { columns, engine });
        Ok(())
    }

    fn transform(&self, table: &Table) -> Result<Table, TransformError> {
        let state = self
            .state
            .as_ref()
            .ok_or(TransformError::NotFitted { stage: "Pca" })?;
        let (matrix, _) = numeric_input(table)?;
        check_width(state.columns.len(), matrix.ncols())?;

        let projected = state.engine.project(&matrix);
        let names: Vec<String> = (0..projected.ncols())
            .map(|i| format!("pca_{}", i))
            .collect();
        Ok(Table::from_f64_matrix(
            &projected,
            &names,
            table.index().clone(),
        )?)
    }

    fn name(&self) -> &'static str {
        "Pca"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Scalar;

    fn sample() -> Table {
        Table::new(
            vec![
                Series::from_f64s("a", &[1.0, 2.0, 3.0, 4.0]),
                Series::from_f64s("b", &[1.0, 2.0, 3.0, 4.0]),
            ],
            RowIndex::new(vec!["w".into(), "x".into(), "y".into(), "z".into()]),
        )
        .unwrap()
    }

    #[test]
    fn test_not_fitted() {
        assert!(matches!(
            Pca::new().transform(&sample()),
            Err(TransformError::NotFitted { .. })
        ));
    }

    #[test]
    fn test_component_names_and_index() {
        let t = sample();
        let mut pca = Pca::new().with_n_components(2);
        let out = pca.fit_transform(&t, None).unwrap();
        assert_eq!(out.column_names(), vec!["pca_0", "pca_1"]);
        assert_eq!(out.index(), t.index());
    }

    #[test]
    fn test_single_component_captures_diagonal() {
        let t = sample();
        let mut pca = Pca::new().with_n_components(1);
        let out = pca.fit_transform(&t, None).unwrap();
        assert_eq!(out.n_columns(), 1);

        // perfectly correlated columns: one component explains everything
        let state = pca.state().unwrap();
        assert!(state.engine.explained_variance[0] > 0.0);
    }

    #[test]
    fn test_components_table() {
        let t = sample();
        let mut pca = Pca::new().with_n_components(1);
        pca.fit(&t, None).unwrap();

        let components = pca.components().unwrap();
        assert_eq!(components.column_names(), vec!["a", "b"]);
        assert_eq!(
            components.index().labels(),
            &[Label::Str("pca_0".into())]
        );
        // loading magnitudes for two identical features match
        let la = components.column("a").unwrap().to_f64s().unwrap()[0];
        let lb = components.column("b").unwrap().to_f64s().unwrap()[0];
        assert!((la - lb).abs() < 1e-9);
    }

    #[test]
    fn test_width_mismatch() {
        let mut pca = Pca::new();
        pca.fit(&sample(), None).unwrap();
        let narrow = Table::from_columns(vec![Series::from_f64s("a", &[1.0])]).unwrap();
        assert!(matches!(
            pca.transform(&narrow),
            Err(TransformError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_non_numeric() {
        let t = Table::from_columns(vec![Series::from_strs("c", &["x", "y"])]).unwrap();
        assert!(matches!(
            Pca::new().fit(&t, None),
            Err(TransformError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_projection_is_finite() {
        let t = sample();
        let mut pca = Pca::new();
        let out = pca.fit_transform(&t, None).unwrap();
        for col in out.columns() {
            for v in col.values() {
                if let Scalar::Float(x) = v {
                    assert!(x.is_finite());
                }
            }
        }
    }
}
