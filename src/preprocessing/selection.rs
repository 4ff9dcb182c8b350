//! Column and row selection stages.
//!
//! Thin stages binding the spec resolver to one axis. Both are stateless:
//! `fit` is a no-op and `transform` has no side effects, so a selector can
//! be shared across threads and re-applied freely.

use crate::frame::{Series, Table};
use crate::preprocessing::error::TransformError;
use crate::preprocessing::selector::{ColumnSpec, RowSpec};
use crate::preprocessing::traits::Stage;

/// Keep a subset of columns, chosen by a [`ColumnSpec`].
///
/// The row index and the order of kept columns are preserved as resolved.
///
/// # Example
/// ```
/// use tableprep::frame::{Series, Table};
/// use tableprep::preprocessing::{ColumnSelector, ColumnSpec, Stage};
///
/// let table = Table::from_columns(vec![
///     Series::from_i64s("age", &[30, 40]),
///     Series::from_strs("color", &["red", "blue"]),
/// ])?;
///
/// let selector = ColumnSelector::new(ColumnSpec::dtype("numeric"));
/// let numeric = selector.transform(&table)?;
/// assert_eq!(numeric.column_names(), vec!["age"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ColumnSelector {
    spec: ColumnSpec,
}

impl ColumnSelector {
    pub fn new(spec: ColumnSpec) -> Self {
        Self { spec }
    }

    /// Selector that keeps every column.
    pub fn all() -> Self {
        Self { spec: ColumnSpec::All }
    }

    pub fn spec(&self) -> &ColumnSpec {
        &self.spec
    }
}

impl Stage for ColumnSelector {
    fn fit(&mut self, _table: &Table, _target: Option<&Series>) -> Result<(), TransformError> {
        Ok(())
    }

    fn transform(&self, table: &Table) -> Result<Table, TransformError> {
        let positions = self.spec.resolve(table)?;
        Ok(table.select_columns_at(&positions)?)
    }

    fn name(&self) -> &'static str {
        "ColumnSelector"
    }
}

/// Keep a subset of rows, chosen by a [`RowSpec`].
///
/// Column order is untouched; the row index is restricted to the kept rows.
/// The intended use is excluding rows during training, e.g. a predicate
/// masking out outliers before a downstream estimator sees them.
///
/// # Example
/// ```
/// use tableprep::frame::{Scalar, Series, Table};
/// use tableprep::preprocessing::{RowSelector, RowSpec, Selection, Stage};
///
/// let table = Table::from_columns(vec![Series::from_f64s("x", &[-5.0, 0.5, 5.0])])?;
///
/// // keep rows with |x| <= 2
/// let selector = RowSelector::new(RowSpec::predicate(|t: &Table| {
///     let mask = t
///         .column("x")
///         .map(|c| c.values().iter().map(|v| matches!(v, Scalar::Float(x) if x.abs() <= 2.0)).collect())
///         .unwrap_or_default();
///     Selection::Mask(mask)
/// }));
/// assert_eq!(selector.transform(&table)?.n_rows(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct RowSelector {
    spec: RowSpec,
}

impl RowSelector {
    pub fn new(spec: RowSpec) -> Self {
        Self { spec }
    }

    /// Selector that keeps every row.
    pub fn all() -> Self {
        Self { spec: RowSpec::All }
    }

    pub fn spec(&self) -> &RowSpec {
        &self.spec
    }
}

impl Stage for RowSelector {
    fn fit(&mut self, _table: &Table, _target: Option<&Series>) -> Result<(), TransformError> {
        Ok(())
    }

    fn transform(&self, table: &Table) -> Result<Table, TransformError> {
        let positions = self.spec.resolve(table)?;
        Ok(table.take_rows(&positions)?)
    }

    fn name(&self) -> &'static str {
        "RowSelector"
    }
}
