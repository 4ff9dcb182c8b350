//! Function and method adapters.
//!
//! Both stages wrap an externally supplied transformation behind the stage
//! contract: `fit` is a no-op, `transform` applies the wrapped operation,
//! and an unconfigured adapter is the identity.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::frame::{Scalar, Series, Table};
use crate::preprocessing::error::TransformError;
use crate::preprocessing::traits::Stage;

/// A table-to-table function wrapped by [`ApplyTable`].
pub type TableFn = Arc<dyn Fn(&Table) -> Result<Table, TransformError> + Send + Sync>;

/// Apply an arbitrary table-to-table function.
///
/// With no function configured, `transform` returns the input unchanged.
/// A Rust closure is callable by construction, so there is no invalid
/// configuration to reject here.
///
/// # Example
/// ```
/// use tableprep::frame::{Series, Table};
/// use tableprep::preprocessing::{ApplyTable, Stage};
///
/// let table = Table::from_columns(vec![Series::from_f64s("x", &[2.0, 1.0, 3.0])])?;
/// let head = ApplyTable::new(|t: &Table| Ok(t.head(2)));
/// assert_eq!(head.transform(&table)?.n_rows(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Default)]
pub struct ApplyTable {
    func: Option<TableFn>,
}

impl ApplyTable {
    /// Adapter applying the given function.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Table) -> Result<Table, TransformError> + Send + Sync + 'static,
    {
        Self {
            func: Some(Arc::new(func)),
        }
    }

    /// Adapter with no function: the identity.
    pub fn identity() -> Self {
        Self { func: None }
    }
}

impl fmt::Debug for ApplyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.func {
            Some(_) => write!(f, "ApplyTable(..)"),
            None => write!(f, "ApplyTable(identity)"),
        }
    }
}

impl Stage for ApplyTable {
    fn fit(&mut self, _table: &Table, _target: Option<&Series>) -> Result<(), TransformError> {
        Ok(())
    }

    fn transform(&self, table: &Table) -> Result<Table, TransformError> {
        match &self.func {
            Some(f) => f(table),
            None => Ok(table.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "ApplyTable"
    }
}

/// A recognized table-level operation for [`TableMethod`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TableOp {
    /// Drop rows containing missing values.
    Dropna,
    /// Replace missing values with the given value.
    Fillna(Scalar),
    /// Keep the first `n` rows.
    Head(usize),
    /// Keep the last `n` rows.
    Tail(usize),
    /// Reorder rows by ascending index label.
    SortIndex,
}

impl TableOp {
    /// Default row count for `head`/`tail` when constructed by name.
    const DEFAULT_PEEK: usize = 5;

    /// Parse an operation name.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidConfig`] for an unrecognized name,
    /// or for `fillna`, which cannot be built without a fill value.
    pub fn from_name(name: &str) -> Result<Self, TransformError> {
        match name {
            "dropna" => Ok(TableOp::Dropna),
            "sort_index" => Ok(TableOp::SortIndex),
            "head" => Ok(TableOp::Head(Self::DEFAULT_PEEK)),
            "tail" => Ok(TableOp::Tail(Self::DEFAULT_PEEK)),
            "fillna" => Err(TransformError::InvalidConfig(
                "fillna requires a fill value; construct TableOp::Fillna directly".to_string(),
            )),
            other => Err(TransformError::InvalidConfig(format!(
                "tables do not have the operation {:?}",
                other
            ))),
        }
    }

    fn apply(&self, table: &Table) -> Table {
        match self {
            TableOp::Dropna => table.dropna(),
            TableOp::Fillna(value) => table.fillna(value),
            TableOp::Head(n) => table.head(*n),
            TableOp::Tail(n) => table.tail(*n),
            TableOp::SortIndex => table.sort_index(),
        }
    }
}

/// Apply a named table-level operation.
///
/// With no operation configured, `transform` returns the input unchanged.
/// Construction from a name validates against the recognized operation set.
///
/// # Example
/// ```
/// use tableprep::preprocessing::{Stage, TableMethod, TableOp};
///
/// let stage = TableMethod::from_name("dropna")?;
/// assert!(TableMethod::from_name("pivot_table").is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableMethod {
    op: Option<TableOp>,
}

impl TableMethod {
    /// Adapter applying the given operation.
    pub fn new(op: TableOp) -> Self {
        Self { op: Some(op) }
    }

    /// Adapter built from an operation name.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidConfig`] for an unrecognized name.
    pub fn from_name(name: &str) -> Result<Self, TransformError> {
        Ok(Self {
            op: Some(TableOp::from_name(name)?),
        })
    }

    /// Adapter with no operation: the identity.
    pub fn identity() -> Self {
        Self { op: None }
    }

    pub fn op(&self) -> Option<&TableOp> {
        self.op.as_ref()
    }
}

impl Stage for TableMethod {
    fn fit(&mut self, _table: &Table, _target: Option<&Series>) -> Result<(), TransformError> {
        Ok(())
    }

    fn transform(&self, table: &Table) -> Result<Table, TransformError> {
        match &self.op {
            Some(op) => Ok(op.apply(table)),
            None => Ok(table.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "TableMethod"
    }
}
