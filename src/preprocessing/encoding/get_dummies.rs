//! Schema-consistent dummy encoding.
//!
//! Turns label-valued columns into 0/1 indicator columns with one guarantee
//! the plain expansion cannot give: the set and order of output columns is
//! learned once, at fit time, and reproduced at every later transform, even
//! when categories present at fit time are absent in a batch or a batch
//! carries categories never seen at fit time. Downstream consumers (a
//! trained model, typically) therefore always see the same feature vector
//! shape.

use serde::{Deserialize, Serialize};

use crate::frame::{DType, DummyOptions, PrefixSpec, Scalar, Series, Table};
use crate::preprocessing::error::TransformError;
use crate::preprocessing::traits::Stage;

/// The output schema learned at fit time.
///
/// An explicit immutable value: the ordered output column labels, plus the
/// subset that the expansion created (labels that were not columns of the
/// fit-time input). Only synthetic labels are zero-filled when absent at
/// transform time; a missing pass-through column is a caller error and
/// still fails strict lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrozenSchema {
    /// Every output column, in fit-time order.
    pub output_columns: Vec<String>,
    /// Output columns that did not exist in the fit-time input.
    pub synthetic: Vec<String>,
}

impl FrozenSchema {
    /// Number of output columns.
    pub fn width(&self) -> usize {
        self.output_columns.len()
    }

    fn is_synthetic(&self, name: &str) -> bool {
        self.synthetic.iter().any(|s| s == name)
    }
}

/// Dummy-encoding stage with a fit-time-frozen output schema.
///
/// Configuration mirrors the underlying table expansion
/// ([`Table::get_dummies`]): prefix, separator, missing-value indicator,
/// explicit target columns (absent means every string-typed column), and
/// first-category dropping.
///
/// # Example
/// ```
/// use tableprep::frame::{Series, Table};
/// use tableprep::preprocessing::{GetDummies, Stage};
///
/// let train = Table::from_columns(vec![
///     Series::from_strs("color", &["red", "red", "blue"]),
/// ])?;
/// let batch = Table::from_columns(vec![
///     Series::from_strs("color", &["green"]),
/// ])?;
///
/// let mut encoder = GetDummies::new();
/// let encoded = encoder.fit_transform(&train, None)?;
/// assert_eq!(encoded.column_names(), vec!["color_blue", "color_red"]);
///
/// // "green" was never seen: both frozen columns come back, all zero.
/// let out = encoder.transform(&batch)?;
/// assert_eq!(out.column_names(), vec!["color_blue", "color_red"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct GetDummies {
    options: DummyOptions,
    schema: Option<FrozenSchema>,
}

impl GetDummies {
    /// Encoder with default options: source-column prefixes, `_` separator,
    /// no missing indicator, auto-detected targets, all categories kept.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder from explicit expansion options.
    pub fn with_options(options: DummyOptions) -> Self {
        Self {
            options,
            schema: None,
        }
    }

    /// Set the prefix rule.
    pub fn prefix(mut self, prefix: PrefixSpec) -> Self {
        self.options.prefix = prefix;
        self
    }

    /// Set the prefix/category separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.options.separator = separator.into();
        self
    }

    /// Also emit a missing-value indicator per encoded column.
    pub fn dummy_na(mut self, dummy_na: bool) -> Self {
        self.options.dummy_na = dummy_na;
        self
    }

    /// Encode exactly these columns instead of auto-detecting.
    pub fn columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.columns = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Omit the sorted-first category of each encoded column.
    pub fn drop_first(mut self, drop_first: bool) -> Self {
        self.options.drop_first = drop_first;
        self
    }

    pub fn options(&self) -> &DummyOptions {
        &self.options
    }

    /// The schema learned at fit time, if fitted.
    pub fn schema(&self) -> Option<&FrozenSchema> {
        self.schema.as_ref()
    }

    /// Rebuild a fitted encoder from persisted state.
    pub fn from_parts(options: DummyOptions, schema: FrozenSchema) -> Self {
        Self {
            options,
            schema: Some(schema),
        }
    }
}

impl Stage for GetDummies {
    /// Learn the frozen output schema from the full expansion of `table`.
    ///
    /// # Errors
    /// Returns a frame error if an explicitly configured target column is
    /// absent.
    fn fit(&mut self, table: &Table, _target: Option<&Series>) -> Result<(), TransformError> {
        let expanded = table.get_dummies(&self.options)?;
        let output_columns: Vec<String> =
            expanded.column_names().iter().map(|s| s.to_string()).collect();
        let synthetic = output_columns
            .iter()
            .filter(|name| !table.contains_column(name))
            .cloned()
            .collect();
        self.schema = Some(FrozenSchema {
            output_columns,
            synthetic,
        });
        Ok(())
    }

    /// Expand the input, zero-fill frozen synthetic columns the batch lacks,
    /// and restrict to the frozen schema in fit-time order. Columns produced
    /// by this batch but unknown to the schema (categories unseen at fit)
    /// are dropped without error. The input row index is preserved.
    ///
    /// # Errors
    /// - [`TransformError::NotFitted`] before fit.
    /// - A frame error if a non-synthetic frozen column is missing from the
    ///   input (strict lookup; zero-filling is reserved for columns this
    ///   encoder created).
    fn transform(&self, table: &Table) -> Result<Table, TransformError> {
        let schema = self.schema.as_ref().ok_or(TransformError::NotFitted {
            stage: "GetDummies",
        })?;

        let mut expanded = table.get_dummies(&self.options)?;

        for name in &schema.output_columns {
            if schema.is_synthetic(name) && !expanded.contains_column(name) {
                let zeros = vec![Scalar::Int(0); expanded.n_rows()];
                let column = Series::new(name.clone(), DType::Int, zeros)
                    .expect("zeros fit an integer column");
                expanded.push_column(column).expect("expansion row count");
            }
        }

        Ok(expanded.select_columns(&schema.output_columns)?)
    }

    fn name(&self) -> &'static str {
        "GetDummies"
    }
}
