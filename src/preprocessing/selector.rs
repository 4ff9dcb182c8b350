//! Selector specifications and their resolution.
//!
//! A spec describes *which* labels to keep along one axis; resolution turns
//! it into concrete positions against a table at call time. Predicates are
//! re-evaluated on every resolution, so a predicate reading mutable external
//! state may legitimately select differently across calls.

use std::fmt;
use std::sync::Arc;

use crate::frame::{DType, Label, Table};
use crate::preprocessing::error::TransformError;

/// What a predicate may return: a boolean mask aligned to the axis, a list
/// of axis labels, or a list of positions.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Mask(Vec<bool>),
    Labels(Vec<Label>),
    Positions(Vec<usize>),
}

/// A callable evaluated against the table at resolution time.
pub type Predicate = Arc<dyn Fn(&Table) -> Selection + Send + Sync>;

/// Column selector specification.
#[derive(Clone, Default)]
pub enum ColumnSpec {
    /// Keep every column, in existing order.
    #[default]
    All,
    /// Keep exactly these columns, in this order; duplicates kept verbatim;
    /// strict lookup.
    Labels(Vec<String>),
    /// Keep columns whose dtype matches a type-category tag. The tag is
    /// interpreted at resolution time; `"numeric"` is an alias for
    /// `"number"` (any integer or float column).
    TypeTag(String),
    /// Keep what the callable selects.
    Predicate(Predicate),
}

impl ColumnSpec {
    /// Spec from an explicit label list.
    pub fn labels<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnSpec::Labels(names.into_iter().map(Into::into).collect())
    }

    /// Spec from a type-category tag such as `"numeric"` or `"object"`.
    pub fn dtype(tag: impl Into<String>) -> Self {
        ColumnSpec::TypeTag(tag.into())
    }

    /// Spec from a predicate callable.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Table) -> Selection + Send + Sync + 'static,
    {
        ColumnSpec::Predicate(Arc::new(f))
    }

    /// Resolve to ordered column positions against the table.
    ///
    /// # Errors
    /// - [`TransformError::LabelNotFound`] for an absent explicit label or an
    ///   out-of-range predicate position.
    /// - [`TransformError::InvalidSpec`] for an unrecognized type tag or a
    ///   malformed predicate return.
    pub fn resolve(&self, table: &Table) -> Result<Vec<usize>, TransformError> {
        match self {
            ColumnSpec::All => Ok((0..table.n_columns()).collect()),
            ColumnSpec::Labels(names) => names
                .iter()
                .map(|name| {
                    table.column_position(name).ok_or_else(|| TransformError::LabelNotFound {
                        axis: "column",
                        label: name.clone(),
                    })
                })
                .collect(),
            ColumnSpec::TypeTag(tag) => {
                let selector = TypeSelector::parse(tag)
                    .ok_or_else(|| TransformError::InvalidSpec(format!("unknown type tag {:?}", tag)))?;
                Ok(table
                    .columns()
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| selector.matches(c.dtype()))
                    .map(|(i, _)| i)
                    .collect())
            }
            ColumnSpec::Predicate(f) => resolve_column_selection(f(table), table),
        }
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSpec::All => write!(f, "ColumnSpec::All"),
            ColumnSpec::Labels(names) => f.debug_tuple("ColumnSpec::Labels").field(names).finish(),
            ColumnSpec::TypeTag(tag) => f.debug_tuple("ColumnSpec::TypeTag").field(tag).finish(),
            ColumnSpec::Predicate(_) => write!(f, "ColumnSpec::Predicate(..)"),
        }
    }
}

/// Row selector specification.
#[derive(Clone, Default)]
pub enum RowSpec {
    /// Keep every row, in existing order.
    #[default]
    All,
    /// Keep rows by index label, in this order; a duplicated index label
    /// contributes every occurrence; strict lookup.
    Labels(Vec<Label>),
    /// Keep what the callable selects.
    Predicate(Predicate),
}

impl RowSpec {
    /// Spec from an explicit label list.
    pub fn labels<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        RowSpec::Labels(labels.into_iter().map(Into::into).collect())
    }

    /// Spec from a predicate callable.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Table) -> Selection + Send + Sync + 'static,
    {
        RowSpec::Predicate(Arc::new(f))
    }

    /// Resolve to ordered row positions against the table.
    ///
    /// # Errors
    /// - [`TransformError::LabelNotFound`] for an absent label or an
    ///   out-of-range predicate position.
    /// - [`TransformError::InvalidSpec`] for a malformed predicate return.
    pub fn resolve(&self, table: &Table) -> Result<Vec<usize>, TransformError> {
        match self {
            RowSpec::All => Ok((0..table.n_rows()).collect()),
            RowSpec::Labels(labels) => resolve_row_labels(labels, table),
            RowSpec::Predicate(f) => resolve_row_selection(f(table), table),
        }
    }
}

impl fmt::Debug for RowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSpec::All => write!(f, "RowSpec::All"),
            RowSpec::Labels(labels) => f.debug_tuple("RowSpec::Labels").field(labels).finish(),
            RowSpec::Predicate(_) => write!(f, "RowSpec::Predicate(..)"),
        }
    }
}

/// A type-category tag for column selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeSelector {
    /// Any integer or float column.
    Number,
    Int,
    Float,
    Bool,
    /// String-valued (label-valued) columns.
    Str,
}

impl TypeSelector {
    /// Parse a tag string. `"numeric"` resolves to the same rule as
    /// `"number"`; `"object"` is accepted for string columns.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "number" | "numeric" => Some(TypeSelector::Number),
            "int" | "integer" => Some(TypeSelector::Int),
            "float" => Some(TypeSelector::Float),
            "bool" | "boolean" => Some(TypeSelector::Bool),
            "str" | "string" | "object" => Some(TypeSelector::Str),
            _ => None,
        }
    }

    pub fn matches(&self, dtype: DType) -> bool {
        match self {
            TypeSelector::Number => dtype.is_numeric(),
            TypeSelector::Int => dtype == DType::Int,
            TypeSelector::Float => dtype == DType::Float,
            TypeSelector::Bool => dtype == DType::Bool,
            TypeSelector::Str => dtype == DType::Str,
        }
    }
}

fn resolve_column_selection(
    selection: Selection,
    table: &Table,
) -> Result<Vec<usize>, TransformError> {
    match selection {
        Selection::Mask(mask) => {
            if mask.len() != table.n_columns() {
                return Err(TransformError::InvalidSpec(format!(
                    "column mask of length {} against {} columns",
                    mask.len(),
                    table.n_columns()
                )));
            }
            Ok(mask
                .iter()
                .enumerate()
                .filter(|(_, &keep)| keep)
                .map(|(i, _)| i)
                .collect())
        }
        Selection::Labels(labels) => labels
            .iter()
            .map(|label| match label {
                Label::Str(name) => {
                    table.column_position(name).ok_or_else(|| TransformError::LabelNotFound {
                        axis: "column",
                        label: name.clone(),
                    })
                }
                Label::Int(_) => Err(TransformError::InvalidSpec(format!(
                    "integer label {} on the column axis",
                    label
                ))),
            })
            .collect(),
        Selection::Positions(positions) => {
            check_positions(&positions, table.n_columns(), "column")?;
            Ok(positions)
        }
    }
}

fn resolve_row_labels(labels: &[Label], table: &Table) -> Result<Vec<usize>, TransformError> {
    let mut positions = Vec::with_capacity(labels.len());
    for label in labels {
        let found = table.index().positions_of(label);
        if found.is_empty() {
            return Err(TransformError::LabelNotFound {
                axis: "row",
                label: label.to_string(),
            });
        }
        positions.extend(found);
    }
    Ok(positions)
}

fn resolve_row_selection(selection: Selection, table: &Table) -> Result<Vec<usize>, TransformError> {
    match selection {
        Selection::Mask(mask) => {
            if mask.len() != table.n_rows() {
                return Err(TransformError::InvalidSpec(format!(
                    "row mask of length {} against {} rows",
                    mask.len(),
                    table.n_rows()
                )));
            }
            Ok(mask
                .iter()
                .enumerate()
                .filter(|(_, &keep)| keep)
                .map(|(i, _)| i)
                .collect())
        }
        Selection::Labels(labels) => resolve_row_labels(&labels, table),
        Selection::Positions(positions) => {
            check_positions(&positions, table.n_rows(), "row")?;
            Ok(positions)
        }
    }
}

fn check_positions(
    positions: &[usize],
    len: usize,
    axis: &'static str,
) -> Result<(), TransformError> {
    if let Some(&bad) = positions.iter().find(|&&p| p >= len) {
        return Err(TransformError::LabelNotFound {
            axis,
            label: bad.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Series, Table};

    fn sample() -> Table {
        Table::from_columns(vec![
            Series::from_i64s("age", &[30, 40]),
            Series::from_f64s("height", &[1.7, 1.8]),
            Series::from_strs("color", &["red", "blue"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_all_keeps_existing_order() {
        let t = sample();
        assert_eq!(ColumnSpec::All.resolve(&t).unwrap(), vec![0, 1, 2]);
        assert_eq!(RowSpec::All.resolve(&t).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_labels_order_and_duplicates() {
        let t = sample();
        let spec = ColumnSpec::labels(["color", "age", "age"]);
        assert_eq!(spec.resolve(&t).unwrap(), vec![2, 0, 0]);
    }

    #[test]
    fn test_labels_strict_lookup() {
        let t = sample();
        let spec = ColumnSpec::labels(["weight"]);
        assert!(matches!(
            spec.resolve(&t),
            Err(TransformError::LabelNotFound { axis: "column", .. })
        ));
    }

    #[test]
    fn test_numeric_alias_matches_number() {
        let t = sample();
        let numeric = ColumnSpec::dtype("numeric").resolve(&t).unwrap();
        let number = ColumnSpec::dtype("number").resolve(&t).unwrap();
        assert_eq!(numeric, number);
        assert_eq!(numeric, vec![0, 1]);
    }

    #[test]
    fn test_unknown_tag_is_invalid_spec() {
        let t = sample();
        assert!(matches!(
            ColumnSpec::dtype("wibble").resolve(&t),
            Err(TransformError::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_object_tag_selects_strings() {
        let t = sample();
        assert_eq!(ColumnSpec::dtype("object").resolve(&t).unwrap(), vec![2]);
    }

    #[test]
    fn test_predicate_mask() {
        let t = sample();
        let spec = ColumnSpec::predicate(|table: &Table| {
            Selection::Mask(table.columns().iter().map(|c| c.is_numeric()).collect())
        });
        assert_eq!(spec.resolve(&t).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_predicate_mask_length_checked() {
        let t = sample();
        let spec = ColumnSpec::predicate(|_: &Table| Selection::Mask(vec![true]));
        assert!(matches!(spec.resolve(&t), Err(TransformError::InvalidSpec(_))));
    }

    #[test]
    fn test_predicate_reevaluated_each_call() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let spec = RowSpec::predicate(move |table: &Table| {
            counter.fetch_add(1, Ordering::SeqCst);
            Selection::Mask(vec![true; table.n_rows()])
        });
        let t = sample();
        spec.resolve(&t).unwrap();
        spec.resolve(&t).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_row_labels_duplicated_index() {
        let t = Table::new(
            vec![Series::from_i64s("v", &[1, 2, 3])],
            crate::frame::RowIndex::new(vec!["a".into(), "b".into(), "a".into()]),
        )
        .unwrap();
        let spec = RowSpec::labels(["a"]);
        assert_eq!(spec.resolve(&t).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_row_positions_bounds_checked() {
        let t = sample();
        let spec = RowSpec::predicate(|_: &Table| Selection::Positions(vec![0, 9]));
        assert!(matches!(
            spec.resolve(&t),
            Err(TransformError::LabelNotFound { axis: "row", .. })
        ));
    }

    #[test]
    fn test_column_predicate_integer_label_rejected() {
        let t = sample();
        let spec = ColumnSpec::predicate(|_: &Table| Selection::Labels(vec![Label::Int(0)]));
        assert!(matches!(spec.resolve(&t), Err(TransformError::InvalidSpec(_))));
    }
}
