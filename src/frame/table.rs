//! The table: ordered named columns over a shared row index.

use std::collections::HashMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::frame::error::FrameError;
use crate::frame::index::{Label, RowIndex};
use crate::frame::scalar::{DType, Scalar};
use crate::frame::series::Series;

/// An ordered collection of named columns sharing one row index.
///
/// Every column has exactly as many values as the index has labels; this is
/// the only structural invariant and it is enforced at every construction
/// point, so any `Table` value is well-formed. Duplicate column names are
/// representable (an explicit selection can legitimately request the same
/// column twice); name lookup resolves to the first occurrence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    index: RowIndex,
    columns: Vec<Series>,
}

impl Table {
    /// Build a table from columns and an explicit row index.
    ///
    /// # Errors
    /// Returns [`FrameError::LengthMismatch`] if any column's length differs
    /// from the index.
    pub fn new(columns: Vec<Series>, index: RowIndex) -> Result<Self, FrameError> {
        for col in &columns {
            if col.len() != index.len() {
                return Err(FrameError::LengthMismatch {
                    expected: index.len(),
                    got: col.len(),
                });
            }
        }
        Ok(Self { index, columns })
    }

    /// Build a table with the default `0..n` index.
    ///
    /// # Errors
    /// Returns [`FrameError::LengthMismatch`] if the columns disagree on length.
    pub fn from_columns(columns: Vec<Series>) -> Result<Self, FrameError> {
        let n = columns.first().map(Series::len).unwrap_or(0);
        Self::new(columns, RowIndex::default_range(n))
    }

    /// Index-preserving construction from a raw float matrix, one column per
    /// name. This is the seam numeric collaborators hand bare arrays back
    /// through.
    ///
    /// # Errors
    /// Returns [`FrameError::LengthMismatch`] if the matrix shape disagrees
    /// with the names or the index.
    pub fn from_f64_matrix(
        values: &Array2<f64>,
        names: &[String],
        index: RowIndex,
    ) -> Result<Self, FrameError> {
        if values.ncols() != names.len() {
            return Err(FrameError::LengthMismatch {
                expected: names.len(),
                got: values.ncols(),
            });
        }
        let columns = names
            .iter()
            .enumerate()
            .map(|(j, name)| {
                let col: Vec<f64> = values.column(j).to_vec();
                Series::from_f64s(name.clone(), &col)
            })
            .collect();
        Self::new(columns, index)
    }

    /// Numeric view of the whole table as a row-major float matrix.
    /// `Null` entries become NaN.
    ///
    /// # Errors
    /// Returns [`FrameError::TypeMismatch`] naming the first non-numeric column.
    pub fn to_f64_matrix(&self) -> Result<Array2<f64>, FrameError> {
        let rows = self.n_rows();
        let cols = self.n_columns();
        let mut out = Array2::<f64>::zeros((rows, cols));
        for (j, series) in self.columns.iter().enumerate() {
            let vals = series.to_f64s()?;
            for (i, v) in vals.into_iter().enumerate() {
                out[[i, j]] = v;
            }
        }
        Ok(out)
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Series::name).collect()
    }

    /// First column with the given name.
    pub fn column(&self, name: &str) -> Option<&Series> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Position of the first column with the given name.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Restrict to the named columns, in request order. Strict lookup:
    /// every requested name must exist. A name requested twice appears twice.
    ///
    /// # Errors
    /// Returns [`FrameError::ColumnNotFound`] for an absent name.
    pub fn select_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Table, FrameError> {
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            match self.column(name) {
                Some(col) => selected.push(col.clone()),
                None => return Err(FrameError::ColumnNotFound(name.to_string())),
            }
        }
        Ok(Table {
            index: self.index.clone(),
            columns: selected,
        })
    }

    /// Restrict to columns at the given positions, in the given order.
    ///
    /// # Errors
    /// Returns [`FrameError::PositionOutOfBounds`] for a position past the
    /// column count.
    pub fn select_columns_at(&self, positions: &[usize]) -> Result<Table, FrameError> {
        let mut selected = Vec::with_capacity(positions.len());
        for &p in positions {
            match self.columns.get(p) {
                Some(col) => selected.push(col.clone()),
                None => {
                    return Err(FrameError::PositionOutOfBounds {
                        position: p,
                        len: self.columns.len(),
                    })
                }
            }
        }
        Ok(Table {
            index: self.index.clone(),
            columns: selected,
        })
    }

    /// Restrict to the rows at the given positions, in the given order; the
    /// row index is restricted the same way.
    ///
    /// # Errors
    /// Returns [`FrameError::PositionOutOfBounds`] for a position past the
    /// row count.
    pub fn take_rows(&self, positions: &[usize]) -> Result<Table, FrameError> {
        let n = self.n_rows();
        if let Some(&bad) = positions.iter().find(|&&p| p >= n) {
            return Err(FrameError::PositionOutOfBounds { position: bad, len: n });
        }
        Ok(Table {
            index: self.index.take(positions),
            columns: self.columns.iter().map(|c| c.take(positions)).collect(),
        })
    }

    /// Keep the rows where the mask is true, preserving order.
    ///
    /// # Errors
    /// Returns [`FrameError::LengthMismatch`] if the mask length differs from
    /// the row count.
    pub fn filter_rows(&self, mask: &[bool]) -> Result<Table, FrameError> {
        if mask.len() != self.n_rows() {
            return Err(FrameError::LengthMismatch {
                expected: self.n_rows(),
                got: mask.len(),
            });
        }
        let positions: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter(|(_, &keep)| keep)
            .map(|(i, _)| i)
            .collect();
        self.take_rows(&positions)
    }

    /// Select rows by index label, in request order. A duplicated index label
    /// contributes every occurrence, in index order; strict lookup otherwise.
    ///
    /// # Errors
    /// Returns [`FrameError::RowLabelNotFound`] if a requested label is absent.
    pub fn select_rows_by_label(&self, labels: &[Label]) -> Result<Table, FrameError> {
        let mut positions = Vec::with_capacity(labels.len());
        for label in labels {
            let found = self.index.positions_of(label);
            if found.is_empty() {
                return Err(FrameError::RowLabelNotFound(label.to_string()));
            }
            positions.extend(found);
        }
        self.take_rows(&positions)
    }

    /// Same columns under a replacement index.
    ///
    /// # Errors
    /// Returns [`FrameError::LengthMismatch`] if the new index length differs.
    pub fn with_index(mut self, index: RowIndex) -> Result<Table, FrameError> {
        if index.len() != self.n_rows() {
            return Err(FrameError::LengthMismatch {
                expected: self.n_rows(),
                got: index.len(),
            });
        }
        self.index = index;
        Ok(self)
    }

    /// Append a column on the right.
    ///
    /// # Errors
    /// Returns [`FrameError::LengthMismatch`] if the column length differs.
    pub fn push_column(&mut self, column: Series) -> Result<(), FrameError> {
        if column.len() != self.n_rows() {
            return Err(FrameError::LengthMismatch {
                expected: self.n_rows(),
                got: column.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Drop every row containing a missing value.
    pub fn dropna(&self) -> Table {
        let keep: Vec<usize> = (0..self.n_rows())
            .filter(|&i| self.columns.iter().all(|c| !c.values()[i].is_null()))
            .collect();
        self.take_rows(&keep).expect("positions are in range")
    }

    /// Replace missing values with the given value, in every column whose
    /// dtype the value fits. Columns of other dtypes are left untouched.
    pub fn fillna(&self, value: &Scalar) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                if !value.fits(c.dtype()) {
                    return c.clone();
                }
                let filled: Vec<Scalar> = c
                    .values()
                    .iter()
                    .map(|v| if v.is_null() { value.clone() } else { v.clone() })
                    .collect();
                Series::new(c.name(), c.dtype(), filled).expect("values fit the dtype")
            })
            .collect();
        Table {
            index: self.index.clone(),
            columns,
        }
    }

    /// Rows reordered by ascending index label. The sort is stable, so
    /// duplicate labels keep their relative order.
    pub fn sort_index(&self) -> Table {
        let mut positions: Vec<usize> = (0..self.n_rows()).collect();
        positions.sort_by(|&a, &b| self.index.labels()[a].cmp(&self.index.labels()[b]));
        self.take_rows(&positions).expect("positions are in range")
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Table {
        let n = n.min(self.n_rows());
        let positions: Vec<usize> = (0..n).collect();
        self.take_rows(&positions).expect("positions are in range")
    }

    /// The last `n` rows.
    pub fn tail(&self, n: usize) -> Table {
        let total = self.n_rows();
        let n = n.min(total);
        let positions: Vec<usize> = (total - n..total).collect();
        self.take_rows(&positions).expect("positions are in range")
    }

    /// Dummy-expand categorical columns into 0/1 indicator columns.
    ///
    /// Output layout (pinned, not incidental): the non-encoded columns first
    /// in their original order, then one indicator group per encoded column.
    /// Groups come in encoding order, categories sorted ascending within a
    /// group, the missing-value indicator (if requested) last in its group.
    ///
    /// Encoding order is the explicit `columns` list when given, otherwise
    /// the table order of auto-detected string-typed columns.
    ///
    /// # Errors
    /// Returns [`FrameError::ColumnNotFound`] if an explicitly listed column
    /// is absent.
    pub fn get_dummies(&self, options: &DummyOptions) -> Result<Table, FrameError> {
        let targets: Vec<String> = match &options.columns {
            Some(names) => {
                for name in names {
                    if !self.contains_column(name) {
                        return Err(FrameError::ColumnNotFound(name.clone()));
                    }
                }
                names.clone()
            }
            None => self
                .columns
                .iter()
                .filter(|c| c.dtype() == DType::Str)
                .map(|c| c.name().to_string())
                .collect(),
        };

        let mut out_columns: Vec<Series> = self
            .columns
            .iter()
            .filter(|c| !targets.iter().any(|t| t == c.name()))
            .cloned()
            .collect();

        for target in &targets {
            let source = self.column(target).expect("target existence checked above");
            let prefix = options.prefix.resolve(target);

            let mut categories: Vec<&Scalar> = Vec::new();
            for v in source.values() {
                if v.is_null() {
                    continue;
                }
                if !categories.contains(&v) {
                    categories.push(v);
                }
            }
            categories.sort_by(|a, b| a.category_cmp(b));

            let skip = usize::from(options.drop_first);
            for cat in categories.iter().skip(skip) {
                let name = format!("{}{}{}", prefix, options.separator, cat.label_string());
                let values: Vec<Scalar> = source
                    .values()
                    .iter()
                    .map(|v| Scalar::Int(i64::from(v == *cat)))
                    .collect();
                out_columns.push(Series::new(name, DType::Int, values).expect("0/1 values"));
            }

            if options.dummy_na {
                let name = format!("{}{}nan", prefix, options.separator);
                let values: Vec<Scalar> = source
                    .values()
                    .iter()
                    .map(|v| Scalar::Int(i64::from(v.is_null())))
                    .collect();
                out_columns.push(Series::new(name, DType::Int, values).expect("0/1 values"));
            }
        }

        Ok(Table {
            index: self.index.clone(),
            columns: out_columns,
        })
    }
}

/// How indicator column names are prefixed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum PrefixSpec {
    /// Use the source column's own name (the default).
    #[default]
    SourceColumn,
    /// One prefix for every encoded column.
    Uniform(String),
    /// Per-column prefixes; columns absent from the map fall back to their
    /// own name.
    PerColumn(HashMap<String, String>),
}

impl PrefixSpec {
    fn resolve(&self, column: &str) -> String {
        match self {
            PrefixSpec::SourceColumn => column.to_string(),
            PrefixSpec::Uniform(p) => p.clone(),
            PrefixSpec::PerColumn(map) => {
                map.get(column).cloned().unwrap_or_else(|| column.to_string())
            }
        }
    }
}

/// Configuration for [`Table::get_dummies`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DummyOptions {
    /// Indicator name prefix per encoded column.
    pub prefix: PrefixSpec,
    /// Separator between prefix and category label.
    pub separator: String,
    /// Also emit a missing-value indicator per encoded column.
    pub dummy_na: bool,
    /// Explicit columns to encode; `None` auto-detects string-typed columns.
    pub columns: Option<Vec<String>>,
    /// Omit the sorted-first real category of each encoded column.
    pub drop_first: bool,
}

impl Default for DummyOptions {
    fn default() -> Self {
        Self {
            prefix: PrefixSpec::SourceColumn,
            separator: "_".to_string(),
            dummy_na: false,
            columns: None,
            drop_first: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_columns(vec![
            Series::from_i64s("age", &[30, 40, 50]),
            Series::from_strs("color", &["red", "red", "blue"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let result = Table::new(
            vec![Series::from_i64s("a", &[1, 2])],
            RowIndex::default_range(3),
        );
        assert!(matches!(result, Err(FrameError::LengthMismatch { .. })));
    }

    #[test]
    fn test_select_columns_strict_and_ordered() {
        let t = sample();
        let sel = t.select_columns(&["color", "age"]).unwrap();
        assert_eq!(sel.column_names(), vec!["color", "age"]);

        let missing = t.select_columns(&["nope"]);
        assert!(matches!(missing, Err(FrameError::ColumnNotFound(_))));
    }

    #[test]
    fn test_select_columns_duplicates_preserved() {
        let t = sample();
        let sel = t.select_columns(&["age", "age"]).unwrap();
        assert_eq!(sel.column_names(), vec!["age", "age"]);
    }

    #[test]
    fn test_filter_rows_mask_length_checked() {
        let t = sample();
        assert!(matches!(
            t.filter_rows(&[true, false]),
            Err(FrameError::LengthMismatch { .. })
        ));
        let kept = t.filter_rows(&[true, false, true]).unwrap();
        assert_eq!(kept.n_rows(), 2);
        assert_eq!(kept.index().labels(), &[Label::Int(0), Label::Int(2)]);
    }

    #[test]
    fn test_select_rows_by_label_duplicates() {
        let t = Table::new(
            vec![Series::from_i64s("v", &[1, 2, 3])],
            RowIndex::new(vec!["a".into(), "b".into(), "a".into()]),
        )
        .unwrap();
        let sel = t.select_rows_by_label(&["a".into()]).unwrap();
        assert_eq!(sel.n_rows(), 2);
        assert_eq!(sel.column("v").unwrap().values(), &[Scalar::Int(1), Scalar::Int(3)]);

        assert!(matches!(
            t.select_rows_by_label(&["z".into()]),
            Err(FrameError::RowLabelNotFound(_))
        ));
    }

    #[test]
    fn test_dropna_and_fillna() {
        let t = Table::from_columns(vec![
            Series::new(
                "x",
                DType::Float,
                vec![Scalar::Float(1.0), Scalar::Null, Scalar::Float(3.0)],
            )
            .unwrap(),
            Series::from_strs("c", &["a", "b", "c"]),
        ])
        .unwrap();

        let dropped = t.dropna();
        assert_eq!(dropped.n_rows(), 2);
        assert_eq!(dropped.index().labels(), &[Label::Int(0), Label::Int(2)]);

        let filled = t.fillna(&Scalar::Float(0.0));
        assert_eq!(filled.column("x").unwrap().null_count(), 0);
        // the fill value does not fit the string column, which stays untouched
        assert_eq!(filled.column("c").unwrap().values()[1], Scalar::Str("b".into()));
    }

    #[test]
    fn test_sort_index_head_tail() {
        let t = Table::new(
            vec![Series::from_i64s("v", &[1, 2, 3])],
            RowIndex::new(vec![Label::Int(2), Label::Int(0), Label::Int(1)]),
        )
        .unwrap();
        let sorted = t.sort_index();
        assert_eq!(
            sorted.index().labels(),
            &[Label::Int(0), Label::Int(1), Label::Int(2)]
        );
        assert_eq!(sorted.head(2).n_rows(), 2);
        assert_eq!(sorted.tail(1).index().labels(), &[Label::Int(2)]);
    }

    #[test]
    fn test_get_dummies_layout() {
        let t = sample();
        let d = t.get_dummies(&DummyOptions::default()).unwrap();
        // non-encoded first, then sorted categories of `color`
        assert_eq!(d.column_names(), vec!["age", "color_blue", "color_red"]);
        assert_eq!(
            d.column("color_red").unwrap().values(),
            &[Scalar::Int(1), Scalar::Int(1), Scalar::Int(0)]
        );
        assert_eq!(
            d.column("color_blue").unwrap().values(),
            &[Scalar::Int(0), Scalar::Int(0), Scalar::Int(1)]
        );
    }

    #[test]
    fn test_get_dummies_drop_first_and_na() {
        let t = Table::from_columns(vec![Series::new(
            "c",
            DType::Str,
            vec![Scalar::Str("a".into()), Scalar::Null, Scalar::Str("b".into())],
        )
        .unwrap()])
        .unwrap();

        let opts = DummyOptions {
            dummy_na: true,
            drop_first: true,
            ..DummyOptions::default()
        };
        let d = t.get_dummies(&opts).unwrap();
        // "a" dropped as the sorted-first real category; nan indicator kept
        assert_eq!(d.column_names(), vec!["c_b", "c_nan"]);
        assert_eq!(
            d.column("c_nan").unwrap().values(),
            &[Scalar::Int(0), Scalar::Int(1), Scalar::Int(0)]
        );
    }

    #[test]
    fn test_get_dummies_explicit_columns_and_prefix() {
        let t = sample();
        let opts = DummyOptions {
            columns: Some(vec!["color".to_string()]),
            prefix: PrefixSpec::Uniform("col".to_string()),
            separator: "-".to_string(),
            ..DummyOptions::default()
        };
        let d = t.get_dummies(&opts).unwrap();
        assert_eq!(d.column_names(), vec!["age", "col-blue", "col-red"]);

        let missing = t.get_dummies(&DummyOptions {
            columns: Some(vec!["nope".to_string()]),
            ..DummyOptions::default()
        });
        assert!(matches!(missing, Err(FrameError::ColumnNotFound(_))));
    }

    #[test]
    fn test_get_dummies_preserves_index() {
        let t = Table::new(
            vec![Series::from_strs("c", &["x", "y"])],
            RowIndex::new(vec!["r1".into(), "r2".into()]),
        )
        .unwrap();
        let d = t.get_dummies(&DummyOptions::default()).unwrap();
        assert_eq!(d.index(), t.index());
    }

    #[test]
    fn test_matrix_round_trip() {
        let t = Table::from_columns(vec![
            Series::from_f64s("a", &[1.0, 2.0]),
            Series::from_f64s("b", &[3.0, 4.0]),
        ])
        .unwrap();
        let m = t.to_f64_matrix().unwrap();
        assert_eq!(m[[1, 0]], 2.0);

        let names = vec!["a".to_string(), "b".to_string()];
        let back = Table::from_f64_matrix(&m, &names, t.index().clone()).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_to_matrix_rejects_non_numeric() {
        let t = sample();
        assert!(matches!(t.to_f64_matrix(), Err(FrameError::TypeMismatch { .. })));
    }
}
