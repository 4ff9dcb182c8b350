//! Row index: ordered labels, duplicates allowed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A row label. Tables are addressed by label, not position; labels need not
/// be unique or contiguous.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    Int(i64),
    Str(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(v) => write!(f, "{}", v),
            Label::Str(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Label {
    fn from(v: i64) -> Self {
        Label::Int(v)
    }
}

impl From<&str> for Label {
    fn from(v: &str) -> Self {
        Label::Str(v.to_string())
    }
}

impl From<String> for Label {
    fn from(v: String) -> Self {
        Label::Str(v)
    }
}

/// Ordered sequence of row labels shared by every column of a table.
///
/// Order-preserving; duplicate labels are permitted, as in the positional
/// selection semantics this mirrors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowIndex {
    labels: Vec<Label>,
}

impl RowIndex {
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// The default index `0..n`.
    pub fn default_range(n: usize) -> Self {
        Self {
            labels: (0..n as i64).map(Label::Int).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Every position holding the given label, in index order.
    pub fn positions_of(&self, label: &Label) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| *l == label)
            .map(|(i, _)| i)
            .collect()
    }

    /// A new index restricted to the given positions, in the given order.
    /// Positions must already be bounds-checked by the caller.
    pub fn take(&self, positions: &[usize]) -> RowIndex {
        RowIndex {
            labels: positions.iter().map(|&p| self.labels[p].clone()).collect(),
        }
    }
}

impl FromIterator<Label> for RowIndex {
    fn from_iter<T: IntoIterator<Item = Label>>(iter: T) -> Self {
        RowIndex {
            labels: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range() {
        let idx = RowIndex::default_range(3);
        assert_eq!(idx.labels(), &[Label::Int(0), Label::Int(1), Label::Int(2)]);
    }

    #[test]
    fn test_positions_of_duplicates() {
        let idx = RowIndex::new(vec![
            Label::Str("a".into()),
            Label::Str("b".into()),
            Label::Str("a".into()),
        ]);
        assert_eq!(idx.positions_of(&Label::Str("a".into())), vec![0, 2]);
        assert_eq!(idx.positions_of(&Label::Str("c".into())), Vec::<usize>::new());
    }

    #[test]
    fn test_take_preserves_order() {
        let idx = RowIndex::default_range(4);
        let taken = idx.take(&[3, 1]);
        assert_eq!(taken.labels(), &[Label::Int(3), Label::Int(1)]);
    }
}
