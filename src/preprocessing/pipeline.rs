//! Sequential composition of stages.

use crate::frame::{Series, Table};
use crate::preprocessing::error::TransformError;
use crate::preprocessing::traits::Stage;

/// A named sequence of stages, each fed the previous stage's output.
///
/// `fit` threads `fit_transform` through the steps so every stage learns
/// from the data it will actually see; `transform` threads `transform`.
/// The pipeline is itself a [`Stage`], so pipelines nest.
///
/// # Example
/// ```
/// use tableprep::frame::{Series, Table};
/// use tableprep::preprocessing::{ColumnSelector, ColumnSpec, GetDummies, Pipeline, Stage};
///
/// let table = Table::from_columns(vec![
///     Series::from_f64s("age", &[30.0, 40.0]),
///     Series::from_strs("color", &["red", "blue"]),
/// ])?;
///
/// let mut pipeline = Pipeline::new()
///     .add("categorical", ColumnSelector::new(ColumnSpec::dtype("object")))
///     .add("encode", GetDummies::new());
///
/// let out = pipeline.fit_transform(&table, None)?;
/// assert_eq!(out.column_names(), vec!["color_blue", "color_red"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<(String, Box<dyn Stage>)>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a named stage.
    pub fn add(mut self, name: impl Into<String>, stage: impl Stage + 'static) -> Self {
        self.steps.push((name.into(), Box::new(stage)));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl Stage for Pipeline {
    fn fit(&mut self, table: &Table, target: Option<&Series>) -> Result<(), TransformError> {
        let mut current = table.clone();
        for (_, stage) in &mut self.steps {
            current = stage.fit_transform(&current, target)?;
        }
        Ok(())
    }

    fn transform(&self, table: &Table) -> Result<Table, TransformError> {
        let mut current = table.clone();
        for (_, stage) in &self.steps {
            current = stage.transform(&current)?;
        }
        Ok(current)
    }

    fn name(&self) -> &'static str {
        "Pipeline"
    }
}
