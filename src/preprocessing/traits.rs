//! The stage contract shared by every transformer.

use crate::frame::{Series, Table};
use crate::preprocessing::error::TransformError;

/// A fit/transform unit composable into a pipeline.
///
/// The pipeline driver owns stage instances and table values and calls `fit`
/// then `transform` (or [`Stage::fit_transform`]) on each stage in sequence,
/// feeding one stage's output table to the next. The trait is
/// object-safe so heterogeneous stages can be driven through
/// `Box<dyn Stage>`.
///
/// # Lifecycle
///
/// A stage is constructed with its configuration, which is immutable
/// afterwards. `fit` populates learned state exactly once per logical
/// training; `transform` may be called any number of times and never mutates
/// learned state. Stateful stages store their learned state as an explicit
/// value behind an `Option` and fail with [`TransformError::NotFitted`] when
/// transformed unfit.
///
/// # Concurrency
///
/// Stages are `Send + Sync`; once `fit` has completed (and is published with
/// a happens-before edge, e.g. by moving the stage into worker threads
/// afterwards), concurrent `transform` calls on distinct tables are safe:
/// `transform` takes `&self` and no stage holds a reference to any table
/// past the call that received it.
pub trait Stage: Send + Sync {
    /// Learn state from the training table. The optional target is accepted
    /// for pipeline compatibility; no built-in stage reads it.
    ///
    /// # Errors
    /// Stage-specific; see each stage. Stateless stages never fail here.
    fn fit(&mut self, table: &Table, target: Option<&Series>) -> Result<(), TransformError>;

    /// Produce the transformed table. Must not mutate learned state.
    fn transform(&self, table: &Table) -> Result<Table, TransformError>;

    /// Fit on the table, then transform it.
    fn fit_transform(
        &mut self,
        table: &Table,
        target: Option<&Series>,
    ) -> Result<Table, TransformError> {
        self.fit(table, target)?;
        self.transform(table)
    }

    /// Stage name for diagnostics.
    fn name(&self) -> &'static str;
}
