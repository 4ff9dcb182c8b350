//! # tableprep
//!
//! Composable fit/transform stages over named-column tables.
//!
//! A pipeline driver calls `fit` then `transform` on each stage in sequence,
//! feeding the output table of one stage into the next. Stages cover
//! flexible column/row selection, schema-consistent dummy encoding, function
//! and method adapters, and numeric scaling/PCA wrappers that keep column
//! names and the row index attached to their output.
//!
//! ## Core Design
//!
//! - **Explicit learned state**: a stateful stage's fit result (e.g. the
//!   encoder's frozen output schema) is a plain serializable value, stored
//!   once at fit time and never mutated by `transform`.
//! - **Tagged selector specs**: what to select is an enum resolved by
//!   exhaustive matching against the table at call time, not runtime type
//!   dispatch.
//! - **Composition at the numeric seam**: scaling and decomposition math
//!   lives in engines that consume and return bare arrays; stages wrap an
//!   engine value and do only label/index bookkeeping.
//!
//! ## Quick Start
//!
//! ```
//! use tableprep::frame::{Series, Table};
//! use tableprep::preprocessing::{GetDummies, Stage};
//!
//! let train = Table::from_columns(vec![
//!     Series::from_i64s("age", &[30, 40, 50]),
//!     Series::from_strs("color", &["red", "red", "blue"]),
//! ])?;
//!
//! let mut encoder = GetDummies::new();
//! let encoded = encoder.fit_transform(&train, None)?;
//! assert_eq!(encoded.column_names(), vec!["age", "color_blue", "color_red"]);
//!
//! // a batch with a missing and an unseen category keeps the frozen shape
//! let batch = Table::from_columns(vec![
//!     Series::from_i64s("age", &[25]),
//!     Series::from_strs("color", &["green"]),
//! ])?;
//! assert_eq!(encoder.transform(&batch)?.column_names(), encoded.column_names());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Structure
//!
//! - `frame` — the tabular collaborator: scalars, row index, columns, tables
//! - `preprocessing` — the stages and the [`preprocessing::Stage`] contract
//! - `numeric` — bare-array stats and decomposition engines
//! - `serialization` — byte-level round-tripping of learned state

/// The tabular collaborator: named columns over a shared row index.
pub mod frame;

/// Bare-array numeric engines backing the scaler and PCA stages.
pub mod numeric;

/// Transformation stages and the stage contract.
pub mod preprocessing;

/// Persistence of learned stage state.
pub mod serialization;

pub use frame::{DType, DummyOptions, FrameError, Label, PrefixSpec, RowIndex, Scalar, Series, Table};
pub use preprocessing::{Stage, TransformError};
