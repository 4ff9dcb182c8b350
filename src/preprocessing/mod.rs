//! Table-to-table transformation stages.
//!
//! Every stage implements the [`Stage`] contract (`fit`, `transform`,
//! `fit_transform`) and is driven by an external pipeline driver, or by the
//! bundled [`Pipeline`] convenience, which is itself a stage.
//!
//! # Available Stages
//!
//! ## Selection
//! - [`ColumnSelector`]: keep columns by explicit list, type tag, or predicate
//! - [`RowSelector`]: keep rows by label list or predicate
//!
//! ## Encoding
//! - [`GetDummies`]: dummy encoding with a fit-time-frozen output schema
//!
//! ## Adapters
//! - [`ApplyTable`]: wrap an arbitrary table-to-table function
//! - [`TableMethod`]: wrap a named table-level operation
//!
//! ## Numeric wrappers
//! - [`StandardScaler`], [`MinMaxScaler`], [`QuantileTransformer`]: scaling
//!   with column-name and row-index bookkeeping
//! - [`Pca`]: projection onto principal components
//!
//! # Example
//!
//! ```
//! use tableprep::frame::{Series, Table};
//! use tableprep::preprocessing::{GetDummies, Stage};
//!
//! let train = Table::from_columns(vec![
//!     Series::from_strs("color", &["red", "red", "blue"]),
//! ])?;
//!
//! let mut encoder = GetDummies::new();
//! encoder.fit(&train, None)?;
//!
//! // every later batch comes back in the same two-column shape
//! let batch = Table::from_columns(vec![Series::from_strs("color", &["green"])])?;
//! assert_eq!(encoder.transform(&batch)?.n_columns(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapters;
pub mod decomposition;
pub mod encoding;
pub mod error;
pub mod pipeline;
pub mod selection;
pub mod selector;
pub mod scaling;
pub mod traits;

pub use adapters::{ApplyTable, TableFn, TableMethod, TableOp};
pub use decomposition::{Pca, PcaState};
pub use encoding::{FrozenSchema, GetDummies};
pub use error::TransformError;
pub use pipeline::Pipeline;
pub use selection::{ColumnSelector, RowSelector};
pub use selector::{ColumnSpec, Predicate, RowSpec, Selection, TypeSelector};
pub use scaling::{
    MinMaxScaler, MinMaxScalerState, QuantileTransformer, QuantileTransformerState,
    StandardScaler, StandardScalerState,
};
pub use traits::Stage;
