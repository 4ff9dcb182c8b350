//! Categorical encoding stages.
//!
//! One encoder lives here: [`GetDummies`], whose defining property is a
//! fit-time-frozen output schema. The plain expansion it builds on is a
//! table capability ([`crate::frame::Table::get_dummies`]); this module adds
//! the schema bookkeeping that makes the expansion stable across batches.

mod get_dummies;

pub use get_dummies::{FrozenSchema, GetDummies};
