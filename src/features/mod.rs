//! Feature modules for tally.
//!
//! Each submodule is a self-contained engine over the data model:
//! streak computation, recurring todo generation, analytics aggregation,
//! review generation, and quick-add parsing.

pub mod analytics;
pub mod nlp;
pub mod recurrence;
pub mod review;
pub mod streaks;
