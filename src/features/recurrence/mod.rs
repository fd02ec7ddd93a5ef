//! Recurring todo engine.
//!
//! Computes next occurrences for recurring todo templates and generates
//! instance todos when a template comes due. The engine is stateless:
//! every function takes a snapshot and an explicit clock value.

mod engine;

pub use engine::{
    due_instances, generate_instance, has_instance_on_day, next_occurrence, should_generate_next,
};
