//! # Domain Layer
//!
//! Pure read-model logic: listing shape, queries, aggregates, submission
//! preparation and form validation.

pub mod forms;
pub mod listing;
pub mod query;
pub mod stats;
pub mod submission;

pub use forms::*;
pub use listing::*;
pub use query::*;
pub use stats::*;
pub use submission::*;
