//! # Domain Layer (Inner Hexagon)
//!
//! Pure registry logic with no I/O: the project record, the ledger that
//! owns all state, and the invariant checks run against it.

pub mod entities;
pub mod invariants;
pub mod ledger;

pub use entities::*;
pub use invariants::*;
pub use ledger::*;
