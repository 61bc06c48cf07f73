//! # Adapters Layer (Outer Hexagon)
//!
//! Implementations of the outbound ports.

pub mod clock;

pub use clock::*;
