//! Shared primitives: error taxonomy, page geometry, clock.

pub mod core;
pub mod error;
