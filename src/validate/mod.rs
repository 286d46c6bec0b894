//! Pure per-field validation.

pub mod field;
