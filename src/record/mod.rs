//! The letter record and the catalog of form fields.

pub mod fields;
pub mod letter;
