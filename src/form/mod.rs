//! Form page controller.

pub mod controller;
