//! User-facing notification and confirmation ports.

pub mod port;
