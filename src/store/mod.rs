//! Session-scoped draft/final persistence over an injectable key-value backend.

pub mod backend;
pub mod draft;
