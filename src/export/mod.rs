//! Export pipeline: snapshot the preview region, assemble a PDF, hand it to a download sink.

pub mod assembly;
pub mod download;
pub mod filename;
pub mod snapshot;
pub mod trigger;
