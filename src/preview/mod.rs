//! Preview page: projection of the submitted letter, zoom, shortcuts and the export region.

pub mod display;
pub mod page;
pub mod region;
pub mod shortcuts;
pub mod zoom;
