//! Domain aggregates exposed by the catalog and inquiry layers.

pub mod inquiry;
pub mod package;
pub mod types;
