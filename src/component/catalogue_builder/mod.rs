//! Dataset catalogue component.
//!
//! Collects every converted video into a CSV of path, size and duration.

mod main;
mod table;

pub use main::{CatalogueBuilder, CatalogueReport};
pub use table::{CATALOGUE_HEADER, CatalogueRecord, write_catalogue};
