//! Pipeline stage components.
//!
//! Each submodule implements one stage, with its own helpers alongside.

pub mod catalogue_builder;
pub mod name_normalizer;
pub mod pipeline;
pub mod video_converter;

pub use catalogue_builder::CatalogueBuilder;
pub use name_normalizer::NameNormalizer;
pub use pipeline::run_full_pipeline;
pub use video_converter::VideoConverter;
