//! Filename and directory name normalization component.
//!
//! Rewrites every name under a directory into a lowercase ASCII slug.

mod main;
mod slug;

pub use main::{NameNormalizer, NormalizeReport};
pub use slug::NameSlugger;
