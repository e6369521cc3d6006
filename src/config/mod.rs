pub mod load;
pub mod save;
pub mod types;

pub use types::{
    CatalogueSettings, Config, FileTypeTable, MAX_RECENT_PATHS, UserSettings,
    VideoConverterSettings,
};
