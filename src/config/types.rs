use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const MAX_RECENT_PATHS: usize = 5;

/// Video extension table, embedded at compile time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTypeTable {
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
}

impl FileTypeTable {
    #[must_use]
    pub fn video_extensions_set(&self) -> HashSet<String> {
        self.video_file
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        let video_extensions = self.video_extensions_set();
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| video_extensions.contains(&format!(".{}", ext.to_lowercase())))
    }
}

/// Operator-tunable settings, persisted to `settings.json` beside the
/// binary's working directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub video_converter: VideoConverterSettings,
    pub catalogue: CatalogueSettings,
    pub recent_paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConverterSettings {
    /// Target width in pixels; height follows the aspect ratio.
    pub target_width: u32,
}

impl Default for VideoConverterSettings {
    fn default() -> Self {
        Self { target_width: 640 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogueSettings {
    /// Catalogue filename, written inside the scanned directory.
    pub output_filename: String,
}

impl Default for CatalogueSettings {
    fn default() -> Self {
        Self {
            output_filename: "dataset_info.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file_type_table: FileTypeTable,
    pub settings: UserSettings,
}
