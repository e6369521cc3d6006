use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Column order of the catalogue CSV.
pub const CATALOGUE_HEADER: [&str; 3] = ["file_path", "size_mb", "duration_seconds"];

/// One catalogue row, prior to formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueRecord {
    /// Path relative to the scanned root, with forward slashes as-is.
    pub relative_path: PathBuf,
    pub size_bytes: u64,
    pub duration_seconds: f64,
}

impl CatalogueRecord {
    #[must_use]
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }
}

/// Write the records as CSV. Numeric columns are fixed to two decimals so
/// the catalogue diffs cleanly between runs.
pub fn write_catalogue(output_path: &Path, records: &[CatalogueRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("failed to create catalogue at {}", output_path.display()))?;

    writer.write_record(CATALOGUE_HEADER)?;
    for record in records {
        writer.write_record([
            record.relative_path.to_string_lossy().into_owned(),
            format!("{:.2}", record.size_mb()),
            format!("{:.2}", record.duration_seconds),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write catalogue at {}", output_path.display()))?;

    Ok(())
}
