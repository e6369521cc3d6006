//! Name normalization stage.
//!
//! Walks the tree contents-first so a directory is renamed only after
//! everything inside it has been handled; paths computed for deeper
//! entries are never invalidated.

use super::slug::NameSlugger;
use crate::tools::validate_directory_exists;
use anyhow::Result;
use console::style;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::WalkDir;

pub struct NameNormalizer {
    shutdown_signal: Arc<AtomicBool>,
    slugger: NameSlugger,
}

/// Outcome of one normalization pass, including the full audit trail of
/// renames.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    pub files_renamed: usize,
    pub directories_renamed: usize,
    pub collisions: usize,
    pub errors: usize,
    /// Before/after name pairs, in the order the renames happened.
    pub renames: Vec<(String, String)>,
}

impl NormalizeReport {
    #[must_use]
    pub fn total_renamed(&self) -> usize {
        self.files_renamed + self.directories_renamed
    }
}

impl NameNormalizer {
    #[must_use]
    pub fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            shutdown_signal,
            slugger: NameSlugger::new(),
        }
    }

    pub fn run(&self, directory: &Path) -> Result<NormalizeReport> {
        println!("{}", style("=== name normalization ===").cyan().bold());

        validate_directory_exists(directory)?;

        info!("normalizing names under {}", directory.display());
        println!("{}", style("scanning and renaming...").dim());

        let mut report = NormalizeReport::default();

        // contents_first yields children before their parent directory
        for entry in WalkDir::new(directory)
            .follow_links(false)
            .contents_first(true)
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("interrupt received, stopping the normalization pass");
                break;
            }

            // never rename the root the operator pointed us at
            if entry.depth() == 0 {
                continue;
            }

            self.normalize_entry(entry.path(), entry.file_type().is_dir(), &mut report);
        }

        self.print_summary(&report);

        Ok(report)
    }

    fn normalize_entry(&self, path: &Path, is_dir: bool, report: &mut NormalizeReport) {
        let old_name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => return,
        };

        let new_name = self.slugger.normalize(&old_name);
        if new_name == old_name {
            return;
        }

        let parent = path.parent().unwrap_or(Path::new("."));
        let (new_path, collided) = collision_free_path(parent, &new_name);
        let final_name = new_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(new_name);

        match fs::rename(path, &new_path) {
            Ok(()) => {
                if collided {
                    report.collisions += 1;
                    warn!("collision: {old_name} normalized to an existing name, using {final_name}");
                }
                if is_dir {
                    report.directories_renamed += 1;
                } else {
                    report.files_renamed += 1;
                }
                info!("renamed: {old_name} -> {final_name}");
                println!("  {old_name} {} {final_name}", style("->").dim());
                report.renames.push((old_name, final_name));
            }
            Err(e) => {
                report.errors += 1;
                error!("failed to rename {}: {e}", path.display());
            }
        }
    }

    fn print_summary(&self, report: &NormalizeReport) {
        println!();
        println!("{}", style("=== normalization summary ===").cyan().bold());

        if report.total_renamed() == 0 && report.errors == 0 {
            println!("{}", style("all names already normalized").green());
        } else {
            println!("  files renamed: {}", style(report.files_renamed).green());
            println!(
                "  directories renamed: {}",
                style(report.directories_renamed).green()
            );
        }
        if report.collisions > 0 {
            println!(
                "  collisions resolved with suffixes: {}",
                style(report.collisions).yellow()
            );
        }
        if report.errors > 0 {
            println!("  errors: {}", style(report.errors).red());
        }

        info!(
            "normalization finished - files: {}, directories: {}, collisions: {}, errors: {}",
            report.files_renamed, report.directories_renamed, report.collisions, report.errors
        );
    }
}

/// Pick a rename target that does not clobber an existing entry. When
/// `desired` is taken, append `_2`, `_3`, ... to the stem until free.
fn collision_free_path(parent: &Path, desired: &str) -> (PathBuf, bool) {
    let direct = parent.join(desired);
    if !direct.exists() {
        return (direct, false);
    }

    let desired_path = Path::new(desired);
    let stem = desired_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(desired);
    let extension = desired_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    for n in 2u32.. {
        let candidate = parent.join(format!("{stem}_{n}{extension}"));
        if !candidate.exists() {
            return (candidate, true);
        }
    }
    unreachable!("suffix search never terminates without a free name")
}
