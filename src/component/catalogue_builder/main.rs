use super::table::{CatalogueRecord, write_catalogue};
use crate::config::Config;
use crate::tools::{
    CONVERTED_MARKER, FfprobeProber, MediaProber, is_converted, scan_video_files,
    validate_directory_exists,
};
use anyhow::{Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct CatalogueBuilder<P: MediaProber> {
    config: Config,
    prober: P,
    shutdown_signal: Arc<AtomicBool>,
}

/// Outcome of one catalogue run.
#[derive(Debug)]
pub struct CatalogueReport {
    pub rows_written: usize,
    pub probe_failures: usize,
    pub output_path: PathBuf,
}

impl CatalogueBuilder<FfprobeProber> {
    #[must_use]
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            prober: FfprobeProber,
            shutdown_signal,
        }
    }
}

impl<P: MediaProber> CatalogueBuilder<P> {
    /// Build around a caller-supplied prober. Tests use this to run the
    /// catalogue without ffprobe.
    pub const fn with_prober(
        config: Config,
        prober: P,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            prober,
            shutdown_signal,
        }
    }

    pub fn run(&self, directory: &Path) -> Result<CatalogueReport> {
        println!("{}", style("=== dataset catalogue ===").cyan().bold());

        validate_directory_exists(directory)?;

        println!("{}", style("scanning for converted videos...").dim());
        let video_files = scan_video_files(directory, &self.config.file_type_table)?;

        let converted: Vec<_> = video_files
            .into_iter()
            .filter(|file| is_converted(&file.path))
            .collect();

        if converted.is_empty() {
            bail!(
                "no converted video files (stem ending in \"{CONVERTED_MARKER}\") under {}, run the conversion stage first",
                directory.display()
            );
        }

        let progress_bar = ProgressBar::new(converted.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        progress_bar.set_message("probing durations...");

        let mut records = Vec::with_capacity(converted.len());
        let mut probe_failures = 0usize;

        for file in &converted {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                progress_bar.abandon_with_message("interrupted");
                bail!("interrupted before the catalogue was written");
            }

            let duration_seconds = match self.prober.probe(&file.path) {
                Ok(video_info) => {
                    debug!(
                        "probed {}: {}x{}, {:.2}s",
                        file.path.display(),
                        video_info.width,
                        video_info.height,
                        video_info.duration_seconds
                    );
                    video_info.duration_seconds
                }
                Err(e) => {
                    probe_failures += 1;
                    warn!(
                        "could not probe {}: {e:#}, recording zero duration",
                        file.path.display()
                    );
                    0.0
                }
            };

            let relative_path = file
                .path
                .strip_prefix(directory)
                .unwrap_or(&file.path)
                .to_path_buf();

            records.push(CatalogueRecord {
                relative_path,
                size_bytes: file.size,
                duration_seconds,
            });
            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("done");

        let output_path = directory.join(&self.config.settings.catalogue.output_filename);
        write_catalogue(&output_path, &records)?;

        let report = CatalogueReport {
            rows_written: records.len(),
            probe_failures,
            output_path,
        };
        self.print_summary(&report);

        Ok(report)
    }

    fn print_summary(&self, report: &CatalogueReport) {
        println!();
        println!("{}", style("=== catalogue summary ===").cyan().bold());
        println!("  rows written: {}", style(report.rows_written).green());
        if report.probe_failures > 0 {
            println!(
                "  files with unreadable duration: {}",
                style(report.probe_failures).yellow()
            );
        }
        println!("  catalogue: {}", report.output_path.display());

        info!(
            "catalogue finished - rows: {}, probe failures: {}, output: {}",
            report.rows_written,
            report.probe_failures,
            report.output_path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::VideoInfo;
    use std::fs;
    use tempfile::TempDir;

    /// Reports a fixed duration for every file.
    struct StubProber {
        duration_seconds: f64,
    }

    impl MediaProber for StubProber {
        fn probe(&self, _path: &Path) -> Result<VideoInfo> {
            Ok(VideoInfo {
                duration_seconds: self.duration_seconds,
                width: 640,
                height: 360,
            })
        }
    }

    /// Fails every probe.
    struct BrokenProber;

    impl MediaProber for BrokenProber {
        fn probe(&self, path: &Path) -> Result<VideoInfo> {
            bail!("simulated probe failure for {}", path.display())
        }
    }

    fn builder<P: MediaProber>(prober: P) -> CatalogueBuilder<P> {
        let config = Config::new().unwrap();
        CatalogueBuilder::with_prober(config, prober, Arc::new(AtomicBool::new(false)))
    }

    #[test]
    fn test_run_catalogues_only_converted_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("raw.mp4"), b"unconverted").unwrap();
        fs::write(temp_dir.path().join("clip_low.mp4"), vec![0u8; 1024]).unwrap();

        let report = builder(StubProber {
            duration_seconds: 42.0,
        })
        .run(temp_dir.path())
        .unwrap();

        assert_eq!(report.rows_written, 1);
        let content = fs::read_to_string(report.output_path).unwrap();
        assert!(content.contains("clip_low.mp4"));
        assert!(!content.contains("raw.mp4"));
        assert!(content.contains("42.00"));
    }

    #[test]
    fn test_run_records_paths_relative_to_the_root() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("session_1");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("clip_low.mp4"), b"payload").unwrap();

        let report = builder(StubProber {
            duration_seconds: 1.0,
        })
        .run(temp_dir.path())
        .unwrap();

        let content = fs::read_to_string(report.output_path).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert!(row.starts_with(&format!("session_1{}clip_low.mp4", std::path::MAIN_SEPARATOR)));
    }

    #[test]
    fn test_probe_failure_records_zero_duration() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("clip_low.mp4"), b"payload").unwrap();

        let report = builder(BrokenProber).run(temp_dir.path()).unwrap();

        assert_eq!(report.rows_written, 1);
        assert_eq!(report.probe_failures, 1);
        let content = fs::read_to_string(report.output_path).unwrap();
        assert!(content.lines().nth(1).unwrap().ends_with(",0.00"));
    }

    #[test]
    fn test_run_fails_when_nothing_is_converted() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("raw.mp4"), b"unconverted").unwrap();

        let result = builder(StubProber {
            duration_seconds: 1.0,
        })
        .run(temp_dir.path());

        let message = result.unwrap_err().to_string();
        assert!(message.contains("no converted video files"));
    }
}
