use super::transcoder::{FfmpegTranscoder, Transcoder};
use crate::config::Config;
use crate::tools::{is_converted, mark_converted, scan_video_files, validate_directory_exists};
use anyhow::{Context, Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct VideoConverter<T: Transcoder> {
    config: Config,
    transcoder: T,
    shutdown_signal: Arc<AtomicBool>,
}

/// Outcome of one conversion batch.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub candidates: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub interrupted: bool,
}

impl VideoConverter<FfmpegTranscoder> {
    #[must_use]
    pub fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        let transcoder = FfmpegTranscoder::new(config.settings.video_converter.target_width);
        Self {
            config,
            transcoder,
            shutdown_signal,
        }
    }
}

impl<T: Transcoder> VideoConverter<T> {
    /// Build a converter around a caller-supplied transcoder. Tests use
    /// this to run the batch loop without ffmpeg.
    pub const fn with_transcoder(
        config: Config,
        transcoder: T,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            transcoder,
            shutdown_signal,
        }
    }

    pub fn run(&self, directory: &Path) -> Result<ConversionReport> {
        println!("{}", style("=== video conversion ===").cyan().bold());

        validate_directory_exists(directory)?;
        self.transcoder.ensure_available()?;

        println!("{}", style("scanning for video files...").dim());
        let video_files = scan_video_files(directory, &self.config.file_type_table)?;

        let candidates: Vec<_> = video_files
            .into_iter()
            .filter(|file| !is_converted(&file.path))
            .collect();

        if candidates.is_empty() {
            println!(
                "{}",
                style("no videos to convert (everything already carries the converted marker)")
                    .yellow()
            );
            return Ok(ConversionReport::default());
        }

        println!(
            "{}",
            style(format!("found {} video(s) to convert:", candidates.len())).green()
        );
        for (index, file) in candidates.iter().enumerate() {
            let size_mb = file.size as f64 / 1024.0 / 1024.0;
            println!(
                "  {}. {} ({:.2} MB)",
                index + 1,
                file.path.file_name().unwrap_or_default().to_string_lossy(),
                size_mb
            );
        }
        println!();

        let mut report = ConversionReport {
            candidates: candidates.len(),
            ..ConversionReport::default()
        };

        let progress_bar = ProgressBar::new(candidates.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );

        for file in &candidates {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                report.interrupted = true;
                progress_bar.abandon_with_message("interrupted");
                warn!(
                    "interrupt received, stopping after {} of {} conversions",
                    report.succeeded + report.failed,
                    report.candidates
                );
                break;
            }

            let name = file.path.file_name().unwrap_or_default().to_string_lossy();
            progress_bar.set_message(format!("converting {name}"));

            match self.convert_one(&file.path) {
                Ok(()) => {
                    report.succeeded += 1;
                    progress_bar.println(format!("  {} {name}", style("✓").green()));
                }
                Err(e) => {
                    report.failed += 1;
                    error!("conversion failed for {}: {e:#}", file.path.display());
                    progress_bar.println(format!("  {} {name}: {e:#}", style("✗").red()));
                }
            }
            progress_bar.inc(1);
        }

        if !report.interrupted {
            progress_bar.finish_with_message("done");
        }

        self.print_summary(&report);

        Ok(report)
    }

    /// Convert a single file, replacing the original on success. The
    /// original survives every failure path.
    fn convert_one(&self, source: &Path) -> Result<()> {
        let destination = mark_converted(source);

        if let Err(e) = self.transcoder.transcode(source, &destination) {
            remove_partial_output(&destination);
            return Err(e);
        }

        // a zero-byte output means the tool lied about succeeding
        let metadata = fs::metadata(&destination)
            .with_context(|| format!("transcoder produced no output at {}", destination.display()))?;
        if metadata.len() == 0 {
            remove_partial_output(&destination);
            bail!("transcoder produced an empty file at {}", destination.display());
        }

        fs::remove_file(source).with_context(|| {
            format!(
                "converted, but failed to remove the original {}",
                source.display()
            )
        })?;

        info!(
            "converted: {} -> {}",
            source.display(),
            destination.display()
        );

        Ok(())
    }

    fn print_summary(&self, report: &ConversionReport) {
        println!();
        println!("{}", style("=== conversion summary ===").cyan().bold());
        println!("  candidates: {}", report.candidates);
        println!("  converted: {}", style(report.succeeded).green());
        if report.failed > 0 {
            println!("  failed: {}", style(report.failed).red());
            println!(
                "{}",
                style("failed originals were kept in place, re-run to retry them").yellow()
            );
        }
        if report.interrupted {
            println!("{}", style("batch interrupted, re-run to finish the rest").yellow());
        }

        info!(
            "conversion finished - converted: {}, failed: {}, interrupted: {}",
            report.succeeded, report.failed, report.interrupted
        );
    }
}

fn remove_partial_output(destination: &Path) {
    if destination.exists()
        && let Err(e) = fs::remove_file(destination)
    {
        warn!(
            "could not remove partial output {}: {e}",
            destination.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Writes a fixed payload instead of transcoding.
    struct StubTranscoder {
        payload: &'static [u8],
    }

    impl Transcoder for StubTranscoder {
        fn transcode(&self, _source: &Path, destination: &Path) -> Result<()> {
            fs::write(destination, self.payload)?;
            Ok(())
        }
    }

    /// Fails on the listed file names, succeeds elsewhere.
    struct SelectiveTranscoder {
        fail_on: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl Transcoder for SelectiveTranscoder {
        fn transcode(&self, source: &Path, destination: &Path) -> Result<()> {
            let name = source.file_name().unwrap().to_string_lossy().into_owned();
            self.calls.lock().unwrap().push(name.clone());
            if self.fail_on.contains(&name.as_str()) {
                bail!("simulated transcode failure");
            }
            fs::write(destination, b"converted")?;
            Ok(())
        }
    }

    fn converter<T: Transcoder>(transcoder: T) -> VideoConverter<T> {
        let config = Config::new().unwrap();
        VideoConverter::with_transcoder(config, transcoder, Arc::new(AtomicBool::new(false)))
    }

    #[test]
    fn test_run_converts_and_replaces_originals() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("clip.mp4");
        fs::write(&source, b"original payload").unwrap();

        let report = converter(StubTranscoder { payload: b"small" })
            .run(temp_dir.path())
            .unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 0);
        assert!(!source.exists());
        assert!(temp_dir.path().join("clip_low.mp4").exists());
    }

    #[test]
    fn test_run_skips_files_already_converted() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("clip_low.mp4"), b"already done").unwrap();

        let report = converter(StubTranscoder { payload: b"small" })
            .run(temp_dir.path())
            .unwrap();

        assert_eq!(report.candidates, 0);
        assert!(temp_dir.path().join("clip_low.mp4").exists());
    }

    #[test]
    fn test_failure_keeps_original_and_batch_continues() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("bad.mp4"), b"payload").unwrap();
        fs::write(temp_dir.path().join("good.mp4"), b"payload").unwrap();

        let transcoder = SelectiveTranscoder {
            fail_on: vec!["bad.mp4"],
            calls: Mutex::new(Vec::new()),
        };
        let report = converter(transcoder).run(temp_dir.path()).unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert!(temp_dir.path().join("bad.mp4").exists());
        assert!(!temp_dir.path().join("bad_low.mp4").exists());
        assert!(temp_dir.path().join("good_low.mp4").exists());
    }

    #[test]
    fn test_empty_transcoder_output_counts_as_failure() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("clip.mp4");
        fs::write(&source, b"payload").unwrap();

        let report = converter(StubTranscoder { payload: b"" })
            .run(temp_dir.path())
            .unwrap();

        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed, 1);
        assert!(source.exists());
        assert!(!temp_dir.path().join("clip_low.mp4").exists());
    }

    #[test]
    fn test_shutdown_signal_stops_the_batch() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.mp4"), b"payload").unwrap();
        fs::write(temp_dir.path().join("b.mp4"), b"payload").unwrap();

        let config = Config::new().unwrap();
        let shutdown = Arc::new(AtomicBool::new(true));
        let converter = VideoConverter::with_transcoder(
            config,
            StubTranscoder { payload: b"small" },
            Arc::clone(&shutdown),
        );

        let report = converter.run(temp_dir.path()).unwrap();

        assert!(report.interrupted);
        assert_eq!(report.succeeded, 0);
        assert!(temp_dir.path().join("a.mp4").exists());
        assert!(temp_dir.path().join("b.mp4").exists());
    }
}
