//! Media metadata probing.
//!
//! The catalogue needs per-file durations, which come from an external
//! prober. The `MediaProber` trait is the seam that lets tests run
//! without an ffprobe binary on the machine.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// Metadata for one video file.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub duration_seconds: f64,
    pub width: u32,
    pub height: u32,
}

/// Narrow interface over the external media prober.
pub trait MediaProber {
    fn probe(&self, path: &Path) -> Result<VideoInfo>;
}

/// Probes files by running `ffprobe` and reading its JSON output.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfprobeProber;

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
}

impl MediaProber for FfprobeProber {
    fn probe(&self, path: &Path) -> Result<VideoInfo> {
        let output = Command::new("ffprobe")
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output()
            .with_context(|| format!("failed to run ffprobe on {}", path.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("ffprobe failed on {}: {}", path.display(), stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_probe_output(&stdout, path)
    }
}

/// Parse ffprobe JSON. Duration comes from the container format first,
/// falling back to the video stream.
fn parse_probe_output(json: &str, path: &Path) -> Result<VideoInfo> {
    let probe: FfprobeOutput = serde_json::from_str(json)
        .with_context(|| format!("unparseable ffprobe output for {}", path.display()))?;

    let video_stream = probe
        .streams
        .as_ref()
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some("video"))
        })
        .ok_or_else(|| anyhow::anyhow!("no video stream in {}", path.display()))?;

    let width = video_stream
        .width
        .ok_or_else(|| anyhow::anyhow!("missing video width for {}", path.display()))?;
    let height = video_stream
        .height
        .ok_or_else(|| anyhow::anyhow!("missing video height for {}", path.display()))?;

    let duration_seconds = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .or(video_stream.duration.as_ref())
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| anyhow::anyhow!("missing duration for {}", path.display()))?;

    Ok(VideoInfo {
        duration_seconds,
        width,
        height,
    })
}
