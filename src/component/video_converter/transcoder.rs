use anyhow::{Result, bail};
use std::path::Path;
use std::process::Command;

/// Seam over the external transcode tool so the batch loop can be
/// exercised without ffmpeg on the machine.
pub trait Transcoder {
    /// Produce `destination` from `source`. Must only return `Ok` when the
    /// tool exited successfully.
    fn transcode(&self, source: &Path, destination: &Path) -> Result<()>;

    /// Check that the tool can actually be launched.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }
}

/// Invokes the `ffmpeg` binary to downscale a video to a fixed width,
/// keeping the aspect ratio and copying the audio stream untouched.
pub struct FfmpegTranscoder {
    target_width: u32,
}

impl FfmpegTranscoder {
    #[must_use]
    pub const fn new(target_width: u32) -> Self {
        Self { target_width }
    }

    #[must_use]
    pub fn build_command(&self, source: &Path, destination: &Path) -> Command {
        let mut cmd = Command::new("ffmpeg");

        cmd.args(["-nostdin", "-hide_banner", "-loglevel", "error", "-y", "-i"]);
        cmd.arg(source);
        // -2 keeps the height even, as most encoders require
        cmd.args(["-vf", &format!("scale={}:-2", self.target_width)]);
        cmd.args(["-c:a", "copy"]);
        cmd.arg(destination);

        cmd
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, source: &Path, destination: &Path) -> Result<()> {
        let output = self.build_command(source, destination).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "ffmpeg failed on {} (exit: {}): {}",
                source.display(),
                output.status,
                stderr.trim()
            );
        }

        Ok(())
    }

    fn ensure_available(&self) -> Result<()> {
        let result = Command::new("ffmpeg").arg("-version").output();

        match result {
            Ok(output) if output.status.success() => Ok(()),
            _ => bail!(
                "ffmpeg is not installed or not in PATH (install with: sudo apt install ffmpeg)"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn command_args(transcoder: &FfmpegTranscoder) -> Vec<String> {
        transcoder
            .build_command(Path::new("/videos/in.mp4"), Path::new("/videos/in_low.mp4"))
            .get_args()
            .map(|a: &OsStr| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_build_command_scales_to_target_width() {
        let args = command_args(&FfmpegTranscoder::new(640));
        let scale_pos = args.iter().position(|a| a == "-vf").unwrap();
        assert_eq!(args[scale_pos + 1], "scale=640:-2");
    }

    #[test]
    fn test_build_command_copies_audio() {
        let args = command_args(&FfmpegTranscoder::new(640));
        let codec_pos = args.iter().position(|a| a == "-c:a").unwrap();
        assert_eq!(args[codec_pos + 1], "copy");
    }

    #[test]
    fn test_build_command_never_prompts() {
        let args = command_args(&FfmpegTranscoder::new(640));
        assert!(args.iter().any(|a| a == "-nostdin"));
        assert!(args.iter().any(|a| a == "-y"));
    }

    #[test]
    fn test_build_command_ends_with_source_then_destination() {
        let args = command_args(&FfmpegTranscoder::new(1280));
        let input_pos = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[input_pos + 1], "/videos/in.mp4");
        assert_eq!(args.last().unwrap(), "/videos/in_low.mp4");
    }
}
