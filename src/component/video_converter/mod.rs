//! Video downscale conversion component.
//!
//! Feeds every unconverted video through ffmpeg and swaps the original
//! for the reduced-resolution result.

mod main;
mod transcoder;

pub use main::{ConversionReport, VideoConverter};
pub use transcoder::{FfmpegTranscoder, Transcoder};
