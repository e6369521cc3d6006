//! Converted-file naming convention.
//!
//! The `_low` stem suffix is the contract between the converter (skip
//! marked files) and the catalogue builder (include only marked files).
//! Both sides go through this module; nothing else does its own string
//! check.

use std::path::{Path, PathBuf};

/// Stem suffix identifying a file that already went through resolution
/// conversion.
pub const CONVERTED_MARKER: &str = "_low";

/// Whether the file stem carries the converted marker.
///
/// Only the suffix position counts, so `arm_lower.mp4` is not treated
/// as converted.
#[must_use]
pub fn is_converted(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(CONVERTED_MARKER))
}

/// Companion path for the converted variant of `path`, in the same
/// directory: `video.mp4` -> `video_low.mp4`.
#[must_use]
pub fn mark_converted(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}{CONVERTED_MARKER}{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_converted_simple() {
        assert_eq!(
            mark_converted(Path::new("/videos/baby.mp4")),
            Path::new("/videos/baby_low.mp4")
        );
    }

    #[test]
    fn test_mark_converted_with_dots() {
        assert_eq!(
            mark_converted(Path::new("/videos/session.day2.mov")),
            Path::new("/videos/session.day2_low.mov")
        );
    }

    #[test]
    fn test_mark_converted_without_extension() {
        assert_eq!(
            mark_converted(Path::new("/videos/clip")),
            Path::new("/videos/clip_low")
        );
    }

    #[test]
    fn test_is_converted_detects_marked_files() {
        assert!(is_converted(Path::new("/videos/baby_low.mp4")));
        assert!(!is_converted(Path::new("/videos/baby.mp4")));
    }

    #[test]
    fn test_is_converted_ignores_marker_mid_stem() {
        assert!(!is_converted(Path::new("/videos/arm_lower.mp4")));
        assert!(!is_converted(Path::new("/videos/slow.mp4")));
    }

    #[test]
    fn test_mark_and_check_are_inverses() {
        let marked = mark_converted(Path::new("video_1_bebe.mov"));
        assert!(is_converted(&marked));
    }
}
