mod marker;
mod path_validator;
mod probe;
mod video_scanner;

pub use marker::{CONVERTED_MARKER, is_converted, mark_converted};
pub use path_validator::validate_directory_exists;
pub use probe::{FfprobeProber, MediaProber, VideoInfo};
pub use video_scanner::{VideoFileInfo, scan_video_files};
