//! Sidecar file formats.
//!
//! - **YOLO TXT**: per-image label files with normalized box coordinates
//! - **Reference points**: per-image `x,y` marker lists, read-only for the editor
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bbat::format::YoloCodec;
//!
//! let codec = YoloCodec::new("dataset/labels");
//! codec.save(Path::new("dataset/images/a.jpg"), &labels, 800, 600)?;
//! let labels = codec.load(Path::new("dataset/images/a.jpg"), 800, 600)?;
//! ```

mod error;
mod points;
mod yolo;

#[cfg(test)]
mod tests;

use std::path::Path;

pub use error::FormatError;
pub use points::{PointsReader, parse_point_line};
pub use yolo::{YoloCodec, decode_line, encode_line};

/// File stem of an image, used to name its sidecar files.
pub(crate) fn file_stem(image_path: &Path) -> Result<&str, FormatError> {
    image_path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| FormatError::MissingStem {
            path: image_path.to_path_buf(),
        })
}
