//! Error types for label and reference-point file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing sidecar files.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error on {path:?}: {source}")]
    Io {
        /// File or directory being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Image dimensions are zero, so coordinates cannot be normalized
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
    },

    /// Image path has no usable file stem to derive a sidecar name from
    #[error("Cannot derive a sidecar name from {path:?}")]
    MissingStem {
        /// The offending image path
        path: PathBuf,
    },
}

impl FormatError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Reject zero-sized images.
    pub fn check_dimensions(width: u32, height: u32) -> Result<(), Self> {
        if width == 0 || height == 0 {
            Err(Self::InvalidDimensions { width, height })
        } else {
            Ok(())
        }
    }
}
