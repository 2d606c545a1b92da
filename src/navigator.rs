//! Image list and position within it.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::IMAGE_EXTENSIONS;

/// Errors from discovering or probing images.
#[derive(Error, Debug)]
pub enum ImageSourceError {
    #[error("Failed to read folder {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("No readable images found")]
    NoReadableImages,
}

/// Reports the pixel size of an image.
pub trait ImageSource {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ImageSourceError>;
}

/// Reads dimensions from image headers on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageSource;

impl ImageSource for FileImageSource {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ImageSourceError> {
        image::image_dimensions(path).map_err(|source| ImageSourceError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Check if a path has a supported image extension.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Discover image files in a folder, non-recursively, sorted by name.
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>, ImageSourceError> {
    let mut images: Vec<PathBuf> = std::fs::read_dir(folder)
        .map_err(|source| ImageSourceError::Io {
            path: folder.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_image_file(path))
        .collect();

    // File names are timestamps in capture order, so name order is time order
    images.sort();
    log::info!("Found {} images in {:?}", images.len(), folder);
    Ok(images)
}

/// The image on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentImage {
    pub index: usize,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Now showing a different image.
    Moved,
    /// Already on the first readable image.
    AtStart,
    /// Walked off the end of the list; the session is over.
    Finished,
}

/// Ordered image list with a cursor that skips unreadable images.
pub struct SessionNavigator {
    images: Vec<PathBuf>,
    current: CurrentImage,
    source: Box<dyn ImageSource>,
}

impl std::fmt::Debug for SessionNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionNavigator")
            .field("images", &self.images.len())
            .field("current", &self.current)
            .finish()
    }
}

impl SessionNavigator {
    /// Open the list at the first readable image.
    pub fn open(
        images: Vec<PathBuf>,
        source: Box<dyn ImageSource>,
    ) -> Result<Self, ImageSourceError> {
        let current = probe_from(&images, source.as_ref(), 0..images.len())
            .ok_or(ImageSourceError::NoReadableImages)?;
        Ok(Self {
            images,
            current,
            source,
        })
    }

    pub fn current(&self) -> &CurrentImage {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Move to the next readable image.
    pub fn advance(&mut self) -> NavOutcome {
        let start = self.current.index + 1;
        match probe_from(&self.images, self.source.as_ref(), start..self.images.len()) {
            Some(next) => {
                self.current = next;
                NavOutcome::Moved
            }
            None => NavOutcome::Finished,
        }
    }

    /// Move to the previous readable image. Never goes below the first one.
    pub fn retreat(&mut self) -> NavOutcome {
        let range = (0..self.current.index).rev();
        match probe_from(&self.images, self.source.as_ref(), range) {
            Some(prev) => {
                self.current = prev;
                NavOutcome::Moved
            }
            None => NavOutcome::AtStart,
        }
    }

    /// Path and size of the image just before the current one.
    ///
    /// Only the immediately preceding entry is considered; if it cannot be
    /// read there is nothing to copy from.
    pub fn previous_image(&self) -> Option<CurrentImage> {
        let index = self.current.index.checked_sub(1)?;
        let path = &self.images[index];
        match self.source.dimensions(path) {
            Ok((width, height)) => Some(CurrentImage {
                index,
                path: path.clone(),
                width,
                height,
            }),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    }

    /// Window title like `[3/15] frame_0003.jpg`.
    pub fn progress(&self) -> String {
        let name = self
            .current
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Unknown");
        format!("[{}/{}] {}", self.current.index + 1, self.images.len(), name)
    }
}

/// First image in `range` whose dimensions can be read. Unreadable ones are skipped.
fn probe_from(
    images: &[PathBuf],
    source: &dyn ImageSource,
    range: impl Iterator<Item = usize>,
) -> Option<CurrentImage> {
    for index in range {
        let path = &images[index];
        match source.dimensions(path) {
            Ok((width, height)) if width > 0 && height > 0 => {
                return Some(CurrentImage {
                    index,
                    path: path.clone(),
                    width,
                    height,
                });
            }
            Ok(_) => log::warn!("Skipping zero-sized image {:?}", path),
            Err(e) => log::warn!("Skipping image: {}", e),
        }
    }
    None
}
