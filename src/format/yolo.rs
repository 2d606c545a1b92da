//! YOLO TXT label codec.
//!
//! One text file per image, one line per box:
//! `<class_id> <x_center> <y_center> <width> <height>`, with the four
//! geometric values normalized by the image width/height and written with
//! six decimals.

use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_CLASS_ID, LABEL_PRECISION, LABEL_VALUE_RANGE};
use crate::format::error::FormatError;
use crate::format::file_stem;
use crate::model::{BoundingBox, LabelSet};

/// Reads and writes per-image YOLO label files inside one labels directory.
#[derive(Debug, Clone)]
pub struct YoloCodec {
    labels_dir: PathBuf,
    class_id: u32,
}

impl YoloCodec {
    pub fn new(labels_dir: impl Into<PathBuf>) -> Self {
        Self {
            labels_dir: labels_dir.into(),
            class_id: DEFAULT_CLASS_ID,
        }
    }

    /// Set the class id written for every box.
    pub fn with_class_id(mut self, class_id: u32) -> Self {
        self.class_id = class_id;
        self
    }

    pub fn labels_dir(&self) -> &Path {
        &self.labels_dir
    }

    pub fn class_id(&self) -> u32 {
        self.class_id
    }

    /// Label file for an image: `<labels_dir>/<stem>.txt`.
    pub fn label_path(&self, image_path: &Path) -> Result<PathBuf, FormatError> {
        let stem = file_stem(image_path)?;
        Ok(self.labels_dir.join(format!("{}.txt", stem)))
    }

    /// Write all boxes for an image, replacing any previous file.
    ///
    /// Returns the path written.
    pub fn save(
        &self,
        image_path: &Path,
        labels: &LabelSet,
        width: u32,
        height: u32,
    ) -> Result<PathBuf, FormatError> {
        FormatError::check_dimensions(width, height)?;
        let txt_path = self.label_path(image_path)?;

        std::fs::create_dir_all(&self.labels_dir)
            .map_err(|e| FormatError::io(&self.labels_dir, e))?;

        let content: String = labels
            .iter()
            .map(|bbox| encode_line(self.class_id, bbox, width, height) + "\n")
            .collect();
        std::fs::write(&txt_path, content).map_err(|e| FormatError::io(&txt_path, e))?;

        log::info!("💾 Saved {} boxes to {:?}", labels.len(), txt_path);
        Ok(txt_path)
    }

    /// Read the boxes for an image. A missing file yields an empty set.
    pub fn load(&self, image_path: &Path, width: u32, height: u32) -> Result<LabelSet, FormatError> {
        FormatError::check_dimensions(width, height)?;
        let txt_path = self.label_path(image_path)?;

        let content = match std::fs::read_to_string(&txt_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No label file at {:?}", txt_path);
                return Ok(LabelSet::new());
            }
            Err(e) => return Err(FormatError::io(&txt_path, e)),
        };

        let labels: LabelSet = content
            .lines()
            .filter_map(|line| {
                let decoded = decode_line(line, width, height);
                if decoded.is_none() && !line.trim().is_empty() {
                    log::debug!("Skipping malformed label line in {:?}: {:?}", txt_path, line);
                }
                decoded
            })
            .collect();

        log::debug!("Loaded {} boxes from {:?}", labels.len(), txt_path);
        Ok(labels)
    }
}

/// Encode one box as a YOLO line (without the trailing newline).
///
/// The box is put back into min/max order first so an inverted box never
/// produces negative sizes on disk.
pub fn encode_line(class_id: u32, bbox: &BoundingBox, width: u32, height: u32) -> String {
    let b = bbox.normalized();
    let w = f64::from(width);
    let h = f64::from(height);

    let (x1, y1) = (f64::from(b.x1), f64::from(b.y1));
    let (x2, y2) = (f64::from(b.x2), f64::from(b.y2));

    let cx = (x1 + x2) / 2.0 / w;
    let cy = (y1 + y2) / 2.0 / h;
    let nw = (x2 - x1) / w;
    let nh = (y2 - y1) / h;

    format!(
        "{} {:.p$} {:.p$} {:.p$} {:.p$}",
        class_id,
        cx,
        cy,
        nw,
        nh,
        p = LABEL_PRECISION
    )
}

/// Decode one YOLO line back into pixel bounds.
///
/// Only lines with exactly five numeric fields are accepted. Geometry values
/// must lie in [`LABEL_VALUE_RANGE`] and the decoded box must have a positive
/// width and height. Pixel values are truncated toward zero.
pub fn decode_line(line: &str, width: u32, height: u32) -> Option<BoundingBox> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 5 {
        return None;
    }

    let mut values = [0.0f64; 5];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part.parse().ok()?;
    }
    let [_class, cx, cy, nw, nh] = values;
    if !values.iter().all(|v| v.is_finite()) {
        return None;
    }
    if ![cx, cy, nw, nh].iter().all(|v| LABEL_VALUE_RANGE.contains(v)) {
        return None;
    }

    let w = f64::from(width);
    let h = f64::from(height);
    let bbox = BoundingBox::new(
        ((cx - nw / 2.0) * w) as i32,
        ((cy - nh / 2.0) * h) as i32,
        ((cx + nw / 2.0) * w) as i32,
        ((cy + nh / 2.0) * h) as i32,
    );
    (bbox.width() > 0 && bbox.height() > 0).then_some(bbox)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_line_scenario() {
        let bbox = BoundingBox::new(100, 100, 300, 250);
        assert_eq!(
            encode_line(0, &bbox, 800, 600),
            "0 0.250000 0.291667 0.250000 0.250000"
        );
    }

    #[test]
    fn test_encode_line_normalizes_inverted_box() {
        let inverted = BoundingBox::new(300, 250, 100, 100);
        assert_eq!(
            encode_line(0, &inverted, 800, 600),
            "0 0.250000 0.291667 0.250000 0.250000"
        );
    }

    #[test]
    fn test_decode_line_scenario() {
        let bbox = decode_line("0 0.250000 0.291667 0.250000 0.250000", 800, 600).unwrap();
        assert_eq!(bbox, BoundingBox::new(100, 100, 300, 250));
    }

    #[test]
    fn test_decode_line_rejects_malformed() {
        assert!(decode_line("", 800, 600).is_none());
        assert!(decode_line("0 0.5 0.5 0.2", 800, 600).is_none());
        assert!(decode_line("0 0.5 0.5 0.2 0.2 0.9", 800, 600).is_none());
        assert!(decode_line("0 abc 0.5 0.2 0.2", 800, 600).is_none());
        assert!(decode_line("0 NaN 0.5 0.2 0.2", 800, 600).is_none());
    }

    #[test]
    fn test_decode_line_rejects_out_of_range() {
        assert!(decode_line("0 3000000 0.5 0.1 0.1", 800, 600).is_none());
        assert!(decode_line("0 0.5 -2.0 0.1 0.1", 800, 600).is_none());
        assert!(decode_line("0 0.5 0.5 1e9 0.1", 800, 600).is_none());
        // Slightly past the image edge is still accepted
        assert!(decode_line("0 1.0 1.0 0.2 0.2", 800, 600).is_some());
    }

    #[test]
    fn test_decode_line_rejects_degenerate() {
        assert!(decode_line("0 0.5 0.5 0 0", 800, 600).is_none());
        assert!(decode_line("0 0.5 0.5 0.1 0", 800, 600).is_none());
        // Less than one pixel wide after truncation
        assert!(decode_line("0 0.5006 0.5 0.0001 0.1", 800, 600).is_none());
    }

    #[test]
    fn test_encode_line_extreme_coordinates() {
        let bbox = BoundingBox::new(i32::MAX - 10, 0, i32::MAX, 10);
        let line = encode_line(0, &bbox, 800, 600);
        assert!(line.starts_with("0 "));
        assert_eq!(line.split_whitespace().count(), 5);
    }

    #[test]
    fn test_label_path_uses_stem() {
        let codec = YoloCodec::new("/data/labels");
        assert_eq!(
            codec.label_path(Path::new("/data/images/frame_0001.jpg")).unwrap(),
            PathBuf::from("/data/labels/frame_0001.txt")
        );
    }
}
