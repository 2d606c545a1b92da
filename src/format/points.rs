//! Reference-point sidecar files.
//!
//! Points are advisory markers recorded alongside an image (for example the
//! click targets captured during data collection). The editor only reads
//! them; [`PointsReader::save`] exists for tools that produce them.

use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_POINTS_PREFIX;
use crate::format::error::FormatError;
use crate::format::file_stem;
use crate::model::Point;

/// Locates and parses `points_<token>.txt` files in one directory.
#[derive(Debug, Clone)]
pub struct PointsReader {
    points_dir: PathBuf,
    prefix: String,
}

impl PointsReader {
    pub fn new(points_dir: impl Into<PathBuf>) -> Self {
        Self {
            points_dir: points_dir.into(),
            prefix: DEFAULT_POINTS_PREFIX.to_string(),
        }
    }

    /// Set the image-stem prefix stripped when deriving the token.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Token shared by an image and its points file.
    ///
    /// `image_20240101_1200.jpg` becomes `20240101_1200` with the default prefix.
    pub fn token(&self, image_path: &Path) -> Result<String, FormatError> {
        let stem = file_stem(image_path)?;
        Ok(stem.strip_prefix(self.prefix.as_str()).unwrap_or(stem).to_string())
    }

    /// Points file for an image: `<points_dir>/points_<token>.txt`.
    pub fn points_path(&self, image_path: &Path) -> Result<PathBuf, FormatError> {
        let token = self.token(image_path)?;
        Ok(self.points_dir.join(format!("points_{}.txt", token)))
    }

    /// Load the points for an image. A missing file yields no points.
    pub fn load(&self, image_path: &Path) -> Result<Vec<Point>, FormatError> {
        let path = self.points_path(image_path)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(FormatError::io(&path, e)),
        };

        let points: Vec<Point> = content.lines().filter_map(parse_point_line).collect();
        log::debug!("Loaded {} reference points from {:?}", points.len(), path);
        Ok(points)
    }

    /// Write points for an image as `x,y` lines.
    pub fn save(&self, image_path: &Path, points: &[Point]) -> Result<PathBuf, FormatError> {
        let path = self.points_path(image_path)?;
        std::fs::create_dir_all(&self.points_dir)
            .map_err(|e| FormatError::io(&self.points_dir, e))?;

        let content: String = points.iter().map(|p| format!("{},{}\n", p.x, p.y)).collect();
        std::fs::write(&path, content).map_err(|e| FormatError::io(&path, e))?;
        Ok(path)
    }
}

/// Parse `x,y` or `x y`. Anything but exactly two integers is rejected.
pub fn parse_point_line(line: &str) -> Option<Point> {
    let cleaned = line.replace(',', " ");
    let mut fields = cleaned.split_whitespace();
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point_line_separators() {
        assert_eq!(parse_point_line("12,34"), Some(Point::new(12, 34)));
        assert_eq!(parse_point_line("12 34"), Some(Point::new(12, 34)));
        assert_eq!(parse_point_line("  12 , 34  "), Some(Point::new(12, 34)));
    }

    #[test]
    fn test_parse_point_line_rejects_malformed() {
        assert_eq!(parse_point_line(""), None);
        assert_eq!(parse_point_line("12"), None);
        assert_eq!(parse_point_line("1.5,2"), None);
        assert_eq!(parse_point_line("1,2,3"), None);
        assert_eq!(parse_point_line("x,y"), None);
    }

    #[test]
    fn test_token_strips_prefix_only_at_start() {
        let reader = PointsReader::new("/p");
        assert_eq!(reader.token(Path::new("image_1735071234.jpg")).unwrap(), "1735071234");
        assert_eq!(reader.token(Path::new("1735071234.jpg")).unwrap(), "1735071234");
        assert_eq!(reader.token(Path::new("cam_image_7.png")).unwrap(), "cam_image_7");
    }

    #[test]
    fn test_points_path() {
        let reader = PointsReader::new("/data/points").with_prefix("frame_");
        assert_eq!(
            reader.points_path(Path::new("/data/images/frame_42.png")).unwrap(),
            PathBuf::from("/data/points/points_42.txt")
        );
    }
}
