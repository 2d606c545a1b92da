//! Pixel-space geometry and hit-testing.

use serde::{Deserialize, Serialize};

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// One of the four corners of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All corners in index order (0 = top-left .. 3 = bottom-right).
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Index of this corner, 0 = top-left, 1 = top-right, 2 = bottom-left, 3 = bottom-right.
    pub fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomLeft => 2,
            Corner::BottomRight => 3,
        }
    }
}

/// An axis-aligned box stored as two corners `(x1, y1)` and `(x2, y2)`.
///
/// Committed boxes satisfy `x1 < x2` and `y1 < y2`. While a corner is being
/// dragged the box may temporarily be inverted; [`BoundingBox::normalized`]
/// restores the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build an ordered box from two arbitrary corner points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    /// Build a box from a drag, rejecting it unless both extents exceed `min_size`.
    pub fn from_drag(anchor: Point, release: Point, min_size: i32) -> Option<Self> {
        let bbox = Self::from_points(anchor, release);
        if bbox.width() > min_size && bbox.height() > min_size {
            Some(bbox)
        } else {
            None
        }
    }

    /// Signed width; negative while inverted.
    pub fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1)
    }

    /// Signed height; negative while inverted.
    pub fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1)
    }

    /// Whether `x1 <= x2` and `y1 <= y2`.
    pub fn is_normalized(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Copy of this box with its coordinates put back into min/max order.
    pub fn normalized(&self) -> Self {
        Self::from_points(Point::new(self.x1, self.y1), Point::new(self.x2, self.y2))
    }

    /// Position of a corner.
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => Point::new(self.x1, self.y1),
            Corner::TopRight => Point::new(self.x2, self.y1),
            Corner::BottomLeft => Point::new(self.x1, self.y2),
            Corner::BottomRight => Point::new(self.x2, self.y2),
        }
    }

    /// All four corners in index order.
    pub fn corners(&self) -> [Point; 4] {
        Corner::ALL.map(|c| self.corner(c))
    }

    /// Move one corner to `to`, leaving the opposite corner's coordinates alone.
    /// No reordering happens here, so the box can invert.
    pub fn with_corner(&self, corner: Corner, to: Point) -> Self {
        let mut b = *self;
        match corner {
            Corner::TopLeft => {
                b.x1 = to.x;
                b.y1 = to.y;
            }
            Corner::TopRight => {
                b.x2 = to.x;
                b.y1 = to.y;
            }
            Corner::BottomLeft => {
                b.x1 = to.x;
                b.y2 = to.y;
            }
            Corner::BottomRight => {
                b.x2 = to.x;
                b.y2 = to.y;
            }
        }
        b
    }

    /// Shift all four coordinates, preserving size. Coordinates clamp at the `i32` limits.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x1.saturating_add(dx),
            self.y1.saturating_add(dy),
            self.x2.saturating_add(dx),
            self.y2.saturating_add(dy),
        )
    }
}

/// Inclusive point-in-box test.
pub fn box_contains(point: Point, bbox: &BoundingBox) -> bool {
    bbox.x1 <= point.x && point.x <= bbox.x2 && bbox.y1 <= point.y && point.y <= bbox.y2
}

/// The corner of `bbox` strictly closer than `radius` to `point`, checked in index order.
pub fn corner_hit(point: Point, bbox: &BoundingBox, radius: f64) -> Option<Corner> {
    Corner::ALL
        .into_iter()
        .find(|&c| bbox.corner(c).distance_to(&point) < radius)
}

/// First box (in creation order) with a corner under `point`.
///
/// Later boxes are not preferred even though they draw on top.
pub fn find_corner_hit<'a>(
    boxes: impl IntoIterator<Item = &'a BoundingBox>,
    point: Point,
    radius: f64,
) -> Option<(usize, Corner)> {
    boxes
        .into_iter()
        .enumerate()
        .find_map(|(i, b)| corner_hit(point, b, radius).map(|c| (i, c)))
}

/// First box (in creation order) containing `point`.
pub fn find_containing<'a>(
    boxes: impl IntoIterator<Item = &'a BoundingBox>,
    point: Point,
) -> Option<usize> {
    boxes.into_iter().position(|b| box_contains(point, b))
}
