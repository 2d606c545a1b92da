//! Data models for BBAT: pixel geometry and per-image label storage.

mod geometry;
mod label_set;

pub use geometry::{
    BoundingBox, Corner, Point, box_contains, corner_hit, find_containing, find_corner_hit,
};
pub use label_set::LabelSet;
