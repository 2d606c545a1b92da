//! Per-frame drawing instructions.
//!
//! The editor never touches pixels. Each frame it produces an ordered list of
//! primitives that an external renderer paints back to front.

use crate::constants::style::{self, Rgb};
use crate::editor::{EditorSession, Interaction};
use crate::model::{BoundingBox, Point};
use crate::status::Notice;

/// One drawable element.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    /// Advisory marker loaded from the points sidecar.
    ReferencePoint { at: Point, radius: u32, color: Rgb },
    /// Full-width and full-height guide lines through the cursor.
    Crosshair {
        at: Point,
        width: u32,
        height: u32,
        color: Rgb,
    },
    /// Semi-transparent filled box.
    BoxFill {
        rect: BoundingBox,
        color: Rgb,
        alpha: f32,
        selected: bool,
    },
    /// Draggable corner dot: an outline disc with a coloured disc one pixel smaller on top.
    CornerHandle {
        at: Point,
        radius: u32,
        color: Rgb,
        outline: Rgb,
    },
    /// Outline shown while dragging out a new box.
    PreviewRect {
        from: Point,
        to: Point,
        color: Rgb,
        dashed: bool,
    },
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDescription {
    pub title: String,
    pub primitives: Vec<DrawPrimitive>,
    pub status: Option<String>,
}

/// Build the frame for `session`.
pub fn describe(session: &EditorSession, title: String, notice: Option<&Notice>) -> RenderDescription {
    let mut primitives = Vec::new();

    primitives.extend(session.reference_points().iter().map(|&at| {
        DrawPrimitive::ReferencePoint {
            at,
            radius: style::POINT_RADIUS,
            color: style::POINT_COLOR,
        }
    }));

    if let Some(at) = session.cursor() {
        let (width, height) = session.image_size();
        primitives.push(DrawPrimitive::Crosshair {
            at,
            width,
            height,
            color: style::CROSSHAIR_COLOR,
        });
    }

    for (index, bbox) in session.labels().iter().enumerate() {
        push_box(&mut primitives, bbox, session.selection() == Some(index));
    }

    if let (Interaction::Creating { anchor }, Some(cursor)) = (session.interaction(), session.cursor())
    {
        primitives.push(DrawPrimitive::PreviewRect {
            from: *anchor,
            to: cursor,
            color: style::PREVIEW_COLOR,
            dashed: true,
        });
    }

    RenderDescription {
        title,
        primitives,
        status: notice.map(|n| n.to_string()),
    }
}

fn push_box(primitives: &mut Vec<DrawPrimitive>, bbox: &BoundingBox, selected: bool) {
    let (color, radius) = if selected {
        (style::SELECTED_COLOR, style::SELECTED_HANDLE_RADIUS)
    } else {
        (style::BOX_COLOR, style::HANDLE_RADIUS)
    };

    primitives.push(DrawPrimitive::BoxFill {
        rect: *bbox,
        color,
        alpha: style::BOX_FILL_ALPHA,
        selected,
    });
    primitives.extend(bbox.corners().into_iter().map(|at| DrawPrimitive::CornerHandle {
        at,
        radius,
        color,
        outline: style::HANDLE_OUTLINE,
    }));
}
