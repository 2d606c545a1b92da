//! Pointer-driven state machine: create, move and resize boxes.
//!
//! On pointer-down the target is resolved in strict priority order:
//! 1. a corner within the hit radius of any box → resize that box
//! 2. the inside of any box → move that box
//! 3. empty space → start drawing a new box
//!
//! Every pointer-up returns to [`Interaction::Idle`].

use crate::event::{PointerEvent, PointerKind};
use crate::model::{BoundingBox, Corner, Point, find_containing, find_corner_hit};

use super::session::EditorSession;

/// The drag currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    /// No button held.
    #[default]
    Idle,
    /// Drawing a new box from `anchor` to the cursor.
    Creating { anchor: Point },
    /// Dragging box `index`; `last` is the previous pointer position.
    Moving { index: usize, last: Point },
    /// Dragging one corner of box `index`.
    Resizing { index: usize, corner: Corner },
}

impl Interaction {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "Idle",
            Interaction::Creating { .. } => "Creating",
            Interaction::Moving { .. } => "Moving",
            Interaction::Resizing { .. } => "Resizing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    /// Index of the box being dragged, if any.
    pub fn target(&self) -> Option<usize> {
        match self {
            Interaction::Moving { index, .. } | Interaction::Resizing { index, .. } => Some(*index),
            Interaction::Idle | Interaction::Creating { .. } => None,
        }
    }
}

/// What a pointer event did to the label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing changed besides the cursor.
    None,
    /// A drag started on an existing box, which is now selected.
    Grabbed(usize),
    /// A create drag started on empty space.
    Anchored,
    /// Box `index` was moved or resized.
    Edited(usize),
    /// A new box was committed at `index`.
    Created(usize),
    /// A create drag was too small and was dropped.
    Discarded,
}

impl EditorSession {
    /// Dispatch a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        match event.kind {
            PointerKind::Down => self.pointer_down(event.position),
            PointerKind::Move => self.pointer_move(event.position),
            PointerKind::Up => self.pointer_up(event.position),
        }
    }

    /// Start a resize, move or create drag at `point`.
    pub fn pointer_down(&mut self, point: Point) -> PointerOutcome {
        self.cursor = Some(point);
        let radius = self.settings.corner_hit_radius;

        if let Some((index, corner)) = find_corner_hit(&self.labels, point, radius) {
            log::debug!("Resize box {} by corner {}", index, corner.index());
            self.interaction = Interaction::Resizing { index, corner };
            self.selection = Some(index);
            return PointerOutcome::Grabbed(index);
        }

        if let Some(index) = find_containing(&self.labels, point) {
            log::debug!("Move box {}", index);
            self.interaction = Interaction::Moving { index, last: point };
            self.selection = Some(index);
            return PointerOutcome::Grabbed(index);
        }

        log::debug!("Create box from ({}, {})", point.x, point.y);
        self.interaction = Interaction::Creating { anchor: point };
        self.selection = None;
        PointerOutcome::Anchored
    }

    /// Continue the active drag.
    pub fn pointer_move(&mut self, point: Point) -> PointerOutcome {
        self.cursor = Some(point);

        match self.interaction {
            Interaction::Idle | Interaction::Creating { .. } => PointerOutcome::None,
            Interaction::Moving { index, last } => {
                let (dx, dy) = (
                    point.x.saturating_sub(last.x),
                    point.y.saturating_sub(last.y),
                );
                let Some(bbox) = self.labels.get_mut(index) else {
                    return self.abort_stale_drag(index);
                };
                *bbox = bbox.translated(dx, dy);
                // Movement is relative to the previous event, not the press point
                self.interaction = Interaction::Moving { index, last: point };
                PointerOutcome::Edited(index)
            }
            Interaction::Resizing { index, corner } => {
                let Some(bbox) = self.labels.get_mut(index) else {
                    return self.abort_stale_drag(index);
                };
                *bbox = bbox.with_corner(corner, point);
                PointerOutcome::Edited(index)
            }
        }
    }

    /// Finish the active drag and return to idle.
    pub fn pointer_up(&mut self, point: Point) -> PointerOutcome {
        self.cursor = Some(point);
        let finished = std::mem::take(&mut self.interaction);

        match finished {
            Interaction::Idle => PointerOutcome::None,
            Interaction::Creating { anchor } => {
                match BoundingBox::from_drag(anchor, point, self.settings.min_box_size) {
                    Some(bbox) => {
                        let index = self.labels.add(bbox);
                        self.selection = Some(index);
                        log::debug!("📦 Created box {} {:?}", index, bbox);
                        PointerOutcome::Created(index)
                    }
                    None => {
                        log::trace!("Discarded undersized box");
                        PointerOutcome::Discarded
                    }
                }
            }
            Interaction::Moving { index, .. } => PointerOutcome::Edited(index),
            Interaction::Resizing { index, .. } => {
                // A resize may have dragged a corner past its opposite; commit in min/max form
                match self.labels.get_mut(index) {
                    Some(bbox) => {
                        *bbox = bbox.normalized();
                        PointerOutcome::Edited(index)
                    }
                    None => PointerOutcome::None,
                }
            }
        }
    }

    fn abort_stale_drag(&mut self, index: usize) -> PointerOutcome {
        log::warn!(
            "Drag target {} out of range ({} boxes), cancelling",
            index,
            self.labels.len()
        );
        self.interaction = Interaction::Idle;
        PointerOutcome::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LabelSet;

    fn session_with(boxes: Vec<BoundingBox>) -> EditorSession {
        let mut session = EditorSession::default();
        session.replace_labels(LabelSet::from(boxes));
        session
    }

    fn drag(session: &mut EditorSession, from: (i32, i32), to: (i32, i32)) -> PointerOutcome {
        session.handle_pointer(PointerEvent::down(from.0, from.1));
        session.handle_pointer(PointerEvent::moved(to.0, to.1));
        session.handle_pointer(PointerEvent::up(to.0, to.1))
    }

    #[test]
    fn test_create_box_and_select() {
        let mut session = EditorSession::default();
        let outcome = drag(&mut session, (100, 100), (300, 250));

        assert_eq!(outcome, PointerOutcome::Created(0));
        assert_eq!(session.labels().get(0), Some(&BoundingBox::new(100, 100, 300, 250)));
        assert_eq!(session.selection(), Some(0));
        assert!(session.interaction().is_idle());
    }

    #[test]
    fn test_create_reverse_drag_is_normalized() {
        let mut session = EditorSession::default();
        drag(&mut session, (300, 250), (100, 100));
        assert_eq!(session.labels().get(0), Some(&BoundingBox::new(100, 100, 300, 250)));
    }

    #[test]
    fn test_small_drag_never_adds() {
        let mut session = EditorSession::default();
        // Exactly the minimum size in x is not enough
        assert_eq!(drag(&mut session, (10, 10), (15, 100)), PointerOutcome::Discarded);
        assert_eq!(drag(&mut session, (10, 10), (100, 13)), PointerOutcome::Discarded);
        assert_eq!(drag(&mut session, (10, 10), (10, 10)), PointerOutcome::Discarded);
        assert!(session.labels().is_empty());
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn test_press_on_empty_space_deselects() {
        let mut session = session_with(vec![BoundingBox::new(100, 100, 200, 200)]);
        session.pointer_down(Point::new(150, 150));
        session.pointer_up(Point::new(150, 150));
        assert_eq!(session.selection(), Some(0));

        session.pointer_down(Point::new(400, 400));
        assert_eq!(session.selection(), None);
        assert_eq!(session.interaction().name(), "Creating");
    }

    #[test]
    fn test_corner_takes_priority_over_inside() {
        let mut session = session_with(vec![
            BoundingBox::new(0, 0, 300, 300),
            BoundingBox::new(100, 100, 200, 200),
        ]);
        // (102, 102) is inside box 0 but near box 1's top-left corner
        let outcome = session.pointer_down(Point::new(102, 102));
        assert_eq!(outcome, PointerOutcome::Grabbed(1));
        assert_eq!(
            *session.interaction(),
            Interaction::Resizing {
                index: 1,
                corner: Corner::TopLeft
            }
        );
        assert_eq!(session.selection(), Some(1));
    }

    #[test]
    fn test_move_is_cumulative_per_event() {
        let mut session = session_with(vec![BoundingBox::new(100, 100, 200, 200)]);
        session.pointer_down(Point::new(150, 150));
        session.pointer_move(Point::new(160, 150));
        session.pointer_move(Point::new(170, 145));
        session.pointer_up(Point::new(170, 145));

        assert_eq!(session.labels().get(0), Some(&BoundingBox::new(120, 95, 220, 195)));
        assert_eq!(session.selection(), Some(0));
        assert!(session.interaction().is_idle());
    }

    #[test]
    fn test_resize_moves_only_dragged_corner() {
        let mut session = session_with(vec![BoundingBox::new(100, 100, 200, 200)]);
        drag(&mut session, (200, 200), (260, 230));
        assert_eq!(session.labels().get(0), Some(&BoundingBox::new(100, 100, 260, 230)));

        drag(&mut session, (260, 100), (300, 50));
        assert_eq!(session.labels().get(0), Some(&BoundingBox::new(100, 50, 300, 230)));
    }

    #[test]
    fn test_resize_can_invert_live_then_normalizes_on_release() {
        let mut session = session_with(vec![BoundingBox::new(100, 100, 200, 200)]);
        session.pointer_down(Point::new(100, 100));
        session.pointer_move(Point::new(250, 260));

        // Mid-drag the box is inverted
        let live = *session.labels().get(0).unwrap();
        assert_eq!(live, BoundingBox::new(250, 260, 200, 200));
        assert!(!live.is_normalized());

        session.pointer_up(Point::new(250, 260));
        assert_eq!(session.labels().get(0), Some(&BoundingBox::new(200, 200, 250, 260)));
    }

    #[test]
    fn test_move_to_extreme_coordinates_clamps() {
        let mut session = session_with(vec![BoundingBox::new(100, 100, 200, 200)]);
        session.pointer_down(Point::new(150, 150));
        session.pointer_move(Point::new(i32::MAX, i32::MIN));
        session.pointer_move(Point::new(i32::MIN, i32::MAX));
        session.pointer_up(Point::new(i32::MIN, i32::MAX));

        let b = *session.labels().get(0).unwrap();
        assert!(b.is_normalized());
        assert!(session.interaction().is_idle());
    }

    #[test]
    fn test_move_without_press_only_tracks_cursor() {
        let mut session = session_with(vec![BoundingBox::new(100, 100, 200, 200)]);
        assert_eq!(session.pointer_move(Point::new(150, 150)), PointerOutcome::None);
        assert_eq!(session.cursor(), Some(Point::new(150, 150)));
        assert_eq!(session.labels().get(0), Some(&BoundingBox::new(100, 100, 200, 200)));
    }

    #[test]
    fn test_up_without_down_is_noop() {
        let mut session = EditorSession::default();
        assert_eq!(session.pointer_up(Point::new(5, 5)), PointerOutcome::None);
        assert!(session.labels().is_empty());
    }

    #[test]
    fn test_stale_drag_target_is_cancelled() {
        let mut session = session_with(vec![BoundingBox::new(100, 100, 200, 200)]);
        session.interaction = Interaction::Moving {
            index: 5,
            last: Point::new(0, 0),
        };
        assert_eq!(session.pointer_move(Point::new(10, 10)), PointerOutcome::None);
        assert!(session.interaction().is_idle());
    }
}
