//! Editing state for the image currently on screen.

use crate::config::AppConfig;
use crate::constants::{CORNER_HIT_RADIUS, MIN_BOX_SIZE, NUDGE_STEP};
use crate::keybindings::Direction;
use crate::model::{BoundingBox, LabelSet, Point};

use super::interaction::Interaction;

/// Tunables for pointer editing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditSettings {
    /// New boxes must be wider and taller than this
    pub min_box_size: i32,
    /// Corner grab distance
    pub corner_hit_radius: f64,
}

impl Default for EditSettings {
    fn default() -> Self {
        Self {
            min_box_size: MIN_BOX_SIZE,
            corner_hit_radius: CORNER_HIT_RADIUS,
        }
    }
}

impl From<&AppConfig> for EditSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            min_box_size: config.min_box_size,
            corner_hit_radius: config.corner_hit_radius,
        }
    }
}

/// Everything the editor knows about the current image: its boxes, the
/// selection, the drag in progress, the cursor and any reference points.
///
/// The whole value is reset when the navigator moves to another image.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    pub(super) labels: LabelSet,
    pub(super) selection: Option<usize>,
    pub(super) interaction: Interaction,
    pub(super) cursor: Option<Point>,
    pub(super) reference_points: Vec<Point>,
    pub(super) image_size: (u32, u32),
    pub(super) settings: EditSettings,
}

impl EditorSession {
    pub fn new(settings: EditSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Start over on a freshly loaded image.
    pub fn load_image(
        &mut self,
        labels: LabelSet,
        reference_points: Vec<Point>,
        image_size: (u32, u32),
    ) {
        self.labels = labels;
        self.reference_points = reference_points;
        self.image_size = image_size;
        self.selection = None;
        self.interaction = Interaction::Idle;
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Last known pointer position.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn reference_points(&self) -> &[Point] {
        &self.reference_points
    }

    pub fn image_size(&self) -> (u32, u32) {
        self.image_size
    }

    pub fn settings(&self) -> &EditSettings {
        &self.settings
    }

    /// Select a box by index, or clear the selection.
    pub fn select(&mut self, index: Option<usize>) {
        self.selection = index.filter(|&i| i < self.labels.len());
    }

    /// The selected box. A selection pointing past the end is dropped.
    pub fn selected_box(&mut self) -> Option<&mut BoundingBox> {
        let index = self.selection?;
        if index >= self.labels.len() {
            log::warn!(
                "Selection {} out of range ({} boxes), clearing",
                index,
                self.labels.len()
            );
            self.selection = None;
            return None;
        }
        self.labels.get_mut(index)
    }

    /// Swap in a whole new label set (copy-from-previous). Clears selection.
    pub fn replace_labels(&mut self, labels: LabelSet) {
        self.labels = labels;
        self.selection = None;
        if self.interaction.target().is_some() {
            self.interaction = Interaction::Idle;
        }
    }

    /// Shift the selected box one step, keeping its size.
    /// Returns false when nothing is selected.
    pub fn nudge(&mut self, direction: Direction) -> bool {
        let (dx, dy) = direction.delta();
        match self.selected_box() {
            Some(bbox) => {
                *bbox = bbox.translated(dx * NUDGE_STEP, dy * NUDGE_STEP);
                true
            }
            None => false,
        }
    }

    /// Remove the selected box and clear the selection.
    pub fn delete_selected(&mut self) -> Option<BoundingBox> {
        self.selected_box()?;
        let index = self.selection.take()?;
        let removed = self.labels.remove_at(index)?;
        self.after_removal(index);
        log::debug!("🗑️ Deleted box {}", index);
        Some(removed)
    }

    /// Pop the most recently added box and clear the selection.
    ///
    /// This is a "remove last box" undo over the current label set, not an
    /// inverse of the previous action: after a delete it pops whatever is
    /// now last.
    pub fn undo(&mut self) -> Option<BoundingBox> {
        let removed = self.labels.pop_last()?;
        self.selection = None;
        self.after_removal(self.labels.len());
        log::debug!("⏪ Undo: removed box {:?}", removed);
        Some(removed)
    }

    /// Keep an in-flight drag pointing at the same box after `index` was removed.
    fn after_removal(&mut self, index: usize) {
        self.interaction = match self.interaction {
            Interaction::Moving { index: i, .. } | Interaction::Resizing { index: i, .. }
                if i == index =>
            {
                Interaction::Idle
            }
            Interaction::Moving { index: i, last } if i > index => Interaction::Moving {
                index: i - 1,
                last,
            },
            Interaction::Resizing { index: i, corner } if i > index => Interaction::Resizing {
                index: i - 1,
                corner,
            },
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Corner;

    fn session_with(boxes: Vec<BoundingBox>) -> EditorSession {
        let mut session = EditorSession::default();
        session.load_image(LabelSet::from(boxes), Vec::new(), (800, 600));
        session
    }

    #[test]
    fn test_nudge_preserves_size() {
        let mut session = session_with(vec![BoundingBox::new(10, 20, 60, 90)]);
        session.select(Some(0));

        assert!(session.nudge(Direction::Left));
        assert_eq!(session.labels().get(0), Some(&BoundingBox::new(9, 20, 59, 90)));
        assert!(session.nudge(Direction::Down));
        assert!(session.nudge(Direction::Down));
        assert_eq!(session.labels().get(0), Some(&BoundingBox::new(9, 22, 59, 92)));
        assert!(session.nudge(Direction::Right));
        assert!(session.nudge(Direction::Up));

        let b = session.labels().get(0).unwrap();
        assert_eq!((b.width(), b.height()), (50, 70));
        assert_eq!(*b, BoundingBox::new(10, 21, 60, 91));
    }

    #[test]
    fn test_nudge_without_selection_is_noop() {
        let mut session = session_with(vec![BoundingBox::new(10, 20, 60, 90)]);
        assert!(!session.nudge(Direction::Left));
        assert_eq!(session.labels().get(0), Some(&BoundingBox::new(10, 20, 60, 90)));
    }

    #[test]
    fn test_delete_selected() {
        let mut session = session_with(vec![
            BoundingBox::new(0, 0, 10, 10),
            BoundingBox::new(20, 20, 40, 40),
            BoundingBox::new(50, 50, 90, 90),
        ]);
        session.select(Some(1));

        assert_eq!(session.delete_selected(), Some(BoundingBox::new(20, 20, 40, 40)));
        assert_eq!(session.selection(), None);
        assert_eq!(session.labels().len(), 2);
        assert_eq!(session.labels().get(1), Some(&BoundingBox::new(50, 50, 90, 90)));

        // Nothing selected now
        assert_eq!(session.delete_selected(), None);
        assert_eq!(session.labels().len(), 2);
    }

    #[test]
    fn test_undo_pops_last_and_clears_selection() {
        let mut session = session_with(vec![
            BoundingBox::new(0, 0, 10, 10),
            BoundingBox::new(20, 20, 40, 40),
        ]);
        session.select(Some(0));

        assert_eq!(session.undo(), Some(BoundingBox::new(20, 20, 40, 40)));
        assert_eq!(session.selection(), None);
        assert_eq!(session.undo(), Some(BoundingBox::new(0, 0, 10, 10)));
        assert_eq!(session.undo(), None);
    }

    #[test]
    fn test_delete_then_undo_does_not_resurrect() {
        let mut session = session_with(vec![
            BoundingBox::new(0, 0, 10, 10),
            BoundingBox::new(20, 20, 40, 40),
            BoundingBox::new(50, 50, 90, 90),
        ]);
        session.select(Some(2));
        session.delete_selected();

        assert_eq!(session.undo(), Some(BoundingBox::new(20, 20, 40, 40)));
        assert_eq!(
            session.labels().as_slice(),
            &[BoundingBox::new(0, 0, 10, 10)]
        );
    }

    #[test]
    fn test_out_of_range_selection_is_dropped() {
        let mut session = session_with(vec![BoundingBox::new(0, 0, 10, 10)]);
        session.selection = Some(3);
        assert!(!session.nudge(Direction::Up));
        assert_eq!(session.selection(), None);
        assert_eq!(session.delete_selected(), None);
        assert_eq!(session.labels().len(), 1);
    }

    #[test]
    fn test_select_rejects_out_of_range() {
        let mut session = session_with(vec![BoundingBox::new(0, 0, 10, 10)]);
        session.select(Some(1));
        assert_eq!(session.selection(), None);
        session.select(Some(0));
        assert_eq!(session.selection(), Some(0));
    }

    #[test]
    fn test_load_image_resets_state() {
        let mut session = session_with(vec![BoundingBox::new(0, 0, 10, 10)]);
        session.select(Some(0));
        session.interaction = Interaction::Resizing {
            index: 0,
            corner: Corner::BottomRight,
        };

        session.load_image(LabelSet::new(), vec![Point::new(1, 1)], (640, 480));
        assert_eq!(session.selection(), None);
        assert!(session.interaction().is_idle());
        assert!(session.labels().is_empty());
        assert_eq!(session.reference_points(), &[Point::new(1, 1)]);
        assert_eq!(session.image_size(), (640, 480));
    }

    #[test]
    fn test_removal_reindexes_active_drag() {
        let mut session = session_with(vec![
            BoundingBox::new(0, 0, 10, 10),
            BoundingBox::new(20, 20, 40, 40),
            BoundingBox::new(50, 50, 90, 90),
        ]);
        session.select(Some(0));
        session.interaction = Interaction::Moving {
            index: 2,
            last: Point::new(60, 60),
        };
        session.delete_selected();
        assert_eq!(
            *session.interaction(),
            Interaction::Moving {
                index: 1,
                last: Point::new(60, 60)
            }
        );

        // Undo removes the box being dragged
        session.undo();
        assert!(session.interaction().is_idle());
    }
}
