//! Input events consumed by the editor.
//!
//! A front-end translates its own window events into these before handing
//! them to [`crate::app::Editor::handle`].

use crate::keybindings::Key;
use crate::model::Point;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn down(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Down,
            position: Point::new(x, y),
        }
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Move,
            position: Point::new(x, y),
        }
    }

    pub fn up(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Up,
            position: Point::new(x, y),
        }
    }
}

/// Anything the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    Pointer(PointerEvent),
    Key(Key),
}

impl From<PointerEvent> for EditorEvent {
    fn from(event: PointerEvent) -> Self {
        EditorEvent::Pointer(event)
    }
}

impl From<Key> for EditorEvent {
    fn from(key: Key) -> Self {
        EditorEvent::Key(key)
    }
}
