//! Main editor: owns the session, the navigator and the codecs, and turns
//! input events into edits, saves and image changes.

use crate::config::AppConfig;
use crate::editor::{EditSettings, EditorSession, PointerOutcome};
use crate::event::EditorEvent;
use crate::format::{PointsReader, YoloCodec};
use crate::keybindings::{EditorAction, KeyBindings};
use crate::navigator::{NavOutcome, SessionNavigator};
use crate::render::{self, RenderDescription};
use crate::status::StatusLine;

/// Whether the control loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Operator quit; unsaved edits on the current image are dropped.
    Quit,
    /// Advanced past the last image.
    Finished,
}

/// The editor as seen by a control loop.
#[derive(Debug)]
pub struct Editor {
    session: EditorSession,
    navigator: SessionNavigator,
    codec: YoloCodec,
    points: PointsReader,
    bindings: KeyBindings,
    status: StatusLine,
    save_on_retreat: bool,
}

impl Editor {
    /// Build an editor over an opened navigator and load its first image.
    pub fn new(
        config: &AppConfig,
        navigator: SessionNavigator,
        codec: YoloCodec,
        points: PointsReader,
    ) -> Self {
        let mut editor = Self {
            session: EditorSession::new(EditSettings::from(config)),
            navigator,
            codec,
            points,
            bindings: config.keybindings.clone(),
            status: StatusLine::new(),
            save_on_retreat: config.save_on_retreat,
        };
        editor.load_current();
        editor
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn navigator(&self) -> &SessionNavigator {
        &self.navigator
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Process one event.
    pub fn handle(&mut self, event: EditorEvent) -> Flow {
        match event {
            EditorEvent::Pointer(pointer) => {
                if let PointerOutcome::Created(index) = self.session.handle_pointer(pointer) {
                    log::debug!("Box {} added, {} total", index, self.session.labels().len());
                }
                Flow::Continue
            }
            EditorEvent::Key(key) => match self.bindings.action_for_key(key) {
                Some(action) => self.apply(action),
                None => {
                    log::trace!("Unbound key {}", key);
                    Flow::Continue
                }
            },
        }
    }

    /// Run a keyboard action.
    pub fn apply(&mut self, action: EditorAction) -> Flow {
        log::debug!("Action: {}", action.name());
        match action {
            EditorAction::Nudge(direction) => {
                self.session.nudge(direction);
            }
            EditorAction::Delete => {
                self.session.delete_selected();
            }
            EditorAction::Undo => {
                if self.session.undo().is_none() {
                    self.status.info("Nothing to undo");
                }
            }
            EditorAction::CopyPrevious => self.copy_previous(),
            EditorAction::Save => {
                self.save_current();
            }
            EditorAction::Next => return self.next_image(),
            EditorAction::Previous => self.previous_image(),
            EditorAction::Quit => {
                log::info!("Quit requested, leaving {}", self.navigator.progress());
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Current frame for the renderer.
    pub fn render(&self) -> RenderDescription {
        render::describe(&self.session, self.navigator.progress(), self.status.current())
    }

    /// Write the current labels. Failures are reported, never fatal.
    pub fn save_current(&mut self) -> bool {
        let image = self.navigator.current();
        match self
            .codec
            .save(&image.path, self.session.labels(), image.width, image.height)
        {
            Ok(path) => {
                self.status.info(format!("Saved {}", path.display()));
                true
            }
            Err(e) => {
                self.status.error(format!("Save failed: {}", e));
                false
            }
        }
    }

    /// Save, then advance. A failed save keeps the current image on screen.
    fn next_image(&mut self) -> Flow {
        if !self.save_current() {
            return Flow::Continue;
        }
        match self.navigator.advance() {
            NavOutcome::Moved => {
                self.load_current();
                Flow::Continue
            }
            NavOutcome::AtStart => Flow::Continue,
            NavOutcome::Finished => {
                log::info!("Reached the end of the image list");
                Flow::Finished
            }
        }
    }

    fn previous_image(&mut self) {
        if self.navigator.current().index == 0 {
            self.status.info("Already at the first image");
            return;
        }
        if self.save_on_retreat && !self.save_current() {
            return;
        }
        match self.navigator.retreat() {
            NavOutcome::Moved => self.load_current(),
            NavOutcome::AtStart | NavOutcome::Finished => {
                self.status.info("Already at the first image");
            }
        }
    }

    fn copy_previous(&mut self) {
        let Some(prev) = self.navigator.previous_image() else {
            self.status.warn("No previous image to copy from");
            return;
        };
        match self.codec.load(&prev.path, prev.width, prev.height) {
            Ok(labels) if labels.is_empty() => {
                self.status.warn("Previous image has no boxes");
            }
            Ok(labels) => {
                let count = labels.len();
                self.session.replace_labels(labels);
                self.status.info(format!("Copied {} boxes from previous image", count));
            }
            Err(e) => self.status.error(format!("Could not read previous labels: {}", e)),
        }
    }

    /// Reset the session for the navigator's current image.
    fn load_current(&mut self) {
        let image = self.navigator.current().clone();

        let labels = self
            .codec
            .load(&image.path, image.width, image.height)
            .unwrap_or_else(|e| {
                self.status.error(format!("Could not read labels: {}", e));
                Default::default()
            });
        let points = self.points.load(&image.path).unwrap_or_else(|e| {
            self.status.warn(format!("Could not read reference points: {}", e));
            Vec::new()
        });

        log::info!(
            "Opened {} ({}x{}, {} boxes, {} points)",
            self.navigator.progress(),
            image.width,
            image.height,
            labels.len(),
            points.len()
        );
        self.session
            .load_image(labels, points, (image.width, image.height));
    }
}
