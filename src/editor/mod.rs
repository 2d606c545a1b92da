//! Per-image editing: session state plus the pointer/keyboard state machine.

mod interaction;
mod session;

pub use interaction::{Interaction, PointerOutcome};
pub use session::{EditSettings, EditorSession};
