//! BBAT - Bounding Box Annotation Tool
//!
//! Editing core for drawing axis-aligned boxes over a folder of images and
//! saving them as YOLO label files. Rendering and windowing live outside
//! this crate; the editor consumes pointer/key events and produces a
//! [`render::RenderDescription`] per frame.

pub mod app;
pub mod config;
pub mod constants;
pub mod driver;
pub mod editor;
pub mod event;
pub mod format;
pub mod keybindings;
pub mod model;
pub mod navigator;
pub mod render;
pub mod status;

pub use app::{Editor, Flow};
pub use config::AppConfig;
pub use event::{EditorEvent, PointerEvent};
