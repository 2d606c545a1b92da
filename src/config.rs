//! Configuration file support for BBAT.
//!
//! Settings live in a JSON file. Every field has a default, so a partial (or
//! missing) file is fine; command-line flags are applied on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{CORNER_HIT_RADIUS, DEFAULT_CLASS_ID, DEFAULT_POINTS_PREFIX, MIN_BOX_SIZE};
use crate::keybindings::KeyBindings;

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// File name looked up inside the platform config directory.
const CONFIG_FILE_NAME: &str = "config.json";

/// Errors from loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown key name '{0}'")]
    InvalidKey(String),

    #[error("Key '{key}' is bound to both '{first}' and '{second}'")]
    KeyConflict {
        key: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("Unsupported config version {found} (expected {expected})")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Class id written for every box
    pub class_id: u32,

    /// Directory for label files. `None` means `labels/` next to the image folder.
    pub labels_dir: Option<PathBuf>,

    /// Directory for reference-point files. `None` means `points/` next to the image folder.
    pub points_dir: Option<PathBuf>,

    /// Prefix stripped from image stems to find their points file
    pub points_prefix: String,

    /// Boxes must be wider and taller than this many pixels
    pub min_box_size: i32,

    /// How close (in pixels) a press must be to grab a corner
    pub corner_hit_radius: f64,

    /// Also save when moving to the previous image
    pub save_on_retreat: bool,

    /// Log verbosity level
    pub log_level: LogLevel,

    /// Keybinding configuration
    pub keybindings: KeyBindings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            class_id: DEFAULT_CLASS_ID,
            labels_dir: None,
            points_dir: None,
            points_prefix: DEFAULT_POINTS_PREFIX.to_string(),
            min_box_size: MIN_BOX_SIZE,
            corner_hit_radius: CORNER_HIT_RADIUS,
            save_on_retreat: false,
            log_level: LogLevel::default(),
            keybindings: KeyBindings::default(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load `path` if given, else the platform config file if it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check version, editing tunables and key bindings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch {
                expected: CONFIG_VERSION,
                found: self.version,
            });
        }
        if self.min_box_size < 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_box_size",
                value: self.min_box_size.to_string(),
                reason: "must not be negative",
            });
        }
        if !(self.corner_hit_radius.is_finite() && self.corner_hit_radius > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "corner_hit_radius",
                value: self.corner_hit_radius.to_string(),
                reason: "must be a positive number",
            });
        }
        self.keybindings.validate()
    }

    /// Label directory for an image folder.
    pub fn resolve_labels_dir(&self, image_dir: &Path) -> PathBuf {
        self.labels_dir
            .clone()
            .unwrap_or_else(|| sibling_dir(image_dir, crate::constants::LABELS_DIR_NAME))
    }

    /// Reference-point directory for an image folder.
    pub fn resolve_points_dir(&self, image_dir: &Path) -> PathBuf {
        self.points_dir
            .clone()
            .unwrap_or_else(|| sibling_dir(image_dir, crate::constants::POINTS_DIR_NAME))
    }
}

/// `<config_dir>/bbat/config.json` on this platform.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bbat").join(CONFIG_FILE_NAME))
}

/// `name` placed beside `image_dir` (in its parent), as with `dataset/images` → `dataset/labels`.
fn sibling_dir(image_dir: &Path, name: &str) -> PathBuf {
    match image_dir.parent() {
        Some(parent) => parent.join(name),
        None => image_dir.join(name),
    }
}
