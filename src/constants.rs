//! Global constants for the BBAT editor

/// Minimum width/height (in pixels) a newly drawn box must exceed.
pub const MIN_BOX_SIZE: i32 = 5;

/// Distance (in image pixels) within which a press grabs a box corner.
pub const CORNER_HIT_RADIUS: f64 = 10.0;

/// Pixels moved per arrow-key press.
pub const NUDGE_STEP: i32 = 1;

/// Class id written for every box.
pub const DEFAULT_CLASS_ID: u32 = 0;

/// Decimal places used for normalized label values.
pub const LABEL_PRECISION: usize = 6;

/// Normalized label values outside this range are treated as corrupt on load.
pub const LABEL_VALUE_RANGE: std::ops::RangeInclusive<f64> = -0.5..=1.5;

/// Prefix stripped from an image stem to derive its reference-point token.
pub const DEFAULT_POINTS_PREFIX: &str = "image_";

/// Image extensions picked up when scanning a folder.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Name of the label directory created next to the image folder.
pub const LABELS_DIR_NAME: &str = "labels";

/// Name of the reference-point directory next to the image folder.
pub const POINTS_DIR_NAME: &str = "points";

/// Render styling.
pub mod style {
    /// RGB colour.
    pub type Rgb = [u8; 3];

    /// Fill and handle colour for unselected boxes.
    pub const BOX_COLOR: Rgb = [255, 255, 0];
    /// Fill and handle colour for the selected box.
    pub const SELECTED_COLOR: Rgb = [0, 100, 255];
    /// Outline drawn behind every corner handle.
    pub const HANDLE_OUTLINE: Rgb = [0, 0, 0];
    /// Crosshair guide colour.
    pub const CROSSHAIR_COLOR: Rgb = [150, 150, 150];
    /// Dashed preview rectangle while creating.
    pub const PREVIEW_COLOR: Rgb = [255, 0, 0];
    /// Reference point marker colour.
    pub const POINT_COLOR: Rgb = [0, 255, 0];

    /// Opacity of the box fill.
    pub const BOX_FILL_ALPHA: f32 = 0.25;
    /// Corner handle radius for unselected boxes.
    pub const HANDLE_RADIUS: u32 = 5;
    /// Corner handle radius for the selected box.
    pub const SELECTED_HANDLE_RADIUS: u32 = 7;
    /// Reference point marker radius.
    pub const POINT_RADIUS: u32 = 5;
}

/// Status line timing.
pub mod status {
    use std::time::Duration;

    /// How long a notice stays visible.
    pub const NOTICE_DURATION: Duration = Duration::from_secs(3);
}
