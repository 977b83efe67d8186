//! Fixed presentation values for the console page.

/// Inner width of each rendered panel, in characters.
pub const PANEL_WIDTH: usize = 64;
/// Height every image cell is fitted to, in rows.
pub const IMAGE_CELL_HEIGHT: usize = 16;
/// Text color the status line is drawn with.
pub const STATUS_TEXT_COLOR: &str = "white";
/// Text color the classification result is drawn with.
pub const CLASSIFICATION_TEXT_COLOR: &str = "black";
