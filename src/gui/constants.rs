//! GUI-specific constants for layout and banner colors

/// Settings window dimensions
pub const WINDOW_WIDTH: f32 = 560.0;
pub const WINDOW_HEIGHT: f32 = 640.0;
pub const WINDOW_MIN_WIDTH: f32 = 420.0;
pub const WINDOW_MIN_HEIGHT: f32 = 480.0;

/// Layout spacing
pub const PADDING: f32 = 10.0;
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Recipient editor height in text rows
pub const RECIPIENT_ROWS: usize = 5;

/// Banner colors
pub const BANNER_SUCCESS: egui::Color32 = egui::Color32::from_rgb(0, 160, 0);
pub const BANNER_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
