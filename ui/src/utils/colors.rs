//! Shared color constants for the UI.

use egui::Color32;

/// Forest green for the amount and success notices.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for inline validation errors and failed actions.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber for the "Generating..." state.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

/// Blue of the header and the generate button.
pub const COLOR_BLUE: Color32 = Color32::from_rgb(37, 99, 235);

/// Secondary text such as hints and footers.
pub const COLOR_MUTED: Color32 = Color32::from_rgb(100, 116, 139);
