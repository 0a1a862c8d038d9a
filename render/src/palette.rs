//! Colors shared by the export images.

use tiny_skia::ColorU8;

use crate::canvas::rgb;

/// Page behind the card panel.
pub const BACKDROP: ColorU8 = rgb(241, 245, 249);
/// Panel and QR quiet zone.
pub const PAPER: ColorU8 = rgb(255, 255, 255);
pub const BORDER: ColorU8 = rgb(226, 232, 240);
/// Header band, matches the generate button.
pub const ACCENT: ColorU8 = rgb(37, 99, 235);
pub const ON_ACCENT: ColorU8 = rgb(255, 255, 255);
pub const INK: ColorU8 = rgb(15, 23, 42);
pub const MUTED: ColorU8 = rgb(100, 116, 139);
/// Forest green, same as the on-screen amount.
pub const SUCCESS: ColorU8 = rgb(34, 139, 34);
