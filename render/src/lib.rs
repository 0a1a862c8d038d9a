//! Image rendering for UPI payment links.
//!
//! - [`QrMatrix`] encodes a link into QR modules for on-screen textures.
//! - [`render_share_card`] and [`render_receipt`] draw export images with
//!   tiny-skia, using `ttf-parser` outlines for text.
//! - [`RenderedImage`] hands the result to the clipboard as RGBA or to a
//!   file as PNG.

mod bitmap;
mod canvas;
mod card;
mod error;
mod font;
mod palette;
mod qr;
mod receipt;

pub use bitmap::RenderedImage;
pub use card::{CARD_HEIGHT, CARD_QR_SIZE, CARD_QR_TOP, CARD_WIDTH, render_share_card};
pub use error::{RenderError, Result};
pub use font::Font;
pub use qr::{QUIET_ZONE_MODULES, QrMatrix};
pub use receipt::{RECEIPT_QR_SIZE, RECEIPT_WIDTH, render_receipt};

use paylink_business::{ExportContent, ExportKind};

/// Settings shared by every export renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Device pixels per logical unit.
    pub scale: f32,
    pub font: Font,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            font: Font::default(),
        }
    }
}

impl RenderOptions {
    pub fn with_scale(scale: f32) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }
}

/// Renders the image for `kind`.
pub fn render_export(
    kind: ExportKind,
    content: &ExportContent,
    options: &RenderOptions,
) -> Result<RenderedImage> {
    match kind {
        ExportKind::Card => render_share_card(content, options),
        ExportKind::Receipt => render_receipt(content, options),
    }
}
