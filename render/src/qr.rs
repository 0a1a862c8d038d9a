//! QR code generation utilities.

use qrcode::{EcLevel, QrCode};

use crate::error::{RenderError, Result};

/// Light modules kept around the code so scanners can find its edges.
pub const QUIET_ZONE_MODULES: usize = 4;

/// Module grid of an encoded QR code. `true` is a dark module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Encodes `data` with medium error correction.
    pub fn encode(data: &str) -> Result<Self> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)
            .map_err(|err| RenderError::Qr(err.to_string()))?;
        let width = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| matches!(color, qrcode::Color::Dark))
            .collect();

        Ok(Self { width, modules })
    }

    /// Number of modules per side, without quiet zone.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }

    /// Iterates over the coordinates of dark modules.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(|(index, _)| (index % self.width, index / self.width))
    }

    /// Integer pixels per module so the code plus quiet zone fits in `size`.
    ///
    /// Never less than 1, so very small targets still produce a scannable code.
    pub fn module_scale(&self, size: usize) -> usize {
        (size / (self.width + 2 * QUIET_ZONE_MODULES)).max(1)
    }

    /// Renders to an 8-bit grayscale bitmap with quiet zone.
    ///
    /// Returns the side length and the row-major pixels (0 = dark, 255 = light).
    pub fn to_luma(&self, size: usize) -> (usize, Vec<u8>) {
        let scale = self.module_scale(size);
        let side = (self.width + 2 * QUIET_ZONE_MODULES) * scale;
        let offset = QUIET_ZONE_MODULES * scale;
        let mut pixels = vec![255u8; side * side];

        for (x, y) in self.dark_modules() {
            for dy in 0..scale {
                let row = (offset + y * scale + dy) * side;
                let start = row + offset + x * scale;
                pixels[start..start + scale].fill(0);
            }
        }

        (side, pixels)
    }
}
