use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use tiny_skia::Pixmap;

use crate::error::{RenderError, Result};

/// Rendered export image as unpremultiplied RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl RenderedImage {
    pub(crate) fn from_pixmap(pixmap: &Pixmap) -> Self {
        let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
        for pixel in pixmap.pixels() {
            let color = pixel.demultiply();
            rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            rgba,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGBA bytes, `width * height * 4` long.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// RGBA value at `(x, y)`, `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = ((y * self.width + x) * 4) as usize;
        let px = self.rgba.get(start..start + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Encodes the image as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let image = RgbaImage::from_raw(self.width, self.height, self.rgba.clone()).ok_or(
            RenderError::Surface {
                width: self.width,
                height: self.height,
            },
        )?;
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_encoding() {
        let mut pixmap = Pixmap::new(3, 2).expect("pixmap");
        pixmap.fill(tiny_skia::Color::from_rgba8(10, 20, 30, 255));
        let image = RenderedImage::from_pixmap(&pixmap);

        assert_eq!(image.pixel(2, 1), Some([10, 20, 30, 255]));
        assert_eq!(image.pixel(3, 0), None);

        let png = image.to_png().expect("png encodes");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).expect("png decodes").to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.as_raw(), image.rgba());
    }

    #[test]
    fn test_transparent_pixels_are_demultiplied() {
        let pixmap = Pixmap::new(1, 1).expect("pixmap");
        let image = RenderedImage::from_pixmap(&pixmap);
        assert_eq!(image.pixel(0, 0), Some([0, 0, 0, 0]));
    }
}
