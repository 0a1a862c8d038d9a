//! Drawing surface for export images.
//!
//! The canvas wraps a tiny-skia [`Pixmap`]. Layout code works in logical
//! units; the canvas scale maps them to device pixels, so the same layout
//! renders at 1x for previews and 2x for crisp downloads.

use tiny_skia::{ColorU8, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};
use ttf_parser::{Face, GlyphId};

use crate::bitmap::RenderedImage;
use crate::error::{RenderError, Result};
use crate::font::Font;
use crate::qr::{QUIET_ZONE_MODULES, QrMatrix};

/// Horizontal anchor of a text run relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in logical units.
    pub size: f32,
    pub color: ColorU8,
    pub align: Align,
}

impl TextStyle {
    pub fn new(size: f32, color: ColorU8) -> Self {
        Self {
            size,
            color,
            align: Align::Left,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

pub struct Canvas<'f> {
    pixmap: Pixmap,
    face: Face<'f>,
    transform: Transform,
}

impl<'f> Canvas<'f> {
    /// Creates a `width` x `height` logical canvas filled with `background`.
    pub fn new(
        width: u32,
        height: u32,
        scale: f32,
        font: &'f Font,
        background: ColorU8,
    ) -> Result<Self> {
        let pixel_width = (width as f32 * scale).round() as u32;
        let pixel_height = (height as f32 * scale).round() as u32;
        let mut pixmap = Pixmap::new(pixel_width, pixel_height).ok_or(RenderError::Surface {
            width: pixel_width,
            height: pixel_height,
        })?;
        pixmap.fill(to_color(background));

        Ok(Self {
            pixmap,
            face: font.face()?,
            transform: Transform::from_scale(scale, scale),
        })
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: ColorU8) {
        let Some(rect) = Rect::from_xywh(x, y, width, height) else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &paint(color, true), self.transform, None);
    }

    pub fn fill_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        color: ColorU8,
    ) {
        if let Some(path) = rounded_rect_path(x, y, width, height, radius) {
            self.pixmap.fill_path(
                &path,
                &paint(color, true),
                FillRule::Winding,
                self.transform,
                None,
            );
        }
    }

    /// Draws a horizontal rule from `x1` to `x2`.
    pub fn hline(&mut self, x1: f32, x2: f32, y: f32, color: ColorU8, width: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(x1, y);
        pb.line_to(x2, y);
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint(color, true), &stroke, self.transform, None);
        }
    }

    /// Logical width of `text` at `size`.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let scale = size / f32::from(self.face.units_per_em());
        text.chars()
            .map(|c| f32::from(self.advance(c)) * scale)
            .sum()
    }

    /// Height of one line of text at `size`.
    pub fn line_height(&self, size: f32) -> f32 {
        let face = &self.face;
        let units = f32::from(face.ascender()) - f32::from(face.descender())
            + f32::from(face.line_gap());
        units * size / f32::from(face.units_per_em())
    }

    /// Draws `text` with its top edge at `top`.
    pub fn draw_text(&mut self, text: &str, x: f32, top: f32, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        let scale = style.size / f32::from(self.face.units_per_em());
        let width = self.measure(text, style.size);
        let mut pen_x = match style.align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        let baseline = top + f32::from(self.face.ascender()) * scale;
        let paint = paint(style.color, true);

        for c in text.chars() {
            let glyph = self.glyph(c);
            let mut builder = GlyphPathBuilder::new(pen_x, baseline, scale);
            if self.face.outline_glyph(glyph, &mut builder).is_some() {
                if let Some(path) = builder.finish() {
                    self.pixmap
                        .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
                }
            }
            pen_x += f32::from(self.advance(c)) * scale;
        }
    }

    /// Shortens `text` with a trailing ellipsis until it fits in `max_width`.
    pub fn ellipsize(&self, text: &str, size: f32, max_width: f32) -> String {
        if self.measure(text, size) <= max_width {
            return text.to_owned();
        }
        let ellipsis = "...";
        let budget = max_width - self.measure(ellipsis, size);
        let mut width = 0.0;
        let mut out = String::new();
        for c in text.chars() {
            width += self.measure(c.encode_utf8(&mut [0; 4]), size);
            if width > budget {
                break;
            }
            out.push(c);
        }
        out.push_str(ellipsis);
        out
    }

    /// Splits `text` into lines no wider than `max_width`.
    ///
    /// Breaks at spaces where possible; a word longer than a line is split
    /// between characters.
    pub fn wrap(&self, text: &str, size: f32, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split(' ') {
            let candidate = if current.is_empty() {
                word.to_owned()
            } else {
                format!("{current} {word}")
            };
            if self.measure(&candidate, size) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for c in word.chars() {
                current.push(c);
                if self.measure(&current, size) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Draws `matrix` as a `size` x `size` square with a light quiet zone.
    pub fn draw_qr(
        &mut self,
        matrix: &QrMatrix,
        x: f32,
        y: f32,
        size: f32,
        dark: ColorU8,
        light: ColorU8,
    ) {
        self.fill_rect(x, y, size, size, light);

        let modules = (matrix.width() + 2 * QUIET_ZONE_MODULES) as f32;
        let module = size / modules;
        let origin_x = x + QUIET_ZONE_MODULES as f32 * module;
        let origin_y = y + QUIET_ZONE_MODULES as f32 * module;

        let mut pb = PathBuilder::new();
        for (mx, my) in matrix.dark_modules() {
            if let Some(rect) = Rect::from_xywh(
                origin_x + mx as f32 * module,
                origin_y + my as f32 * module,
                module,
                module,
            ) {
                pb.push_rect(rect);
            }
        }
        if let Some(path) = pb.finish() {
            // Adjacent modules must not leave hairline seams.
            self.pixmap.fill_path(
                &path,
                &paint(dark, false),
                FillRule::Winding,
                self.transform,
                None,
            );
        }
    }

    pub fn finish(self) -> RenderedImage {
        RenderedImage::from_pixmap(&self.pixmap)
    }

    fn glyph(&self, c: char) -> GlyphId {
        self.face
            .glyph_index(c)
            .or_else(|| self.face.glyph_index('?'))
            .unwrap_or(GlyphId(0))
    }

    fn advance(&self, c: char) -> u16 {
        self.face.glyph_hor_advance(self.glyph(c)).unwrap_or(0)
    }
}

/// Opaque color from RGB components.
pub const fn rgb(r: u8, g: u8, b: u8) -> ColorU8 {
    ColorU8::from_rgba(r, g, b, 255)
}

fn to_color(color: ColorU8) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.red(), color.green(), color.blue(), color.alpha())
}

fn paint(color: ColorU8, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.red(), color.green(), color.blue(), color.alpha());
    paint.anti_alias = anti_alias;
    paint
}

fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    let r = radius.min(w.min(h) / 2.0).max(0.0);
    let mut pb = PathBuilder::new();

    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

/// Collects a glyph outline into a path at a pen position.
struct GlyphPathBuilder {
    path_builder: PathBuilder,
    x: f32,
    y: f32,
    scale: f32,
}

impl GlyphPathBuilder {
    fn new(x: f32, y: f32, scale: f32) -> Self {
        Self {
            path_builder: PathBuilder::new(),
            x,
            y,
            scale,
        }
    }

    fn tx(&self, gx: f32) -> f32 {
        self.x + gx * self.scale
    }

    // Font units grow upwards.
    fn ty(&self, gy: f32) -> f32 {
        self.y - gy * self.scale
    }

    fn finish(self) -> Option<Path> {
        self.path_builder.finish()
    }
}

impl ttf_parser::OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path_builder.move_to(self.tx(x), self.ty(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path_builder.line_to(self.tx(x), self.ty(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path_builder
            .quad_to(self.tx(x1), self.ty(y1), self.tx(x), self.ty(y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path_builder.cubic_to(
            self.tx(x1),
            self.ty(y1),
            self.tx(x2),
            self.ty(y2),
            self.tx(x),
            self.ty(y),
        );
    }

    fn close(&mut self) {
        self.path_builder.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: ColorU8 = rgb(255, 255, 255);
    const BLACK: ColorU8 = rgb(0, 0, 0);

    #[test]
    fn test_canvas_scales_to_device_pixels() {
        let font = Font::default();
        let canvas = Canvas::new(100, 50, 2.0, &font, WHITE).expect("canvas");
        let image = canvas.finish();
        assert_eq!((image.width(), image.height()), (200, 100));
        assert_eq!(image.pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_zero_sized_canvas_fails() {
        let font = Font::default();
        let err = Canvas::new(0, 10, 1.0, &font, WHITE)
            .err()
            .expect("zero width must fail");
        assert!(matches!(err, RenderError::Surface { width: 0, .. }));
    }

    #[test]
    fn test_fill_rect() {
        let font = Font::default();
        let mut canvas = Canvas::new(20, 20, 1.0, &font, WHITE).expect("canvas");
        canvas.fill_rect(5.0, 5.0, 10.0, 10.0, rgb(255, 0, 0));
        let image = canvas.finish();
        assert_eq!(image.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(image.pixel(1, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_text_leaves_ink() {
        let font = Font::default();
        let mut canvas = Canvas::new(120, 40, 1.0, &font, WHITE).expect("canvas");
        canvas.draw_text("UPI 100", 4.0, 4.0, TextStyle::new(24.0, BLACK));
        let image = canvas.finish();
        let inked = image.rgba().chunks_exact(4).any(|px| px[0] < 128);
        assert!(inked, "text should darken some pixels");
    }

    #[test]
    fn test_measure_grows_with_text() {
        let font = Font::default();
        let canvas = Canvas::new(10, 10, 1.0, &font, WHITE).expect("canvas");
        let short = canvas.measure("ab", 16.0);
        let long = canvas.measure("abcd", 16.0);
        assert!(short > 0.0);
        assert!(long > short);
        assert!(canvas.line_height(16.0) > 16.0 * 0.8);
    }

    #[test]
    fn test_ellipsize() {
        let font = Font::default();
        let canvas = Canvas::new(10, 10, 1.0, &font, WHITE).expect("canvas");
        assert_eq!(canvas.ellipsize("short", 16.0, 500.0), "short");

        let text = "a very long recipient name that will never fit";
        let cut = canvas.ellipsize(text, 16.0, 80.0);
        assert!(cut.ends_with("..."));
        assert!(canvas.measure(&cut, 16.0) <= 80.0);
    }

    #[test]
    fn test_wrap_keeps_every_character() {
        let font = Font::default();
        let canvas = Canvas::new(10, 10, 1.0, &font, WHITE).expect("canvas");
        let text = "upi://pay?pa=john.doe@okhdfc&pn=John%20Doe&am=1500&cu=INR&tn=Books";
        let lines = canvas.wrap(text, 14.0, 120.0);

        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), text);
        for line in &lines {
            assert!(canvas.measure(line, 14.0) <= 120.0, "line too wide: {line}");
        }
    }

    #[test]
    fn test_wrap_empty_text_gives_one_line() {
        let font = Font::default();
        let canvas = Canvas::new(10, 10, 1.0, &font, WHITE).expect("canvas");
        assert_eq!(canvas.wrap("", 14.0, 100.0), [String::new()]);
    }

    #[test]
    fn test_draw_qr_has_dark_finder() {
        let font = Font::default();
        let matrix = QrMatrix::encode("upi://pay?pa=a@b").expect("qr");
        let mut canvas = Canvas::new(300, 300, 1.0, &font, rgb(0, 0, 255)).expect("canvas");
        canvas.draw_qr(&matrix, 0.0, 0.0, 300.0, BLACK, WHITE);
        let image = canvas.finish();

        let module = 300.0 / (matrix.width() + 2 * QUIET_ZONE_MODULES) as f32;
        let inside_finder = (QUIET_ZONE_MODULES as f32 * module + module / 2.0) as u32;
        assert_eq!(image.pixel(inside_finder, inside_finder), Some([0, 0, 0, 255]));
        assert_eq!(image.pixel(1, 1), Some([255, 255, 255, 255]), "quiet zone is light");
    }
}
