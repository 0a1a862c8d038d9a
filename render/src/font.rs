use std::borrow::Cow;

use ttf_parser::Face;

use crate::error::{RenderError, Result};

/// TrueType font used to draw text on export images.
///
/// Defaults to the Ubuntu Light face bundled with egui, so exports look like
/// the on-screen form and need no font file at runtime.
#[derive(Debug, Clone)]
pub struct Font {
    data: Cow<'static, [u8]>,
    index: u32,
}

impl Default for Font {
    fn default() -> Self {
        Self::from_static(epaint_default_fonts::UBUNTU_LIGHT)
    }
}

impl Font {
    pub fn from_static(data: &'static [u8]) -> Self {
        Self {
            data: Cow::Borrowed(data),
            index: 0,
        }
    }

    /// Loads a font from owned bytes, checking that it parses.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Self {
            data: Cow::Owned(data),
            index: 0,
        };
        font.face()?;
        Ok(font)
    }

    pub(crate) fn face(&self) -> Result<Face<'_>> {
        Face::parse(&self.data, self.index).map_err(|err| RenderError::Font(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_font_parses() {
        let font = Font::default();
        let face = font.face().expect("bundled font should parse");
        assert!(face.units_per_em() > 0);
        assert!(face.glyph_index('A').is_some(), "latin glyphs present");
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let err = Font::from_bytes(vec![0, 1, 2, 3]).expect_err("not a font");
        assert!(matches!(err, RenderError::Font(_)));
    }
}
