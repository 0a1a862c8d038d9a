//! QR code textures for the result panel.

use egui::{Color32, ColorImage, Context, TextureHandle, TextureOptions};
use paylink_business::PaymentLink;
use paylink_render::{QrMatrix, RenderError};

/// Generate a QR code image with a white quiet zone.
///
/// The module scale is an integer so edges stay sharp; the image is at most
/// `size` pixels wide unless the code itself is larger.
pub fn generate_qr_image(data: &str, size: usize) -> Result<ColorImage, RenderError> {
    let matrix = QrMatrix::encode(data)?;
    let (side, luma) = matrix.to_luma(size);
    let pixels = luma.into_iter().map(Color32::from_gray).collect();
    Ok(ColorImage::new([side, side], pixels))
}

/// Caches the texture of the current link so it is uploaded once.
#[derive(Default)]
pub struct QrTextureCache {
    key: Option<(String, u32)>,
    slot: Option<Result<TextureHandle, RenderError>>,
}

impl std::fmt::Debug for QrTextureCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrTextureCache")
            .field("key", &self.key)
            .field("loaded", &self.is_loaded())
            .field("error", &self.slot.as_ref().and_then(|slot| slot.as_ref().err()))
            .finish()
    }
}

impl QrTextureCache {
    /// Texture for `link` at `size`, rebuilt only when either changes.
    ///
    /// A failed encoding is remembered too, so it is logged once per link.
    pub fn texture(
        &mut self,
        ctx: &Context,
        link: &PaymentLink,
        size: u32,
    ) -> Result<&TextureHandle, &RenderError> {
        let key = (link.as_str().to_owned(), size);
        if self.key.as_ref() != Some(&key) {
            self.key = Some(key);
            self.slot = None;
        }

        self.slot
            .get_or_insert_with(|| upload(ctx, link, size))
            .as_ref()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.slot, Some(Ok(_)))
    }
}

fn upload(ctx: &Context, link: &PaymentLink, size: u32) -> Result<TextureHandle, RenderError> {
    let image = generate_qr_image(link.as_str(), size as usize).inspect_err(|err| {
        log::warn!("QR generation failed: {err}");
    })?;
    log::debug!("uploading {}x{} QR texture", image.width(), image.height());
    Ok(ctx.load_texture("payment_qr", image, TextureOptions::NEAREST))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paylink_business::{PaymentDraft, build_link};

    #[test]
    fn test_qr_image_fits_target() {
        let link = "upi://pay?pa=alice@bank&pn=Alice&am=100&cu=INR&tn=Payment";
        let image = generate_qr_image(link, 200).expect("qr image");
        assert_eq!(image.width(), image.height());
        assert!(image.width() <= 200);
        assert_eq!(image.pixels[0], Color32::WHITE, "corner is quiet zone");
    }

    #[test]
    fn test_qr_image_has_dark_modules() {
        let image = generate_qr_image("upi://pay?pa=a@b", 200).expect("qr image");
        assert!(image.pixels.contains(&Color32::BLACK));
    }

    #[test]
    fn test_cache_keeps_render_error_for_unencodable_link() {
        let draft = PaymentDraft::new("x".repeat(3000), "a@b", "1", "")
            .validate()
            .expect("valid draft");
        let link = build_link(&draft);
        let ctx = Context::default();
        let mut cache = QrTextureCache::default();

        let Err(err) = cache.texture(&ctx, &link, 200) else {
            panic!("link too long to encode");
        };
        assert!(matches!(err, RenderError::Qr(_)), "unexpected error: {err}");
        assert!(!cache.is_loaded());
    }

    #[test]
    fn test_oversized_payload_reports_render_error() {
        let err = generate_qr_image(&"x".repeat(8000), 200).expect_err("too large for a QR code");
        assert!(matches!(err, RenderError::Qr(_)), "unexpected error: {err}");
    }
}
