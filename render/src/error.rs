/// Error types for rendering and encoding export images.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The payload does not fit in a QR code.
    #[error("QR encoding failed: {0}")]
    Qr(String),
    /// The font bytes could not be parsed.
    #[error("font parsing failed: {0}")]
    Font(String),
    /// The pixel buffer could not be allocated.
    #[error("cannot allocate a {width}x{height} surface")]
    Surface { width: u32, height: u32 },
    /// PNG encoding failed.
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
