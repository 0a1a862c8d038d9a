//! Clipboard access for the payment link generator.
//!
//! The generator writes two kinds of content: the link text and the rendered
//! QR card as an RGBA bitmap. Both go through [`ClipboardProvider`] so the UI
//! can fall back to other capabilities when a write fails, and tests can use
//! [`MemoryClipboard`] instead of the system clipboard.
//!
//! # Platform Support
//!
//! - **Windows / macOS / Linux (X11, Wayland)**: [`SystemClipboard`] via `arboard`
//! - **Web (WASM)**: no system clipboard; every write reports
//!   [`ClipboardError::Unsupported`] and the UI falls back to egui's own copy

use std::sync::{Arc, Mutex};

/// RGBA image written to the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    /// Width of the image in pixels.
    pub width: usize,
    /// Height of the image in pixels.
    pub height: usize,
    /// Unpremultiplied RGBA bytes, row-major, `width * height * 4` long.
    pub bytes: Vec<u8>,
}

impl ClipboardImage {
    pub fn new(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self, ClipboardError> {
        let expected = width * height * 4;
        if bytes.len() != expected {
            return Err(ClipboardError::ImageError(format!(
                "expected {expected} RGBA bytes for {width}x{height}, got {}",
                bytes.len()
            )));
        }
        Ok(Self {
            width,
            height,
            bytes,
        })
    }
}

/// Error types for clipboard operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard on this platform, or it refuses this content type.
    #[error("Clipboard not supported on this platform")]
    Unsupported,
    /// Failed to access the clipboard.
    #[error("Clipboard access error: {0}")]
    AccessError(String),
    /// Image data was rejected.
    #[error("Image processing error: {0}")]
    ImageError(String),
}

/// Trait for clipboard writes, enabling mock implementations for testing.
pub trait ClipboardProvider {
    /// Replaces the clipboard contents with `text`.
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Replaces the clipboard contents with an image.
    fn set_image(&self, image: &ClipboardImage) -> Result<(), ClipboardError>;
}

/// System clipboard implementation using the `arboard` crate.
///
/// The `arboard::Clipboard` handle is created on first use and kept alive:
/// on Linux the content is served by this process and vanishes when the
/// handle is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    #[cfg(not(target_arch = "wasm32"))]
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_clipboard<T>(
        &self,
        op: impl FnOnce(&mut arboard::Clipboard) -> Result<T, arboard::Error>,
    ) -> Result<T, ClipboardError> {
        let mut guard = self
            .handle
            .lock()
            .map_err(|_poisoned| {
                ClipboardError::AccessError("clipboard lock poisoned".to_owned())
            })?;

        if guard.is_none() {
            *guard = Some(arboard::Clipboard::new().map_err(map_arboard_error)?);
        }
        let Some(clipboard) = guard.as_mut() else {
            return Err(ClipboardError::Unsupported);
        };

        let result = op(clipboard);
        if result.is_err() {
            // A broken handle is rebuilt on the next write.
            *guard = None;
        }
        result.map_err(map_arboard_error)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ClipboardProvider for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.with_clipboard(|clipboard| clipboard.set_text(text))?;
        log::debug!(target: "paylink_clipboard", "text written, len={}", text.len());
        Ok(())
    }

    fn set_image(&self, image: &ClipboardImage) -> Result<(), ClipboardError> {
        self.with_clipboard(|clipboard| {
            clipboard.set_image(arboard::ImageData {
                width: image.width,
                height: image.height,
                bytes: std::borrow::Cow::Borrowed(&image.bytes),
            })
        })?;
        log::debug!(
            target: "paylink_clipboard",
            "image written, {}x{}",
            image.width,
            image.height
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_arboard_error(err: arboard::Error) -> ClipboardError {
    match err {
        arboard::Error::ClipboardNotSupported => ClipboardError::Unsupported,
        arboard::Error::ConversionFailure => {
            ClipboardError::ImageError("clipboard rejected the image format".to_owned())
        }
        other => ClipboardError::AccessError(other.to_string()),
    }
}

#[cfg(target_arch = "wasm32")]
impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(target_arch = "wasm32")]
impl ClipboardProvider for SystemClipboard {
    fn set_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unsupported)
    }

    fn set_image(&self, _image: &ClipboardImage) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unsupported)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    text: Option<String>,
    image: Option<ClipboardImage>,
    text_error: Option<ClipboardError>,
    image_error: Option<ClipboardError>,
    writes: usize,
}

/// In-memory clipboard for tests and headless runs.
///
/// Clones share the same contents, so a test can keep one handle and give
/// another to the code under test.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write with `error`.
    pub fn failing(error: ClipboardError) -> Self {
        let clipboard = Self::new();
        clipboard.fail_text(Some(error.clone()));
        clipboard.fail_images(Some(error));
        clipboard
    }

    /// Makes text writes fail with `error` (or succeed again with `None`).
    pub fn fail_text(&self, error: Option<ClipboardError>) {
        self.with_state(|state| state.text_error = error);
    }

    /// Makes image writes fail with `error` (or succeed again with `None`).
    pub fn fail_images(&self, error: Option<ClipboardError>) {
        self.with_state(|state| state.image_error = error);
    }

    pub fn text(&self) -> Option<String> {
        self.with_state(|state| state.text.clone())
    }

    pub fn image(&self) -> Option<ClipboardImage> {
        self.with_state(|state| state.image.clone())
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.with_state(|state| state.writes)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MemoryState) -> T) -> T {
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.with_state(|state| {
            if let Some(err) = &state.text_error {
                return Err(err.clone());
            }
            state.text = Some(text.to_owned());
            state.image = None;
            state.writes += 1;
            Ok(())
        })
    }

    fn set_image(&self, image: &ClipboardImage) -> Result<(), ClipboardError> {
        self.with_state(|state| {
            if let Some(err) = &state.image_error {
                return Err(err.clone());
            }
            state.image = Some(image.clone());
            state.text = None;
            state.writes += 1;
            Ok(())
        })
    }
}
