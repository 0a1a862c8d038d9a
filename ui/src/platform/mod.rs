//! Platform capabilities used to hand a payment link to the user.
//!
//! Every capability sits behind a trait so the delivery ladder can be
//! exercised in tests without touching the OS clipboard or file dialogs.
//!
//! # Platform Support
//!
//! - **Native (Windows, macOS, Linux)**: system clipboard via `arboard`,
//!   "Save as" dialog via `rfd`, downloads folder via `dirs`. There is no
//!   desktop share sheet, so sharing falls back to the clipboard.
//! - **Web (WASM)**: only egui's own clipboard output; every other
//!   capability reports unsupported and the ladder moves on.

use std::path::{Path, PathBuf};

use paylink_business::CapabilityError;
use paylink_clipboard::{ClipboardError, ClipboardProvider, SystemClipboard};

pub mod testing;

/// OS share sheet.
pub trait ShareSheet {
    /// Offers `text` to other apps under `title`.
    fn share(&self, title: &str, text: &str) -> Result<(), CapabilityError>;
}

/// Share sheet for platforms that have none.
#[derive(Debug, Default)]
pub struct NoShareSheet;

impl ShareSheet for NoShareSheet {
    fn share(&self, _title: &str, _text: &str) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unsupported)
    }
}

/// Error types for writing export files.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("saving files is not supported on this platform")]
    Unsupported,
    #[error("no downloads folder found")]
    NoDownloadsDir,
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<SaveError> for CapabilityError {
    fn from(err: SaveError) -> Self {
        match err {
            SaveError::Unsupported => Self::Unsupported,
            other => Self::Failed(other.to_string()),
        }
    }
}

/// Trait for writing export files, enabling mock implementations for testing.
pub trait FileSaver {
    /// Asks the user where to save `bytes`.
    ///
    /// Returns `Ok(None)` when the dialog was dismissed.
    fn save_with_dialog(&self, filename: &str, bytes: &[u8]) -> Result<Option<PathBuf>, SaveError>;

    /// Writes `bytes` into the downloads folder without asking.
    fn save_to_downloads(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, SaveError>;
}

/// File saver using the native dialog and the user's downloads folder.
#[derive(Debug, Default)]
pub struct SystemFileSaver;

#[cfg(not(target_arch = "wasm32"))]
impl FileSaver for SystemFileSaver {
    fn save_with_dialog(&self, filename: &str, bytes: &[u8]) -> Result<Option<PathBuf>, SaveError> {
        let picked = rfd::FileDialog::new()
            .set_title("Save payment image")
            .set_file_name(filename)
            .add_filter("PNG image", &["png"])
            .save_file();

        let Some(path) = picked else {
            log::debug!("save dialog dismissed");
            return Ok(None);
        };
        write_file(&path, bytes)?;
        Ok(Some(path))
    }

    fn save_to_downloads(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, SaveError> {
        let dir = dirs::download_dir().ok_or(SaveError::NoDownloadsDir)?;
        save_into(&dir, filename, bytes)
    }
}

#[cfg(target_arch = "wasm32")]
impl FileSaver for SystemFileSaver {
    fn save_with_dialog(
        &self,
        _filename: &str,
        _bytes: &[u8],
    ) -> Result<Option<PathBuf>, SaveError> {
        Err(SaveError::Unsupported)
    }

    fn save_to_downloads(&self, _filename: &str, _bytes: &[u8]) -> Result<PathBuf, SaveError> {
        Err(SaveError::Unsupported)
    }
}

/// Writes `bytes` to `dir/filename`.
pub fn save_into(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, SaveError> {
    let path = dir.join(filename);
    write_file(&path, bytes)?;
    Ok(path)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), SaveError> {
    std::fs::write(path, bytes).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

pub(crate) fn clipboard_failure(err: ClipboardError) -> CapabilityError {
    match err {
        ClipboardError::Unsupported => CapabilityError::Unsupported,
        other => CapabilityError::Failed(other.to_string()),
    }
}

/// The set of capabilities available to the app.
pub struct Platform {
    pub clipboard: Box<dyn ClipboardProvider>,
    pub share_sheet: Box<dyn ShareSheet>,
    pub file_saver: Box<dyn FileSaver>,
    /// Whether egui may place text on the clipboard through the window integration.
    pub app_clipboard: bool,
}

impl Default for Platform {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("app_clipboard", &self.app_clipboard)
            .finish_non_exhaustive()
    }
}

impl Platform {
    /// Capabilities of the running OS.
    pub fn system() -> Self {
        Self {
            clipboard: Box::new(SystemClipboard::new()),
            share_sheet: Box::new(NoShareSheet),
            file_saver: Box::new(SystemFileSaver),
            app_clipboard: true,
        }
    }
}
