//! In-memory capabilities for tests and headless runs.
//!
//! Each type is a cheap handle over shared state: keep a clone in the test
//! and move the other into [`Platform`] to observe what the app did.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use paylink_business::CapabilityError;
use paylink_clipboard::MemoryClipboard;

use super::{FileSaver, Platform, SaveError, ShareSheet};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[derive(Debug, Default)]
struct ShareState {
    response: Option<CapabilityError>,
    shared: Vec<(String, String)>,
}

/// Share sheet that records what was shared.
#[derive(Debug, Clone, Default)]
pub struct MemoryShareSheet {
    state: Arc<Mutex<ShareState>>,
}

impl MemoryShareSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A share sheet that answers every request with `error`.
    pub fn failing(error: CapabilityError) -> Self {
        let sheet = Self::new();
        lock(&sheet.state).response = Some(error);
        sheet
    }

    /// `(title, text)` of every successful share.
    pub fn shared(&self) -> Vec<(String, String)> {
        lock(&self.state).shared.clone()
    }
}

impl ShareSheet for MemoryShareSheet {
    fn share(&self, title: &str, text: &str) -> Result<(), CapabilityError> {
        let mut state = lock(&self.state);
        if let Some(err) = &state.response {
            return Err(err.clone());
        }
        state.shared.push((title.to_owned(), text.to_owned()));
        Ok(())
    }
}

/// How [`MemoryFileSaver`] answers the save dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogResponse {
    #[default]
    Save,
    Dismiss,
    Unsupported,
    Fail,
}

/// A file written by [`MemoryFileSaver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
struct SaverState {
    dialog: DialogResponse,
    downloads: bool,
    saved: Vec<SavedFile>,
}

/// File saver that keeps written files in memory.
///
/// Dialog saves land under `dialog/`, downloads under `downloads/`.
#[derive(Debug, Clone)]
pub struct MemoryFileSaver {
    state: Arc<Mutex<SaverState>>,
}

impl Default for MemoryFileSaver {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(SaverState {
                dialog: DialogResponse::Save,
                downloads: true,
                saved: Vec::new(),
            })),
        }
    }
}

impl MemoryFileSaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialog(self, response: DialogResponse) -> Self {
        lock(&self.state).dialog = response;
        self
    }

    /// Makes the downloads folder unavailable.
    pub fn without_downloads(self) -> Self {
        lock(&self.state).downloads = false;
        self
    }

    pub fn saved(&self) -> Vec<SavedFile> {
        lock(&self.state).saved.clone()
    }

    fn record(&self, dir: &str, filename: &str, bytes: &[u8]) -> PathBuf {
        let path = PathBuf::from(dir).join(filename);
        lock(&self.state).saved.push(SavedFile {
            path: path.clone(),
            bytes: bytes.to_vec(),
        });
        path
    }
}

impl FileSaver for MemoryFileSaver {
    fn save_with_dialog(&self, filename: &str, bytes: &[u8]) -> Result<Option<PathBuf>, SaveError> {
        let response = lock(&self.state).dialog;
        match response {
            DialogResponse::Save => Ok(Some(self.record("dialog", filename, bytes))),
            DialogResponse::Dismiss => Ok(None),
            DialogResponse::Unsupported => Err(SaveError::Unsupported),
            DialogResponse::Fail => Err(SaveError::Io {
                path: PathBuf::from(filename),
                source: std::io::Error::other("disk full"),
            }),
        }
    }

    fn save_to_downloads(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, SaveError> {
        let available = lock(&self.state).downloads;
        if !available {
            return Err(SaveError::NoDownloadsDir);
        }
        Ok(self.record("downloads", filename, bytes))
    }
}

impl Platform {
    /// Platform backed entirely by in-memory capabilities.
    pub fn memory(
        clipboard: MemoryClipboard,
        share_sheet: MemoryShareSheet,
        file_saver: MemoryFileSaver,
    ) -> Self {
        Self {
            clipboard: Box::new(clipboard),
            share_sheet: Box::new(share_sheet),
            file_saver: Box::new(file_saver),
            app_clipboard: true,
        }
    }
}
