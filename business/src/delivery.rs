//! Ordered fallback over optional platform capabilities.
//!
//! Every way of handing the result to the user (copy, share, save) is an
//! [`Affordance`] backed by a ladder of [`Capability`] values. The ladder is
//! walked in order until one capability succeeds. When all of them fail the
//! caller shows the raw content in a dialog, so no action is lost silently.

use std::fmt;
use std::str::FromStr;

/// A platform API that may or may not be available at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// OS share sheet.
    NativeShare,
    /// System clipboard, text.
    SystemClipboard,
    /// Clipboard through the windowing integration (egui output).
    AppClipboard,
    /// System clipboard, image.
    ImageClipboard,
    /// Native "Save as" dialog.
    SaveDialog,
    /// Write straight into the user's downloads folder.
    DownloadsFolder,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NativeShare => "native-share",
            Self::SystemClipboard => "system-clipboard",
            Self::AppClipboard => "app-clipboard",
            Self::ImageClipboard => "image-clipboard",
            Self::SaveDialog => "save-dialog",
            Self::DownloadsFolder => "downloads-folder",
        };
        f.write_str(name)
    }
}

/// Why a capability could not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    /// Not present on this platform or build.
    #[error("not supported on this platform")]
    Unsupported,
    /// The user dismissed the dialog; stop without falling back.
    #[error("cancelled by user")]
    Cancelled,
    #[error("{0}")]
    Failed(String),
}

/// Result of walking a ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered(Capability),
    Cancelled(Capability),
    /// Every capability failed; the content must be shown to the user directly.
    Manual {
        failures: Vec<(Capability, CapabilityError)>,
    },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }

    pub fn needs_manual(&self) -> bool {
        matches!(self, Self::Manual { .. })
    }
}

/// Tries each capability in order until one succeeds or the user cancels.
pub fn deliver<F>(ladder: &[Capability], mut attempt: F) -> DeliveryOutcome
where
    F: FnMut(Capability) -> Result<(), CapabilityError>,
{
    let mut failures = Vec::new();

    for &capability in ladder {
        match attempt(capability) {
            Ok(()) => {
                log::info!("delivered via {capability}");
                return DeliveryOutcome::Delivered(capability);
            }
            Err(CapabilityError::Cancelled) => {
                log::info!("{capability} cancelled by user");
                return DeliveryOutcome::Cancelled(capability);
            }
            Err(err) => {
                log::warn!("{capability} failed: {err}");
                failures.push((capability, err));
            }
        }
    }

    log::warn!("all capabilities exhausted, falling back to manual display");
    DeliveryOutcome::Manual { failures }
}

/// A user-facing button for handing over the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affordance {
    CopyLink,
    ShareLink,
    CopyCard,
    SaveCard,
    SaveReceipt,
}

impl Affordance {
    pub const ALL: [Self; 5] = [
        Self::CopyLink,
        Self::ShareLink,
        Self::CopyCard,
        Self::SaveCard,
        Self::SaveReceipt,
    ];

    /// Capabilities tried for this affordance, best first.
    pub fn ladder(self) -> &'static [Capability] {
        use Capability::{
            AppClipboard, DownloadsFolder, ImageClipboard, NativeShare, SaveDialog,
            SystemClipboard,
        };

        match self {
            Self::CopyLink => &[SystemClipboard, AppClipboard],
            Self::ShareLink => &[NativeShare, SystemClipboard, AppClipboard],
            Self::CopyCard => &[ImageClipboard, SystemClipboard],
            Self::SaveCard | Self::SaveReceipt => &[SaveDialog, DownloadsFolder],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CopyLink => "Copy",
            Self::ShareLink => "Share Link",
            Self::CopyCard => "Copy QR Card",
            Self::SaveCard => "Download QR Card",
            Self::SaveReceipt => "Download Receipt",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::CopyLink => "copy-link",
            Self::ShareLink => "share-link",
            Self::CopyCard => "copy-card",
            Self::SaveCard => "save-card",
            Self::SaveReceipt => "save-receipt",
        }
    }
}

impl fmt::Display for Affordance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown affordance `{0}`")]
pub struct UnknownAffordance(pub String);

impl FromStr for Affordance {
    type Err = UnknownAffordance;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|affordance| affordance.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownAffordance(s.to_owned()))
    }
}
