use paylink_business::{PaymentConfig, PaymentForm};
use paylink_render::RenderOptions;

use crate::platform::Platform;
use crate::utils::export_worker::ExportWorker;
use crate::utils::qr_texture::QrTextureCache;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// One-line status shown under the result actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Content shown for manual copying after every capability failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualDialog {
    pub title: String,
    pub content: String,
    /// Last failure, shown above the content.
    pub reason: Option<String>,
}

/// The main application state.
#[derive(Debug, bon::Builder)]
pub struct State {
    #[builder(default)]
    pub config: PaymentConfig,
    #[builder(default)]
    pub form: PaymentForm,
    #[builder(default)]
    pub platform: Platform,
    #[builder(default)]
    pub exports: ExportWorker,
    #[builder(skip)]
    pub qr: QrTextureCache,
    #[builder(skip)]
    pub notice: Option<Notice>,
    #[builder(skip)]
    pub manual: Option<ManualDialog>,
}

impl Default for State {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl State {
    pub fn new(config: PaymentConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// State for tests: no generation delay and inline 1x rendering.
    pub fn test(platform: Platform) -> Self {
        Self::builder()
            .config(PaymentConfig::instant())
            .platform(platform)
            .exports(ExportWorker::inline(RenderOptions::with_scale(1.0)))
            .build()
    }

    /// Clears the form and everything derived from the last link, including
/// exports that have not been delivered yet.
    pub fn reset(&mut self) {
        self.form.reset();
        self.exports.discard_pending();
        self.qr.clear();
        self.notice = None;
        self.manual = None;
    }
}
