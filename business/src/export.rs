//! Data handed to the image renderers and file exporters.

use chrono::{DateTime, Local};

use crate::draft::FALLBACK_LABEL;
use crate::form::GeneratedLink;
use crate::link::{CURRENCY_CODE, PaymentLink};

/// Which image is being exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    /// Shareable card with the QR code front and centre.
    Card,
    /// Receipt-style summary with the QR code below the details.
    Receipt,
}

impl ExportKind {
    pub fn slug(self) -> &'static str {
        match self {
            Self::Card => "qr-card",
            Self::Receipt => "receipt",
        }
    }
}

/// Everything an exported image shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContent {
    pub link: PaymentLink,
    /// Recipient name, `None` when left empty on the form.
    pub recipient: Option<String>,
    pub payee_address: String,
    pub payee_local_part: String,
    pub amount: String,
    /// Description, `None` when left empty on the form.
    pub description: Option<String>,
    pub generated_at: DateTime<Local>,
}

impl ExportContent {
    pub fn new(generated: &GeneratedLink, generated_at: DateTime<Local>) -> Self {
        let draft = &generated.draft;
        Self {
            link: generated.link.clone(),
            recipient: non_empty(draft.name()),
            payee_address: draft.payee_address().to_owned(),
            payee_local_part: draft.payee_local_part().to_owned(),
            amount: draft.amount().to_owned(),
            description: non_empty(draft.description()),
            generated_at,
        }
    }

    /// Recipient line shown on images; falls back like the link does.
    pub fn recipient_label(&self) -> &str {
        self.recipient.as_deref().unwrap_or(FALLBACK_LABEL)
    }

    /// Amount with currency, e.g. `INR 100`.
    pub fn amount_label(&self) -> String {
        format!("{CURRENCY_CODE} {}", self.amount)
    }

    pub fn timestamp_label(&self) -> String {
        self.generated_at.format("%d %b %Y, %H:%M:%S").to_string()
    }

    /// `upi-<kind>-<local part>-<timestamp>.png`
    pub fn filename(&self, kind: ExportKind) -> String {
        export_filename(kind, &self.payee_local_part, self.generated_at)
    }

    /// Plain-text version of the receipt, used when no image can be delivered.
    pub fn receipt_text(&self) -> String {
        let mut lines = Vec::with_capacity(7);
        lines.push("UPI Payment Request".to_owned());
        if let Some(recipient) = &self.recipient {
            lines.push(format!("Recipient: {recipient}"));
        }
        lines.push(format!("UPI ID: {}", self.payee_address));
        lines.push(format!("Amount: {}", self.amount_label()));
        if let Some(description) = &self.description {
            lines.push(format!("Description: {description}"));
        }
        lines.push(format!("Generated: {}", self.timestamp_label()));
        lines.push(format!("Link: {}", self.link));
        lines.join("\n")
    }
}

/// Builds the download file name for an export.
///
/// Characters outside `[A-Za-z0-9_-]` in the payee part become `_`.
pub fn export_filename(kind: ExportKind, payee_local_part: &str, at: DateTime<Local>) -> String {
    let payee: String = payee_local_part
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let payee = if payee.is_empty() { "payment".to_owned() } else { payee };

    format!(
        "upi-{}-{payee}-{}.png",
        kind.slug(),
        at.format("%Y%m%d-%H%M%S")
    )
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}
