//! Result actions: copy, share and export the generated link.
//!
//! Each [`Affordance`] walks its capability ladder through
//! [`paylink_business::deliver`]. Image exports are rendered by the
//! [`ExportWorker`](crate::utils::export_worker::ExportWorker) first and
//! delivered when the worker reports back.

use chrono::Local;
use paylink_business::{
    Affordance, Capability, CapabilityError, DeliveryOutcome, ExportContent, ExportKind,
    GeneratedLink, deliver,
};
use paylink_clipboard::ClipboardImage;

use crate::platform::clipboard_failure;
use crate::state::{ManualDialog, Notice, State};
use crate::utils::export_worker::{ExportDone, ExportJob, ExportPayload, ExportTarget};

const SHARE_TITLE: &str = "UPI Payment Request";

/// Runs `affordance` for the current link. Does nothing without a link.
pub fn run_affordance(state: &mut State, ctx: &egui::Context, affordance: Affordance, now: f64) {
    let Some(generated) = state.form.generated().cloned() else {
        log::debug!("{affordance} ignored, no link generated");
        return;
    };
    log::info!("{affordance} requested");

    match affordance {
        Affordance::CopyLink => copy_link(state, ctx, &generated, now),
        Affordance::ShareLink => share_link(state, ctx, &generated, now),
        Affordance::CopyCard => {
            queue_export(state, &generated, ExportKind::Card, ExportTarget::Clipboard);
        }
        Affordance::SaveCard => {
            queue_export(state, &generated, ExportKind::Card, ExportTarget::File);
        }
        Affordance::SaveReceipt => {
            queue_export(state, &generated, ExportKind::Receipt, ExportTarget::File);
        }
    }
}

/// Drains finished exports and delivers them.
pub fn poll_exports(state: &mut State, ctx: &egui::Context, now: f64) {
    while let Some(done) = state.exports.try_recv() {
        finish_export(state, ctx, done, now);
    }
}

fn copy_link(state: &mut State, ctx: &egui::Context, generated: &GeneratedLink, now: f64) {
    let link = generated.link.as_str();
    let outcome = deliver(Affordance::CopyLink.ladder(), |capability| {
        copy_text_via(state, ctx, capability, link)
    });

    match outcome {
        DeliveryOutcome::Delivered(_) => {
            state.form.mark_copied(now, state.config.copy_feedback);
            state.notice = Some(Notice::success("Link copied to clipboard"));
        }
        DeliveryOutcome::Cancelled(_) => state.notice = None,
        DeliveryOutcome::Manual { failures } => {
            state.manual = Some(manual("Copy this link manually", link, &failures));
        }
    }
}

fn share_link(state: &mut State, ctx: &egui::Context, generated: &GeneratedLink, now: f64) {
    let link = generated.link.as_str();
    let outcome = deliver(Affordance::ShareLink.ladder(), |capability| match capability {
        Capability::NativeShare => state.platform.share_sheet.share(SHARE_TITLE, link),
        other => copy_text_via(state, ctx, other, link),
    });

    match outcome {
        DeliveryOutcome::Delivered(Capability::NativeShare) => {
            state.notice = Some(Notice::success("Link shared"));
        }
        DeliveryOutcome::Delivered(_) => {
            state.form.mark_copied(now, state.config.copy_feedback);
            state.notice = Some(Notice::info("Sharing unavailable, link copied to clipboard"));
        }
        DeliveryOutcome::Cancelled(_) => state.notice = Some(Notice::info("Share cancelled")),
        DeliveryOutcome::Manual { failures } => {
            state.manual = Some(manual("Share this link manually", link, &failures));
        }
    }
}

fn copy_text_via(
    state: &State,
    ctx: &egui::Context,
    capability: Capability,
    text: &str,
) -> Result<(), CapabilityError> {
    match capability {
        Capability::SystemClipboard => state
            .platform
            .clipboard
            .set_text(text)
            .map_err(clipboard_failure),
        Capability::AppClipboard if state.platform.app_clipboard => {
            ctx.copy_text(text.to_owned());
            Ok(())
        }
        _ => Err(CapabilityError::Unsupported),
    }
}

fn queue_export(
    state: &mut State,
    generated: &GeneratedLink,
    kind: ExportKind,
    target: ExportTarget,
) {
    let content = ExportContent::new(generated, Local::now());
    state.notice = Some(Notice::info(match target {
        ExportTarget::Clipboard => "Preparing QR card...",
        ExportTarget::File => "Preparing image...",
    }));
    state.exports.submit(ExportJob {
        kind,
        target,
        content,
    });
}

fn finish_export(state: &mut State, ctx: &egui::Context, done: ExportDone, now: f64) {
    let ExportDone { job, payload } = done;
    let fallback_text = match job.kind {
        ExportKind::Card => job.content.link.as_str().to_owned(),
        ExportKind::Receipt => job.content.receipt_text(),
    };

    let payload = match payload {
        Ok(payload) => payload,
        Err(err) => {
            state.notice = Some(Notice::error("Could not render the image"));
            state.manual = Some(ManualDialog {
                title: manual_title(job.kind).to_owned(),
                content: fallback_text,
                reason: Some(err.to_string()),
            });
            return;
        }
    };

    match payload {
        ExportPayload::Image(image) => {
            let link = job.content.link.as_str();
            let outcome = deliver(Affordance::CopyCard.ladder(), |capability| match capability {
                Capability::ImageClipboard => {
                    let image = ClipboardImage::new(
                        image.width() as usize,
                        image.height() as usize,
                        image.rgba().to_vec(),
                    )
                    .map_err(clipboard_failure)?;
                    state
                        .platform
                        .clipboard
                        .set_image(&image)
                        .map_err(clipboard_failure)
                }
                other => copy_text_via(state, ctx, other, link),
            });
            match outcome {
                DeliveryOutcome::Delivered(Capability::ImageClipboard) => {
                    state.notice = Some(Notice::success("QR card copied to clipboard"));
                }
                DeliveryOutcome::Delivered(_) => {
                    state.form.mark_copied(now, state.config.copy_feedback);
                    state.notice =
                        Some(Notice::info("Image copy unavailable, link copied instead"));
                }
                DeliveryOutcome::Cancelled(_) => state.notice = None,
                DeliveryOutcome::Manual { failures } => {
                    state.manual = Some(manual(manual_title(job.kind), &fallback_text, &failures));
                }
            }
        }
        ExportPayload::Png(bytes) => {
            let filename = job.content.filename(job.kind);
            let mut saved_to = None;
            let outcome = deliver(Affordance::SaveReceipt.ladder(), |capability| {
                let saver = &state.platform.file_saver;
                match capability {
                    Capability::SaveDialog => match saver.save_with_dialog(&filename, &bytes)? {
                        Some(path) => {
                            saved_to = Some(path);
                            Ok(())
                        }
                        None => Err(CapabilityError::Cancelled),
                    },
                    Capability::DownloadsFolder => {
                        saved_to = Some(saver.save_to_downloads(&filename, &bytes)?);
                        Ok(())
                    }
                    _ => Err(CapabilityError::Unsupported),
                }
            });
            match outcome {
                DeliveryOutcome::Delivered(_) => {
                    let location = saved_to
                        .map(|path| path.display().to_string())
                        .unwrap_or(filename);
                    state.notice = Some(Notice::success(format!("Saved to {location}")));
                }
                DeliveryOutcome::Cancelled(_) => {
                    state.notice = Some(Notice::info("Download cancelled"));
                }
                DeliveryOutcome::Manual { failures } => {
                    state.notice = Some(Notice::error("Could not save the image"));
                    state.manual = Some(manual(manual_title(job.kind), &fallback_text, &failures));
                }
            }
        }
    }
}

fn manual_title(kind: ExportKind) -> &'static str {
    match kind {
        ExportKind::Card => "Copy this link manually",
        ExportKind::Receipt => "Copy this receipt manually",
    }
}

fn manual(title: &str, content: &str, failures: &[(Capability, CapabilityError)]) -> ManualDialog {
    ManualDialog {
        title: title.to_owned(),
        content: content.to_owned(),
        reason: failures
            .last()
            .map(|(capability, err)| format!("{capability}: {err}")),
    }
}
