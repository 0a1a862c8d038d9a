//! Result panel: the generated link, its QR code and the result actions.

use egui::{Color32, Frame, Margin, RichText, TextEdit, Ui};
use paylink_business::Affordance;

use crate::state::{NoticeKind, State};
use crate::utils::colors::{COLOR_GREEN, COLOR_MUTED, COLOR_RED};

pub const PLACEHOLDER_TITLE: &str = "Ready to Generate";
pub const RESULT_TITLE: &str = "Payment Link Generated";
pub const COPIED_LABEL: &str = "Copied!";
pub const SCAN_HINT: &str = "Scan this QR code with any UPI app to make payment";

/// Renders the result panel. Returns the action the user picked, if any.
pub fn link_result(ui: &mut Ui, state: &mut State, now: f64) -> Option<Affordance> {
    let Some(generated) = state.form.generated().cloned() else {
        placeholder(ui, state.form.is_generating());
        return None;
    };

    let mut picked = None;

    ui.heading(RichText::new(RESULT_TITLE).color(COLOR_GREEN));
    ui.add_space(8.0);

    ui.label(RichText::new("Payment Link").strong());
    ui.horizontal(|ui| {
        let mut shown = generated.link.as_str();
        let copy_width = 90.0;
        ui.add(
            TextEdit::singleline(&mut shown)
                .desired_width(ui.available_width() - copy_width)
                .font(egui::TextStyle::Monospace),
        );

        if state.config.offers(Affordance::CopyLink) {
            let text = if state.form.copy_feedback_active(now) {
                COPIED_LABEL
            } else {
                Affordance::CopyLink.label()
            };
            if ui.button(text).clicked() {
                picked = Some(Affordance::CopyLink);
            }
        }
    });

    ui.add_space(12.0);
    ui.vertical_centered(|ui| {
        match state
            .qr
            .texture(ui.ctx(), &generated.link, state.config.qr_size)
        {
            Ok(texture) => {
                Frame::NONE
                    .fill(Color32::WHITE)
                    .inner_margin(Margin::same(8))
                    .corner_radius(8.0)
                    .show(ui, |ui| {
                        ui.image(egui::load::SizedTexture::from_handle(texture));
                    });
            }
            Err(error) => {
                let message = format!("Failed to generate QR code: {error}");
                ui.label(RichText::new(message).color(COLOR_RED));
            }
        }
        ui.add_space(6.0);
        ui.label(RichText::new(SCAN_HINT).color(COLOR_MUTED).small());
    });

    ui.add_space(12.0);
    ui.horizontal_wrapped(|ui| {
        let busy = state.exports.is_busy();
        for affordance in state.config.affordances.iter().copied() {
            if affordance == Affordance::CopyLink {
                continue;
            }
            let exporting = matches!(
                affordance,
                Affordance::CopyCard | Affordance::SaveCard | Affordance::SaveReceipt
            );
            if ui
                .add_enabled(!(exporting && busy), egui::Button::new(affordance.label()))
                .clicked()
            {
                picked = Some(affordance);
            }
        }
    });

    if let Some(notice) = &state.notice {
        let color = match notice.kind {
            NoticeKind::Success => COLOR_GREEN,
            NoticeKind::Info => COLOR_MUTED,
            NoticeKind::Error => COLOR_RED,
        };
        ui.add_space(6.0);
        ui.label(RichText::new(&notice.text).color(color));
    }

    picked
}

fn placeholder(ui: &mut Ui, generating: bool) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading(PLACEHOLDER_TITLE);
        ui.add_space(8.0);
        let hint = if generating {
            "Building your payment link..."
        } else {
            "Fill in the payment details and press Generate to create a UPI link and QR code"
        };
        ui.label(RichText::new(hint).color(COLOR_MUTED));
    });
}
