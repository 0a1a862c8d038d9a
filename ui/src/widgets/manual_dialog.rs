//! Fallback dialog showing content the platform could not deliver.

use egui::{RichText, TextEdit, Vec2, Window};

use crate::state::ManualDialog;
use crate::utils::colors::COLOR_RED;

pub const CLOSE_LABEL: &str = "Close";

/// Shows the dialog while `dialog` is `Some`; closing clears it.
pub fn manual_dialog(ctx: &egui::Context, dialog: &mut Option<ManualDialog>) {
    let Some(current) = dialog.as_ref() else {
        return;
    };

    let mut close_clicked = false;

    Window::new(current.title.as_str())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label("Select the text below and copy it with Ctrl+C / Cmd+C.");
            if let Some(reason) = &current.reason {
                ui.label(RichText::new(reason).color(COLOR_RED).small());
            }
            ui.add_space(8.0);

            let mut content = current.content.as_str();
            ui.add(
                TextEdit::multiline(&mut content)
                    .desired_width(380.0)
                    .desired_rows(4)
                    .font(egui::TextStyle::Monospace),
            );

            ui.add_space(8.0);
            if ui.button(CLOSE_LABEL).clicked() {
                close_clicked = true;
            }
        });

    if close_clicked {
        log::debug!("manual dialog closed");
        *dialog = None;
    }
}
