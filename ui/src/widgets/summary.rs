use egui::{RichText, Ui};
use paylink_business::{CURRENCY_CODE, GeneratedLink};

use crate::utils::colors::{COLOR_GREEN, COLOR_MUTED};

pub const SUMMARY_TITLE: &str = "Payment Summary";

/// Read-only recap of the values the link was built from.
///
/// Recipient and description rows appear only when they were filled in.
pub fn payment_summary(ui: &mut Ui, generated: &GeneratedLink) {
    let draft = &generated.draft;

    ui.label(RichText::new(SUMMARY_TITLE).strong());
    ui.add_space(4.0);

    egui::Grid::new("payment_summary")
        .num_columns(2)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            if !draft.name().is_empty() {
                row(ui, "Recipient", RichText::new(draft.name()));
            }
            row(ui, "UPI ID", RichText::new(draft.payee_address()).monospace());
            row(
                ui,
                "Amount",
                RichText::new(format!("{CURRENCY_CODE} {}", draft.amount()))
                    .color(COLOR_GREEN)
                    .strong(),
            );
            if !draft.description().is_empty() {
                row(ui, "Description", RichText::new(draft.description()));
            }
        });
}

fn row(ui: &mut Ui, label: &str, value: RichText) {
    ui.label(RichText::new(label).color(COLOR_MUTED));
    ui.label(value);
    ui.end_row();
}
