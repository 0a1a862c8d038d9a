//! Payment details form: four inputs, inline errors, generate and reset.

use egui::{Button, RichText, TextEdit, Ui};
use paylink_business::{Field, GenerateRequest};

use crate::state::State;
use crate::utils::colors::{COLOR_AMBER, COLOR_BLUE, COLOR_MUTED, COLOR_RED};

pub const GENERATE_LABEL: &str = "Generate Payment Link";
pub const GENERATING_LABEL: &str = "Generating...";
pub const RESET_LABEL: &str = "Reset";

/// Label shown above the input for `field`.
pub fn field_label(field: Field) -> &'static str {
    match field {
        Field::Name => "Recipient Name",
        Field::PayeeAddress => "UPI ID *",
        Field::Amount => "Amount (INR) *",
        Field::Description => "Payment Description",
    }
}

fn field_hint(field: Field) -> &'static str {
    match field {
        Field::Name => "Enter recipient name",
        Field::PayeeAddress => "example@upi",
        Field::Amount => "Enter amount",
        Field::Description => "What is this payment for?",
    }
}

/// Renders the form. Returns the generate request outcome when the button was pressed.
pub fn payment_form(ui: &mut Ui, state: &mut State, now: f64) -> Option<GenerateRequest> {
    ui.heading("Payment Details");
    ui.label(RichText::new("Fields marked * are required").color(COLOR_MUTED).small());
    ui.add_space(12.0);

    for field in Field::ALL {
        field_input(ui, state, field);
        ui.add_space(10.0);
    }

    let generating = state.form.is_generating();
    let mut request = None;

    ui.horizontal(|ui| {
        let (text, fill) = if generating {
            (GENERATING_LABEL, COLOR_AMBER)
        } else {
            (GENERATE_LABEL, COLOR_BLUE)
        };
        let button = Button::new(RichText::new(text).color(egui::Color32::WHITE).strong())
            .fill(fill)
            .min_size(egui::vec2(200.0, 32.0));

        if ui.add_enabled(!generating, button).clicked() {
            let outcome = state.form.request_generate(now, state.config.generate_delay);
            if let GenerateRequest::Rejected(errors) = &outcome {
                log::debug!("generate rejected with {} field errors", errors.len());
            }
            state.notice = None;
            request = Some(outcome);
        }

        if generating {
            ui.spinner();
        }

        if state.form.generated().is_some() && ui.button(RESET_LABEL).clicked() {
            state.reset();
        }
    });

    request
}

fn field_input(ui: &mut Ui, state: &mut State, field: Field) {
    let label = ui.label(RichText::new(field_label(field)).strong());

    let mut value = state.form.draft().get(field).to_owned();
    let edit = match field {
        Field::Description => TextEdit::multiline(&mut value).desired_rows(3),
        _ => TextEdit::singleline(&mut value),
    };
    let response = ui
        .add(edit.hint_text(field_hint(field)).desired_width(f32::INFINITY))
        .labelled_by(label.id);

    if response.changed() {
        state.form.handle_input_change(field, value);
    }

    if let Some(error) = state.form.errors().get(field) {
        ui.label(RichText::new(error.to_string()).color(COLOR_RED).small());
    }
}
