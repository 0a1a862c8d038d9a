use std::time::Duration;

use egui::RichText;
use paylink_business::GenerateRequest;

use crate::actions;
use crate::state::State;
use crate::utils::colors::{COLOR_BLUE, COLOR_MUTED};
use crate::widgets;

/// Width above which the form and the result sit side by side.
const TWO_COLUMN_WIDTH: f32 = 760.0;
/// Poll interval while an export is rendering in the background.
const EXPORT_POLL: Duration = Duration::from_millis(50);

pub struct PaymentApp {
    pub state: State,
}

impl PaymentApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for PaymentApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        if self.state.form.poll(now).is_some() {
            self.state.notice = None;
        }
        actions::poll_exports(&mut self.state, ctx, now);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new("UPI Payment Generator").color(COLOR_BLUE).strong());
                ui.label(
                    RichText::new("Create instant payment links and QR codes").color(COLOR_MUTED),
                );
            });
            ui.add_space(8.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Works with Google Pay, PhonePe, Paytm and every UPI app")
                        .color(COLOR_MUTED)
                        .small(),
                );
                powered_by_egui_and_eframe(ui);
            });
        });

        let mut picked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if ui.available_width() >= TWO_COLUMN_WIDTH {
                    ui.columns(2, |columns| {
                        form_column(&mut columns[0], &mut self.state, now);
                        picked = result_column(&mut columns[1], &mut self.state, now);
                    });
                } else {
                    form_column(ui, &mut self.state, now);
                    ui.separator();
                    picked = result_column(ui, &mut self.state, now);
                }
            });
        });

        if let Some(affordance) = picked {
            actions::run_affordance(&mut self.state, ctx, affordance, now);
        }

        widgets::manual_dialog(ctx, &mut self.state.manual);

        schedule_repaint(ctx, &self.state, now);
    }
}

fn form_column(ui: &mut egui::Ui, state: &mut State, now: f64) {
    if let Some(GenerateRequest::Rejected(errors)) = widgets::payment_form(ui, state, now) {
        log::info!("payment link not generated, {} invalid fields", errors.len());
    }
}

fn result_column(
    ui: &mut egui::Ui,
    state: &mut State,
    now: f64,
) -> Option<paylink_business::Affordance> {
    let picked = widgets::link_result(ui, state, now);
    if let Some(generated) = state.form.generated() {
        ui.add_space(16.0);
        ui.separator();
        widgets::payment_summary(ui, generated);
    }
    picked
}

/// Wakes the app for the next pending deadline.
fn schedule_repaint(ctx: &egui::Context, state: &State, now: f64) {
    if let Some(remaining) = state.form.remaining(now) {
        ctx.request_repaint_after(remaining);
    }
    if let Some(remaining) = state.form.copy_feedback_remaining(now) {
        ctx.request_repaint_after(remaining);
    }
    if state.exports.is_busy() {
        ctx.request_repaint_after(EXPORT_POLL);
    }
}

fn powered_by_egui_and_eframe(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label("Powered by ");
        ui.hyperlink_to("egui", "https://github.com/emilk/egui");
        ui.label(" and ");
        ui.hyperlink_to(
            "eframe",
            "https://github.com/emilk/egui/tree/master/crates/eframe",
        );
        ui.label(".");
    });
}
