//! Save result, validation and load error banners

use eframe::egui;

use crate::gui::constants::*;
use crate::store::{FormState, ResultBanner, SaveState};

pub const SAVE_SUCCEEDED: &str = "Save successful!";
pub const SAVE_FAILED: &str = "Save failed!";
pub const INVALID_RECIPIENTS: &str = "Please enter valid email addresses";

fn banner(ui: &mut egui::Ui, color: egui::Color32, text: &str) {
    egui::Frame::default()
        .inner_margin(6.0)
        .stroke(egui::Stroke::new(1.0, color))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(color, text);
        });
    ui.add_space(ITEM_SPACING);
}

pub fn ui(ui: &mut egui::Ui, state: &FormState) {
    match state.banner() {
        Some(ResultBanner::Success) => banner(ui, BANNER_SUCCESS, SAVE_SUCCEEDED),
        Some(ResultBanner::Failure) => banner(ui, BANNER_ERROR, SAVE_FAILED),
        None => {}
    }

    if state.validation_banner_visible() {
        banner(ui, BANNER_ERROR, INVALID_RECIPIENTS);
        if let Some(err) = &state.validation_error {
            ui.label(egui::RichText::new(err.to_string()).small().weak());
            ui.add_space(ITEM_SPACING);
        }
    }

    // A failed save reports through its own banner
    if state.save_state != SaveState::Failed {
        if let Some(message) = &state.last_error {
            ui.colored_label(BANNER_ERROR, message);
            ui.add_space(ITEM_SPACING);
        }
    }
}
