//! The email settings form: banners, both sections and the save button

use eframe::egui;

use super::components::{alert_settings, banners, digest_settings};
use super::constants::*;
use crate::store::SettingsStore;

/// Renders the whole form. Returns true when the user asked to save.
pub fn ui(ui: &mut egui::Ui, store: &mut SettingsStore) -> bool {
    banners::ui(ui, store.state());

    let mut changed = false;
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        changed |= digest_settings::ui(ui, store);
    });

    ui.add_space(SECTION_SPACING);

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        changed |= alert_settings::ui(ui, store);
    });

    ui.add_space(SECTION_SPACING);

    let loading = store.state().is_loading;
    let label = if loading { "Saving..." } else { "Save" };
    let save_requested = ui.add_enabled(!loading, egui::Button::new(label)).clicked();

    // Widgets above were drawn from the pre-edit state
    if changed || save_requested {
        ui.ctx().request_repaint();
    }

    save_requested
}
