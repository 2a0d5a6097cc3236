//! End-user notification toggles and the batching interval selector

use eframe::egui;

use crate::gui::constants::*;
use crate::settings::BatchingInterval;
use crate::store::{Action, SettingsStore};

pub fn ui(ui: &mut egui::Ui, store: &mut SettingsStore) -> bool {
    let state = store.state().clone();
    let mut changed = false;

    ui.label(egui::RichText::new("End-User Notifications").heading().strong());
    ui.add_space(ITEM_SPACING);

    let mut send_end_user_alerts = state.send_end_user_alerts;
    if ui.checkbox(&mut send_end_user_alerts, "Send violation alerts to end users").changed() {
        store.dispatch(Action::SetSendEndUserAlerts(send_end_user_alerts));
        changed = true;
    }

    ui.add_space(ITEM_SPACING);

    let mut send_remediation_alerts = state.send_remediation_alerts;
    if ui
        .checkbox(&mut send_remediation_alerts, "Send remediation notifications to end users")
        .changed()
    {
        store.dispatch(Action::SetSendRemediationAlerts(send_remediation_alerts));
        changed = true;
    }

    ui.add_space(SECTION_SPACING);
    ui.label(egui::RichText::new("Enable batching in end-user notifications with interval").strong());
    ui.add_space(ITEM_SPACING / 2.0);

    let mut interval = state.alert_batching_interval_hours;
    ui.add_enabled_ui(state.batching_selector_enabled(), |ui| {
        egui::ComboBox::from_id_salt("batching_interval")
            .selected_text(interval.label())
            .width(200.0)
            .show_ui(ui, |ui| {
                for option in BatchingInterval::ALL {
                    ui.selectable_value(&mut interval, option, option.label());
                }
            });
    });
    if interval != state.alert_batching_interval_hours {
        store.dispatch(Action::SetBatchingInterval(interval));
        changed = true;
    }

    changed
}
