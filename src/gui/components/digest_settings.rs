//! Administrator digest section: digest toggle and additional recipients

use eframe::egui;

use crate::gui::constants::*;
use crate::store::{Action, SettingsStore};

/// Renders the digest settings and returns true if any field changed
pub fn ui(ui: &mut egui::Ui, store: &mut SettingsStore) -> bool {
    let state = store.state().clone();
    let mut changed = false;

    ui.label(egui::RichText::new("Administrator Emails").heading().strong());
    ui.add_space(ITEM_SPACING);

    let mut send_digests = state.send_digests;
    if ui.checkbox(&mut send_digests, "Send a daily email digest to all admins").changed() {
        store.dispatch(Action::SetSendDigests(send_digests));
        changed = true;
    }

    if !state.send_digests {
        return changed;
    }

    ui.add_space(ITEM_SPACING);
    let mut show_editor = state.show_recipients_editor;
    if ui
        .checkbox(&mut show_editor, "Additional recipients for the daily email digest")
        .changed()
    {
        store.dispatch(Action::SetShowRecipientsEditor(show_editor));
        changed = true;
    }

    if state.recipients_editor_visible() {
        ui.add_space(ITEM_SPACING / 2.0);
        ui.label("Admin email addresses to receive daily digest");

        let stroke = if state.validation_error.is_some() {
            egui::Stroke::new(1.5, BANNER_ERROR)
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke
        };

        let mut text = state.recipients_text.clone();
        egui::Frame::default()
            .inner_margin(4.0)
            .stroke(stroke)
            .show(ui, |ui| {
                let editor = egui::TextEdit::multiline(&mut text)
                    .desired_rows(RECIPIENT_ROWS)
                    .desired_width(f32::INFINITY)
                    .hint_text("admin@example.com\nsecurity@example.com");
                if ui.add(editor).changed() {
                    changed = true;
                }
            });
        if text != state.recipients_text {
            store.dispatch(Action::SetRecipientsText(text));
        }

        ui.label(egui::RichText::new("Put each email on its own line.")
            .small()
            .italics());
    }

    changed
}
