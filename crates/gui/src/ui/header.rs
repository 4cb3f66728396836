//! Workspace header: back button, title, version badge and phase label

use egui::{Color32, RichText, Ui};

use crate::i18n::t;

const BADGE: &str = "POC v1.0";

/// Returns true when the back button was clicked
pub fn show(ui: &mut Ui) -> bool {
    let mut back = false;
    ui.horizontal(|ui| {
        if ui.button(t("header.back")).clicked() {
            back = true;
        }

        ui.separator();
        ui.heading(t("header.title"));

        egui::Frame::NONE
            .fill(Color32::from_rgb(219, 234, 254))
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::symmetric(6, 1))
            .show(ui, |ui| {
                ui.label(RichText::new(BADGE).small().color(Color32::from_rgb(29, 78, 216)));
            });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(t("header.phase"));
        });
    });
    back
}
