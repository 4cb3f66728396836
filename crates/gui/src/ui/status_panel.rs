use egui::Ui;
use shared::ViewerContent;

use blueprint_viewer_lib::state::{OverlayState, ViewerStatus};

use crate::i18n::t;

fn content_label(content: &ViewerContent) -> &'static str {
    match content {
        ViewerContent::NoContent => t("content.none"),
        ViewerContent::Placeholder => t("content.placeholder"),
        ViewerContent::Model(_) => t("content.model"),
    }
}

/// Label/value rows of the summary panel
pub fn summary_rows(overlay: &OverlayState) -> Vec<(&'static str, String)> {
    let summary = &overlay.summary;
    vec![
        (t("panel.status"), t(overlay.status.label_key()).to_string()),
        (t("panel.content"), content_label(&summary.content).to_string()),
        (t("panel.progress"), format!("{:.0}%", summary.progress)),
        (
            "FPS",
            summary
                .fps
                .map(|fps| fps.to_string())
                .unwrap_or_else(|| "—".to_string()),
        ),
        (t("panel.size"), summary.size.clone()),
        (t("panel.objects"), summary.objects.to_string()),
    ]
}

pub fn show(ui: &mut Ui, overlay: &OverlayState) {
    ui.horizontal(|ui| {
        let color = match overlay.status {
            ViewerStatus::Idle => egui::Color32::from_rgb(107, 114, 128),
            ViewerStatus::Loading => egui::Color32::from_rgb(217, 119, 6),
            ViewerStatus::Ready => egui::Color32::from_rgb(22, 163, 74),
            ViewerStatus::Error => egui::Color32::from_rgb(220, 38, 38),
        };
        ui.colored_label(color, format!("● {}", t(overlay.status.label_key())));

        ui.separator();

        if let Some(locator) = overlay.summary.content.locator() {
            ui.weak(locator);
            ui.separator();
        }

        ui.weak(format!("{}: {}", t("panel.objects"), overlay.summary.objects));

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("Blueprint3D v0.1");
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_viewer_lib::state::StatusCoordinator;

    #[test]
    fn test_summary_rows_for_placeholder() {
        let overlay = StatusCoordinator::new(ViewerContent::Placeholder).overlay();
        let rows = summary_rows(&overlay);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[3], ("FPS", "60".to_string()));
        assert_eq!(rows[4].1, "—");
        assert_eq!(rows[5].1, "4");
    }

    #[test]
    fn test_fps_hidden_until_ready() {
        let overlay = StatusCoordinator::new(ViewerContent::Model("a.glb".into())).overlay();
        let rows = summary_rows(&overlay);
        assert_eq!(rows[3].1, "—");
        assert_eq!(rows[5].1, "1");
    }
}
