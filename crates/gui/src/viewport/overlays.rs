//! Viewer overlays drawn on top of the 3D surface

use egui::{Align2, Color32, FontId, Painter, Rect};

use blueprint_viewer_lib::state::OverlayState;

use crate::i18n::t;
use crate::ui::status_panel;

const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 230);
const TEXT: Color32 = Color32::from_rgb(55, 65, 81);
const MUTED: Color32 = Color32::from_rgb(107, 114, 128);

/// Centered "Loading 3D model..." card
pub fn draw_loading(painter: &Painter, rect: Rect, overlay: &OverlayState) {
    let Some(percent) = overlay.loading else {
        return;
    };

    painter.rect_filled(rect, 0.0, Color32::from_rgba_unmultiplied(249, 250, 251, 160));

    let card = Rect::from_center_size(rect.center(), egui::vec2(220.0, 70.0));
    painter.rect_filled(card, 8.0, PANEL_BG);
    painter.text(
        card.center_top() + egui::vec2(0.0, 14.0),
        Align2::CENTER_TOP,
        t("overlay.loading"),
        FontId::proportional(14.0),
        TEXT,
    );

    // Progress bar once a percentage is known
    let bar = Rect::from_min_size(card.left_bottom() + egui::vec2(16.0, -22.0), egui::vec2(188.0, 6.0));
    painter.rect_filled(bar, 3.0, Color32::from_rgb(229, 231, 235));
    if let Some(percent) = percent {
        let mut filled = bar;
        filled.set_width(bar.width() * (percent / 100.0).clamp(0.0, 1.0));
        painter.rect_filled(filled, 3.0, Color32::from_rgb(37, 99, 235));
    }
}

/// Red banner at the top of the viewer
pub fn draw_error_banner(painter: &Painter, rect: Rect, overlay: &OverlayState) {
    let Some(message) = overlay.error_banner.as_deref() else {
        return;
    };

    let banner = Rect::from_min_size(
        rect.left_top() + egui::vec2(16.0, 16.0),
        egui::vec2((rect.width() - 32.0).max(0.0), 48.0),
    );
    painter.rect_filled(banner, 6.0, Color32::from_rgb(254, 242, 242));
    painter.rect_stroke(
        banner,
        6.0,
        egui::Stroke::new(1.0, Color32::from_rgb(252, 165, 165)),
        egui::StrokeKind::Inside,
    );
    let red = Color32::from_rgb(185, 28, 28);
    painter.text(
        banner.left_top() + egui::vec2(12.0, 8.0),
        Align2::LEFT_TOP,
        t("overlay.error_title"),
        FontId::proportional(13.0),
        red,
    );
    painter.text(
        banner.left_top() + egui::vec2(12.0, 26.0),
        Align2::LEFT_TOP,
        message,
        FontId::proportional(12.0),
        red,
    );
}

/// Controls help in the bottom-left corner
pub fn draw_controls_help(painter: &Painter, rect: Rect) {
    let lines = [t("controls.rotate"), t("controls.pan"), t("controls.zoom")];
    let help = Rect::from_min_size(
        rect.left_bottom() + egui::vec2(16.0, -96.0),
        egui::vec2(240.0, 80.0),
    );
    painter.rect_filled(help, 6.0, PANEL_BG);
    painter.text(
        help.left_top() + egui::vec2(10.0, 8.0),
        Align2::LEFT_TOP,
        t("controls.title"),
        FontId::proportional(13.0),
        TEXT,
    );
    for (i, line) in lines.iter().enumerate() {
        painter.text(
            help.left_top() + egui::vec2(10.0, 28.0 + i as f32 * 16.0),
            Align2::LEFT_TOP,
            *line,
            FontId::proportional(11.0),
            MUTED,
        );
    }
}

/// Status and performance summary in the top-right corner
pub fn draw_summary(painter: &Painter, rect: Rect, overlay: &OverlayState) {
    let rows = status_panel::summary_rows(overlay);
    let height = 12.0 + rows.len() as f32 * 16.0;
    let panel = Rect::from_min_size(
        rect.right_top() + egui::vec2(-196.0, if overlay.error_banner.is_some() { 72.0 } else { 16.0 }),
        egui::vec2(180.0, height),
    );
    painter.rect_filled(panel, 6.0, PANEL_BG);
    for (i, (label, value)) in rows.iter().enumerate() {
        let y = panel.top() + 6.0 + i as f32 * 16.0;
        painter.text(
            egui::pos2(panel.left() + 10.0, y),
            Align2::LEFT_TOP,
            *label,
            FontId::proportional(11.0),
            MUTED,
        );
        painter.text(
            egui::pos2(panel.right() - 10.0, y),
            Align2::RIGHT_TOP,
            value,
            FontId::monospace(11.0),
            TEXT,
        );
    }
}
