//! Landing page: hero text and the three-phase showcase animation

use std::time::Duration;

use egui::{Color32, RichText, Ui};
use shared::ortho::ORTHOGRAPHIC_VIEWS;

use blueprint_viewer_lib::animation::{AnimationPhase, Sequencer};

use crate::i18n::t;
use crate::viewport::renderer;

const SHOWCASE_SIZE: egui::Vec2 = egui::vec2(560.0, 240.0);
/// Radians of spin per dragged pixel
const NUDGE_SPEED: f32 = 0.01;

/// Returns true when the user asked to open the workspace
pub fn show(ui: &mut Ui, sequencer: &mut Sequencer, now: Duration) -> bool {
    let mut open = false;
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.label(RichText::new(t("landing.title")).size(32.0).strong());
        ui.add_space(8.0);
        ui.label(RichText::new(t("landing.subtitle")).size(16.0).weak());
        ui.add_space(24.0);

        showcase(ui, sequencer, now);

        ui.add_space(24.0);
        let button = egui::Button::new(
            RichText::new(t("landing.open_workspace")).size(16.0).color(Color32::WHITE),
        )
        .fill(Color32::from_rgb(37, 99, 235))
        .min_size(egui::vec2(200.0, 40.0));
        if ui.add(button).clicked() {
            open = true;
        }
    });
    open
}

fn showcase(ui: &mut Ui, sequencer: &mut Sequencer, now: Duration) {
    let (rect, response) = ui.allocate_exact_size(SHOWCASE_SIZE, egui::Sense::drag());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 12.0, Color32::WHITE);

    let phase = sequencer.phase();
    match phase {
        AnimationPhase::Orthographic => {
            let elapsed = sequencer.phase_elapsed(now);
            let cell = rect.width() / ORTHOGRAPHIC_VIEWS.len() as f32;
            for (i, view) in ORTHOGRAPHIC_VIEWS.iter().enumerate() {
                let view_rect = egui::Rect::from_center_size(
                    egui::pos2(rect.left() + cell * (i as f32 + 0.5), rect.center().y),
                    egui::vec2(cell - 24.0, cell - 24.0).min(egui::vec2(rect.height() - 24.0, rect.height() - 24.0)),
                );
                renderer::draw_ortho_view(&painter, view_rect, view, elapsed);
            }
        }
        AnimationPhase::Extrusion => {
            if let Some(extrusion) = sequencer.extrusion() {
                renderer::draw_extrusion(&painter, rect, &extrusion.outline(now));
            }
        }
        AnimationPhase::Interactive => {
            if response.dragged() {
                if let Some(spin) = sequencer.spin_mut() {
                    spin.nudge(response.drag_delta().x * NUDGE_SPEED);
                }
            }
            if let Some(spin) = sequencer.spin() {
                renderer::draw_spinning_cube(&painter, rect, spin.angle());
            }
        }
    }

    ui.add_space(8.0);
    ui.label(RichText::new(t(phase.caption_key())).strong());

    // Phase indicator
    ui.horizontal(|ui| {
        let width = AnimationPhase::ALL.len() as f32 * 16.0;
        ui.add_space((ui.available_width() - width).max(0.0) * 0.5);
        for p in AnimationPhase::ALL {
            let color = if p == phase {
                Color32::from_rgb(37, 99, 235)
            } else {
                Color32::from_rgb(209, 213, 219)
            };
            let (dot, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            ui.painter().circle_filled(dot.center(), 4.0, color);
        }
    });
}
