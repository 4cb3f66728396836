//! Painter-based drawing: wireframe fallback for the viewer and the
//! landing-page visuals.

use std::time::Duration;

use egui::{Color32, Pos2, Rect, Stroke, Ui};
use glam::{Quat, Vec3};
use shared::geometry::{cube_corners, CubeOutline, CUBE_EDGES};
use shared::ortho::{OrthoShape, OrthoView};

use blueprint_viewer_lib::scene::RenderItem;
use blueprint_viewer_lib::state::GridSettings;
use blueprint_viewer_lib::viewport::mesh;

use super::camera::OrbitCamera;
use super::lighting::Environment;

const BLUEPRINT_BLUE: Color32 = Color32::from_rgb(37, 99, 235);
const HIDDEN_GRAY: Color32 = Color32::from_rgb(148, 163, 184);

fn to_color32(rgb: [f32; 3]) -> Color32 {
    Color32::from_rgb(
        (rgb[0] * 255.0) as u8,
        (rgb[1] * 255.0) as u8,
        (rgb[2] * 255.0) as u8,
    )
}

// ============================================================================
// Viewer fallback
// ============================================================================

/// Paint the scene as a wireframe when no GL context is available
pub fn paint_scene(
    ui: &Ui,
    rect: Rect,
    camera: &OrbitCamera,
    items: &[RenderItem],
    environment: Environment,
    grid: &GridSettings,
) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, to_color32(environment.sky()));

    if grid.visible {
        draw_grid(&painter, rect, camera, grid);
    }

    for item in items {
        let [r, g, b] = item
            .mesh
            .vertices
            .get(6..9)
            .map(|c| [c[0], c[1], c[2]])
            .unwrap_or([0.8, 0.8, 0.8]);
        let stroke = Stroke::new(0.5, to_color32([r * 0.7, g * 0.7, b * 0.7]));
        let points: Vec<Option<Pos2>> = item
            .mesh
            .positions()
            .map(|p| camera.project(item.model.transform_point3(p), rect))
            .collect();
        for tri in item.mesh.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let pa = points.get(a as usize).copied().flatten();
                let pb = points.get(b as usize).copied().flatten();
                if let (Some(pa), Some(pb)) = (pa, pb) {
                    painter.line_segment([pa, pb], stroke);
                }
            }
        }
    }
}

fn draw_grid(painter: &egui::Painter, rect: Rect, camera: &OrbitCamera, settings: &GridSettings) {
    let (cell, steps) = mesh::grid_extent(settings.cell_size, settings.fade_distance);
    let extent = steps as f32 * cell;
    let section_every = (settings.section_size / cell).round().max(1.0) as i32;

    for i in -steps..=steps {
        let f = i as f32 * cell;
        let fade = 1.0 - f.abs() / extent;
        let base = if i % section_every == 0 { 120 } else { 200 };
        let alpha = (fade * 200.0) as u8;
        let stroke = Stroke::new(
            if i % section_every == 0 { 1.0 } else { 0.5 },
            Color32::from_rgba_unmultiplied(base, base, base, alpha),
        );

        draw_line_3d(painter, rect, camera, Vec3::new(f, 0.0, -extent), Vec3::new(f, 0.0, extent), stroke);
        draw_line_3d(painter, rect, camera, Vec3::new(-extent, 0.0, f), Vec3::new(extent, 0.0, f), stroke);
    }
}

fn draw_line_3d(
    painter: &egui::Painter,
    rect: Rect,
    camera: &OrbitCamera,
    a: Vec3,
    b: Vec3,
    stroke: Stroke,
) {
    if let (Some(pa), Some(pb)) = (camera.project(a, rect), camera.project(b, rect)) {
        painter.line_segment([pa, pb], stroke);
    }
}

// ============================================================================
// Landing visuals
// ============================================================================

/// Camera used by the landing-page cubes
fn showcase_camera() -> OrbitCamera {
    let mut camera = OrbitCamera::looking_from([3.5, 3.0, 4.5]);
    camera.target = Vec3::new(0.0, 0.8, 0.0);
    camera
}

/// Draw one orthographic view into `rect`, revealing shapes by their delay
pub fn draw_ortho_view(painter: &egui::Painter, rect: Rect, view: &OrthoView, elapsed: Duration) {
    painter.rect_stroke(rect, 4.0, Stroke::new(1.0, HIDDEN_GRAY), egui::StrokeKind::Inside);
    painter.text(
        rect.left_top() + egui::vec2(6.0, 4.0),
        egui::Align2::LEFT_TOP,
        view.kind.label(),
        egui::FontId::monospace(10.0),
        HIDDEN_GRAY,
    );

    // 100×100 view box, Y down
    let scale = rect.width().min(rect.height()) / 100.0;
    let to_screen = |p: [f32; 2]| rect.left_top() + egui::vec2(p[0] * scale, p[1] * scale);
    let solid = Stroke::new(2.0, BLUEPRINT_BLUE);

    for shape in view.revealed(elapsed) {
        match *shape {
            OrthoShape::Rect { x, y, width, height, .. } => {
                let r = Rect::from_min_max(to_screen([x, y]), to_screen([x + width, y + height]));
                painter.rect_stroke(r, 0.0, solid, egui::StrokeKind::Middle);
            }
            OrthoShape::Line { from, to, hidden, .. } => {
                if hidden {
                    draw_dashed_line_2d(painter, to_screen(from), to_screen(to), Stroke::new(1.0, HIDDEN_GRAY), 4.0);
                } else {
                    painter.line_segment([to_screen(from), to_screen(to)], Stroke::new(1.5, BLUEPRINT_BLUE));
                }
            }
        }
    }
}

/// Draw the growing dashed cube
pub fn draw_extrusion(painter: &egui::Painter, rect: Rect, outline: &CubeOutline) {
    let camera = showcase_camera();
    let solid = Stroke::new(2.0, BLUEPRINT_BLUE);
    let dashed = Stroke::new(1.5, BLUEPRINT_BLUE.gamma_multiply(0.8));

    for seg in &outline.solid {
        draw_line_3d(painter, rect, &camera, seg.start, seg.end, solid);
    }
    for seg in &outline.dashed {
        draw_line_3d(painter, rect, &camera, seg.start, seg.end, dashed);
    }
    for corner in &outline.corners {
        if let Some(p) = camera.project(*corner, rect) {
            painter.circle_filled(p, 3.0, BLUEPRINT_BLUE);
        }
    }
}

/// Draw the spinning cube, rotated `angle` radians around Y
pub fn draw_spinning_cube(painter: &egui::Painter, rect: Rect, angle: f32) {
    let camera = showcase_camera();
    let rotation = Quat::from_rotation_y(angle) * Quat::from_rotation_x(0.3);
    let center = Vec3::new(0.0, 0.8, 0.0);
    let corners = cube_corners(0.8, -0.8, 0.8, 0.8).map(|c| center + rotation * c);

    let face = Color32::from_rgba_unmultiplied(37, 99, 235, 40);
    for quad in [[0, 1, 2, 3], [4, 5, 6, 7]] {
        let pts: Vec<Pos2> = quad
            .iter()
            .filter_map(|&i| camera.project(corners[i], rect))
            .collect();
        if pts.len() == 4 {
            painter.add(egui::Shape::convex_polygon(pts, face, Stroke::NONE));
        }
    }

    let stroke = Stroke::new(2.0, BLUEPRINT_BLUE);
    for &(a, b) in &CUBE_EDGES {
        draw_line_3d(painter, rect, &camera, corners[a], corners[b], stroke);
    }
}

/// Draw a dashed line in 2D screen space
fn draw_dashed_line_2d(
    painter: &egui::Painter,
    start: Pos2,
    end: Pos2,
    stroke: Stroke,
    dash_length: f32,
) {
    let delta = end - start;
    let length = delta.length();
    if length < 0.1 {
        return;
    }
    let dir = delta / length;
    let gap_length = dash_length * 0.6;

    let mut pos = 0.0;
    while pos < length {
        let segment_end = (pos + dash_length).min(length);
        painter.line_segment([start + dir * pos, start + dir * segment_end], stroke);
        pos = segment_end + gap_length;
    }
}
