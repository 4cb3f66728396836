//! 3D viewer panel with OpenGL rendering

mod gl_renderer;
mod overlays;
pub mod renderer;

pub use blueprint_viewer_lib::viewport::{camera, lighting};

use std::sync::{Arc, Mutex};

use egui::Ui;

use blueprint_viewer_lib::loader::AssetDecoder;
use blueprint_viewer_lib::state::{GridSettings, ViewerSession};
use camera::OrbitCamera;
use gl_renderer::GlRenderer;
use lighting::LightingRig;

/// Degrees of rotation per dragged pixel
const ROTATE_SPEED: f32 = 0.5;
const PAN_SPEED: f32 = 0.01;
const ZOOM_SPEED: f32 = 0.001;

/// Viewer panel: orbit camera plus the GL surface it draws into
pub struct ViewerPanel {
    camera: OrbitCamera,
    initial_position: [f32; 3],
    lighting: LightingRig,
    gl: Option<Arc<glow::Context>>,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
}

impl ViewerPanel {
    pub fn new(initial_position: [f32; 3], gl: Option<Arc<glow::Context>>) -> Self {
        Self {
            camera: OrbitCamera::looking_from(initial_position),
            initial_position,
            lighting: LightingRig::default(),
            gl,
            gl_renderer: None,
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = OrbitCamera::looking_from(self.initial_position);
    }

    /// Create the renderer on first mount
    fn ensure_renderer(&mut self) {
        if self.gl_renderer.is_some() {
            return;
        }
        if let Some(gl) = &self.gl {
            self.gl_renderer = Some(Arc::new(Mutex::new(GlRenderer::new(gl))));
        }
    }

    pub fn show<D: AssetDecoder>(
        &mut self,
        ui: &mut Ui,
        session: &ViewerSession<D>,
        grid: &GridSettings,
    ) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // ── Orbit controls ──────────────────────────────────────
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.camera.rotate(-delta.x * ROTATE_SPEED, delta.y * ROTATE_SPEED);
        }
        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera.pan(-delta.x * PAN_SPEED, delta.y * PAN_SPEED);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * ZOOM_SPEED);
            }
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        self.ensure_renderer();
        let items = session.render_items();
        let environment = session.config().environment;

        match &self.gl_renderer {
            Some(gl_renderer) => {
                let renderer = Arc::clone(gl_renderer);
                let camera = self.camera.clone();
                let lighting = self.lighting;
                let grid = grid.clone();

                let callback = egui::PaintCallback {
                    rect,
                    callback: Arc::new(eframe::egui_glow::CallbackFn::new(
                        move |info, painter| {
                            let gl = painter.gl();
                            let clip = info.clip_rect_in_pixels();
                            let viewport = [
                                clip.left_px as f32,
                                clip.from_bottom_px as f32,
                                clip.width_px as f32,
                                clip.height_px as f32,
                            ];

                            if let Ok(mut r) = renderer.lock() {
                                r.update_grid(gl, &grid);
                                r.sync_items(gl, &items);
                                let params = gl_renderer::RenderParams {
                                    viewport,
                                    grid_visible: grid.visible,
                                    environment,
                                    lighting,
                                };
                                r.paint(gl, &camera, &params);
                            }
                        },
                    )),
                };
                ui.painter().add(callback);
            }
            None => {
                // Fallback: software wireframe rendering
                renderer::paint_scene(ui, rect, &self.camera, &items, environment, grid);
            }
        }

        let painter = ui.painter_at(rect);
        let overlay = session.overlay();
        overlays::draw_loading(&painter, rect, &overlay);
        overlays::draw_error_banner(&painter, rect, &overlay);
        overlays::draw_controls_help(&painter, rect);
        overlays::draw_summary(&painter, rect, &overlay);
    }
}

impl Drop for ViewerPanel {
    fn drop(&mut self) {
        let (Some(gl), Some(renderer)) = (&self.gl, self.gl_renderer.take()) else {
            return;
        };
        match renderer.lock() {
            Ok(mut r) => r.destroy(gl),
            Err(_) => tracing::warn!("GL renderer lock poisoned, skipping teardown"),
        };
    }
}
