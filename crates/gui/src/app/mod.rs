//! Main application module

mod keyboard;
mod menus;
mod styles;

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use shared::ViewerContent;

use blueprint_viewer_lib::animation::Sequencer;
use blueprint_viewer_lib::loader::GltfDecoder;
use blueprint_viewer_lib::state::{ViewerSession, ViewerSettings};

use crate::i18n::set_lang;
use crate::ui::{header, landing, status_panel};
use crate::viewport::ViewerPanel;
use menus::MenuActions;

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Route {
    Landing,
    Workspace,
}

/// Mounted workspace: dropping it aborts pending loads and frees GL objects
struct Workspace {
    session: ViewerSession<GltfDecoder>,
    panel: ViewerPanel,
}

/// Main application
pub struct BlueprintApp {
    settings: ViewerSettings,
    route: Route,
    /// Navigation requested this frame, applied at the start of the next one
    pending_route: Option<Route>,
    sequencer: Sequencer,
    workspace: Option<Workspace>,
    decoder: GltfDecoder,
    gl: Option<Arc<glow::Context>>,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    runtime: tokio::runtime::Runtime,
}

fn clock(ctx: &egui::Context) -> Duration {
    Duration::from_secs_f64(ctx.input(|i| i.time).max(0.0))
}

impl BlueprintApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: ViewerSettings,
        route: Route,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        styles::configure_styles(&cc.egui_ctx, settings.ui.font_size);
        set_lang(settings.ui.language.into());

        let mut app = Self {
            last_font_size: settings.ui.font_size,
            settings,
            route,
            pending_route: None,
            sequencer: Sequencer::new(),
            workspace: None,
            decoder: GltfDecoder::new(),
            gl: cc.gl.clone(),
            runtime,
        };
        app.navigate(route, clock(&cc.egui_ctx));
        app
    }

    fn navigate(&mut self, route: Route, now: Duration) {
        tracing::info!("Route -> {:?}", route);
        self.route = route;
        match route {
            Route::Landing => {
                self.workspace = None;
                self.sequencer.start(now);
            }
            Route::Workspace => {
                self.sequencer.stop();
                self.workspace = Some(Workspace {
                    session: ViewerSession::new(
                        self.settings.viewer.clone(),
                        self.decoder.clone(),
                        self.runtime.handle().clone(),
                    ),
                    panel: ViewerPanel::new(self.settings.viewer.camera_position, self.gl.clone()),
                });
            }
        }
    }

    fn show_landing(&mut self, ctx: &egui::Context, now: Duration) {
        self.sequencer.tick(now);

        egui::CentralPanel::default().show(ctx, |ui| {
            if landing::show(ui, &mut self.sequencer, now) {
                self.pending_route = Some(Route::Workspace);
            }
        });

        ctx.request_repaint();
    }

    fn show_workspace(&mut self, ctx: &egui::Context) {
        let shortcuts = keyboard::handle_keyboard(ctx);
        let mut actions = MenuActions::default();

        // ── Header ────────────────────────────────────────────
        let mut back = shortcuts.back;
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                back |= header::show(ui);
            });
        if back {
            self.pending_route = Some(Route::Landing);
        }

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::model_menu(ui, &mut actions);
                menus::view_menu(ui, &mut self.settings, &mut actions);
            });
        });

        if shortcuts.open_model {
            actions.open_model = menus::pick_model_file();
        }
        actions.reset_camera |= shortcuts.reset_camera;

        let Some(ws) = self.workspace.as_mut() else {
            return;
        };

        // ── Apply menu actions ────────────────────────────────
        if let Some(locator) = actions.open_model {
            self.settings.viewer.model = Some(locator);
            ws.session.set_model(self.settings.viewer.model.clone());
            actions.settings_changed = true;
        }
        if actions.clear_model {
            self.settings.viewer.model = None;
            ws.session.set_model(None);
            actions.settings_changed = true;
        }
        if actions.reset_camera {
            ws.panel.reset_camera();
        }
        if actions.settings_changed {
            let viewer = &self.settings.viewer;
            ws.session.set_show_test_objects(viewer.show_test_objects);
            ws.session.set_environment(viewer.environment);
            let current = ws.session.config();
            if (current.cast_shadow, current.receive_shadow, current.auto_center)
                != (viewer.cast_shadow, viewer.receive_shadow, viewer.auto_center)
            {
                ws.session.set_display_options(viewer.cast_shadow, viewer.receive_shadow, viewer.auto_center);
            }
            self.settings.save();
        }

        ws.session.update(ctx.input(|i| i.stable_dt));

        // ── Status bar ───────────────────────────────────────
        let overlay = ws.session.overlay();
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_panel::show(ui, &overlay);
            });

        // ── Central panel: 3D viewer ─────────────────────────
        let grid = &self.settings.grid;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                ws.panel.show(ui, &ws.session, grid);
            });

        if ws.session.is_loading() || *ws.session.content() == ViewerContent::Placeholder {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for BlueprintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = clock(ctx);
        if let Some(route) = self.pending_route.take() {
            self.navigate(route, now);
        }

        // Apply font size if changed
        if self.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.settings.ui.font_size);
            self.last_font_size = self.settings.ui.font_size;
        }

        match self.route {
            Route::Landing => self.show_landing(ctx, now),
            Route::Workspace => self.show_workspace(ctx),
        }
    }
}
