//! Workspace menu bar

use eframe::egui;

use blueprint_viewer_lib::state::{Language, ViewerSettings};
use blueprint_viewer_lib::viewport::lighting::Environment;

use crate::i18n::{set_lang, t};

/// Actions requested from the menus, applied by the app after the bar is drawn
#[derive(Default)]
pub struct MenuActions {
    pub open_model: Option<String>,
    pub clear_model: bool,
    pub reset_camera: bool,
    /// Any setting was edited
    pub settings_changed: bool,
}

/// Show the model menu
pub fn model_menu(ui: &mut egui::Ui, actions: &mut MenuActions) {
    ui.menu_button(t("menu.model"), |ui| {
        if ui.button(t("menu.open_model")).clicked() {
            ui.close_menu();
            actions.open_model = pick_model_file();
        }
        if ui.button(t("menu.clear_model")).clicked() {
            actions.clear_model = true;
            ui.close_menu();
        }
    });
}

/// Native file dialog for glTF assets
pub fn pick_model_file() -> Option<String> {
    rfd::FileDialog::new()
        .set_title(t("menu.open_model_title"))
        .add_filter("glTF", &["gltf", "glb"])
        .pick_file()
        .map(|path| path.display().to_string())
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, settings: &mut ViewerSettings, actions: &mut MenuActions) {
    ui.menu_button(t("menu.view"), |ui| {
        if ui.button(t("menu.reset_camera")).clicked() {
            actions.reset_camera = true;
            ui.close_menu();
        }
        ui.separator();

        let viewer = &mut settings.viewer;
        let mut changed = false;
        changed |= ui.checkbox(&mut viewer.show_test_objects, t("menu.test_objects")).changed();
        changed |= ui.checkbox(&mut settings.grid.visible, t("menu.grid")).changed();
        changed |= ui.checkbox(&mut viewer.cast_shadow, t("menu.cast_shadow")).changed();
        changed |= ui.checkbox(&mut viewer.receive_shadow, t("menu.receive_shadow")).changed();
        changed |= ui.checkbox(&mut viewer.auto_center, t("menu.auto_center")).changed();

        ui.menu_button(t("menu.environment"), |ui| {
            for env in Environment::all() {
                if ui
                    .selectable_value(&mut viewer.environment, *env, t(env.label_key()))
                    .clicked()
                {
                    changed = true;
                    ui.close_menu();
                }
            }
        });

        ui.menu_button(t("menu.language"), |ui| {
            for (language, label) in [(Language::Ru, "Русский"), (Language::En, "English")] {
                if ui
                    .selectable_value(&mut settings.ui.language, language, label)
                    .clicked()
                {
                    set_lang(language.into());
                    changed = true;
                    ui.close_menu();
                }
            }
        });

        actions.settings_changed |= changed;
    });
}
