//! Keyboard shortcut handling

use eframe::egui;

/// Shortcuts pressed this frame
#[derive(Default)]
pub struct Shortcuts {
    pub back: bool,
    pub reset_camera: bool,
    pub open_model: bool,
}

/// Read workspace shortcuts
pub fn handle_keyboard(ctx: &egui::Context) -> Shortcuts {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return Shortcuts::default();
    }

    ctx.input(|i| Shortcuts {
        // Escape — back to the landing page
        back: i.key_pressed(egui::Key::Escape),
        // R — reset camera
        reset_camera: i.key_pressed(egui::Key::R) && !i.modifiers.command,
        // Ctrl+O — open model
        open_model: i.modifiers.command && i.key_pressed(egui::Key::O),
    })
}
