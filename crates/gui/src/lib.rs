// Library crate: viewer core (scene graph, loading, status, animation) kept
// free of the window so it can be driven headless from tests.
// GUI-specific modules (app, ui, GL rendering) remain in the binary crate.

pub mod animation;
pub mod fixtures;
pub mod harness;
pub mod loader;
pub mod progress;
pub mod scene;
pub mod state;

/// Viewport math shared with the binary: camera, meshes and lighting.
/// The GL renderer stays in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod lighting;
    pub mod mesh;
}
