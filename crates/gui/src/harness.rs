//! Headless test harness: a viewer session driven by a scripted decoder on a
//! private tokio runtime, with frame stepping in place of the UI loop.

use std::time::{Duration, Instant};

use glam::Vec3;
use shared::{ModelLoadMeta, ViewerContent};

use crate::fixtures::ScriptedDecoder;
use crate::scene::SceneGraph;
use crate::state::{OverlayState, ViewerConfig, ViewerSession, ViewerStatus};

/// Simulated frame time
pub const FRAME: f32 = 1.0 / 60.0;
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestHarness {
    // Declared first so the session (and its tasks) go before the runtime
    session: ViewerSession<ScriptedDecoder>,
    decoder: ScriptedDecoder,
    _runtime: tokio::runtime::Runtime,
}

impl TestHarness {
    /// Harness showing test objects and no model.
    ///
    /// Panics if the runtime cannot be started.
    pub fn new() -> Self {
        Self::with_config(ViewerConfig::default())
    }

    pub fn with_config(config: ViewerConfig) -> Self {
        Self::with_decoder(config, ScriptedDecoder::new())
    }

    /// Harness whose decoder is scripted before the session mounts
    pub fn with_decoder(config: ViewerConfig, decoder: ScriptedDecoder) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("failed to start harness runtime");
        let session = ViewerSession::new(config, decoder.clone(), runtime.handle().clone());
        Self {
            session,
            decoder,
            _runtime: runtime,
        }
    }

    // ── Scripting ─────────────────────────────────────────────

    pub fn decoder(&self) -> &ScriptedDecoder {
        &self.decoder
    }

    /// Script `locator` to decode into a box spanning `min..max`
    pub fn add_box_model(&self, locator: &str, min: Vec3, max: Vec3) {
        self.decoder
            .succeed(locator, crate::fixtures::box_scene(min, max));
    }

    pub fn add_scene(&self, locator: &str, scene: SceneGraph) {
        self.decoder.succeed(locator, scene);
    }

    pub fn add_failure(&self, locator: &str, message: &str) {
        self.decoder.fail(locator, message);
    }

    // ── Session control ───────────────────────────────────────

    pub fn set_model(&mut self, locator: &str) {
        self.session.set_model(Some(locator.to_string()));
    }

    pub fn clear_model(&mut self) {
        self.session.set_model(None);
    }

    pub fn set_show_test_objects(&mut self, show: bool) {
        self.session.set_show_test_objects(show);
    }

    pub fn preload(&mut self, locator: &str) {
        self.session.preload(locator);
    }

    /// One UI frame
    pub fn step(&mut self) {
        self.session.update(FRAME);
    }

    /// Step frames until `done` holds or the timeout passes
    pub fn step_until(&mut self, mut done: impl FnMut(&Self) -> bool) -> bool {
        let deadline = Instant::now() + SETTLE_TIMEOUT;
        loop {
            self.step();
            if done(self) {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    /// Step until no load is in flight
    pub fn settle(&mut self) -> bool {
        self.step_until(|h| !h.session.is_loading())
    }

    /// Let background tasks run without polling their results
    pub fn wait(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn session(&self) -> &ViewerSession<ScriptedDecoder> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ViewerSession<ScriptedDecoder> {
        &mut self.session
    }

    pub fn status(&self) -> ViewerStatus {
        self.session.status()
    }

    pub fn content(&self) -> &ViewerContent {
        self.session.content()
    }

    pub fn error(&self) -> Option<&str> {
        self.session.coordinator().error()
    }

    pub fn meta(&self) -> Option<ModelLoadMeta> {
        self.session.meta().copied()
    }

    pub fn overlay(&self) -> OverlayState {
        self.session.overlay()
    }

    /// Translation applied by auto-centering to the displayed model
    pub fn model_offset(&self) -> Option<Vec3> {
        self.session.model().map(|m| m.offset())
    }

    pub fn draw_count(&self) -> usize {
        self.session.render_items().len()
    }

    pub fn decode_count(&self) -> usize {
        self.decoder.decode_count()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
