pub mod placeholder;
pub mod settings;
pub mod status;

use shared::{ModelLoadMeta, ViewerContent};
use tokio::runtime::Handle;

pub use placeholder::{PlaceholderMeshes, TestObjects};
pub use settings::{GridSettings, Language, UiSettings, ViewerConfig, ViewerSettings};
pub use status::{OverlayState, StatusCoordinator, StatusSummary, ViewerStatus};

use crate::loader::{AssetDecoder, LoaderEvent, ModelLoader};
use crate::progress::ProgressTracker;
use crate::scene::{prepare_model, PreparedModel, RenderItem};
use crate::viewport::lighting::Environment;

/// One mounted viewer: loader, progress tracker, status coordinator and the
/// content currently on display. Dropping it aborts any load in flight.
pub struct ViewerSession<D: AssetDecoder> {
    config: ViewerConfig,
    loader: ModelLoader<D>,
    tracker: ProgressTracker,
    coordinator: StatusCoordinator,
    model: Option<PreparedModel>,
    test_objects: TestObjects,
    placeholder: PlaceholderMeshes,
}

impl<D: AssetDecoder> ViewerSession<D> {
    pub fn new(config: ViewerConfig, decoder: D, runtime: Handle) -> Self {
        let content = config.content();
        let mut session = Self {
            loader: ModelLoader::new(decoder, runtime),
            tracker: ProgressTracker::new(),
            coordinator: StatusCoordinator::new(content.clone()),
            model: None,
            test_objects: TestObjects::default(),
            placeholder: PlaceholderMeshes::default(),
            config,
        };
        if let Some(locator) = content.locator() {
            session.loader.request(locator);
        }
        session
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn content(&self) -> &ViewerContent {
        self.coordinator.content()
    }

    pub fn status(&self) -> ViewerStatus {
        self.coordinator.status()
    }

    pub fn coordinator(&self) -> &StatusCoordinator {
        &self.coordinator
    }

    pub fn overlay(&self) -> OverlayState {
        self.coordinator.overlay()
    }

    pub fn model(&self) -> Option<&PreparedModel> {
        self.model.as_ref()
    }

    pub fn meta(&self) -> Option<&ModelLoadMeta> {
        self.coordinator.meta()
    }

    pub fn test_objects(&self) -> &TestObjects {
        &self.test_objects
    }

    pub fn loader(&self) -> &ModelLoader<D> {
        &self.loader
    }

    /// Change the model locator; `None` or blank falls back to test objects
    pub fn set_model(&mut self, model: Option<String>) {
        self.config.model = model;
        self.apply_content();
    }

    pub fn set_show_test_objects(&mut self, show: bool) {
        self.config.show_test_objects = show;
        self.apply_content();
    }

    /// Update shadow/centering options and re-prepare the current model
    pub fn set_display_options(&mut self, cast_shadow: bool, receive_shadow: bool, auto_center: bool) {
        self.config.cast_shadow = cast_shadow;
        self.config.receive_shadow = receive_shadow;
        self.config.auto_center = auto_center;

        let Some(locator) = self.coordinator.content().locator().map(str::to_string) else {
            return;
        };
        if let Some(scene) = self.loader.cached(&locator) {
            let prepared = prepare_model(&scene, &self.config.model_options());
            self.coordinator.on_model_loaded(&locator, prepared.meta);
            self.model = Some(prepared);
        }
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.config.environment = environment;
    }

    /// Decode a model into the cache ahead of time
    pub fn preload(&mut self, locator: &str) {
        self.loader.preload(locator);
    }

    fn apply_content(&mut self) {
        let content = self.config.content();
        if !self.coordinator.set_content(content.clone()) {
            return;
        }
        self.model = None;
        self.tracker.reset();
        match content.locator() {
            Some(locator) => self.loader.request(locator),
            None => self.loader.cancel(),
        }
    }

    /// Per-frame update: collect load results and advance the test objects
    pub fn update(&mut self, dt: f32) {
        let mut loaded = None;
        for event in self.loader.poll() {
            if event.locator() != self.coordinator.content().locator().unwrap_or_default() {
                continue;
            }
            self.tracker.apply(&event);
            if let LoaderEvent::Decoded { locator, scene } = event {
                let prepared = prepare_model(&scene, &self.config.model_options());
                loaded = Some((locator, prepared.meta));
                self.model = Some(prepared);
            }
        }

        for report in self.tracker.drain() {
            self.coordinator.on_progress(&report);
        }
        if let Some((locator, meta)) = loaded {
            self.coordinator.on_model_loaded(&locator, meta);
        }

        if *self.coordinator.content() == ViewerContent::Placeholder {
            self.test_objects.advance(dt);
        }
    }

    /// Draw list for the current content
    pub fn render_items(&self) -> Vec<RenderItem> {
        match self.coordinator.content() {
            ViewerContent::NoContent => Vec::new(),
            ViewerContent::Placeholder => self.test_objects.render_items(&self.placeholder),
            ViewerContent::Model(_) => self
                .model
                .as_ref()
                .map(PreparedModel::render_items)
                .unwrap_or_default(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }
}
