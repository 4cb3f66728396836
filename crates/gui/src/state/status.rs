//! Viewer status state machine: combines progress reports and model load
//! results into idle / loading / ready / error.

use shared::{ModelLoadMeta, ProgressReport, SceneProgress, ViewerContent};

pub const FALLBACK_ERROR: &str = "Failed to load model";
/// Frame rate shown while ready
pub const FPS_STUB: u32 = 60;
/// Shown instead of dimensions when no model is measured
pub const SIZE_PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

impl ViewerStatus {
    /// i18n key for the status label
    pub fn label_key(&self) -> &'static str {
        match self {
            ViewerStatus::Idle => "status.idle",
            ViewerStatus::Loading => "status.loading",
            ViewerStatus::Ready => "status.ready",
            ViewerStatus::Error => "status.error",
        }
    }
}

/// Everything the overlays need for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    pub status: ViewerStatus,
    /// Loading overlay, with a percentage once one is known
    pub loading: Option<Option<f32>>,
    /// Error banner message
    pub error_banner: Option<String>,
    pub summary: StatusSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusSummary {
    pub content: ViewerContent,
    pub progress: f32,
    pub fps: Option<u32>,
    pub size: String,
    pub objects: usize,
}

#[derive(Debug, Clone)]
pub struct StatusCoordinator {
    content: ViewerContent,
    status: ViewerStatus,
    progress: Option<SceneProgress>,
    meta: Option<ModelLoadMeta>,
    error: Option<String>,
}

impl StatusCoordinator {
    pub fn new(content: ViewerContent) -> Self {
        let mut coordinator = Self {
            content,
            status: ViewerStatus::Idle,
            progress: None,
            meta: None,
            error: None,
        };
        coordinator.recompute();
        coordinator
    }

    pub fn content(&self) -> &ViewerContent {
        &self.content
    }

    pub fn status(&self) -> ViewerStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn meta(&self) -> Option<&ModelLoadMeta> {
        self.meta.as_ref()
    }

    pub fn progress(&self) -> Option<&SceneProgress> {
        self.progress.as_ref()
    }

    /// Switch content. A change resets metadata, error and progress first.
    /// Returns true when the content actually changed.
    pub fn set_content(&mut self, content: ViewerContent) -> bool {
        if content == self.content {
            return false;
        }
        tracing::debug!("Viewer content: {:?} -> {:?}", self.content, content);
        self.content = content;
        self.meta = None;
        self.error = None;
        self.progress = None;
        self.recompute();
        true
    }

    /// Latest emission of the loading tracker
    pub fn on_progress(&mut self, report: &ProgressReport) {
        match report {
            Ok(progress) => {
                self.error = None;
                self.progress = Some(progress.clone());
            }
            Err(errors) => {
                let message = errors
                    .first()
                    .map(|e| e.to_string())
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| FALLBACK_ERROR.to_string());
                self.error = Some(message);
                if let Some(progress) = self.progress.as_mut() {
                    progress.active = false;
                }
            }
        }
        self.recompute();
    }

    /// Metadata of a finished decode. Ignored unless `locator` is current.
    pub fn on_model_loaded(&mut self, locator: &str, meta: ModelLoadMeta) -> bool {
        if self.content.locator() != Some(locator) {
            tracing::debug!("Ignoring stale model metadata for {}", locator);
            return false;
        }
        self.meta = Some(meta);
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        let next = if self.error.is_some() {
            ViewerStatus::Error
        } else {
            match &self.content {
                ViewerContent::NoContent => ViewerStatus::Idle,
                ViewerContent::Placeholder => ViewerStatus::Ready,
                ViewerContent::Model(_) => {
                    let active = self.progress.as_ref().is_some_and(|p| p.active);
                    if self.meta.is_some() && !active {
                        ViewerStatus::Ready
                    } else {
                        ViewerStatus::Loading
                    }
                }
            }
        };
        if next != self.status {
            tracing::debug!("Viewer status: {:?} -> {:?}", self.status, next);
            self.status = next;
        }
    }

    pub fn overlay(&self) -> OverlayState {
        let percent = self.progress.as_ref().map(|p| p.progress);
        OverlayState {
            status: self.status,
            loading: (self.status == ViewerStatus::Loading).then_some(percent),
            error_banner: if self.status == ViewerStatus::Error {
                self.error.clone()
            } else {
                None
            },
            summary: StatusSummary {
                content: self.content.clone(),
                progress: percent.unwrap_or(0.0),
                fps: (self.status == ViewerStatus::Ready).then_some(FPS_STUB),
                size: self
                    .meta
                    .map(|m| m.format_size(2))
                    .unwrap_or_else(|| SIZE_PLACEHOLDER.to_string()),
                objects: self.content.object_count(),
            },
        }
    }
}
