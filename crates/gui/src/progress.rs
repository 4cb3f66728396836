//! Scene-wide loading tracker. Turns loader events into progress reports
//! for the status coordinator.

use std::collections::VecDeque;

use shared::{ErrorDetail, ProgressReport, SceneProgress};

use crate::loader::LoaderEvent;

#[derive(Debug, Clone)]
pub struct ProgressTracker {
    state: SceneProgress,
    errors: Vec<ErrorDetail>,
    reports: VecDeque<ProgressReport>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self {
            state: SceneProgress::idle(),
            errors: Vec::new(),
            reports: VecDeque::new(),
        }
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, item: &str) {
        self.errors.clear();
        self.state = SceneProgress::active(0.0, Some(item.to_string()));
        self.emit();
    }

    pub fn update(&mut self, percent: f32) {
        let item = self.state.item.take();
        self.state = SceneProgress::active(percent, item);
        self.emit();
    }

    pub fn finish(&mut self) {
        let item = self.state.item.take();
        self.state = SceneProgress::finished(item);
        self.emit();
    }

    pub fn fail(&mut self, error: ErrorDetail) {
        self.state.active = false;
        self.errors.push(error);
        self.emit();
    }

    /// Forget the previous load without reporting
    pub fn reset(&mut self) {
        self.state = SceneProgress::idle();
        self.errors.clear();
        self.reports.clear();
    }

    pub fn apply(&mut self, event: &LoaderEvent) {
        match event {
            LoaderEvent::Started { locator } => self.begin(locator),
            LoaderEvent::Progress { percent, .. } => self.update(*percent),
            LoaderEvent::Decoded { .. } => self.finish(),
            LoaderEvent::Failed { error, .. } => self.fail(error.clone()),
        }
    }

    /// Latest state as a report
    pub fn current(&self) -> ProgressReport {
        if self.errors.is_empty() {
            Ok(self.state.clone())
        } else {
            Err(self.errors.clone())
        }
    }

    /// Reports queued since the last drain, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = ProgressReport> + '_ {
        self.reports.drain(..)
    }

    fn emit(&mut self) {
        let report = self.current();
        self.reports.push_back(report);
    }
}
