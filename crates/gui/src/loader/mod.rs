//! Asynchronous model loading.
//!
//! Decoding runs on a tokio runtime; the UI thread polls for results once per
//! frame. Only the most recent request is tracked: starting a new one aborts
//! the previous task and drops its channel, so a superseded load can never
//! report back. Decoded scenes are cached by locator.

mod error;
mod gltf_decoder;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use shared::{ErrorDetail, Locator};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub use error::LoadError;
pub use gltf_decoder::GltfDecoder;

use crate::scene::SceneGraph;

/// Turns a locator into a decoded scene graph
pub trait AssetDecoder: Send + Sync + 'static {
    fn decode(
        &self,
        locator: Locator,
        progress: ProgressSink,
    ) -> impl Future<Output = Result<SceneGraph, LoadError>> + Send;
}

enum Message {
    Progress(f32),
    Done(Result<SceneGraph, LoadError>),
}

/// Handle a decoder uses to report download/decode progress (0..100)
#[derive(Clone)]
pub struct ProgressSink {
    tx: Option<mpsc::UnboundedSender<Message>>,
}

impl ProgressSink {
    /// Sink that discards every report
    pub fn detached() -> Self {
        Self { tx: None }
    }

    pub fn report(&self, percent: f32) {
        if let Some(tx) = &self.tx {
            // Receiver gone means the request was superseded
            let _ = tx.send(Message::Progress(percent.clamp(0.0, 100.0)));
        }
    }
}

/// Something the loader observed since the last poll
#[derive(Debug, Clone)]
pub enum LoaderEvent {
    Started { locator: Locator },
    Progress { locator: Locator, percent: f32 },
    Decoded { locator: Locator, scene: Arc<SceneGraph> },
    Failed { locator: Locator, error: ErrorDetail },
}

impl LoaderEvent {
    pub fn locator(&self) -> &str {
        match self {
            LoaderEvent::Started { locator }
            | LoaderEvent::Progress { locator, .. }
            | LoaderEvent::Decoded { locator, .. }
            | LoaderEvent::Failed { locator, .. } => locator,
        }
    }
}

struct PendingLoad {
    generation: u64,
    locator: Locator,
    rx: mpsc::UnboundedReceiver<Message>,
    task: JoinHandle<()>,
}

struct Preload {
    locator: Locator,
    rx: mpsc::UnboundedReceiver<Message>,
    task: JoinHandle<()>,
}

pub struct ModelLoader<D: AssetDecoder> {
    decoder: Arc<D>,
    runtime: Handle,
    pending: Option<PendingLoad>,
    generation: u64,
    preloads: Vec<Preload>,
    cache: HashMap<Locator, Arc<SceneGraph>>,
    queued: Vec<LoaderEvent>,
}

impl<D: AssetDecoder> ModelLoader<D> {
    pub fn new(decoder: D, runtime: Handle) -> Self {
        Self {
            decoder: Arc::new(decoder),
            runtime,
            pending: None,
            generation: 0,
            preloads: Vec::new(),
            cache: HashMap::new(),
            queued: Vec::new(),
        }
    }

    /// Start loading `locator`, superseding any request in flight.
    /// Repeating the in-flight locator is a no-op.
    pub fn request(&mut self, locator: &str) {
        if self.pending.as_ref().is_some_and(|p| p.locator == locator) {
            return;
        }
        self.cancel();

        let locator = locator.to_string();
        self.queued.push(LoaderEvent::Started {
            locator: locator.clone(),
        });

        if locator.trim().is_empty() {
            self.queued.push(LoaderEvent::Failed {
                error: ErrorDetail::for_locator(LoadError::EmptyLocator.to_string(), &locator),
                locator,
            });
            return;
        }

        if let Some(scene) = self.cache.get(&locator) {
            tracing::debug!("Model cache hit: {}", locator);
            self.queued.push(LoaderEvent::Decoded {
                locator,
                scene: Arc::clone(scene),
            });
            return;
        }

        self.generation += 1;
        tracing::info!("Loading model #{}: {}", self.generation, locator);
        let (rx, task) = self.spawn(locator.clone());
        self.pending = Some(PendingLoad {
            generation: self.generation,
            locator,
            rx,
            task,
        });
    }

    /// Decode into the cache without touching the current request
    pub fn preload(&mut self, locator: &str) {
        if locator.trim().is_empty()
            || self.cache.contains_key(locator)
            || self.preloads.iter().any(|p| p.locator == locator)
        {
            return;
        }
        tracing::debug!("Preloading model: {}", locator);
        let (rx, task) = self.spawn(locator.to_string());
        self.preloads.push(Preload {
            locator: locator.to_string(),
            rx,
            task,
        });
    }

    /// Abort the request in flight and drop anything not yet polled
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!("Cancelled model load #{}: {}", pending.generation, pending.locator);
            pending.task.abort();
        }
        self.queued.clear();
    }

    /// Number of decodes started by `request`
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.locator.as_str())
    }

    pub fn cached(&self, locator: &str) -> Option<Arc<SceneGraph>> {
        self.cache.get(locator).cloned()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Collect events for the current request. Call once per frame.
    pub fn poll(&mut self) -> Vec<LoaderEvent> {
        self.poll_preloads();

        let mut events = std::mem::take(&mut self.queued);
        let Some(pending) = self.pending.as_mut() else {
            return events;
        };

        let mut finished = None;
        loop {
            match pending.rx.try_recv() {
                Ok(Message::Progress(percent)) => events.push(LoaderEvent::Progress {
                    locator: pending.locator.clone(),
                    percent,
                }),
                Ok(Message::Done(result)) => {
                    finished = Some(result);
                    break;
                }
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    finished = Some(Err(LoadError::Cancelled));
                    break;
                }
            }
        }

        if let Some(result) = finished {
            if let Some(pending) = self.pending.take() {
                events.push(self.complete(pending.locator, result));
            }
        }
        events
    }

    fn complete(&mut self, locator: Locator, result: Result<SceneGraph, LoadError>) -> LoaderEvent {
        match result {
            Ok(scene) => {
                tracing::info!("Model decoded: {} ({} meshes)", locator, scene.mesh_count());
                let scene = Arc::new(scene);
                self.cache.insert(locator.clone(), Arc::clone(&scene));
                LoaderEvent::Decoded { locator, scene }
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", locator, e);
                LoaderEvent::Failed {
                    error: ErrorDetail::for_locator(e.to_string(), &locator),
                    locator,
                }
            }
        }
    }

    fn poll_preloads(&mut self) {
        let mut i = 0;
        while i < self.preloads.len() {
            let mut done = None;
            loop {
                match self.preloads[i].rx.try_recv() {
                    Ok(Message::Progress(_)) => continue,
                    Ok(Message::Done(result)) => {
                        done = Some(result.ok());
                        break;
                    }
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        done = Some(None);
                        break;
                    }
                }
            }
            match done {
                Some(scene) => {
                    let preload = self.preloads.swap_remove(i);
                    if let Some(scene) = scene {
                        tracing::debug!("Preloaded model: {}", preload.locator);
                        self.cache.insert(preload.locator, Arc::new(scene));
                    }
                }
                None => i += 1,
            }
        }
    }

    fn spawn(&self, locator: Locator) -> (mpsc::UnboundedReceiver<Message>, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let decoder = Arc::clone(&self.decoder);
        let sink = ProgressSink {
            tx: Some(tx.clone()),
        };
        let task = self.runtime.spawn(async move {
            let result = decoder.decode(locator, sink).await;
            let _ = tx.send(Message::Done(result));
        });
        (rx, task)
    }
}

impl<D: AssetDecoder> Drop for ModelLoader<D> {
    fn drop(&mut self) {
        self.cancel();
        for preload in self.preloads.drain(..) {
            preload.task.abort();
        }
    }
}
