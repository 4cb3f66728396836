//! Factory functions for test data: scenes with known bounds and a scripted
//! in-memory decoder.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use glam::{Mat4, Vec3};
use shared::Locator;
use tokio::sync::Notify;

use crate::loader::{AssetDecoder, LoadError, ProgressSink};
use crate::scene::{SceneGraph, SceneNode};
use crate::viewport::mesh;

// ── Scene factories ─────────────────────────────────────────────

/// Single box mesh spanning `min..max`
pub fn box_scene(min: Vec3, max: Vec3) -> SceneGraph {
    let size = max - min;
    let center = (min + max) * 0.5;
    let geometry = mesh::cube(size.x, size.y, size.z, [0.7, 0.7, 0.7])
        .transformed(&Mat4::from_translation(center));
    SceneGraph::new(vec![SceneNode::mesh("box", Mat4::IDENTITY, geometry)])
}

/// Unit cube resting on the ground at the origin
pub fn unit_box_scene() -> SceneGraph {
    box_scene(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 1.0, 0.5))
}

// ── Scripted decoder ────────────────────────────────────────────

/// Holds a scripted decode until released
#[derive(Clone, Default)]
pub struct Gate(Arc<Notify>);

impl Gate {
    pub fn release(&self) {
        self.0.notify_one();
    }
}

#[derive(Clone)]
struct Script {
    result: Result<SceneGraph, String>,
    progress: Vec<f32>,
    gate: Option<Gate>,
}

/// In-memory decoder answering from a script keyed by locator.
/// Unknown locators fail to decode.
#[derive(Clone, Default)]
pub struct ScriptedDecoder {
    scripts: Arc<Mutex<HashMap<Locator, Script>>>,
    decodes: Arc<AtomicUsize>,
}

impl ScriptedDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, locator: &str, script: Script) {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.insert(locator.to_string(), script);
        }
    }

    /// Decode `locator` into `scene`, reporting 50% on the way
    pub fn succeed(&self, locator: &str, scene: SceneGraph) {
        self.insert(
            locator,
            Script {
                result: Ok(scene),
                progress: vec![50.0],
                gate: None,
            },
        );
    }

    pub fn fail(&self, locator: &str, message: &str) {
        self.insert(
            locator,
            Script {
                result: Err(message.to_string()),
                progress: Vec::new(),
                gate: None,
            },
        );
    }

    /// Decode `locator` into `scene` once the returned gate is released
    pub fn gated(&self, locator: &str, scene: SceneGraph) -> Gate {
        let gate = Gate::default();
        self.insert(
            locator,
            Script {
                result: Ok(scene),
                progress: vec![10.0],
                gate: Some(gate.clone()),
            },
        );
        gate
    }

    /// Number of decodes started so far
    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::SeqCst)
    }
}

impl AssetDecoder for ScriptedDecoder {
    fn decode(
        &self,
        locator: Locator,
        progress: ProgressSink,
    ) -> impl Future<Output = Result<SceneGraph, LoadError>> + Send {
        self.decodes.fetch_add(1, Ordering::SeqCst);
        let script = self
            .scripts
            .lock()
            .ok()
            .and_then(|scripts| scripts.get(&locator).cloned());

        async move {
            let Some(script) = script else {
                return Err(LoadError::Decode(format!("unknown asset: {locator}")));
            };
            for percent in &script.progress {
                progress.report(*percent);
            }
            if let Some(gate) = &script.gate {
                gate.0.notified().await;
            }
            script.result.map_err(LoadError::Decode)
        }
    }
}
