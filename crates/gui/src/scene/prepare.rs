use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use shared::ModelLoadMeta;

use super::{RenderItem, SceneGraph, SceneNode};

/// How a decoded model is placed in the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    pub position: [f32; 3],
    pub scale: f32,
    /// Center horizontally and rest the model on the ground plane
    pub auto_center: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            scale: 1.0,
            auto_center: true,
            cast_shadow: true,
            receive_shadow: true,
        }
    }
}

/// A display-ready copy of a decoded asset
#[derive(Debug, Clone)]
pub struct PreparedModel {
    /// Owned copy wrapped in a single root carrying the centering translation
    pub scene: SceneGraph,
    pub meta: ModelLoadMeta,
    /// Placement group transform (position and scale)
    pub placement: Mat4,
}

impl PreparedModel {
    /// Translation applied to the clone by auto-centering
    pub fn offset(&self) -> Vec3 {
        self.scene
            .roots
            .first()
            .map(|root| root.transform.w_axis.truncate())
            .unwrap_or(Vec3::ZERO)
    }

    pub fn render_items(&self) -> Vec<RenderItem> {
        self.scene.render_items(self.placement)
    }
}

/// Clone `source`, measure it, optionally recenter it and apply shadow flags.
///
/// The source graph is never touched; the returned model owns its node state.
/// `meta.center` is the center before translation.
pub fn prepare_model(source: &SceneGraph, options: &ModelOptions) -> PreparedModel {
    let clone = source.with_shadow_flags(options.cast_shadow, options.receive_shadow);

    let bounds = clone.bounding_box();
    let center = bounds.center();
    let size = bounds.size();

    let offset = if options.auto_center {
        Vec3::new(-center.x, -bounds.floor(), -center.z)
    } else {
        Vec3::ZERO
    };

    let root = SceneNode::group("model", Mat4::from_translation(offset), clone.roots);
    let placement = Mat4::from_scale_rotation_translation(
        Vec3::splat(options.scale),
        glam::Quat::IDENTITY,
        Vec3::from_array(options.position),
    );

    tracing::debug!(
        "Prepared model: size={:?} center={:?} offset={:?}",
        size,
        center,
        offset
    );

    PreparedModel {
        scene: SceneGraph::new(vec![root]),
        meta: ModelLoadMeta {
            size: size.to_array(),
            center: center.to_array(),
        },
        placement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_auto_center_places_base_on_ground() {
        // min=(-2,0,-1), max=(4,6,3), center=(1,3,1)
        let source = fixtures::box_scene(Vec3::new(-2.0, 0.0, -1.0), Vec3::new(4.0, 6.0, 3.0));
        let prepared = prepare_model(&source, &ModelOptions::default());

        assert_eq!(prepared.offset(), Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(prepared.meta.center, [1.0, 3.0, 1.0]);
        assert_eq!(prepared.meta.size, [6.0, 6.0, 4.0]);

        let placed = prepared.scene.bounding_box();
        assert_eq!(placed.center().x, 0.0);
        assert_eq!(placed.center().z, 0.0);
        assert_eq!(placed.min.y, 0.0);
    }

    #[test]
    fn test_floating_model_is_dropped_to_ground() {
        let source = fixtures::box_scene(Vec3::new(0.0, 3.0, 0.0), Vec3::new(2.0, 5.0, 2.0));
        let prepared = prepare_model(&source, &ModelOptions::default());
        assert_eq!(prepared.offset(), Vec3::new(-1.0, -3.0, -1.0));
    }

    #[test]
    fn test_auto_center_disabled_keeps_position() {
        let source = fixtures::box_scene(Vec3::new(-2.0, 0.0, -1.0), Vec3::new(4.0, 6.0, 3.0));
        let options = ModelOptions {
            auto_center: false,
            ..Default::default()
        };
        let prepared = prepare_model(&source, &options);
        assert_eq!(prepared.offset(), Vec3::ZERO);
        // meta still reports the measured box
        assert_eq!(prepared.meta.center, [1.0, 3.0, 1.0]);
    }

    #[test]
    fn test_shadow_flags_follow_options() {
        let source = fixtures::box_scene(Vec3::ZERO, Vec3::ONE);
        let options = ModelOptions {
            cast_shadow: false,
            receive_shadow: true,
            ..Default::default()
        };
        let items = prepare_model(&source, &options).render_items();
        assert!(items.iter().all(|i| !i.cast_shadow && i.receive_shadow));
    }

    #[test]
    fn test_repeated_prepare_does_not_share_node_state() {
        let source = fixtures::box_scene(Vec3::new(-2.0, 0.0, -1.0), Vec3::new(4.0, 6.0, 3.0));
        let mut first = prepare_model(&source, &ModelOptions::default());
        first.scene.roots[0].transform = Mat4::from_translation(Vec3::splat(100.0));

        let second = prepare_model(&source, &ModelOptions::default());
        assert_eq!(second.offset(), Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(source.roots[0].transform, Mat4::IDENTITY);
    }

    #[test]
    fn test_empty_scene_is_zero_size() {
        let prepared = prepare_model(&SceneGraph::default(), &ModelOptions::default());
        assert_eq!(prepared.meta.size, [0.0; 3]);
        assert_eq!(prepared.meta.center, [0.0; 3]);
        assert_eq!(prepared.offset(), Vec3::ZERO);
    }

    #[test]
    fn test_placement_scales_render_items() {
        let source = fixtures::box_scene(Vec3::ZERO, Vec3::ONE);
        let options = ModelOptions {
            scale: 2.0,
            position: [0.0, 1.0, 0.0],
            ..Default::default()
        };
        let items = prepare_model(&source, &options).render_items();
        let p = items[0].model.transform_point3(Vec3::new(0.5, 0.0, 0.5));
        // centered at origin, then scaled and lifted
        assert_eq!(p, Vec3::new(0.0, 1.0, 0.0));
    }
}
