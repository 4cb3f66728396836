//! Decoded scene graph and the pure transforms applied to it before display

mod bounds;
mod prepare;

use std::sync::Arc;

use glam::Mat4;

pub use bounds::Aabb;
pub use prepare::{prepare_model, ModelOptions, PreparedModel};

use crate::viewport::mesh::MeshData;

/// A node of a decoded asset. Geometry is immutable and shared between
/// clones; transform and shadow flags belong to each clone.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: Option<String>,
    /// Local transform relative to the parent
    pub transform: Mat4,
    pub mesh: Option<Arc<MeshData>>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn group(name: impl Into<String>, transform: Mat4, children: Vec<SceneNode>) -> Self {
        Self {
            name: Some(name.into()),
            transform,
            mesh: None,
            cast_shadow: false,
            receive_shadow: false,
            children,
        }
    }

    pub fn mesh(name: impl Into<String>, transform: Mat4, mesh: MeshData) -> Self {
        Self {
            name: Some(name.into()),
            transform,
            mesh: Some(Arc::new(mesh)),
            cast_shadow: false,
            receive_shadow: false,
            children: Vec::new(),
        }
    }

    fn with_shadow_flags(mut self, cast: bool, receive: bool) -> Self {
        if self.mesh.is_some() {
            self.cast_shadow = cast;
            self.receive_shadow = receive;
        }
        self.children = self
            .children
            .into_iter()
            .map(|c| c.with_shadow_flags(cast, receive))
            .collect();
        self
    }

    fn visit<'a>(&'a self, parent: Mat4, f: &mut impl FnMut(&'a SceneNode, Mat4)) {
        let world = parent * self.transform;
        f(self, world);
        for child in &self.children {
            child.visit(world, f);
        }
    }
}

/// One mesh ready for drawing: shared geometry plus its world matrix
#[derive(Clone, Debug)]
pub struct RenderItem {
    pub mesh: Arc<MeshData>,
    pub model: Mat4,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// Indices of the items whose planar shadow is drawn on the ground.
///
/// Shadows need a receiving surface: with no receiver in the draw list
/// nothing is projected, otherwise every caster is.
pub fn shadow_casters(items: &[RenderItem]) -> Vec<usize> {
    if !items.iter().any(|i| i.receive_shadow) {
        return Vec::new();
    }
    items
        .iter()
        .enumerate()
        .filter(|(_, i)| i.cast_shadow)
        .map(|(index, _)| index)
        .collect()
}

/// Scene graph of a decoded asset
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    pub roots: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new(roots: Vec<SceneNode>) -> Self {
        Self { roots }
    }

    /// Visit every node with its accumulated world matrix
    pub fn visit<'a>(&'a self, root: Mat4, mut f: impl FnMut(&'a SceneNode, Mat4)) {
        for node in &self.roots {
            node.visit(root, &mut f);
        }
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.visit(Mat4::IDENTITY, |node, _| {
            if node.mesh.is_some() {
                count += 1;
            }
        });
        count
    }

    /// World-space bounding box over all geometry
    pub fn bounding_box(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        self.visit(Mat4::IDENTITY, |node, world| {
            if let Some(mesh) = &node.mesh {
                aabb.union(&Aabb::from_mesh(mesh, &world));
            }
        });
        aabb
    }

    /// Copy of the graph with shadow flags set on every mesh node
    pub fn with_shadow_flags(&self, cast: bool, receive: bool) -> SceneGraph {
        SceneGraph {
            roots: self
                .roots
                .iter()
                .cloned()
                .map(|n| n.with_shadow_flags(cast, receive))
                .collect(),
        }
    }

    /// Flatten into draw items under `root`
    pub fn render_items(&self, root: Mat4) -> Vec<RenderItem> {
        let mut items = Vec::new();
        self.visit(root, |node, world| {
            if let Some(mesh) = &node.mesh {
                items.push(RenderItem {
                    mesh: Arc::clone(mesh),
                    model: world,
                    cast_shadow: node.cast_shadow,
                    receive_shadow: node.receive_shadow,
                });
            }
        });
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::mesh;
    use glam::Vec3;

    fn two_level_graph() -> SceneGraph {
        let leaf = SceneNode::mesh(
            "leaf",
            Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)),
            mesh::cube(1.0, 1.0, 1.0, [1.0; 3]),
        );
        let root = SceneNode::group("root", Mat4::from_translation(Vec3::X * 2.0), vec![leaf]);
        SceneGraph::new(vec![root])
    }

    fn item(cast_shadow: bool, receive_shadow: bool) -> RenderItem {
        RenderItem {
            mesh: Arc::new(mesh::cube(1.0, 1.0, 1.0, [1.0; 3])),
            model: Mat4::IDENTITY,
            cast_shadow,
            receive_shadow,
        }
    }

    #[test]
    fn test_shadows_need_a_receiver() {
        assert!(shadow_casters(&[item(true, false), item(true, false)]).is_empty());
        assert_eq!(shadow_casters(&[item(true, true)]), vec![0]);
        assert_eq!(
            shadow_casters(&[item(true, false), item(false, true), item(true, false)]),
            vec![0, 2]
        );
        assert!(shadow_casters(&[item(false, true)]).is_empty());
    }

    #[test]
    fn test_receive_flag_controls_model_shadow() {
        let receiving = two_level_graph().with_shadow_flags(true, true);
        assert_eq!(shadow_casters(&receiving.render_items(Mat4::IDENTITY)), vec![0]);

        let not_receiving = two_level_graph().with_shadow_flags(true, false);
        assert!(shadow_casters(&not_receiving.render_items(Mat4::IDENTITY)).is_empty());
    }

    #[test]
    fn test_bounding_box_accumulates_parent_transforms() {
        let aabb = two_level_graph().bounding_box();
        assert_eq!(aabb.center(), Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(aabb.size(), Vec3::ONE);
    }

    #[test]
    fn test_shadow_flags_copy_leaves_source_untouched() {
        let source = two_level_graph();
        let flagged = source.with_shadow_flags(true, false);

        let items = flagged.render_items(Mat4::IDENTITY);
        assert_eq!(items.len(), 1);
        assert!(items[0].cast_shadow);
        assert!(!items[0].receive_shadow);

        let original = source.render_items(Mat4::IDENTITY);
        assert!(!original[0].cast_shadow);
        // geometry is shared, not copied
        assert!(Arc::ptr_eq(&items[0].mesh, &original[0].mesh));
    }

    #[test]
    fn test_group_nodes_keep_flags_off() {
        let flagged = two_level_graph().with_shadow_flags(true, true);
        assert!(!flagged.roots[0].cast_shadow);
        assert!(flagged.roots[0].children[0].cast_shadow);
    }
}
