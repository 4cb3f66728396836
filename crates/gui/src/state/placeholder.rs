//! Test objects shown when no model is given

use std::sync::Arc;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::scene::RenderItem;
use crate::viewport::mesh::{self, MeshData};

pub const CUBE_POSITION: Vec3 = Vec3::new(-3.0, 1.0, 0.0);
pub const SPHERE_POSITION: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const TORUS_POSITION: Vec3 = Vec3::new(3.0, 1.0, 0.0);

/// Cube rotation speed around x and y (rad/s)
const CUBE_SPIN: f32 = 0.5;
const SPHERE_BOB: f32 = 0.5;

fn hex(rgb: u32) -> [f32; 3] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    ]
}

/// Geometry for the test objects, built once
#[derive(Debug, Clone)]
pub struct PlaceholderMeshes {
    cube: Arc<MeshData>,
    sphere: Arc<MeshData>,
    torus: Arc<MeshData>,
    ground: Arc<MeshData>,
}

impl Default for PlaceholderMeshes {
    fn default() -> Self {
        Self {
            cube: Arc::new(mesh::cube(1.0, 1.0, 1.0, hex(0xff6b6b))),
            sphere: Arc::new(mesh::sphere(0.8, 32, 32, hex(0x4ecdc4))),
            torus: Arc::new(mesh::torus(1.0, 0.3, 16, 100, hex(0xffa726))),
            ground: Arc::new(mesh::plane(20.0, 20.0, hex(0xf8f9fa))),
        }
    }
}

/// Animated state of the test objects
#[derive(Debug, Clone, Default)]
pub struct TestObjects {
    cube_rotation: f32,
    elapsed: f32,
}

impl TestObjects {
    /// Per-frame update
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.cube_rotation += dt * CUBE_SPIN;
        self.elapsed += dt;
    }

    /// Cube rotation around both x and y
    pub fn cube_rotation(&self) -> f32 {
        self.cube_rotation
    }

    pub fn sphere_height(&self) -> f32 {
        SPHERE_POSITION.y + self.elapsed.sin() * SPHERE_BOB
    }

    pub fn render_items(&self, meshes: &PlaceholderMeshes) -> Vec<RenderItem> {
        let r = self.cube_rotation;
        let cube = Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, r, r, 0.0),
            CUBE_POSITION,
        );
        let sphere = Mat4::from_translation(Vec3::new(
            SPHERE_POSITION.x,
            self.sphere_height(),
            SPHERE_POSITION.z,
        ));
        let torus = Mat4::from_translation(TORUS_POSITION);

        let object = |mesh: &Arc<MeshData>, model: Mat4| RenderItem {
            mesh: Arc::clone(mesh),
            model,
            cast_shadow: true,
            receive_shadow: true,
        };

        vec![
            object(&meshes.cube, cube),
            object(&meshes.sphere, sphere),
            object(&meshes.torus, torus),
            RenderItem {
                mesh: Arc::clone(&meshes.ground),
                model: Mat4::IDENTITY,
                cast_shadow: false,
                receive_shadow: true,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_objects_with_ground_receiving_only() {
        let items = TestObjects::default().render_items(&PlaceholderMeshes::default());
        assert_eq!(items.len(), shared::ViewerContent::Placeholder.object_count());
        let ground = &items[3];
        assert!(!ground.cast_shadow && ground.receive_shadow);
        assert!(items[..3].iter().all(|i| i.cast_shadow));
    }

    #[test]
    fn test_cube_rotates_with_time() {
        let mut objects = TestObjects::default();
        objects.advance(2.0);
        assert_eq!(objects.cube_rotation(), 1.0);
        objects.advance(-1.0);
        assert_eq!(objects.cube_rotation(), 1.0);
    }

    #[test]
    fn test_sphere_bobs_around_rest_height() {
        let mut objects = TestObjects::default();
        assert_eq!(objects.sphere_height(), 1.0);
        objects.advance(std::f32::consts::FRAC_PI_2);
        assert!((objects.sphere_height() - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(hex(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex(0x0000ff), [0.0, 0.0, 1.0]);
    }
}
