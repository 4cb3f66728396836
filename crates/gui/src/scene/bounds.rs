use glam::{Mat4, Vec3};

use crate::viewport::mesh::MeshData;

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// Box containing nothing; extending it with any point yields that point
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&mut self, other: &Aabb) {
        if !other.is_empty() {
            self.extend(other.min);
            self.extend(other.max);
        }
    }

    /// Compute AABB from MeshData positions, transformed to world space
    pub fn from_mesh(data: &MeshData, world: &Mat4) -> Self {
        let mut aabb = Self::empty();
        for p in data.positions() {
            aabb.extend(world.transform_point3(p));
        }
        aabb
    }

    /// Center of the bounding box (origin for an empty box)
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis (zero for an empty box)
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        self.max - self.min
    }

    /// Lowest point; the ground plane for an empty box
    pub fn floor(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.min.y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box_is_degenerate_not_nan() {
        let aabb = Aabb::empty();
        assert!(aabb.is_empty());
        assert_eq!(aabb.size(), Vec3::ZERO);
        assert_eq!(aabb.center(), Vec3::ZERO);
        assert_eq!(aabb.floor(), 0.0);
    }

    #[test]
    fn test_extend_and_center() {
        let mut aabb = Aabb::empty();
        aabb.extend(Vec3::new(-2.0, 0.0, -1.0));
        aabb.extend(Vec3::new(4.0, 6.0, 3.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 3.0, 1.0));
        assert_eq!(aabb.size(), Vec3::new(6.0, 6.0, 4.0));
    }

    #[test]
    fn test_from_mesh_applies_world_transform() {
        let cube = crate::viewport::mesh::cube(2.0, 2.0, 2.0, [1.0; 3]);
        let world = Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0));
        let aabb = Aabb::from_mesh(&cube, &world);
        assert_eq!(aabb.min, Vec3::new(-1.0, 4.0, -1.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 6.0, 1.0));
    }
}
