use glam::{Mat3, Mat4, Vec3};
use shared::geometry::DashedSegment;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate vertex positions
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(9)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
    }

    /// Build from separate attribute streams. Missing normals become +Y,
    /// missing indices become a plain triangle list.
    pub fn from_attributes(
        positions: &[[f32; 3]],
        normals: Option<&[[f32; 3]]>,
        indices: Option<Vec<u32>>,
        color: [f32; 3],
    ) -> Self {
        let mut vertices = Vec::with_capacity(positions.len() * 9);
        for (i, p) in positions.iter().enumerate() {
            let n = normals
                .and_then(|n| n.get(i))
                .map(|n| Vec3::from_array(*n))
                .unwrap_or(Vec3::Y);
            push_vert(&mut vertices, p[0], p[1], p[2], n, color);
        }
        let indices = indices.unwrap_or_else(|| (0..positions.len() as u32).collect());
        MeshData { vertices, indices }
    }

    /// Merge another mesh into this one
    pub fn append(&mut self, other: &MeshData) {
        let base = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Copy with every position and normal transformed by `matrix`
    pub fn transformed(&self, matrix: &Mat4) -> MeshData {
        let normal_matrix = Mat3::from_mat4(*matrix).inverse().transpose();
        let mut vertices = self.vertices.clone();
        for v in vertices.chunks_exact_mut(9) {
            let p = matrix.transform_point3(Vec3::new(v[0], v[1], v[2]));
            let n = (normal_matrix * Vec3::new(v[3], v[4], v[5])).normalize_or_zero();
            v[..6].copy_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
        }
        MeshData {
            vertices,
            indices: self.indices.clone(),
        }
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Clone, Debug, Default)]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

impl LineMeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 7
    }

    pub fn push_segment(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        push_line_vert(&mut self.vertices, a.x, a.y, a.z, color);
        push_line_vert(&mut self.vertices, b.x, b.y, b.z, color);
    }
}

/// Convert generated dash segments into a line mesh
pub fn dashed_lines(segments: &[DashedSegment], color: [f32; 4]) -> LineMeshData {
    let mut lines = LineMeshData {
        vertices: Vec::with_capacity(segments.len() * 14),
    };
    for seg in segments {
        lines.push_segment(seg.start, seg.end, color);
    }
    lines
}

// ── Primitive generation (placeholder test objects) ──

pub fn cube(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * 9);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / 9) as u32;
        for v in quad {
            push_vert(&mut vertices, v.x, v.y, v.z, *normal, color);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

pub fn sphere(radius: f32, rings: u32, sectors: u32, color: [f32; 3]) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        let sp = phi.sin();
        let cp = phi.cos();

        for s in 0..=sectors {
            let theta = std::f32::consts::TAU * s as f32 / sectors as f32;
            let x = sp * theta.cos();
            let y = cp;
            let z = sp * theta.sin();

            push_vert(&mut vertices, radius * x, radius * y, radius * z, Vec3::new(x, y, z), color);
        }
    }

    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    MeshData { vertices, indices }
}

/// Torus lying in the XY plane, facing +Z
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32, color: [f32; 3]) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for j in 0..=radial_segments {
        let v = std::f32::consts::TAU * j as f32 / radial_segments as f32;
        for i in 0..=tubular_segments {
            let u = std::f32::consts::TAU * i as f32 / tubular_segments as f32;
            let ring_center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let n = (p - ring_center).normalize_or_zero();
            push_vert(&mut vertices, p.x, p.y, p.z, n, color);
        }
    }

    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = (tubular_segments + 1) * j + i - 1;
            let b = (tubular_segments + 1) * (j - 1) + i - 1;
            let c = (tubular_segments + 1) * (j - 1) + i;
            let d = (tubular_segments + 1) * j + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    MeshData { vertices, indices }
}

/// Horizontal plane at y = 0, facing +Y
pub fn plane(width: f32, depth: f32, color: [f32; 3]) -> MeshData {
    let hw = width * 0.5;
    let hd = depth * 0.5;
    let mut vertices = Vec::with_capacity(4 * 9);
    for (x, z) in [(-hw, hd), (hw, hd), (hw, -hd), (-hw, -hd)] {
        push_vert(&mut vertices, x, 0.0, z, Vec3::Y, color);
    }
    MeshData {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

// ── Ground grid ──────────────────────────────────────────────

/// Smallest accepted grid cell
pub const MIN_GRID_CELL: f32 = 0.05;
/// Cap on grid lines on each side of the origin
pub const MAX_GRID_RANGE: i32 = 200;

/// Effective cell size and number of lines per side for a grid
pub fn grid_extent(cell_size: f32, fade_distance: f32) -> (f32, i32) {
    let cell = if cell_size.is_finite() {
        cell_size.max(MIN_GRID_CELL)
    } else {
        1.0
    };
    let range = (fade_distance.max(0.0) / cell).ceil();
    let range = if range.is_finite() {
        (range as i32).min(MAX_GRID_RANGE)
    } else {
        0
    };
    (cell, range)
}

/// Reference grid with minor cells and major sections, fading out towards
/// `fade_distance`. Lines are split per cell so the fade interpolates.
pub fn grid(cell_size: f32, section_size: f32, fade_distance: f32, y: f32) -> LineMeshData {
    let mut lines = LineMeshData::default();
    let cell_color = [0.42_f32, 0.45, 0.50];
    let section_color = [0.22_f32, 0.25, 0.32];

    let (cell_size, range) = grid_extent(cell_size, fade_distance);
    let per_section = (section_size / cell_size).round().max(1.0) as i32;

    let fade = |p: Vec3, rgb: [f32; 3], alpha: f32| -> [f32; 4] {
        let d = (p.x * p.x + p.z * p.z).sqrt();
        let a = (1.0 - d / fade_distance).clamp(0.0, 1.0) * alpha;
        [rgb[0], rgb[1], rgb[2], a]
    };

    for i in -range..=range {
        let f = i as f32 * cell_size;
        let (rgb, alpha) = if i % per_section == 0 {
            (section_color, 0.9)
        } else {
            (cell_color, 0.5)
        };

        for k in -range..range {
            let a = k as f32 * cell_size;
            let b = a + cell_size;

            // Line along Z
            let p0 = Vec3::new(f, y, a);
            let p1 = Vec3::new(f, y, b);
            push_line_vert(&mut lines.vertices, p0.x, p0.y, p0.z, fade(p0, rgb, alpha));
            push_line_vert(&mut lines.vertices, p1.x, p1.y, p1.z, fade(p1, rgb, alpha));

            // Line along X
            let q0 = Vec3::new(a, y, f);
            let q1 = Vec3::new(b, y, f);
            push_line_vert(&mut lines.vertices, q0.x, q0.y, q0.z, fade(q0, rgb, alpha));
            push_line_vert(&mut lines.vertices, q1.x, q1.y, q1.z, fade(q1, rgb, alpha));
        }
    }

    lines
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[px, py, pz, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn push_line_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, c: [f32; 4]) {
    v.extend_from_slice(&[px, py, pz, c[0], c[1], c[2], c[3]]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let m = cube(1.0, 1.0, 1.0, [1.0; 3]);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.triangle_count(), 12);
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut a = plane(1.0, 1.0, [1.0; 3]);
        let b = plane(2.0, 2.0, [0.0; 3]);
        a.append(&b);
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(&a.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_from_attributes_defaults() {
        let m = MeshData::from_attributes(&[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], None, None, [1.0; 3]);
        assert_eq!(m.indices, vec![0, 1, 2]);
        assert_eq!(&m.vertices[3..6], &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_grid_fades_with_distance() {
        let g = grid(1.0, 5.0, 25.0, -0.01);
        assert!(g.vertex_count() > 0);
        let alphas: Vec<f32> = g.vertices.chunks_exact(7).map(|v| v[6]).collect();
        assert!(alphas.iter().all(|a| (0.0..=0.9).contains(a)));
        assert!(alphas.iter().any(|a| *a == 0.0));
        assert!(g.vertices.chunks_exact(7).all(|v| v[1] == -0.01));
    }

    #[test]
    fn test_degenerate_grid_settings_stay_bounded() {
        assert_eq!(grid_extent(0.0, 25.0), (MIN_GRID_CELL, MAX_GRID_RANGE));
        assert_eq!(grid_extent(-1.0, 25.0), (MIN_GRID_CELL, MAX_GRID_RANGE));
        assert_eq!(grid_extent(f32::NAN, 25.0), (1.0, 25));
        assert_eq!(grid_extent(1.0, f32::INFINITY).1, 0);
        assert_eq!(grid_extent(1.0, -5.0).1, 0);

        let max_vertices = ((2 * MAX_GRID_RANGE + 1) * (2 * MAX_GRID_RANGE) * 4) as usize;
        let g = grid(0.0, 5.0, 25.0, -0.01);
        assert_eq!(g.vertex_count(), max_vertices);
    }

    #[test]
    fn test_dashed_lines_two_vertices_per_segment() {
        let segs = shared::geometry::dashed_segments(Vec3::ZERO, Vec3::X, 0.12, 0.06);
        let lines = dashed_lines(&segs, [1.0; 4]);
        assert_eq!(lines.vertex_count(), segs.len() * 2);
    }
}
