use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Environment backdrop preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    City,
    Studio,
    Sunset,
    Night,
}

impl Environment {
    pub fn all() -> &'static [Environment] {
        &[
            Environment::City,
            Environment::Studio,
            Environment::Sunset,
            Environment::Night,
        ]
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Environment::City => "env.city",
            Environment::Studio => "env.studio",
            Environment::Sunset => "env.sunset",
            Environment::Night => "env.night",
        }
    }

    /// Sky color at the horizon (linear RGB)
    pub fn sky(&self) -> [f32; 3] {
        match self {
            Environment::City => [0.72, 0.78, 0.85],
            Environment::Studio => [0.86, 0.86, 0.88],
            Environment::Sunset => [0.93, 0.62, 0.45],
            Environment::Night => [0.06, 0.08, 0.14],
        }
    }

    /// Tint multiplied into the ambient term
    pub fn ambient_tint(&self) -> [f32; 3] {
        match self {
            Environment::City => [0.95, 0.97, 1.0],
            Environment::Studio => [1.0, 1.0, 1.0],
            Environment::Sunset => [1.0, 0.82, 0.68],
            Environment::Night => [0.55, 0.62, 0.85],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Direction the light travels (towards the origin)
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
}

/// Ambient + directional + point lighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingRig {
    pub ambient: f32,
    pub directional: DirectionalLight,
    pub point: PointLight,
}

impl Default for LightingRig {
    fn default() -> Self {
        Self {
            ambient: 0.3,
            directional: DirectionalLight {
                position: Vec3::new(10.0, 10.0, 5.0),
                intensity: 1.0,
            },
            point: PointLight {
                position: Vec3::new(-10.0, -10.0, -10.0),
                intensity: 0.5,
            },
        }
    }
}

impl LightingRig {
    /// Ambient color after the environment tint
    pub fn ambient_color(&self, env: Environment) -> Vec3 {
        Vec3::from_array(env.ambient_tint()) * self.ambient
    }

    /// Matrix flattening geometry onto the plane `y = ground` along the
    /// directional light. Used for planar ground shadows.
    pub fn shadow_matrix(&self, ground: f32) -> glam::Mat4 {
        let l = self.directional.direction();
        if l.y.abs() < 1e-4 {
            return glam::Mat4::ZERO;
        }
        // p' = p - l * (p.y - ground) / l.y
        let kx = -l.x / l.y;
        let kz = -l.z / l.y;
        glam::Mat4::from_cols(
            glam::Vec4::new(1.0, 0.0, 0.0, 0.0),
            glam::Vec4::new(kx, 0.0, kz, 0.0),
            glam::Vec4::new(0.0, 0.0, 1.0, 0.0),
            glam::Vec4::new(-kx * ground, ground, -kz * ground, 1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rig() {
        let rig = LightingRig::default();
        assert_eq!(rig.ambient, 0.3);
        assert_eq!(rig.directional.position, Vec3::new(10.0, 10.0, 5.0));
        assert_eq!(rig.point.intensity, 0.5);
    }

    #[test]
    fn test_shadow_matrix_projects_onto_ground() {
        let rig = LightingRig::default();
        let m = rig.shadow_matrix(0.0);
        // A point directly up the light ray lands on the origin
        let p = m.transform_point3(Vec3::new(2.0, 2.0, 1.0));
        assert!(p.abs_diff_eq(Vec3::ZERO, 1e-5));

        let q = m.transform_point3(Vec3::new(1.0, 0.0, -1.0));
        assert!(q.abs_diff_eq(Vec3::new(1.0, 0.0, -1.0), 1e-5));
    }

    #[test]
    fn test_environment_serde_names() {
        let json = serde_json::to_string(&Environment::Sunset).unwrap();
        assert_eq!(json, "\"sunset\"");
        let env: Environment = serde_json::from_str("\"night\"").unwrap();
        assert_eq!(env, Environment::Night);
    }
}
