use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3, Vec4};

pub const FOV_DEGREES: f32 = 50.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 1000.0;
pub const MIN_DISTANCE: f32 = 1.0;
pub const MAX_DISTANCE: f32 = 50.0;
/// Polar angle limits, measured from straight up
pub const MIN_POLAR: f32 = 0.01;
pub const MAX_POLAR: f32 = PI * 0.75;

/// Orbit camera for the 3D viewport
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Elevation above the horizon (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from([5.0, 5.0, 5.0])
    }
}

impl OrbitCamera {
    /// Camera at `position` looking at the origin
    pub fn looking_from(position: [f32; 3]) -> Self {
        let offset = Vec3::from_array(position);
        let distance = offset.length();
        let (yaw, pitch) = if distance > f32::EPSILON {
            (offset.x.atan2(offset.z), (offset.y / distance).asin())
        } else {
            (0.0, 0.0)
        };
        let mut camera = Self {
            yaw,
            pitch,
            distance,
            target: Vec3::ZERO,
            fov: FOV_DEGREES.to_radians(),
        };
        camera.clamp();
        camera
    }

    fn pitch_range() -> (f32, f32) {
        (FRAC_PI_2 - MAX_POLAR, FRAC_PI_2 - MIN_POLAR)
    }

    fn clamp(&mut self) {
        let (lo, hi) = Self::pitch_range();
        self.pitch = self.pitch.clamp(lo, hi);
        self.distance = self.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Angle from straight up
    pub fn polar_angle(&self) -> f32 {
        FRAC_PI_2 - self.pitch
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        self.pitch += dy.to_radians();
        self.clamp();
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta;
        self.clamp();
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right_vector();
        let up = self.up_vector();
        self.target += right * dx + up * dy;
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + Vec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, NEAR, FAR)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        let right = self.right_vector();
        right.cross(fwd).normalize_or_zero()
    }

    /// Project a 3D point to 2D screen coords (for overlay drawing)
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let aspect = rect.width() / rect.height();
        let p = self.view_projection(aspect) * Vec4::new(point.x, point.y, point.z, 1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let screen_x = rect.center().x + ndc.x * rect.width() * 0.5;
        let screen_y = rect.center().y - ndc.y * rect.height() * 0.5;
        Some(egui::pos2(screen_x, screen_y))
    }
}
