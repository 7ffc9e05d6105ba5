use glam::{Mat4, Vec3};

/// A perspective camera for 3D scenes.
///
/// Stores where the camera is, what it looks at, and its projection
/// parameters. Input-driven controllers live outside this crate; they only
/// need to update `position` and `target` between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32, // radians
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 30.0, 30.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 50f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 200.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn looking_at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.target = Vec3::new(x, y, z);
        self
    }

    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees.to_radians();
        self
    }

    pub fn with_aspect(mut self, width: u32, height: u32) -> Self {
        self.aspect = width as f32 / height.max(1) as f32;
        self
    }

    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Compute the right vector from forward and up.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_looks_down_at_origin() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert!(forward.y < 0.0 && forward.z < 0.0);
        assert!((camera.fov.to_degrees() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let camera = Camera::new().at(0.0, 10.0, 20.0).with_aspect(800, 600);
        let clip = camera.view_projection().project_point3(Vec3::ZERO);
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
        assert!(clip.z > 0.0 && clip.z < 1.0);
    }

    #[test]
    fn far_clip_bounds_depth() {
        let camera = Camera::new().at(0.0, 0.0, 10.0).with_clip(1.0, 5.0);
        let inside = camera.view_projection().project_point3(Vec3::new(0.0, 0.0, 6.0));
        let beyond = camera.view_projection().project_point3(Vec3::new(0.0, 0.0, 2.0));
        assert!(inside.z > 0.0 && inside.z < 1.0);
        assert!(beyond.z > 1.0);
    }

    #[test]
    fn right_is_perpendicular() {
        let camera = Camera::new().looking_at(5.0, 0.0, 0.0);
        assert!(camera.right().dot(camera.forward()).abs() < 1e-6);
    }
}
