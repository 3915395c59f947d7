//! Pinhole camera used for screen <-> world ray mapping.
//!
//! Screen coordinates are pixels with the origin at the top-left corner and
//! `y` growing downwards.

use foundation::math::{Vec2, Vec3};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view (radians).
    pub fov_y_rad: f64,
    pub viewport: Vec2,
}

impl PerspectiveCamera {
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            eye,
            target,
            up,
            fov_y_rad: 45f64.to_radians(),
            viewport: Vec2::new(1280.0, 720.0),
        }
    }

    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        self
    }

    pub fn with_fov_y(mut self, fov_y_rad: f64) -> Self {
        self.fov_y_rad = fov_y_rad;
        self
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize()
    }

    /// Camera right vector (world space).
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    /// Camera up vector re-orthogonalized against forward.
    pub fn true_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    fn aspect(&self) -> f64 {
        self.viewport.x / self.viewport.y
    }

    /// Unit direction from the eye through the screen point.
    pub fn unproject(&self, screen: Vec2) -> Vec3 {
        let nx = 2.0 * screen.x / self.viewport.x - 1.0;
        let ny = 1.0 - 2.0 * screen.y / self.viewport.y;
        let tan = (0.5 * self.fov_y_rad).tan();

        (self.forward() + self.right() * (nx * tan * self.aspect()) + self.true_up() * (ny * tan))
            .normalize()
    }

    /// Screen position of a world point, `None` when it is behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let d = world - self.eye;
        let depth = d.dot(self.forward());
        if depth <= 0.0 {
            return None;
        }
        let tan = (0.5 * self.fov_y_rad).tan();
        let nx = d.dot(self.right()) / (depth * tan * self.aspect());
        let ny = d.dot(self.true_up()) / (depth * tan);
        Some(Vec2::new(
            (nx + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ny) * 0.5 * self.viewport.y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::PerspectiveCamera;
    use foundation::math::{Vec2, Vec3};

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        let diff = (a - b).length();
        assert!(diff <= eps, "expected {a:?} ~= {b:?} (diff {diff})");
    }

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::UNIT_Y)
            .with_viewport(800.0, 600.0)
    }

    #[test]
    fn center_of_screen_looks_forward() {
        let cam = camera();
        assert_vec_close(cam.unproject(Vec2::new(400.0, 300.0)), -Vec3::UNIT_Z, 1e-12);
        assert_vec_close(cam.right(), Vec3::UNIT_X, 1e-12);
    }

    #[test]
    fn screen_axes_match_world_axes() {
        let cam = camera();
        let right = cam.unproject(Vec2::new(800.0, 300.0));
        let top = cam.unproject(Vec2::new(400.0, 0.0));
        assert!(right.x > 0.0 && right.y.abs() < 1e-12);
        assert!(top.y > 0.0 && top.x.abs() < 1e-12);
    }

    #[test]
    fn project_inverts_unproject() {
        let cam = camera();
        let p = Vec3::new(1.5, -2.0, 3.0);
        let screen = cam.project(p).expect("in front");
        let dir = cam.unproject(screen);
        assert_vec_close(dir, (p - cam.eye).normalize(), 1e-12);
        assert!(cam.project(Vec3::new(0.0, 0.0, 20.0)).is_none());
    }
}
