use glam::Vec2;

/// Viewer in grid space.
///
/// * `dir` is where the camera looks; it need not be unit length.
/// * `plane` is perpendicular to `dir`; its length relative to `dir` sets
///   the horizontal field of view (`|plane| / |dir| = tan(fov / 2)`).
///
/// Read-only while a frame renders; input handling mutates it in between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub dir: Vec2,
    pub plane: Vec2,
}

impl Camera {
    pub fn new(pos: Vec2, dir: Vec2, plane: Vec2) -> Self {
        Self { pos, dir, plane }
    }

    /// Camera at `pos` facing `yaw` (radians, 0 = +X, counter-clockwise)
    /// with horizontal FoV `fov`.
    pub fn from_yaw(pos: Vec2, yaw: f32, fov: f32) -> Self {
        let dir = Vec2::from_angle(yaw);
        // plane points to screen-right, which is +Y for dir = +X
        let plane = dir.perp() * (fov * 0.5).tan();
        Self { pos, dir, plane }
    }

    /*──────────────────────── ray generation ────────────────────────*/

    /// Horizontal screen coordinate of column `x` mapped to `-1 ..= +1`.
    #[inline]
    pub fn camera_x(x: usize, width: usize) -> f32 {
        2.0 * x as f32 / width as f32 - 1.0
    }

    /// Ray direction for screen column `x` of a `width`-wide view.
    #[inline]
    pub fn ray(&self, x: usize, width: usize) -> Vec2 {
        self.dir + self.plane * Self::camera_x(x, width)
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Rotate view and plane together (positive = counter-clockwise).
    pub fn turn(&mut self, delta_yaw: f32) {
        let rot = Vec2::from_angle(delta_yaw);
        self.dir = rot.rotate(self.dir);
        self.plane = rot.rotate(self.plane);
    }

    /// Position reached by moving `forward` along the view and `side` toward
    /// screen-right. The camera itself is not moved; the caller decides
    /// whether the target is free.
    pub fn step(&self, forward: f32, side: f32) -> Vec2 {
        let f = self.dir.normalize_or_zero();
        let r = self.plane.normalize_or_zero();
        self.pos + f * forward + r * side
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn camera_x_sweeps_minus_one_to_one() {
        assert_eq!(Camera::camera_x(0, 640), -1.0);
        assert_eq!(Camera::camera_x(320, 640), 0.0);
        assert!((Camera::camera_x(639, 640) - 1.0).abs() < 0.01);
    }

    #[test]
    fn centre_ray_is_direction() {
        let cam = Camera::new(Vec2::ONE, Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.66));
        assert_eq!(cam.ray(50, 100), Vec2::new(1.0, 0.0));
        assert_eq!(cam.ray(0, 100), Vec2::new(1.0, -0.66));
    }

    #[test]
    fn from_yaw_at_90_deg() {
        let cam = Camera::from_yaw(Vec2::ZERO, 0.0, FRAC_PI_2);
        assert!((cam.dir - Vec2::X).length() < 1e-6);
        assert!((cam.plane - Vec2::Y).length() < 1e-6);
        assert!(cam.dir.dot(cam.plane).abs() < 1e-6);
    }

    #[test]
    fn turn_keeps_plane_perpendicular() {
        let mut cam = Camera::new(Vec2::ZERO, Vec2::X, Vec2::new(0.0, 0.66));
        cam.turn(0.3);
        cam.turn(1.1);
        assert!(cam.dir.dot(cam.plane).abs() < 1e-5);
        assert!((cam.plane.length() - 0.66).abs() < 1e-5);

        cam.turn(-1.4);
        assert!((cam.dir - Vec2::X).length() < 1e-5);
    }

    #[test]
    fn step_moves_forward_and_right() {
        let cam = Camera::new(Vec2::new(2.0, 2.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 1.32));
        assert!((cam.step(1.0, 0.0) - Vec2::new(3.0, 2.0)).length() < 1e-6);
        assert!((cam.step(0.0, 0.5) - Vec2::new(2.0, 2.5)).length() < 1e-6);
        assert_eq!(cam.pos, Vec2::new(2.0, 2.0));
    }
}
