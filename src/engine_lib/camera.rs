// src/engine_lib/camera.rs

use glam::{Mat4, Vec2, Vec3};

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y_rad: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(
        position: Vec3,
        fov_y_deg: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fov_y_rad: fov_y_deg.to_radians(),
            znear,
            zfar,
        }
    }

    pub fn xz(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Walking direction on the ground plane; yaw 0 faces +z.
    pub fn forward_xz(&self) -> Vec2 {
        Vec2::new(self.yaw.sin(), self.yaw.cos())
    }

    pub fn right_xz(&self) -> Vec2 {
        let forward = self.forward_xz();
        Vec2::new(-forward.y, forward.x)
    }

    pub fn look_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(self.yaw.sin() * cos_pitch, sin_pitch, self.yaw.cos() * cos_pitch)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.look_direction(), Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_rad, aspect_ratio, self.znear, self.zfar)
    }

    pub fn view_projection(&self, screen_width: f32, screen_height: f32) -> Mat4 {
        let aspect_ratio = if screen_height > 0.0 { screen_width / screen_height } else { 1.0 };
        self.projection_matrix(aspect_ratio) * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_is_clockwise_of_forward_seen_from_above() {
        let camera = Camera::new(Vec3::ZERO, 75.0, 0.1, 100.0);
        assert_eq!(camera.forward_xz(), Vec2::new(0.0, 1.0));
        assert_eq!(camera.right_xz(), Vec2::new(-1.0, 0.0));
        let right3 = Vec3::new(camera.right_xz().x, 0.0, camera.right_xz().y);
        assert!((camera.look_direction().cross(Vec3::Y) - right3).length() < 1e-6);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO, 75.0, 0.1, 100.0);
        camera.set_pitch(3.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        camera.set_pitch(-3.0);
        assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn point_ahead_projects_to_screen_center() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), 75.0, 0.1, 100.0);
        let ahead = camera.position + camera.look_direction() * 5.0;
        let clip = camera.view_projection(800.0, 600.0) * ahead.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
