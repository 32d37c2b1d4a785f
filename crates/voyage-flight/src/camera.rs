//! The camera transform moved by the flight controller.

use glam::{Mat4, Quat, Vec3};

/// World-space camera transform. Projection is left to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Position in world space.
    pub position: Vec3,
    /// Orientation as a unit quaternion. Identity looks down -Z with +Y up.
    pub rotation: Quat,
}

impl Camera {
    /// A camera at `position` looking down -Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// A camera at `position` looking toward `target`, keeping `up` as close
    /// to vertical as the view direction allows.
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let view = Mat4::look_at_rh(position, target, up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        Self {
            position,
            rotation: rotation.normalize(),
        }
    }

    /// Rotate about an axis in the camera's own frame.
    pub fn rotate_on_axis(&mut self, local_axis: Vec3, angle: f32) {
        self.rotation = (self.rotation * Quat::from_axis_angle(local_axis, angle)).normalize();
    }

    /// Camera-to-world transform.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    /// The direction the camera faces (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The right direction (+X in camera space, first column of the world matrix).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// The up direction (+Y in camera space, second column of the world matrix).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_faces_negative_z() {
        let cam = Camera::default();
        assert_eq!(cam.forward(), Vec3::NEG_Z);
        assert_eq!(cam.right(), Vec3::X);
        assert_eq!(cam.up(), Vec3::Y);
    }

    #[test]
    fn test_basis_matches_world_matrix_columns() {
        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        cam.rotate_on_axis(Vec3::Y, 0.7);
        cam.rotate_on_axis(Vec3::X, -0.3);
        let world = cam.world_matrix();
        assert!(approx(world.x_axis.truncate(), cam.right()));
        assert!(approx(world.y_axis.truncate(), cam.up()));
        assert!(approx(-world.z_axis.truncate(), cam.forward()));
        assert!(approx(world.w_axis.truncate(), cam.position));
    }

    #[test]
    fn test_rotation_is_in_local_frame() {
        let mut cam = Camera::default();
        // Yaw a quarter turn left, then pitch: pitch must follow the new right axis.
        cam.rotate_on_axis(Vec3::Y, FRAC_PI_2);
        assert!(approx(cam.forward(), Vec3::NEG_X));
        cam.rotate_on_axis(Vec3::X, FRAC_PI_2);
        assert!(approx(cam.forward(), Vec3::Y));
        assert!(approx(cam.right(), Vec3::NEG_Z));
    }

    #[test]
    fn test_view_matrix_maps_position_to_origin() {
        let mut cam = Camera::new(Vec3::new(5.0, -2.0, 9.0));
        cam.rotate_on_axis(Vec3::Z, 0.4);
        let p = cam.view_matrix().transform_point3(cam.position);
        assert!(approx(p, Vec3::ZERO));
        let ahead = cam.position + cam.forward() * 3.0;
        assert!(approx(cam.view_matrix().transform_point3(ahead), Vec3::new(0.0, 0.0, -3.0)));
    }

    #[test]
    fn test_looking_at_target() {
        let cam = Camera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::new(10.0, 0.0, 10.0), Vec3::Y);
        assert!(approx(cam.forward(), Vec3::X));
        assert!(approx(cam.up(), Vec3::Y));
    }

    #[test]
    fn test_rotation_stays_normalized() {
        let mut cam = Camera::default();
        for _ in 0..10_000 {
            cam.rotate_on_axis(Vec3::X, 0.013);
            cam.rotate_on_axis(Vec3::Y, -0.007);
            cam.rotate_on_axis(Vec3::Z, 0.02);
        }
        assert!((cam.rotation.length() - 1.0).abs() < 1e-5);
    }
}
