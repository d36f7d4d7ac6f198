//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the handful of matrix constructors the
//! scene and camera code needs. All matrices are column-major and follow the
//! OpenGL conventions: right-handed, Y-up, clip-space depth in [-1, 1].

pub use nalgebra::{Matrix3, Matrix4, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis (radians)
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis (radians)
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis (radians)
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a perspective projection matrix (vertical fov in radians)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create an orthographic projection matrix
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Translation column of an affine matrix
    fn translation_part(&self) -> Vec3;

    /// Copy of the matrix with the translation column cleared
    fn without_translation(&self) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_orthographic(left, right, bottom, top, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        // Camera looks down -Z in view space
        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }

    fn translation_part(&self) -> Vec3 {
        Vec3::new(self.m14, self.m24, self.m34)
    }

    fn without_translation(&self) -> Mat4 {
        let mut stripped = *self;
        stripped.m14 = 0.0;
        stripped.m24 = 0.0;
        stripped.m34 = 0.0;
        stripped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_rotations_are_right_handed() {
        let quarter = utils::deg_to_rad(90.0);

        let x = Mat4::rotation_x(quarter).transform_vector(&Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(x, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);

        let y = Mat4::rotation_y(quarter).transform_vector(&Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(y, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);

        let z = Mat4::rotation_z(quarter).transform_vector(&Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(z, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_look_at_matches_nalgebra() {
        let eye = Vec3::new(2.0, 3.0, 5.0);
        let target = Vec3::new(-1.0, 0.5, 0.0);
        let up = Vec3::new(0.0, 1.0, 0.0);

        let ours = Mat4::look_at(eye, target, up);
        let reference = Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up);

        assert_relative_eq!(ours, reference, epsilon = 1e-5);
    }

    #[test]
    fn test_look_at_puts_target_on_negative_z() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros(), Vec3::y());
        let target_in_view = view.transform_point(&Point3::origin());

        assert_relative_eq!(target_in_view.coords, Vec3::new(0.0, 0.0, -5.0), epsilon = 1e-6);
    }

    #[test]
    fn test_translation_helpers() {
        let matrix = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0)) * Mat4::rotation_y(0.3);

        assert_relative_eq!(matrix.translation_part(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(matrix.without_translation().translation_part(), Vec3::zeros());
        assert_relative_eq!(matrix.without_translation(), Mat4::rotation_y(0.3), epsilon = 1e-6);
    }

    #[test]
    fn test_angle_conversion() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI);
        assert_relative_eq!(utils::rad_to_deg(constants::PI / 2.0), 90.0, epsilon = 1e-4);
    }
}
