//! Math utilities and types
//!
//! Vector aliases over nalgebra plus the transform applied to the text mesh.

pub use nalgebra::{Matrix4, Rotation3, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 6, the oscillation amplitude
    pub const SIXTH_PI: f32 = std::f32::consts::FRAC_PI_6;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

/// Rotation and uniform scale of the rendered text mesh
///
/// Rotation is stored as Euler angles in radians and composed in X, Y, Z
/// order, matching the convention of browser scene graphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTransform {
    /// Euler rotation (x, y, z) in radians
    pub rotation: Vec3,

    /// Uniform scale factor
    pub scale: f32,
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self {
            rotation: Vec3::zeros(),
            scale: 1.0,
        }
    }
}

impl MeshTransform {
    /// Identity rotation, unit scale
    pub fn identity() -> Self {
        Self::default()
    }

    /// Rotation matrix for the stored Euler angles
    pub fn rotation_matrix(&self) -> Rotation3<f32> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), self.rotation.x)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation.y)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), self.rotation.z)
    }

    /// Model matrix: rotate and scale about the origin, then apply `offset`
    ///
    /// `offset` is applied in mesh space before rotation so that a centered
    /// mesh spins about its own middle.
    pub fn to_matrix(&self, offset: &Vec3) -> Mat4 {
        self.rotation_matrix().to_homogeneous()
            * Mat4::new_scaling(self.scale)
            * Mat4::new_translation(offset)
    }
}
