//! Perspective camera

use nalgebra::Perspective3;

use crate::foundation::math::{utils, Mat4, Point3, Vec3};

/// Perspective camera looking at a target
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position
    pub position: Point3,
    /// Point the camera looks at
    pub target: Point3,
    /// Up direction
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Camera {
    /// Camera on +Z at `distance`, looking at the origin
    pub fn looking_at_origin(distance: f32, fov_degrees: f32, aspect: f32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, distance),
            target: Point3::origin(),
            up: Vec3::y(),
            fov_degrees,
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Update the aspect ratio for a `width` x `height` surface
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// View-to-clip matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Perspective3::new(
            self.aspect,
            utils::deg_to_rad(self.fov_degrees),
            self.near,
            self.far,
        )
        .to_homogeneous()
    }

    /// World-to-clip matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Whether `point` falls inside the view frustum
    pub fn sees(&self, point: &Point3) -> bool {
        let clip = self.view_projection() * point.to_homogeneous();
        clip.w > 0.0
            && clip.x.abs() <= clip.w
            && clip.y.abs() <= clip.w
            && clip.z.abs() <= clip.w
    }
}
