//! Scene lights

use crate::foundation::math::Vec3;

/// Light type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Uniform fill from every direction
    Ambient,
    /// Parallel rays from a direction
    Directional,
}

/// A light in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light type
    pub kind: LightKind,
    /// Position; for directional lights, the direction the light comes from
    pub position: Vec3,
    /// Intensity multiplier
    pub intensity: f32,
    /// Linear RGB color
    pub color: [f32; 3],
}

impl Light {
    /// White ambient light
    pub fn ambient(intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            position: Vec3::zeros(),
            intensity,
            color: [1.0, 1.0, 1.0],
        }
    }

    /// Directional light from `position`
    pub fn directional(position: Vec3, intensity: f32, color: [f32; 3]) -> Self {
        Self {
            kind: LightKind::Directional,
            position,
            intensity,
            color,
        }
    }

    /// Ambient base, white key light and a cool fill light
    pub fn default_rig() -> Vec<Self> {
        vec![
            Self::ambient(0.3),
            Self::directional(Vec3::new(1.0, 1.0, 1.0), 1.0, [1.0, 1.0, 1.0]),
            Self::directional(Vec3::new(-0.5, -0.5, 0.5), 0.4, [0.8, 0.9, 1.0]),
        ]
    }
}
