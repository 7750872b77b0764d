//! Normalized model descriptor and the service that produces it

use super::color::parse_color;
use super::request::{GenerateRequest, LooseValue};
use crate::animation::{AnimationParameters, RotationPattern, SpeedSetting};
use crate::render::{Bevel, MaterialDescriptor, TextGeometry};
use serde::{Deserialize, Serialize};

/// Parameter validation errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Text was empty or whitespace only
    #[error("No text provided")]
    MissingText,

    /// A numeric field could not be read as a finite number
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber {
        /// Request field name
        field: &'static str,
        /// Submitted value
        value: String,
    },

    /// A color field was not `#RRGGBB`, `0xRRGGBB` or an integer
    #[error("Invalid color for {field}: {value}")]
    InvalidColor {
        /// Request field name
        field: &'static str,
        /// Submitted value
        value: String,
    },
}

/// Fully resolved description of the mesh to build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Text to render
    pub text: String,
    /// Font id
    pub font: String,
    /// Glyph size in world units
    pub size: f32,
    /// Extrusion depth
    pub height: f32,
    /// Outline subdivisions per curve
    pub curve_segments: u32,
    /// Bevel toggle
    pub bevel_enabled: bool,
    /// Bevel depth
    pub bevel_thickness: f32,
    /// Bevel extent
    pub bevel_size: f32,
    /// Bevel start offset
    pub bevel_offset: f32,
    /// Bevel subdivisions
    pub bevel_segments: u32,
    /// Face color, 0xRRGGBB
    pub color: u32,
    /// Edge color, 0xRRGGBB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bevel_color: Option<u32>,
    /// Mesh position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,
    /// Animation pattern
    pub rotation_pattern: RotationPattern,
    /// Animation speed
    pub rotation_speed: SpeedSetting,
}

impl ModelDescriptor {
    /// Animation selection carried by this descriptor
    pub fn animation_parameters(&self) -> AnimationParameters {
        AnimationParameters::new(self.rotation_pattern, self.rotation_speed)
    }

    /// Extrusion settings for the rendering backend
    pub fn text_geometry(&self) -> TextGeometry {
        TextGeometry {
            size: self.size,
            depth: self.height,
            curve_segments: self.curve_segments,
            bevel: self.bevel_enabled.then_some(Bevel {
                thickness: self.bevel_thickness,
                size: self.bevel_size,
                offset: self.bevel_offset,
                segments: self.bevel_segments,
            }),
        }
    }

    /// Face and edge materials; edges use the face color unless overridden
    pub fn material(&self) -> MaterialDescriptor {
        MaterialDescriptor {
            face_color: self.color,
            edge_color: self.bevel_color.unwrap_or(self.color),
        }
    }
}

/// Values used for fields a request leaves out
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorDefaults {
    /// Font id
    pub font: String,
    /// Face color
    pub color: u32,
    /// Glyph size
    pub size: f32,
    /// Extrusion depth
    pub thickness: f32,
    /// Outline subdivisions
    pub curve_segments: u32,
    /// Bevel toggle
    pub bevel_enabled: bool,
    /// Bevel depth
    pub bevel_thickness: f32,
    /// Bevel extent
    pub bevel_size: f32,
    /// Bevel start offset
    pub bevel_offset: f32,
    /// Bevel subdivisions
    pub bevel_segments: u32,
    /// Animation selection
    pub animation: AnimationParameters,
}

impl Default for DescriptorDefaults {
    fn default() -> Self {
        Self {
            font: "helvetiker".to_string(),
            color: 0x15_62_89,
            size: 0.5,
            thickness: 0.2,
            curve_segments: 12,
            bevel_enabled: true,
            bevel_thickness: 0.03,
            bevel_size: 0.02,
            bevel_offset: 0.0,
            bevel_segments: 5,
            animation: AnimationParameters::default(),
        }
    }
}

/// Turns raw requests into [`ModelDescriptor`]s
#[derive(Debug, Clone, Default)]
pub struct ParameterService {
    defaults: DescriptorDefaults,
}

impl ParameterService {
    /// Service with the standard defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Service with custom defaults
    pub fn with_defaults(defaults: DescriptorDefaults) -> Self {
        Self { defaults }
    }

    /// Defaults in use
    pub fn defaults(&self) -> &DescriptorDefaults {
        &self.defaults
    }

    /// Validate `request` and fill in defaults
    pub fn normalize(&self, request: &GenerateRequest) -> Result<ModelDescriptor, ParameterError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(ParameterError::MissingText);
        }
        let defaults = &self.defaults;

        let font = match request.font.as_deref().map(str::trim) {
            Some(font) if !font.is_empty() => font.to_string(),
            _ => defaults.font.clone(),
        };

        let color = match &request.color {
            Some(value) => color_field("color", value)?,
            None => defaults.color,
        };
        let bevel_color = request
            .bevel_color
            .as_ref()
            .map(|value| color_field("bevelColor", value))
            .transpose()?;

        let height = float_field("thickness", request.thickness.as_ref(), defaults.thickness)?;
        let bevel_thickness = float_field(
            "bevelThickness",
            request.bevel_thickness.as_ref(),
            defaults.bevel_thickness,
        )?;
        let bevel_size = float_field("bevelSize", request.bevel_size.as_ref(), defaults.bevel_size)?;
        let bevel_segments = count_field(
            "bevelSegments",
            request.bevel_segments.as_ref(),
            defaults.bevel_segments,
        )?;

        let rotation_pattern = request
            .rotation_pattern
            .as_deref()
            .map_or(defaults.animation.pattern, RotationPattern::from_name);
        let rotation_speed = match &request.rotation_speed {
            Some(LooseValue::Number(multiplier)) => {
                SpeedSetting::from_multiplier(*multiplier as f32)
            }
            Some(LooseValue::Text(token)) => SpeedSetting::from_token(token),
            None => defaults.animation.speed,
        };

        Ok(ModelDescriptor {
            text: text.to_string(),
            font,
            size: defaults.size,
            height,
            curve_segments: defaults.curve_segments,
            bevel_enabled: request.bevel_enabled.unwrap_or(defaults.bevel_enabled),
            bevel_thickness,
            bevel_size,
            bevel_offset: defaults.bevel_offset,
            bevel_segments,
            color,
            bevel_color,
            position: request.position,
            rotation_pattern,
            rotation_speed,
        })
    }
}

fn color_field(field: &'static str, value: &LooseValue) -> Result<u32, ParameterError> {
    parse_color(value).ok_or_else(|| ParameterError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

fn finite_number(field: &'static str, value: &LooseValue) -> Result<f64, ParameterError> {
    value
        .as_number()
        .filter(|number| number.is_finite())
        .ok_or_else(|| ParameterError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn float_field(
    field: &'static str,
    value: Option<&LooseValue>,
    default: f32,
) -> Result<f32, ParameterError> {
    value.map_or(Ok(default), |value| {
        finite_number(field, value).map(|number| number as f32)
    })
}

fn count_field(
    field: &'static str,
    value: Option<&LooseValue>,
    default: u32,
) -> Result<u32, ParameterError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let number = finite_number(field, value)?;
    if number < 0.0 || number.fract() != 0.0 || number > f64::from(u32::MAX) {
        return Err(ParameterError::InvalidNumber {
            field,
            value: value.to_string(),
        });
    }
    Ok(number as u32)
}
