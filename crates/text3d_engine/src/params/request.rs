//! Raw generation request as submitted by the form

use serde::{Deserialize, Serialize};
use std::fmt;

/// A form value that may arrive as a JSON number or as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    /// JSON number
    Number(f64),
    /// JSON string
    Text(String),
}

impl LooseValue {
    /// Numeric reading: numbers as-is, strings parsed after trimming
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for LooseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value),
            Self::Text(text) => write!(f, "{:?}", text),
        }
    }
}

impl From<f64> for LooseValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LooseValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Generation request; every field except `text` is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Text to render
    #[serde(default)]
    pub text: String,

    /// Font id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    /// Face color (`#RRGGBB`, `0xRRGGBB` or integer)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<LooseValue>,

    /// Edge color; faces' color when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bevel_color: Option<LooseValue>,

    /// Extrusion depth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<LooseValue>,

    /// Optional mesh position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,

    /// Bevel toggle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bevel_enabled: Option<bool>,

    /// Bevel depth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bevel_thickness: Option<LooseValue>,

    /// Bevel extent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bevel_size: Option<LooseValue>,

    /// Bevel segment count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bevel_segments: Option<LooseValue>,

    /// Rotation pattern name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_pattern: Option<String>,

    /// Preset token or custom multiplier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_speed: Option<LooseValue>,
}

impl GenerateRequest {
    /// Request for `text` with every other field defaulted
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}
