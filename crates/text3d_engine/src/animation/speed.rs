//! Rotation speed presets and custom multipliers

use serde::{Deserialize, Serialize};

/// Base rate for [`SpeedPreset::Slow`], radians per tick
pub const SLOW_RATE: f32 = 0.005;

/// Base rate for [`SpeedPreset::Normal`], radians per tick
pub const NORMAL_RATE: f32 = 0.01;

/// Base rate for [`SpeedPreset::Fast`], radians per tick
pub const FAST_RATE: f32 = 0.02;

/// Named speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedPreset {
    /// Half the normal rate
    Slow,
    /// The reference rate
    #[default]
    Normal,
    /// Twice the normal rate
    Fast,
}

impl SpeedPreset {
    /// Base rate in radians per tick
    pub fn base_rate(self) -> f32 {
        match self {
            Self::Slow => SLOW_RATE,
            Self::Normal => NORMAL_RATE,
            Self::Fast => FAST_RATE,
        }
    }

    /// Look up a preset by token (case-insensitive)
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "slow" => Some(Self::Slow),
            "normal" => Some(Self::Normal),
            "fast" => Some(Self::Fast),
            _ => None,
        }
    }
}

/// Either a named preset or a custom multiplier of the normal rate
///
/// The two are mutually exclusive: choosing one replaces the other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeedSetting {
    /// One of the three named presets
    Preset(SpeedPreset),
    /// Multiplier applied to [`NORMAL_RATE`]
    Custom(f32),
}

impl Default for SpeedSetting {
    fn default() -> Self {
        Self::Preset(SpeedPreset::Normal)
    }
}

impl SpeedSetting {
    /// Interpret a speed token: a preset name or a decimal multiplier
    ///
    /// Tokens that are neither fall back to the normal preset.
    pub fn from_token(token: &str) -> Self {
        if let Some(preset) = SpeedPreset::from_token(token) {
            return Self::Preset(preset);
        }
        match token.trim().parse::<f32>() {
            Ok(multiplier) => Self::from_multiplier(multiplier),
            Err(_) => {
                log::warn!("Unreadable rotation speed '{}', using normal", token);
                Self::Preset(SpeedPreset::Normal)
            }
        }
    }

    /// Custom multiplier, or the normal preset unless it is positive and finite
    pub fn from_multiplier(multiplier: f32) -> Self {
        if multiplier.is_finite() && multiplier > 0.0 {
            Self::Custom(multiplier)
        } else {
            log::warn!("Rotation speed multiplier {} out of range, using normal", multiplier);
            Self::Preset(SpeedPreset::Normal)
        }
    }

    /// Resolved rate in radians per tick
    ///
    /// Custom multipliers must be positive and finite; anything else resolves
    /// to the normal rate. There is no upper bound.
    pub fn rate(self) -> f32 {
        match self {
            Self::Preset(preset) => preset.base_rate(),
            Self::Custom(multiplier) if multiplier.is_finite() && multiplier > 0.0 => {
                NORMAL_RATE * multiplier
            }
            Self::Custom(multiplier) => {
                log::warn!("Rotation speed multiplier {} out of range, using normal", multiplier);
                NORMAL_RATE
            }
        }
    }

    /// The preset, if this is not a custom value
    pub fn preset(self) -> Option<SpeedPreset> {
        match self {
            Self::Preset(preset) => Some(preset),
            Self::Custom(_) => None,
        }
    }

    /// The custom multiplier, if this is not a preset
    pub fn custom(self) -> Option<f32> {
        match self {
            Self::Preset(_) => None,
            Self::Custom(multiplier) => Some(multiplier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_preset_rates() {
        assert_relative_eq!(SpeedSetting::from_token("slow").rate(), 0.005);
        assert_relative_eq!(SpeedSetting::from_token("normal").rate(), 0.01);
        assert_relative_eq!(SpeedSetting::from_token("fast").rate(), 0.02);
        assert_relative_eq!(SpeedSetting::from_token("Fast").rate(), 0.02);
    }

    #[test]
    fn test_custom_multiplier() {
        let speed = SpeedSetting::from_token("2.5");
        assert_eq!(speed, SpeedSetting::Custom(2.5));
        assert_relative_eq!(speed.rate(), 0.025);

        // No upper bound
        assert_relative_eq!(SpeedSetting::Custom(100.0).rate(), 1.0);
    }

    #[test]
    fn test_unreadable_token_falls_back_to_normal() {
        assert_relative_eq!(SpeedSetting::from_token("not-a-number").rate(), 0.01);
        assert_relative_eq!(SpeedSetting::from_token("").rate(), 0.01);
    }

    #[test]
    fn test_non_positive_custom_falls_back_to_normal() {
        assert_relative_eq!(SpeedSetting::Custom(0.0).rate(), NORMAL_RATE);
        assert_relative_eq!(SpeedSetting::Custom(-3.0).rate(), NORMAL_RATE);
        assert_relative_eq!(SpeedSetting::Custom(f32::NAN).rate(), NORMAL_RATE);
        assert_relative_eq!(SpeedSetting::Custom(f32::INFINITY).rate(), NORMAL_RATE);
    }

    #[test]
    fn test_invalid_multipliers_become_normal_preset() {
        let normal = SpeedSetting::Preset(SpeedPreset::Normal);
        assert_eq!(SpeedSetting::from_token("NaN"), normal);
        assert_eq!(SpeedSetting::from_token("inf"), normal);
        assert_eq!(SpeedSetting::from_token("-3"), normal);
        assert_eq!(SpeedSetting::from_token("0"), normal);
        assert_eq!(SpeedSetting::from_multiplier(f32::NEG_INFINITY), normal);
        assert_eq!(SpeedSetting::from_multiplier(0.5), SpeedSetting::Custom(0.5));
    }

    #[test]
    fn test_preset_and_custom_are_exclusive() {
        let preset = SpeedSetting::Preset(SpeedPreset::Fast);
        assert_eq!(preset.preset(), Some(SpeedPreset::Fast));
        assert_eq!(preset.custom(), None);

        let custom = SpeedSetting::Custom(1.5);
        assert_eq!(custom.preset(), None);
        assert_eq!(custom.custom(), Some(1.5));
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(
            serde_json::to_string(&SpeedSetting::Preset(SpeedPreset::Slow)).unwrap(),
            "\"slow\""
        );
        assert_eq!(serde_json::to_string(&SpeedSetting::Custom(2.5)).unwrap(), "2.5");
        let parsed: SpeedSetting = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, SpeedSetting::Custom(3.0));
    }
}
