//! Pattern dispatch: one transform update per tick

use super::pattern::RotationPattern;
use super::speed::{SpeedPreset, SpeedSetting};
use super::state::{BreathingState, OscillationState};
use crate::foundation::math::MeshTransform;
use serde::{Deserialize, Serialize};

/// What to animate and how fast
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationParameters {
    /// Selected pattern
    pub pattern: RotationPattern,

    /// Selected speed
    pub speed: SpeedSetting,
}

impl AnimationParameters {
    /// Create parameters from a pattern and speed
    pub fn new(pattern: RotationPattern, speed: SpeedSetting) -> Self {
        Self { pattern, speed }
    }

    /// Select a preset, clearing any custom multiplier
    pub fn set_preset(&mut self, preset: SpeedPreset) {
        self.speed = SpeedSetting::Preset(preset);
    }

    /// Select a custom multiplier, clearing any preset
    ///
    /// Multipliers that are not positive and finite select the normal preset.
    pub fn set_custom_speed(&mut self, multiplier: f32) {
        self.speed = SpeedSetting::from_multiplier(multiplier);
    }
}

/// Computes the per-tick transform for one running animation
///
/// Created fresh for every generation, so the oscillation and breathing
/// states always start from rest.
#[derive(Debug, Clone)]
pub struct AnimationDispatcher {
    parameters: AnimationParameters,
    speed: f32,
    oscillation: OscillationState,
    breathing: BreathingState,
    ticks: u64,
}

impl AnimationDispatcher {
    /// Create a dispatcher, resolving the speed once up front
    pub fn new(parameters: AnimationParameters) -> Self {
        let speed = parameters.speed.rate();
        log::debug!(
            "Animation dispatcher: pattern={} speed={:.4}",
            parameters.pattern,
            speed
        );
        Self {
            parameters,
            speed,
            oscillation: OscillationState::new(),
            breathing: BreathingState::new(),
            ticks: 0,
        }
    }

    /// Apply one tick of the selected pattern to `transform`
    pub fn tick(&mut self, transform: &mut MeshTransform) {
        let speed = self.speed;
        match self.parameters.pattern {
            RotationPattern::Horizontal => {
                transform.rotation.y += speed;
            }
            RotationPattern::Vertical => {
                transform.rotation.x += speed;
            }
            RotationPattern::Diagonal => {
                transform.rotation.x += speed * 0.7;
                transform.rotation.y += speed;
            }
            RotationPattern::Oscillating => {
                transform.rotation.y = self.oscillation.advance(speed * 2.0);
            }
            RotationPattern::Breathing => {
                transform.scale = self.breathing.advance(speed * 0.5);
                transform.rotation.y += speed * 0.2;
            }
            RotationPattern::Combined => {
                transform.rotation.x += speed * 0.3;
                transform.rotation.y += speed * 0.5;
                transform.rotation.z += speed * 0.1;
                let scale = self.breathing.advance(speed * 0.2);
                transform.scale = 1.0 + (scale - 1.0) * 0.5;
            }
        }
        self.ticks += 1;
    }

    /// Parameters this dispatcher was built from
    pub fn parameters(&self) -> &AnimationParameters {
        &self.parameters
    }

    /// Resolved rate in radians per tick
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Oscillation state (meaningful for the oscillating pattern)
    pub fn oscillation(&self) -> &OscillationState {
        &self.oscillation
    }

    /// Breathing state (meaningful for the breathing and combined patterns)
    pub fn breathing(&self) -> &BreathingState {
        &self.breathing
    }

    /// Ticks applied so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
