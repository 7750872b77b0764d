//! Persistent per-pattern state for the oscillating and breathing patterns

use crate::foundation::math::constants::SIXTH_PI;

/// Largest swing of the oscillating pattern, radians
pub const MAX_OSCILLATION_ANGLE: f32 = SIXTH_PI;

/// Smallest scale reached while breathing
pub const MIN_BREATHING_SCALE: f32 = 0.9;

/// Largest scale reached while breathing
pub const MAX_BREATHING_SCALE: f32 = 1.1;

/// Sign of the current sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Increasing
    #[default]
    Forward,
    /// Decreasing
    Backward,
}

impl Direction {
    /// +1.0 or -1.0
    pub fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Swing state for [`RotationPattern::Oscillating`](super::RotationPattern::Oscillating)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OscillationState {
    direction: Direction,
    angle: f32,
}

impl OscillationState {
    /// Start at zero, swinging forward
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the angle by `step` in the current direction and return it
    ///
    /// Reaching the amplitude pins the angle to it and reverses direction.
    pub fn advance(&mut self, step: f32) -> f32 {
        self.angle += step * self.direction.sign();
        if self.angle.abs() >= MAX_OSCILLATION_ANGLE {
            self.angle = self.angle.clamp(-MAX_OSCILLATION_ANGLE, MAX_OSCILLATION_ANGLE);
            self.direction = self.direction.flipped();
        }
        self.angle
    }

    /// Current angle, radians
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Current sweep direction
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Pulse state shared by the breathing and combined patterns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathingState {
    direction: Direction,
    scale: f32,
}

impl Default for BreathingState {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            scale: 1.0,
        }
    }
}

impl BreathingState {
    /// Start at unit scale, growing
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the scale by `step` in the current direction and return it
    ///
    /// Touching either bound pins the scale to it and reverses direction.
    pub fn advance(&mut self, step: f32) -> f32 {
        self.scale += step * self.direction.sign();
        if self.scale <= MIN_BREATHING_SCALE || self.scale >= MAX_BREATHING_SCALE {
            self.scale = self.scale.clamp(MIN_BREATHING_SCALE, MAX_BREATHING_SCALE);
            self.direction = self.direction.flipped();
        }
        self.scale
    }

    /// Current scale
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Current pulse direction
    pub fn direction(&self) -> Direction {
        self.direction
    }
}
