//! Rotation pattern selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six ways the text mesh can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPattern {
    /// Spin about the vertical axis
    #[default]
    Horizontal,
    /// Tumble about the horizontal axis
    Vertical,
    /// Spin about both X and Y
    Diagonal,
    /// Swing back and forth about Y
    Oscillating,
    /// Pulse in scale with a slow spin
    Breathing,
    /// All three axes plus a damped pulse
    Combined,
}

impl RotationPattern {
    /// Every pattern, in menu order
    pub const ALL: [Self; 6] = [
        Self::Horizontal,
        Self::Vertical,
        Self::Diagonal,
        Self::Oscillating,
        Self::Breathing,
        Self::Combined,
    ];

    /// Look up a pattern by name (case-insensitive)
    ///
    /// Unknown names fall back to [`RotationPattern::Horizontal`].
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.name().eq_ignore_ascii_case(wanted))
            .unwrap_or_else(|| {
                log::debug!("Unknown rotation pattern '{}', using horizontal", wanted);
                Self::Horizontal
            })
    }

    /// Lowercase name as used on the wire
    pub fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Diagonal => "diagonal",
            Self::Oscillating => "oscillating",
            Self::Breathing => "breathing",
            Self::Combined => "combined",
        }
    }
}

impl fmt::Display for RotationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_resolve_back() {
        for pattern in RotationPattern::ALL {
            assert_eq!(RotationPattern::from_name(pattern.name()), pattern);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(RotationPattern::from_name(" Oscillating "), RotationPattern::Oscillating);
        assert_eq!(RotationPattern::from_name("COMBINED"), RotationPattern::Combined);
    }

    #[test]
    fn test_unknown_falls_back_to_horizontal() {
        assert_eq!(RotationPattern::from_name("spiral"), RotationPattern::Horizontal);
        assert_eq!(RotationPattern::from_name(""), RotationPattern::Horizontal);
    }
}
