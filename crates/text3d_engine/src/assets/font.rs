//! Typeface font resources
//!
//! Fonts are read from the JSON typeface format produced by facetype-style
//! converters: glyph outlines as command strings plus advance widths, in
//! font units of `resolution` per em.

use super::font_cache::FontLoadError;
use serde::Deserialize;
use std::collections::HashMap;

/// Glyph substituted for characters the font does not cover
pub const FALLBACK_GLYPH: char = '?';

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypefaceFile {
    glyphs: HashMap<String, TypefaceGlyph>,
    family_name: String,
    resolution: f32,
    #[serde(default)]
    ascender: f32,
    #[serde(default)]
    descender: f32,
    #[serde(default)]
    underline_thickness: f32,
    bounding_box: Option<TypefaceBounds>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypefaceBounds {
    y_min: f32,
    y_max: f32,
}

#[derive(Debug, Deserialize)]
struct TypefaceGlyph {
    ha: f32,
    #[serde(default)]
    x_min: f32,
    #[serde(default)]
    x_max: f32,
    #[serde(default)]
    o: Option<String>,
}

/// One glyph in font units
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Horizontal advance
    pub advance: f32,
    /// Leftmost outline coordinate
    pub x_min: f32,
    /// Rightmost outline coordinate
    pub x_max: f32,
    /// Outline path commands (`m`, `l`, `q`, `b`); empty for blanks
    pub outline: String,
}

/// A loaded typeface
#[derive(Debug, Clone, PartialEq)]
pub struct FontResource {
    id: String,
    family_name: String,
    resolution: f32,
    ascender: f32,
    descender: f32,
    line_units: f32,
    glyphs: HashMap<char, Glyph>,
}

impl FontResource {
    /// Parse a typeface JSON document for font `id`
    pub fn from_typeface_json(id: &str, json: &str) -> Result<Self, FontLoadError> {
        let file: TypefaceFile = serde_json::from_str(json).map_err(|e| FontLoadError::Parse {
            font: id.to_string(),
            message: e.to_string(),
        })?;

        if !(file.resolution.is_finite() && file.resolution > 0.0) {
            return Err(FontLoadError::Parse {
                font: id.to_string(),
                message: format!("resolution must be positive, got {}", file.resolution),
            });
        }

        let line_units = match &file.bounding_box {
            Some(bounds) => bounds.y_max - bounds.y_min + file.underline_thickness,
            None => file.ascender - file.descender,
        };

        let glyphs = file
            .glyphs
            .into_iter()
            .filter_map(|(key, glyph)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some((
                        c,
                        Glyph {
                            advance: glyph.ha,
                            x_min: glyph.x_min,
                            x_max: glyph.x_max,
                            outline: glyph.o.unwrap_or_default(),
                        },
                    )),
                    _ => None,
                }
            })
            .collect();

        Ok(Self {
            id: id.to_string(),
            family_name: file.family_name,
            resolution: file.resolution,
            ascender: file.ascender,
            descender: file.descender,
            line_units,
            glyphs,
        })
    }

    /// Font id this resource was loaded under
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Family name declared by the font
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Font units per em
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Ascender in font units
    pub fn ascender(&self) -> f32 {
        self.ascender
    }

    /// Descender in font units (usually negative)
    pub fn descender(&self) -> f32 {
        self.descender
    }

    /// Number of glyphs
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Glyph for `c`, falling back to `?`
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c).or_else(|| self.glyphs.get(&FALLBACK_GLYPH))
    }

    /// Line height at text `size`
    pub fn line_height(&self, size: f32) -> f32 {
        self.line_units * size / self.resolution
    }

    /// Width of the widest line and total height of `text` at `size`
    pub fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let scale = size / self.resolution;
        let mut widest: f32 = 0.0;
        let mut lines = 0usize;

        for line in text.split('\n') {
            let width: f32 = line
                .chars()
                .filter_map(|c| self.glyph(c))
                .map(|glyph| glyph.advance * scale)
                .sum();
            widest = widest.max(width);
            lines += 1;
        }

        (widest, lines as f32 * self.line_height(size))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Small typeface document used across the crate's tests
    pub(crate) const TEST_TYPEFACE: &str = r#"{
        "glyphs": {
            "A": { "ha": 800, "x_min": 0, "x_max": 800, "o": "m 0 0 l 400 1000 l 800 0 z" },
            "B": { "ha": 700, "x_min": 0, "x_max": 700, "o": "m 0 0 l 0 1000 l 700 500 z" },
            "?": { "ha": 500, "x_min": 0, "x_max": 500, "o": "m 0 0 l 500 0 l 250 1000 z" },
            " ": { "ha": 300, "x_min": 0, "x_max": 0 }
        },
        "familyName": "Test Sans",
        "ascender": 900,
        "descender": -100,
        "underlinePosition": -100,
        "underlineThickness": 50,
        "boundingBox": { "yMin": -100, "xMin": 0, "yMax": 950, "xMax": 800 },
        "resolution": 1000,
        "original_font_information": { "format": 0 }
    }"#;

    #[test]
    fn test_parse_typeface() {
        let font = FontResource::from_typeface_json("test", TEST_TYPEFACE).unwrap();
        assert_eq!(font.id(), "test");
        assert_eq!(font.family_name(), "Test Sans");
        assert_eq!(font.glyph_count(), 4);
        assert_eq!(font.glyph('A').unwrap().advance, 800.0);
        assert!(font.glyph(' ').unwrap().outline.is_empty());
    }

    #[test]
    fn test_missing_glyph_uses_fallback() {
        let font = FontResource::from_typeface_json("test", TEST_TYPEFACE).unwrap();
        assert_eq!(font.glyph('Z').unwrap().advance, 500.0);
    }

    #[test]
    fn test_measure() {
        let font = FontResource::from_typeface_json("test", TEST_TYPEFACE).unwrap();

        // (800 + 300 + 700) units at size 0.5 / 1000 units per em
        let (width, height) = font.measure("A B", 0.5);
        assert_relative_eq!(width, 0.9);
        assert_relative_eq!(height, 1.1 * 0.5);

        let (width, height) = font.measure("AB\nA", 1.0);
        assert_relative_eq!(width, 1.5);
        assert_relative_eq!(height, 2.2);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            FontResource::from_typeface_json("bad", "{ not json"),
            Err(FontLoadError::Parse { .. })
        ));
        assert!(matches!(
            FontResource::from_typeface_json("bad", r#"{"glyphs": {}, "familyName": "X", "resolution": 0}"#),
            Err(FontLoadError::Parse { .. })
        ));
    }
}
