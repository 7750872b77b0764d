//! Hex color conversion

use super::request::LooseValue;

/// Largest valid 24-bit color
const MAX_COLOR: u32 = 0xff_ff_ff;

/// Convert `#RRGGBB`, `0xRRGGBB`, bare `RRGGBB` or an integer to 0xRRGGBB
pub fn parse_color(value: &LooseValue) -> Option<u32> {
    match value {
        LooseValue::Number(number) => {
            let valid = number.fract() == 0.0 && *number >= 0.0 && *number <= f64::from(MAX_COLOR);
            valid.then(|| *number as u32)
        }
        LooseValue::Text(text) => {
            let text = text.trim();
            let digits = text
                .strip_prefix('#')
                .or_else(|| text.strip_prefix("0x"))
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(text);
            if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
            u32::from_str_radix(digits, 16).ok()
        }
    }
}

/// Format 0xRRGGBB as `#rrggbb`
pub fn format_hex(color: u32) -> String {
    format!("#{:06x}", color & MAX_COLOR)
}
