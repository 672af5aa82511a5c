//! Hex color parsing and relative-luminance contrast.
//!
//! Used by the preview renderer to derive a readable text color when the
//! appearance settings leave one unset.

/// Text color used over light backgrounds.
pub const DARK_TEXT: &str = "#1F2937";

/// Text color used over dark backgrounds.
pub const LIGHT_TEXT: &str = "#FFFFFF";

/// Luminance threshold separating "light" from "dark" backgrounds.
const LUMINANCE_THRESHOLD: f64 = 0.5;

/// Parse a `#RRGGBB` hex color (leading `#` optional, case-insensitive).
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Relative luminance of an sRGB color, per the standard perceptual formula
/// (channel linearization, then the 0.2126 / 0.7152 / 0.0722 weights).
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let v = channel as f64 / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Pick a readable text color for the given background.
///
/// Backgrounds with luminance above 0.5 get dark text, below get light text.
/// An absent or unparsable background counts as light.
pub fn contrasting_text_color(background: Option<&str>) -> &'static str {
    let Some((r, g, b)) = background.and_then(parse_hex) else {
        return DARK_TEXT;
    };
    if relative_luminance(r, g, b) > LUMINANCE_THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}
