//! Color-string parsing, validation, and hex formatting.
//!
//! [`parse_color`] is the strict entry point: it tries hex, then
//! `rgb()`/`rgba()`, then `hsl()`/`hsla()`, then named colors, and reports
//! the first structural problem as a [`ColorParseError`]. A pattern whose
//! numeric components are out of range rejects the match and falls through
//! to the next pattern. [`parse_color_string`] is the lossy wrapper that
//! substitutes the fallback color instead of failing.

use crate::color::{clamp_alpha, Rgb, Rgba};
use crate::convert;

/// Fallback emitted by [`parse_color_string`] for unparseable input.
pub const FALLBACK_HEX: &str = "#ff0000";

/// First structural problem found in a color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("hex color must have 3, 6, or 8 digits")]
    InvalidHexLength,
    #[error("invalid hex digit")]
    InvalidHexDigit,
    #[error("color channel out of range")]
    ChannelOutOfRange,
    #[error("alpha must be between 0 and 1")]
    AlphaOutOfRange,
    #[error("unrecognized color format")]
    Unrecognized,
}

/// Fixed table of recognized color names, lowercase.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("red", Rgb { r: 255, g: 0, b: 0 }),
    ("green", Rgb { r: 0, g: 128, b: 0 }),
    ("blue", Rgb { r: 0, g: 0, b: 255 }),
    ("white", Rgb { r: 255, g: 255, b: 255 }),
    ("black", Rgb { r: 0, g: 0, b: 0 }),
    ("yellow", Rgb { r: 255, g: 255, b: 0 }),
    ("cyan", Rgb { r: 0, g: 255, b: 255 }),
    ("magenta", Rgb { r: 255, g: 0, b: 255 }),
    ("gray", Rgb { r: 128, g: 128, b: 128 }),
    ("orange", Rgb { r: 255, g: 165, b: 0 }),
    ("purple", Rgb { r: 128, g: 0, b: 128 }),
    ("pink", Rgb { r: 255, g: 192, b: 203 }),
];

/// Parse a hex color: `#rgb`, `#rrggbb`, or `#rrggbbaa`, `#` optional.
///
/// 3- and 6-digit forms are fully opaque; the 8-digit form carries alpha in
/// the trailing byte.
pub fn parse_hex(hex: &str) -> Result<Rgba, ColorParseError> {
    let stripped = hex.trim().trim_start_matches('#');
    if stripped.is_empty() {
        return Err(ColorParseError::Empty);
    }

    let bytes = stripped.as_bytes();
    match bytes.len() {
        3 => {
            let r = nibble(bytes[0])?;
            let g = nibble(bytes[1])?;
            let b = nibble(bytes[2])?;
            Ok(Rgba::new(r * 17, g * 17, b * 17, 1.0))
        }
        6 => Ok(Rgba::new(
            byte(bytes[0], bytes[1])?,
            byte(bytes[2], bytes[3])?,
            byte(bytes[4], bytes[5])?,
            1.0,
        )),
        8 => Ok(Rgba::new(
            byte(bytes[0], bytes[1])?,
            byte(bytes[2], bytes[3])?,
            byte(bytes[4], bytes[5])?,
            byte(bytes[6], bytes[7])? as f64 / 255.0,
        )),
        _ => Err(ColorParseError::InvalidHexLength),
    }
}

/// Parse a hex color, discarding any alpha digits.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorParseError> {
    parse_hex(hex).map(Rgba::rgb)
}

/// Format as lowercase `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Format as lowercase `#rrggbbaa`.
pub fn rgba_to_hex(rgba: Rgba) -> String {
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        rgba.r,
        rgba.g,
        rgba.b,
        (rgba.a * 255.0).round() as u8
    )
}

/// Normalize a hex string to lowercase `#rrggbb`: expands 3-digit
/// shorthand and strips trailing alpha digits.
pub fn normalize_hex(hex: &str) -> Result<String, ColorParseError> {
    hex_to_rgb(hex).map(rgb_to_hex)
}

/// Parse any supported color string to RGB plus alpha.
///
/// Tries, in order: hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`, named colors.
/// A `#`-prefixed string that is not valid hex fails immediately; for the
/// function syntaxes, out-of-range components reject the match and fall
/// through to the next pattern.
pub fn parse_color(input: &str) -> Result<Rgba, ColorParseError> {
    let clean = input.trim();
    if clean.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if clean.starts_with('#') {
        return parse_hex(clean);
    }
    if let Ok(rgba) = parse_hex(clean) {
        return Ok(rgba);
    }

    let lower = clean.to_ascii_lowercase();
    if let Some(rgba) = parse_rgb_func(&lower)? {
        return Ok(rgba);
    }
    if let Some(rgba) = parse_hsl_func(&lower)? {
        return Ok(rgba);
    }

    for (name, rgb) in NAMED_COLORS {
        if lower == *name {
            return Ok(rgb.with_alpha(1.0));
        }
    }

    Err(ColorParseError::Unrecognized)
}

/// Lossy parse to a normalized 6-digit hex string.
///
/// Unparseable input yields [`FALLBACK_HEX`] (`#ff0000`). Callers that need
/// to distinguish failure use [`parse_color`] or [`validate_color`].
pub fn parse_color_string(input: &str) -> String {
    match parse_color(input) {
        Ok(rgba) => rgb_to_hex(rgba.rgb()),
        Err(_) => FALLBACK_HEX.to_string(),
    }
}

/// Result of [`validate_color`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    /// Normalized `#rrggbb` replacement for the input, when valid.
    pub corrected: Option<String>,
    /// Message describing the first structural problem, when invalid.
    pub error: Option<String>,
}

/// Check a color string and report validity, a normalized value, and a
/// human-readable message for the first problem found.
pub fn validate_color(input: &str) -> Validation {
    match parse_color(input) {
        Ok(rgba) => Validation {
            is_valid: true,
            corrected: Some(rgb_to_hex(rgba.rgb())),
            error: None,
        },
        Err(err) => Validation {
            is_valid: false,
            corrected: None,
            error: Some(err.to_string()),
        },
    }
}

/// `rgb(r, g, b)` / `rgba(r, g, b, a)`. Returns `Ok(None)` when the string
/// is not an rgb function at all, or when a channel is out of range (the
/// caller falls through to the next pattern); malformed alpha is an error.
fn parse_rgb_func(lower: &str) -> Result<Option<Rgba>, ColorParseError> {
    let Some(args) = func_args(lower, "rgb") else {
        return Ok(None);
    };
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Ok(None);
    }

    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        match part.parse::<u32>() {
            Ok(n) if n <= 255 => *slot = n as u8,
            Ok(_) => return Ok(None), // out of range: reject the match
            Err(_) => return Ok(None),
        }
    }

    let a = match parts.get(3) {
        Some(raw) => parse_alpha(raw)?,
        None => 1.0,
    };
    Ok(Some(Rgba::new(channels[0], channels[1], channels[2], a)))
}

/// `hsl(h, s%, l%)` / `hsla(h, s%, l%, a)`. Same fall-through contract as
/// [`parse_rgb_func`].
fn parse_hsl_func(lower: &str) -> Result<Option<Rgba>, ColorParseError> {
    let Some(args) = func_args(lower, "hsl") else {
        return Ok(None);
    };
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Ok(None);
    }

    let h = match parts[0].parse::<u32>() {
        Ok(n) if n <= 360 => n as u16,
        _ => return Ok(None),
    };
    let mut percents = [0u8; 2];
    for (slot, part) in percents.iter_mut().zip(&parts[1..3]) {
        let Some(num) = part.strip_suffix('%') else {
            return Ok(None);
        };
        match num.trim().parse::<u32>() {
            Ok(n) if n <= 100 => *slot = n as u8,
            _ => return Ok(None),
        }
    }

    let a = match parts.get(3) {
        Some(raw) => parse_alpha(raw)?,
        None => 1.0,
    };
    let rgb = convert::hsl_to_rgb(crate::color::Hsl::new(h, percents[0], percents[1]));
    Ok(Some(rgb.with_alpha(a)))
}

/// Strip `name(` and the closing `)`, accepting an optional trailing `a`
/// in the function name (`rgb`/`rgba`, `hsl`/`hsla`).
fn func_args<'a>(lower: &'a str, name: &str) -> Option<&'a str> {
    let rest = lower.strip_prefix(name)?;
    let rest = rest.strip_prefix('a').unwrap_or(rest);
    rest.strip_prefix('(')?.strip_suffix(')')
}

fn parse_alpha(raw: &str) -> Result<f64, ColorParseError> {
    let a: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ColorParseError::AlphaOutOfRange)?;
    if !(0.0..=1.0).contains(&a) {
        return Err(ColorParseError::AlphaOutOfRange);
    }
    Ok(clamp_alpha(a))
}

fn nibble(c: u8) -> Result<u8, ColorParseError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(ColorParseError::InvalidHexDigit),
    }
}

fn byte(hi: u8, lo: u8) -> Result<u8, ColorParseError> {
    Ok((nibble(hi)? << 4) | nibble(lo)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_rgb_round_trip_is_exact() {
        for &rgb in &[
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(59, 130, 246),
            Rgb::new(1, 2, 3),
        ] {
            assert_eq!(hex_to_rgb(&rgb_to_hex(rgb)), Ok(rgb));
        }
    }

    #[test]
    fn shorthand_hex_normalizes() {
        assert_eq!(normalize_hex("#fff").as_deref(), Ok("#ffffff"));
        assert_eq!(normalize_hex("abc").as_deref(), Ok("#aabbcc"));
        assert_eq!(normalize_hex("#FF6B9D").as_deref(), Ok("#ff6b9d"));
    }

    #[test]
    fn eight_digit_hex_extracts_alpha() {
        let rgba = parse_hex("#336699cc").unwrap();
        assert_eq!(rgba.rgb(), Rgb::new(0x33, 0x66, 0x99));
        assert!((rgba.a - 0.8).abs() < 0.002);
        assert_eq!(rgba_to_hex(rgba), "#336699cc");
    }

    #[test]
    fn bad_hex_is_rejected_with_reason() {
        assert_eq!(parse_hex(""), Err(ColorParseError::Empty));
        assert_eq!(parse_hex("#ffff"), Err(ColorParseError::InvalidHexLength));
        assert_eq!(parse_hex("#gggggg"), Err(ColorParseError::InvalidHexDigit));
    }

    #[test]
    fn rgb_function_parses_and_range_checks() {
        assert_eq!(
            parse_color("rgb(255, 0, 0)"),
            Ok(Rgba::new(255, 0, 0, 1.0))
        );
        assert_eq!(
            parse_color("rgba(0, 128, 255, 0.5)"),
            Ok(Rgba::new(0, 128, 255, 0.5))
        );
        // Out-of-range channel rejects the match and nothing else applies.
        assert_eq!(
            parse_color("rgb(300, 0, 0)"),
            Err(ColorParseError::Unrecognized)
        );
    }

    #[test]
    fn hsl_function_parses() {
        assert_eq!(
            parse_color("hsl(0, 100%, 50%)"),
            Ok(Rgba::new(255, 0, 0, 1.0))
        );
        let rgba = parse_color("hsla(120, 100%, 25%, 0.25)").unwrap();
        assert_eq!(rgba.rgb(), Rgb::new(0, 128, 0));
        assert_eq!(rgba.a, 0.25);
        assert_eq!(
            parse_color("hsl(400, 100%, 50%)"),
            Err(ColorParseError::Unrecognized)
        );
    }

    #[test]
    fn alpha_out_of_range_is_reported() {
        assert_eq!(
            parse_color("rgba(0, 0, 0, 1.5)"),
            Err(ColorParseError::AlphaOutOfRange)
        );
    }

    #[test]
    fn named_colors_resolve() {
        assert_eq!(parse_color_string("red"), "#ff0000");
        assert_eq!(parse_color_string("Green"), "#008000");
        assert_eq!(parse_color_string("PINK"), "#ffc0cb");
    }

    #[test]
    fn unparseable_input_falls_back_to_red() {
        assert_eq!(parse_color_string("not-a-color"), FALLBACK_HEX);
        assert_eq!(parse_color_string("#12345"), FALLBACK_HEX);
    }

    #[test]
    fn validation_reports_first_problem() {
        let ok = validate_color("#fff");
        assert!(ok.is_valid);
        assert_eq!(ok.corrected.as_deref(), Some("#ffffff"));
        assert_eq!(ok.error, None);

        let empty = validate_color("   ");
        assert!(!empty.is_valid);
        assert_eq!(empty.error.as_deref(), Some("empty color string"));

        let bad_len = validate_color("#ab");
        assert_eq!(
            bad_len.error.as_deref(),
            Some("hex color must have 3, 6, or 8 digits")
        );

        let bad_alpha = validate_color("rgba(1, 2, 3, 7)");
        assert_eq!(
            bad_alpha.error.as_deref(),
            Some("alpha must be between 0 and 1")
        );
    }

    #[test]
    fn bare_hex_without_hash_parses() {
        assert_eq!(parse_color_string("3b82f6"), "#3b82f6");
    }
}
