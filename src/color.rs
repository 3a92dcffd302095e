//! Color value types and the derived [`ColorState`] container.
//!
//! Channel units follow the CSS conventions: RGB channels are 0–255
//! integers, hue is 0–360, HSL/HSV saturation and lightness/value are
//! 0–100, and alpha is a 0.0–1.0 float. Constructors clamp out-of-range
//! input rather than reject it.

use crate::convert;
use crate::parse;

/// RGB color, each channel 0–255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: clamp_alpha(a),
        }
    }
}

/// RGB plus alpha (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: clamp_alpha(a),
        }
    }

    pub fn rgb(self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// HSL color: hue 0–360, saturation and lightness 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    pub fn new(h: u16, s: u8, l: u8) -> Self {
        Self {
            h: h.min(360),
            s: s.min(100),
            l: l.min(100),
        }
    }

    pub fn with_alpha(self, a: f64) -> Hsla {
        Hsla {
            h: self.h,
            s: self.s,
            l: self.l,
            a: clamp_alpha(a),
        }
    }
}

/// HSL plus alpha (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: u16,
    pub s: u8,
    pub l: u8,
    pub a: f64,
}

impl Hsla {
    pub fn new(h: u16, s: u8, l: u8, a: f64) -> Self {
        Hsl::new(h, s, l).with_alpha(a)
    }

    pub fn hsl(self) -> Hsl {
        Hsl {
            h: self.h,
            s: self.s,
            l: self.l,
        }
    }
}

/// HSV color: hue 0–360, saturation and value 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv {
    pub h: u16,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub fn new(h: u16, s: u8, v: u8) -> Self {
        Self {
            h: h.min(360),
            s: s.min(100),
            v: v.min(100),
        }
    }

    pub fn with_alpha(self, a: f64) -> Hsva {
        Hsva {
            h: self.h,
            s: self.s,
            v: self.v,
            a: clamp_alpha(a),
        }
    }
}

/// HSV plus alpha (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsva {
    pub h: u16,
    pub s: u8,
    pub v: u8,
    pub a: f64,
}

impl Hsva {
    pub fn new(h: u16, s: u8, v: u8, a: f64) -> Self {
        Hsv::new(h, s, v).with_alpha(a)
    }

    pub fn hsv(self) -> Hsv {
        Hsv {
            h: self.h,
            s: self.s,
            v: self.v,
        }
    }

    /// Merge a partial change into this value.
    pub fn merged(self, partial: HsvaPartial) -> Hsva {
        Hsva::new(
            partial.h.unwrap_or(self.h),
            partial.s.unwrap_or(self.s),
            partial.v.unwrap_or(self.v),
            partial.a.unwrap_or(self.a),
        )
    }
}

/// A partial HSVA change, as produced by the interactive controls: the
/// saturation plane sets `s`/`v`, the hue strip sets `h`, the alpha strip
/// sets `a`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HsvaPartial {
    pub h: Option<u16>,
    pub s: Option<u8>,
    pub v: Option<u8>,
    pub a: Option<f64>,
}

impl HsvaPartial {
    pub fn hue(h: u16) -> Self {
        Self {
            h: Some(h),
            ..Self::default()
        }
    }

    pub fn sat_val(s: u8, v: u8) -> Self {
        Self {
            s: Some(s),
            v: Some(v),
            ..Self::default()
        }
    }

    pub fn alpha(a: f64) -> Self {
        Self {
            a: Some(a),
            ..Self::default()
        }
    }
}

/// A color in any supported input representation.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInput {
    /// Hex string, `#` optional: `#rgb`, `#rrggbb`, or `#rrggbbaa`.
    /// Unparseable strings resolve to the fallback color (see
    /// [`parse_color_string`](crate::parse::parse_color_string)).
    Hex(String),
    Rgb(Rgb),
    Rgba(Rgba),
    Hsl(Hsl),
    Hsla(Hsla),
    Hsv(Hsv),
    Hsva(Hsva),
}

/// Output formats for [`ColorState::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Hex,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Hsv,
    Hsva,
}

/// All representations of one color, derived eagerly from a single input.
///
/// The fields are mutually consistent within ±1 unit per channel as of the
/// last update. A `ColorState` is never mutated in place; updates return a
/// freshly derived value.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorState {
    pub hex: String,
    pub rgb: Rgb,
    pub rgba: Rgba,
    pub hsl: Hsl,
    pub hsla: Hsla,
    pub hsv: Hsv,
    pub hsva: Hsva,
    pub alpha: f64,
}

impl Default for ColorState {
    fn default() -> Self {
        // Mid gray, fully opaque.
        Self::new(ColorInput::Rgb(Rgb::new(128, 128, 128)))
    }
}

impl ColorState {
    /// Derive every representation from one input.
    ///
    /// The representation given is preserved exactly; the others are
    /// computed from it.
    pub fn new(input: ColorInput) -> Self {
        match input {
            ColorInput::Hex(s) => {
                let rgba = parse::parse_color(&s).unwrap_or(Rgba::new(255, 0, 0, 1.0));
                Self::from_rgb(rgba.rgb(), rgba.a)
            }
            ColorInput::Rgb(rgb) => Self::from_rgb(rgb, 1.0),
            ColorInput::Rgba(rgba) => Self::from_rgb(rgba.rgb(), rgba.a),
            ColorInput::Hsl(hsl) => Self::from_hsl(hsl, 1.0),
            ColorInput::Hsla(hsla) => Self::from_hsl(hsla.hsl(), hsla.a),
            ColorInput::Hsv(hsv) => Self::from_hsv(hsv, 1.0),
            ColorInput::Hsva(hsva) => Self::from_hsv(hsva.hsv(), hsva.a),
        }
    }

    fn from_rgb(rgb: Rgb, alpha: f64) -> Self {
        let hsv = convert::rgb_to_hsv(rgb);
        let hsl = convert::rgb_to_hsl(rgb);
        Self::assemble(rgb, hsl, hsv, alpha)
    }

    fn from_hsv(hsv: Hsv, alpha: f64) -> Self {
        let rgb = convert::hsv_to_rgb(hsv);
        let hsl = convert::hsv_to_hsl(hsv);
        Self::assemble(rgb, hsl, hsv, alpha)
    }

    fn from_hsl(hsl: Hsl, alpha: f64) -> Self {
        let rgb = convert::hsl_to_rgb(hsl);
        let hsv = convert::hsl_to_hsv(hsl);
        Self::assemble(rgb, hsl, hsv, alpha)
    }

    fn assemble(rgb: Rgb, hsl: Hsl, hsv: Hsv, alpha: f64) -> Self {
        let alpha = clamp_alpha(alpha);
        Self {
            hex: parse::rgb_to_hex(rgb),
            rgb,
            rgba: rgb.with_alpha(alpha),
            hsl,
            hsla: hsl.with_alpha(alpha),
            hsv,
            hsva: hsv.with_alpha(alpha),
            alpha,
        }
    }

    /// Merge a partial HSVA change with the current HSVA and re-derive.
    ///
    /// HSVA is the canonical interaction representation: every slider edit
    /// goes through here, so hue is retained while saturation or value sit
    /// at zero.
    pub fn update_hsva(&self, partial: HsvaPartial) -> Self {
        let merged = self.hsva.merged(partial);
        Self::from_hsv(merged.hsv(), merged.a)
    }

    /// Replace the alpha channel, clamped to 0.0–1.0.
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self::from_hsv(self.hsv, alpha)
    }

    /// Serialize to a CSS-style color string.
    pub fn format(&self, format: ColorFormat) -> String {
        match format {
            ColorFormat::Hex => self.hex.clone(),
            ColorFormat::Rgb => {
                format!("rgb({}, {}, {})", self.rgb.r, self.rgb.g, self.rgb.b)
            }
            ColorFormat::Rgba => format!(
                "rgba({}, {}, {}, {})",
                self.rgba.r, self.rgba.g, self.rgba.b, self.rgba.a
            ),
            ColorFormat::Hsl => {
                format!("hsl({}, {}%, {}%)", self.hsl.h, self.hsl.s, self.hsl.l)
            }
            ColorFormat::Hsla => format!(
                "hsla({}, {}%, {}%, {})",
                self.hsla.h, self.hsla.s, self.hsla.l, self.hsla.a
            ),
            ColorFormat::Hsv => {
                format!("hsv({}, {}%, {}%)", self.hsv.h, self.hsv.s, self.hsv.v)
            }
            ColorFormat::Hsva => format!(
                "hsva({}, {}%, {}%, {})",
                self.hsva.h, self.hsva.s, self.hsva.v, self.hsva.a
            ),
        }
    }

    /// The input representation for a given format tag, for callers that
    /// round-trip state through [`ColorInput`].
    pub fn to_input(&self, format: ColorFormat) -> ColorInput {
        match format {
            ColorFormat::Hex => ColorInput::Hex(self.hex.clone()),
            ColorFormat::Rgb => ColorInput::Rgb(self.rgb),
            ColorFormat::Rgba => ColorInput::Rgba(self.rgba),
            ColorFormat::Hsl => ColorInput::Hsl(self.hsl),
            ColorFormat::Hsla => ColorInput::Hsla(self.hsla),
            ColorFormat::Hsv => ColorInput::Hsv(self.hsv),
            ColorFormat::Hsva => ColorInput::Hsva(self.hsva),
        }
    }
}

pub(crate) fn clamp_alpha(a: f64) -> f64 {
    a.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_from_rgb_preserves_channels() {
        let state = ColorState::new(ColorInput::Rgb(Rgb::new(59, 130, 246)));
        assert_eq!(state.rgb, Rgb::new(59, 130, 246));
        assert_eq!(state.hex, "#3b82f6");
        assert_eq!(state.alpha, 1.0);
        assert_eq!(state.rgba.a, 1.0);
    }

    #[test]
    fn state_from_hsv_preserves_hsv() {
        let state = ColorState::new(ColorInput::Hsv(Hsv::new(340, 58, 100)));
        assert_eq!(state.hsv, Hsv::new(340, 58, 100));
        assert!((state.hsl.h as i32 - 340).abs() <= 1);
    }

    #[test]
    fn state_from_invalid_hex_falls_back_to_red() {
        let state = ColorState::new(ColorInput::Hex("#zzz".into()));
        assert_eq!(state.hex, "#ff0000");
    }

    #[test]
    fn state_from_eight_digit_hex_carries_alpha() {
        let state = ColorState::new(ColorInput::Hex("#3b82f680".into()));
        assert_eq!(state.rgb, Rgb::new(59, 130, 246));
        assert!((state.alpha - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(state.hex, "#3b82f6");
    }

    #[test]
    fn update_hsva_merges_partial_change() {
        let state = ColorState::new(ColorInput::Hsva(Hsva::new(200, 50, 80, 0.5)));
        let updated = state.update_hsva(HsvaPartial::sat_val(10, 90));
        assert_eq!(updated.hsva.h, 200);
        assert_eq!(updated.hsva.s, 10);
        assert_eq!(updated.hsva.v, 90);
        assert_eq!(updated.hsva.a, 0.5);
    }

    #[test]
    fn update_hsva_keeps_hue_at_zero_saturation() {
        let state = ColorState::new(ColorInput::Hsv(Hsv::new(123, 80, 80)));
        let gray = state.update_hsva(HsvaPartial::sat_val(0, 50));
        assert_eq!(gray.hsva.h, 123);
        let back = gray.update_hsva(HsvaPartial::sat_val(80, 80));
        assert_eq!(back.hsva.h, 123);
    }

    #[test]
    fn with_alpha_clamps() {
        let state = ColorState::default();
        assert_eq!(state.with_alpha(1.5).alpha, 1.0);
        assert_eq!(state.with_alpha(-0.25).alpha, 0.0);
    }

    #[test]
    fn format_produces_css_strings() {
        let state = ColorState::new(ColorInput::Rgba(Rgba::new(255, 0, 0, 0.5)));
        assert_eq!(state.format(ColorFormat::Hex), "#ff0000");
        assert_eq!(state.format(ColorFormat::Rgb), "rgb(255, 0, 0)");
        assert_eq!(state.format(ColorFormat::Rgba), "rgba(255, 0, 0, 0.5)");
        assert_eq!(state.format(ColorFormat::Hsl), "hsl(0, 100%, 50%)");
    }

    #[test]
    fn constructors_clamp_out_of_range() {
        let hsv = Hsv::new(400, 150, 200);
        assert_eq!(
            hsv,
            Hsv {
                h: 360,
                s: 100,
                v: 100
            }
        );
        let rgba = Rgba::new(0, 0, 0, 2.0);
        assert_eq!(rgba.a, 1.0);
    }

    #[test]
    fn rederiving_from_own_hsva_keeps_hsva() {
        // A sync keyed on the HSVA projection can skip the write when the
        // projections match: re-deriving never moves the projection, even
        // though the re-derived RGB may sit a unit off the source channels.
        for &rgb in &[
            Rgb::new(59, 130, 246),
            Rgb::new(3, 251, 17),
            Rgb::new(200, 10, 10),
        ] {
            let host = ColorState::new(ColorInput::Rgb(rgb));
            let rederived = ColorState::new(ColorInput::Hsva(host.hsva));
            assert_eq!(rederived.hsva, host.hsva);
        }
    }

    #[test]
    fn derived_fields_agree_within_one_unit() {
        for &rgb in &[
            Rgb::new(12, 200, 77),
            Rgb::new(255, 254, 1),
            Rgb::new(128, 128, 128),
        ] {
            let state = ColorState::new(ColorInput::Rgb(rgb));
            let via_hsl = convert::hsl_to_rgb(state.hsl);
            assert!((via_hsl.r as i32 - rgb.r as i32).abs() <= 2);
            let via_hsv = convert::hsv_to_rgb(state.hsv);
            assert!((via_hsv.r as i32 - rgb.r as i32).abs() <= 2);
        }
    }
}
