//! Pure colorimetric conversions.
//!
//! All functions are closed-form, side-effect free, and total for in-range
//! input. Channels are rounded to the nearest integer unit on output.

use rand::Rng;

use crate::color::{Hsl, Hsv, Rgb};

/// HSV → RGB via the six-sector formula.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = hsv.h as f64 / 360.0;
    let s = hsv.s as f64 / 100.0;
    let v = hsv.v as f64 / 100.0;

    let h6 = h * 6.0;
    let i = h6.floor();
    let f = h6 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (i as u32) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}

/// RGB → HSV via the max-channel branch.
///
/// Hue is 0 for achromatic input.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;

    let s = if max == 0.0 { 0.0 } else { diff / max };
    let v = max;
    let h = hue_sector(r, g, b, max, diff);

    Hsv {
        h: (h * 360.0).round() as u16,
        s: (s * 100.0).round() as u8,
        v: (v * 100.0).round() as u8,
    }
}

/// RGB → HSL.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;

    let l = (max + min) / 2.0;
    let s = if diff == 0.0 {
        0.0
    } else if l > 0.5 {
        diff / (2.0 - max - min)
    } else {
        diff / (max + min)
    };
    let h = hue_sector(r, g, b, max, diff);

    Hsl {
        h: (h * 360.0).round() as u16,
        s: (s * 100.0).round() as u8,
        l: (l * 100.0).round() as u8,
    }
}

/// HSL → RGB.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h as f64 / 360.0;
    let s = hsl.s as f64 / 100.0;
    let l = hsl.l as f64 / 100.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    Rgb {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}

/// HSV → HSL, directly, without an RGB round trip.
///
/// Saturation is defined as 0 when lightness is 0 or 100 to avoid the
/// division by zero in the degenerate cases.
pub fn hsv_to_hsl(hsv: Hsv) -> Hsl {
    let s = hsv.s as f64;
    let v = hsv.v as f64;

    let l = v * (2.0 - s / 100.0) / 2.0;
    let s_l = if l != 0.0 && l != 100.0 {
        (v - l) / l.min(100.0 - l) * 100.0
    } else {
        0.0
    };

    Hsl {
        h: hsv.h,
        s: s_l.round() as u8,
        l: l.round() as u8,
    }
}

/// HSL → HSV, directly.
pub fn hsl_to_hsv(hsl: Hsl) -> Hsv {
    let s = hsl.s as f64;
    let l = hsl.l as f64;

    let v = l + s * l.min(100.0 - l) / 100.0;
    let s_v = if v == 0.0 { 0.0 } else { 2.0 * (1.0 - l / v) * 100.0 };

    Hsv {
        h: hsl.h,
        s: s_v.round() as u8,
        v: v.round() as u8,
    }
}

/// The readable foreground color for a background: black on light colors,
/// white on dark ones, by luminance-weighted channel sum.
pub fn contrast_color(rgb: Rgb) -> Rgb {
    let luminance =
        (0.299 * rgb.r as f64 + 0.587 * rgb.g as f64 + 0.114 * rgb.b as f64) / 255.0;
    if luminance > 0.5 {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

/// A uniformly random opaque color.
pub fn random_rgb() -> Rgb {
    let mut rng = rand::rng();
    Rgb {
        r: rng.random(),
        g: rng.random(),
        b: rng.random(),
    }
}

/// HSV → RGB on normalized 0.0–1.0 floats, for gradient rasterization.
/// The public integer API rounds through [`hsv_to_rgb`] instead.
pub(crate) fn hsv_norm_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h6 = (h * 6.0) % 6.0;
    let i = h6.floor() as u32;
    let f = h6 - h6.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Shared hue computation for the HSV/HSL branches, normalized to 0.0–1.0.
fn hue_sector(r: f64, g: f64, b: f64, max: f64, diff: f64) -> f64 {
    if diff == 0.0 {
        0.0
    } else if max == r {
        let shift = if g < b { 6.0 } else { 0.0 };
        ((g - b) / diff + shift) / 6.0
    } else if max == g {
        ((b - r) / diff + 2.0) / 6.0
    } else {
        ((r - g) / diff + 4.0) / 6.0
    }
}

/// HSL helper: one channel from the (p, q) intermediates.
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn channel(normalized: f64) -> u8 {
    (normalized.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_colors_convert_exactly() {
        assert_eq!(hsv_to_rgb(Hsv::new(0, 100, 100)), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(120, 100, 100)), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(240, 100, 100)), Rgb::new(0, 0, 255));
        assert_eq!(hsv_to_rgb(Hsv::new(360, 100, 100)), Rgb::new(255, 0, 0));
    }

    #[test]
    fn achromatic_has_zero_hue_and_saturation() {
        assert_eq!(rgb_to_hsv(Rgb::new(128, 128, 128)), Hsv::new(0, 0, 50));
        assert_eq!(rgb_to_hsl(Rgb::new(255, 255, 255)), Hsl::new(0, 0, 100));
        assert_eq!(rgb_to_hsl(Rgb::BLACK), Hsl::new(0, 0, 0));
    }

    #[test]
    fn hsv_round_trip_within_one_unit() {
        // Low saturation-times-value leaves too few RGB steps per hue
        // degree for the ±1 bound to hold; the grid stays clear of that.
        for h in (0..360).step_by(30) {
            for s in [60, 80, 100] {
                for v in [60, 80, 100] {
                    let hsv = Hsv::new(h, s, v);
                    let back = rgb_to_hsv(hsv_to_rgb(hsv));
                    assert!(
                        (back.h as i32 - hsv.h as i32).abs() <= 1,
                        "hue {hsv:?} -> {back:?}"
                    );
                    assert!((back.s as i32 - hsv.s as i32).abs() <= 1, "{hsv:?}");
                    assert!((back.v as i32 - hsv.v as i32).abs() <= 1, "{hsv:?}");
                }
            }
        }
    }

    #[test]
    fn hsl_round_trip_within_one_unit() {
        for h in (0..360).step_by(45) {
            for s in [40, 70, 100] {
                // Extreme lightness collapses saturation; test the middle.
                for l in [30, 50, 70] {
                    let hsl = Hsl::new(h, s, l);
                    let back = rgb_to_hsl(hsl_to_rgb(hsl));
                    assert!((back.h as i32 - hsl.h as i32).abs() <= 1, "{hsl:?}");
                    assert!((back.s as i32 - hsl.s as i32).abs() <= 1, "{hsl:?}");
                    assert!((back.l as i32 - hsl.l as i32).abs() <= 1, "{hsl:?}");
                }
            }
        }
    }

    #[test]
    fn hsv_hsl_direct_matches_rgb_route() {
        for h in (0..360).step_by(60) {
            for s in (0..=100).step_by(25) {
                for v in (0..=100).step_by(25) {
                    let hsv = Hsv::new(h, s, v);
                    let direct = hsv_to_hsl(hsv);
                    let via_rgb = rgb_to_hsl(hsv_to_rgb(hsv));
                    assert!((direct.s as i32 - via_rgb.s as i32).abs() <= 1, "{hsv:?}");
                    assert!((direct.l as i32 - via_rgb.l as i32).abs() <= 1, "{hsv:?}");
                }
            }
        }
    }

    #[test]
    fn hsv_hsl_degenerate_lightness_has_zero_saturation() {
        assert_eq!(hsv_to_hsl(Hsv::new(200, 0, 0)), Hsl::new(200, 0, 0));
        assert_eq!(hsv_to_hsl(Hsv::new(200, 0, 100)), Hsl::new(200, 0, 100));
        assert_eq!(hsl_to_hsv(Hsl::new(200, 50, 0)), Hsv::new(200, 0, 0));
    }

    #[test]
    fn hsl_hsv_round_trip() {
        let hsl = Hsl::new(210, 40, 60);
        let back = hsv_to_hsl(hsl_to_hsv(hsl));
        assert!((back.s as i32 - hsl.s as i32).abs() <= 1);
        assert!((back.l as i32 - hsl.l as i32).abs() <= 1);
    }

    #[test]
    fn contrast_is_black_on_white_and_white_on_black() {
        assert_eq!(contrast_color(Rgb::WHITE), Rgb::BLACK);
        assert_eq!(contrast_color(Rgb::BLACK), Rgb::WHITE);
        // Pure yellow is light, pure blue is dark.
        assert_eq!(contrast_color(Rgb::new(255, 255, 0)), Rgb::BLACK);
        assert_eq!(contrast_color(Rgb::new(0, 0, 255)), Rgb::WHITE);
    }

    #[test]
    fn random_rgb_is_in_range() {
        // u8 channels are in range by construction; just exercise the path.
        let _ = random_rgb();
    }
}
