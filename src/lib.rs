//! # floem-chroma
//!
//! A color picker widget for [Floem](https://github.com/lapce/floem).
//!
//! Provides an inline HSV color picker with a 2D saturation/value area, hue
//! slider, optional alpha slider, hex and free-form color inputs, numeric
//! HSV/HSL/RGB rows, and a macOS screen eyedropper. The color model,
//! conversions, and string parsing are plain functions usable without the
//! widget.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_chroma::{color_picker, ColorInput, ColorState};
//!
//! let color = RwSignal::new(ColorState::new(ColorInput::Hex("#3b82f6".into())));
//! // Use `color_picker(color)` in your Floem view tree.
//! ```

mod color;
pub mod convert;
pub mod interaction;
pub mod parse;

#[cfg(feature = "alpha")]
mod alpha_slider;
#[cfg(feature = "alpha")]
mod checkerboard;
mod constants;
#[cfg(all(feature = "eyedropper", target_os = "macos"))]
mod eyedropper;
mod hue_slider;
mod inputs;
mod picker;
mod saturation;

pub use color::{
    ColorFormat, ColorInput, ColorState, Hsl, Hsla, Hsv, Hsva, HsvaPartial, Rgb, Rgba,
};
pub use convert::{contrast_color, random_rgb};
pub use parse::{
    hex_to_rgb, normalize_hex, parse_color, parse_color_string, rgb_to_hex, validate_color,
    ColorParseError, Validation, FALLBACK_HEX,
};
pub use picker::PickerState;

#[cfg(feature = "alpha")]
pub use alpha_slider::alpha_strip;
#[cfg(all(feature = "eyedropper", target_os = "macos"))]
pub use eyedropper::{eyedropper_button, sampler_available};
pub use hue_slider::hue_strip;
pub use saturation::saturation_area;

use std::sync::Once;

use floem::prelude::*;
use floem::reactive::RwSignal;
use floem::text::FONT_SYSTEM;

static LOAD_LUCIDE_FONT: Once = Once::new();

/// Creates the top-level color picker view.
///
/// The picker reads from and writes to `color`. Any external changes to the
/// signal are reflected in the UI, and user edits update the signal. While
/// the user is dragging a control, external edits are held off and the drag
/// lands as a single final value on release.
pub fn color_picker(color: RwSignal<ColorState>) -> impl IntoView {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
    picker::picker_panel(color)
}
