//! Compound picker composition.
//!
//! [`PickerState`] is the shared state the named sub-parts read from and
//! write back to: the working HSVA signals, the external
//! `RwSignal<ColorState>`, and the in-flight interaction flag used to
//! coalesce a drag into one final commit. Sub-parts
//! ([`saturation_area`](crate::saturation::saturation_area),
//! [`hue_strip`](crate::hue_slider::hue_strip),
//! [`alpha_strip`](crate::alpha_slider::alpha_strip), the input rows) each
//! take a copy of it; [`picker_panel`] is the default assembly.

use std::cell::Cell;
use std::rc::Rc;

use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::color::{ColorInput, ColorState, Hsla, Hsva, Rgb};
use crate::constants;
use crate::convert;
#[cfg(all(feature = "eyedropper", target_os = "macos"))]
use crate::eyedropper::eyedropper_button;
#[cfg(feature = "alpha")]
use crate::inputs::alpha_input;
use crate::inputs::{color_input, copy_button, hex_input, number_input};

#[cfg(feature = "alpha")]
use crate::alpha_slider::alpha_strip;
use crate::hue_slider::hue_strip;
use crate::saturation::saturation_area;

/// Shared state for the compound picker parts.
///
/// The working representation is HSVA in display units (hue 0–360,
/// saturation/value 0–100, alpha 0–1) so the hue survives trips through
/// zero saturation or value. All sub-parts write here; a pair of effects
/// keeps the external [`ColorState`] signal in sync both ways.
#[derive(Clone, Copy)]
pub struct PickerState {
    color: RwSignal<ColorState>,
    pub(crate) hue: RwSignal<f64>,
    pub(crate) sat: RwSignal<f64>,
    pub(crate) val: RwSignal<f64>,
    pub(crate) alpha: RwSignal<f64>,
    interacting: RwSignal<bool>,
}

impl PickerState {
    /// Wire the working signals to an external color signal.
    pub fn new(color: RwSignal<ColorState>) -> Self {
        let initial = color.get_untracked().hsva;
        let state = Self {
            color,
            hue: RwSignal::new(initial.h as f64),
            sat: RwSignal::new(initial.s as f64),
            val: RwSignal::new(initial.v as f64),
            alpha: RwSignal::new(initial.a),
            interacting: RwSignal::new(false),
        };

        // Working HSVA -> external color. Compared on the HSVA projection:
        // the external value is a function of it, and a host-set color whose
        // projection already matches (e.g. at mount, before any edit) keeps
        // its exact channels instead of being replaced by a re-derivation.
        create_effect(move |_| {
            let hsva = Hsva::new(
                state.hue.get().round() as u16,
                state.sat.get().round() as u8,
                state.val.get().round() as u8,
                state.alpha.get(),
            );
            if hsva != color.get_untracked().hsva {
                color.set(ColorState::new(ColorInput::Hsva(hsva)));
            }
        });

        // External color -> working HSVA. Skipped while a drag is in
        // flight; hue is preserved when the incoming color is degenerate.
        create_effect(move |_| {
            let c = color.get();
            if state.interacting.get_untracked() {
                return;
            }
            if c.hsva == state.hsva() {
                return;
            }
            if c.hsva.s > 0 && c.hsva.v > 0 {
                state.hue.set(c.hsva.h as f64);
            }
            state.sat.set(c.hsva.s as f64);
            state.val.set(c.hsva.v as f64);
            state.alpha.set(c.hsva.a);
        });

        state
    }

    /// The external color signal this picker reads and writes.
    pub fn color(&self) -> RwSignal<ColorState> {
        self.color
    }

    /// The current working HSVA, rounded to display units.
    pub fn hsva(&self) -> Hsva {
        Hsva::new(
            self.hue.get_untracked().round() as u16,
            self.sat.get_untracked().round() as u8,
            self.val.get_untracked().round() as u8,
            self.alpha.get_untracked(),
        )
    }

    /// Replace the color from any input representation. Used by the text
    /// inputs and the eyedropper; goes through the same external-sync path
    /// as host-side signal writes.
    pub fn set_input(&self, input: ColorInput) {
        self.color.set(ColorState::new(input));
    }

    pub(crate) fn begin_interaction(&self) {
        self.interacting.set(true);
    }

    /// Mark the in-flight interaction finished; external edits resume.
    pub(crate) fn end_interaction(&self) {
        self.interacting.set(false);
    }
}

/// The default picker assembly: saturation/value plane, hue strip, alpha
/// strip, eyedropper and swatch row, hex and free-form inputs, and numeric
/// rows for HSV, HSL, and RGB.
pub(crate) fn picker_panel(color: RwSignal<ColorState>) -> impl IntoView {
    let state = PickerState::new(color);

    // HSL and RGB rows edit derived signals; the guards break the
    // forward-sync -> back-sync cycle.
    let s_hsl = RwSignal::new(0.0_f64);
    let l = RwSignal::new(0.0_f64);
    let r = RwSignal::new(0.0_f64);
    let g = RwSignal::new(0.0_f64);
    let bl = RwSignal::new(0.0_f64);
    {
        let c = color.get_untracked();
        s_hsl.set(c.hsl.s as f64);
        l.set(c.hsl.l as f64);
        r.set(c.rgb.r as f64);
        g.set(c.rgb.g as f64);
        bl.set(c.rgb.b as f64);
    }

    let hsl_guard = Rc::new(Cell::new(false));
    let rgb_guard = Rc::new(Cell::new(false));

    // Color -> HSL display sync
    let hsl_fwd = hsl_guard.clone();
    create_effect(move |_| {
        let c = color.get();
        let changed = (s_hsl.get_untracked() - c.hsl.s as f64).abs() > 0.5
            || (l.get_untracked() - c.hsl.l as f64).abs() > 0.5;
        if changed {
            hsl_fwd.set(true);
            s_hsl.set(c.hsl.s as f64);
            l.set(c.hsl.l as f64);
            hsl_fwd.set(false);
        }
    });

    // HSL inputs -> color back-sync
    let hsl_back = hsl_guard;
    create_effect(move |_| {
        let sv = s_hsl.get();
        let lv = l.get();
        if hsl_back.get() {
            return;
        }
        let current = color.get_untracked();
        let next = Hsla::new(
            current.hsva.h,
            sv.round() as u8,
            lv.round() as u8,
            current.alpha,
        );
        if next.hsl() != current.hsl {
            state.set_input(ColorInput::Hsla(next));
        }
    });

    // Color -> RGB display sync
    let rgb_fwd = rgb_guard.clone();
    create_effect(move |_| {
        let c = color.get();
        let changed = (r.get_untracked() - c.rgb.r as f64).abs() > 0.5
            || (g.get_untracked() - c.rgb.g as f64).abs() > 0.5
            || (bl.get_untracked() - c.rgb.b as f64).abs() > 0.5;
        if changed {
            rgb_fwd.set(true);
            r.set(c.rgb.r as f64);
            g.set(c.rgb.g as f64);
            bl.set(c.rgb.b as f64);
            rgb_fwd.set(false);
        }
    });

    // RGB inputs -> color back-sync
    let rgb_back = rgb_guard;
    create_effect(move |_| {
        let rv = r.get();
        let gv = g.get();
        let bv = bl.get();
        if rgb_back.get() {
            return;
        }
        let current = color.get_untracked();
        let next = Rgb::new(rv.round() as u8, gv.round() as u8, bv.round() as u8);
        if next != current.rgb {
            state.set_input(ColorInput::Rgba(next.with_alpha(current.alpha)));
        }
    });

    v_stack((
        // Saturation/value plane
        saturation_area(state).style(|s| s.margin_top(8.0)),
        // Eyedropper + color swatch row
        h_stack((
            #[cfg(all(feature = "eyedropper", target_os = "macos"))]
            eyedropper_button(state),
            // Spacer pushes swatch to the right
            empty().style(|s| s.flex_grow(1.0)),
            swatch(state),
        ))
        .style(|st| st.items_center().margin_horiz(8.0)),
        // Hue strip
        hue_strip(state).style(|s| s.margin_horiz(8.0)),
        // Alpha strip + percentage (feature-gated)
        #[cfg(feature = "alpha")]
        h_stack((
            alpha_strip(state).style(|s| s.flex_grow(1.0)),
            alpha_input(state.alpha),
        ))
        .style(|s| s.margin_horiz(8.0).gap(4.0)),
        // Hex + copy row
        h_stack((
            hex_input(state),
            copy_button(move || color.get().hex.clone()),
        ))
        .style(|st| st.gap(constants::GAP).items_center().justify_center()),
        // Free-form color string input with inline validation
        color_input(state),
        // HSV inputs row
        h_stack((
            number_input("H", state.hue, 360.0),
            number_input("S", state.sat, 100.0),
            number_input("V", state.val, 100.0),
            copy_button(move || color.get().format(crate::color::ColorFormat::Hsv)),
        ))
        .style(|st| st.gap(constants::GAP / 2.0).items_center().justify_center()),
        // HSL inputs row
        h_stack((
            number_input("H", state.hue, 360.0),
            number_input("S", s_hsl, 100.0),
            number_input("L", l, 100.0),
            copy_button(move || color.get().format(crate::color::ColorFormat::Hsl)),
        ))
        .style(|st| st.gap(constants::GAP / 2.0).items_center().justify_center()),
        // RGB inputs row
        h_stack((
            number_input("R", r, 255.0),
            number_input("G", g, 255.0),
            number_input("B", bl, 255.0),
            copy_button(move || color.get().format(crate::color::ColorFormat::Rgb)),
        ))
        .style(|st| st.gap(constants::GAP / 2.0).items_center().justify_center()),
    ))
    .style(|st| {
        st.gap(constants::GAP)
            .padding_horiz(constants::PADDING)
            .padding_bottom(constants::PADDING)
            .padding_top(2.0)
            .size_full()
            .justify_center()
            .background(Color::rgb8(242, 242, 242))
    })
}

/// Small preview of the current color with a contrast-aware border.
fn swatch(state: PickerState) -> impl IntoView {
    let color = state.color();
    empty().style(move |st| {
        let c = color.get();
        let border = convert::contrast_color(c.rgb);
        st.width(32.0)
            .height(32.0)
            .border_radius(constants::RADIUS)
            .border(1.0)
            .border_color(Color::rgba8(border.r, border.g, border.b, 90))
            .background(Color::rgba8(
                c.rgb.r,
                c.rgb.g,
                c.rgb.b,
                (c.alpha * 255.0).round() as u8,
            ))
    })
}
