//! Text and numeric input components for color editing.

use floem::event::EventPropagation;
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::color::ColorInput;
use crate::constants;
use crate::parse;
use crate::picker::PickerState;

fn is_enter(e: &floem::event::Event) -> bool {
    if let floem::event::Event::KeyDown(ke) = e {
        ke.key.logical_key == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Enter)
    } else {
        false
    }
}

/// A numeric input over a unit-valued signal: hue holds 0–360,
/// saturation/value/lightness hold 0–100, RGB channels hold 0–255.
///
/// The typed value is committed on Enter or focus-lost and clamped to
/// `0..=max`; anything unparseable resets to the current value.
pub(crate) fn number_input(
    lbl: &'static str,
    signal: RwSignal<f64>,
    max: f64,
) -> impl IntoView {
    let text = RwSignal::new(format_value(signal.get_untracked()));

    // Signal → text (external updates)
    create_effect(move |_| {
        let expected = format_value(signal.get());
        if text.get_untracked() != expected {
            text.set(expected);
        }
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        if let Some(committed) = commit_value(&raw, max) {
            if committed != signal.get_untracked().round() {
                signal.set(committed);
            }
            let formatted = format!("{}", committed as i64);
            if raw != formatted {
                text.set(formatted);
            }
        } else {
            // Reset to current signal value
            let formatted = format_value(signal.get_untracked());
            if raw != formatted {
                text.set(formatted);
            }
        }
    };
    let on_commit_clone = on_commit;

    v_stack((
        text_input(text)
            .style(|s| {
                s.width(constants::INPUT_WIDTH)
                    .padding(2.0)
                    .font_size(constants::INPUT_FONT)
                    .font_family("monospace".to_string())
                    .background(Color::WHITE)
                    .border(1.0)
                    .border_color(Color::rgb8(200, 200, 200))
                    .border_radius(3.0)
            })
            .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
                on_commit();
            })
            .on_event(floem::event::EventListener::KeyDown, move |e| {
                if is_enter(e) {
                    on_commit_clone();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }),
        label(move || lbl).style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
                .justify_content(Some(floem::taffy::AlignContent::Center))
        }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

fn format_value(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Parse a typed value, clamped to `0..=max` and rounded to the integer the
/// field displays, so the stored value always matches the shown text.
fn commit_value(raw: &str, max: f64) -> Option<f64> {
    let num: f64 = raw.trim().parse().ok()?;
    Some(num.clamp(0.0, max).round())
}

/// The hex field: syncs with the picker's color, a `#` label to its left.
///
/// Updates the color dynamically as the user types a complete 6- or
/// 8-digit value; commit (Enter or focus-lost) normalizes shorthand and
/// resets anything unparseable.
pub(crate) fn hex_input(state: PickerState) -> impl IntoView {
    let color = state.color();
    let text = RwSignal::new(
        color
            .get_untracked()
            .hex
            .trim_start_matches('#')
            .to_string(),
    );

    // External color → text (only update if not equivalent)
    create_effect(move |_| {
        let hex = color.get().hex;
        let bare = hex.trim_start_matches('#');
        let current = text.get_untracked();
        if current.trim_start_matches('#').to_ascii_lowercase() != bare {
            text.set(bare.to_string());
        }
    });

    // Dynamic: text → color on every complete valid value
    create_effect(move |_| {
        let raw = text.get();
        let trimmed = raw.trim().trim_start_matches('#');
        if trimmed.len() == 6 || trimmed.len() == 8 {
            if let Ok(rgba) = parse::parse_hex(trimmed) {
                if rgba != color.get_untracked().rgba {
                    state.set_input(ColorInput::Rgba(rgba));
                }
            }
        }
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        match parse::normalize_hex(&raw) {
            Ok(normalized) => {
                let bare = normalized.trim_start_matches('#').to_string();
                if raw != bare {
                    text.set(bare);
                }
                if color.get_untracked().hex != normalized {
                    state.set_input(ColorInput::Hex(normalized));
                }
            }
            Err(_) => {
                let bare = color
                    .get_untracked()
                    .hex
                    .trim_start_matches('#')
                    .to_string();
                if raw != bare {
                    text.set(bare);
                }
            }
        }
    };
    let on_commit_clone = on_commit;

    h_stack((
        label(|| "#").style(|s| {
            s.font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .color(Color::rgb8(120, 120, 120))
        }),
        text_input(text)
            .style(|s| {
                s.width(constants::HEX_INPUT_WIDTH)
                    .padding(2.0)
                    .font_size(constants::INPUT_FONT)
                    .font_family("monospace".to_string())
                    .background(Color::WHITE)
                    .border(1.0)
                    .border_color(Color::rgb8(200, 200, 200))
                    .border_radius(3.0)
            })
            .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
                on_commit();
            })
            .on_event_stop(floem::event::EventListener::KeyDown, move |e| {
                if is_enter(e) {
                    on_commit_clone();
                }
            }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

/// Free-form color field accepting hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`,
/// and named colors, with the first problem reported inline as the user
/// types. Commit replaces the text with the normalized hex form.
pub(crate) fn color_input(state: PickerState) -> impl IntoView {
    let color = state.color();
    let text = RwSignal::new(color.get_untracked().hex);
    let error = RwSignal::new(None::<String>);

    // External color → text, unless the field already names the same color
    // in another syntax.
    create_effect(move |_| {
        let hex = color.get().hex;
        let current = text.get_untracked();
        let equivalent = parse::parse_color(&current)
            .map(|rgba| parse::rgb_to_hex(rgba.rgb()) == hex)
            .unwrap_or(false);
        if !equivalent {
            text.set(hex);
        }
    });

    // Live validation on every keystroke.
    create_effect(move |_| {
        let raw = text.get();
        error.set(parse::validate_color(&raw).error);
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        if let Some(corrected) = parse::validate_color(&raw).corrected {
            if raw != corrected {
                text.set(corrected.clone());
            }
            if color.get_untracked().hex != corrected {
                state.set_input(ColorInput::Hex(corrected));
            }
        }
    };
    let on_commit_clone = on_commit;

    v_stack((
        text_input(text)
            .style(move |s| {
                let border = if error.get().is_some() {
                    Color::rgb8(220, 80, 80)
                } else {
                    Color::rgb8(200, 200, 200)
                };
                s.width(constants::COLOR_INPUT_WIDTH)
                    .padding(2.0)
                    .font_size(constants::INPUT_FONT)
                    .font_family("monospace".to_string())
                    .background(Color::WHITE)
                    .border(1.0)
                    .border_color(border)
                    .border_radius(3.0)
            })
            .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
                on_commit();
            })
            .on_event(floem::event::EventListener::KeyDown, move |e| {
                if is_enter(e) {
                    on_commit_clone();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }),
        label(move || error.get().unwrap_or_default()).style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(220, 80, 80))
        }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

/// An editable percentage input for alpha (0–100%).
///
/// Shows a numeric text field with a `%` label to its right. The user types
/// a plain number; it is committed on Enter or focus-lost and clamped to
/// 0–100.
#[cfg(feature = "alpha")]
pub(crate) fn alpha_input(signal: RwSignal<f64>) -> impl IntoView {
    let text = RwSignal::new(format!(
        "{}",
        (signal.get_untracked() * 100.0).round() as i64
    ));

    // Signal → text
    create_effect(move |_| {
        let val = signal.get();
        let display = format!("{}", (val * 100.0).round() as i64);
        if text.get_untracked() != display {
            text.set(display);
        }
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        if let Some(committed) = commit_value(&raw, 100.0) {
            if committed != (signal.get_untracked() * 100.0).round() {
                signal.set(committed / 100.0);
            }
            let formatted = format!("{}", committed as i64);
            if raw.trim() != formatted {
                text.set(formatted);
            }
        } else {
            let formatted = format!("{}", (signal.get_untracked() * 100.0).round() as i64);
            if raw != formatted {
                text.set(formatted);
            }
        }
    };
    let on_commit_clone = on_commit;

    h_stack((
        text_input(text)
            .style(|s| {
                s.width(constants::INPUT_WIDTH)
                    .padding(2.0)
                    .font_size(constants::INPUT_FONT)
                    .font_family("monospace".to_string())
                    .background(Color::WHITE)
                    .border(1.0)
                    .border_color(Color::rgb8(200, 200, 200))
                    .border_radius(3.0)
            })
            .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
                on_commit();
            })
            .on_event(floem::event::EventListener::KeyDown, move |e| {
                if is_enter(e) {
                    on_commit_clone();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }),
        label(|| "%").style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
        }),
    ))
    .style(|s| s.items_center().gap(2.0))
}

/// A small copy button that copies the result of `get_text` to the clipboard.
pub(crate) fn copy_button(get_text: impl Fn() -> String + 'static) -> impl IntoView {
    let pressed = RwSignal::new(false);
    container(
        label(|| lucide_icons::Icon::Copy.unicode().to_string()).style(move |s| {
            let c = if pressed.get() {
                Color::rgb8(80, 80, 80)
            } else {
                Color::rgb8(120, 120, 120)
            };
            s.font_size(14.0).font_family("lucide".to_string()).color(c)
        }),
    )
    .style(|s| {
        s.size(20.0, 20.0)
            .items_center()
            .justify_center()
            .border_radius(3.0)
            .cursor(floem::style::CursorStyle::Pointer)
            .align_self(Some(floem::taffy::AlignItems::Start))
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_event_stop(floem::event::EventListener::PointerDown, move |_| {
        pressed.set(true);
    })
    .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
        pressed.set(false);
        copy_to_clipboard(&get_text());
    })
}

fn copy_to_clipboard(text: &str) {
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        if clipboard.set_text(text).is_err() {
            log::warn!("clipboard write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_values_round_to_the_displayed_integer() {
        // A fractional entry stores the integer the field shows.
        assert_eq!(commit_value("50.7", 100.0), Some(51.0));
        assert_eq!(commit_value(" 42 ", 360.0), Some(42.0));
    }

    #[test]
    fn committed_values_clamp_to_range() {
        assert_eq!(commit_value("400", 360.0), Some(360.0));
        assert_eq!(commit_value("-3", 255.0), Some(0.0));
    }

    #[test]
    fn unparseable_input_does_not_commit() {
        assert_eq!(commit_value("abc", 100.0), None);
        assert_eq!(commit_value("", 100.0), None);
    }
}
