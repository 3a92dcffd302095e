//! Horizontal hue strip (0–360).
//!
//! Renders the full hue rainbow at full saturation and value as a
//! rasterized image, avoiding vger's broken linear gradient coordinate
//! handling. The raster never changes, so it is built once per size.

use std::sync::Arc;

use floem::kurbo::Rect;
use floem::peniko::{self, Blob, Color};

use floem::reactive::{create_effect, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::constants;
use crate::convert;
use crate::interaction::{self, ArrowKey, DragState};
use crate::picker::PickerState;

/// Rasterize the hue rainbow: red → yellow → green → cyan → blue →
/// magenta → red, left to right.
fn rasterize_hue_strip(width: u32, height: u32) -> Vec<u8> {
    let mut buf = vec![0u8; (width * height * 4) as usize];
    for px in 0..width {
        let h = px as f64 / (width - 1).max(1) as f64;
        let (r, g, b) = convert::hsv_norm_to_rgb(h, 1.0, 1.0);
        let cr = (r * 255.0 + 0.5) as u8;
        let cg = (g * 255.0 + 0.5) as u8;
        let cb = (b * 255.0 + 0.5) as u8;
        for py in 0..height {
            let offset = ((py * width + px) * 4) as usize;
            buf[offset] = cr;
            buf[offset + 1] = cg;
            buf[offset + 2] = cb;
            buf[offset + 3] = 255;
        }
    }
    buf
}

struct HueUpdate(f64);

pub struct HueStrip {
    id: ViewId,
    drag: DragState,
    hue: f64,
    size: floem::taffy::prelude::Size<f32>,
    on_change: Option<Box<dyn Fn(u16)>>,
    on_start: Option<Box<dyn Fn()>>,
    on_done: Option<Box<dyn Fn()>>,
    /// Cached rainbow image.
    strip_img: Option<peniko::Image>,
    strip_hash: Vec<u8>,
}

/// Creates the horizontal hue strip for a picker.
pub fn hue_strip(state: PickerState) -> HueStrip {
    let id = ViewId::new();

    create_effect(move |_| {
        let h = state.hue.get();
        id.update_state(HueUpdate(h));
    });

    HueStrip {
        id,
        drag: DragState::new(),
        hue: state.hue.get_untracked(),
        size: Default::default(),
        on_change: Some(Box::new(move |h| {
            state.hue.set(h as f64);
        })),
        on_start: Some(Box::new(move || state.begin_interaction())),
        on_done: Some(Box::new(move || state.end_interaction())),
        strip_img: None,
        strip_hash: Vec::new(),
    }
    .style(|s| {
        s.height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
    .keyboard_navigable()
}

impl HueStrip {
    /// Track span the thumb center can travel, excluding the thumb radius
    /// at both ends.
    fn usable_width(&self) -> f64 {
        self.size.width as f64 - 2.0 * constants::THUMB_RADIUS
    }

    fn report(&self, x: f64) {
        if let Some(cb) = &self.on_change {
            cb(interaction::hue_at(x));
        }
    }

    fn step_by_key(&self, key: ArrowKey) {
        let h = (self.hue + key.offset().x * 360.0).clamp(0.0, 360.0);
        if let Some(cb) = &self.on_change {
            cb(h.round() as u16);
        }
    }

    fn ensure_strip_image(&mut self) {
        if self.strip_img.is_some() {
            return;
        }
        let width = constants::HUE_RASTER_WIDTH;
        let height = constants::SLIDER_HEIGHT as u32;
        let pixels = rasterize_hue_strip(width, height);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob, peniko::Format::Rgba8, width, height);

        self.strip_hash = b"hue-strip".to_vec();
        self.strip_img = Some(img);
    }
}

impl View for HueStrip {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<HueUpdate>() {
            self.hue = update.0;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        let r = constants::THUMB_RADIUS;
        let usable = self.usable_width();
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                if let Some(cb) = &self.on_start {
                    cb();
                }
                let pos = self.drag.pointer_down(e.pos.x - r, 0.0, usable, 0.0);
                self.report(pos.x);
                self.id.request_layout();
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if let Some(pos) = self.drag.pointer_move(e.pos.x - r, 0.0, usable, 0.0) {
                    self.report(pos.x);
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) => {
                if self.drag.pointer_up() {
                    if let Some(cb) = &self.on_done {
                        cb();
                    }
                }
                EventPropagation::Continue
            }
            Event::KeyDown(_) => {
                if let Some(key) = ArrowKey::from_event(event) {
                    self.step_by_key(key);
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::FocusLost => {
                self.drag.cancel();
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::THUMB_RADIUS);

        cx.save();
        cx.clip(&rrect);
        self.ensure_strip_image();
        if let Some(ref img) = self.strip_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.strip_hash,
                },
                rect,
            );
        }
        cx.restore();

        // Slider outline
        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );

        // Thumb (circular ring; left = 0, right = 360)
        let radius = constants::THUMB_RADIUS;
        let thumb_x = radius + (self.hue / 360.0).clamp(0.0, 1.0) * (w - 2.0 * radius);
        let thumb_cy = h / 2.0;
        let circle = floem::kurbo::Circle::new((thumb_x, thumb_cy), radius);
        cx.stroke(
            &circle,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
        let inner = floem::kurbo::Circle::new((thumb_x, thumb_cy), radius - 1.5);
        cx.stroke(&inner, Color::WHITE, &floem::kurbo::Stroke::new(2.0));
        let innermost = floem::kurbo::Circle::new((thumb_x, thumb_cy), radius - 3.0);
        cx.stroke(
            &innermost,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
    }
}
