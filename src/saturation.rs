//! Rectangular saturation/value plane.
//!
//! Left→right is saturation 0–100, top→bottom is value 100–0, at the
//! current hue. The gradient is rasterized to an RGBA8 pixel buffer and
//! cached per hue; the renderer scales it to the widget size.

use std::sync::Arc;

use floem::kurbo::{Circle, Point, Rect};
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
use crate::interaction::{self, ArrowKey, DragState, Position};
use crate::picker::PickerState;

/// Rasterize the plane for one hue: white→pure hue along x, fading to
/// black along y.
fn rasterize_plane(width: u32, height: u32, hue: f64) -> Vec<u8> {
    let h = hue / 360.0;
    let mut buf = vec![0u8; (width * height * 4) as usize];
    for py in 0..height {
        let v = 1.0 - py as f64 / (height - 1).max(1) as f64;
        let row_offset = (py * width * 4) as usize;
        for px in 0..width {
            let s = px as f64 / (width - 1).max(1) as f64;
            let (r, g, b) = convert::hsv_norm_to_rgb(h, s, v);
            let offset = row_offset + (px * 4) as usize;
            buf[offset] = (r * 255.0 + 0.5) as u8;
            buf[offset + 1] = (g * 255.0 + 0.5) as u8;
            buf[offset + 2] = (b * 255.0 + 0.5) as u8;
            buf[offset + 3] = 255;
        }
    }
    buf
}

enum PlaneUpdate {
    SatVal(f64, f64),
    Hue(f64),
}

pub struct SaturationArea {
    id: ViewId,
    drag: DragState,
    hue: f64,
    sat: f64,
    val: f64,
    size: floem::taffy::prelude::Size<f32>,
    on_change: Option<Box<dyn Fn(u8, u8)>>,
    on_start: Option<Box<dyn Fn()>>,
    on_done: Option<Box<dyn Fn()>>,
    /// Cached gradient image, re-rasterized when the hue moves.
    plane_img: Option<peniko::Image>,
    plane_hash: Vec<u8>,
    cached_hue: u16,
}

/// Creates the saturation/value plane for a picker.
pub fn saturation_area(state: PickerState) -> SaturationArea {
    let id = ViewId::new();

    create_effect(move |_| {
        let s = state.sat.get();
        let v = state.val.get();
        id.update_state(PlaneUpdate::SatVal(s, v));
    });

    create_effect(move |_| {
        let h = state.hue.get();
        id.update_state(PlaneUpdate::Hue(h));
    });

    SaturationArea {
        id,
        drag: DragState::new(),
        hue: state.hue.get_untracked(),
        sat: state.sat.get_untracked(),
        val: state.val.get_untracked(),
        size: Default::default(),
        on_change: Some(Box::new(move |s, v| {
            state.sat.set(s as f64);
            state.val.set(v as f64);
        })),
        on_start: Some(Box::new(move || state.begin_interaction())),
        on_done: Some(Box::new(move || state.end_interaction())),
        plane_img: None,
        plane_hash: Vec::new(),
        cached_hue: u16::MAX,
    }
    .style(|s| {
        s.flex_grow(1.0)
            .min_height(constants::PLANE_MIN_HEIGHT)
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Default)
    })
    .keyboard_navigable()
}

impl SaturationArea {
    fn report(&self, pos: Position) {
        let (s, v) = interaction::sat_val_at(pos);
        if let Some(cb) = &self.on_change {
            cb(s, v);
        }
    }

    fn step_by_key(&self, key: ArrowKey) {
        let offset = key.offset();
        let s = (self.sat + offset.x * 100.0).clamp(0.0, 100.0);
        let v = (self.val - offset.y * 100.0).clamp(0.0, 100.0);
        if let Some(cb) = &self.on_change {
            cb(s.round() as u8, v.round() as u8);
        }
    }

    fn cursor_position(&self) -> Point {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        Point::new(self.sat / 100.0 * w, (1.0 - self.val / 100.0) * h)
    }

    fn ensure_plane_image(&mut self) {
        let hue_key = self.hue.round() as u16;
        if self.plane_img.is_some() && self.cached_hue == hue_key {
            return;
        }

        let size = constants::PLANE_RASTER_SIZE;
        let pixels = rasterize_plane(size, size, hue_key as f64);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, size, size);

        self.plane_hash = blob.id().to_le_bytes().to_vec();
        self.plane_img = Some(img);
        self.cached_hue = hue_key;
    }
}

impl View for SaturationArea {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<PlaneUpdate>() {
            match *update {
                PlaneUpdate::SatVal(s, v) => {
                    self.sat = s;
                    self.val = v;
                }
                PlaneUpdate::Hue(h) => self.hue = h,
            }
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                if let Some(cb) = &self.on_start {
                    cb();
                }
                let pos = self.drag.pointer_down(e.pos.x, e.pos.y, w, h);
                self.report(pos);
                self.id.request_layout();
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if let Some(pos) = self.drag.pointer_move(e.pos.x, e.pos.y, w, h) {
                    self.report(pos);
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
        let rrect = rect.to_rounded_rect(constants::RADIUS as f64);

        cx.save();
        cx.clip(&rrect);
        self.ensure_plane_image();
        if let Some(ref img) = self.plane_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.plane_hash,
                },
                rect,
            );
        }
        cx.restore();

        // Plane outline
        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );

        // Cursor ring
        let cur_pt = self.cursor_position();
        let outer = Circle::new(cur_pt, constants::CURSOR_RADIUS + 1.0);
        cx.stroke(
            &outer,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
        let cursor = Circle::new(cur_pt, constants::CURSOR_RADIUS);
        cx.stroke(&cursor, Color::WHITE, &floem::kurbo::Stroke::new(2.0));
        let inner = Circle::new(cur_pt, constants::CURSOR_RADIUS - 1.5);
        cx.stroke(
            &inner,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
    }
}
