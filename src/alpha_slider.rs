//! Horizontal alpha strip: transparent on the left, opaque on the right.
//!
//! A checkerboard backs a linear gradient from the fully transparent to
//! the fully opaque current base color, so the track previews exactly
//! what each alpha looks like over nothing.

use floem::kurbo::{Rect, Shape};
use floem::peniko::{Color, Gradient};

use floem::reactive::{create_effect, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::checkerboard::paint_checkerboard;
use crate::color::{Hsv, Rgb};
use crate::constants;
use crate::convert;
use crate::interaction::{self, ArrowKey, DragState};
use crate::picker::PickerState;

enum AlphaUpdate {
    Alpha(f64),
    Base(Rgb),
}

pub struct AlphaStrip {
    id: ViewId,
    drag: DragState,
    /// Current alpha, 0.0–1.0.
    alpha: f64,
    /// Opaque color the gradient ramps toward.
    base: Rgb,
    size: floem::taffy::prelude::Size<f32>,
    on_change: Option<Box<dyn Fn(f64)>>,
    on_start: Option<Box<dyn Fn()>>,
    on_done: Option<Box<dyn Fn()>>,
}

/// Creates the horizontal alpha strip for a picker.
pub fn alpha_strip(state: PickerState) -> AlphaStrip {
    let id = ViewId::new();

    create_effect(move |_| {
        let a = state.alpha.get();
        id.update_state(AlphaUpdate::Alpha(a));
    });

    create_effect(move |_| {
        let hsv = Hsv::new(
            state.hue.get().round() as u16,
            state.sat.get().round() as u8,
            state.val.get().round() as u8,
        );
        id.update_state(AlphaUpdate::Base(convert::hsv_to_rgb(hsv)));
    });

    AlphaStrip {
        id,
        drag: DragState::new(),
        alpha: state.alpha.get_untracked(),
        base: Rgb::BLACK,
        size: Default::default(),
        on_change: Some(Box::new(move |a| {
            state.alpha.set(a);
        })),
        on_start: Some(Box::new(move || state.begin_interaction())),
        on_done: Some(Box::new(move || state.end_interaction())),
    }
    .style(|s| {
        s.height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
    .keyboard_navigable()
}

impl AlphaStrip {
    fn usable_width(&self) -> f64 {
        self.size.width as f64 - 2.0 * constants::THUMB_RADIUS
    }

    fn report(&self, x: f64) {
        if let Some(cb) = &self.on_change {
            cb(interaction::alpha_at(x));
        }
    }

    fn step_by_key(&self, key: ArrowKey) {
        let a = (self.alpha + key.offset().x).clamp(0.0, 1.0);
        if let Some(cb) = &self.on_change {
            cb(a);
        }
    }
}

impl View for AlphaStrip {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<AlphaUpdate>() {
            match *update {
                AlphaUpdate::Alpha(a) => self.alpha = a,
                AlphaUpdate::Base(rgb) => self.base = rgb,
            }
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
        paint_checkerboard(cx, rect);

        // Transparent (left) → opaque (right)
        let base = self.base;
        let transparent = Color::rgba8(base.r, base.g, base.b, 0);
        let solid = Color::rgba8(base.r, base.g, base.b, 255);
        let gradient = Gradient::new_linear((0.0, h / 2.0), (w, h / 2.0))
            .with_stops([transparent, solid]);
        // Convert to BezPath so the vello renderer uses the general path
        // handler (its Rect fast-path only supports solid colors).
        let path = rect.to_path(0.1);
        cx.fill(&path, &gradient, 0.0);
        cx.restore();

        // Slider outline
        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );

        // Thumb (left = transparent, right = opaque)
        let radius = constants::THUMB_RADIUS;
        let thumb_x = radius + self.alpha.clamp(0.0, 1.0) * (w - 2.0 * radius);
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
