//! Pointer and keyboard bookkeeping shared by the interactive controls.
//!
//! Each control owns one [`DragState`]: `idle → dragging → idle`.
//! Pointer-down enters dragging and reports a position normalized to the
//! control's bounds immediately; moves report only while dragging;
//! pointer-up leaves dragging and tells the caller an interaction just
//! finished (the picker uses that to coalesce a drag into one final
//! commit). Arrow keys report a fixed offset without entering dragging.

/// Position normalized to a control's bounding box, each axis in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Normalized step applied per arrow-key press.
pub const KEY_STEP: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

impl ArrowKey {
    /// The arrow key of a Floem event, if it is one.
    pub fn from_event(event: &floem::event::Event) -> Option<ArrowKey> {
        use floem::keyboard::{Key, NamedKey};
        if let floem::event::Event::KeyDown(ke) = event {
            match &ke.key.logical_key {
                Key::Named(NamedKey::ArrowLeft) => Some(ArrowKey::Left),
                Key::Named(NamedKey::ArrowRight) => Some(ArrowKey::Right),
                Key::Named(NamedKey::ArrowUp) => Some(ArrowKey::Up),
                Key::Named(NamedKey::ArrowDown) => Some(ArrowKey::Down),
                _ => None,
            }
        } else {
            None
        }
    }

    /// The normalized offset for one key press: right/down positive.
    pub fn offset(self) -> Position {
        match self {
            ArrowKey::Left => Position { x: -KEY_STEP, y: 0.0 },
            ArrowKey::Right => Position { x: KEY_STEP, y: 0.0 },
            ArrowKey::Up => Position { x: 0.0, y: -KEY_STEP },
            ArrowKey::Down => Position { x: 0.0, y: KEY_STEP },
        }
    }
}

/// Per-control drag state machine.
#[derive(Debug, Default)]
pub struct DragState {
    dragging: bool,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Enter dragging and report the press position.
    pub fn pointer_down(&mut self, x: f64, y: f64, width: f64, height: f64) -> Position {
        self.dragging = true;
        normalized(x, y, width, height)
    }

    /// Report the move position, or `None` while idle.
    pub fn pointer_move(&mut self, x: f64, y: f64, width: f64, height: f64) -> Option<Position> {
        self.dragging.then(|| normalized(x, y, width, height))
    }

    /// Leave dragging. Returns true when a drag actually ended, i.e. the
    /// caller should treat the interaction as finished.
    pub fn pointer_up(&mut self) -> bool {
        std::mem::replace(&mut self.dragging, false)
    }

    /// Drop an in-flight drag without a finish signal (focus loss,
    /// teardown).
    pub fn cancel(&mut self) {
        self.dragging = false;
    }
}

/// Clamp a widget-local point into normalized [0,1]×[0,1] coordinates.
pub fn normalized(x: f64, y: f64, width: f64, height: f64) -> Position {
    let nx = if width > 0.0 { x / width } else { 0.0 };
    let ny = if height > 0.0 { y / height } else { 0.0 };
    Position {
        x: nx.clamp(0.0, 1.0),
        y: ny.clamp(0.0, 1.0),
    }
}

/// Saturation/value from a plane position: left→right is s 0–100,
/// top→bottom is v 100–0.
pub fn sat_val_at(pos: Position) -> (u8, u8) {
    (
        (pos.x * 100.0).round() as u8,
        ((1.0 - pos.y) * 100.0).round() as u8,
    )
}

/// Hue from a horizontal strip position, 0–360.
pub fn hue_at(x: f64) -> u16 {
    (x.clamp(0.0, 1.0) * 360.0).round() as u16
}

/// Alpha from a horizontal strip position: left transparent, right opaque.
pub fn alpha_at(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_cycle_reports_positions() {
        let mut drag = DragState::new();
        assert!(!drag.is_dragging());

        let pos = drag.pointer_down(50.0, 25.0, 200.0, 100.0);
        assert_eq!(pos, Position { x: 0.25, y: 0.25 });
        assert!(drag.is_dragging());

        let pos = drag.pointer_move(200.0, 100.0, 200.0, 100.0).unwrap();
        assert_eq!(pos, Position { x: 1.0, y: 1.0 });

        assert!(drag.pointer_up());
        assert!(!drag.is_dragging());
        // A second release is not another finished interaction.
        assert!(!drag.pointer_up());
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut drag = DragState::new();
        assert_eq!(drag.pointer_move(10.0, 10.0, 100.0, 100.0), None);
    }

    #[test]
    fn cancel_drops_drag_without_finish() {
        let mut drag = DragState::new();
        drag.pointer_down(0.0, 0.0, 100.0, 100.0);
        drag.cancel();
        assert!(!drag.pointer_up());
    }

    #[test]
    fn positions_clamp_to_unit_square() {
        let pos = normalized(-10.0, 250.0, 200.0, 100.0);
        assert_eq!(pos, Position { x: 0.0, y: 1.0 });
        // Degenerate bounds never divide by zero.
        let pos = normalized(5.0, 5.0, 0.0, 0.0);
        assert_eq!(pos, Position { x: 0.0, y: 0.0 });
    }

    #[test]
    fn plane_corners_map_to_unit_extremes() {
        assert_eq!(sat_val_at(Position { x: 0.0, y: 0.0 }), (0, 100));
        assert_eq!(sat_val_at(Position { x: 1.0, y: 1.0 }), (100, 0));
        assert_eq!(sat_val_at(Position { x: 0.5, y: 0.5 }), (50, 50));
    }

    #[test]
    fn strip_positions_map_to_units() {
        assert_eq!(hue_at(0.0), 0);
        assert_eq!(hue_at(0.5), 180);
        assert_eq!(hue_at(1.0), 360);
        assert_eq!(alpha_at(0.25), 0.25);
        assert_eq!(alpha_at(2.0), 1.0);
    }

    #[test]
    fn arrow_keys_step_by_five_percent() {
        assert_eq!(ArrowKey::Right.offset(), Position { x: 0.05, y: 0.0 });
        assert_eq!(ArrowKey::Left.offset(), Position { x: -0.05, y: 0.0 });
        assert_eq!(ArrowKey::Down.offset(), Position { x: 0.0, y: 0.05 });
        assert_eq!(ArrowKey::Up.offset(), Position { x: 0.0, y: -0.05 });
    }
}
