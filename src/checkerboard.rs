//! Checkerboard backdrop for transparency previews.

use floem::context::PaintCx;
use floem::kurbo::Rect;
use floem::peniko::Color;
use floem_renderer::Renderer;

use crate::constants;

const BASE: Color = Color::rgb8(252, 252, 252);
const SQUARE: Color = Color::rgb8(224, 224, 224);

/// Paint the alternating-square backdrop into `rect`.
pub(crate) fn paint_checkerboard(cx: &mut PaintCx, rect: Rect) {
    cx.fill(&rect, BASE, 0.0);
    for square in dark_squares(rect, constants::CHECKER_CELL) {
        cx.fill(&square, SQUARE, 0.0);
    }
}

/// The odd-parity squares of a `cell`-sized grid over `rect`, clipped to
/// its edges. The square at the rect's origin is always the base color.
fn dark_squares(rect: Rect, cell: f64) -> Vec<Rect> {
    let cols = (rect.width() / cell).ceil() as usize;
    let rows = (rect.height() / cell).ceil() as usize;
    let mut squares = Vec::with_capacity(cols * rows / 2 + 1);
    for row in 0..rows {
        for col in 0..cols {
            if (row + col) % 2 == 1 {
                let x = rect.x0 + col as f64 * cell;
                let y = rect.y0 + row as f64 * cell;
                squares.push(Rect::new(
                    x,
                    y,
                    (x + cell).min(rect.x1),
                    (y + cell).min(rect.y1),
                ));
            }
        }
    }
    squares
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_alternate_and_clip_to_rect() {
        let rect = Rect::new(0.0, 0.0, 12.0, 7.0);
        let squares = dark_squares(rect, 5.0);
        // 3x2 grid: (1,0), (0,1), (2,1) carry the dark color.
        assert_eq!(squares.len(), 3);
        for sq in &squares {
            assert!(sq.x1 <= rect.x1);
            assert!(sq.y1 <= rect.y1);
        }
        // The origin square stays the base color.
        assert!(!squares.iter().any(|s| s.x0 == rect.x0 && s.y0 == rect.y0));
    }

    #[test]
    fn offset_rect_keeps_its_own_parity() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        let squares = dark_squares(rect, 5.0);
        assert_eq!(squares.len(), 2);
        assert!(squares.iter().all(|s| s.x0 >= rect.x0 && s.y0 >= rect.y0));
    }
}
