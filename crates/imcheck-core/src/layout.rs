//! Layout cursor: vertical flow with `same_line` rows.

use crate::{Rect, Vec2};

/// Per-scope cursor state (window, popup or list box).
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Top-left of the next widget.
    pub cursor: Vec2,
    /// Left edge of the content region.
    pub start_x: f32,
    /// Top edge of the content region.
    pub start_y: f32,
    /// Width of the content region.
    pub width: f32,
    /// Bounding box of the most recently placed item.
    pub last_item: Rect,
    /// Union of everything placed so far (used for auto-sizing).
    pub content_max: Vec2,
    line_max_y: f32,
    same_line: bool,
}

impl Layout {
    pub fn new(start: Vec2, width: f32) -> Self {
        Self {
            cursor:      start,
            start_x:     start.x,
            start_y:     start.y,
            width,
            last_item:   Rect::new(start, start),
            content_max: start,
            line_max_y:  start.y,
            ..Default::default()
        }
    }

    /// Remaining width on the current line.
    pub fn available_width(&self) -> f32 {
        (self.start_x + self.width - self.cursor.x).max(1.0)
    }

    /// Reserve `size` at the cursor and advance. Returns the item's top-left.
    pub fn place(&mut self, size: Vec2, item_spacing: (f32, f32)) -> Vec2 {
        let pos  = self.cursor;
        let rect = Rect::from_min_size(pos, size);
        self.last_item   = rect;
        self.content_max = self.content_max.max(rect.max);
        self.line_max_y  = if self.same_line { self.line_max_y.max(rect.max.y) } else { rect.max.y };

        self.cursor    = Vec2::new(self.start_x, self.line_max_y + item_spacing.1);
        self.same_line = false;
        pos
    }

    /// Put the next item to the right of the previous one.
    /// A negative `spacing` means the default gap.
    pub fn same_line(&mut self, spacing: f32) {
        let spacing = if spacing < 0.0 { 8.0 } else { spacing };
        self.cursor    = Vec2::new(self.last_item.max.x + spacing, self.last_item.min.y);
        self.same_line = true;
    }

    /// Extent of everything placed so far, measured from the region origin.
    pub fn content_size(&self) -> Vec2 {
        Vec2::new(
            (self.content_max.x - self.start_x).max(0.0),
            (self.content_max.y - self.start_y).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SP: (f32, f32) = (8.0, 4.0);

    #[test]
    fn items_stack_vertically() {
        let mut l = Layout::new(Vec2::new(10.0, 10.0), 200.0);
        let a = l.place(Vec2::new(50.0, 20.0), SP);
        let b = l.place(Vec2::new(50.0, 20.0), SP);
        assert_eq!(a, Vec2::new(10.0, 10.0));
        assert_eq!(b, Vec2::new(10.0, 34.0));
    }

    #[test]
    fn same_line_shares_the_row() {
        let mut l = Layout::new(Vec2::ZERO, 200.0);
        l.place(Vec2::new(40.0, 10.0), SP);
        l.same_line(-1.0);
        let b = l.place(Vec2::new(40.0, 30.0), SP);
        assert_eq!(b, Vec2::new(48.0, 0.0));
        // The next row starts under the taller of the two.
        let c = l.place(Vec2::new(10.0, 10.0), SP);
        assert_eq!(c, Vec2::new(0.0, 34.0));
    }

    #[test]
    fn content_size_spans_placed_items() {
        let mut l = Layout::new(Vec2::new(10.0, 20.0), 100.0);
        l.place(Vec2::new(30.0, 10.0), SP);
        l.place(Vec2::new(50.0, 10.0), SP);
        assert_eq!(l.content_size(), Vec2::new(50.0, 24.0));
    }
}
