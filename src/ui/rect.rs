//! Rectangle type for UI layout

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create from screen dimensions
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    /// Check if point is inside
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by padding on all sides
    pub fn pad(&self, padding: f32) -> Self {
        Self::new(
            self.x + padding,
            self.y + padding,
            (self.w - padding * 2.0).max(0.0),
            (self.h - padding * 2.0).max(0.0),
        )
    }

    /// A `w` x `h` rect centered inside this one (clamped to fit)
    pub fn centered(&self, w: f32, h: f32) -> Self {
        let w = w.min(self.w);
        let h = h.min(self.h);
        Self::new(
            self.x + (self.w - w) * 0.5,
            self.y + (self.h - h) * 0.5,
            w,
            h,
        )
    }

    /// Get a horizontal slice (for toolbars, status bars)
    pub fn slice_top(&self, height: f32) -> Self {
        Self::new(self.x, self.y, self.w, height.min(self.h))
    }

    /// Get remaining area after slicing top
    pub fn remaining_after_top(&self, height: f32) -> Self {
        let h = height.min(self.h);
        Self::new(self.x, self.y + h, self.w, self.h - h)
    }

    /// Same rect with origin rounded to whole pixels (crisp text and lines)
    pub fn snapped(&self) -> Self {
        Self::new(self.x.round(), self.y.round(), self.w.round(), self.h.round())
    }

    /// Lay out `count` cells row-major in columns of at most `cell_w` wide.
    /// Column count adapts to the available width (at least one).
    pub fn grid(&self, count: usize, cell_w: f32, cell_h: f32, gap: f32) -> Vec<Rect> {
        let cols = (((self.w + gap) / (cell_w + gap)).floor() as usize).max(1);
        let used_w = cols as f32 * cell_w + (cols.saturating_sub(1)) as f32 * gap;
        let left = self.x + ((self.w - used_w) * 0.5).max(0.0);
        (0..count)
            .map(|i| {
                let col = i % cols;
                let row = i / cols;
                Rect::new(
                    left + col as f32 * (cell_w + gap),
                    self.y + row as f32 * (cell_h + gap),
                    cell_w,
                    cell_h,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(50.0, 40.0));
        assert!(!r.contains(5.0, 40.0));
        assert!(!r.contains(50.0, 100.0));
    }

    #[test]
    fn test_centered_clamps() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        let c = r.centered(40.0, 20.0);
        assert_eq!(c, Rect::new(30.0, 15.0, 40.0, 20.0));

        let big = r.centered(400.0, 400.0);
        assert_eq!(big, r);
    }

    #[test]
    fn test_grid_wraps_rows() {
        let r = Rect::new(0.0, 0.0, 320.0, 400.0);
        let cells = r.grid(5, 100.0, 50.0, 10.0);
        assert_eq!(cells.len(), 5);
        // 320 fits three 100px columns with 10px gaps
        assert!((cells[0].y - cells[2].y).abs() < 0.001);
        assert!((cells[3].y - 60.0).abs() < 0.001);
        assert!((cells[3].x - cells[0].x).abs() < 0.001);
    }

    #[test]
    fn test_grid_narrow_keeps_one_column() {
        let r = Rect::new(0.0, 0.0, 50.0, 400.0);
        let cells = r.grid(3, 100.0, 40.0, 8.0);
        assert!(cells.iter().all(|c| (c.x - cells[0].x).abs() < 0.001));
        assert!((cells[2].y - 96.0).abs() < 0.001);
    }
}
