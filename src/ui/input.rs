//! Input state for UI interaction

use macroquad::prelude::*;

use super::Rect;

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool,  // Just pressed this frame
    pub left_released: bool, // Just released this frame
    pub scroll: f32,         // Scroll wheel delta
}

impl MouseState {
    /// Sample macroquad's input for this frame
    pub fn capture() -> Self {
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            scroll: mouse_wheel().1,
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse is clicking inside a rect
    pub fn clicking(&self, rect: &Rect) -> bool {
        self.left_down && rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// UI context passed through the frame
#[derive(Debug, Default)]
pub struct UiContext {
    pub mouse: MouseState,
    /// Pending tooltip text and anchor, drawn last
    tooltip: Option<(String, f32, f32)>,
    /// Set once a widget has consumed this frame's click
    click_consumed: bool,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
        self.tooltip = None;
        self.click_consumed = false;
    }

    /// Click inside `rect` that no earlier widget already claimed.
    /// Chrome is drawn on top of scenes but handled first, so overlapping
    /// controls don't both fire.
    pub fn take_click(&mut self, rect: &Rect) -> bool {
        if self.click_consumed || !self.mouse.clicked(rect) {
            return false;
        }
        self.click_consumed = true;
        true
    }

    /// Claim the click for a region without acting on it (blocks widgets below)
    pub fn block_clicks_in(&mut self, rect: &Rect) {
        if self.mouse.clicked(rect) {
            self.click_consumed = true;
        }
    }

    pub fn set_tooltip(&mut self, text: &str, x: f32, y: f32) {
        self.tooltip = Some((text.to_string(), x, y));
    }

    pub fn tooltip(&self) -> Option<(&str, f32, f32)> {
        self.tooltip.as_ref().map(|(t, x, y)| (t.as_str(), *x, *y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_at(x: f32, y: f32) -> MouseState {
        MouseState {
            x,
            y,
            left_down: true,
            left_pressed: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_click_is_taken_once() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(click_at(10.0, 10.0));
        let button = Rect::new(0.0, 0.0, 20.0, 20.0);

        assert!(ctx.take_click(&button));
        assert!(!ctx.take_click(&button));

        ctx.begin_frame(click_at(10.0, 10.0));
        assert!(ctx.take_click(&button));
    }

    #[test]
    fn test_blocked_region_swallows_click() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(click_at(5.0, 5.0));
        ctx.block_clicks_in(&Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(!ctx.take_click(&Rect::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn test_click_outside_is_ignored() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(click_at(50.0, 50.0));
        assert!(!ctx.take_click(&Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(ctx.take_click(&Rect::new(40.0, 40.0, 20.0, 20.0)));
    }
}
