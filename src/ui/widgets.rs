//! Basic UI widgets

use macroquad::prelude::*;

use super::{Rect, UiContext, ACCENT_COLOR, PANEL_BG, PANEL_BORDER, PANEL_HOVER, TEXT_COLOR, TEXT_DIM};

/// Text button, returns true if clicked
pub fn button(ctx: &mut UiContext, rect: Rect, label: &str, font_size: f32) -> bool {
    let clicked = ctx.take_click(&rect.snapped());
    draw_button(ctx, rect, label, font_size, false);
    clicked
}

/// Button visuals only (accent fill when active). For controls whose
/// click was already taken earlier in the frame.
pub fn draw_button(ctx: &UiContext, rect: Rect, label: &str, font_size: f32, is_active: bool) {
    let rect = rect.snapped();
    let hovered = ctx.mouse.inside(&rect);
    let pressed = ctx.mouse.clicking(&rect);

    let corner_radius = 6.0;
    let fill = if is_active {
        ACCENT_COLOR
    } else if pressed {
        Color::from_rgba(60, 60, 76, 255)
    } else if hovered {
        PANEL_HOVER
    } else {
        PANEL_BG
    };
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, corner_radius, fill);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, if hovered { ACCENT_COLOR } else { PANEL_BORDER });

    let text_color = if is_active { BLACK } else { TEXT_COLOR };
    draw_text_centered(label, &rect, font_size, text_color);
}

/// Draw text centered in a rect (integer pixels for crisp rendering)
pub fn draw_text_centered(text: &str, rect: &Rect, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let x = (rect.center_x() - dims.width * 0.5).round();
    let y = (rect.center_y() + dims.offset_y * 0.5).round();
    draw_text(text, x, y, font_size, color);
}

/// Draw wrapped lines starting at `(x, y)`. Returns the y below the last line.
pub fn draw_wrapped(text: &str, x: f32, y: f32, max_width: f32, font_size: f32, color: Color) -> f32 {
    let line_height = (font_size * 1.35).round();
    let mut y = y;
    for line in wrap_text(text, font_size, max_width) {
        draw_text(&line, x.round(), (y + font_size).round(), font_size, color);
        y += line_height;
    }
    y
}

/// Wrap text to fit within a given pixel width
/// Returns a vector of lines that fit within max_width
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    // First split by explicit newlines to preserve paragraph breaks
    for paragraph in text.split('\n') {
        let mut current_line = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current_line, word)
            };

            // Approximate width: measure_text needs a GL context and is slow per word
            let width = candidate.chars().count() as f32 * font_size * 0.55;

            if width <= max_width || current_line.is_empty() {
                current_line = candidate;
            } else {
                lines.push(std::mem::take(&mut current_line));
                current_line = word.to_string();
            }
        }

        lines.push(current_line);
    }

    lines
}

/// Draw the pending tooltip, if any (call last in the frame)
pub fn draw_tooltip(ctx: &UiContext) {
    let Some((text, x, y)) = ctx.tooltip() else {
        return;
    };
    let font_size = 14.0;
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let w = dims.width + 12.0;
    let h = 22.0;
    // Keep inside the window
    let tx = (x + 12.0).min(screen_width() - w - 4.0).max(4.0).round();
    let ty = (y + 18.0).min(screen_height() - h - 4.0).round();
    draw_rectangle(tx, ty, w, h, PANEL_BG);
    draw_rectangle_lines(tx, ty, w, h, 1.0, PANEL_BORDER);
    draw_text(text, tx + 6.0, ty + 15.0, font_size, TEXT_DIM);
}

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    let r = r.min(w * 0.5).min(h * 0.5);
    // Main body
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    // Corners (circles)
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}
