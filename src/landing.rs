//! Landing page
//!
//! "Roll Your Fate": a dice roll picks a random interface, or the visitor
//! skips straight to the selection grid. First-time visitors (nothing in
//! the visited set yet) also get a short welcome panel.
//!
//! The dice animation is a fixed number of timed ticks. Intermediate faces
//! are presentation only; navigation happens once, when the roll settles.

use macroquad::prelude::*;

use crate::ui::{
    button, draw_rounded_rect, draw_text_centered, draw_wrapped, Rect, UiContext, ACCENT_COLOR, ACCENT_WARM,
    BG_COLOR, FONT_SIZE_CONTENT, FONT_SIZE_HEADER, FONT_SIZE_SMALL, FONT_SIZE_TITLE, PANEL_BG, PANEL_BORDER,
    TEXT_COLOR, TEXT_DIM,
};
use crate::VERSION;

/// Default number of face changes before the dice settles
pub const DEFAULT_DICE_TICKS: u32 = 20;

/// Default seconds between face changes
pub const DEFAULT_DICE_INTERVAL: f32 = 0.08;

/// Default seconds the rolled interface stays named on the landing
pub const DEFAULT_REVEAL_SECS: f32 = 2.1;

/// What one frame of the dice timer produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceEvent {
    /// Not rolling, or between ticks
    Idle,
    /// Show this face (1-6)
    Tick(u8),
    /// Final tick: the caller rolls for real now. Emitted once per roll.
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RollPhase {
    Idle,
    Rolling,
}

/// Dice roll timer
#[derive(Debug, Clone)]
pub struct DiceRoll {
    ticks: u32,
    interval: f32,
    phase: RollPhase,
    ticks_done: u32,
    elapsed: f32,
    face: u8,
}

impl Default for DiceRoll {
    fn default() -> Self {
        Self::new(DEFAULT_DICE_TICKS, DEFAULT_DICE_INTERVAL)
    }
}

impl DiceRoll {
    pub fn new(ticks: u32, interval: f32) -> Self {
        Self {
            ticks: ticks.max(1),
            interval: interval.max(0.0),
            phase: RollPhase::Idle,
            ticks_done: 0,
            elapsed: 0.0,
            face: 1,
        }
    }

    /// Begin a roll. Ignored (returns false) while one is already running.
    pub fn start(&mut self) -> bool {
        if self.phase == RollPhase::Rolling {
            return false;
        }
        self.phase = RollPhase::Rolling;
        self.ticks_done = 0;
        self.elapsed = 0.0;
        true
    }

    pub fn is_rolling(&self) -> bool {
        self.phase == RollPhase::Rolling
    }

    /// Face currently showing
    pub fn face(&self) -> u8 {
        self.face
    }

    /// Show a specific face (the landing pins the outcome after settling)
    pub fn set_face(&mut self, face: u8) {
        self.face = face.clamp(1, 6);
    }

    /// Advance by `dt` seconds. At most one tick fires per call.
    pub fn update(&mut self, dt: f32, mut face_rng: impl FnMut() -> u8) -> DiceEvent {
        if self.phase != RollPhase::Rolling {
            return DiceEvent::Idle;
        }

        self.elapsed += dt;
        if self.elapsed < self.interval {
            return DiceEvent::Idle;
        }
        self.elapsed -= self.interval;
        self.ticks_done += 1;

        if self.ticks_done >= self.ticks {
            self.phase = RollPhase::Idle;
            tracing::debug!(ticks = self.ticks_done, "dice settled");
            return DiceEvent::Settled;
        }

        self.face = face_rng().clamp(1, 6);
        tracing::debug!(tick = self.ticks_done, face = self.face, "dice tick");
        DiceEvent::Tick(self.face)
    }
}

/// Random decorative face from quad-rand
pub fn random_face() -> u8 {
    macroquad::rand::gen_range(1u32, 7u32).min(6) as u8
}

/// Landing view state. Dropped when the visitor leaves the landing, which
/// also stops any roll in progress.
#[derive(Debug, Clone, Default)]
pub struct LandingState {
    pub dice: DiceRoll,
    pub welcome_dismissed: bool,
    /// Name of the interface just rolled, shown until the swap
    pub reveal: Option<String>,
}

impl LandingState {
    pub fn new(dice: DiceRoll) -> Self {
        Self {
            dice,
            welcome_dismissed: false,
            reveal: None,
        }
    }
}

/// What the visitor asked for on the landing this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingAction {
    None,
    Roll,
    Skip,
}

/// Draw the landing page
pub fn draw_landing(rect: Rect, ui: &mut UiContext, state: &mut LandingState, first_visit: bool) -> LandingAction {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, BG_COLOR);

    let mut action = LandingAction::None;
    let show_welcome = first_visit && !state.welcome_dismissed;

    // The welcome panel sits on top; claim its clicks before the page handles any
    let welcome_rect = rect.centered(440.0, 240.0);
    if show_welcome {
        action = handle_welcome_input(welcome_rect, ui, state);
        ui.block_clicks_in(&welcome_rect);
    }

    let column = rect.centered(rect.w.min(640.0), rect.h);
    let mut y = column.y + (column.h * 0.18).max(40.0);

    // === HEADER ===
    draw_text_centered("The Portal", &Rect::new(column.x, y, column.w, 48.0), FONT_SIZE_TITLE, ACCENT_COLOR);
    y += 60.0;
    draw_text_centered(
        "Six ways to see the same work. Let the dice decide.",
        &Rect::new(column.x, y, column.w, 24.0),
        FONT_SIZE_CONTENT,
        TEXT_DIM,
    );
    y += 48.0;

    // === DICE ===
    let die = Rect::new(column.center_x() - 60.0, y, 120.0, 120.0);
    draw_die(die, state.dice.face(), state.dice.is_rolling());
    y += 150.0;

    if let Some(name) = &state.reveal {
        draw_text_centered(name, &Rect::new(column.x, y, column.w, 36.0), FONT_SIZE_TITLE, ACCENT_WARM);
        y += 48.0;
        draw_text_centered("Entering...", &Rect::new(column.x, y, column.w, 24.0), FONT_SIZE_CONTENT, TEXT_DIM);
        draw_footer(rect);
        return LandingAction::None;
    }

    let rolling = state.dice.is_rolling();
    let roll_label = if rolling { "Rolling..." } else { "Roll Your Fate" };
    let roll_rect = Rect::new(column.center_x() - 110.0, y, 220.0, 48.0);
    if button(ui, roll_rect, roll_label, FONT_SIZE_HEADER) && !rolling {
        action = LandingAction::Roll;
    }
    y += 64.0;

    let skip_rect = Rect::new(column.center_x() - 110.0, y, 220.0, 36.0);
    if button(ui, skip_rect, "Skip: choose an interface", FONT_SIZE_SMALL) && !rolling {
        action = LandingAction::Skip;
    }

    draw_footer(rect);

    // Panel drawn last so it covers the page
    if show_welcome {
        draw_welcome_panel(welcome_rect);
        draw_welcome_buttons(welcome_rect, ui);
    }

    action
}

fn draw_footer(rect: Rect) {
    let footer = format!("Poly-Interface Portal v{}  |  Space: roll   S: skip   M: sound", VERSION);
    draw_text_centered(&footer, &Rect::new(rect.x, rect.bottom() - 28.0, rect.w, 20.0), FONT_SIZE_SMALL, TEXT_DIM);
}

/// Pip layout for each face, in a 3x3 grid (col, row)
fn pips(face: u8) -> &'static [(u8, u8)] {
    match face {
        1 => &[(1, 1)],
        2 => &[(0, 0), (2, 2)],
        3 => &[(0, 0), (1, 1), (2, 2)],
        4 => &[(0, 0), (2, 0), (0, 2), (2, 2)],
        5 => &[(0, 0), (2, 0), (1, 1), (0, 2), (2, 2)],
        _ => &[(0, 0), (2, 0), (0, 1), (2, 1), (0, 2), (2, 2)],
    }
}

fn draw_die(rect: Rect, face: u8, rolling: bool) {
    // Wobble while rolling
    let wobble = if rolling { (get_time() as f32 * 40.0).sin() * 4.0 } else { 0.0 };
    let r = Rect::new(rect.x + wobble, rect.y, rect.w, rect.h).snapped();
    draw_rounded_rect(r.x, r.y, r.w, r.h, 16.0, TEXT_COLOR);
    let cell = r.w / 3.0;
    let color = if rolling { ACCENT_WARM } else { BG_COLOR };
    for &(col, row) in pips(face) {
        let cx = r.x + cell * (col as f32 + 0.5);
        let cy = r.y + cell * (row as f32 + 0.5);
        draw_circle(cx, cy, cell * 0.18, color);
    }
}

/// Welcome panel clicks. Drawing happens later, on top.
fn handle_welcome_input(rect: Rect, ui: &mut UiContext, state: &mut LandingState) -> LandingAction {
    let (roll, skip, close) = welcome_button_rects(rect);
    if ui.take_click(&roll) {
        state.welcome_dismissed = true;
        return LandingAction::Roll;
    }
    if ui.take_click(&skip) {
        state.welcome_dismissed = true;
        return LandingAction::Skip;
    }
    if ui.take_click(&close) {
        state.welcome_dismissed = true;
    }
    LandingAction::None
}

fn welcome_button_rects(rect: Rect) -> (Rect, Rect, Rect) {
    let y = rect.bottom() - 56.0;
    (
        Rect::new(rect.x + 24.0, y, 180.0, 36.0),
        Rect::new(rect.right() - 204.0, y, 180.0, 36.0),
        Rect::new(rect.right() - 32.0, rect.y + 8.0, 24.0, 24.0),
    )
}

fn draw_welcome_panel(rect: Rect) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.0, 0.0, 0.0, 0.55));
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 10.0, PANEL_BG);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, PANEL_BORDER);

    draw_text("Welcome, traveller", rect.x + 24.0, rect.y + 40.0, FONT_SIZE_HEADER, ACCENT_COLOR);
    draw_wrapped(
        "Every interface shows the same projects in a different skin. \
         Roll the dice for a random one, or skip and pick from the grid. \
         Interfaces you've seen get a check mark.",
        rect.x + 24.0,
        rect.y + 56.0,
        rect.w - 48.0,
        FONT_SIZE_CONTENT,
        TEXT_COLOR,
    );
}

fn draw_welcome_buttons(rect: Rect, ui: &UiContext) {
    let (roll, skip, close) = welcome_button_rects(rect);
    for (r, label) in [(roll, "Roll the dice"), (skip, "Browse all")] {
        let hovered = ui.mouse.inside(&r);
        draw_rounded_rect(r.x, r.y, r.w, r.h, 6.0, if hovered { ACCENT_COLOR } else { PANEL_BORDER });
        draw_text_centered(label, &r, FONT_SIZE_CONTENT, if hovered { BLACK } else { TEXT_COLOR });
    }
    draw_text_centered("x", &close, FONT_SIZE_CONTENT, TEXT_DIM);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run a started roll to completion with fixed steps, collecting events
    fn run(dice: &mut DiceRoll, dt: f32, max_frames: usize) -> Vec<DiceEvent> {
        let mut face = 0u8;
        (0..max_frames)
            .map(|_| {
                dice.update(dt, || {
                    face = face % 6 + 1;
                    face
                })
            })
            .filter(|e| *e != DiceEvent::Idle)
            .collect()
    }

    #[test]
    fn test_roll_emits_fixed_ticks_then_settles_once() {
        let mut dice = DiceRoll::new(20, 0.08);
        assert!(dice.start());

        let events = run(&mut dice, 0.08, 100);
        assert_eq!(events.len(), 20);
        assert!(events[..19].iter().all(|e| matches!(e, DiceEvent::Tick(_))));
        assert_eq!(events[19], DiceEvent::Settled);
        assert!(!dice.is_rolling());
    }

    #[test]
    fn test_no_tick_before_interval() {
        let mut dice = DiceRoll::new(3, 0.1);
        dice.start();
        assert_eq!(dice.update(0.05, || 3), DiceEvent::Idle);
        assert_eq!(dice.update(0.06, || 3), DiceEvent::Tick(3));
        assert_eq!(dice.face(), 3);
    }

    #[test]
    fn test_idle_without_start() {
        let mut dice = DiceRoll::default();
        assert_eq!(dice.update(10.0, || 1), DiceEvent::Idle);
    }

    #[test]
    fn test_start_ignored_while_rolling() {
        let mut dice = DiceRoll::new(4, 0.1);
        assert!(dice.start());
        dice.update(0.1, || 2);
        assert!(!dice.start());

        // The first roll still settles on schedule
        let events = run(&mut dice, 0.1, 10);
        assert_eq!(events.last(), Some(&DiceEvent::Settled));
        assert_eq!(events.iter().filter(|e| **e == DiceEvent::Settled).count(), 1);

        // And a new one can begin afterwards
        assert!(dice.start());
    }

    #[test]
    fn test_faces_clamped() {
        let mut dice = DiceRoll::new(5, 0.0);
        dice.start();
        assert_eq!(dice.update(0.0, || 9), DiceEvent::Tick(6));
        assert_eq!(dice.update(0.0, || 0), DiceEvent::Tick(1));
    }

    #[test]
    fn test_random_face_in_range() {
        macroquad::rand::srand(5);
        for _ in 0..200 {
            let face = random_face();
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn test_every_face_has_pips() {
        for face in 1..=6u8 {
            assert_eq!(pips(face).len(), face as usize);
        }
    }
}
