//! Centralized Action Registry
//!
//! Keyboard shortcuts for the portal, with per-view enable conditions.
//! Each action may carry an alternate binding (Esc and Backspace both go back).
//!
//! # Example
//! ```ignore
//! let registry = portal_actions();
//! let ctx = ActionContext { view: ActionView::Landing, ..Default::default() };
//!
//! // In the frame loop:
//! for id in registry.process_triggers(&ctx) {
//!     // dispatch on id
//! }
//! ```

use macroquad::prelude::*;
use std::collections::HashMap;

/// A bare-key shortcut. Never fires while a modifier is held, so browser
/// and OS combos (Ctrl+S, Cmd+M) pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub key: KeyCode,
}

impl Shortcut {
    pub fn key(key: KeyCode) -> Self {
        Self { key }
    }

    /// Check if this shortcut is currently pressed
    pub fn is_pressed(&self) -> bool {
        if !is_key_pressed(self.key) {
            return false;
        }

        let modifier_down = [
            KeyCode::LeftControl,
            KeyCode::RightControl,
            KeyCode::LeftSuper,
            KeyCode::RightSuper,
            KeyCode::LeftAlt,
            KeyCode::RightAlt,
        ]
        .into_iter()
        .any(is_key_down);

        !modifier_down
    }

    /// Format shortcut for display (e.g., "Esc")
    pub fn display(&self) -> &'static str {
        key_name(self.key)
    }
}

/// Get a human-readable name for a key
fn key_name(key: KeyCode) -> &'static str {
    match key {
        KeyCode::M => "M",
        KeyCode::S => "S",
        KeyCode::Key1 => "1",
        KeyCode::Key2 => "2",
        KeyCode::Key3 => "3",
        KeyCode::Key4 => "4",
        KeyCode::Key5 => "5",
        KeyCode::Key6 => "6",
        KeyCode::Key7 => "7",
        KeyCode::Key8 => "8",
        KeyCode::Key9 => "9",
        KeyCode::Escape => "Esc",
        KeyCode::Enter => "Enter",
        KeyCode::Space => "Space",
        KeyCode::Backspace => "Backspace",
        _ => "?",
    }
}

/// Which top-level view is showing (for enable conditions)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActionView {
    #[default]
    Landing,
    SelectionGrid,
    Scene,
}

/// Context for checking action enable/disable conditions
#[derive(Debug, Clone, Default)]
pub struct ActionContext {
    pub view: ActionView,
    /// Dice animation running (roll/skip are ignored until it settles)
    pub rolling: bool,
    /// Number of entries in the selection grid
    pub grid_len: usize,
}

/// Type alias for enable condition functions
type EnableFn = fn(&ActionContext) -> bool;

/// Always enabled
fn always_enabled(_: &ActionContext) -> bool {
    true
}

/// A registered action
#[derive(Clone)]
pub struct Action {
    /// Unique identifier (e.g., "nav.back", "landing.roll")
    pub id: &'static str,
    /// Human-readable label
    pub label: &'static str,
    pub shortcut: Option<Shortcut>,
    /// Second binding for the same action
    pub alternate: Option<Shortcut>,
    /// Status bar tip / tooltip
    pub status_tip: &'static str,
    /// Function to check if action is enabled
    enabled_fn: EnableFn,
}

impl Action {
    /// Create a new action with the given ID
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            label: "",
            shortcut: None,
            alternate: None,
            status_tip: "",
            enabled_fn: always_enabled,
        }
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    pub fn alternate(mut self, shortcut: Shortcut) -> Self {
        self.alternate = Some(shortcut);
        self
    }

    pub fn status_tip(mut self, tip: &'static str) -> Self {
        self.status_tip = tip;
        self
    }

    pub fn enabled_when(mut self, f: EnableFn) -> Self {
        self.enabled_fn = f;
        self
    }

    pub fn is_enabled(&self, ctx: &ActionContext) -> bool {
        (self.enabled_fn)(ctx)
    }

    /// Check if either binding is pressed and the action is enabled
    pub fn is_triggered(&self, ctx: &ActionContext) -> bool {
        if !self.is_enabled(ctx) {
            return false;
        }
        self.shortcut.iter().chain(self.alternate.iter()).any(|s| s.is_pressed())
    }

    /// Get tooltip with shortcut hints
    pub fn tooltip(&self) -> String {
        let text = if self.status_tip.is_empty() { self.label } else { self.status_tip };
        match (&self.shortcut, &self.alternate) {
            (Some(primary), Some(alt)) => format!("{} ({} / {})", text, primary.display(), alt.display()),
            (Some(primary), None) => format!("{} ({})", text, primary.display()),
            _ => text.to_string(),
        }
    }
}

/// Central registry for all actions
pub struct ActionRegistry {
    actions: HashMap<&'static str, Action>,
    /// Registration order, so triggers dispatch deterministically
    order: Vec<&'static str>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register an action (re-registering an id replaces it)
    pub fn register(&mut self, action: Action) {
        if !self.actions.contains_key(action.id) {
            self.order.push(action.id);
        }
        self.actions.insert(action.id, action);
    }

    pub fn is_enabled(&self, id: &str, ctx: &ActionContext) -> bool {
        self.actions.get(id).map_or(false, |a| a.is_enabled(ctx))
    }

    pub fn tooltip(&self, id: &str) -> String {
        self.actions.get(id).map_or_else(String::new, |a| a.tooltip())
    }

    /// Process all triggered actions this frame, returning their IDs
    pub fn process_triggers(&self, ctx: &ActionContext) -> Vec<&'static str> {
        self.order
            .iter()
            .filter_map(|id| self.actions.get(id))
            .filter(|a| a.is_triggered(ctx))
            .map(|a| a.id)
            .collect()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Portal actions
// ============================================================================

pub const ACTION_BACK: &str = "nav.back";
pub const ACTION_AUDIO: &str = "nav.audio";
pub const ACTION_ROLL: &str = "landing.roll";
pub const ACTION_SKIP: &str = "landing.skip";

/// Grid pick action ids, one per digit key 1-9
pub const GRID_PICK_ACTIONS: [&str; 9] = [
    "grid.pick.1",
    "grid.pick.2",
    "grid.pick.3",
    "grid.pick.4",
    "grid.pick.5",
    "grid.pick.6",
    "grid.pick.7",
    "grid.pick.8",
    "grid.pick.9",
];

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

/// Index into the grid for a pick action id (`grid.pick.3` is entry 2)
pub fn grid_pick_index(id: &str) -> Option<usize> {
    GRID_PICK_ACTIONS.iter().position(|a| *a == id)
}

/// Build the portal's keyboard map
pub fn portal_actions() -> ActionRegistry {
    let mut registry = ActionRegistry::new();

    registry.register(
        Action::new(ACTION_BACK)
            .label("Back")
            .shortcut(Shortcut::key(KeyCode::Escape))
            .alternate(Shortcut::key(KeyCode::Backspace))
            .status_tip("Go back")
            .enabled_when(|ctx| ctx.view == ActionView::Scene),
    );
    registry.register(
        Action::new(ACTION_AUDIO)
            .label("Audio")
            .shortcut(Shortcut::key(KeyCode::M))
            .status_tip("Toggle sound"),
    );
    registry.register(
        Action::new(ACTION_ROLL)
            .label("Roll")
            .shortcut(Shortcut::key(KeyCode::Space))
            .alternate(Shortcut::key(KeyCode::Enter))
            .status_tip("Roll your fate")
            .enabled_when(|ctx| ctx.view == ActionView::Landing && !ctx.rolling),
    );
    registry.register(
        Action::new(ACTION_SKIP)
            .label("Skip")
            .shortcut(Shortcut::key(KeyCode::S))
            .status_tip("Choose an interface yourself")
            .enabled_when(|ctx| ctx.view == ActionView::Landing && !ctx.rolling),
    );

    let pick_enabled: [EnableFn; 9] = [
        |ctx| ctx.view == ActionView::SelectionGrid && ctx.grid_len > 0,
        |ctx| ctx.view == ActionView::SelectionGrid && ctx.grid_len > 1,
        |ctx| ctx.view == ActionView::SelectionGrid && ctx.grid_len > 2,
        |ctx| ctx.view == ActionView::SelectionGrid && ctx.grid_len > 3,
        |ctx| ctx.view == ActionView::SelectionGrid && ctx.grid_len > 4,
        |ctx| ctx.view == ActionView::SelectionGrid && ctx.grid_len > 5,
        |ctx| ctx.view == ActionView::SelectionGrid && ctx.grid_len > 6,
        |ctx| ctx.view == ActionView::SelectionGrid && ctx.grid_len > 7,
        |ctx| ctx.view == ActionView::SelectionGrid && ctx.grid_len > 8,
    ];
    for ((id, key), enabled) in GRID_PICK_ACTIONS.into_iter().zip(DIGIT_KEYS).zip(pick_enabled) {
        registry.register(
            Action::new(id)
                .label("Pick")
                .shortcut(Shortcut::key(key))
                .enabled_when(enabled),
        );
    }

    registry
}
