//! UI Theme - Shared colors and styling constants
//!
//! Centralized color definitions for the portal chrome, landing, and grid.
//! Scenes tint their cards with each project's own theme color.

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Deep background behind every view
pub const BG_COLOR: Color = Color::new(0.05, 0.05, 0.08, 1.0);

/// Card / panel background
pub const PANEL_BG: Color = Color::new(0.10, 0.10, 0.14, 1.0);

/// Card background while hovered
pub const PANEL_HOVER: Color = Color::new(0.14, 0.14, 0.20, 1.0);

/// Panel outline
pub const PANEL_BORDER: Color = Color::new(0.25, 0.25, 0.32, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.9, 0.9, 0.92, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.55, 0.55, 0.62, 1.0);

/// Accent (buttons, visited markers, title)
pub const ACCENT_COLOR: Color = Color::new(0.0, 0.75, 0.9, 1.0);

/// Secondary accent (dice, warnings)
pub const ACCENT_WARM: Color = Color::new(0.95, 0.55, 0.2, 1.0);

/// Full-screen fade overlay color (alpha set per frame)
pub const FADE_COLOR: Color = Color::new(0.0, 0.0, 0.0, 1.0);

// =============================================================================
// Font Sizes
// =============================================================================

/// Big landing title
pub const FONT_SIZE_TITLE: f32 = 48.0;

/// Header/title text size
pub const FONT_SIZE_HEADER: f32 = 22.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 16.0;

/// Small/detail text size
pub const FONT_SIZE_SMALL: f32 = 13.0;

// =============================================================================
// Chrome layout
// =============================================================================

/// Height of the top chrome strip (back control, audio toggle)
pub const CHROME_HEIGHT: f32 = 44.0;

/// Square chrome button size
pub const CHROME_BUTTON: f32 = 32.0;
