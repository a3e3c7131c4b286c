//! Catalog scene: one renderer, six metaphors
//!
//! Each `SceneKind` lays the catalog out differently (graph, dial, desktop
//! icons, panels, vending slots, body map) but shares card drawing and
//! click handling. Projects without a mapping for the scene are skipped.

use macroquad::prelude::*;

use super::{Scene, SceneAction, SceneContext};
use crate::interfaces::SceneKind;
use crate::project::{Project, ProjectCatalog};
use crate::ui::{
    button, draw_rounded_rect, draw_text_centered, draw_wrapped, Rect, UiContext, ACCENT_COLOR, ACCENT_WARM,
    FONT_SIZE_CONTENT, FONT_SIZE_HEADER, FONT_SIZE_SMALL, PANEL_BG, PANEL_BORDER, PANEL_HOVER, TEXT_COLOR, TEXT_DIM,
};

/// Retro desktop "boot" time before the scene is ready
pub const RETRO_BOOT_SECS: f32 = 0.8;

/// FM band shown on the broadcast dial
const DIAL_MIN: f32 = 87.5;
const DIAL_MAX: f32 = 108.0;
/// How close the dial must be to lock onto a station
const TUNE_TOLERANCE: f32 = 0.4;

/// Graph coordinates in the catalog span roughly this range on each axis
const GRAPH_EXTENT: f32 = 300.0;

/// Vending keypad, three rows of two
const KEYPAD_KEYS: [&str; 6] = ["A", "B", "C", "1", "2", "CLR"];
const KEYPAD_W: f32 = 170.0;

const CARD_W: f32 = 220.0;
const CARD_H: f32 = 86.0;
const CARD_GAP: f32 = 16.0;

/// One project as a scene shows it
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntry<'a> {
    pub project: &'a Project,
    pub label: String,
}

/// Two-character slot entry for the vending machine
#[derive(Debug, Clone, Default)]
pub struct Keypad {
    input: String,
}

impl Keypad {
    /// Current entry, or a blank prompt
    pub fn display(&self) -> &str {
        if self.input.is_empty() {
            "_ _"
        } else {
            &self.input
        }
    }

    /// Press a key. Keeps the last two characters; when they spell a
    /// stocked slot the entry clears and that project is returned.
    pub fn press<'a>(&mut self, key: &str, catalog: &'a ProjectCatalog) -> Option<&'a Project> {
        if key.eq_ignore_ascii_case("CLR") {
            self.input.clear();
            return None;
        }
        self.input.push_str(&key.to_ascii_uppercase());
        let excess = self.input.chars().count().saturating_sub(2);
        self.input = self.input.chars().skip(excess).collect();

        let hit = catalog.by_slot(&self.input);
        if hit.is_some() {
            self.input.clear();
        }
        hit
    }
}

pub struct CatalogScene {
    kind: SceneKind,
    /// Remaining warm-up before the scene can draw
    warmup: f32,
    /// Broadcast dial position (MHz)
    dial: f32,
    keypad: Keypad,
    /// Last project vended, highlighted until the next pick
    vended: Option<String>,
}

impl CatalogScene {
    pub fn new(kind: SceneKind) -> Self {
        let warmup = match kind {
            SceneKind::RetroOs => RETRO_BOOT_SECS,
            _ => 0.0,
        };
        Self {
            kind,
            warmup,
            dial: DIAL_MIN,
            keypad: Keypad::default(),
            vended: None,
        }
    }

    /// Projects this scene shows, in catalog order
    pub fn entries<'a>(&self, catalog: &'a ProjectCatalog) -> Vec<SceneEntry<'a>> {
        catalog
            .list()
            .iter()
            .filter_map(|project| {
                project
                    .slot_label(self.kind)
                    .map(|label| SceneEntry { project, label })
            })
            .collect()
    }

    /// What clicking a project does: live projects open, the rest do nothing
    pub fn activate(project: &Project) -> SceneAction {
        match project.launch_url() {
            Some(_) => SceneAction::OpenProject(project.id.clone()),
            None => SceneAction::None,
        }
    }

    /// Move the broadcast dial, clamped to the FM band
    pub fn turn_dial(&mut self, delta: f32) {
        self.dial = (self.dial + delta).clamp(DIAL_MIN, DIAL_MAX);
    }

    fn title(&self) -> &'static str {
        match self.kind {
            SceneKind::NeuralMap => "Neural Map",
            SceneKind::AnatomicalMap => "Anatomy of a Portfolio",
            SceneKind::RetroOs => "PortalOS 95",
            SceneKind::PirateBroadcast => "Pirate Radio",
            SceneKind::ControlRoom => "Control Room",
            SceneKind::VendingMachine => "Vending Machine",
        }
    }

    fn draw_graph(&self, area: Rect, ui: &mut UiContext, ctx: &SceneContext, entries: &[SceneEntry]) -> SceneAction {
        let node_w = 150.0;
        let node_h = 44.0;
        let half_w = ((area.w - node_w) * 0.5).max(0.0);
        let half_h = ((area.h - node_h) * 0.5).max(0.0);

        let node_rect = |project: &Project| -> Option<Rect> {
            let pos = project.mappings.neural_map.as_ref()?.position;
            let cx = area.center_x() + (pos.x / GRAPH_EXTENT).clamp(-1.0, 1.0) * half_w;
            let cy = area.center_y() + (pos.y / GRAPH_EXTENT).clamp(-1.0, 1.0) * half_h;
            Some(Rect::new(cx - node_w * 0.5, cy - node_h * 0.5, node_w, node_h))
        };

        // Edges first so nodes draw on top
        let pulse = 0.35 + 0.25 * (ctx.elapsed * 2.0).sin();
        for entry in entries {
            let Some(from) = node_rect(entry.project) else { continue };
            for neighbour in ctx.catalog.connections_of(&entry.project.id) {
                if let Some(to) = node_rect(neighbour) {
                    let color = Color::new(ACCENT_COLOR.r, ACCENT_COLOR.g, ACCENT_COLOR.b, pulse);
                    draw_line(from.center_x(), from.center_y(), to.center_x(), to.center_y(), 2.0, color);
                }
            }
        }

        let mut action = SceneAction::None;
        for entry in entries {
            if let Some(rect) = node_rect(entry.project) {
                if draw_project_card(ui, rect, entry, false) {
                    action = Self::activate(entry.project);
                }
            }
        }
        action
    }

    fn draw_broadcast(&mut self, area: Rect, ui: &mut UiContext, ctx: &SceneContext) -> SceneAction {
        if ui.mouse.inside(&area) && ui.mouse.scroll != 0.0 {
            self.turn_dial(ui.mouse.scroll.signum() * 0.1);
        }

        // Dial strip
        let dial = area.slice_top(60.0).pad(8.0);
        draw_rectangle(dial.x, dial.y, dial.w, dial.h, PANEL_BG);
        let span = DIAL_MAX - DIAL_MIN;
        for entry in self.entries(ctx.catalog) {
            if let Some(station) = entry.project.mappings.pirate_broadcast {
                let x = dial.x + (station.frequency - DIAL_MIN) / span * dial.w;
                draw_line(x, dial.y + 6.0, x, dial.bottom() - 6.0, 1.0, TEXT_DIM);
            }
        }
        let needle_x = dial.x + (self.dial - DIAL_MIN) / span * dial.w;
        draw_line(needle_x, dial.y, needle_x, dial.bottom(), 3.0, ACCENT_WARM);
        draw_text(
            &format!("{:.1} FM  (scroll to tune)", self.dial),
            dial.x + 8.0,
            dial.bottom() + 20.0,
            FONT_SIZE_SMALL,
            TEXT_DIM,
        );

        let tuned = ctx.catalog.tune(self.dial, TUNE_TOLERANCE);
        let body = area.remaining_after_top(90.0);
        match tuned {
            Some(project) => {
                let entry = SceneEntry {
                    project,
                    label: project.slot_label(SceneKind::PirateBroadcast).unwrap_or_default(),
                };
                let card = body.centered(CARD_W * 1.6, CARD_H * 1.4);
                if draw_project_card(ui, card, &entry, true) {
                    return Self::activate(project);
                }
            }
            None => {
                let noise = if ctx.audio_enabled { "~ static ~" } else { "(static, muted)" };
                draw_text_centered(noise, &body.centered(body.w, 40.0), FONT_SIZE_HEADER, TEXT_DIM);
            }
        }
        SceneAction::None
    }

    fn draw_cards(&self, area: Rect, ui: &mut UiContext, entries: &[SceneEntry]) -> SceneAction {
        let cells = area.grid(entries.len(), CARD_W, CARD_H, CARD_GAP);
        let mut action = SceneAction::None;
        for (entry, rect) in entries.iter().zip(cells) {
            let highlighted = self.vended.as_deref() == Some(entry.project.id.as_str());
            if draw_project_card(ui, rect, entry, highlighted) {
                action = Self::activate(entry.project);
            }
        }
        action
    }

    /// Enter a slot code; a hit is vended (opened if live)
    pub fn press_key(&mut self, key: &str, catalog: &ProjectCatalog) -> SceneAction {
        match self.keypad.press(key, catalog) {
            Some(project) => {
                tracing::debug!(slot = key, project = %project.id, "vended");
                self.vended = Some(project.id.clone());
                Self::activate(project)
            }
            None => SceneAction::None,
        }
    }

    fn draw_vending(&mut self, area: Rect, ui: &mut UiContext, ctx: &SceneContext, entries: &[SceneEntry]) -> SceneAction {
        let shelf = Rect::new(area.x, area.y, (area.w - KEYPAD_W - 16.0).max(0.0), area.h);
        let mut action = self.draw_cards(shelf, ui, entries);

        let panel = Rect::new(area.right() - KEYPAD_W, area.y, KEYPAD_W, 230.0);
        draw_rounded_rect(panel.x, panel.y, panel.w, panel.h, 8.0, PANEL_BG);
        draw_rectangle_lines(panel.x, panel.y, panel.w, panel.h, 1.0, PANEL_BORDER);

        let display = panel.pad(12.0).slice_top(40.0);
        draw_rectangle(display.x, display.y, display.w, display.h, BLACK);
        draw_text_centered(self.keypad.display(), &display, FONT_SIZE_HEADER, ACCENT_WARM);

        // Typed keys work too
        let mut pressed: Vec<String> = Vec::new();
        while let Some(c) = get_char_pressed() {
            if c.is_ascii_alphanumeric() {
                pressed.push(c.to_string());
            }
        }

        let keys = Rect::new(panel.x + 12.0, display.bottom() + 12.0, panel.w - 24.0, panel.h - 76.0);
        for (key, rect) in KEYPAD_KEYS.iter().zip(keys.grid(KEYPAD_KEYS.len(), 66.0, 40.0, 8.0)) {
            if button(ui, rect, key, FONT_SIZE_CONTENT) {
                pressed.push(key.to_string());
            }
        }

        for key in pressed {
            let vended = self.press_key(&key, ctx.catalog);
            if vended != SceneAction::None {
                action = vended;
            }
        }
        action
    }
}

impl Scene for CatalogScene {
    fn kind(&self) -> SceneKind {
        self.kind
    }

    fn poll_ready(&mut self, dt: f32) -> bool {
        self.warmup = (self.warmup - dt).max(0.0);
        self.warmup <= 0.0
    }

    fn draw(&mut self, rect: Rect, ui: &mut UiContext, ctx: &SceneContext) -> SceneAction {
        let rect = rect.pad(24.0);
        draw_text(self.title(), rect.x.round(), (rect.y + 24.0).round(), FONT_SIZE_HEADER, TEXT_COLOR);

        let footer_h = 44.0;
        let body = Rect::new(rect.x, rect.y + 44.0, rect.w, (rect.h - 44.0 - footer_h).max(0.0));
        let entries = self.entries(ctx.catalog);

        let mut action = match self.kind {
            SceneKind::NeuralMap => self.draw_graph(body, ui, ctx, &entries),
            SceneKind::PirateBroadcast => self.draw_broadcast(body, ui, ctx),
            SceneKind::VendingMachine => self.draw_vending(body, ui, ctx, &entries),
            _ => self.draw_cards(body, ui, &entries),
        };

        // Scene-owned navigation
        let footer = Rect::new(rect.x, rect.bottom() - footer_h + 8.0, rect.w, footer_h - 8.0);
        let mut x = footer.x;
        let mut footer_button = |ui: &mut UiContext, label: &str, w: f32| {
            let r = Rect::new(x, footer.y, w, footer.h);
            x += w + 10.0;
            button(ui, r, label, FONT_SIZE_SMALL)
        };
        if self.kind == SceneKind::RetroOs && footer_button(ui, "Start > Shut down", 150.0) {
            action = SceneAction::Back;
        }
        if footer_button(ui, "All interfaces", 130.0) {
            action = SceneAction::EnterSelectionGrid;
        }
        if footer_button(ui, "Roll again", 110.0) {
            action = SceneAction::ReturnToLanding;
        }

        action
    }
}

/// Project card; returns true when clicked
fn draw_project_card(ui: &mut UiContext, rect: Rect, entry: &SceneEntry, highlighted: bool) -> bool {
    let rect = rect.snapped();
    let hovered = ui.mouse.inside(&rect);
    let clicked = ui.take_click(&rect);

    let accent = entry
        .project
        .theme
        .rgb()
        .map(|(r, g, b)| Color::new(r, g, b, 1.0))
        .unwrap_or(ACCENT_COLOR);

    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 6.0, if hovered { PANEL_HOVER } else { PANEL_BG });
    draw_rectangle(rect.x, rect.y, 4.0, rect.h, accent);
    let border = if highlighted || hovered { accent } else { PANEL_BORDER };
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, if highlighted { 2.0 } else { 1.0 }, border);

    let text_x = rect.x + 12.0;
    draw_text(&entry.label, text_x, rect.y + 18.0, FONT_SIZE_SMALL, accent);
    draw_text(&entry.project.name, text_x, rect.y + 38.0, FONT_SIZE_CONTENT, TEXT_COLOR);
    if entry.project.is_live() {
        draw_wrapped(&entry.project.description, text_x, rect.y + 44.0, rect.w - 24.0, FONT_SIZE_SMALL, TEXT_DIM);
    } else {
        draw_text(entry.project.status.label(), text_x, rect.y + 60.0, FONT_SIZE_SMALL, ACCENT_WARM);
    }

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ProjectCatalog {
        ProjectCatalog::builtin().unwrap()
    }

    #[test]
    fn test_entries_follow_catalog_order() {
        let catalog = catalog();
        let scene = CatalogScene::new(SceneKind::VendingMachine);
        let ids: Vec<&str> = scene.entries(&catalog).iter().map(|e| e.project.id.as_str()).collect();
        let all: Vec<&str> = catalog.list().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, all);
        assert_eq!(scene.entries(&catalog)[0].label, "A1");
    }

    #[test]
    fn test_projects_without_mapping_are_skipped() {
        let catalog = ProjectCatalog::from_ron(
            r##"[
                (id: "a", name: "A", url: "https://a.example", description: "", status: Live,
                 theme: (primary_color: "#112233", icon: ""),
                 mappings: (control_room: Some((panel_type: Monitor)))),
                (id: "b", name: "B", url: "https://b.example", description: "", status: Live,
                 theme: (primary_color: "#112233", icon: "")),
            ]"##,
        )
        .unwrap();
        let scene = CatalogScene::new(SceneKind::ControlRoom);
        let entries = scene.entries(&catalog);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].project.id, "a");

        assert!(CatalogScene::new(SceneKind::RetroOs).entries(&catalog).is_empty());
    }

    #[test]
    fn test_activate_live_and_coming_soon() {
        let catalog = catalog();
        let live = catalog.get_by_id("lokitunes").unwrap();
        assert_eq!(CatalogScene::activate(live), SceneAction::OpenProject("lokitunes".into()));

        let soon = catalog.get_by_id("podcast").unwrap();
        assert_eq!(CatalogScene::activate(soon), SceneAction::None);
    }

    #[test]
    fn test_retro_boot_stays_pending_until_warm() {
        let mut scene = CatalogScene::new(SceneKind::RetroOs);
        assert!(!scene.poll_ready(0.0));
        assert!(!scene.poll_ready(RETRO_BOOT_SECS * 0.5));
        assert!(scene.poll_ready(RETRO_BOOT_SECS));
        assert!(scene.poll_ready(0.0));
    }

    #[test]
    fn test_other_scenes_ready_immediately() {
        for kind in SceneKind::ALL.into_iter().filter(|k| *k != SceneKind::RetroOs) {
            let mut scene = CatalogScene::new(kind);
            assert!(scene.poll_ready(0.0), "{:?}", kind);
            assert_eq!(scene.kind(), kind);
        }
    }

    #[test]
    fn test_dial_clamps_to_band() {
        let mut scene = CatalogScene::new(SceneKind::PirateBroadcast);
        scene.turn_dial(-5.0);
        assert_eq!(scene.dial, DIAL_MIN);
        scene.turn_dial(100.0);
        assert_eq!(scene.dial, DIAL_MAX);
    }

    #[test]
    fn test_keypad_keeps_last_two_keys() {
        let catalog = catalog();
        let mut keypad = Keypad::default();
        assert_eq!(keypad.display(), "_ _");
        assert!(keypad.press("C", &catalog).is_none());
        assert!(keypad.press("A", &catalog).is_none());
        assert_eq!(keypad.display(), "CA");

        let hit = keypad.press("2", &catalog).unwrap();
        assert_eq!(hit.mappings.vending_machine.as_ref().unwrap().slot, "A2");
        assert_eq!(keypad.display(), "_ _");
    }

    #[test]
    fn test_keypad_clear_and_lowercase() {
        let catalog = catalog();
        let mut keypad = Keypad::default();
        keypad.press("b", &catalog);
        keypad.press("CLR", &catalog);
        assert_eq!(keypad.display(), "_ _");

        keypad.press("b", &catalog);
        assert_eq!(keypad.press("2", &catalog).map(|p| p.id.as_str()), Some("bountyhunter"));
    }

    #[test]
    fn test_vending_a_slot_activates_its_project() {
        let catalog = catalog();
        let mut scene = CatalogScene::new(SceneKind::VendingMachine);
        let stocked = catalog
            .list()
            .iter()
            .find(|p| p.mappings.vending_machine.as_ref().map(|v| v.slot.as_str()) == Some("B2"))
            .unwrap();

        assert_eq!(scene.press_key("B", &catalog), SceneAction::None);
        assert_eq!(scene.press_key("2", &catalog), CatalogScene::activate(stocked));
        assert_eq!(scene.vended.as_deref(), Some(stocked.id.as_str()));

        // Unknown code vends nothing
        assert_eq!(scene.press_key("Z", &catalog), SceneAction::None);
        assert_eq!(scene.press_key("9", &catalog), SceneAction::None);
    }
}
