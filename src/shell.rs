//! Shell / router
//!
//! Reads the navigation store each frame and shows exactly one of the
//! landing, the selection grid, or the active scene, plus the chrome
//! (back control, audio toggle). Everything the visitor does ends up as a
//! call on `NavigationStore`; the shell itself holds only presentation
//! state (transition, loading slot, landing dice).

use macroquad::prelude::*;

use crate::interfaces::{InterfaceDescriptor, InterfaceId, InterfaceRegistry};
use crate::landing::{draw_landing, random_face, DiceEvent, DiceRoll, LandingAction, LandingState};
use crate::navigation::{CurrentView, NavigationSource, NavigationStore, Persistence};
use crate::project::ProjectCatalog;
use crate::scenes::{open_url, Scene, SceneAction, SceneContext};
use crate::selection::{draw_selection_grid, grid_cards};
use crate::ui::{
    draw_button, draw_text_centered, draw_tooltip, grid_pick_index, portal_actions, ActionContext, ActionRegistry,
    ActionView, Rect, UiContext, ACCENT_WARM, BG_COLOR, CHROME_BUTTON, CHROME_HEIGHT, FADE_COLOR,
    FONT_SIZE_CONTENT, FONT_SIZE_SMALL, PANEL_BG, PANEL_BORDER, TEXT_COLOR, TEXT_DIM, ACTION_AUDIO, ACTION_BACK,
    ACTION_ROLL, ACTION_SKIP,
};

/// Default fade duration for each half of a view change
pub const DEFAULT_TRANSITION_SECS: f32 = 0.15;

// ─────────────────────────────────────────────────────────────────────────────
// View resolution
// ─────────────────────────────────────────────────────────────────────────────

/// The one thing the shell renders
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShellView<'a> {
    Landing,
    SelectionGrid,
    Scene(&'a InterfaceDescriptor),
}

/// Recovered render-time conditions. Logged, never shown to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShellFault {
    #[error("scene id {0} is not in the interface registry")]
    UnknownSceneId(InterfaceId),
}

/// Resolve a view against the registry, reporting stale ids
pub fn resolve(view: CurrentView, registry: &InterfaceRegistry) -> Result<ShellView<'_>, ShellFault> {
    match view {
        CurrentView::Landing => Ok(ShellView::Landing),
        CurrentView::SelectionGrid => Ok(ShellView::SelectionGrid),
        CurrentView::ActiveScene(id) => registry
            .get_by_id(id)
            .map(ShellView::Scene)
            .ok_or(ShellFault::UnknownSceneId(id)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading boundary
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Renderer still loading; the shell draws a placeholder
    Pending,
    Ready,
}

/// The mounted scene. Dropping the slot tears the scene down.
pub struct SceneSlot {
    id: InterfaceId,
    scene: Box<dyn Scene>,
    state: LoadState,
    /// Seconds since the scene became ready
    elapsed: f32,
}

impl SceneSlot {
    /// Instantiate the descriptor's renderer
    pub fn mount(descriptor: &InterfaceDescriptor) -> Self {
        tracing::debug!(id = %descriptor.id, slug = %descriptor.slug, "mounting scene");
        Self {
            id: descriptor.id,
            scene: descriptor.renderer.instantiate(),
            state: LoadState::Pending,
            elapsed: 0.0,
        }
    }

    pub fn id(&self) -> InterfaceId {
        self.id
    }

    /// Advance loading; once ready, stays ready
    pub fn poll(&mut self, dt: f32) -> LoadState {
        match self.state {
            LoadState::Pending => {
                if self.scene.poll_ready(dt) {
                    tracing::debug!(id = %self.id, kind = ?self.scene.kind(), "scene ready");
                    self.state = LoadState::Ready;
                }
            }
            LoadState::Ready => self.elapsed += dt,
        }
        self.state
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transition
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum FadePhase {
    Idle,
    /// Old view held on screen, unfaded; seconds remaining
    Holding(f32),
    /// Old view fading out; seconds elapsed
    Exiting(f32),
    /// New view fading in; seconds elapsed
    Entering(f32),
}

/// What a transition step asks of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    None,
    /// Exit finished: start showing the store's current view
    Swap,
}

/// Fade-out / fade-in sequencing keyed on view changes.
/// Presentation only: the store has already transitioned.
#[derive(Debug, Clone)]
pub struct Transition {
    secs: f32,
    phase: FadePhase,
    seen_view: CurrentView,
    /// Hold armed for the next view change
    pending_hold: f32,
}

impl Transition {
    pub fn new(secs: f32, view: CurrentView) -> Self {
        Self {
            secs: secs.max(0.0),
            phase: FadePhase::Idle,
            seen_view: view,
            pending_hold: 0.0,
        }
    }

    /// Keep the old view up for `secs` before the next view change starts fading
    pub fn hold_next(&mut self, secs: f32) {
        self.pending_hold = secs.max(0.0);
    }

    /// Note the store's current view. A change starts (or reverses into) an exit;
    /// mutations that keep the view (audio, visited set) do not fade.
    /// Returns the step to apply right away: with a zero duration the swap is immediate.
    pub fn observe(&mut self, view: CurrentView) -> TransitionStep {
        if view == self.seen_view {
            return TransitionStep::None;
        }
        self.seen_view = view;
        let hold = std::mem::take(&mut self.pending_hold);

        if self.phase == FadePhase::Idle && hold > 0.0 {
            self.phase = FadePhase::Holding(hold);
            return TransitionStep::None;
        }
        if matches!(self.phase, FadePhase::Holding(_)) {
            return TransitionStep::None;
        }
        if self.secs <= 0.0 {
            return TransitionStep::Swap;
        }
        self.phase = match self.phase {
            FadePhase::Idle | FadePhase::Holding(_) => FadePhase::Exiting(0.0),
            FadePhase::Exiting(t) => FadePhase::Exiting(t),
            // Reverse from the current darkness rather than jumping
            FadePhase::Entering(t) => FadePhase::Exiting((self.secs - t).max(0.0)),
        };
        TransitionStep::None
    }

    pub fn update(&mut self, dt: f32) -> TransitionStep {
        match self.phase {
            FadePhase::Idle => TransitionStep::None,
            FadePhase::Holding(left) => {
                let left = left - dt;
                if left > 0.0 {
                    self.phase = FadePhase::Holding(left);
                    TransitionStep::None
                } else if self.secs <= 0.0 {
                    self.phase = FadePhase::Idle;
                    TransitionStep::Swap
                } else {
                    self.phase = FadePhase::Exiting(0.0);
                    TransitionStep::None
                }
            }
            FadePhase::Exiting(t) => {
                let t = t + dt;
                if t >= self.secs {
                    self.phase = FadePhase::Entering(0.0);
                    TransitionStep::Swap
                } else {
                    self.phase = FadePhase::Exiting(t);
                    TransitionStep::None
                }
            }
            FadePhase::Entering(t) => {
                let t = t + dt;
                self.phase = if t >= self.secs { FadePhase::Idle } else { FadePhase::Entering(t) };
                TransitionStep::None
            }
        }
    }

    /// Darkness of the fade overlay (0 = clear, 1 = black)
    pub fn overlay_alpha(&self) -> f32 {
        if self.secs <= 0.0 {
            return 0.0;
        }
        match self.phase {
            FadePhase::Idle | FadePhase::Holding(_) => 0.0,
            FadePhase::Exiting(t) => (t / self.secs).clamp(0.0, 1.0),
            FadePhase::Entering(t) => (1.0 - t / self.secs).clamp(0.0, 1.0),
        }
    }

    /// The outgoing view is not interactive
    pub fn blocks_input(&self) -> bool {
        matches!(self.phase, FadePhase::Holding(_) | FadePhase::Exiting(_))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scene callbacks
// ─────────────────────────────────────────────────────────────────────────────

/// Apply a scene's request to the store. Returns a url to open, if any.
pub fn apply_scene_action(action: SceneAction, store: &mut NavigationStore, catalog: &ProjectCatalog) -> Option<String> {
    match action {
        SceneAction::None => None,
        SceneAction::OpenProject(id) => match catalog.get_by_id(&id) {
            Some(project) => project.launch_url().map(str::to_string),
            None => {
                tracing::debug!(%id, "scene referenced a missing project");
                None
            }
        },
        SceneAction::EnterSelectionGrid => {
            store.enter_selection_grid();
            None
        }
        SceneAction::ReturnToLanding => {
            store.return_to_landing();
            None
        }
        SceneAction::Back => {
            store.go_back();
            None
        }
    }
}

/// Dice face shown once the roll lands on `id`
pub fn face_for(id: InterfaceId) -> u8 {
    (id.0.saturating_sub(1) % 6 + 1) as u8
}

// ─────────────────────────────────────────────────────────────────────────────
// Shell
// ─────────────────────────────────────────────────────────────────────────────

pub struct Shell {
    /// View on screen; lags the store while the exit fade runs
    shown: CurrentView,
    transition: Transition,
    slot: Option<SceneSlot>,
    landing: Option<LandingState>,
    /// Template for each new landing's dice
    dice: DiceRoll,
    /// How long a rolled result stays up before the scene fades in
    reveal_secs: f32,
    actions: ActionRegistry,
    /// Last stale id reported, so it's logged once rather than every frame
    reported_fault: Option<ShellFault>,
    warned_memory_only: bool,
}

impl Shell {
    pub fn new(store: &NavigationStore, dice: DiceRoll, transition_secs: f32, reveal_secs: f32) -> Self {
        Self {
            shown: store.current(),
            transition: Transition::new(transition_secs, store.current()),
            slot: None,
            landing: None,
            dice,
            reveal_secs,
            actions: portal_actions(),
            reported_fault: None,
            warned_memory_only: false,
        }
    }

    /// Run one frame: handle input, draw, and forward actions to the store
    pub fn frame(
        &mut self,
        rect: Rect,
        ui: &mut UiContext,
        dt: f32,
        store: &mut NavigationStore,
        registry: &InterfaceRegistry,
        catalog: &ProjectCatalog,
    ) {
        if self.transition.observe(store.current()) == TransitionStep::Swap
            || self.transition.update(dt) == TransitionStep::Swap
        {
            self.shown = store.current();
        }

        if store.persistence() == Persistence::MemoryOnly && !self.warned_memory_only {
            tracing::info!("preferences will not survive a reload this session");
            self.warned_memory_only = true;
        }

        let view = self.resolve_shown(registry);
        self.sync_mounts(view);

        // The audio toggle stays live through transitions; everything else waits
        let (bar, back_rect, audio_rect) = chrome_layout(rect);
        let audio_clicked = ui.take_click(&audio_rect);
        let interactive = !self.transition.blocks_input();
        if !interactive {
            ui.block_clicks_in(&rect);
        }

        // Chrome sits on top: claim its clicks before the view sees them
        let show_back = matches!(view, ShellView::Scene(d) if !d.custom_back);
        let back_clicked = show_back && ui.take_click(&back_rect);
        if let ShellView::Scene(_) = view {
            ui.block_clicks_in(&bar);
        }

        let view_rect = match view {
            ShellView::Scene(_) => rect.remaining_after_top(CHROME_HEIGHT),
            _ => rect,
        };

        // Keyboard
        let rolling = self.landing.as_ref().map_or(false, |l| l.dice.is_rolling());
        let action_ctx = ActionContext {
            view: match view {
                ShellView::Landing => ActionView::Landing,
                ShellView::SelectionGrid => ActionView::SelectionGrid,
                ShellView::Scene(_) => ActionView::Scene,
            },
            rolling,
            grid_len: registry.len(),
        };
        let mut triggered = self.actions.process_triggers(&action_ctx);
        if !interactive {
            triggered.retain(|id| *id == ACTION_AUDIO);
        }

        // Chrome actions first; scenes with their own back control still honour the key
        if back_clicked || triggered.contains(&ACTION_BACK) {
            store.go_back();
        }
        if audio_clicked || triggered.contains(&ACTION_AUDIO) {
            store.toggle_audio();
        }

        // View
        match view {
            ShellView::Landing => self.landing_frame(view_rect, ui, dt, &triggered, &action_ctx, store, registry),
            ShellView::SelectionGrid => {
                let mut picked = draw_selection_grid(view_rect, ui, registry, store);
                for id in &triggered {
                    if let Some(index) = grid_pick_index(id) {
                        picked = grid_cards(registry, store).get(index).map(|c| c.descriptor.id);
                    }
                }
                if let Some(id) = picked {
                    store.enter_scene(id, NavigationSource::FromSelectionGrid);
                }
            }
            ShellView::Scene(descriptor) => {
                self.scene_frame(view_rect, ui, dt, descriptor, store, catalog);
            }
        }

        if let ShellView::Scene(d) = view {
            draw_chrome_bar(bar, &d.name);
        }
        if show_back {
            draw_chrome_button(ui, back_rect, "< Back", &self.actions.tooltip(ACTION_BACK), false);
        }
        let audio_label = if store.audio_enabled() { "Sound: on" } else { "Sound: off" };
        draw_chrome_button(ui, audio_rect, audio_label, &self.actions.tooltip(ACTION_AUDIO), store.audio_enabled());

        let alpha = self.transition.overlay_alpha();
        if alpha > 0.0 {
            draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::new(FADE_COLOR.r, FADE_COLOR.g, FADE_COLOR.b, alpha));
        }

        draw_tooltip(ui);
    }

    fn resolve_shown<'a>(&mut self, registry: &'a InterfaceRegistry) -> ShellView<'a> {
        match resolve(self.shown, registry) {
            Ok(view) => {
                self.reported_fault = None;
                view
            }
            Err(fault) => {
                if self.reported_fault != Some(fault) {
                    tracing::warn!("{}; showing the landing instead", fault);
                    self.reported_fault = Some(fault);
                }
                ShellView::Landing
            }
        }
    }

    /// Mount what the view needs and drop what it doesn't
    fn sync_mounts(&mut self, view: ShellView) {
        match view {
            ShellView::Landing => {
                if self.landing.is_none() {
                    self.landing = Some(LandingState::new(self.dice.clone()));
                }
            }
            _ => self.landing = None,
        }

        match view {
            ShellView::Scene(descriptor) => {
                if self.slot.as_ref().map(SceneSlot::id) != Some(descriptor.id) {
                    self.slot = Some(SceneSlot::mount(descriptor));
                }
            }
            _ => self.slot = None,
        }
    }

    fn landing_frame(
        &mut self,
        rect: Rect,
        ui: &mut UiContext,
        dt: f32,
        triggered: &[&'static str],
        action_ctx: &ActionContext,
        store: &mut NavigationStore,
        registry: &InterfaceRegistry,
    ) {
        let Some(landing) = self.landing.as_mut() else {
            return;
        };

        let mut action = draw_landing(rect, ui, landing, store.visited().is_empty());
        if triggered.contains(&ACTION_ROLL) {
            action = LandingAction::Roll;
        } else if triggered.contains(&ACTION_SKIP) {
            action = LandingAction::Skip;
        }

        // Buttons and keys share the same enable rules
        match action {
            LandingAction::Roll if self.actions.is_enabled(ACTION_ROLL, action_ctx) => {
                if landing.dice.start() {
                    tracing::debug!("dice rolling");
                }
            }
            LandingAction::Skip if self.actions.is_enabled(ACTION_SKIP, action_ctx) => {
                store.enter_selection_grid();
            }
            _ => {}
        }

        if landing.dice.update(dt, random_face) == DiceEvent::Settled {
            if let Some(id) = store.roll_dice(registry) {
                landing.dice.set_face(face_for(id));
                landing.reveal = registry.get_by_id(id).map(|d| d.name.clone());
                self.transition.hold_next(self.reveal_secs);
            }
        }
    }

    fn scene_frame(
        &mut self,
        rect: Rect,
        ui: &mut UiContext,
        dt: f32,
        descriptor: &InterfaceDescriptor,
        store: &mut NavigationStore,
        catalog: &ProjectCatalog,
    ) {
        let Some(slot) = self.slot.as_mut() else {
            return;
        };

        draw_rectangle(rect.x, rect.y, rect.w, rect.h, BG_COLOR);
        if slot.poll(dt) == LoadState::Pending {
            draw_loader(rect, &descriptor.name);
            return;
        }

        let ctx = SceneContext {
            catalog,
            audio_enabled: store.audio_enabled(),
            elapsed: slot.elapsed,
        };
        let action = slot.scene.draw(rect, ui, &ctx);
        if let Some(url) = apply_scene_action(action, store, catalog) {
            open_url(&url);
        }
    }
}

/// Chrome strip, back button (left), audio toggle (right)
fn chrome_layout(rect: Rect) -> (Rect, Rect, Rect) {
    let bar = rect.slice_top(CHROME_HEIGHT);
    let pad = (CHROME_HEIGHT - CHROME_BUTTON) * 0.5;
    let back = Rect::new(bar.x + pad, bar.y + pad, 90.0, CHROME_BUTTON);
    let audio = Rect::new(bar.right() - pad - 110.0, bar.y + pad, 110.0, CHROME_BUTTON);
    (bar, back, audio)
}

fn draw_chrome_bar(bar: Rect, title: &str) {
    draw_rectangle(bar.x, bar.y, bar.w, bar.h, PANEL_BG);
    draw_line(bar.x, bar.bottom(), bar.right(), bar.bottom(), 1.0, PANEL_BORDER);
    draw_text_centered(title, &bar, FONT_SIZE_CONTENT, TEXT_DIM);
}

/// Chrome buttons are drawn after the view (input was taken up front)
fn draw_chrome_button(ui: &mut UiContext, rect: Rect, label: &str, tooltip: &str, active: bool) {
    if ui.mouse.inside(&rect) {
        ui.set_tooltip(tooltip, ui.mouse.x, ui.mouse.y);
    }
    draw_button(ui, rect, label, FONT_SIZE_SMALL, active);
}

/// Placeholder while a scene loads
fn draw_loader(rect: Rect, name: &str) {
    let t = get_time() as f32;
    let center = rect.centered(240.0, 80.0);
    draw_text_centered(&format!("Loading {}", name), &center.slice_top(30.0), FONT_SIZE_CONTENT, TEXT_COLOR);
    for i in 0..3 {
        let phase = (t * 4.0 - i as f32 * 0.6).sin() * 0.5 + 0.5;
        let x = center.center_x() + (i as f32 - 1.0) * 20.0;
        draw_circle(x, center.y + 56.0, 4.0 + phase * 3.0, ACCENT_WARM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::SceneKind;
    use crate::scenes::RETRO_BOOT_SECS;

    fn registry() -> InterfaceRegistry {
        InterfaceRegistry::builtin().unwrap()
    }

    fn catalog() -> ProjectCatalog {
        ProjectCatalog::builtin().unwrap()
    }

    #[test]
    fn test_p1_every_view_renders_exactly_one_outcome() {
        let registry = registry();
        let mut views = vec![CurrentView::Landing, CurrentView::SelectionGrid];
        views.extend(registry.list().iter().map(|d| CurrentView::ActiveScene(d.id)));
        views.push(CurrentView::ActiveScene(InterfaceId(404)));

        for view in views {
            let shown = resolve(view, &registry).unwrap_or(ShellView::Landing);
            let outcomes = [
                shown == ShellView::Landing,
                shown == ShellView::SelectionGrid,
                matches!(shown, ShellView::Scene(_)),
            ];
            assert_eq!(outcomes.iter().filter(|o| **o).count(), 1, "{:?}", view);
        }
    }

    #[test]
    fn test_resolve_active_scene() {
        let registry = registry();
        let mut store = NavigationStore::in_memory();
        store.enter_scene(InterfaceId(3), NavigationSource::FromSelectionGrid);

        let mut shell = Shell::new(&store, DiceRoll::default(), 0.15, 0.0);
        match shell.resolve_shown(&registry) {
            ShellView::Scene(d) => {
                assert_eq!(d.id, InterfaceId(3));
                assert_eq!(d.renderer, SceneKind::RetroOs);
            }
            other => panic!("expected scene, got {:?}", other),
        }
    }

    #[test]
    fn test_p5_unknown_id_falls_back_to_landing() {
        let registry = registry();
        let mut store = NavigationStore::in_memory();
        store.enter_scene(InterfaceId(77), NavigationSource::FromDice);

        assert_eq!(
            resolve(store.current(), &registry),
            Err(ShellFault::UnknownSceneId(InterfaceId(77)))
        );
        let mut shell = Shell::new(&store, DiceRoll::default(), 0.15, 0.0);
        assert_eq!(shell.resolve_shown(&registry), ShellView::Landing);
        assert_eq!(shell.reported_fault, Some(ShellFault::UnknownSceneId(InterfaceId(77))));

        // The landing mounts in place of the missing scene
        shell.sync_mounts(ShellView::Landing);
        assert!(shell.landing.is_some());
        assert!(shell.slot.is_none());
    }

    #[test]
    fn test_scene_slot_pending_then_ready() {
        let registry = registry();
        let retro = registry.get_by_id(InterfaceId(3)).unwrap();
        let mut slot = SceneSlot::mount(retro);
        assert_eq!(slot.poll(0.0), LoadState::Pending);
        assert_eq!(slot.poll(RETRO_BOOT_SECS * 0.25), LoadState::Pending);
        assert_eq!(slot.poll(RETRO_BOOT_SECS), LoadState::Ready);
        assert_eq!(slot.poll(0.1), LoadState::Ready);

        let neural = registry.get_by_id(InterfaceId(1)).unwrap();
        assert_eq!(SceneSlot::mount(neural).poll(0.0), LoadState::Ready);
    }

    #[test]
    fn test_transition_exit_swap_enter() {
        let mut t = Transition::new(0.15, CurrentView::Landing);
        assert_eq!(t.overlay_alpha(), 0.0);
        assert!(!t.blocks_input());

        assert_eq!(t.observe(CurrentView::SelectionGrid), TransitionStep::None);
        assert!(t.blocks_input());
        assert_eq!(t.update(0.1), TransitionStep::None);
        assert!(t.overlay_alpha() > 0.5);

        assert_eq!(t.update(0.1), TransitionStep::Swap);
        assert!(!t.blocks_input());
        assert_eq!(t.update(0.2), TransitionStep::None);
        assert_eq!(t.overlay_alpha(), 0.0);

        // Same view again is not a change
        assert_eq!(t.observe(CurrentView::SelectionGrid), TransitionStep::None);
        assert!(!t.blocks_input());
    }

    #[test]
    fn test_audio_toggle_does_not_fade() {
        let mut store = NavigationStore::in_memory();
        store.enter_scene(InterfaceId(1), NavigationSource::FromDice);
        let mut t = Transition::new(0.15, store.current());

        store.toggle_audio();
        assert_eq!(t.observe(store.current()), TransitionStep::None);
        assert_eq!(t.update(0.1), TransitionStep::None);
        assert!(!t.blocks_input());
        assert_eq!(t.overlay_alpha(), 0.0);

        // A real view change still fades
        store.go_back();
        t.observe(store.current());
        assert!(t.blocks_input());
    }

    #[test]
    fn test_transition_zero_duration_swaps_immediately() {
        let mut t = Transition::new(0.0, CurrentView::Landing);
        assert_eq!(t.observe(CurrentView::ActiveScene(InterfaceId(2))), TransitionStep::Swap);
        assert_eq!(t.overlay_alpha(), 0.0);
        assert!(!t.blocks_input());
    }

    #[test]
    fn test_rolled_result_holds_before_fading() {
        let mut t = Transition::new(0.15, CurrentView::Landing);
        t.hold_next(2.1);
        assert_eq!(t.observe(CurrentView::ActiveScene(InterfaceId(5))), TransitionStep::None);
        assert!(t.blocks_input());
        assert_eq!(t.overlay_alpha(), 0.0);

        assert_eq!(t.update(2.0), TransitionStep::None);
        assert_eq!(t.overlay_alpha(), 0.0);
        assert_eq!(t.update(0.2), TransitionStep::None);
        assert!(t.blocks_input());
        assert_eq!(t.update(0.2), TransitionStep::Swap);
        assert!(!t.blocks_input());

        // The hold is spent; the next change fades straight away
        t.update(0.2);
        t.observe(CurrentView::Landing);
        assert_eq!(t.update(0.2), TransitionStep::Swap);
    }

    #[test]
    fn test_hold_without_fade_swaps_when_done() {
        let mut t = Transition::new(0.0, CurrentView::Landing);
        t.hold_next(1.0);
        assert_eq!(t.observe(CurrentView::ActiveScene(InterfaceId(2))), TransitionStep::None);
        assert_eq!(t.update(0.5), TransitionStep::None);
        assert_eq!(t.update(0.6), TransitionStep::Swap);
        assert!(!t.blocks_input());
    }

    #[test]
    fn test_audio_toggle_works_during_hold() {
        let mut store = NavigationStore::in_memory();
        let mut shell = Shell::new(&store, DiceRoll::default(), 0.15, 2.1);
        shell.transition.hold_next(2.1);
        store.enter_scene(InterfaceId(2), NavigationSource::FromDice);
        shell.transition.observe(store.current());
        assert!(shell.transition.blocks_input());

        // Audio changes the store without touching the pending swap
        store.toggle_audio();
        assert_eq!(shell.transition.observe(store.current()), TransitionStep::None);
        assert!(store.audio_enabled());
        assert_eq!(shell.shown, CurrentView::Landing);
    }

    #[test]
    fn test_transition_reverses_mid_enter() {
        let mut t = Transition::new(0.2, CurrentView::Landing);
        t.observe(CurrentView::SelectionGrid);
        assert_eq!(t.update(0.25), TransitionStep::Swap);
        t.update(0.05);
        let before = t.overlay_alpha();

        t.observe(CurrentView::ActiveScene(InterfaceId(4)));
        assert!(t.blocks_input());
        assert!((t.overlay_alpha() - before).abs() < 1e-4);
    }

    #[test]
    fn test_scene_actions_drive_store() {
        let catalog = catalog();
        let mut store = NavigationStore::in_memory();
        store.enter_scene(InterfaceId(1), NavigationSource::FromDice);

        assert_eq!(
            apply_scene_action(SceneAction::OpenProject("vocapp".into()), &mut store, &catalog),
            Some("https://vocapp.xyz".to_string())
        );
        assert_eq!(store.current(), CurrentView::ActiveScene(InterfaceId(1)));

        assert_eq!(apply_scene_action(SceneAction::OpenProject("podcast".into()), &mut store, &catalog), None);
        assert_eq!(apply_scene_action(SceneAction::OpenProject("nope".into()), &mut store, &catalog), None);

        apply_scene_action(SceneAction::Back, &mut store, &catalog);
        assert_eq!(store.current(), CurrentView::Landing);

        apply_scene_action(SceneAction::EnterSelectionGrid, &mut store, &catalog);
        assert_eq!(store.current(), CurrentView::SelectionGrid);

        apply_scene_action(SceneAction::ReturnToLanding, &mut store, &catalog);
        assert_eq!(store.current(), CurrentView::Landing);
    }

    #[test]
    fn test_scene_back_keeps_source_semantics() {
        let catalog = catalog();
        let mut store = NavigationStore::in_memory();
        store.enter_selection_grid();
        store.enter_scene(InterfaceId(3), NavigationSource::FromSelectionGrid);

        apply_scene_action(SceneAction::Back, &mut store, &catalog);
        assert_eq!(store.current(), CurrentView::SelectionGrid);
    }

    #[test]
    fn test_face_for_stays_on_die() {
        for n in 1..=20 {
            let face = face_for(InterfaceId(n));
            assert!((1..=6).contains(&face));
        }
        assert_eq!(face_for(InterfaceId(4)), 4);
    }
}
