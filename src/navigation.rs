//! Navigation state store
//!
//! The single piece of mutable session state: which view is showing, how
//! the visitor got there, which scenes they've seen, and the audio
//! preference. Owned by `AppState` and mutated only from the frame loop.
//!
//! Every mutation persists the durable subset (`visitedScenes`,
//! `audioEnabled`). Persistence failures degrade to memory-only;
//! navigation itself never fails.

use std::collections::BTreeSet;

use crate::interfaces::{InterfaceId, InterfaceRegistry};
use crate::preferences::PersistedPreferences;
use crate::storage::{KeyValueStore, MemoryStorage, StorageError};

/// Which of the three top-level views is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrentView {
    Landing,
    SelectionGrid,
    ActiveScene(InterfaceId),
}

/// How the visitor arrived at the active scene. Only `go_back` reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationSource {
    None,
    FromDice,
    FromSelectionGrid,
}

/// Whether preferences are reaching durable storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    Durable,
    /// Storage failed; state lives for this session only
    MemoryOnly,
}

pub struct NavigationStore {
    current: CurrentView,
    source: NavigationSource,
    visited: BTreeSet<InterfaceId>,
    audio_enabled: bool,
    backend: Box<dyn KeyValueStore>,
    persistence: Persistence,
}

impl std::fmt::Debug for NavigationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationStore")
            .field("current", &self.current)
            .field("source", &self.source)
            .field("visited", &self.visited)
            .field("audio_enabled", &self.audio_enabled)
            .field("backend", &self.backend.label())
            .field("persistence", &self.persistence)
            .finish()
    }
}

impl Default for NavigationStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl NavigationStore {
    /// Fresh store with defaults, writing to `backend`. Nothing is read.
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            current: CurrentView::Landing,
            source: NavigationSource::None,
            visited: BTreeSet::new(),
            audio_enabled: false,
            backend,
            persistence: Persistence::Durable,
        }
    }

    /// Store backed by process memory only
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    /// Create the store and overlay whatever a previous session persisted.
    ///
    /// A corrupt document is discarded (defaults win, storage stays durable).
    /// An unreachable backend switches the session to memory-only.
    pub fn load(backend: Box<dyn KeyValueStore>) -> Self {
        let mut store = Self::new(backend);
        match PersistedPreferences::load(store.backend.as_ref()) {
            Ok(Some(prefs)) => {
                tracing::info!(
                    backend = store.backend.label(),
                    visited = prefs.visited_scenes.len(),
                    audio = prefs.audio_enabled,
                    "restored preferences"
                );
                store.audio_enabled = prefs.audio_enabled;
                store.visited = prefs.visited_scenes;
            }
            Ok(None) => {
                tracing::info!(backend = store.backend.label(), "no saved preferences, using defaults");
            }
            Err(StorageError::Serde(e)) => {
                tracing::warn!("discarding unreadable preferences: {}", e);
            }
            Err(e) => {
                tracing::warn!("preferences unavailable, continuing in memory: {}", e);
                store.persistence = Persistence::MemoryOnly;
            }
        }
        store
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn current(&self) -> CurrentView {
        self.current
    }

    pub fn source(&self) -> NavigationSource {
        self.source
    }

    pub fn visited(&self) -> &BTreeSet<InterfaceId> {
        &self.visited
    }

    pub fn has_visited(&self, id: InterfaceId) -> bool {
        self.visited.contains(&id)
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    pub fn persistence(&self) -> Persistence {
        self.persistence
    }

    /// Snapshot of the durable subset
    pub fn preferences(&self) -> PersistedPreferences {
        PersistedPreferences {
            audio_enabled: self.audio_enabled,
            visited_scenes: self.visited.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Show scene `id`. Unknown ids are recorded anyway; the shell falls
    /// back to the landing when it can't resolve them.
    pub fn enter_scene(&mut self, id: InterfaceId, source: NavigationSource) {
        self.current = CurrentView::ActiveScene(id);
        self.source = source;
        if self.visited.insert(id) {
            tracing::debug!(%id, "first visit");
        }
        tracing::info!(%id, ?source, "enter scene");
        self.persist();
    }

    pub fn enter_selection_grid(&mut self) {
        self.current = CurrentView::SelectionGrid;
        self.source = NavigationSource::None;
        tracing::info!("enter selection grid");
        self.persist();
    }

    /// Draw a random scene and enter it from the dice.
    /// With an empty registry there is nothing to enter and the view is unchanged.
    pub fn roll_dice(&mut self, registry: &InterfaceRegistry) -> Option<InterfaceId> {
        let Some(id) = registry.pick_random_id() else {
            tracing::warn!("dice rolled against an empty interface registry");
            return None;
        };
        self.enter_scene(id, NavigationSource::FromDice);
        Some(id)
    }

    /// Dice arrivals return to the landing; everything else to the grid
    pub fn go_back(&mut self) {
        self.current = match self.source {
            NavigationSource::FromDice => CurrentView::Landing,
            NavigationSource::FromSelectionGrid | NavigationSource::None => CurrentView::SelectionGrid,
        };
        tracing::info!(from = ?self.source, to = ?self.current, "back");
        self.source = NavigationSource::None;
        self.persist();
    }

    pub fn toggle_audio(&mut self) {
        self.audio_enabled = !self.audio_enabled;
        tracing::info!(enabled = self.audio_enabled, "audio toggled");
        self.persist();
    }

    /// Unconditional restart, bypassing the source-based back table
    pub fn return_to_landing(&mut self) {
        self.current = CurrentView::Landing;
        self.source = NavigationSource::None;
        tracing::info!("return to landing");
        self.persist();
    }

    fn persist(&mut self) {
        if self.persistence == Persistence::MemoryOnly {
            return;
        }
        if let Err(e) = self.preferences().save(self.backend.as_mut()) {
            tracing::warn!(
                backend = self.backend.label(),
                "persisting preferences failed, continuing in memory: {}",
                e
            );
            self.persistence = Persistence::MemoryOnly;
        }
    }
}
