//! Application state
//!
//! Owns everything that lives for the whole session: the two read-only
//! catalogs, the navigation store, the shell and the per-frame UI context.

use macroquad::prelude::{screen_height, screen_width};

use crate::config::PortalConfig;
use crate::interfaces::InterfaceRegistry;
use crate::landing::DiceRoll;
use crate::navigation::NavigationStore;
use crate::project::{CatalogError, ProjectCatalog};
use crate::shell::Shell;
use crate::storage::{self, KeyValueStore};
use crate::ui::{MouseState, Rect, UiContext};

pub struct AppState {
    pub catalog: ProjectCatalog,
    pub registry: InterfaceRegistry,
    pub store: NavigationStore,
    pub shell: Shell,
    pub ui: UiContext,
}

impl AppState {
    /// Load the builtin catalogs and restore preferences from the platform backend
    pub fn new(config: PortalConfig) -> Result<Self, CatalogError> {
        let backend = storage::open_default(config.storage_dir.as_deref());
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: PortalConfig, backend: Box<dyn KeyValueStore>) -> Result<Self, CatalogError> {
        let catalog = ProjectCatalog::builtin()?;
        let registry = InterfaceRegistry::builtin()?;
        let store = NavigationStore::load(backend);
        let dice = DiceRoll::new(config.dice_ticks, config.dice_interval);
        let shell = Shell::new(&store, dice, config.transition_secs, config.reveal_secs);

        tracing::info!(
            projects = catalog.list().len(),
            interfaces = registry.len(),
            visited = store.visited().len(),
            "portal ready"
        );

        Ok(Self {
            catalog,
            registry,
            store,
            shell,
            ui: UiContext::new(),
        })
    }

    /// Run one frame over the whole window
    pub fn frame(&mut self, dt: f32) {
        self.ui.begin_frame(MouseState::capture());
        let rect = Rect::screen(screen_width(), screen_height());
        self.shell
            .frame(rect, &mut self.ui, dt, &mut self.store, &self.registry, &self.catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{CurrentView, Persistence};
    use crate::preferences::STORAGE_KEY;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_starts_on_landing_with_restored_preferences() {
        let saved = "(audioEnabled: false, visitedScenes: [1, 4])";
        let backend = MemoryStorage::new().with_entry(STORAGE_KEY, saved);
        let app = AppState::with_backend(PortalConfig::default(), Box::new(backend)).unwrap();

        assert_eq!(app.store.current(), CurrentView::Landing);
        assert!(!app.store.audio_enabled());
        assert_eq!(app.store.visited().len(), 2);
        assert_eq!(app.store.persistence(), Persistence::Durable);
        assert_eq!(app.registry.len(), 6);
    }
}
