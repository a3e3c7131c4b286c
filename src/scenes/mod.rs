//! Interface scenes
//!
//! Every scene presents the same project catalog through its own metaphor.
//! The shell only knows the `Scene` trait: it polls readiness, hands the
//! scene a rect to draw into, and turns the returned `SceneAction` into a
//! navigation call. Scenes never touch the navigation store directly.

mod catalog_scene;

pub use catalog_scene::{CatalogScene, RETRO_BOOT_SECS};

use crate::interfaces::SceneKind;
use crate::project::ProjectCatalog;
use crate::ui::{Rect, UiContext};

/// What a scene may read while drawing
pub struct SceneContext<'a> {
    pub catalog: &'a ProjectCatalog,
    /// Scenes may gate their own sound on this; only the chrome toggles it
    pub audio_enabled: bool,
    /// Seconds since the scene was entered
    pub elapsed: f32,
}

/// Request from a scene back to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneAction {
    None,
    /// Open a live project's url (the shell re-checks status)
    OpenProject(String),
    EnterSelectionGrid,
    ReturnToLanding,
    /// Scene-drawn back control; same semantics as the chrome's
    Back,
}

/// A pluggable interface renderer
pub trait Scene {
    fn kind(&self) -> SceneKind;

    /// Advance loading by `dt`; true once the scene can draw
    fn poll_ready(&mut self, dt: f32) -> bool;

    fn draw(&mut self, rect: Rect, ui: &mut UiContext, ctx: &SceneContext) -> SceneAction;
}

/// Open `url` outside the app (system browser, or a new tab on the web)
#[cfg(not(target_arch = "wasm32"))]
pub fn open_url(url: &str) {
    match webbrowser::open(url) {
        Ok(()) => tracing::info!(url, "opened project"),
        Err(e) => tracing::warn!(url, "failed to open browser: {}", e),
    }
}

/// Open `url` outside the app (system browser, or a new tab on the web)
#[cfg(target_arch = "wasm32")]
pub fn open_url(url: &str) {
    tracing::info!(url, "opened project");
    crate::storage::web::open_url(url);
}
