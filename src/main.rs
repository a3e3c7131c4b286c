//! Poly-Interface Portal
//!
//! One project catalog, many ways to browse it. Visitors land on a dice
//! roll that drops them into a random interface scene, or skip to a grid
//! of every interface. Visited scenes and the sound toggle are remembered
//! across sessions.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod interfaces;
mod landing;
mod navigation;
mod preferences;
mod project;
mod scenes;
mod selection;
mod shell;
mod storage;
mod ui;

use macroquad::prelude::*;

use app::AppState;
use config::PortalConfig;
use ui::{draw_text_centered, Rect, BG_COLOR, FONT_SIZE_CONTENT, TEXT_COLOR};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Poly-Interface Portal v{}", VERSION),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Read `portal.ron` and install the log subscriber.
/// `PORTAL_LOG` wins over the file's `log_filter`.
#[cfg(not(target_arch = "wasm32"))]
fn init_native() -> PortalConfig {
    use std::path::Path;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let loaded = PortalConfig::load(Path::new(config::CONFIG_FILE));
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => PortalConfig::default(),
    };

    let filter = EnvFilter::try_from_env(config::LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match loaded {
        Ok(Some(_)) => tracing::info!(file = config::CONFIG_FILE, "loaded config"),
        Ok(None) => tracing::debug!(file = config::CONFIG_FILE, "no config file, using defaults"),
        Err(e) => tracing::warn!("{}; using defaults", e),
    }
    config
}

#[macroquad::main(window_conf)]
async fn main() {
    // Crash logging goes first
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    let config = init_native();
    #[cfg(target_arch = "wasm32")]
    let config = PortalConfig::default();

    macroquad::rand::srand(macroquad::miniquad::date::now() as u64);

    let mut app = match AppState::new(config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("failed to load builtin catalogs: {}", e);
            let message = format!("The portal could not start: {}", e);
            loop {
                clear_background(BG_COLOR);
                let rect = Rect::screen(screen_width(), screen_height());
                draw_text_centered(&message, &rect, FONT_SIZE_CONTENT, TEXT_COLOR);
                next_frame().await;
            }
        }
    };

    loop {
        clear_background(BG_COLOR);
        app.frame(get_frame_time());
        next_frame().await;
    }
}
