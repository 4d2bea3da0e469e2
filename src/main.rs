//! Skyhop: an endless vertical jumper
//!
//! Bounce up a procedurally generated tower of platforms. Steer left and
//! right; some platforms launch you higher, some break underfoot, some carry
//! coins. Fall below the lowest platform and the run is over.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod assets;
mod audio;
mod config;
mod game;
mod input;
mod render;

use macroquad::prelude::*;
use tracing::info;

use audio::AudioPlayer;
use config::CONFIG_PATH;
use game::{Phase, Session};
use input::InputState;
use render::Renderer;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Skyhop v{}", VERSION),
        window_width: 480,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Seed for runs when the config doesn't pin one
fn clock_seed() -> u64 {
    (macroquad::miniquad::date::now() * 1000.0) as u64
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    init_logging();

    info!(version = VERSION, "starting");

    let config = assets::load_config_or_default(CONFIG_PATH).await;
    let assets = assets::load_all().await;

    let seed = config.session.seed.unwrap_or_else(clock_seed);
    info!(seed, "seeded");

    let mut session = Session::new(config, seed);
    let mut renderer = Renderer::new(assets.platforms, assets.knight, assets.coin);
    let mut audio = AudioPlayer::new(assets.sounds);
    let mut input = InputState::new();

    // First step sees (almost) no elapsed time
    let mut last_time = get_time();

    loop {
        let now = get_time();
        let dt = (now - last_time) as f32;
        last_time = now;

        if is_key_pressed(KeyCode::F3) {
            renderer.debug = !renderer.debug;
        }

        input.poll();
        session.step(dt, input.controls());

        for event in session.world.events.drain() {
            audio.handle(&event);
        }

        renderer.render(&session.drawables(), session.world.camera_height);
        match session.phase() {
            Phase::Title => renderer.show_title_screen(),
            Phase::Running | Phase::Ended { .. } => renderer.show_score(session.score()),
        }

        next_frame().await;
    }
}
