//! Swipe Badminton entry point
//!
//! The browser build is driven from `web::WebGame`. Natively this runs a
//! headless self-playing match and logs each rally.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use swipe_badminton::Settings;
    use swipe_badminton::sim::{ArcadeIntegrator, GameEvent, GameState, TickInput, step};

    env_logger::init();
    log::info!("Swipe Badminton (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => load_settings(&path),
        None => Settings::default(),
    };
    let settings = settings.sanitized();

    let mut state = GameState::new(&settings);
    let mut integrator = ArcadeIntegrator::new(settings.gravity);
    let input = TickInput {
        autoplay: true,
        ..Default::default()
    };

    const FRAME_DT: f32 = 1.0 / 60.0;
    const RALLIES: u32 = 11;
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    log::info!(
        "{} vs {} on a {}x{} court, seed {}",
        settings.player_character.display_name(),
        settings.opponent_character.display_name(),
        settings.viewport_width,
        settings.viewport_height,
        settings.seed
    );

    let mut rallies = 0;
    let mut frame: u64 = 0;
    while rallies < RALLIES && frame < MAX_FRAMES {
        let now_ms = frame as f64 * FRAME_DT as f64 * 1000.0;
        step(&mut state, &mut integrator, &input, FRAME_DT, now_ms);

        for event in &state.events {
            match event {
                GameEvent::OpponentSwung { shot } => log::debug!("Opponent plays a {}", shot.as_str()),
                GameEvent::RallyEnded { .. } => rallies += 1,
                _ => {}
            }
        }
        frame += 1;
    }

    println!(
        "Final score after {} rallies: Player {} - Computer {}",
        rallies, state.score.player, state.score.computer
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> swipe_badminton::Settings {
    use swipe_badminton::Settings;

    match std::fs::read_to_string(path) {
        Ok(json) => match Settings::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            log::warn!("Could not read {}: {}; using defaults", path, e);
            Settings::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
