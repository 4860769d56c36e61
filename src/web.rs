//! Browser bindings
//!
//! The host page owns the canvas, sprites and pointer listeners. It forwards
//! raw pointer events here and calls `frame` from `requestAnimationFrame`;
//! everything runs on the page's single thread.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::Settings;
use crate::sim::{ArcadeIntegrator, GameState, PointerEvent, TickInput, step};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Swipe Badminton starting...");
}

/// One game session bound to a canvas size
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    integrator: ArcadeIntegrator,
    input: TickInput,
    last_time: f64,
}

#[wasm_bindgen]
impl WebGame {
    /// `settings_json` may be empty; the viewport always comes from the canvas
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, settings_json: &str) -> WebGame {
        let mut settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).unwrap_or_else(|e| {
                log::warn!("Bad settings ({}), using defaults", e);
                Settings::default()
            })
        };
        settings.viewport_width = width;
        settings.viewport_height = height;
        if settings.seed == 0 {
            settings.seed = js_sys::Date::now() as u64;
        }
        let settings = settings.sanitized();
        log::info!("Game initialized with seed: {}", settings.seed);

        WebGame {
            state: GameState::new(&settings),
            integrator: ArcadeIntegrator::new(settings.gravity),
            input: TickInput::default(),
            last_time: 0.0,
        }
    }

    /// Tap / click / Enter: start or restart a rally
    pub fn confirm(&mut self) {
        self.input.confirm = true;
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, time: f64) {
        self.input.pointer.push(PointerEvent::Down {
            pos: Vec2::new(x, y),
            time,
        });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.pointer.push(PointerEvent::Move { pos: Vec2::new(x, y) });
    }

    pub fn pointer_up(&mut self, x: f32, y: f32, time: f64) {
        self.input.pointer.push(PointerEvent::Up {
            pos: Vec2::new(x, y),
            time,
        });
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.input.autoplay = enabled;
        log::info!("Autoplay: {}", enabled);
    }

    /// Advance one animation frame; returns the frame view as JSON
    pub fn frame(&mut self, time: f64) -> String {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            1.0 / 60.0
        };
        self.last_time = time;

        step(&mut self.state, &mut self.integrator, &self.input, dt, time);
        self.input.clear();

        serde_json::to_string(&self.state.view()).unwrap_or_else(|e| {
            log::error!("Frame serialization failed: {}", e);
            String::from("{}")
        })
    }
}
