//! Per-frame rally update
//!
//! Core game loop. Input queued since the last frame is drained first, so
//! gestures never interleave with the simulation.

use glam::Vec2;

use super::flight::{apply_drag, serve_velocity, swipe_to_velocity};
use super::integrator::Integrator;
use super::state::{GameEvent, GameState, Hitter, RallyEndReason, RallyState, Shuttlecock};
use super::swipe::Swipe;
use crate::consts::*;

/// Raw pointer primitives from the host input layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { pos: Vec2, time: f64 },
    /// Cosmetic only
    Move { pos: Vec2 },
    Up { pos: Vec2, time: f64 },
}

/// Input collected for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start / restart (tap, click, enter)
    pub confirm: bool,
    /// Pointer events in arrival order
    pub pointer: Vec<PointerEvent>,
    /// Demo mode - the game plays the player's side
    pub autoplay: bool,
}

impl TickInput {
    /// Drop one-shot input after it has been consumed
    pub fn clear(&mut self) {
        self.confirm = false;
        self.pointer.clear();
    }
}

/// Run the integrator (while the shuttle is live), then the rally update
pub fn step(
    state: &mut GameState,
    integrator: &mut dyn Integrator,
    input: &TickInput,
    dt: f32,
    now_ms: f64,
) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    if !state.physics_paused {
        if let Some(shuttle) = state.shuttlecock.as_mut() {
            integrator.integrate(shuttle, dt);
        }
    }
    tick(state, input, now_ms);
}

/// Advance the rally by one frame.
///
/// Assumes the shuttlecock has already been moved by the integrator.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    state.events.clear();

    let mut input = input.clone();
    if input.autoplay {
        autoplay(state, &mut input, now_ms);
    }

    let serving = input.confirm && state.rally != RallyState::Playing;
    if input.confirm {
        confirm(state, now_ms);
    }
    for event in &input.pointer {
        // The tap that starts a rally is not also a swing
        if serving && matches!(event, PointerEvent::Down { .. }) {
            log::trace!("Pointer down consumed by serve");
            continue;
        }
        handle_pointer(state, *event);
    }

    if state.rally != RallyState::Playing {
        return;
    }
    let Some(mut shuttle) = state.shuttlecock else {
        return;
    };

    shuttle.vel = apply_drag(shuttle.vel);
    log_kinematics(state, &shuttle, now_ms);

    let width = state.screen_width();
    let ceiling = state.court.dimensions().top;
    if let Some(shot) = state.opponent.update(
        shuttle.pos,
        shuttle.vel,
        width,
        Some(ceiling),
        now_ms,
        state.rng.as_mut(),
    ) {
        shuttle.vel = shot.velocity;
        state.last_hitter = Some(Hitter::Computer);
        state.events.push(GameEvent::OpponentSwung { shot: shot.kind });
    }
    state.shuttlecock = Some(shuttle);

    // Out-of-bounds is checked first and wins ties with the floor
    if left_playfield(state, shuttle.pos) {
        let winner = match state.last_hitter {
            Some(Hitter::Player) => Hitter::Computer,
            Some(Hitter::Computer) => Hitter::Player,
            None => Hitter::Computer,
        };
        log::info!(
            "Out of bounds at ({:.0}, {:.0}), last hitter {:?}",
            shuttle.pos.x,
            shuttle.pos.y,
            state.last_hitter
        );
        end_rally(state, winner, RallyEndReason::OutOfBounds);
    } else if shuttle.pos.y > state.court.floor_line() {
        // Landing on the opponent's half means the player's shot went unreturned
        let winner = if shuttle.pos.x > state.court.midline() {
            Hitter::Player
        } else {
            Hitter::Computer
        };
        log::info!("Shuttle down at ({:.0}, {:.0})", shuttle.pos.x, shuttle.pos.y);
        end_rally(state, winner, RallyEndReason::Floor);
    }
}

/// Start or restart a rally. Ignored while one is live.
pub fn confirm(state: &mut GameState, now_ms: f64) {
    match state.rally {
        RallyState::Ready | RallyState::PointScored => serve(state, now_ms),
        RallyState::Playing => log::trace!("Confirm ignored mid-rally"),
    }
}

/// Put the shuttlecock in play from the far right corner
fn serve(state: &mut GameState, now_ms: f64) {
    let pos = state.court.serve_point();
    let vel = serve_velocity(state.rng.as_mut());

    state.shuttlecock = Some(Shuttlecock::new(pos, vel));
    // The serve counts as the computer's stroke
    state.last_hitter = Some(Hitter::Computer);
    state.opponent.reset();
    state.swipe.reset();
    state.swipe_trail = None;
    state.physics_paused = false;
    state.rally = RallyState::Playing;
    state.last_log_second = None;
    state.events.push(GameEvent::Served);

    log::debug!(
        "Serve at {:.0}ms from ({:.0}, {:.0}) vel({:.0}, {:.0})",
        now_ms,
        pos.x,
        pos.y,
        vel.x,
        vel.y
    );
}

fn handle_pointer(state: &mut GameState, event: PointerEvent) {
    match event {
        PointerEvent::Down { pos, time } => {
            let ctx = state.swipe_context();
            state.swipe.begin(pos, time, &ctx);
            state.swipe_trail = None;
        }
        PointerEvent::Move { pos } => {
            state.swipe_trail = state.swipe.movement(pos);
        }
        PointerEvent::Up { pos, time } => {
            state.swipe_trail = None;
            let ctx = state.swipe_context();
            if let Some(swipe) = state.swipe.end(pos, time, &ctx) {
                apply_player_swipe(state, swipe);
            }
        }
    }
}

/// Player return: the swipe replaces the shuttle's velocity outright
pub fn apply_player_swipe(state: &mut GameState, swipe: Swipe) {
    if state.rally != RallyState::Playing {
        return;
    }
    let Some(shuttle) = state.shuttlecock.as_mut() else {
        return;
    };

    shuttle.vel = swipe_to_velocity(swipe.vector, swipe.duration_ms);
    state.last_hitter = Some(Hitter::Player);
    state.events.push(GameEvent::PlayerSwung);
    log::debug!("Player hit: vel({:.0}, {:.0})", shuttle.vel.x, shuttle.vel.y);
}

fn left_playfield(state: &GameState, pos: Vec2) -> bool {
    pos.x < -PLAYFIELD_MARGIN
        || pos.x > state.screen_width() + PLAYFIELD_MARGIN
        || pos.y < -PLAYFIELD_MARGIN
}

fn end_rally(state: &mut GameState, winner: Hitter, reason: RallyEndReason) {
    state.score.award(winner);
    state.rally = RallyState::PointScored;
    state.physics_paused = true;
    state.opponent.reset();
    state.swipe.reset();
    state.swipe_trail = None;
    if let Some(shuttle) = state.shuttlecock.as_mut() {
        shuttle.vel = Vec2::ZERO;
    }
    state.events.push(GameEvent::RallyEnded { winner, reason });

    log::info!(
        "{:?} scores ({:?}). Player {} - Computer {}",
        winner,
        reason,
        state.score.player,
        state.score.computer
    );
}

/// Trace the shuttle's motion at most once per simulated second
fn log_kinematics(state: &mut GameState, shuttle: &Shuttlecock, now_ms: f64) {
    let second = (now_ms / 1000.0).floor() as i64;
    if state.last_log_second == Some(second) {
        return;
    }
    state.last_log_second = Some(second);
    log::trace!(
        "Shuttle pos ({:.1}, {:.1}) vel ({:.1}, {:.1}) speed {:.1}",
        shuttle.pos.x,
        shuttle.pos.y,
        shuttle.vel.x,
        shuttle.vel.y,
        shuttle.vel.length()
    );
}

/// Demo player: serves when idle and swipes back anything deep on its side
fn autoplay(state: &GameState, input: &mut TickInput, now_ms: f64) {
    if state.rally != RallyState::Playing {
        input.confirm = true;
        return;
    }
    let Some(shuttle) = state.shuttlecock else {
        return;
    };

    let width = state.screen_width();
    let incoming = shuttle.vel.x < 0.0 && shuttle.pos.x < width * 0.3;
    if !incoming || state.swipe.is_active() {
        return;
    }

    // Flat-ish drive: down-right swipes dodge the lob penalty
    let start = Vec2::new(width * 0.15, state.court.player_anchor().y);
    let lift = if shuttle.pos.y > state.court.dimensions().top + 60.0 {
        -30.0
    } else {
        20.0
    };
    let end = start + Vec2::new(90.0, lift);
    input.pointer.push(PointerEvent::Down {
        pos: start,
        time: now_ms - 120.0,
    });
    input.pointer.push(PointerEvent::Up { pos: end, time: now_ms });
}
