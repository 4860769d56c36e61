//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit time (`now_ms`) passed into every tick
//! - Injected RNG only
//! - Input drained at the start of a tick, never mid-update
//! - No rendering or platform dependencies

pub mod court;
pub mod flight;
pub mod integrator;
pub mod opponent;
pub mod rng;
pub mod state;
pub mod swipe;
pub mod tick;

pub use court::{CourtBounds, CourtDimensions, CourtGeometry};
pub use flight::{apply_drag, depth_scale, serve_velocity, swipe_multiplier, swipe_to_velocity};
pub use integrator::{ArcadeIntegrator, Integrator};
pub use opponent::{OpponentAiState, OpponentController, SHOT_TABLE, Shot, ShotKind, ShotProfile};
pub use rng::{GameRng, RandomSource};
pub use state::{
    FrameView, GameEvent, GameState, Hitter, RallyEndReason, RallyState, Score, ShuttleView,
    Shuttlecock,
};
pub use swipe::{Swipe, SwipeContext, SwipeInterpreter, SwipeRejection, SwipeSample};
pub use tick::{PointerEvent, TickInput, apply_player_swipe, confirm, step, tick};
