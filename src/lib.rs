//! Swipe Badminton - A perspective-court arcade badminton minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight model, court, opponent, rally loop)
//! - `settings`: Host configuration (viewport, gravity, characters)
//! - `web`: wasm-bindgen surface for the browser host

pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{CharacterId, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default arcade gravity (pixels/s², positive is down the screen)
    pub const DEFAULT_GRAVITY: f32 = 140.0;
    /// Largest frame delta handed to the integrator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Court depth in screen units (bottom edge to far edge)
    pub const COURT_DEPTH: f32 = 220.0;
    /// Near (bottom) edge width as a fraction of viewport width
    pub const COURT_NEAR_WIDTH_RATIO: f32 = 0.99;
    /// Far (top) edge width as a fraction of viewport width
    pub const COURT_FAR_WIDTH_RATIO: f32 = 0.55;
    /// Smallest viewport the court model accepts
    pub const MIN_VIEWPORT_WIDTH: f32 = 320.0;
    pub const MIN_VIEWPORT_HEIGHT: f32 = 240.0;

    /// Serve spawns this far below the far edge...
    pub const SERVE_DEPTH_OFFSET: f32 = 50.0;
    /// ...and this far in from the right sideline
    pub const SERVE_EDGE_INSET: f32 = 20.0;

    /// Air resistance: drag magnitude = coefficient * speed
    pub const DRAG_COEFFICIENT: f32 = 0.025;
    /// Below this speed drag is skipped (avoids jitter at rest)
    pub const DRAG_MIN_SPEED: f32 = 10.0;

    /// Serve velocity before jitter (leftward and upward)
    pub const SERVE_BASE_VX: f32 = -750.0;
    pub const SERVE_BASE_VY: f32 = -220.0;
    /// Total relative jitter span (±half of this)
    pub const SERVE_HORIZONTAL_SPREAD: f32 = 0.3;
    pub const SERVE_VERTICAL_SPREAD: f32 = 0.4;

    /// Swipe power
    pub const SWIPE_BASE_MULTIPLIER: f32 = 8.0;
    /// Swipe speed (px/s) that earns the full bonus
    pub const SWIPE_FULL_BONUS_SPEED: f32 = 500.0;
    pub const SWIPE_MAX_BONUS: f32 = 1.0;
    /// Multiplier scale for upward-right (lob) swipes
    pub const SWIPE_UPWARD_PENALTY: f32 = 0.2;
    pub const SWIPE_MIN_VX: f32 = 300.0;
    pub const SWIPE_MAX_VX: f32 = 1200.0;
    pub const SWIPE_MAX_ABS_VY: f32 = 1100.0;

    /// Gesture validity
    pub const SWIPE_MIN_DISTANCE: f32 = 30.0;
    pub const SWIPE_MAX_DURATION_MS: f64 = 1000.0;
    /// Slack past the midline where the shuttle still counts as reachable
    pub const SWIPE_SIDE_TOLERANCE: f32 = 10.0;

    /// Opponent cannot reach anything this far above the far edge
    pub const OPPONENT_REACH_ABOVE_CEILING: f32 = 100.0;
    /// Reaction delay range (ms)
    pub const OPPONENT_MIN_REACTION_MS: f64 = 200.0;
    pub const OPPONENT_MAX_REACTION_MS: f64 = 400.0;
    /// Vertical placement jitter on returns (±)
    pub const OPPONENT_PLACEMENT_JITTER: f32 = 20.0;

    /// Floor line sits this far above the court's bottom edge
    pub const FLOOR_MARGIN: f32 = 10.0;
    /// Extended playfield margin beyond the screen edges
    pub const PLAYFIELD_MARGIN: f32 = 50.0;
}

/// Visual heading of a moving object, radians.
///
/// Sprites are authored pointing up, hence the quarter-turn offset.
#[inline]
pub fn heading_rotation(vel: Vec2) -> f32 {
    vel.y.atan2(vel.x) - std::f32::consts::FRAC_PI_2
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_heading_rotation() {
        // Straight down the screen -> no rotation
        assert!(heading_rotation(Vec2::new(0.0, 10.0)).abs() < 1e-6);
        // Moving right -> quarter turn back
        assert!((heading_rotation(Vec2::new(10.0, 0.0)) + FRAC_PI_2).abs() < 1e-6);
        // Moving left
        assert!((heading_rotation(Vec2::new(-10.0, 0.0)) - (PI - FRAC_PI_2)).abs() < 1e-6);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(4.0, 2.0, 1.0), 2.0);
    }
}
