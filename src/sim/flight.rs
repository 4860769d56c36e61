//! Shuttlecock flight model
//!
//! Stateless helpers: air drag, serve and swipe velocities, depth scale.
//! Gravity and position integration are the integrator's job.

use glam::Vec2;

use super::rng::RandomSource;
use crate::consts::*;

/// Apply one tick of air resistance to a velocity.
///
/// Drag opposes motion with magnitude proportional to speed. A component
/// that the drag would push past zero is snapped to exactly zero instead.
pub fn apply_drag(vel: Vec2) -> Vec2 {
    let speed = vel.length();
    if speed <= DRAG_MIN_SPEED {
        return vel;
    }

    let drag = -(vel / speed) * (DRAG_COEFFICIENT * speed);
    let next = vel + drag;

    Vec2::new(settle_component(vel.x, next.x), settle_component(vel.y, next.y))
}

/// Keep `next` unless it flipped sign relative to `prev`
#[inline]
fn settle_component(prev: f32, next: f32) -> f32 {
    if prev == 0.0 || next.signum() == prev.signum() {
        next
    } else {
        0.0
    }
}

/// Sample a fresh serve velocity (toward the player, slightly upward)
pub fn serve_velocity(rng: &mut dyn RandomSource) -> Vec2 {
    let vx = SERVE_BASE_VX * (1.0 + (rng.unit() - 0.5) * SERVE_HORIZONTAL_SPREAD);
    let vy = SERVE_BASE_VY * (1.0 + (rng.unit() - 0.5) * SERVE_VERTICAL_SPREAD);
    Vec2::new(vx, vy)
}

/// Swipe angle in degrees: 0 = rightward, 90 = straight up the screen
#[inline]
pub fn swipe_angle_degrees(swipe: Vec2) -> f32 {
    (-swipe.y).atan2(swipe.x).to_degrees()
}

/// Power multiplier for a swipe, before clamping.
///
/// Fast swipes earn up to double power. Upward-right lobs are weakened.
pub fn swipe_multiplier(swipe: Vec2, duration_ms: f64) -> f32 {
    let swipe_speed = if duration_ms > 0.0 {
        swipe.length() / (duration_ms as f32 / 1000.0)
    } else {
        f32::INFINITY
    };

    let bonus = (swipe_speed / SWIPE_FULL_BONUS_SPEED).min(SWIPE_MAX_BONUS);
    let mut multiplier = SWIPE_BASE_MULTIPLIER * (1.0 + bonus);

    let angle = swipe_angle_degrees(swipe);
    if (0.0..=90.0).contains(&angle) {
        multiplier *= SWIPE_UPWARD_PENALTY;
    }

    multiplier
}

/// Convert a validated swipe into the shuttlecock's new velocity
pub fn swipe_to_velocity(swipe: Vec2, duration_ms: f64) -> Vec2 {
    let raw = swipe * swipe_multiplier(swipe, duration_ms);
    Vec2::new(
        raw.x.clamp(SWIPE_MIN_VX, SWIPE_MAX_VX),
        raw.y.clamp(-SWIPE_MAX_ABS_VY, SWIPE_MAX_ABS_VY),
    )
}

/// Render scale for perspective: 0.5 at the far edge, 1.0 at the near edge.
///
/// Not clamped; a shuttle above the far edge keeps shrinking.
pub fn depth_scale(y: f32, top: f32, bottom: f32) -> f32 {
    let depth = (y - top) / (bottom - top);
    0.5 + depth * 0.5
}
