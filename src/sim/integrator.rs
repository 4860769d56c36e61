//! Arcade physics integrator
//!
//! Stands in for the host engine's arcade body: constant gravity plus
//! velocity-to-position integration, run before each rally tick.

use super::state::Shuttlecock;
use crate::consts::DEFAULT_GRAVITY;

/// Advances a body's motion over one frame
pub trait Integrator {
    fn integrate(&mut self, body: &mut Shuttlecock, dt: f32);
}

/// Semi-implicit Euler with constant downward gravity
#[derive(Debug, Clone, Copy)]
pub struct ArcadeIntegrator {
    /// Downward acceleration, pixels/s²
    pub gravity: f32,
}

impl Default for ArcadeIntegrator {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl ArcadeIntegrator {
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }
}

impl Integrator for ArcadeIntegrator {
    fn integrate(&mut self, body: &mut Shuttlecock, dt: f32) {
        body.vel.y += self.gravity * dt;
        body.pos += body.vel * dt;
    }
}
