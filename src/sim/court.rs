//! Perspective court geometry
//!
//! The court is drawn as a trapezoid: a wide near edge at the bottom of the
//! screen narrowing toward a far edge. Screen y grows downward, so
//! `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::lerp;

/// Trapezoid court extents in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtDimensions {
    /// Near edge y
    pub bottom: f32,
    /// Far edge y
    pub top: f32,
    pub near_width: f32,
    pub far_width: f32,
    pub center_x: f32,
}

impl CourtDimensions {
    /// Court layout for a viewport
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            bottom: height,
            top: height - COURT_DEPTH,
            near_width: width * COURT_NEAR_WIDTH_RATIO,
            far_width: width * COURT_FAR_WIDTH_RATIO,
            center_x: width / 2.0,
        }
    }
}

/// Horizontal playable extent at some depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtBounds {
    pub left: f32,
    pub right: f32,
}

impl CourtBounds {
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Point `fraction` of the way from left to right
    #[inline]
    pub fn at(&self, fraction: f32) -> f32 {
        lerp(self.left, self.right, fraction)
    }
}

/// Court model for one session
#[derive(Debug, Clone)]
pub struct CourtGeometry {
    dims: CourtDimensions,
    screen_width: f32,
}

impl CourtGeometry {
    pub fn new(dims: CourtDimensions, screen_width: f32) -> Self {
        debug_assert!(dims.top < dims.bottom, "far edge must be above near edge");
        debug_assert!(dims.far_width < dims.near_width, "court must narrow with depth");
        Self { dims, screen_width }
    }

    /// Build the court for a viewport
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self::new(CourtDimensions::for_viewport(width, height), width)
    }

    #[inline]
    pub fn dimensions(&self) -> &CourtDimensions {
        &self.dims
    }

    #[inline]
    pub fn screen_width(&self) -> f32 {
        self.screen_width
    }

    /// Horizontal screen midpoint separating the two sides
    #[inline]
    pub fn midline(&self) -> f32 {
        self.screen_width / 2.0
    }

    /// Whether `x` lies on the player's (left) half
    #[inline]
    pub fn is_player_side(&self, x: f32) -> bool {
        x <= self.midline()
    }

    /// Left/right court edges at screen height `y`, clamped to the court's depth
    pub fn bounds_at_y(&self, y: f32) -> CourtBounds {
        let d = &self.dims;
        let t = ((y - d.bottom) / (d.top - d.bottom)).clamp(0.0, 1.0);

        let near_half = d.near_width / 2.0;
        let far_half = d.far_width / 2.0;

        CourtBounds {
            left: lerp(d.center_x - near_half, d.center_x - far_half, t),
            right: lerp(d.center_x + near_half, d.center_x + far_half, t),
        }
    }

    /// Where each serve starts: far right corner of the court
    pub fn serve_point(&self) -> Vec2 {
        let y = self.dims.top + SERVE_DEPTH_OFFSET;
        let bounds = self.bounds_at_y(y);
        Vec2::new(bounds.right - SERVE_EDGE_INSET, y)
    }

    /// Depth at which both athletes stand (25% up from the near edge)
    fn athlete_y(&self) -> f32 {
        self.dims.bottom - (self.dims.bottom - self.dims.top) * 0.25
    }

    /// Player stands 20% in from the left sideline
    pub fn player_anchor(&self) -> Vec2 {
        let y = self.athlete_y();
        Vec2::new(self.bounds_at_y(y).at(0.2), y)
    }

    /// Opponent stands 80% across, mirroring the player
    pub fn opponent_anchor(&self) -> Vec2 {
        let y = self.athlete_y();
        Vec2::new(self.bounds_at_y(y).at(0.8), y)
    }

    /// y below which the shuttle has hit the floor
    #[inline]
    pub fn floor_line(&self) -> f32 {
        self.dims.bottom - FLOOR_MARGIN
    }
}
