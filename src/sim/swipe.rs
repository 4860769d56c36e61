//! Swipe gesture interpretation
//!
//! Turns a completed pointer gesture into a hit, or silently drops it.
//! Only one gesture is tracked at a time.

use glam::Vec2;

use crate::consts::*;

/// What the interpreter needs to know about the game when a pointer event arrives
#[derive(Debug, Clone, Copy)]
pub struct SwipeContext {
    /// Rally is live
    pub playing: bool,
    pub screen_width: f32,
    /// Current shuttlecock x, if one exists
    pub shuttle_x: Option<f32>,
    /// Slack past the midline for reachability
    pub side_tolerance: f32,
}

/// A completed gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeSample {
    pub start: Vec2,
    pub start_time: f64,
    pub end: Vec2,
    pub end_time: f64,
}

impl SwipeSample {
    #[inline]
    pub fn vector(&self) -> Vec2 {
        self.end - self.start
    }

    #[inline]
    pub fn duration_ms(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// A gesture that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub vector: Vec2,
    pub duration_ms: f64,
}

/// Why a gesture was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeRejection {
    NotPlaying,
    WrongDirection,
    TooShort,
    TooSlow,
    ShuttleOutOfReach,
}

#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    start: Vec2,
    start_time: f64,
}

/// Single-gesture swipe state machine
#[derive(Debug, Clone, Default)]
pub struct SwipeInterpreter {
    active: Option<ActiveGesture>,
}

impl SwipeInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is currently being tracked
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Pointer went down. Recorded only during play and on the player's half.
    pub fn begin(&mut self, pos: Vec2, time: f64, ctx: &SwipeContext) {
        if !ctx.playing {
            return;
        }
        if pos.x > ctx.screen_width / 2.0 {
            log::trace!("Swipe start on opponent side ignored at ({:.0}, {:.0})", pos.x, pos.y);
            return;
        }
        self.active = Some(ActiveGesture {
            start: pos,
            start_time: time,
        });
    }

    /// Pointer moved. Returns the trail segment to draw, if tracking.
    pub fn movement(&self, pos: Vec2) -> Option<(Vec2, Vec2)> {
        self.active.map(|g| (g.start, pos))
    }

    /// Pointer released. Yields a swipe if the gesture is a legal hit.
    ///
    /// Tracking state is cleared either way.
    pub fn end(&mut self, pos: Vec2, time: f64, ctx: &SwipeContext) -> Option<Swipe> {
        let gesture = self.active.take()?;
        let sample = SwipeSample {
            start: gesture.start,
            start_time: gesture.start_time,
            end: pos,
            end_time: time,
        };

        match validate(&sample, ctx) {
            Ok(swipe) => Some(swipe),
            Err(reason) => {
                log::debug!(
                    "Swipe dropped ({:?}): vector={:?} duration={:.0}ms",
                    reason,
                    sample.vector(),
                    sample.duration_ms()
                );
                None
            }
        }
    }

    /// Abandon any gesture in flight
    pub fn reset(&mut self) {
        self.active = None;
    }
}

/// Check a completed gesture against the hit rules
pub fn validate(sample: &SwipeSample, ctx: &SwipeContext) -> Result<Swipe, SwipeRejection> {
    if !ctx.playing {
        return Err(SwipeRejection::NotPlaying);
    }

    let vector = sample.vector();
    let duration_ms = sample.duration_ms();

    if vector.x <= 0.0 {
        return Err(SwipeRejection::WrongDirection);
    }
    if vector.length() <= SWIPE_MIN_DISTANCE {
        return Err(SwipeRejection::TooShort);
    }
    if duration_ms >= SWIPE_MAX_DURATION_MS {
        return Err(SwipeRejection::TooSlow);
    }

    let reach = ctx.screen_width / 2.0 + ctx.side_tolerance;
    match ctx.shuttle_x {
        Some(x) if x <= reach => Ok(Swipe {
            vector,
            duration_ms,
        }),
        _ => Err(SwipeRejection::ShuttleOutOfReach),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(shuttle_x: f32) -> SwipeContext {
        SwipeContext {
            playing: true,
            screen_width: 800.0,
            shuttle_x: Some(shuttle_x),
            side_tolerance: SWIPE_SIDE_TOLERANCE,
        }
    }

    #[test]
    fn test_valid_swipe() {
        let mut swipe = SwipeInterpreter::new();
        let c = ctx(200.0);
        swipe.begin(Vec2::new(100.0, 500.0), 1000.0, &c);
        assert!(swipe.is_active());

        let hit = swipe.end(Vec2::new(200.0, 480.0), 1150.0, &c);
        assert_eq!(
            hit,
            Some(Swipe {
                vector: Vec2::new(100.0, -20.0),
                duration_ms: 150.0
            })
        );
        assert!(!swipe.is_active());
    }

    #[test]
    fn test_start_on_opponent_side_ignored() {
        let mut swipe = SwipeInterpreter::new();
        let c = ctx(200.0);
        swipe.begin(Vec2::new(500.0, 500.0), 0.0, &c);
        assert!(!swipe.is_active());
        assert_eq!(swipe.end(Vec2::new(700.0, 500.0), 100.0, &c), None);
    }

    #[test]
    fn test_start_while_not_playing_ignored() {
        let mut swipe = SwipeInterpreter::new();
        let c = SwipeContext {
            playing: false,
            ..ctx(200.0)
        };
        swipe.begin(Vec2::new(100.0, 500.0), 0.0, &c);
        assert!(!swipe.is_active());
    }

    #[test]
    fn test_leftward_swipe_rejected() {
        let mut swipe = SwipeInterpreter::new();
        let c = ctx(200.0);
        swipe.begin(Vec2::new(300.0, 500.0), 0.0, &c);
        assert_eq!(swipe.end(Vec2::new(250.0, 510.0), 200.0, &c), None);
        assert!(!swipe.is_active());
    }

    #[test]
    fn test_rejection_reasons() {
        let c = ctx(200.0);
        let sample = |end: Vec2, end_time: f64| SwipeSample {
            start: Vec2::new(100.0, 500.0),
            start_time: 0.0,
            end,
            end_time,
        };

        assert_eq!(
            validate(&sample(Vec2::new(120.0, 500.0), 100.0), &c),
            Err(SwipeRejection::TooShort)
        );
        assert_eq!(
            validate(&sample(Vec2::new(300.0, 500.0), 1000.0), &c),
            Err(SwipeRejection::TooSlow)
        );
        assert_eq!(
            validate(&sample(Vec2::new(100.0, 300.0), 100.0), &c),
            Err(SwipeRejection::WrongDirection)
        );
        assert_eq!(
            validate(&sample(Vec2::new(300.0, 500.0), 100.0), &ctx(600.0)),
            Err(SwipeRejection::ShuttleOutOfReach)
        );
        let no_shuttle = SwipeContext {
            shuttle_x: None,
            ..c
        };
        assert_eq!(
            validate(&sample(Vec2::new(300.0, 500.0), 100.0), &no_shuttle),
            Err(SwipeRejection::ShuttleOutOfReach)
        );
    }

    #[test]
    fn test_midline_tolerance() {
        let mut swipe = SwipeInterpreter::new();
        // Just past the midline still counts
        let c = ctx(405.0);
        swipe.begin(Vec2::new(100.0, 500.0), 0.0, &c);
        assert!(swipe.end(Vec2::new(200.0, 450.0), 100.0, &c).is_some());
    }

    #[test]
    fn test_stale_gesture_dropped() {
        let mut swipe = SwipeInterpreter::new();
        swipe.begin(Vec2::new(100.0, 500.0), 0.0, &ctx(200.0));
        let ended = SwipeContext {
            playing: false,
            ..ctx(200.0)
        };
        assert_eq!(swipe.end(Vec2::new(250.0, 450.0), 100.0, &ended), None);
        assert!(!swipe.is_active());
    }

    #[test]
    fn test_movement_trail() {
        let mut swipe = SwipeInterpreter::new();
        assert_eq!(swipe.movement(Vec2::new(1.0, 1.0)), None);
        swipe.begin(Vec2::new(100.0, 500.0), 0.0, &ctx(200.0));
        assert_eq!(
            swipe.movement(Vec2::new(150.0, 480.0)),
            Some((Vec2::new(100.0, 500.0), Vec2::new(150.0, 480.0)))
        );
        swipe.reset();
        assert!(!swipe.is_active());
    }
}
