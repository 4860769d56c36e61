//! Game state and core simulation types
//!
//! Everything the rally loop reads or mutates lives in `GameState`. Nothing
//! here is persisted; a fresh state starts at 0-0.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::court::CourtGeometry;
use super::flight::depth_scale;
use super::opponent::{OpponentController, ShotKind};
use super::rng::{GameRng, RandomSource};
use super::swipe::{SwipeContext, SwipeInterpreter};
use crate::heading_rotation;
use crate::settings::Settings;

/// Current phase of a rally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RallyState {
    /// Waiting for the first confirm
    Ready,
    /// Shuttlecock live, boundary checks active
    Playing,
    /// Rally over, showing the result until the next confirm
    PointScored,
}

/// Which side struck the shuttlecock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hitter {
    Player,
    Computer,
}

/// How a rally ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RallyEndReason {
    /// Dropped to the floor line
    Floor,
    /// Left the extended playfield
    OutOfBounds,
}

/// Discrete happenings for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Served,
    OpponentSwung { shot: ShotKind },
    PlayerSwung,
    RallyEnded { winner: Hitter, reason: RallyEndReason },
}

/// Running score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub computer: u32,
}

impl Score {
    pub fn award(&mut self, winner: Hitter) {
        match winner {
            Hitter::Player => self.player += 1,
            Hitter::Computer => self.computer += 1,
        }
    }
}

/// The one live game object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shuttlecock {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Shuttlecock {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Sprite orientation from the current velocity
    pub fn rotation(&self) -> f32 {
        heading_rotation(self.vel)
    }
}

/// Complete game state for one session
pub struct GameState {
    pub rally: RallyState,
    pub score: Score,
    pub court: CourtGeometry,
    /// Present from the first serve on
    pub shuttlecock: Option<Shuttlecock>,
    pub last_hitter: Option<Hitter>,
    pub opponent: OpponentController,
    pub swipe: SwipeInterpreter,
    /// Gesture start and latest pointer position while a swipe is held
    pub swipe_trail: Option<(Vec2, Vec2)>,
    /// Frozen between rallies
    pub physics_paused: bool,
    /// Events raised during the latest tick
    pub events: Vec<GameEvent>,
    pub rng: Box<dyn RandomSource>,
    pub side_tolerance: f32,
    /// Last whole second at which kinematics were logged
    pub(crate) last_log_second: Option<i64>,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("rally", &self.rally)
            .field("score", &self.score)
            .field("shuttlecock", &self.shuttlecock)
            .field("last_hitter", &self.last_hitter)
            .field("physics_paused", &self.physics_paused)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// New session from host settings, seeded from `settings.seed`
    pub fn new(settings: &Settings) -> Self {
        Self::with_rng(settings, Box::new(GameRng::new(settings.seed)))
    }

    /// New session with an explicit randomness source
    pub fn with_rng(settings: &Settings, rng: Box<dyn RandomSource>) -> Self {
        let settings = settings.sanitized();
        Self {
            rally: RallyState::Ready,
            score: Score::default(),
            court: CourtGeometry::for_viewport(settings.viewport_width, settings.viewport_height),
            shuttlecock: None,
            last_hitter: None,
            opponent: OpponentController::new(),
            swipe: SwipeInterpreter::new(),
            swipe_trail: None,
            physics_paused: true,
            events: Vec::new(),
            rng,
            side_tolerance: settings.swipe_side_tolerance,
            last_log_second: None,
        }
    }

    #[inline]
    pub fn screen_width(&self) -> f32 {
        self.court.screen_width()
    }

    /// Snapshot of what the swipe interpreter may look at
    pub fn swipe_context(&self) -> SwipeContext {
        SwipeContext {
            playing: self.rally == RallyState::Playing,
            screen_width: self.screen_width(),
            shuttle_x: self.shuttlecock.map(|s| s.pos.x),
            side_tolerance: self.side_tolerance,
        }
    }

    /// Per-frame view for rendering and audio
    pub fn view(&self) -> FrameView {
        let dims = self.court.dimensions();
        FrameView {
            shuttlecock: self.shuttlecock.map(|s| ShuttleView {
                x: s.pos.x,
                y: s.pos.y,
                rotation: s.rotation(),
                depth_scale: depth_scale(s.pos.y, dims.top, dims.bottom),
            }),
            rally: self.rally,
            score: self.score,
            player_anchor: self.court.player_anchor(),
            opponent_anchor: self.court.opponent_anchor(),
            swipe_trail: self.swipe_trail,
            events: self.events.clone(),
        }
    }
}

/// Shuttlecock as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShuttleView {
    pub x: f32,
    pub y: f32,
    /// Radians, sprite points along its velocity
    pub rotation: f32,
    pub depth_scale: f32,
}

/// Everything the presentation layer needs after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub shuttlecock: Option<ShuttleView>,
    pub rally: RallyState,
    pub score: Score,
    pub player_anchor: Vec2,
    pub opponent_anchor: Vec2,
    /// Segment to draw under the player's finger
    pub swipe_trail: Option<(Vec2, Vec2)>,
    pub events: Vec<GameEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(&Settings::default());
        assert_eq!(state.rally, RallyState::Ready);
        assert_eq!(state.score, Score::default());
        assert!(state.shuttlecock.is_none());
        assert!(state.last_hitter.is_none());
        assert!(state.physics_paused);
    }

    #[test]
    fn test_score_award() {
        let mut score = Score::default();
        score.award(Hitter::Player);
        score.award(Hitter::Computer);
        score.award(Hitter::Computer);
        assert_eq!(score, Score { player: 1, computer: 2 });
    }

    #[test]
    fn test_view_serializes() {
        let mut state = GameState::new(&Settings::default());
        state.shuttlecock = Some(Shuttlecock::new(Vec2::new(10.0, 20.0), Vec2::new(0.0, 5.0)));
        state.events.push(GameEvent::RallyEnded {
            winner: Hitter::Player,
            reason: RallyEndReason::Floor,
        });
        let json = serde_json::to_string(&state.view()).unwrap();
        assert!(json.contains("\"rally\":\"Ready\""));
        assert!(json.contains("\"type\":\"rally_ended\""));
        assert!(json.contains("\"winner\":\"player\""));
        assert!(json.contains("\"reason\":\"floor\""));
        assert!(json.contains("\"swipe_trail\":null"));
    }

    #[test]
    fn test_view_depth_scale() {
        let mut state = GameState::new(&Settings::default());
        let bottom = state.court.dimensions().bottom;
        state.shuttlecock = Some(Shuttlecock::new(Vec2::new(10.0, bottom), Vec2::ZERO));
        let view = state.view();
        assert!((view.shuttlecock.unwrap().depth_scale - 1.0).abs() < 1e-6);
    }
}
