//! Computer opponent
//!
//! Watches the shuttlecock every tick. Once it crosses onto the opponent's
//! half heading away from the player, the opponent waits a human-ish reaction
//! delay and then returns it with a randomly chosen shot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::*;

/// Shot archetypes the opponent can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotKind {
    Smash,
    Drive,
    Clear,
    DropShot,
}

impl ShotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotKind::Smash => "smash",
            ShotKind::Drive => "drive",
            ShotKind::Clear => "clear",
            ShotKind::DropShot => "drop shot",
        }
    }
}

/// Probability and velocity ranges for one shot archetype
#[derive(Debug, Clone, Copy)]
pub struct ShotProfile {
    pub kind: ShotKind,
    pub probability: f32,
    pub horizontal: (f32, f32),
    pub vertical: (f32, f32),
}

/// Shot table, in selection order. Probabilities sum to 1.
pub const SHOT_TABLE: [ShotProfile; 4] = [
    ShotProfile {
        kind: ShotKind::Smash,
        probability: 0.30,
        horizontal: (-900.0, -700.0),
        vertical: (100.0, 250.0),
    },
    ShotProfile {
        kind: ShotKind::Drive,
        probability: 0.30,
        horizontal: (-750.0, -600.0),
        vertical: (-50.0, 50.0),
    },
    ShotProfile {
        kind: ShotKind::Clear,
        probability: 0.25,
        horizontal: (-500.0, -400.0),
        vertical: (-350.0, -250.0),
    },
    ShotProfile {
        kind: ShotKind::DropShot,
        probability: 0.15,
        horizontal: (-400.0, -300.0),
        vertical: (-150.0, -100.0),
    },
];

/// Used when the cumulative table falls short of the draw
const FALLBACK_SHOT: (ShotKind, Vec2) = (ShotKind::Drive, Vec2::new(-650.0, 0.0));

/// A committed return
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub kind: ShotKind,
    pub velocity: Vec2,
}

/// Per-rally opponent memory
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OpponentAiState {
    /// Already returned on this approach
    pub has_hit: bool,
    /// Timestamp (ms) at which the scheduled swing lands
    pub hit_timer: Option<f64>,
    /// Approach lost to an out-of-reach shuttle
    pub forfeited: bool,
}

/// Reactive computer opponent
#[derive(Debug, Clone, Default)]
pub struct OpponentController {
    state: OpponentAiState,
}

impl OpponentController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> OpponentAiState {
        self.state
    }

    /// Forget any approach in progress (serve, rally end)
    pub fn reset(&mut self) {
        self.state = OpponentAiState::default();
    }

    /// Decide whether the opponent returns the shuttle this tick.
    ///
    /// `ceiling` is the court's far edge; anything more than 100 units above
    /// it is out of reach and costs the opponent the whole approach.
    pub fn update(
        &mut self,
        pos: Vec2,
        vel: Vec2,
        screen_width: f32,
        ceiling: Option<f32>,
        now_ms: f64,
        rng: &mut dyn RandomSource,
    ) -> Option<Shot> {
        let midline = screen_width / 2.0;

        if pos.x < midline && vel.x < 0.0 {
            // Back on the player's side: re-arm for the next approach
            self.state.has_hit = false;
            self.state.forfeited = false;
            return None;
        }

        if pos.x <= midline || vel.x <= 0.0 || self.state.has_hit || self.state.forfeited {
            return None;
        }

        if let Some(ceiling) = ceiling {
            let max_reach = ceiling - OPPONENT_REACH_ABOVE_CEILING;
            if pos.y < max_reach {
                log::debug!(
                    "Shuttle out of reach: y={:.1}, max reachable {:.1}",
                    pos.y,
                    max_reach
                );
                self.state.forfeited = true;
                self.state.hit_timer = None;
                return None;
            }
        }

        let due = match self.state.hit_timer {
            Some(due) => due,
            None => {
                let delay = rng.range(
                    OPPONENT_MIN_REACTION_MS as f32,
                    OPPONENT_MAX_REACTION_MS as f32,
                ) as f64;
                log::debug!("Opponent swinging in {:.0}ms", delay);
                let due = now_ms + delay;
                self.state.hit_timer = Some(due);
                due
            }
        };

        if now_ms < due {
            return None;
        }

        let shot = select_shot(rng);
        self.state.has_hit = true;
        self.state.hit_timer = None;
        log::debug!(
            "Opponent returns with {}: vel({:.0}, {:.0})",
            shot.kind.as_str(),
            shot.velocity.x,
            shot.velocity.y
        );
        Some(shot)
    }
}

/// Pick a shot archetype and sample its velocity, plus placement jitter
pub fn select_shot(rng: &mut dyn RandomSource) -> Shot {
    let (kind, base) = pick_archetype(rng);
    let jitter = (rng.unit() - 0.5) * 2.0 * OPPONENT_PLACEMENT_JITTER;
    Shot {
        kind,
        velocity: Vec2::new(base.x, base.y + jitter),
    }
}

fn pick_archetype(rng: &mut dyn RandomSource) -> (ShotKind, Vec2) {
    let draw = rng.unit();
    let mut cumulative = 0.0;

    for profile in &SHOT_TABLE {
        cumulative += profile.probability;
        if draw < cumulative {
            let vx = rng.range(profile.horizontal.0, profile.horizontal.1);
            let vy = rng.range(profile.vertical.0, profile.vertical.1);
            return (profile.kind, Vec2::new(vx, vy));
        }
    }

    log::warn!("Shot selection fell through (draw {draw}), playing a drive");
    FALLBACK_SHOT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{GameRng, ScriptedRng};
    use std::collections::HashMap;

    const WIDTH: f32 = 800.0;
    const CEILING: f32 = 380.0;

    fn approaching() -> (Vec2, Vec2) {
        (Vec2::new(600.0, 400.0), Vec2::new(500.0, -50.0))
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let total: f32 = SHOT_TABLE.iter().map(|s| s.probability).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reaction_delay_then_hit() {
        let mut ai = OpponentController::new();
        // 0.5 -> 300ms delay
        let mut rng = ScriptedRng::new(&[0.5]);
        let (pos, vel) = approaching();

        assert!(ai.update(pos, vel, WIDTH, Some(CEILING), 1000.0, &mut rng).is_none());
        assert_eq!(ai.state().hit_timer, Some(1300.0));

        assert!(ai.update(pos, vel, WIDTH, Some(CEILING), 1299.0, &mut rng).is_none());
        let shot = ai.update(pos, vel, WIDTH, Some(CEILING), 1300.0, &mut rng);
        assert!(shot.is_some());
        assert!(ai.state().has_hit);
        assert_eq!(ai.state().hit_timer, None);
    }

    #[test]
    fn test_one_hit_per_approach() {
        let mut ai = OpponentController::new();
        let mut rng = GameRng::new(1);
        let (pos, vel) = approaching();

        let mut hits = 0;
        for t in 0..200 {
            if ai.update(pos, vel, WIDTH, None, t as f64 * 16.0, &mut rng).is_some() {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_rearms_when_back_on_player_side() {
        let mut ai = OpponentController::new();
        let mut rng = GameRng::new(3);
        let (pos, vel) = approaching();

        ai.update(pos, vel, WIDTH, None, 0.0, &mut rng);
        assert!(ai.update(pos, vel, WIDTH, None, 1000.0, &mut rng).is_some());
        assert!(ai.state().has_hit);

        ai.update(Vec2::new(200.0, 400.0), Vec2::new(-400.0, 0.0), WIDTH, None, 1100.0, &mut rng);
        assert!(!ai.state().has_hit);
    }

    #[test]
    fn test_ignores_shuttle_moving_left() {
        let mut ai = OpponentController::new();
        let mut rng = GameRng::new(9);
        for t in 0..100 {
            let hit = ai.update(
                Vec2::new(600.0, 400.0),
                Vec2::new(-300.0, 0.0),
                WIDTH,
                None,
                t as f64 * 100.0,
                &mut rng,
            );
            assert!(hit.is_none());
        }
        assert_eq!(ai.state().hit_timer, None);
    }

    #[test]
    fn test_out_of_reach_never_hits() {
        let mut ai = OpponentController::new();
        let mut rng = GameRng::new(11);
        let pos = Vec2::new(600.0, CEILING - 100.5);
        let vel = Vec2::new(400.0, 0.0);

        for t in 0..1000 {
            assert!(ai.update(pos, vel, WIDTH, Some(CEILING), t as f64 * 50.0, &mut rng).is_none());
        }
        assert_eq!(ai.state().hit_timer, None);
    }

    #[test]
    fn test_forfeit_lasts_whole_approach() {
        let mut ai = OpponentController::new();
        let mut rng = GameRng::new(12);
        let vel = Vec2::new(400.0, 50.0);

        ai.update(Vec2::new(500.0, 200.0), vel, WIDTH, Some(CEILING), 0.0, &mut rng);
        assert!(ai.state().forfeited);

        // Drops back into reach while still approaching
        for t in 1..50 {
            let hit = ai.update(Vec2::new(650.0, 420.0), vel, WIDTH, Some(CEILING), t as f64 * 100.0, &mut rng);
            assert!(hit.is_none());
        }

        // Next approach is live again
        ai.update(Vec2::new(300.0, 420.0), Vec2::new(-400.0, 0.0), WIDTH, Some(CEILING), 6000.0, &mut rng);
        assert!(!ai.state().forfeited);
    }

    #[test]
    fn test_no_ceiling_skips_reach_check() {
        let mut ai = OpponentController::new();
        let mut rng = ScriptedRng::new(&[0.0]);
        let pos = Vec2::new(600.0, -20.0);
        let vel = Vec2::new(400.0, 0.0);
        ai.update(pos, vel, WIDTH, None, 0.0, &mut rng);
        assert!(ai.update(pos, vel, WIDTH, None, 200.0, &mut rng).is_some());
    }

    #[test]
    fn test_selection_order_and_ranges() {
        // draw, vx, vy, jitter
        let mut rng = ScriptedRng::new(&[0.1, 0.0, 0.0, 0.5]);
        let shot = select_shot(&mut rng);
        assert_eq!(shot.kind, ShotKind::Smash);
        assert_eq!(shot.velocity, Vec2::new(-900.0, 100.0));

        let mut rng = ScriptedRng::new(&[0.95, 0.5, 0.5, 0.5]);
        let shot = select_shot(&mut rng);
        assert_eq!(shot.kind, ShotKind::DropShot);
        assert_eq!(shot.velocity, Vec2::new(-350.0, -125.0));
    }

    #[test]
    fn test_fallback_drive() {
        let mut rng = ScriptedRng::new(&[1.0, 0.5]);
        let shot = select_shot(&mut rng);
        assert_eq!(shot.kind, ShotKind::Drive);
        assert_eq!(shot.velocity, Vec2::new(-650.0, 0.0));
    }

    #[test]
    fn test_every_shot_heads_toward_player() {
        let mut rng = GameRng::new(77);
        for _ in 0..5_000 {
            let shot = select_shot(&mut rng);
            assert!(shot.velocity.x < 0.0);
            let profile = SHOT_TABLE.iter().find(|p| p.kind == shot.kind).unwrap();
            assert!(shot.velocity.x >= profile.horizontal.0 && shot.velocity.x <= profile.horizontal.1);
            assert!(shot.velocity.y >= profile.vertical.0 - 20.0);
            assert!(shot.velocity.y <= profile.vertical.1 + 20.0);
        }
    }

    #[test]
    fn test_shot_distribution() {
        let mut rng = GameRng::new(20240601);
        let trials = 100_000;
        let mut counts: HashMap<ShotKind, u32> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(select_shot(&mut rng).kind).or_default() += 1;
        }
        for profile in &SHOT_TABLE {
            let observed = counts.get(&profile.kind).copied().unwrap_or(0) as f32 / trials as f32;
            assert!(
                (observed - profile.probability).abs() < 0.01,
                "{} observed {observed}, expected {}",
                profile.kind.as_str(),
                profile.probability
            );
        }
    }
}
