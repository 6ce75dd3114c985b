//! Per-frame fall state machine
//!
//! The host loop drives this once per frame with elapsed seconds and a steer
//! axis. One run is WALKING -> FALLING -> LANDED or CRASHED; the terminal
//! phases freeze the state until an explicit reset.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, near_miss_tier};
use super::landing::{LandingZone, Touchdown};
use super::obstacles::ObstacleField;
use super::state::{Facing, Outcome, Phase, PlayerState, ScoreCard};
use crate::consts::*;
use crate::tuning::LevelConfig;

/// What one tick reports back to the host
#[derive(Debug, Clone)]
pub struct FrameResult {
    pub state: PlayerState,
    /// Present only on the tick that ends the run
    pub terminal: Option<ScoreCard>,
}

/// One fall run: the player plus the level geometry it falls through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallSimulation {
    state: PlayerState,
    field: ObstacleField,
    zone: LandingZone,
    gravity: f32,
    /// Simulation clock, seconds since reset
    clock: f32,
    fall_started_at: Option<f32>,
    /// Obstacles already credited as near misses this run
    near_miss_seen: Vec<bool>,
    near_misses: u32,
}

impl FallSimulation {
    pub fn new(field: ObstacleField, zone: LandingZone) -> Self {
        Self::with_gravity(field, zone, GRAVITY_BASE)
    }

    pub fn with_gravity(field: ObstacleField, zone: LandingZone, gravity: f32) -> Self {
        let near_miss_seen = vec![false; field.len()];
        Self {
            state: PlayerState::at_start(),
            field,
            zone,
            gravity,
            clock: 0.0,
            fall_started_at: None,
            near_miss_seen,
            near_misses: 0,
        }
    }

    /// Build a run for one level of the campaign: obstacle field generated
    /// from the level's balance numbers, standard pads, level gravity.
    pub fn for_level(config: &LevelConfig, rng: &mut impl Rng) -> Self {
        let field = ObstacleField::generate(
            config.obstacle_count,
            config.obstacle_spacing,
            SCREEN_WIDTH,
            FALL_START_Y + FIELD_START_OFFSET,
            rng,
        );
        let zone = LandingZone::with_default_pads(GROUND_TOP_Y, SCREEN_CENTER_X);
        Self::with_gravity(field, zone, config.gravity)
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    pub fn zone(&self) -> &LandingZone {
        &self.zone
    }

    /// Player hitbox, 60x80 centered on the position
    pub fn bounds(&self) -> Aabb {
        self.state.bounds()
    }

    /// Meters-equivalent fallen so far: floor((y - fall start) / 10).
    /// Negative while the player is still up on the ledge.
    pub fn distance_fallen(&self) -> i64 {
        ((self.state.position.y - FALL_START_Y) / 10.0).floor() as i64
    }

    /// Advance one frame.
    ///
    /// `steer` is clamped to [-1, 1] and a negative `dt` is treated as zero;
    /// the simulation never halts the host loop over bad input. Once the run
    /// has ended, ticks are no-ops and `terminal` stays `None` - the score
    /// card is handed out exactly once, on the transitioning tick.
    pub fn tick(&mut self, dt: f32, steer: i32) -> FrameResult {
        let dt = dt.max(0.0);
        let steer = steer.clamp(-1, 1) as f32;
        self.clock += dt;

        if !self.state.phase.is_terminal() {
            if steer > 0.0 {
                self.state.facing = Facing::Right;
            } else if steer < 0.0 {
                self.state.facing = Facing::Left;
            }
        }

        let terminal = match self.state.phase {
            Phase::Walking => {
                self.tick_walking(dt, steer);
                None
            }
            Phase::Falling => self.tick_falling(dt, steer),
            Phase::Landed | Phase::Crashed => None,
        };

        FrameResult {
            state: self.state,
            terminal,
        }
    }

    /// Back to the ledge: fresh kinematics, cleared timers and near-miss
    /// bookkeeping, spinners rewound. Obstacle positions are untouched.
    pub fn reset(&mut self) {
        self.state = PlayerState::at_start();
        self.clock = 0.0;
        self.fall_started_at = None;
        self.near_misses = 0;
        self.near_miss_seen = vec![false; self.field.len()];
        self.field.reset();
    }

    fn tick_walking(&mut self, dt: f32, steer: f32) {
        self.state.position.x += steer * WALK_SPEED * dt;
        if self.state.position.x >= CLIFF_EDGE_X {
            self.state.velocity = Vec2::ZERO;
            self.state.phase = Phase::Falling;
            self.fall_started_at = Some(self.clock);
            log::debug!("walked off the ledge at x={:.0}", self.state.position.x);
        }
    }

    fn tick_falling(&mut self, dt: f32, steer: f32) -> Option<ScoreCard> {
        let state = &mut self.state;
        state.velocity.y = (state.velocity.y + self.gravity * dt).min(MAX_FALL_SPEED);
        state.velocity.x = steer * HORIZONTAL_SPEED;
        state.position += state.velocity * dt;

        // Hard walls: position clamps, velocity keeps its sign
        let half = PLAYER_WIDTH / 2.0;
        state.position.x = state.position.x.clamp(half, SCREEN_WIDTH - half);

        self.field.advance(dt);

        let bounds = self.state.bounds();
        let hit = self
            .field
            .active_obstacles()
            .iter()
            .any(|obstacle| bounds.intersects(&obstacle.bounds));
        if hit {
            return Some(self.finish(Outcome::Crash, 0, "CRASHED"));
        }

        self.credit_near_misses(&bounds);

        match self.zone.classify(&bounds) {
            Some(Touchdown::Pad { points, label }) => {
                Some(self.finish(Outcome::PadHit, points, label.as_str()))
            }
            Some(Touchdown::Missed) => Some(self.finish(Outcome::Missed, 0, "MISSED")),
            Some(Touchdown::Crash) => Some(self.finish(Outcome::Crash, 0, "CRASHED")),
            None => None,
        }
    }

    /// Credit each obstacle at most once per run, tightest tier only
    fn credit_near_misses(&mut self, bounds: &Aabb) {
        let center = bounds.center();
        for (i, obstacle) in self.field.active_obstacles().iter().enumerate() {
            if self.near_miss_seen[i] {
                continue;
            }
            if let Some(miss) = near_miss_tier(center, obstacle.bounds.center(), &NEAR_MISS_TIERS)
                && miss.tier == 0
            {
                self.near_miss_seen[i] = true;
                self.near_misses += 1;
            }
        }
    }

    fn finish(&mut self, outcome: Outcome, points: u32, label: &str) -> ScoreCard {
        self.state.phase = match outcome {
            Outcome::Crash => Phase::Crashed,
            Outcome::PadHit | Outcome::Missed => Phase::Landed,
        };
        self.state.velocity = Vec2::ZERO;

        let distance_fallen = self.distance_fallen();
        let elapsed = self.fall_started_at.map_or(0.0, |start| self.clock - start);
        log::debug!("run over: {label} ({points} pts, {distance_fallen}m, {elapsed:.1}s)");

        ScoreCard {
            outcome,
            points,
            label: label.to_string(),
            distance_fallen,
            elapsed,
            near_misses: self.near_misses,
        }
    }
}
