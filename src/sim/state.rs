//! Player kinematic state and run outcomes

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::consts::*;

/// Phase of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// On the ledge, before the drop
    Walking,
    /// Airborne, steering through the field
    Falling,
    /// Touched down in the pad band
    Landed,
    /// Hit an obstacle or the ground
    Crashed,
}

impl Phase {
    /// Landed and Crashed freeze the run until an explicit reset
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Landed | Phase::Crashed)
    }
}

/// Which way the sprite faces (last nonzero steer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Player kinematic state, mutated every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// World coordinates, y grows downward
    pub position: Vec2,
    /// Units/second
    pub velocity: Vec2,
    pub phase: Phase,
    pub facing: Facing,
}

impl PlayerState {
    /// Fresh state on the ledge
    pub fn at_start() -> Self {
        Self {
            position: Vec2::new(PLAYER_START_X, FALL_START_Y - PLAYER_HEIGHT),
            velocity: Vec2::ZERO,
            phase: Phase::Walking,
            facing: Facing::Right,
        }
    }

    /// Player hitbox centered on the position
    pub fn bounds(&self) -> Aabb {
        Aabb::centered_on(self.position, PLAYER_WIDTH, PLAYER_HEIGHT)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Landed on a scoring pad
    PadHit,
    /// Reached the pad band but hit no pad
    Missed,
    /// Hit an obstacle or fell past the band
    Crash,
}

/// Terminal outcome of one run.
///
/// Built exactly once, on the tick that ends the run, then handed to the
/// progress tracker and the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub outcome: Outcome,
    /// Pad points; 0 for a miss or crash
    pub points: u32,
    /// Pad label, or "MISSED"/"CRASHED"
    pub label: String,
    /// Meters-equivalent: floor((y - fall start) / 10)
    pub distance_fallen: i64,
    /// Seconds from the start of the fall to the terminal tick
    pub elapsed: f32,
    /// Obstacles passed inside the tightest near-miss tier
    pub near_misses: u32,
}

/// RNG seed wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_state() {
        let state = PlayerState::at_start();
        assert_eq!(state.phase, Phase::Walking);
        assert_eq!(state.position, Vec2::new(100.0, 120.0));
        assert_eq!(state.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_bounds_centered() {
        let state = PlayerState::at_start();
        let bounds = state.bounds();
        assert_eq!(bounds.width, PLAYER_WIDTH);
        assert_eq!(bounds.height, PLAYER_HEIGHT);
        assert_eq!(bounds.center(), state.position);
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!Phase::Walking.is_terminal());
        assert!(!Phase::Falling.is_terminal());
        assert!(Phase::Landed.is_terminal());
        assert!(Phase::Crashed.is_terminal());
    }

    #[test]
    fn test_rng_state_replays() {
        use rand::Rng;
        let mut a = RngState::new(42).to_rng();
        let mut b = RngState::new(42).to_rng();
        for _ in 0..16 {
            assert_eq!(a.random_range(0..1000), b.random_range(0..1000));
        }
    }
}
