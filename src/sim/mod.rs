//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied `dt` only, no wall-clock access
//! - Injected RNG only
//! - No rendering or platform dependencies

pub mod geometry;
pub mod landing;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use geometry::{Aabb, NearMiss, near_miss_tier};
pub use landing::{LandingPad, LandingZone, PadLabel, Touchdown};
pub use obstacles::{Obstacle, ObstacleField, ObstacleKind, WallSide};
pub use state::{Facing, Outcome, Phase, PlayerState, RngState, ScoreCard};
pub use tick::{FallSimulation, FrameResult};
