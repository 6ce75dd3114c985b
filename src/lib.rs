//! One Jump - deterministic core for a fall/steer/land game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, landing)
//! - `tuning`: Data-driven level balance
//! - `progress`: Grades, stars, unlocks, high score
//! - `persistence`: Save record and pluggable progress store
//!
//! The crate is a library: a host render loop feeds per-frame `dt` and a
//! steer axis into [`sim::FallSimulation::tick`] and draws whatever comes
//! back. On a terminal [`sim::ScoreCard`] the host hands the card to
//! [`progress::ProgressTracker::complete_level`] and shows the summary.

pub mod persistence;
pub mod progress;
pub mod sim;
pub mod tuning;

pub use persistence::{LevelProgress, MemoryStore, ProgressStore, RunStats, SaveRecord};
pub use progress::{Grade, GradingPolicy, LevelSummary, ProgressTracker};
pub use sim::{
    Aabb, FallSimulation, FrameResult, LandingZone, ObstacleField, Phase, PlayerState, ScoreCard,
};
pub use tuning::{LevelConfig, TOTAL_LEVELS, level_config};

/// Game configuration constants
pub mod consts {
    /// Playfield width in world units
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_CENTER_X: f32 = 960.0;

    /// Walking speed on the ledge
    pub const WALK_SPEED: f32 = 150.0;
    /// X coordinate where the ledge ends and the fall begins
    pub const CLIFF_EDGE_X: f32 = 300.0;

    /// Gravity when no level override applies (units/s²)
    pub const GRAVITY_BASE: f32 = 300.0;
    /// Terminal fall velocity
    pub const MAX_FALL_SPEED: f32 = 800.0;
    /// Horizontal steering speed while airborne (input-direct, not accelerated)
    pub const HORIZONTAL_SPEED: f32 = 400.0;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Spawn X on the ledge
    pub const PLAYER_START_X: f32 = 100.0;

    /// World Y the fall distance is measured from
    pub const FALL_START_Y: f32 = 200.0;
    /// Top of the landing band
    pub const GROUND_TOP_Y: f32 = 8200.0;
    /// Vertical extent of the landing band below [`GROUND_TOP_Y`]
    pub const LANDING_BAND: f32 = 40.0;

    /// Near-miss distance tiers, center-to-center, ascending
    pub const NEAR_MISS_TIERS: [f32; 3] = [50.0, 100.0, 150.0];

    /// Obstacle rows start this far below the fall start
    pub const FIELD_START_OFFSET: f32 = 300.0;
    /// Side margins for non-wall obstacle placement
    pub const FIELD_MARGIN_LEFT: f32 = 100.0;
    pub const FIELD_MARGIN_RIGHT: f32 = 200.0;
    /// Row jitter as a fraction of the spacing
    pub const SPACING_JITTER: f32 = 0.67;

    // Per-kind obstacle sizes
    pub const SPIKE_SIZE_MIN: f32 = 30.0;
    pub const SPIKE_SIZE_MAX: f32 = 50.0;
    pub const PLATFORM_WIDTH_MIN: f32 = 80.0;
    pub const PLATFORM_WIDTH_MAX: f32 = 180.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const SPINNER_SIZE: f32 = 120.0;
    pub const WALL_WIDTH: f32 = 150.0;
    pub const WALL_HEIGHT: f32 = 30.0;
    /// Cosmetic spinner rotation rate range (radians/s)
    pub const SPIN_SPEED_MIN: f32 = 1.2;
    pub const SPIN_SPEED_MAX: f32 = 3.0;
}
