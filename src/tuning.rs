//! Data-driven level balance
//!
//! Ten stages of one long fall, from orbit down to the campus fountain.
//! Only the numeric fields the simulation and progression consume live
//! here; names are along for display and flavor stays with the
//! presentation layer.

/// Balance numbers for one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    pub id: u32,
    pub name: &'static str,
    /// Score the grade and star tables measure against
    pub target_score: u32,
    /// Par time in seconds
    pub duration: f32,
    /// Gravity override for the fall (units/s²)
    pub gravity: f32,
    pub obstacle_count: u32,
    pub obstacle_spacing: f32,
}

pub const TOTAL_LEVELS: u32 = 10;

const LEVELS: [LevelConfig; TOTAL_LEVELS as usize] = [
    LevelConfig {
        id: 1,
        name: "The Cosmic Perch",
        target_score: 10_000,
        duration: 30.0,
        gravity: 200.0,
        obstacle_count: 20,
        obstacle_spacing: 250.0,
    },
    LevelConfig {
        id: 2,
        name: "Thermosphere Thunder",
        target_score: 20_000,
        duration: 45.0,
        gravity: 350.0,
        obstacle_count: 30,
        obstacle_spacing: 180.0,
    },
    LevelConfig {
        id: 3,
        name: "Aurora Alley",
        target_score: 35_000,
        duration: 50.0,
        gravity: 450.0,
        obstacle_count: 35,
        obstacle_spacing: 160.0,
    },
    LevelConfig {
        id: 4,
        name: "Jetstream Junction",
        target_score: 50_000,
        duration: 55.0,
        gravity: 500.0,
        obstacle_count: 40,
        obstacle_spacing: 150.0,
    },
    LevelConfig {
        id: 5,
        name: "Cloud Nine Chaos",
        target_score: 70_000,
        duration: 60.0,
        gravity: 520.0,
        obstacle_count: 45,
        obstacle_spacing: 140.0,
    },
    LevelConfig {
        id: 6,
        name: "Storm Surge",
        target_score: 90_000,
        duration: 65.0,
        gravity: 540.0,
        obstacle_count: 50,
        obstacle_spacing: 130.0,
    },
    LevelConfig {
        id: 7,
        name: "Bird Brigade",
        target_score: 110_000,
        duration: 70.0,
        gravity: 560.0,
        obstacle_count: 55,
        obstacle_spacing: 120.0,
    },
    LevelConfig {
        id: 8,
        name: "Helicopter Heights",
        target_score: 135_000,
        duration: 75.0,
        gravity: 580.0,
        obstacle_count: 60,
        obstacle_spacing: 110.0,
    },
    LevelConfig {
        id: 9,
        name: "Skyscraper Slalom",
        target_score: 160_000,
        duration: 80.0,
        gravity: 600.0,
        obstacle_count: 65,
        obstacle_spacing: 100.0,
    },
    LevelConfig {
        id: 10,
        name: "Campus Crashdown",
        target_score: 200_000,
        duration: 90.0,
        gravity: 600.0,
        obstacle_count: 70,
        obstacle_spacing: 90.0,
    },
];

/// Balance table lookup. Out-of-range level numbers clamp to the nearest
/// valid level instead of failing.
pub fn level_config(level: u32) -> &'static LevelConfig {
    if !(1..=TOTAL_LEVELS).contains(&level) {
        log::warn!("no level {level}, clamping to the nearest");
    }
    let index = level.clamp(1, TOTAL_LEVELS) - 1;
    &LEVELS[index as usize]
}
