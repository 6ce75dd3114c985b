//! Persisted progress record and the store that holds it
//!
//! The record is one flat JSON-serializable blob per installation. Stores
//! are synchronous and fire-and-forget: `load` answers `None` for missing or
//! corrupt data, `save` swallows its own write errors. Progress math never
//! waits on, or fails because of, a store.

use serde::{Deserialize, Serialize};

use crate::progress::Grade;
use crate::sim::{Outcome, ScoreCard};
use crate::tuning::TOTAL_LEVELS;

/// Format version for the save blob
pub const SAVE_VERSION: u32 = 1;

fn unset_time() -> f32 {
    f32::INFINITY
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn time_is_unset(time: &f32) -> bool {
    time.is_infinite()
}

/// Best results for one level.
///
/// `best_time` starts at +infinity; JSON has no way to spell that, so an
/// unset time is simply absent from the blob and restored on load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub best_score: u32,
    pub best_grade: Option<Grade>,
    #[serde(default = "unset_time", skip_serializing_if = "time_is_unset")]
    pub best_time: f32,
    pub stars: u8,
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self {
            best_score: 0,
            best_grade: None,
            best_time: f32::INFINITY,
            stars: 0,
        }
    }
}

/// Lifetime counters across every run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub games_played: u32,
    pub total_falls: u32,
    /// Meters, summed over runs
    pub total_distance: i64,
    pub perfect_landings: u32,
    pub great_landings: u32,
    pub good_landings: u32,
    pub crashes: u32,
    pub near_misses: u32,
}

impl RunStats {
    /// Fold one finished run into the counters
    pub fn fold(&mut self, card: &ScoreCard) {
        self.games_played += 1;
        self.total_falls += 1;
        self.total_distance += card.distance_fallen.max(0);
        self.near_misses += card.near_misses;
        match card.outcome {
            Outcome::Crash => self.crashes += 1,
            Outcome::Missed => {}
            Outcome::PadHit => match card.label.as_str() {
                "PERFECT" => self.perfect_landings += 1,
                "GREAT" => self.great_landings += 1,
                _ => self.good_landings += 1,
            },
        }
    }
}

/// The whole persisted blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub version: u32,
    pub high_score: u32,
    /// Highest level number the player may enter, 1-based
    pub highest_unlocked: u32,
    pub levels: Vec<LevelProgress>,
    pub stats: RunStats,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            high_score: 0,
            highest_unlocked: 1,
            levels: vec![LevelProgress::default(); TOTAL_LEVELS as usize],
            stats: RunStats::default(),
        }
    }
}

impl SaveRecord {
    /// Pad or trim the per-level list after deserializing a blob written by
    /// a build with a different level count
    pub fn normalize(&mut self) {
        self.levels
            .resize(TOTAL_LEVELS as usize, LevelProgress::default());
        self.highest_unlocked = self.highest_unlocked.clamp(1, TOTAL_LEVELS);
    }
}

/// Where progress lives between sessions
pub trait ProgressStore {
    fn load(&self) -> Option<SaveRecord>;
    fn save(&mut self, record: &SaveRecord);
}

/// In-memory JSON slot, round-tripped through `serde_json` the way a browser
/// storage slot would be. Tests and native hosts use this; web hosts bring
/// their own LocalStorage-backed implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Option<SaveRecord> {
        let json = self.slot.as_ref()?;
        match serde_json::from_str::<SaveRecord>(json) {
            Ok(mut record) => {
                record.normalize();
                log::info!("progress loaded ({} levels unlocked)", record.highest_unlocked);
                Some(record)
            }
            Err(err) => {
                log::warn!("saved progress unreadable, starting fresh: {err}");
                None
            }
        }
    }

    fn save(&mut self, record: &SaveRecord) {
        match serde_json::to_string(record) {
            Ok(json) => self.slot = Some(json),
            Err(err) => log::warn!("failed to encode progress: {err}"),
        }
    }
}
