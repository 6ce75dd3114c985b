//! Grades, stars, unlocks, and the lifetime record
//!
//! [`ProgressTracker`] turns a finished run into a graded summary and folds
//! it into the persisted record through an injected [`ProgressStore`]. The
//! summary is always computed before the save is attempted.

use serde::{Deserialize, Serialize};

use crate::persistence::{LevelProgress, ProgressStore, RunStats, SaveRecord};
use crate::sim::ScoreCard;
use crate::tuning::{LevelConfig, TOTAL_LEVELS, level_config};

/// Letter grade for one level, worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
    S,
    SPlus,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::F => "F",
            Grade::D => "D",
            Grade::C => "C",
            Grade::B => "B",
            Grade::A => "A",
            Grade::S => "S",
            Grade::SPlus => "S+",
        }
    }
}

/// Percentage-of-target grade breakpoints, best grade first.
///
/// Kept as a value so a host can swap in a different table without touching
/// the tracker; the game has shipped more than one.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingPolicy {
    breakpoints: Vec<(f32, Grade)>,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self::new(vec![
            (150.0, Grade::SPlus),
            (125.0, Grade::S),
            (100.0, Grade::A),
            (75.0, Grade::B),
            (50.0, Grade::C),
            (25.0, Grade::D),
        ])
    }
}

impl GradingPolicy {
    pub fn new(mut breakpoints: Vec<(f32, Grade)>) -> Self {
        breakpoints.sort_by(|a, b| b.0.total_cmp(&a.0));
        Self { breakpoints }
    }

    /// Grade `points` against `target`; below every breakpoint is an F
    pub fn grade(&self, points: u32, target: u32) -> Grade {
        let percentage = if target == 0 {
            0.0
        } else {
            points as f32 / target as f32 * 100.0
        };
        self.breakpoints
            .iter()
            .find(|(cut, _)| percentage >= *cut)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }
}

/// Stars for a run: 3 at the target score, 2 at 75%, 1 at 50%
pub fn stars_for(points: u32, target: u32) -> u8 {
    let target = target as u64;
    let scaled = points as u64 * 4;
    if scaled >= target * 4 {
        3
    } else if scaled >= target * 3 {
        2
    } else if scaled >= target * 2 {
        1
    } else {
        0
    }
}

/// Summary handed back to the presentation layer after a level completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    pub grade: Grade,
    pub stars: u8,
    /// This run beat the stored best score
    pub new_best: bool,
    /// This completion unlocked the next level
    pub level_unlocked: bool,
    /// This run beat the installation-wide high score
    pub new_high_score: bool,
}

/// Per-level progression, lifetime statistics, and the high score
pub struct ProgressTracker {
    store: Box<dyn ProgressStore>,
    record: SaveRecord,
    policy: GradingPolicy,
}

impl ProgressTracker {
    /// Load the record from the store, or start fresh
    pub fn new(store: Box<dyn ProgressStore>) -> Self {
        let record = store.load().unwrap_or_else(|| {
            log::info!("no saved progress, starting fresh");
            SaveRecord::default()
        });
        Self {
            store,
            record,
            policy: GradingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: GradingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn level_config(&self, level: u32) -> &'static LevelConfig {
        level_config(level)
    }

    /// Config for a level, or `None` while it is still locked
    pub fn start_level(&self, level: u32) -> Option<&'static LevelConfig> {
        ((1..=TOTAL_LEVELS).contains(&level) && self.is_level_unlocked(level))
            .then(|| level_config(level))
    }

    pub fn is_level_unlocked(&self, level: u32) -> bool {
        level <= self.record.highest_unlocked
    }

    pub fn highest_unlocked(&self) -> u32 {
        self.record.highest_unlocked
    }

    pub fn level_progress(&self, level: u32) -> Option<&LevelProgress> {
        self.record.levels.get(level.checked_sub(1)? as usize)
    }

    pub fn high_score(&self) -> u32 {
        self.record.high_score
    }

    pub fn stats(&self) -> &RunStats {
        &self.record.stats
    }

    pub fn record(&self) -> &SaveRecord {
        &self.record
    }

    /// Fold a finished run into the record and return the graded summary.
    ///
    /// Bests only ever improve: score, grade rank, and stars are monotone
    /// non-decreasing, best time monotone non-increasing. The next level
    /// unlocks when the frontier level is completed with a nonzero score.
    pub fn complete_level(&mut self, level: u32, card: &ScoreCard) -> LevelSummary {
        let config = level_config(level);
        let grade = self.policy.grade(card.points, config.target_score);
        let stars = stars_for(card.points, config.target_score);

        let slot = &mut self.record.levels[(config.id - 1) as usize];
        let new_best = card.points > slot.best_score;
        if new_best {
            slot.best_score = card.points;
        }
        if slot.best_grade.map_or(true, |best| grade > best) {
            slot.best_grade = Some(grade);
        }
        if card.elapsed < slot.best_time {
            slot.best_time = card.elapsed;
        }
        if stars > slot.stars {
            slot.stars = stars;
        }

        let mut level_unlocked = false;
        if card.points > 0
            && config.id == self.record.highest_unlocked
            && config.id < TOTAL_LEVELS
        {
            self.record.highest_unlocked += 1;
            level_unlocked = true;
            log::info!("level {} unlocked", self.record.highest_unlocked);
        }

        let new_high_score = card.points > self.record.high_score;
        if new_high_score {
            self.record.high_score = card.points;
        }

        self.record.stats.fold(card);
        self.store.save(&self.record);

        LevelSummary {
            grade,
            stars,
            new_best,
            level_unlocked,
            new_high_score,
        }
    }

    /// Fold a practice run (no level attached) into the statistics and the
    /// high score. Returns whether the high score fell.
    pub fn record_run(&mut self, card: &ScoreCard) -> bool {
        let new_high_score = card.points > self.record.high_score;
        if new_high_score {
            self.record.high_score = card.points;
        }
        self.record.stats.fold(card);
        self.store.save(&self.record);
        new_high_score
    }

    pub fn total_stars(&self) -> u32 {
        self.record.levels.iter().map(|l| l.stars as u32).sum()
    }

    pub fn total_score(&self) -> u64 {
        self.record.levels.iter().map(|l| l.best_score as u64).sum()
    }

    /// Share of levels completed at least once, in whole percent
    pub fn completion_percentage(&self) -> u32 {
        let completed = self.record.levels.iter().filter(|l| l.best_score > 0).count();
        (completed as f32 / TOTAL_LEVELS as f32 * 100.0).round() as u32
    }

    /// Wipe everything back to defaults and persist the wipe
    pub fn reset_progress(&mut self) {
        self.record = SaveRecord::default();
        self.store.save(&self.record);
        log::info!("progress reset");
    }

    /// Open every level. Debug/testing helper.
    pub fn unlock_all(&mut self) {
        self.record.highest_unlocked = TOTAL_LEVELS;
        self.store.save(&self.record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::Outcome;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn card(points: u32, elapsed: f32) -> ScoreCard {
        let (outcome, label) = if points > 0 {
            (Outcome::PadHit, "GOOD")
        } else {
            (Outcome::Crash, "CRASHED")
        };
        ScoreCard {
            outcome,
            points,
            label: label.to_string(),
            distance_fallen: 800,
            elapsed,
            near_misses: 0,
        }
    }

    fn tracker() -> ProgressTracker {
        ProgressTracker::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_grade_table() {
        let policy = GradingPolicy::default();
        assert_eq!(policy.grade(15_000, 10_000), Grade::SPlus);
        assert_eq!(policy.grade(12_500, 10_000), Grade::S);
        assert_eq!(policy.grade(10_000, 10_000), Grade::A);
        assert_eq!(policy.grade(7_500, 10_000), Grade::B);
        assert_eq!(policy.grade(5_000, 10_000), Grade::C);
        assert_eq!(policy.grade(2_500, 10_000), Grade::D);
        assert_eq!(policy.grade(2_499, 10_000), Grade::F);
        assert_eq!(policy.grade(0, 0), Grade::F);
    }

    #[test]
    fn test_star_thresholds() {
        assert_eq!(stars_for(10_000, 10_000), 3);
        assert_eq!(stars_for(7_500, 10_000), 2);
        assert_eq!(stars_for(5_000, 10_000), 1);
        assert_eq!(stars_for(4_999, 10_000), 0);
    }

    #[test]
    fn test_grade_rank_ordering() {
        assert!(Grade::SPlus > Grade::S);
        assert!(Grade::S > Grade::A);
        assert!(Grade::D > Grade::F);
    }

    #[test]
    fn test_swapped_policy() {
        // A stingier 6-tier table: no S+ at all
        let policy = GradingPolicy::new(vec![
            (140.0, Grade::S),
            (110.0, Grade::A),
            (80.0, Grade::B),
            (55.0, Grade::C),
            (30.0, Grade::D),
        ]);
        let mut tracker = tracker().with_policy(policy);
        let summary = tracker.complete_level(1, &card(15_000, 20.0));
        assert_eq!(summary.grade, Grade::S);
    }

    #[test]
    fn test_unlock_requires_nonzero_score_on_frontier() {
        let mut tracker = tracker();
        assert_eq!(tracker.highest_unlocked(), 1);
        assert!(!tracker.is_level_unlocked(2));

        // A crash on the frontier unlocks nothing
        let summary = tracker.complete_level(1, &card(0, 40.0));
        assert!(!summary.level_unlocked);
        assert_eq!(tracker.highest_unlocked(), 1);

        let summary = tracker.complete_level(1, &card(100, 40.0));
        assert!(summary.level_unlocked);
        assert_eq!(tracker.highest_unlocked(), 2);
        assert!(tracker.is_level_unlocked(2));
        assert!(!tracker.is_level_unlocked(3));

        // Replaying a cleared level never moves the frontier or the best
        let summary = tracker.complete_level(1, &card(50, 45.0));
        assert!(!summary.level_unlocked);
        assert!(!summary.new_best);
        assert_eq!(tracker.highest_unlocked(), 2);
        assert_eq!(tracker.level_progress(1).unwrap().best_score, 100);
    }

    #[test]
    fn test_bests_are_monotone() {
        let mut tracker = tracker();
        tracker.complete_level(1, &card(6_000, 40.0));
        let first = *tracker.level_progress(1).unwrap();
        assert_eq!(first.best_grade, Some(Grade::C));
        assert_eq!(first.best_time, 40.0);
        assert_eq!(first.stars, 1);

        // Faster but worse run: time improves, nothing else regresses
        tracker.complete_level(1, &card(3_000, 25.0));
        let second = *tracker.level_progress(1).unwrap();
        assert_eq!(second.best_score, 6_000);
        assert_eq!(second.best_grade, Some(Grade::C));
        assert_eq!(second.best_time, 25.0);
        assert_eq!(second.stars, 1);

        // Better run on every axis
        tracker.complete_level(1, &card(11_000, 20.0));
        let third = *tracker.level_progress(1).unwrap();
        assert_eq!(third.best_score, 11_000);
        assert_eq!(third.best_grade, Some(Grade::A));
        assert_eq!(third.best_time, 20.0);
        assert_eq!(third.stars, 3);
    }

    #[test]
    fn test_high_score_and_stats() {
        let mut tracker = tracker();
        let summary = tracker.complete_level(1, &card(9_000, 30.0));
        assert!(summary.new_high_score);
        assert_eq!(tracker.high_score(), 9_000);

        assert!(!tracker.record_run(&card(4_000, 30.0)));
        assert!(tracker.record_run(&card(12_000, 30.0)));
        assert_eq!(tracker.high_score(), 12_000);
        assert_eq!(tracker.stats().games_played, 3);
        assert_eq!(tracker.stats().good_landings, 3);
    }

    #[test]
    fn test_start_level_gated_on_unlock() {
        let mut tracker = tracker();
        assert!(tracker.start_level(1).is_some());
        assert!(tracker.start_level(2).is_none());
        assert!(tracker.start_level(0).is_none());
        assert!(tracker.start_level(11).is_none());

        tracker.complete_level(1, &card(100, 30.0));
        assert_eq!(tracker.start_level(2).unwrap().id, 2);
    }

    #[test]
    fn test_totals_and_completion() {
        let mut tracker = tracker();
        tracker.complete_level(1, &card(10_000, 28.0));
        tracker.complete_level(2, &card(15_000, 50.0));
        assert_eq!(tracker.total_score(), 25_000);
        // Level 1 hit its target (3 stars), level 2 reached 75% (2 stars)
        assert_eq!(tracker.total_stars(), 5);
        assert_eq!(tracker.completion_percentage(), 20);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut tracker = tracker();
        tracker.complete_level(1, &card(10_000, 28.0));
        tracker.unlock_all();
        assert_eq!(tracker.highest_unlocked(), TOTAL_LEVELS);

        tracker.reset_progress();
        assert_eq!(tracker.highest_unlocked(), 1);
        assert_eq!(tracker.high_score(), 0);
        assert_eq!(*tracker.record(), SaveRecord::default());
    }

    /// Store shared between two tracker lifetimes
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl ProgressStore for SharedStore {
        fn load(&self) -> Option<SaveRecord> {
            self.0.borrow().load()
        }
        fn save(&mut self, record: &SaveRecord) {
            self.0.borrow_mut().save(record);
        }
    }

    #[test]
    fn test_progress_survives_restart() {
        let store = SharedStore::default();

        let mut tracker = ProgressTracker::new(Box::new(store.clone()));
        tracker.complete_level(1, &card(8_000, 29.0));
        drop(tracker);

        let revived = ProgressTracker::new(Box::new(store));
        assert_eq!(revived.highest_unlocked(), 2);
        assert_eq!(revived.high_score(), 8_000);
        assert_eq!(revived.level_progress(1).unwrap().best_score, 8_000);
    }
}
