//! Landing pads and touchdown classification

use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::consts::*;

/// Scoring pad quality, best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadLabel {
    Perfect,
    Great,
    Good,
}

impl PadLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PadLabel::Perfect => "PERFECT",
            PadLabel::Great => "GREAT",
            PadLabel::Good => "GOOD",
        }
    }
}

/// One scoring pad in the landing band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingPad {
    pub bounds: Aabb,
    pub points: u32,
    pub label: PadLabel,
}

/// What the ground reports once the player reaches it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Touchdown {
    /// Landed on a scoring pad
    Pad { points: u32, label: PadLabel },
    /// Inside the band but on no pad
    Missed,
    /// Fell past the band into the ground
    Crash,
}

/// The pad band and ground at the bottom of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingZone {
    ground_top_y: f32,
    pads: Vec<LandingPad>,
}

impl LandingZone {
    /// Pads are kept in declaration order; classification is
    /// first-match-wins, so declare narrow high-value pads first when they
    /// overlap wider ones.
    pub fn new(ground_top_y: f32, pads: Vec<LandingPad>) -> Self {
        Self { ground_top_y, pads }
    }

    /// Standard three-pad layout around the screen center
    pub fn with_default_pads(ground_top_y: f32, screen_center_x: f32) -> Self {
        let pad = |offset: f32, width: f32, points: u32, label: PadLabel| LandingPad {
            bounds: Aabb::new(screen_center_x + offset, ground_top_y, width, LANDING_BAND),
            points,
            label,
        };
        Self::new(
            ground_top_y,
            vec![
                pad(-150.0, 60.0, 1000, PadLabel::Perfect),
                pad(-90.0, 180.0, 500, PadLabel::Great),
                pad(-180.0, 360.0, 100, PadLabel::Good),
            ],
        )
    }

    pub fn ground_top_y(&self) -> f32 {
        self.ground_top_y
    }

    pub fn pads(&self) -> &[LandingPad] {
        &self.pads
    }

    /// Classify the player's hitbox against the landing band.
    ///
    /// `None` while the player is still above the band. Inside the band the
    /// pads are tested independently in declaration order and the first one
    /// whose x-range contains the player's center wins; no pad means a miss.
    /// A hitbox that has fallen clean past the band is a crash.
    pub fn classify(&self, player: &Aabb) -> Option<Touchdown> {
        if player.bottom() < self.ground_top_y {
            return None;
        }
        if player.y > self.ground_top_y + LANDING_BAND {
            return Some(Touchdown::Crash);
        }

        let center_x = player.center().x;
        for pad in &self.pads {
            if pad.bounds.contains_x(center_x) {
                return Some(Touchdown::Pad {
                    points: pad.points,
                    label: pad.label,
                });
            }
        }
        Some(Touchdown::Missed)
    }
}
