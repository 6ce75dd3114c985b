//! Obstacle field generation and queries
//!
//! Obstacles are immutable in shape and position once generated; only the
//! cosmetic spin accumulator moves. Collision always uses the static AABB,
//! spinner rotation included.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::consts::*;

/// Which screen edge a wall hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
}

/// Obstacle variants; each carries only the data it needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Spike,
    Platform,
    Spinner {
        /// Cosmetic spin rate, radians/second
        rotation_speed: f32,
    },
    Wall {
        side: WallSide,
    },
}

/// One obstacle in the fall corridor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub bounds: Aabb,
    /// Cosmetic rotation accumulator; spinners only
    rotation: f32,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, bounds: Aabb) -> Self {
        Self {
            kind,
            bounds,
            rotation: 0.0,
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    fn spin(&mut self, dt: f32) {
        if let ObstacleKind::Spinner { rotation_speed } = self.kind {
            self.rotation += rotation_speed * dt;
        }
    }
}

/// A level's obstacle set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    /// Field from a hand-built obstacle list
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    /// Generate `count` obstacles spaced down the fall corridor.
    ///
    /// Kinds are drawn uniformly. Row `i` sits at
    /// `start_y + i * spacing_base` plus jitter in `[0, spacing_base * 0.67)`.
    /// Walls pin to a screen edge; everything else lands between the side
    /// margins.
    pub fn generate(
        count: u32,
        spacing_base: f32,
        screen_width: f32,
        start_y: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let mut obstacles = Vec::with_capacity(count as usize);

        for i in 0..count {
            let jitter = if spacing_base > 0.0 {
                rng.random_range(0.0..spacing_base * SPACING_JITTER)
            } else {
                0.0
            };
            let y = start_y + i as f32 * spacing_base + jitter;

            let (kind, width, height) = match rng.random_range(0..4) {
                0 => {
                    let size = rng.random_range(SPIKE_SIZE_MIN..=SPIKE_SIZE_MAX);
                    (ObstacleKind::Spike, size, size)
                }
                1 => {
                    let width = rng.random_range(PLATFORM_WIDTH_MIN..=PLATFORM_WIDTH_MAX);
                    (ObstacleKind::Platform, width, PLATFORM_HEIGHT)
                }
                2 => {
                    let rotation_speed = rng.random_range(SPIN_SPEED_MIN..SPIN_SPEED_MAX);
                    (
                        ObstacleKind::Spinner { rotation_speed },
                        SPINNER_SIZE,
                        SPINNER_SIZE,
                    )
                }
                _ => {
                    let side = if rng.random_bool(0.5) {
                        WallSide::Left
                    } else {
                        WallSide::Right
                    };
                    (ObstacleKind::Wall { side }, WALL_WIDTH, WALL_HEIGHT)
                }
            };

            let x = match kind {
                ObstacleKind::Wall {
                    side: WallSide::Left,
                } => 0.0,
                ObstacleKind::Wall {
                    side: WallSide::Right,
                } => screen_width - width,
                _ => rng
                    .random_range(FIELD_MARGIN_LEFT..=screen_width - FIELD_MARGIN_RIGHT - width),
            };

            obstacles.push(Obstacle {
                kind,
                bounds: Aabb::new(x, y, width, height),
                rotation: 0.0,
            });
        }

        Self { obstacles }
    }

    /// All obstacles, top to bottom. No proximity culling: the set is small
    /// enough that every collision query sweeps the whole field.
    pub fn active_obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Advance cosmetic spinner rotation
    pub fn advance(&mut self, dt: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.spin(dt);
        }
    }

    /// Zero the spin accumulators without touching positions
    pub fn reset(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.rotation = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RngState;

    fn field(seed: u64, count: u32) -> ObstacleField {
        ObstacleField::generate(count, 200.0, SCREEN_WIDTH, 500.0, &mut RngState::new(seed).to_rng())
    }

    #[test]
    fn test_generate_count() {
        assert_eq!(field(1, 40).len(), 40);
        assert!(field(1, 0).is_empty());
    }

    #[test]
    fn test_generate_is_reproducible() {
        assert_eq!(field(7, 30), field(7, 30));
    }

    #[test]
    fn test_rows_spaced_with_bounded_jitter() {
        let field = field(3, 25);
        for (i, obstacle) in field.active_obstacles().iter().enumerate() {
            let row_top = 500.0 + i as f32 * 200.0;
            assert!(obstacle.bounds.y >= row_top);
            assert!(obstacle.bounds.y < row_top + 200.0 * SPACING_JITTER);
        }
    }

    #[test]
    fn test_placement_respects_margins() {
        let field = field(11, 200);
        for obstacle in field.active_obstacles() {
            match obstacle.kind {
                ObstacleKind::Wall { side: WallSide::Left } => {
                    assert_eq!(obstacle.bounds.x, 0.0);
                }
                ObstacleKind::Wall { side: WallSide::Right } => {
                    assert_eq!(obstacle.bounds.x, SCREEN_WIDTH - WALL_WIDTH);
                }
                _ => {
                    assert!(obstacle.bounds.x >= FIELD_MARGIN_LEFT);
                    assert!(obstacle.bounds.right() <= SCREEN_WIDTH - FIELD_MARGIN_RIGHT);
                }
            }
        }
    }

    #[test]
    fn test_sizes_per_kind() {
        let field = field(23, 200);
        for obstacle in field.active_obstacles() {
            let b = &obstacle.bounds;
            match obstacle.kind {
                ObstacleKind::Spike => {
                    assert_eq!(b.width, b.height);
                    assert!(b.width >= SPIKE_SIZE_MIN && b.width <= SPIKE_SIZE_MAX);
                }
                ObstacleKind::Platform => {
                    assert!(b.width >= PLATFORM_WIDTH_MIN && b.width <= PLATFORM_WIDTH_MAX);
                    assert_eq!(b.height, PLATFORM_HEIGHT);
                }
                ObstacleKind::Spinner { rotation_speed } => {
                    assert_eq!((b.width, b.height), (SPINNER_SIZE, SPINNER_SIZE));
                    assert!(rotation_speed >= SPIN_SPEED_MIN && rotation_speed < SPIN_SPEED_MAX);
                }
                ObstacleKind::Wall { .. } => {
                    assert_eq!((b.width, b.height), (WALL_WIDTH, WALL_HEIGHT));
                }
            }
        }
    }

    #[test]
    fn test_reset_clears_spin_only() {
        let mut field = field(5, 60);
        let before: Vec<Aabb> = field.active_obstacles().iter().map(|o| o.bounds).collect();

        field.advance(1.5);
        let spun = field
            .active_obstacles()
            .iter()
            .any(|o| o.rotation() != 0.0);
        assert!(spun, "seed 5 should have produced at least one spinner");

        field.reset();
        for (obstacle, bounds) in field.active_obstacles().iter().zip(&before) {
            assert_eq!(obstacle.rotation(), 0.0);
            assert_eq!(obstacle.bounds, *bounds);
        }
    }
}
