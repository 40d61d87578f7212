//! Fluent construction of small test levels.

use frontier::config::SimulationConfig;
use frontier::level::{LevelDescription, ObstaclePlacement, SpawnPoint};
use frontier::simulation::Simulation;

use crate::fixtures::solid_catalog;

/// Builder for [`LevelDescription`] values.
///
/// # Examples
/// ```
/// use test_utils::LevelBuilder;
///
/// let sim = LevelBuilder::new()
///     .player(0, 0)
///     .enemy("Coffin", 300, 0)
///     .simulation();
/// assert_eq!(sim.enemies().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LevelBuilder {
    level: LevelDescription,
}

impl LevelBuilder {
    /// Starts an empty level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the player spawn, centred on `(x, y)`.
    #[must_use]
    pub fn player(self, x: i32, y: i32) -> Self {
        self.spawn("Player", x, y)
    }

    /// Adds an enemy spawn, centred on `(x, y)`.
    #[must_use]
    pub fn enemy(self, tag: &str, x: i32, y: i32) -> Self {
        self.spawn(tag, x, y)
    }

    /// Adds a solid block with its top-left corner at `(x, y)`.
    #[must_use]
    pub fn block(mut self, x: i32, y: i32, width: u32, height: u32) -> Self {
        self.level.obstacles.push(ObstaclePlacement {
            x,
            y,
            sprite: None,
            width,
            height,
        });
        self
    }

    /// Replaces the tuning block.
    #[must_use]
    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.level.config = config;
        self
    }

    /// A simulation of the level using [`solid_catalog`] assets.
    ///
    /// # Panics
    /// Panics when the level is invalid.
    #[must_use]
    pub fn simulation(self) -> Simulation {
        Simulation::from_level(&self.level, solid_catalog()).expect("fixture level must be valid")
    }

    fn spawn(mut self, tag: &str, x: i32, y: i32) -> Self {
        self.level.spawns.push(SpawnPoint {
            tag: tag.to_owned(),
            x,
            y,
        });
        self
    }
}
