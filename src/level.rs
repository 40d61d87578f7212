//! Level descriptions and the assets needed to populate them.
//!
//! A level loader (tile maps, editors) is an external collaborator. It hands
//! over a [`LevelDescription`]: obstacle placements plus tagged spawn points.
//! The frames those entities draw with come from an [`AssetCatalog`].

use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actor::{ActorKind, UnknownKind};
use crate::animation::{AnimationError, AnimationSet, Frame, Status};
use crate::config::SimulationConfig;

/// Failures while turning a level into a running simulation.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level text is not valid JSON for a [`LevelDescription`].
    #[error("malformed level: {0}")]
    Parse(#[from] serde_json::Error),
    /// A spawn point names no known actor kind.
    #[error(transparent)]
    UnknownSpawn(#[from] UnknownKind),
    /// No spawn point is tagged `Player`.
    #[error("level has no player spawn")]
    MissingPlayer,
    /// More than one spawn point is tagged `Player`.
    #[error("level has more than one player spawn")]
    DuplicatePlayer,
    /// A non-enemy kind was inserted as an enemy.
    #[error("{0:?} cannot be spawned as an enemy")]
    NotAnEnemy(ActorKind),
    /// An obstacle without a sprite has a zero dimension.
    #[error("obstacle {index} has an empty {width}x{height} footprint")]
    InvalidObstacleSize {
        /// Position of the obstacle in the level.
        index: usize,
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
    /// An obstacle names a sprite the catalog does not hold.
    #[error("unknown obstacle sprite `{0}`")]
    UnknownSprite(String),
    /// The catalog has no animations for a kind the level spawns.
    #[error("no animations loaded for {0:?}")]
    MissingAnimations(ActorKind),
    /// An animation set is incomplete.
    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// A static obstacle placement, anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstaclePlacement {
    /// Left edge in world pixels.
    pub x: i32,
    /// Top edge in world pixels.
    pub y: i32,
    /// Catalog sprite to draw; a solid block of `width` by `height` when absent.
    #[serde(default)]
    pub sprite: Option<String>,
    /// Width of a sprite-less obstacle.
    #[serde(default)]
    pub width: u32,
    /// Height of a sprite-less obstacle.
    #[serde(default)]
    pub height: u32,
}

/// A tagged spawn point, anchored at the actor's centre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Actor kind tag: `Player`, `Coffin` or `Cactus`.
    pub tag: String,
    /// Centre x in world pixels.
    pub x: i32,
    /// Centre y in world pixels.
    pub y: i32,
}

/// Everything a level contributes to a simulation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelDescription {
    /// Static obstacles.
    #[serde(default)]
    pub obstacles: Vec<ObstaclePlacement>,
    /// Actor spawn points in spawn order.
    #[serde(default)]
    pub spawns: Vec<SpawnPoint>,
    /// Tuning overrides.
    #[serde(default)]
    pub config: SimulationConfig,
}

impl LevelDescription {
    /// Parses a level from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Parse`] when the text does not describe a level.
    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Frames for every actor kind, obstacle sprite and the projectile.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    animations: HashMap<ActorKind, Arc<AnimationSet>>,
    sprites: HashMap<String, Arc<Frame>>,
    projectile: Arc<Frame>,
}

impl AssetCatalog {
    /// Creates a catalog holding only the projectile frame.
    #[must_use]
    pub fn new(projectile: Arc<Frame>) -> Self {
        Self {
            animations: HashMap::new(),
            sprites: HashMap::new(),
            projectile,
        }
    }

    /// Registers the animations of `kind`.
    #[must_use]
    pub fn with_animations(mut self, kind: ActorKind, animations: AnimationSet) -> Self {
        self.animations.insert(kind, Arc::new(animations));
        self
    }

    /// Registers an obstacle sprite under `name`.
    #[must_use]
    pub fn with_sprite(mut self, name: impl Into<String>, frame: Frame) -> Self {
        self.sprites.insert(name.into(), Arc::new(frame));
        self
    }

    /// Solid placeholder frames for every kind, for headless runs.
    ///
    /// Each status gets `frames_per_status` solid frames of the given size.
    /// Spawning fails for kinds whose attack lands past the last frame, so
    /// every kind needs at least seven.
    #[must_use]
    pub fn placeholder(actor_size: (u32, u32), frames_per_status: usize) -> Self {
        let (width, height) = actor_size;
        ActorKind::ALL.into_iter().fold(
            Self::new(Arc::new(Frame::solid("particle", 8, 8))),
            |catalog, kind| {
                let set = Status::all().fold(AnimationSet::new(), |set, status| {
                    let key = status.key();
                    let frames = (0..frames_per_status)
                        .map(|i| {
                            Arc::new(Frame::solid(
                                format!("{}/{key}/{i}", kind.tag()),
                                width,
                                height,
                            ))
                        })
                        .collect();
                    set.with(key, frames)
                });
                catalog.with_animations(kind, set)
            },
        )
    }

    /// Animations of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::MissingAnimations`] when none were registered.
    pub fn animations(&self, kind: ActorKind) -> Result<Arc<AnimationSet>, LevelError> {
        self.animations
            .get(&kind)
            .cloned()
            .ok_or(LevelError::MissingAnimations(kind))
    }

    /// Obstacle sprite registered under `name`.
    #[must_use]
    pub fn sprite(&self, name: &str) -> Option<&Arc<Frame>> {
        self.sprites.get(name)
    }

    /// Frame shared by every projectile.
    #[must_use]
    pub const fn projectile(&self) -> &Arc<Frame> {
        &self.projectile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_a_minimal_level() {
        let level = LevelDescription::from_json(
            r#"{
                "obstacles": [{ "x": 0, "y": 0, "width": 64, "height": 64 }],
                "spawns": [{ "tag": "Player", "x": 200, "y": 200 }]
            }"#,
        )
        .expect("level parses");
        assert_eq!(level.obstacles.len(), 1);
        assert_eq!(level.obstacles.first().and_then(|o| o.sprite.clone()), None);
        assert_eq!(level.config, SimulationConfig::default());
    }

    #[rstest]
    fn rejects_malformed_text() {
        assert!(matches!(
            LevelDescription::from_json("{ \"spawns\": 3 }"),
            Err(LevelError::Parse(_))
        ));
    }

    #[rstest]
    fn placeholder_catalog_covers_every_kind() {
        let catalog = AssetCatalog::placeholder((48, 64), 7);
        for kind in ActorKind::ALL {
            let set = catalog.animations(kind).expect("animations");
            assert!(set.validate().is_ok());
            assert!(set
                .reaches_attack_frame(kind.behaviour().attack.trigger_frame())
                .is_ok());
        }
        assert_eq!(catalog.projectile().width(), 8);
    }

    #[rstest]
    fn missing_animations_are_reported() {
        let catalog = AssetCatalog::new(Arc::new(Frame::solid("particle", 8, 8)));
        assert!(matches!(
            catalog.animations(ActorKind::Coffin),
            Err(LevelError::MissingAnimations(ActorKind::Coffin))
        ));
    }
}
