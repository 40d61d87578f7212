#![cfg_attr(docsrs, feature(doc_cfg))]
//! Runtime core of a top-down action game.
//!
//! Kinematic actors with axis-separated collision resolution, timed
//! invulnerability, projectiles with pixel-exact hit tests and a
//! camera-relative, depth-sorted draw list. [`Simulation`] owns the world;
//! [`SimulationPlugin`] drives it from a Bevy app.
pub mod actor;
pub mod animation;
pub mod clock;
pub mod collision;
pub mod combat;
pub mod config;
pub mod constants;
pub mod events;
pub mod geometry;
pub mod kinematics;
pub mod level;
pub mod logging;
pub mod mask;
pub mod numeric;
pub mod plugin;
pub mod projectile;
pub mod registry;
pub mod render;
pub mod simulation;
pub mod vector_math;
pub mod vulnerability;
pub use constants::*;

// Re-export commonly used items
pub use actor::{Actor, ActorId, ActorKind, Participant, TickInput};
pub use animation::{AnimationError, AnimationSet, Frame, Status};
pub use clock::Timestamp;
pub use collision::{Obstacle, ObstacleQuery, ObstacleSet};
pub use config::SimulationConfig;
pub use events::GameEvent;
pub use geometry::Rect;
pub use kinematics::{Body, Kinematic};
pub use level::{AssetCatalog, LevelDescription, LevelError};
pub use logging::init as init_logging;
pub use mask::Mask;
pub use plugin::{SimulationClock, SimulationPlugin};
pub use projectile::{Projectile, ProjectileId};
pub use render::{DrawCommand, DrawList, Viewport};
pub use simulation::{Outcome, Simulation};
pub use vector_math::vec_normalize;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use frontier::prelude::*;
    //! ```

    pub use crate::{
        ActorKind, AssetCatalog, GameEvent, LevelDescription, Outcome, Simulation,
        SimulationPlugin, TickInput, Timestamp, Viewport,
    };
    pub use glam::{IVec2, Vec2};
}
