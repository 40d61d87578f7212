//! Runtime tuning loaded alongside a level.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ANIMATION_SPEED, INVULNERABILITY_WINDOW_MS, PROJECTILE_LIFETIME_MS, PROJECTILE_SPEED,
};
use crate::geometry::Rect;

/// Simulation-wide settings.
///
/// Every field falls back to its default when absent, so a level may carry
/// an empty `config` object or none at all.
///
/// ```
/// use frontier::config::SimulationConfig;
///
/// let config: SimulationConfig =
///     serde_json::from_str(r#"{ "projectile_lifetime_ms": 500 }"#).expect("valid config");
/// assert_eq!(config.projectile_lifetime_ms, 500);
/// assert_eq!(config.invulnerability_ms, 300);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Invulnerability window after a hit, in milliseconds.
    pub invulnerability_ms: u64,
    /// Animation speed in frames per second.
    pub animation_speed: f32,
    /// Projectile speed in pixels per second.
    pub projectile_speed: f32,
    /// Projectile lifetime in milliseconds.
    pub projectile_lifetime_ms: u64,
    /// Projectiles whose centre leaves this rectangle are discarded.
    pub world_bounds: Option<Rect>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            invulnerability_ms: INVULNERABILITY_WINDOW_MS,
            animation_speed: ANIMATION_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime_ms: PROJECTILE_LIFETIME_MS,
            world_bounds: None,
        }
    }
}
