//! Gameplay tuning constants shared across systems.
//!
//! Per-kind values (speed, radii, attack frames) live in the behaviour
//! tables of [`crate::actor::ActorKind`]; the values here apply to every
//! entity.

/// Animation cursor advance, in frames per second.
pub const ANIMATION_SPEED: f32 = 7.0;
/// Time an entity stays invulnerable after taking damage, in milliseconds.
pub const INVULNERABILITY_WINDOW_MS: u64 = 300;
/// Projectile speed in pixels per second.
///
/// Must stay above every actor speed so shooters cannot outrun their own
/// projectiles.
pub const PROJECTILE_SPEED: f32 = 400.0;
/// Maximum projectile age before it is discarded, in milliseconds.
pub const PROJECTILE_LIFETIME_MS: u64 = 2_000;
/// Fraction of the display width removed to form an actor hitbox.
pub const HITBOX_WIDTH_SHRINK: f32 = 0.6;
/// Fraction of the display height removed to form an actor hitbox.
pub const HITBOX_HEIGHT_SHRINK: f32 = 0.5;
/// Divisor applied to an obstacle's height to trim its hitbox.
pub const OBSTACLE_HITBOX_TRIM_DIVISOR: i32 = 3;
/// Default viewport width in pixels.
pub const VIEWPORT_WIDTH: i32 = 1280;
/// Default viewport height in pixels.
pub const VIEWPORT_HEIGHT: i32 = 720;
/// RGBA colour of a blinking actor's silhouette.
pub const SILHOUETTE_COLOUR: [u8; 4] = [255, 255, 255, 255];
/// Alpha values strictly above this threshold count as opaque in a mask.
pub const MASK_ALPHA_THRESHOLD: u8 = 127;
