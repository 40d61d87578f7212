//! Projectiles: fast, short-lived bodies without health.
//!
//! A projectile never slides along obstacles. It flies in a straight line
//! until the combat pipeline removes it on contact, or until it outlives
//! its lifetime or leaves the world bounds.

use std::sync::Arc;

use glam::{IVec2, Vec2};

use crate::actor::Participant;
use crate::animation::Frame;
use crate::clock::Timestamp;
use crate::collision::ObstacleQuery;
use crate::geometry::Rect;
use crate::kinematics::{Body, Contact, Kinematic};
use crate::numeric::round_to_pixel;
use crate::registry::RegistryId;
use crate::vector_math::vec_normalize;

/// Handle of a projectile inside the simulation registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectileId(pub u64);

impl RegistryId for ProjectileId {
    fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Reason a projectile left the world without hitting anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Older than the configured lifetime.
    Lifetime,
    /// Centre outside the world bounds.
    OutOfBounds,
}

/// A fired bullet.
#[derive(Debug, Clone)]
pub struct Projectile {
    body: Body,
    frame: Arc<Frame>,
    owner: Participant,
    spawned_at: Timestamp,
}

impl Projectile {
    /// Fires a projectile centred on `origin` along `direction`.
    ///
    /// The direction is normalised once here and never changes.
    #[must_use]
    pub fn new(
        origin: Vec2,
        direction: Vec2,
        speed: f32,
        frame: Arc<Frame>,
        owner: Participant,
        spawned_at: Timestamp,
    ) -> Self {
        let center = IVec2::new(round_to_pixel(origin.x), round_to_pixel(origin.y));
        let mut body = Body::solid(center, IVec2::new(frame.width(), frame.height()), speed);
        body.set_direction(vec_normalize(direction));
        Self {
            body,
            frame,
            owner,
            spawned_at,
        }
    }

    /// Visual frame and mask.
    #[must_use]
    pub const fn frame(&self) -> &Arc<Frame> {
        &self.frame
    }

    /// Who fired the projectile.
    #[must_use]
    pub const fn owner(&self) -> Participant {
        self.owner
    }

    /// Rectangle the frame is drawn into and hit-tested at.
    #[must_use]
    pub fn draw_rect(&self) -> Rect {
        Rect::from_center(self.body.rect().center(), self.frame.width(), self.frame.height())
    }

    /// Checks the removal conditions that do not involve other entities.
    #[must_use]
    pub fn expiry(&self, now: Timestamp, lifetime_ms: u64, bounds: Option<Rect>) -> Option<Expiry> {
        if now.millis_since(self.spawned_at) > lifetime_ms {
            return Some(Expiry::Lifetime);
        }
        let center = self.body.rect().center();
        let outside = bounds.is_some_and(|area| {
            center.x < area.left()
                || center.x >= area.right()
                || center.y < area.top()
                || center.y >= area.bottom()
        });
        outside.then_some(Expiry::OutOfBounds)
    }
}

impl Kinematic for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Flies straight; obstacle contact is handled by the combat pipeline.
    fn advance<Q: ObstacleQuery + ?Sized>(&mut self, dt: f32, _obstacles: &Q) -> Contact {
        self.body.drift(dt);
        Contact::default()
    }
}
