//! Static obstacles and the collision world they form.
//!
//! Moving entities query the world by rectangle. [`ObstacleSet`] answers
//! with a linear scan; a spatial index can replace it behind
//! [`ObstacleQuery`] without touching the resolver.

use std::sync::Arc;

use glam::IVec2;
use log::debug;

use crate::animation::Frame;
use crate::constants::OBSTACLE_HITBOX_TRIM_DIVISOR;
use crate::geometry::Rect;

/// Movement axis resolved by a collision pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

/// Immutable blocker placed by the level.
#[derive(Debug, Clone)]
pub struct Obstacle {
    rect: Rect,
    hitbox: Rect,
    frame: Arc<Frame>,
}

impl Obstacle {
    /// Places `frame` with its top-left corner at `top_left`.
    ///
    /// The hitbox drops a third of the height, split between top and bottom,
    /// so actors can walk slightly behind tall props.
    #[must_use]
    pub fn new(top_left: IVec2, frame: Arc<Frame>) -> Self {
        let rect = Rect::new(top_left.x, top_left.y, frame.width(), frame.height());
        let hitbox = rect.inflate(0, -(rect.height / OBSTACLE_HITBOX_TRIM_DIVISOR));
        Self::with_hitbox(rect, hitbox, frame)
    }

    /// Creates an obstacle with an explicit hitbox.
    #[must_use]
    pub const fn with_hitbox(rect: Rect, hitbox: Rect, frame: Arc<Frame>) -> Self {
        Self {
            rect,
            hitbox,
            frame,
        }
    }

    /// Display rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Blocking rectangle.
    #[must_use]
    pub const fn hitbox(&self) -> Rect {
        self.hitbox
    }

    /// Visual frame, also used for projectile hit tests.
    #[must_use]
    pub const fn frame(&self) -> &Arc<Frame> {
        &self.frame
    }
}

/// Rectangle query over the static obstacles.
pub trait ObstacleQuery {
    /// Obstacles whose hitbox may overlap `area`, in a stable order.
    ///
    /// Implementations may return extra candidates but must not omit any
    /// obstacle that overlaps `area`.
    fn candidates(&self, area: Rect) -> impl Iterator<Item = &Obstacle> + '_;

    /// Obstacles whose display rectangle may overlap `area`.
    ///
    /// Sprite-level tests use this instead of [`ObstacleQuery::candidates`]
    /// because an obstacle is drawn taller than it blocks.
    fn drawn_over(&self, area: Rect) -> impl Iterator<Item = &Obstacle> + '_;
}

/// Linear-scan obstacle collection.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an obstacle; obstacles never leave the set.
    pub fn insert(&mut self, obstacle: Obstacle) {
        debug!("obstacle added with hitbox {:?}", obstacle.hitbox());
        self.obstacles.push(obstacle);
    }

    /// Number of obstacles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// All obstacles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter()
    }
}

impl FromIterator<Obstacle> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Obstacle>>(iter: I) -> Self {
        Self {
            obstacles: iter.into_iter().collect(),
        }
    }
}

impl ObstacleQuery for ObstacleSet {
    fn candidates(&self, area: Rect) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles
            .iter()
            .filter(move |obstacle| obstacle.hitbox.overlaps(&area))
    }

    fn drawn_over(&self, area: Rect) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles
            .iter()
            .filter(move |obstacle| obstacle.rect.overlaps(&area))
    }
}

/// Pushes `hitbox` out of every overlapping obstacle along `axis`.
///
/// `component` is the signed direction on that axis: a positive value clamps
/// the far edge to the obstacle's near edge, a negative value clamps the near
/// edge to the obstacle's far edge, and zero leaves the hitbox in place.
/// `swept` must cover the hitbox before and after the move. Returns whether
/// any obstacle was touched.
pub fn resolve_axis<Q: ObstacleQuery + ?Sized>(
    hitbox: &mut Rect,
    component: f32,
    axis: Axis,
    swept: Rect,
    obstacles: &Q,
) -> bool {
    let mut touched = false;
    for obstacle in obstacles.candidates(swept) {
        let blocker = obstacle.hitbox();
        if !blocker.overlaps(hitbox) {
            continue;
        }
        touched = true;
        match axis {
            Axis::Horizontal => {
                if component > 0.0 {
                    hitbox.set_right(blocker.left());
                }
                if component < 0.0 {
                    hitbox.set_left(blocker.right());
                }
            }
            Axis::Vertical => {
                if component > 0.0 {
                    hitbox.set_bottom(blocker.top());
                }
                if component < 0.0 {
                    hitbox.set_top(blocker.bottom());
                }
            }
        }
    }
    touched
}
