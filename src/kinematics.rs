//! Continuous movement with per-axis collision resolution.
//!
//! A [`Body`] owns the authoritative sub-pixel position and the two integer
//! rectangles derived from it. Every positional change re-centres the hitbox
//! on the rounded position and moves the display rectangle to the hitbox
//! centre, so the three never drift apart.
//!
//! Resolution is discrete: each axis moves, then is pushed back out of
//! whatever it overlaps. A large enough step can carry a hitbox clean through
//! a thin obstacle; callers keep `dt` to a frame's worth of time.

use glam::{IVec2, Vec2};

use crate::collision::{resolve_axis, Axis, ObstacleQuery};
use crate::constants::{HITBOX_HEIGHT_SHRINK, HITBOX_WIDTH_SHRINK};
use crate::geometry::Rect;
use crate::numeric::{pixel_to_f32, round_to_pixel, scale_length};
use crate::vector_math::vec_normalize;

/// Axes that hit an obstacle during one [`Body::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contact {
    /// The horizontal pass was corrected.
    pub horizontal: bool,
    /// The vertical pass was corrected.
    pub vertical: bool,
}

/// Position, direction and the rectangles derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: Vec2,
    direction: Vec2,
    speed: f32,
    rect: Rect,
    hitbox: Rect,
}

impl Body {
    /// Creates an actor body centred on `center` with a display `size`.
    ///
    /// The hitbox keeps 40 % of the width and 50 % of the height.
    ///
    /// # Examples
    ///
    /// ```
    /// use frontier::geometry::Rect;
    /// use frontier::kinematics::Body;
    /// use glam::IVec2;
    ///
    /// let body = Body::new(IVec2::new(100, 100), IVec2::new(50, 60), 200.0);
    /// assert_eq!(body.rect(), Rect::new(75, 70, 50, 60));
    /// assert_eq!(body.hitbox(), Rect::new(90, 85, 20, 30));
    /// ```
    #[must_use]
    pub fn new(center: IVec2, size: IVec2, speed: f32) -> Self {
        let rect = Rect::from_center(center, size.x, size.y);
        let hitbox = rect.inflate(
            -scale_length(rect.width, HITBOX_WIDTH_SHRINK),
            -scale_length(rect.height, HITBOX_HEIGHT_SHRINK),
        );
        Self::with_hitbox(rect, hitbox, speed)
    }

    /// Creates a body whose hitbox is the whole display rectangle.
    #[must_use]
    pub fn solid(center: IVec2, size: IVec2, speed: f32) -> Self {
        let rect = Rect::from_center(center, size.x, size.y);
        Self::with_hitbox(rect, rect, speed)
    }

    /// Creates a body from explicit rectangles.
    ///
    /// The position starts at the hitbox centre.
    #[must_use]
    pub fn with_hitbox(rect: Rect, hitbox: Rect, speed: f32) -> Self {
        let mut body = Self {
            position: hitbox.center_f32(),
            direction: Vec2::ZERO,
            speed,
            rect,
            hitbox,
        };
        body.rect.set_center_x(hitbox.center_x());
        body.rect.set_center_y(hitbox.center_y());
        body
    }

    /// Sub-pixel position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current direction, unit length after the first advance.
    #[must_use]
    pub const fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Sets the direction of travel; it is normalised on the next advance.
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction;
    }

    /// Speed in pixels per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Display rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Collision rectangle.
    #[must_use]
    pub const fn hitbox(&self) -> Rect {
        self.hitbox
    }

    /// Moves the body to `position`, re-deriving both rectangles.
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.sync_x();
        self.sync_y();
    }

    /// Advances by `dt` seconds and pushes out of obstacles, x then y.
    ///
    /// The vertical pass starts from the already-corrected horizontal
    /// position. Direction and speed survive a collision, so a body keeps
    /// pressing into a wall until its direction changes.
    pub fn advance<Q: ObstacleQuery + ?Sized>(&mut self, dt: f32, obstacles: &Q) -> Contact {
        self.direction = vec_normalize(self.direction);
        let step = self.direction * self.speed * dt;

        let before = self.hitbox;
        self.position.x += step.x;
        self.sync_x();
        let horizontal = self.resolve(Axis::Horizontal, before, obstacles);

        let before = self.hitbox;
        self.position.y += step.y;
        self.sync_y();
        let vertical = self.resolve(Axis::Vertical, before, obstacles);

        Contact {
            horizontal,
            vertical,
        }
    }

    /// Advances by `dt` seconds ignoring obstacles.
    pub fn drift(&mut self, dt: f32) {
        self.direction = vec_normalize(self.direction);
        let step = self.direction * self.speed * dt;
        self.teleport(self.position + step);
    }

    fn resolve<Q: ObstacleQuery + ?Sized>(&mut self, axis: Axis, before: Rect, obstacles: &Q) -> bool {
        let swept = before.union(&self.hitbox);
        let component = match axis {
            Axis::Horizontal => self.direction.x,
            Axis::Vertical => self.direction.y,
        };
        if !resolve_axis(&mut self.hitbox, component, axis, swept, obstacles) {
            return false;
        }
        match axis {
            Axis::Horizontal => {
                self.rect.set_center_x(self.hitbox.center_x());
                self.position.x = pixel_to_f32(self.hitbox.center_x());
            }
            Axis::Vertical => {
                self.rect.set_center_y(self.hitbox.center_y());
                self.position.y = pixel_to_f32(self.hitbox.center_y());
            }
        }
        true
    }

    fn sync_x(&mut self) {
        self.hitbox.set_center_x(round_to_pixel(self.position.x));
        self.rect.set_center_x(self.hitbox.center_x());
    }

    fn sync_y(&mut self) {
        self.hitbox.set_center_y(round_to_pixel(self.position.y));
        self.rect.set_center_y(self.hitbox.center_y());
    }
}

/// Capability shared by everything that moves through the world.
pub trait Kinematic {
    /// Read access to the body.
    fn body(&self) -> &Body;

    /// Write access to the body.
    fn body_mut(&mut self) -> &mut Body;

    /// Moves the entity by `dt` seconds through `obstacles`.
    fn advance<Q: ObstacleQuery + ?Sized>(&mut self, dt: f32, obstacles: &Q) -> Contact {
        self.body_mut().advance(dt, obstacles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use rstest::rstest;

    use crate::animation::Frame;
    use crate::collision::{Obstacle, ObstacleSet};

    fn wall(rect: Rect) -> Obstacle {
        Obstacle::with_hitbox(rect, rect, Arc::new(Frame::solid("wall", 1, 1)))
    }

    #[rstest]
    #[case::right(Vec2::X)]
    #[case::diagonal(Vec2::new(1.0, 1.0))]
    #[case::long_diagonal(Vec2::new(-3.0, 3.0))]
    fn travel_speed_ignores_direction_magnitude(#[case] direction: Vec2) {
        let mut body = Body::new(IVec2::ZERO, IVec2::new(40, 40), 200.0);
        body.set_direction(direction);
        body.advance(0.5, &ObstacleSet::new());
        assert_relative_eq!(body.position().length(), 100.0, epsilon = 1e-3);
        assert_relative_eq!(body.direction().length(), 1.0, epsilon = 1e-6);
    }

    #[rstest]
    fn rectangles_follow_the_rounded_position() {
        let mut body = Body::new(IVec2::ZERO, IVec2::new(10, 10), 10.0);
        body.set_direction(Vec2::X);
        body.advance(0.25, &ObstacleSet::new());
        assert_relative_eq!(body.position().x, 2.5);
        assert_eq!(body.hitbox().center_x(), 2);
        assert_eq!(body.rect().center_x(), 2);
    }

    #[rstest]
    fn collision_snaps_position_and_keeps_direction() {
        let obstacles: ObstacleSet = [wall(Rect::new(100, 100, 50, 50))].into_iter().collect();
        let mut body = Body::with_hitbox(Rect::new(-90, 115, 20, 20), Rect::new(-90, 115, 20, 20), 200.0);
        body.set_direction(Vec2::X);
        let contact = body.advance(1.0, &obstacles);
        assert_eq!(contact, Contact { horizontal: true, vertical: false });
        assert_eq!(body.hitbox().right(), 100);
        assert_relative_eq!(body.position().x, 90.0);
        assert_eq!(body.direction(), Vec2::X);
    }

    #[rstest]
    fn vertical_pass_uses_corrected_horizontal_position() {
        // A wall to the right and a floor below: the body slides into the
        // corner instead of catching on the floor's edge.
        let obstacles: ObstacleSet = [
            wall(Rect::new(20, -50, 10, 100)),
            wall(Rect::new(-50, 20, 100, 10)),
        ]
        .into_iter()
        .collect();
        let mut body = Body::solid(IVec2::new(10, 10), IVec2::new(10, 10), 100.0);
        body.set_direction(Vec2::new(1.0, 1.0));
        body.advance(0.2, &obstacles);
        assert_eq!(body.hitbox().right(), 20);
        assert_eq!(body.hitbox().bottom(), 20);
    }

    #[rstest]
    fn drift_ignores_obstacles() {
        let mut body = Body::solid(IVec2::ZERO, IVec2::new(4, 4), 400.0);
        body.set_direction(Vec2::NEG_Y);
        body.drift(0.5);
        assert_eq!(body.rect().center(), IVec2::new(0, -200));
    }
}
