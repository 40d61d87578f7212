//! Integer axis-aligned rectangles on the pixel grid.
//!
//! [`Rect`] follows the usual top-left-origin screen convention: `x` grows to
//! the right, `y` grows downwards and the right/bottom edges are exclusive.
//! Centre accessors use integer halving, so a rectangle of odd width has its
//! centre one pixel left of the geometric middle.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::numeric::pixel_to_f32;

/// Axis-aligned rectangle with integer position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the given size centred on `center`.
    ///
    /// # Examples
    ///
    /// ```
    /// use frontier::geometry::Rect;
    /// use glam::IVec2;
    ///
    /// let rect = Rect::from_center(IVec2::new(10, 10), 4, 6);
    /// assert_eq!(rect, Rect::new(8, 7, 4, 6));
    /// assert_eq!(rect.center(), IVec2::new(10, 10));
    /// ```
    #[must_use]
    pub const fn from_center(center: IVec2, width: i32, height: i32) -> Self {
        Self::new(center.x - width / 2, center.y - height / 2, width, height)
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[must_use]
    pub const fn top_left(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Size as a vector.
    #[must_use]
    pub const fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Horizontal centre.
    #[must_use]
    pub const fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Vertical centre.
    #[must_use]
    pub const fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    /// Centre point.
    #[must_use]
    pub const fn center(&self) -> IVec2 {
        IVec2::new(self.center_x(), self.center_y())
    }

    /// Centre point as a float vector.
    #[must_use]
    pub fn center_f32(&self) -> Vec2 {
        Vec2::new(pixel_to_f32(self.center_x()), pixel_to_f32(self.center_y()))
    }

    /// Moves the rectangle so its left edge sits at `left`.
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Moves the rectangle so its right edge sits at `right`.
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    /// Moves the rectangle so its top edge sits at `top`.
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Moves the rectangle so its bottom edge sits at `bottom`.
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    /// Moves the rectangle horizontally so it is centred on `center_x`.
    pub fn set_center_x(&mut self, center_x: i32) {
        self.x = center_x - self.width / 2;
    }

    /// Moves the rectangle vertically so it is centred on `center_y`.
    pub fn set_center_y(&mut self, center_y: i32) {
        self.y = center_y - self.height / 2;
    }

    /// Returns a copy grown by `dx`/`dy` pixels around the same centre.
    ///
    /// Negative amounts shrink the rectangle. The size never drops below
    /// zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use frontier::geometry::Rect;
    ///
    /// let trimmed = Rect::new(0, 0, 64, 64).inflate(0, -21);
    /// assert_eq!(trimmed, Rect::new(0, 10, 64, 43));
    /// ```
    #[must_use]
    pub const fn inflate(&self, dx: i32, dy: i32) -> Self {
        let width = self.width + dx;
        let height = self.height + dy;
        Self::new(
            self.x - dx / 2,
            self.y - dy / 2,
            if width < 0 { 0 } else { width },
            if height < 0 { 0 } else { height },
        )
    }

    /// Returns `true` when the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns `true` when both rectangles share at least one pixel.
    ///
    /// Touching edges do not overlap, and empty rectangles never overlap
    /// anything.
    ///
    /// # Examples
    ///
    /// ```
    /// use frontier::geometry::Rect;
    ///
    /// let a = Rect::new(0, 0, 10, 10);
    /// assert!(a.overlaps(&Rect::new(9, 9, 5, 5)));
    /// assert!(!a.overlaps(&Rect::new(10, 0, 5, 5)));
    /// ```
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Smallest rectangle covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }
}
