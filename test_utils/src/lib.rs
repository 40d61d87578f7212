//! Shared fixtures for the integration tests.
//!
//! Builders here assemble animation sets, asset catalogs and small levels
//! from solid frames, so tests never depend on image files.

pub mod fixtures;
pub mod level;

pub use fixtures::{solid_animations, solid_catalog, ACTOR_SIZE};
pub use level::LevelBuilder;

use frontier::geometry::Rect;

/// Asserts that two rectangles do not share interior area.
///
/// # Panics
/// Panics with both rectangles when they overlap.
pub fn assert_disjoint(a: Rect, b: Rect) {
    assert!(!a.overlaps(&b), "{a:?} overlaps {b:?}");
}
