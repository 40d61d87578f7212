//! Basic vector math helper functions.
//! Small helpers for normalising directions and measuring offsets.
use glam::Vec2;

/// Returns the unit vector pointing the same way as `direction`.
///
/// Non-finite and zero vectors yield [`Vec2::ZERO`], so a stationary entity
/// stays stationary and a diagonal input never exceeds unit length.
///
/// # Examples
///
/// ```
/// use frontier::vec_normalize;
/// use glam::Vec2;
///
/// let diagonal = vec_normalize(Vec2::new(1.0, 1.0));
/// assert!((diagonal.length() - 1.0).abs() < 1e-6);
/// assert_eq!(vec_normalize(Vec2::ZERO), Vec2::ZERO);
/// ```
#[must_use]
pub fn vec_normalize(direction: Vec2) -> Vec2 {
    if !direction.is_finite() {
        return Vec2::ZERO;
    }
    direction.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Returns the distance and unit direction from `from` towards `to`.
///
/// Coincident points give a zero distance and a zero direction.
///
/// # Examples
///
/// ```
/// use frontier::vector_math::distance_and_direction;
/// use glam::Vec2;
///
/// let (distance, direction) = distance_and_direction(Vec2::ZERO, Vec2::new(3.0, 4.0));
/// assert!((distance - 5.0).abs() < 1e-6);
/// assert!((direction.x - 0.6).abs() < 1e-6);
/// ```
#[must_use]
pub fn distance_and_direction(from: Vec2, to: Vec2) -> (f32, Vec2) {
    let delta = to - from;
    (delta.length(), vec_normalize(delta))
}
