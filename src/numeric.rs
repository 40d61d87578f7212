//! Numeric conversion helpers used across the project.
//!
//! Positions are continuous `f32` values while rectangles live on the
//! integer pixel grid. These helpers keep the float-to-pixel conversions in
//! one place and make their rounding rule explicit.

/// Rounds to the nearest pixel, resolving halves to the even neighbour.
///
/// Non-finite inputs collapse to `0` and out-of-range values saturate.
///
/// # Examples
///
/// ```
/// use frontier::numeric::round_to_pixel;
/// assert_eq!(round_to_pixel(2.5), 2);
/// assert_eq!(round_to_pixel(3.5), 4);
/// assert_eq!(round_to_pixel(-1.2), -1);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is rounded and clamped to the i32 domain before casting."
)]
#[must_use]
pub fn round_to_pixel(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = f64::from(value).round_ties_even();
    rounded.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Truncates a scaled pixel length towards zero.
///
/// Used when shrinking rectangles by a fractional amount of their size.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Lengths are bounded by the i32 rectangle they were derived from."
)]
#[must_use]
pub fn scale_length(length: i32, factor: f32) -> i32 {
    (f64::from(length) * f64::from(factor)).trunc() as i32
}

/// Converts a pixel coordinate to `f32` for vector maths.
#[expect(
    clippy::cast_precision_loss,
    reason = "World coordinates stay far below 2^24 pixels."
)]
#[must_use]
pub fn pixel_to_f32(value: i32) -> f32 {
    value as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::half_down_to_even(0.5, 0)]
    #[case::half_up_to_even(1.5, 2)]
    #[case::negative_half(-2.5, -2)]
    #[case::plain(7.49, 7)]
    #[case::nan(f32::NAN, 0)]
    #[case::huge(f32::MAX, i32::MAX)]
    fn rounds_half_to_even(#[case] input: f32, #[case] expected: i32) {
        assert_eq!(round_to_pixel(input), expected);
    }

    #[rstest]
    #[case(50, 0.6, 30)]
    #[case(33, 0.6, 19)]
    #[case(-10, 0.5, -5)]
    fn scale_truncates_towards_zero(#[case] length: i32, #[case] factor: f32, #[case] expected: i32) {
        assert_eq!(scale_length(length, factor), expected);
    }
}
