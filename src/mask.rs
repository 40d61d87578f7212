//! Per-pixel opacity bitmaps for precise hit tests.
//!
//! A [`Mask`] is computed once per visual frame when assets are handed to
//! the core. Combat checks place two masks at their draw positions and test
//! the overlapping window pixel by pixel.

use glam::IVec2;
use thiserror::Error;

use crate::constants::MASK_ALPHA_THRESHOLD;

/// Errors raised while building a mask from raw pixel data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// The buffer length does not match `width * height * stride`.
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height}")]
    BufferSize {
        /// Mask width in pixels.
        width: u32,
        /// Mask height in pixels.
        height: u32,
        /// Bytes required by the dimensions.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
}

/// Opacity bitmap of a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Builds a mask where every pixel is opaque.
    #[must_use]
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; pixel_count(width, height)],
        }
    }

    /// Builds a mask from one alpha byte per pixel, row-major.
    ///
    /// Pixels with alpha strictly above [`MASK_ALPHA_THRESHOLD`] are opaque.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::BufferSize`] when `alpha` does not hold exactly
    /// `width * height` bytes.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Result<Self, MaskError> {
        Self::from_strided(width, height, alpha, 1, 0)
    }

    /// Builds a mask from tightly packed RGBA8 pixels, row-major.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::BufferSize`] when `rgba` does not hold exactly
    /// `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, MaskError> {
        Self::from_strided(width, height, rgba, 4, 3)
    }

    fn from_strided(
        width: u32,
        height: u32,
        pixels: &[u8],
        stride: usize,
        alpha_offset: usize,
    ) -> Result<Self, MaskError> {
        let expected = pixel_count(width, height) * stride;
        if pixels.len() != expected {
            return Err(MaskError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        let bits = pixels
            .chunks_exact(stride)
            .map(|pixel| pixel.get(alpha_offset).is_some_and(|a| *a > MASK_ALPHA_THRESHOLD))
            .collect();
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Mask width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of opaque pixels.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }

    /// Row-major RGBA pixels: `colour` where opaque, fully transparent
    /// elsewhere.
    #[must_use]
    pub fn to_rgba(&self, colour: [u8; 4]) -> Vec<u8> {
        self.bits
            .iter()
            .flat_map(|&opaque| if opaque { colour } else { [0; 4] })
            .collect()
    }

    /// Returns whether the pixel at `(x, y)` is opaque.
    ///
    /// Coordinates outside the mask are transparent.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> bool {
        let (Ok(col), Ok(row)) = (u32::try_from(x), u32::try_from(y)) else {
            return false;
        };
        if col >= self.width || row >= self.height {
            return false;
        }
        let index = row as usize * self.width as usize + col as usize;
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Returns whether this mask and `other` share an opaque pixel.
    ///
    /// `offset` is the position of `other`'s top-left corner relative to this
    /// mask's top-left corner.
    ///
    /// # Examples
    ///
    /// ```
    /// use frontier::mask::Mask;
    /// use glam::IVec2;
    ///
    /// let a = Mask::filled(4, 4);
    /// let b = Mask::filled(4, 4);
    /// assert!(a.overlaps(&b, IVec2::new(3, 3)));
    /// assert!(!a.overlaps(&b, IVec2::new(4, 0)));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self, offset: IVec2) -> bool {
        let (self_w, self_h) = (dimension(self.width), dimension(self.height));
        let (other_w, other_h) = (dimension(other.width), dimension(other.height));

        let x_start = offset.x.max(0);
        let x_end = (offset.x + other_w).min(self_w);
        let y_start = offset.y.max(0);
        let y_end = (offset.y + other_h).min(self_h);

        (y_start..y_end).any(|y| {
            (x_start..x_end).any(|x| self.get(x, y) && other.get(x - offset.x, y - offset.y))
        })
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

fn dimension(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// A 4x4 mask with only the top-left 2x2 quadrant opaque.
    fn quadrant() -> Mask {
        #[rustfmt::skip]
        let alpha = [
            255, 255, 0, 0,
            255, 255, 0, 0,
            0,   0,   0, 0,
            0,   0,   0, 0,
        ];
        Mask::from_alpha(4, 4, &alpha).expect("valid buffer")
    }

    #[rstest]
    fn alpha_threshold_is_exclusive() {
        let mask = Mask::from_alpha(3, 1, &[127, 128, 0]).expect("valid buffer");
        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(!mask.get(2, 0));
        assert_eq!(mask.count(), 1);
    }

    #[rstest]
    fn rgba_reads_alpha_channel() {
        let rgba = [0, 0, 0, 255, 255, 255, 255, 0];
        let mask = Mask::from_rgba(2, 1, &rgba).expect("valid buffer");
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
    }

    #[rstest]
    fn wrong_buffer_size_is_rejected() {
        let err = Mask::from_alpha(2, 2, &[0; 3]).expect_err("short buffer");
        assert_eq!(
            err,
            MaskError::BufferSize {
                width: 2,
                height: 2,
                expected: 4,
                actual: 3
            }
        );
    }

    #[rstest]
    #[case::opaque_corners_meet(IVec2::new(1, 1), true)]
    #[case::transparent_region_only(IVec2::new(2, 0), false)]
    #[case::negative_offset(IVec2::new(-1, -1), true)]
    #[case::disjoint(IVec2::new(10, 10), false)]
    fn overlap_ignores_transparent_pixels(#[case] offset: IVec2, #[case] expected: bool) {
        let a = quadrant();
        let b = quadrant();
        assert_eq!(a.overlaps(&b, offset), expected);
    }

    #[rstest]
    fn out_of_bounds_pixels_are_transparent() {
        let mask = Mask::filled(2, 2);
        assert!(!mask.get(-1, 0));
        assert!(!mask.get(0, 2));
    }
}
