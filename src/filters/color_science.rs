//! Color science filters: Sepia.
//!
//! Sepia is a fixed 3x3 color matrix applied to the original R, G, B of
//! each pixel. Rows of the matrix sum to more than one, so bright inputs
//! saturate at 255. Results are truncated toward zero, matching the
//! grayscale filter.

use ndarray::ArrayViewMut3;

use crate::config::KernelConfig;
use crate::error::FilterResult;
use crate::filters::core::{for_each_pixel, for_each_pixel_array};
use crate::filters::grayscale::COEFF_SCALE;

/// Sepia color matrix, rows are output R, G, B; scaled by `COEFF_SCALE`
pub const SEPIA_MATRIX: [[i32; 3]; 3] = [
    [393, 769, 189],
    [349, 686, 168],
    [272, 534, 131],
];

#[inline]
fn mix(row: &[i32; 3], r: i32, g: i32, b: i32) -> u8 {
    ((row[0] * r + row[1] * g + row[2] * b) / COEFF_SCALE).clamp(0, 255) as u8
}

#[inline]
fn sepia_pixel(px: &mut [u8]) {
    let (r, g, b) = (px[0] as i32, px[1] as i32, px[2] as i32);
    px[0] = mix(&SEPIA_MATRIX[0], r, g, b);
    px[1] = mix(&SEPIA_MATRIX[1], r, g, b);
    px[2] = mix(&SEPIA_MATRIX[2], r, g, b);
}

// ============================================================================
// Sepia
// ============================================================================

/// Apply the sepia tone matrix to a flat RGBA buffer in place.
///
/// # Arguments
/// * `buffer` - RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
/// `InvalidBufferShape` if the length does not match; the buffer is untouched.
pub fn sepia(buffer: &mut [u8], width: u32, height: u32) -> FilterResult<()> {
    sepia_with(buffer, width, height, &KernelConfig::default())
}

/// [`sepia`] with an explicit configuration.
pub fn sepia_with(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    config: &KernelConfig,
) -> FilterResult<()> {
    for_each_pixel(buffer, width, height, config, sepia_pixel)
}

/// Apply sepia to a (height, width, 4) RGBA array in place.
pub fn sepia_rgba_u8(image: ArrayViewMut3<u8>) -> FilterResult<()> {
    for_each_pixel_array(image, &KernelConfig::default(), sepia_pixel)
}
