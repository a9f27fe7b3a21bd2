//! Color adjustment filters: Invert.
//!
//! Pixel-wise, no spatial context. Alpha is always preserved.

use ndarray::ArrayViewMut3;

use crate::config::KernelConfig;
use crate::error::FilterResult;
use crate::filters::core::{for_each_pixel, for_each_pixel_array};

#[inline]
fn invert_pixel(px: &mut [u8]) {
    px[0] = 255 - px[0];
    px[1] = 255 - px[1];
    px[2] = 255 - px[2];
}

// ============================================================================
// Invert
// ============================================================================

/// Invert the RGB channels of a flat RGBA buffer in place.
///
/// `invert` is its own inverse: applying it twice restores the input.
///
/// # Errors
/// `InvalidBufferShape` if `buffer.len() != width * height * 4`.
pub fn invert(buffer: &mut [u8], width: u32, height: u32) -> FilterResult<()> {
    invert_with(buffer, width, height, &KernelConfig::default())
}

/// [`invert`] with an explicit configuration.
pub fn invert_with(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    config: &KernelConfig,
) -> FilterResult<()> {
    for_each_pixel(buffer, width, height, config, invert_pixel)
}

/// Invert a (height, width, 4) RGBA array in place.
pub fn invert_rgba_u8(image: ArrayViewMut3<u8>) -> FilterResult<()> {
    for_each_pixel_array(image, &KernelConfig::default(), invert_pixel)
}
