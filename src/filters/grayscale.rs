//! Grayscale conversion filter.
//!
//! Uses ITU-R BT.601 luma coefficients (0.299, 0.587, 0.114).
//!
//! ## Rounding
//!
//! The luma is truncated toward zero. Coefficients are exact thousandths,
//! so the kernel evaluates them in fixed-point integer arithmetic: the
//! result is the exact truncation of the real-valued formula, with no
//! float error at integer boundaries. A pixel that is already gray maps to
//! itself, which makes the filter idempotent.

use ndarray::ArrayViewMut3;

use crate::config::KernelConfig;
use crate::error::FilterResult;
use crate::filters::core::{for_each_pixel, for_each_pixel_array};

/// BT.601 luma coefficients, scaled by [`COEFF_SCALE`]
pub const LUMA_R: i32 = 299;
pub const LUMA_G: i32 = 587;
pub const LUMA_B: i32 = 114;

/// Fixed-point scale of all channel coefficients
pub const COEFF_SCALE: i32 = 1000;

/// Luma of one pixel, truncated and clamped to 0-255.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = (LUMA_R * r as i32 + LUMA_G * g as i32 + LUMA_B * b as i32) / COEFF_SCALE;
    y.clamp(0, 255) as u8
}

#[inline]
fn grayscale_pixel(px: &mut [u8]) {
    let gray = luma(px[0], px[1], px[2]);
    px[0] = gray; // R
    px[1] = gray; // G
    px[2] = gray; // B
}

// ============================================================================
// Flat Buffer
// ============================================================================

/// Convert a flat RGBA buffer to grayscale in place.
///
/// Output has R=G=B=luma, alpha preserved.
///
/// # Arguments
/// * `buffer` - RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
/// `InvalidBufferShape` if the length does not match; the buffer is untouched.
pub fn grayscale(buffer: &mut [u8], width: u32, height: u32) -> FilterResult<()> {
    grayscale_with(buffer, width, height, &KernelConfig::default())
}

/// [`grayscale`] with an explicit configuration.
pub fn grayscale_with(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    config: &KernelConfig,
) -> FilterResult<()> {
    for_each_pixel(buffer, width, height, config, grayscale_pixel)
}

// ============================================================================
// ndarray View
// ============================================================================

/// Convert a (height, width, 4) RGBA array to grayscale in place.
pub fn grayscale_rgba_u8(image: ArrayViewMut3<u8>) -> FilterResult<()> {
    for_each_pixel_array(image, &KernelConfig::default(), grayscale_pixel)
}
