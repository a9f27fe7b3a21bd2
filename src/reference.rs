//! Scalar reference filters.
//!
//! Straightforward index-based loops in `f64`, written the way a scripted
//! host would write them (float math, byte coercion on store). They are
//! the baseline the benchmark measures the kernels against and the oracle
//! the kernels are tested against.
//!
//! Shapes are validated the same way as the kernels.

use crate::error::FilterResult;
use crate::filters::core::{check_shape, CHANNELS};

/// Inputs are integers and every coefficient is an exact thousandth, so a
/// weighted sum is always a multiple of 0.001. Nudging by less than that
/// absorbs `f64` representation error without crossing the next integer.
const TRUNCATION_EPSILON: f64 = 1e-6;

fn to_byte(v: f64) -> u8 {
    // `as u8` truncates toward zero and saturates
    (v + TRUNCATION_EPSILON).clamp(0.0, 255.0) as u8
}

/// Reference grayscale (BT.601 luma, truncated).
pub fn grayscale(data: &mut [u8], width: u32, height: u32) -> FilterResult<()> {
    check_shape(data, width, height)?;
    let mut i = 0;
    while i < data.len() {
        let r = data[i] as f64;
        let g = data[i + 1] as f64;
        let b = data[i + 2] as f64;
        let gray = to_byte(0.299 * r + 0.587 * g + 0.114 * b);
        data[i] = gray;
        data[i + 1] = gray;
        data[i + 2] = gray;
        i += CHANNELS;
    }
    Ok(())
}

/// Reference invert.
pub fn invert(data: &mut [u8], width: u32, height: u32) -> FilterResult<()> {
    check_shape(data, width, height)?;
    let mut i = 0;
    while i < data.len() {
        data[i] = 255 - data[i];
        data[i + 1] = 255 - data[i + 1];
        data[i + 2] = 255 - data[i + 2];
        i += CHANNELS;
    }
    Ok(())
}

/// Reference sepia.
pub fn sepia(data: &mut [u8], width: u32, height: u32) -> FilterResult<()> {
    check_shape(data, width, height)?;
    let mut i = 0;
    while i < data.len() {
        let r = data[i] as f64;
        let g = data[i + 1] as f64;
        let b = data[i + 2] as f64;
        data[i] = to_byte(0.393 * r + 0.769 * g + 0.189 * b);
        data[i + 1] = to_byte(0.349 * r + 0.686 * g + 0.168 * b);
        data[i + 2] = to_byte(0.272 * r + 0.534 * g + 0.131 * b);
        i += CHANNELS;
    }
    Ok(())
}
