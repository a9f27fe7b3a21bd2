//! Shared iteration contract for the per-pixel kernels.
//!
//! Every filter is a function of one RGBA pixel. This module owns the parts
//! the filters have in common:
//! - Shape validation (`len == width * height * 4`)
//! - Walking the buffer pixel by pixel, sequentially or split by rows
//! - Adapting (height, width, 4) ndarray views to the same contract
//!
//! Validation always happens before the first write, so a rejected call
//! leaves the buffer untouched.

use log::debug;
use ndarray::{ArrayViewMut3, Axis};

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use crate::config::KernelConfig;
use crate::error::{FilterError, FilterResult};

/// Bytes per RGBA pixel
pub const CHANNELS: usize = 4;

/// Index of the alpha byte within a pixel
pub const ALPHA: usize = 3;

// ============================================================================
// Shape Validation
// ============================================================================

/// Number of bytes a `width` x `height` RGBA image occupies.
///
/// Returns `None` if the product does not fit in `usize`.
pub fn expected_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

/// Check that `buffer` holds exactly `width * height` RGBA pixels.
pub fn check_shape(buffer: &[u8], width: u32, height: u32) -> FilterResult<()> {
    match expected_len(width, height) {
        Some(len) if len == buffer.len() => Ok(()),
        expected => {
            debug!(
                "rejecting {} byte buffer for {}x{} image (expected {:?})",
                buffer.len(),
                width,
                height,
                expected
            );
            Err(FilterError::InvalidBufferShape {
                width,
                height,
                len: buffer.len(),
            })
        }
    }
}

// ============================================================================
// Pixel Iteration
// ============================================================================

/// Apply `op` to every pixel of a flat RGBA buffer, in place.
///
/// `op` receives a 4-byte slice `[R, G, B, A]`. It must not change the
/// alpha byte; the filters in this crate never do.
///
/// # Arguments
/// * `buffer` - Flat RGBA bytes, row-major, top-left origin
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `config` - Decides whether rows are split across threads
/// * `op` - Per-pixel transform
pub fn for_each_pixel<F>(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    config: &KernelConfig,
    op: F,
) -> FilterResult<()>
where
    F: Fn(&mut [u8]) + Sync + Send,
{
    check_shape(buffer, width, height)?;
    if buffer.is_empty() {
        return Ok(());
    }

    let row_len = width as usize * CHANNELS;
    let parallel = config.use_parallel(buffer.len() / CHANNELS);
    run_rows(buffer, row_len, parallel, &op);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn run_rows<F>(buffer: &mut [u8], row_len: usize, parallel: bool, op: &F)
where
    F: Fn(&mut [u8]) + Sync + Send,
{
    if parallel {
        buffer
            .par_chunks_mut(row_len)
            .for_each(|row| row.chunks_exact_mut(CHANNELS).for_each(op));
    } else {
        buffer.chunks_exact_mut(CHANNELS).for_each(op);
    }
}

#[cfg(target_arch = "wasm32")]
fn run_rows<F>(buffer: &mut [u8], _row_len: usize, _parallel: bool, op: &F)
where
    F: Fn(&mut [u8]) + Sync + Send,
{
    buffer.chunks_exact_mut(CHANNELS).for_each(op);
}

/// Apply `op` to every pixel of a (height, width, 4) array view, in place.
///
/// Standard-layout views take the flat fast path. Anything else (slices,
/// transposed or strided views) is walked lane by lane.
pub fn for_each_pixel_array<F>(
    mut image: ArrayViewMut3<u8>,
    config: &KernelConfig,
    op: F,
) -> FilterResult<()>
where
    F: Fn(&mut [u8]) + Sync + Send,
{
    let (height, width, channels) = image.dim();
    let width_u32 = u32::try_from(width).unwrap_or(u32::MAX);
    let height_u32 = u32::try_from(height).unwrap_or(u32::MAX);

    if channels != CHANNELS {
        debug!("rejecting array with {} channels, expected {}", channels, CHANNELS);
        return Err(FilterError::InvalidBufferShape {
            width: width_u32,
            height: height_u32,
            len: image.len(),
        });
    }

    if let Some(flat) = image.as_slice_mut() {
        return for_each_pixel(flat, width_u32, height_u32, config, op);
    }

    for mut lane in image.lanes_mut(Axis(2)) {
        let mut px = [lane[0], lane[1], lane[2], lane[3]];
        op(&mut px[..]);
        for (dst, src) in lane.iter_mut().zip(px) {
            *dst = src;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{s, Array3};

    fn bump_red(px: &mut [u8]) {
        px[0] = px[0].saturating_add(1);
    }

    // ========================================================================
    // Shape Tests
    // ========================================================================

    #[test]
    fn test_expected_len() {
        assert_eq!(expected_len(1920, 1080), Some(1920 * 1080 * 4));
        assert_eq!(expected_len(0, 10), Some(0));
    }

    #[test]
    fn test_check_shape_rejects_short_and_long() {
        let short = vec![0u8; 15];
        let long = vec![0u8; 17];
        assert!(check_shape(&short, 2, 2).is_err());
        assert!(check_shape(&long, 2, 2).is_err());
        assert!(check_shape(&[0u8; 16], 2, 2).is_ok());
    }

    #[test]
    fn test_check_shape_reports_dimensions() {
        let err = check_shape(&[0u8; 3], 1, 1).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidBufferShape { width: 1, height: 1, len: 3 }
        );
    }

    #[test]
    fn test_rejected_buffer_is_untouched() {
        let mut buf = vec![7u8; 10];
        let result = for_each_pixel(&mut buf, 2, 2, &KernelConfig::default(), bump_red);
        assert!(result.is_err());
        assert!(buf.iter().all(|&v| v == 7));
    }

    // ========================================================================
    // Iteration Tests
    // ========================================================================

    #[test]
    fn test_empty_image_is_noop() {
        let mut buf: Vec<u8> = Vec::new();
        assert!(for_each_pixel(&mut buf, 0, 5, &KernelConfig::parallel(), bump_red).is_ok());
    }

    #[test]
    fn test_visits_every_pixel_once() {
        for config in [KernelConfig::sequential(), KernelConfig::parallel()] {
            let mut buf = vec![0u8; 7 * 5 * 4];
            for_each_pixel(&mut buf, 7, 5, &config, bump_red).unwrap();
            for px in buf.chunks_exact(4) {
                assert_eq!(px, &[1, 0, 0, 0]);
            }
        }
    }

    // ========================================================================
    // ndarray Adapter Tests
    // ========================================================================

    #[test]
    fn test_array_standard_layout() {
        let mut img = Array3::<u8>::zeros((3, 2, 4));
        for_each_pixel_array(img.view_mut(), &KernelConfig::default(), bump_red).unwrap();
        assert!(img.slice(s![.., .., 0]).iter().all(|&v| v == 1));
        assert!(img.slice(s![.., .., 1..]).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_array_strided_view() {
        let mut img = Array3::<u8>::zeros((4, 4, 4));
        // Every other column: not contiguous
        let view = img.slice_mut(s![.., ..;2, ..]);
        for_each_pixel_array(view, &KernelConfig::default(), bump_red).unwrap();

        assert_eq!(img[[0, 0, 0]], 1);
        assert_eq!(img[[0, 1, 0]], 0);
        assert_eq!(img[[3, 2, 0]], 1);
        assert_eq!(img[[3, 3, 0]], 0);
    }

    #[test]
    fn test_array_wrong_channel_count() {
        let mut img = Array3::<u8>::zeros((2, 2, 3));
        let err = for_each_pixel_array(img.view_mut(), &KernelConfig::default(), bump_red)
            .unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidBufferShape { width: 2, height: 2, len: 12 }
        );
    }
}
