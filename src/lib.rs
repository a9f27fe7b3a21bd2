//! Pixel Kernels
//!
//! In-place RGBA pixel filters (grayscale, invert, sepia) for hosts that
//! hand over a raw pixel buffer and its dimensions, with Python bindings
//! via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! - Flat `&mut [u8]`, 4 bytes per pixel (R, G, B, A), row-major
//! - `len == width * height * 4`, checked before anything is written
//! - Alpha is always passed through unchanged
//!
//! ## Example
//! ```
//! let mut pixels = vec![200, 100, 50, 255];
//! pixel_kernels::sepia(&mut pixels, 1, 1).unwrap();
//! assert_eq!(pixels, [164, 146, 114, 255]);
//! ```
//!
//! ## Threading
//! Calls are synchronous. On native targets large images are split by rows
//! over the rayon pool (see [`KernelConfig`]); the output is identical
//! either way. A buffer can only be borrowed by one call at a time.

use std::sync::Once;

use log::debug;

pub mod config;
pub mod error;
pub mod filters;
pub mod reference;

#[cfg(not(target_arch = "wasm32"))]
pub mod bench;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{KernelConfig, Parallelism};
pub use error::{FilterError, FilterResult};
pub use filters::color_adjust::invert;
pub use filters::color_science::sepia;
pub use filters::grayscale::grayscale;
pub use filters::Filter;

static INIT: Once = Once::new();

/// One-time setup. Idempotent and safe to call from any thread.
///
/// Filters work without it; hosts call it up front so that the cost of
/// bringing up the worker pool is not charged to the first filter call.
pub fn init() {
    INIT.call_once(|| {
        debug!(
            "pixel kernels initialized: {} worker threads, {:?}",
            worker_threads(),
            KernelConfig::default().parallelism
        );
    });
}

/// Whether [`init`] has completed.
pub fn is_initialized() -> bool {
    INIT.is_completed()
}

#[cfg(not(target_arch = "wasm32"))]
fn worker_threads() -> usize {
    rayon::current_num_threads()
}

#[cfg(target_arch = "wasm32")]
fn worker_threads() -> usize {
    1
}

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::PyReadwriteArray3;
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::FilterError;
    use crate::filters::Filter;

    impl From<FilterError> for PyErr {
        fn from(err: FilterError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    // ========================================================================
    // Filters (in place on writable uint8 arrays of shape (H, W, 4))
    // ========================================================================

    /// Convert an RGBA uint8 array to grayscale in place.
    ///
    /// R=G=B=BT.601 luma (truncated), alpha preserved.
    #[pyfunction]
    pub fn grayscale(mut image: PyReadwriteArray3<'_, u8>) -> PyResult<()> {
        Ok(Filter::Grayscale.apply_array(image.as_array_mut())?)
    }

    /// Invert RGB of an RGBA uint8 array in place.
    #[pyfunction]
    pub fn invert(mut image: PyReadwriteArray3<'_, u8>) -> PyResult<()> {
        Ok(Filter::Invert.apply_array(image.as_array_mut())?)
    }

    /// Apply sepia tone to an RGBA uint8 array in place.
    #[pyfunction]
    pub fn sepia(mut image: PyReadwriteArray3<'_, u8>) -> PyResult<()> {
        Ok(Filter::Sepia.apply_array(image.as_array_mut())?)
    }

    /// Apply a filter by name ("grayscale", "invert", "sepia") in place.
    #[pyfunction]
    pub fn apply_filter(name: &str, mut image: PyReadwriteArray3<'_, u8>) -> PyResult<()> {
        let filter: Filter = name.parse()?;
        Ok(filter.apply_array(image.as_array_mut())?)
    }

    /// One-time setup; safe to call repeatedly.
    #[pyfunction]
    pub fn init() {
        crate::init();
    }

    #[pymodule]
    pub fn pixel_kernels(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(init, m)?)?;
        m.add_function(wrap_pyfunction!(grayscale, m)?)?;
        m.add_function(wrap_pyfunction!(invert, m)?)?;
        m.add_function(wrap_pyfunction!(sepia, m)?)?;
        m.add_function(wrap_pyfunction!(apply_filter, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::pixel_kernels;
