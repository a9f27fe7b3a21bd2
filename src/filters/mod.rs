//! Filter kernels for RGBA pixel buffers.
//!
//! ## Buffer Format
//!
//! | Property | Value |
//! |----------|-------|
//! | Layout | Flat `&mut [u8]`, row-major, top-left origin |
//! | Pixel | 4 bytes: R, G, B, A |
//! | Length | `width * height * 4`, checked before any write |
//!
//! An ndarray view of shape (height, width, 4) is accepted as well.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **In place** - The caller's buffer is borrowed mutably for the call only
//! - **Alpha preservation** - Alpha is never written
//! - **Truncating** - Weighted sums are truncated toward zero, then clamped
//! - **Thread-safe** - No global state; rows may be split over rayon on native targets
//!
//! ## Filters
//!
//! - **grayscale**: R=G=B=BT.601 luma
//! - **invert**: 255 - channel
//! - **sepia**: fixed warm-tone color matrix

use std::fmt;
use std::str::FromStr;

use log::trace;
use ndarray::ArrayViewMut3;

use crate::config::KernelConfig;
use crate::error::{FilterError, FilterResult};

pub mod core;
pub mod grayscale;
pub mod color_adjust;
pub mod color_science;

/// One of the available pixel filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    Grayscale,
    Invert,
    Sepia,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::Grayscale, Filter::Invert, Filter::Sepia];

    /// Name used by host bindings and `FromStr`
    pub fn name(self) -> &'static str {
        match self {
            Filter::Grayscale => "grayscale",
            Filter::Invert => "invert",
            Filter::Sepia => "sepia",
        }
    }

    /// Apply this filter in place using the default configuration.
    pub fn apply(self, buffer: &mut [u8], width: u32, height: u32) -> FilterResult<()> {
        self.apply_with(buffer, width, height, &KernelConfig::default())
    }

    /// Apply this filter in place using `config`.
    pub fn apply_with(
        self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        config: &KernelConfig,
    ) -> FilterResult<()> {
        trace!("{} {}x{} ({} bytes, {:?})", self, width, height, buffer.len(), config.parallelism);
        match self {
            Filter::Grayscale => grayscale::grayscale_with(buffer, width, height, config),
            Filter::Invert => color_adjust::invert_with(buffer, width, height, config),
            Filter::Sepia => color_science::sepia_with(buffer, width, height, config),
        }
    }

    /// Apply this filter to a (height, width, 4) array view in place.
    pub fn apply_array(self, image: ArrayViewMut3<u8>) -> FilterResult<()> {
        trace!("{} array {:?}", self, image.dim());
        match self {
            Filter::Grayscale => grayscale::grayscale_rgba_u8(image),
            Filter::Invert => color_adjust::invert_rgba_u8(image),
            Filter::Sepia => color_science::sepia_rgba_u8(image),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|filter| filter.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}
