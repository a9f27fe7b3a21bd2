//! Error types returned by the filter kernels and their host adapters.

use thiserror::Error;

/// Filter operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Buffer length does not match `width * height * 4`.
    ///
    /// Raised before any byte is written, so the caller's buffer is untouched.
    #[error("invalid buffer shape: {len} bytes cannot hold {width}x{height} RGBA pixels")]
    InvalidBufferShape { width: u32, height: u32, len: usize },

    /// A host asked for a filter by a name we do not know.
    #[error("unknown filter: {0:?}")]
    UnknownFilter(String),
}

pub type FilterResult<T> = Result<T, FilterError>;
