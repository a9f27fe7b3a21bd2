//! Runtime configuration for the filter kernels.
//!
//! The only knob is how a call is spread over threads. Results are
//! byte-identical for every setting; only wall-clock time changes.

/// Below this many pixels a row split costs more than it saves.
pub const DEFAULT_MIN_PARALLEL_PIXELS: usize = 65_536;

/// How a single kernel call distributes its rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    /// Always run on the calling thread.
    Sequential,
    /// Always split rows across the rayon pool.
    Parallel,
    /// Split only when the image has at least `min_pixels` pixels.
    Auto { min_pixels: usize },
}

/// Kernel configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KernelConfig {
    pub parallelism: Parallelism,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            parallelism: Parallelism::Auto {
                min_pixels: DEFAULT_MIN_PARALLEL_PIXELS,
            },
        }
    }
}

impl KernelConfig {
    /// Single-threaded configuration
    pub fn sequential() -> Self {
        Self { parallelism: Parallelism::Sequential }
    }

    /// Always split rows, regardless of image size
    pub fn parallel() -> Self {
        Self { parallelism: Parallelism::Parallel }
    }

    /// Whether an image of `pixels` pixels should be split across threads.
    ///
    /// Always `false` on wasm32, where there is no thread pool.
    pub fn use_parallel(&self, pixels: usize) -> bool {
        if cfg!(target_arch = "wasm32") {
            return false;
        }
        match self.parallelism {
            Parallelism::Sequential => false,
            Parallelism::Parallel => true,
            Parallelism::Auto { min_pixels } => pixels >= min_pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_auto() {
        let config = KernelConfig::default();
        assert_eq!(
            config.parallelism,
            Parallelism::Auto { min_pixels: DEFAULT_MIN_PARALLEL_PIXELS }
        );
        assert!(!config.use_parallel(16));
        assert!(config.use_parallel(1920 * 1080));
    }

    #[test]
    fn test_explicit_modes() {
        assert!(!KernelConfig::sequential().use_parallel(usize::MAX));
        assert!(KernelConfig::parallel().use_parallel(1));
    }
}
