//! Kernel vs. reference timing.
//!
//! Mirrors the demo's "native vs. scripted" comparison: the same
//! synthetic image is filtered by the optimized kernel and by the scalar
//! reference, each on a fresh copy, and the per-run averages are reported.
//!
//! Native targets only (`std::time::Instant` is unavailable on wasm32).

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::error::{FilterError, FilterResult};
use crate::filters::core::{expected_len, ALPHA, CHANNELS};
use crate::filters::Filter;
use crate::reference;

// ============================================================================
// Simple RNG (deterministic test images)
// ============================================================================

/// Simple linear congruential generator for deterministic pixel data.
/// Uses MINSTD parameters.
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.wrapping_add(1), // Avoid zero
        }
    }

    /// Generate next random u32.
    pub fn next_u32(&mut self) -> u32 {
        // MINSTD LCG
        self.state = self.state.wrapping_mul(48271).wrapping_add(1) % 2147483647;
        self.state as u32
    }

    /// Generate a random byte from the high bits.
    pub fn next_u8(&mut self) -> u8 {
        (self.next_u32() >> 23) as u8
    }
}

/// Build a `width` x `height` RGBA buffer of pseudo-random pixels.
///
/// Alpha is random too, so alpha preservation is actually exercised.
pub fn synthetic_rgba(width: u32, height: u32, seed: u64) -> FilterResult<Vec<u8>> {
    let len = expected_len(width, height).ok_or(FilterError::InvalidBufferShape {
        width,
        height,
        len: 0,
    })?;
    let mut rng = SimpleRng::new(seed);
    Ok((0..len).map(|_| rng.next_u8()).collect())
}

// ============================================================================
// Benchmark
// ============================================================================

/// Result of one kernel vs. reference comparison.
#[derive(Clone, Debug)]
pub struct BenchReport {
    pub filter: Filter,
    pub width: u32,
    pub height: u32,
    pub iterations: u32,
    /// Average wall time of one kernel call
    pub kernel: Duration,
    /// Average wall time of one reference call
    pub reference: Duration,
    /// Whether kernel and reference produced identical bytes
    pub outputs_match: bool,
}

impl BenchReport {
    /// How many times faster the kernel ran than the reference.
    pub fn speedup(&self) -> f64 {
        self.reference.as_secs_f64() / self.kernel.as_secs_f64().max(f64::EPSILON)
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{}: kernel {:.3} ms, reference {:.3} ms, {:.1}x ({} runs{})",
            self.filter,
            self.width,
            self.height,
            self.kernel.as_secs_f64() * 1e3,
            self.reference.as_secs_f64() * 1e3,
            self.speedup(),
            self.iterations,
            if self.outputs_match { "" } else { ", OUTPUTS DIFFER" },
        )
    }
}

fn reference_fn(filter: Filter) -> fn(&mut [u8], u32, u32) -> FilterResult<()> {
    match filter {
        Filter::Grayscale => reference::grayscale,
        Filter::Invert => reference::invert,
        Filter::Sepia => reference::sepia,
    }
}

/// Average time of `iterations` runs of `run`, each on a fresh copy of `source`.
///
/// Returns the average and the output of the last run.
fn time_runs<F>(source: &[u8], iterations: u32, mut run: F) -> FilterResult<(Duration, Vec<u8>)>
where
    F: FnMut(&mut [u8]) -> FilterResult<()>,
{
    let mut total = Duration::ZERO;
    let mut output = source.to_vec();
    for _ in 0..iterations {
        output.copy_from_slice(source);
        let start = Instant::now();
        run(&mut output)?;
        total += start.elapsed();
    }
    Ok((total / iterations, output))
}

/// Time `filter` on a synthetic `width` x `height` image.
///
/// `iterations == 0` is treated as a single run.
pub fn compare(filter: Filter, width: u32, height: u32, iterations: u32) -> FilterResult<BenchReport> {
    let iterations = iterations.max(1);
    let source = synthetic_rgba(width, height, 0x5EED)?;

    let (kernel, kernel_out) =
        time_runs(&source, iterations, |buf| filter.apply(buf, width, height))?;
    let reference_filter = reference_fn(filter);
    let (reference, reference_out) =
        time_runs(&source, iterations, |buf| reference_filter(buf, width, height))?;

    let outputs_match = kernel_out == reference_out;
    if !outputs_match {
        warn!("{} kernel and reference disagree on {}x{} image", filter, width, height);
    }
    debug_assert!(kernel_out
        .chunks_exact(CHANNELS)
        .zip(source.chunks_exact(CHANNELS))
        .all(|(out, src)| out[ALPHA] == src[ALPHA]));

    let report = BenchReport {
        filter,
        width,
        height,
        iterations,
        kernel,
        reference,
        outputs_match,
    };
    debug!("{}", report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let a = synthetic_rgba(8, 8, 42).unwrap();
        let b = synthetic_rgba(8, 8, 42).unwrap();
        let c = synthetic_rgba(8, 8, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 8 * 8 * 4);
    }

    #[test]
    fn test_rng_covers_byte_range() {
        let data = synthetic_rgba(64, 64, 7).unwrap();
        assert!(data.iter().any(|&v| v < 16));
        assert!(data.iter().any(|&v| v > 240));
    }

    #[test]
    fn test_compare_reports_agreement() {
        for filter in Filter::ALL {
            let report = compare(filter, 32, 16, 2).unwrap();
            assert!(report.outputs_match, "{}", report);
            assert_eq!(report.iterations, 2);
            assert_eq!((report.width, report.height), (32, 16));
        }
    }

    #[test]
    fn test_compare_zero_iterations() {
        let report = compare(Filter::Invert, 4, 4, 0).unwrap();
        assert_eq!(report.iterations, 1);
    }

    #[test]
    fn test_report_display() {
        let report = BenchReport {
            filter: Filter::Sepia,
            width: 2,
            height: 3,
            iterations: 4,
            kernel: Duration::from_millis(1),
            reference: Duration::from_millis(5),
            outputs_match: true,
        };
        assert_eq!(
            report.to_string(),
            "sepia 2x3: kernel 1.000 ms, reference 5.000 ms, 5.0x (4 runs)"
        );
    }
}
