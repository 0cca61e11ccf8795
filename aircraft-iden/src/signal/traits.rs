//! Trait interfaces for signal-processing capabilities.

use crate::kernel::{ExecInvariantViolation, Read1D};
use crate::signal::spectral::SpectralTriple;

/// 1D detrend capability.
pub trait Detrend1D {
    /// Detrend and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized;
}

/// Per-output spectral estimation capability.
///
/// Implemented by the single-window and the composite strategies so the
/// identification engine can stay agnostic of how the densities were built.
pub trait SpectralEstimate {
    /// Number of output channels the estimator can serve.
    fn channel_count(&self) -> usize;

    /// Input auto-spectrum, cross-spectrum and output auto-spectrum of one
    /// output channel on the estimator's frequency vector.
    fn estimate(&self, channel: usize) -> Result<SpectralTriple, ExecInvariantViolation>;
}
