//! Detrending and uniform resampling of captured time histories.
//!
//! Signals are always detrended on their original grid and only then
//! interpolated onto the uniform one.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D};
use crate::signal::traits::Detrend1D;
use aircraft_iden_core::num_rs::{average, interp, linspace};
use log::info;

/// Remove the mean and the end-to-end drift of a sequence.
///
/// The steps are, in order:
/// 1. subtract the mean;
/// 2. on the mean-removed data take `drift = x[n-1] - x[0]` and `start = x[0]`;
/// 3. subtract `drift * i / n + start` from sample `i`.
///
/// The ramp divides by `n`, not `n - 1`, so a pure ramp `a + b·i` leaves the
/// residual `b·i/n`. Empty input returns an empty vector.
pub fn remove_seq_average_and_drift(x: &[f64]) -> Vec<f64> {
    let Ok(mean) = average(x) else {
        return Vec::new();
    };
    let centered: Vec<f64> = x.iter().map(|v| v - mean).collect();
    let n = centered.len();
    let drift = centered[n - 1] - centered[0];
    let start_v = centered[0];
    centered
        .iter()
        .enumerate()
        .map(|(i, v)| v - drift * i as f64 / n as f64 - start_v)
        .collect()
}

/// Constructor config for [`DetrendKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetrendConfig;

/// Trait-first mean-and-drift removal kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetrendKernel;

impl KernelLifecycle for DetrendKernel {
    type Config = DetrendConfig;

    fn try_new(_config: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self)
    }
}

impl Detrend1D for DetrendKernel {
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        if input.is_empty() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "detrend input must be non-empty",
            });
        }
        Ok(remove_seq_average_and_drift(input))
    }
}

/// Constructor config for [`PreprocessKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessConfig {
    /// Interpolate onto `linspace(t0, t_last, n)`.
    pub resample: bool,
    /// Remove mean and drift before resampling.
    pub detrend: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            resample: true,
            detrend: true,
        }
    }
}

/// Signals brought onto one shared time grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreprocessedSignals {
    /// Shared time grid, uniform when resampling was enabled.
    pub time: Vec<f64>,
    /// One processed sequence per input signal, input order preserved.
    pub signals: Vec<Vec<f64>>,
    /// `n / (t_last - t0)` of the original grid.
    pub sample_rate: f64,
}

/// Trait-first detrend + resample kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessKernel {
    resample: bool,
    detrend: DetrendKernel,
    detrend_enabled: bool,
}

impl KernelLifecycle for PreprocessKernel {
    type Config = PreprocessConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self {
            resample: config.resample,
            detrend: DetrendKernel::try_new(DetrendConfig)?,
            detrend_enabled: config.detrend,
        })
    }
}

impl PreprocessKernel {
    /// Detrend and resample every signal against `time`.
    ///
    /// Every signal must carry exactly `time.len()` samples; the check runs
    /// before any signal is touched.
    pub fn run(
        &self,
        time: &[f64],
        signals: &[&[f64]],
    ) -> Result<PreprocessedSignals, ExecInvariantViolation> {
        if time.len() < 2 {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "time sequence needs at least two samples",
            });
        }
        for signal in signals {
            if signal.len() != time.len() {
                return Err(ExecInvariantViolation::LengthMismatch {
                    arg: "signal",
                    expected: time.len(),
                    got: signal.len(),
                });
            }
        }
        if time.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "time sequence must be strictly increasing",
            });
        }

        let t0 = time[0];
        let t_last = time[time.len() - 1];
        let sample_rate = time.len() as f64 / (t_last - t0);
        info!("sample rate is {sample_rate:.1} Hz");

        let grid = if self.resample {
            linspace(t0, t_last, time.len())
        } else {
            time.to_vec()
        };

        let mut processed = Vec::with_capacity(signals.len());
        for signal in signals {
            let data = if self.detrend_enabled {
                self.detrend.run_alloc(*signal)?
            } else {
                signal.to_vec()
            };
            let data = if self.resample {
                interp(&grid, time, &data)?
            } else {
                data
            };
            processed.push(data);
        }

        Ok(PreprocessedSignals {
            time: grid,
            signals: processed,
            sample_rate,
        })
    }
}

/// Detrend and/or resample signals recorded against `time`.
pub fn time_seq_preprocess(
    time: &[f64],
    signals: &[&[f64]],
    config: PreprocessConfig,
) -> Result<PreprocessedSignals, ExecInvariantViolation> {
    let kernel = PreprocessKernel::try_new(config).map_err(ExecInvariantViolation::from)?;
    kernel.run(time, signals)
}
