//! Frequency-domain system identification for single-input multi-output
//! flight-test records.
//!
//! A record (time stamps, a primary excitation, one or more measured
//! responses and an optional correlated assist excitation) is detrended and
//! resampled onto a uniform grid, turned into auto- and cross-spectral
//! densities, and reduced to per-output frequency responses `H(jω)` with
//! their coherence.
//!
//! ```
//! use aircraft_iden::iden::{FreqIdenConfig, FreqIdenKernel, SimoRecord};
//! use aircraft_iden::kernel::KernelLifecycle;
//! use aircraft_iden::signal::FrequencyBand;
//!
//! let t: Vec<f64> = (0..512).map(|i| i as f64 / 100.0).collect();
//! let x: Vec<f64> = t.iter().map(|t| (7.0 * t).sin() + (31.0 * t).cos()).collect();
//! let y: Vec<f64> = x.iter().map(|x| 2.0 * x).collect();
//!
//! let band = FrequencyBand::try_new(1.0, 100.0).unwrap();
//! let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band, 4)).unwrap();
//! let record = SimoRecord::try_new(&t, &x).unwrap().with_output(&y).unwrap();
//! let simo = kernel.identify(&record).unwrap();
//! let response = simo.get_freqres(None).unwrap();
//! assert_eq!(response.channel_count(), 1);
//! ```

pub mod iden;
pub mod kernel;
pub mod signal;
