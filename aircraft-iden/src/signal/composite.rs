//! Multi-window composite spectra for one input/output pair.
//!
//! Long windows resolve the low end of the band, short windows average more
//! and give steadier estimates higher up. Every usable window count is
//! estimated, moved onto the finest frequency grid, and blended bin by bin
//! with weights proportional to the inverse squared random error
//! `2·n_d·γ² / (1 - γ²)`.

use crate::kernel::{ConfigError, ExecInvariantViolation};
use crate::signal::spectral::{MultiSignalSpectrum, SignalRole, SpectrumConfig};
use crate::signal::FrequencyBand;
use aircraft_iden_core::num_rs::interp;
use log::{debug, warn};
use rustfft::num_complex::Complex;

/// Window counts tried when none are given.
pub const DEFAULT_WINDOW_COUNTS: [usize; 5] = [2, 4, 8, 16, 32];

const MAX_COHERENCE: f64 = 1.0 - 1e-9;

#[derive(Debug, Clone)]
struct WindowEstimate {
    win_num: usize,
    segments: usize,
    freq: Vec<f64>,
    gxx: Vec<f64>,
    gxy: Vec<Complex<f64>>,
    gyy: Vec<f64>,
}

impl WindowEstimate {
    fn compute(
        x: &[f64],
        y: &[f64],
        sample_rate: f64,
        band: FrequencyBand,
        win_num: usize,
    ) -> Result<Self, ExecInvariantViolation> {
        let config = SpectrumConfig {
            sample_rate,
            band,
            win_num,
        };
        let spectrum = MultiSignalSpectrum::try_new(
            config,
            &[(SignalRole::PrimaryInput, x), (SignalRole::Output(0), y)],
        )?;
        Ok(Self {
            win_num,
            segments: spectrum.window_count(),
            freq: spectrum.freq().to_vec(),
            gxx: spectrum.auto_spectrum(SignalRole::PrimaryInput)?,
            gxy: spectrum.cross_spectrum(SignalRole::PrimaryInput, SignalRole::Output(0))?,
            gyy: spectrum.auto_spectrum(SignalRole::Output(0))?,
        })
    }

    /// Linear interpolation onto `grid`; `None` outside this estimate's range.
    fn on_grid(
        &self,
        grid: &[f64],
    ) -> Result<Vec<Option<(f64, Complex<f64>, f64)>>, ExecInvariantViolation> {
        let (lo, hi) = (self.freq[0], self.freq[self.freq.len() - 1]);
        let re: Vec<f64> = self.gxy.iter().map(|c| c.re).collect();
        let im: Vec<f64> = self.gxy.iter().map(|c| c.im).collect();
        let gxx = interp(grid, &self.freq, &self.gxx)?;
        let gyy = interp(grid, &self.freq, &self.gyy)?;
        let re = interp(grid, &self.freq, &re)?;
        let im = interp(grid, &self.freq, &im)?;
        Ok(grid
            .iter()
            .enumerate()
            .map(|(j, &w)| {
                (w >= lo && w <= hi).then(|| (gxx[j], Complex::new(re[j], im[j]), gyy[j]))
            })
            .collect())
    }
}

fn coherence_weight(gxx: f64, gxy: Complex<f64>, gyy: f64, window_count: usize) -> f64 {
    let gamma2 = gxy.norm_sqr() / (gxx.abs() * gyy.abs());
    if !gamma2.is_finite() {
        return 0.0;
    }
    let gamma2 = gamma2.clamp(0.0, MAX_COHERENCE);
    2.0 * window_count as f64 * gamma2 / (1.0 - gamma2)
}

#[derive(Debug, Clone, Copy, Default)]
struct Blend {
    weight: f64,
    gxx: f64,
    gxy: Complex<f64>,
    gyy: f64,
}

impl Blend {
    fn add(&mut self, weight: f64, gxx: f64, gxy: Complex<f64>, gyy: f64) {
        self.weight += weight;
        self.gxx += weight * gxx;
        self.gxy += gxy * weight;
        self.gyy += weight * gyy;
    }

    fn finish(self) -> (f64, Complex<f64>, f64) {
        (
            self.gxx / self.weight,
            self.gxy / self.weight,
            self.gyy / self.weight,
        )
    }
}

/// Composite spectra of one input/output pair over several window lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeWindow {
    /// Frequency vector in rad/s, the bins of the longest window.
    pub freq: Vec<f64>,
    /// Blended input auto-spectral density.
    pub gxx: Vec<f64>,
    /// Blended cross-spectral density.
    pub gxy: Vec<Complex<f64>>,
    /// Blended output auto-spectral density.
    pub gyy: Vec<f64>,
    window_counts: Vec<usize>,
}

impl CompositeWindow {
    /// Composite over [DEFAULT_WINDOW_COUNTS].
    pub fn try_new(
        x: &[f64],
        y: &[f64],
        sample_rate: f64,
        band: FrequencyBand,
    ) -> Result<Self, ExecInvariantViolation> {
        Self::with_window_counts(x, y, sample_rate, band, &DEFAULT_WINDOW_COUNTS)
    }

    /// Composite over the given window counts.
    ///
    /// Counts whose windows are too short, or that have no bin inside the
    /// band, are skipped; at least one must remain.
    pub fn with_window_counts(
        x: &[f64],
        y: &[f64],
        sample_rate: f64,
        band: FrequencyBand,
        window_counts: &[usize],
    ) -> Result<Self, ExecInvariantViolation> {
        let mut counts: Vec<usize> = window_counts.iter().copied().filter(|&n| n > 0).collect();
        counts.sort_unstable();
        counts.dedup();

        let mut estimates = Vec::with_capacity(counts.len());
        let mut skipped = Vec::new();
        for &win_num in &counts {
            match WindowEstimate::compute(x, y, sample_rate, band, win_num) {
                Ok(estimate) => estimates.push(estimate),
                Err(ExecInvariantViolation::Config(ConfigError::InvalidArgument {
                    arg: "win_num" | "band",
                    ..
                })) => skipped.push(win_num),
                Err(err) => return Err(err),
            }
        }
        if !skipped.is_empty() {
            warn!("composite window skipped unusable window counts {skipped:?}");
        }
        let Some(reference) = estimates.first() else {
            return Err(ConfigError::InvalidArgument {
                arg: "window_counts",
                reason: "no window count yields frequency bins inside the band",
            }
            .into());
        };

        let grid = reference.freq.clone();
        let resampled = estimates
            .iter()
            .map(|e| e.on_grid(&grid))
            .collect::<Result<Vec<_>, _>>()?;

        let mut gxx = Vec::with_capacity(grid.len());
        let mut gxy = Vec::with_capacity(grid.len());
        let mut gyy = Vec::with_capacity(grid.len());
        for j in 0..grid.len() {
            let mut weighted = Blend::default();
            let mut plain = Blend::default();
            for (estimate, values) in estimates.iter().zip(resampled.iter()) {
                let Some((xx, xy, yy)) = values[j] else {
                    continue;
                };
                plain.add(1.0, xx, xy, yy);
                let weight = coherence_weight(xx, xy, yy, estimate.segments);
                if weight > 0.0 {
                    weighted.add(weight, xx, xy, yy);
                }
            }
            let (xx, xy, yy) = if weighted.weight > 0.0 {
                weighted.finish()
            } else {
                plain.finish()
            };
            gxx.push(xx);
            gxy.push(xy);
            gyy.push(yy);
        }

        let used: Vec<usize> = estimates.iter().map(|e| e.win_num).collect();
        debug!(
            "composite window over counts {used:?}: {} bin(s) from {:.3} to {:.3} rad/s",
            grid.len(),
            grid[0],
            grid[grid.len() - 1]
        );

        Ok(Self {
            freq: grid,
            gxx,
            gxy,
            gyy,
            window_counts: used,
        })
    }

    /// Requested window counts that contributed, ascending.
    pub fn window_counts(&self) -> &[usize] {
        &self.window_counts
    }
}
