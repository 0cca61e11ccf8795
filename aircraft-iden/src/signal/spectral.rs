//! Auto- and cross-spectral densities of role-tagged signals.
//!
//! Every signal is cut into the same Hann-windowed, half-overlapping
//! segments, transformed once, and kept restricted to the bins of the
//! frequency band. Auto and cross densities are then averages over segments
//! of `conj(F_a) · F_b`, scaled to a one-sided density.

use crate::kernel::{ConfigError, ExecInvariantViolation};
use crate::signal::FrequencyBand;
use core::f64::consts::PI;
use core::fmt;
use log::debug;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Smallest usable segment length.
pub const MIN_SEGMENT_LEN: usize = 4;

/// Which part a signal plays in a SIMO record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalRole {
    /// The primary excitation `x`.
    PrimaryInput,
    /// The secondary excitation correlated with `x`.
    AssistInput,
    /// The `i`-th measured response.
    Output(usize),
}

impl fmt::Display for SignalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalRole::PrimaryInput => write!(f, "primary input"),
            SignalRole::AssistInput => write!(f, "assist input"),
            SignalRole::Output(i) => write!(f, "output {i}"),
        }
    }
}

/// Input auto-spectrum, cross-spectrum and output auto-spectrum of one
/// input/output pair on a shared frequency vector (rad/s).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpectralTriple {
    /// Frequency vector in rad/s.
    pub freq: Vec<f64>,
    /// Input auto-spectral density.
    pub gxx: Vec<f64>,
    /// Input-to-output cross-spectral density.
    pub gxy: Vec<Complex<f64>>,
    /// Output auto-spectral density.
    pub gyy: Vec<f64>,
}

fn hann_window(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![1.0];
    }
    let nm1 = (n - 1) as f64;
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / nm1).cos())
        .collect()
}

fn segment_starts(len: usize, nperseg: usize, noverlap: usize) -> Vec<usize> {
    if nperseg == 0 || noverlap >= nperseg {
        return Vec::new();
    }
    if len <= nperseg {
        return vec![0];
    }
    let hop = nperseg - noverlap;
    let mut starts = Vec::new();
    let mut start = 0usize;
    while start + nperseg <= len {
        starts.push(start);
        start += hop;
    }
    if starts.is_empty() {
        starts.push(0);
    }
    starts
}

/// Segment length that fits `win_num` half-overlapping windows into `len`
/// samples.
///
/// Window counts too large to represent `win_num + 1` give a length of 0.
pub fn segment_len(len: usize, win_num: usize) -> usize {
    match win_num.checked_add(1) {
        Some(divisor) => len.saturating_mul(2) / divisor,
        None => 0,
    }
}

/// Constructor config for [`MultiSignalSpectrum`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumConfig {
    /// Sampling frequency in Hz.
    pub sample_rate: f64,
    /// Band the spectra are restricted to.
    pub band: FrequencyBand,
    /// Number of averaged windows.
    pub win_num: usize,
}

impl SpectrumConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "sample_rate",
                reason: "sample rate must be finite and > 0",
            });
        }
        if self.win_num == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "win_num",
                reason: "window count must be > 0",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct SegmentSpectra {
    role: SignalRole,
    // [segment][band bin]
    segments: Vec<Vec<Complex<f64>>>,
}

/// Windowed-FFT spectral analyzer over a stack of role-tagged signals.
///
/// All densities are computed from transforms taken once at construction,
/// so every accessor is a pure function of immutable state.
#[derive(Debug, Clone)]
pub struct MultiSignalSpectrum {
    sample_rate: f64,
    band: FrequencyBand,
    segment_len: usize,
    freq: Vec<f64>,
    density_scale: Vec<f64>,
    window_count: usize,
    spectra: Vec<SegmentSpectra>,
}

impl MultiSignalSpectrum {
    /// Transform every signal with the segmentation implied by
    /// `config.win_num`.
    ///
    /// # Errors
    /// * [ConfigError::EmptyInput] without signals.
    /// * [ExecInvariantViolation::LengthMismatch] when signal lengths differ.
    /// * [ConfigError::InvalidArgument] for a repeated role, a window count
    ///   leaving fewer than [MIN_SEGMENT_LEN] samples per segment, or a band
    ///   containing no frequency bin at that segment length.
    pub fn try_new(
        config: SpectrumConfig,
        signals: &[(SignalRole, &[f64])],
    ) -> Result<Self, ExecInvariantViolation> {
        config.validate()?;
        let Some((_, first)) = signals.first() else {
            return Err(ConfigError::EmptyInput { arg: "signals" }.into());
        };
        let len = first.len();
        for (i, (role, signal)) in signals.iter().enumerate() {
            if signal.len() != len {
                return Err(ExecInvariantViolation::LengthMismatch {
                    arg: "signals",
                    expected: len,
                    got: signal.len(),
                });
            }
            if signals[..i].iter().any(|(other, _)| other == role) {
                return Err(ConfigError::InvalidArgument {
                    arg: "signals",
                    reason: "each signal role may appear only once",
                }
                .into());
            }
        }

        let nperseg = segment_len(len, config.win_num);
        if nperseg < MIN_SEGMENT_LEN {
            return Err(ConfigError::InvalidArgument {
                arg: "win_num",
                reason: "window count leaves fewer than 4 samples per window",
            }
            .into());
        }

        let fs = config.sample_rate;
        let bin_omega = 2.0 * PI * fs / nperseg as f64;
        let bins: Vec<usize> = (0..=nperseg / 2)
            .filter(|&k| config.band.contains(k as f64 * bin_omega))
            .collect();
        if bins.is_empty() {
            return Err(ConfigError::InvalidArgument {
                arg: "band",
                reason: "no frequency bin falls inside the band at this window length",
            }
            .into());
        }

        let window = hann_window(nperseg);
        let win_norm = window.iter().map(|v| v * v).sum::<f64>();
        let density_scale: Vec<f64> = bins
            .iter()
            .map(|&k| {
                let one_sided = k != 0 && !(nperseg.is_multiple_of(2) && k == nperseg / 2);
                let factor = if one_sided { 2.0 } else { 1.0 };
                factor / (fs * win_norm)
            })
            .collect();
        let freq: Vec<f64> = bins.iter().map(|&k| k as f64 * bin_omega).collect();

        let starts = segment_starts(len, nperseg, nperseg / 2);
        let fft = FftPlanner::<f64>::new().plan_fft_forward(nperseg);
        let mut buf = vec![Complex::new(0.0, 0.0); nperseg];
        let mut spectra = Vec::with_capacity(signals.len());
        for (role, signal) in signals {
            let mut segments = Vec::with_capacity(starts.len());
            for &start in &starts {
                for (i, dst) in buf.iter_mut().enumerate() {
                    *dst = Complex::new(signal[start + i] * window[i], 0.0);
                }
                fft.process(&mut buf);
                segments.push(bins.iter().map(|&k| buf[k]).collect::<Vec<_>>());
            }
            spectra.push(SegmentSpectra {
                role: *role,
                segments,
            });
        }

        debug!(
            "spectrum of {} signal(s): {} window(s) of {} samples, {} bin(s) in band",
            signals.len(),
            starts.len(),
            nperseg,
            bins.len()
        );

        Ok(Self {
            sample_rate: fs,
            band: config.band,
            segment_len: nperseg,
            freq,
            density_scale,
            window_count: starts.len(),
            spectra,
        })
    }

    /// Frequency vector in rad/s.
    pub fn freq(&self) -> &[f64] {
        &self.freq
    }

    /// Sampling frequency in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Band the spectra are restricted to.
    pub fn band(&self) -> FrequencyBand {
        self.band
    }

    /// Samples per window.
    pub fn segment_len(&self) -> usize {
        self.segment_len
    }

    /// Number of windows actually averaged.
    pub fn window_count(&self) -> usize {
        self.window_count
    }

    /// Whether a signal was supplied for `role`.
    pub fn has_role(&self, role: SignalRole) -> bool {
        self.spectra.iter().any(|s| s.role == role)
    }

    fn segments_of(&self, role: SignalRole) -> Result<&[Vec<Complex<f64>>], ExecInvariantViolation> {
        self.spectra
            .iter()
            .find(|s| s.role == role)
            .map(|s| s.segments.as_slice())
            .ok_or(ExecInvariantViolation::UnknownRole { role })
    }

    /// Auto-spectral density of `role`.
    pub fn auto_spectrum(&self, role: SignalRole) -> Result<Vec<f64>, ExecInvariantViolation> {
        let segments = self.segments_of(role)?;
        let inv = 1.0 / segments.len() as f64;
        let out = self
            .density_scale
            .iter()
            .enumerate()
            .map(|(j, scale)| segments.iter().map(|seg| seg[j].norm_sqr()).sum::<f64>() * (scale * inv))
            .collect();
        Ok(out)
    }

    /// Cross-spectral density `conj(F_a) · F_b` of roles `a` and `b`.
    pub fn cross_spectrum(
        &self,
        a: SignalRole,
        b: SignalRole,
    ) -> Result<Vec<Complex<f64>>, ExecInvariantViolation> {
        let seg_a = self.segments_of(a)?;
        let seg_b = self.segments_of(b)?;
        let inv = 1.0 / seg_a.len() as f64;
        let out = self
            .density_scale
            .iter()
            .enumerate()
            .map(|(j, scale)| {
                let sum: Complex<f64> = seg_a
                    .iter()
                    .zip(seg_b.iter())
                    .map(|(fa, fb)| fa[j].conj() * fb[j])
                    .sum();
                sum * (scale * inv)
            })
            .collect();
        Ok(out)
    }

    /// Frequency vector and auto-spectral density of `role`.
    pub fn get_auto_spectrum(
        &self,
        role: SignalRole,
    ) -> Result<(Vec<f64>, Vec<f64>), ExecInvariantViolation> {
        Ok((self.freq.clone(), self.auto_spectrum(role)?))
    }

    /// Frequency vector and cross-spectral density of `a` and `b`.
    pub fn get_cross_spectrum(
        &self,
        a: SignalRole,
        b: SignalRole,
    ) -> Result<(Vec<f64>, Vec<Complex<f64>>), ExecInvariantViolation> {
        Ok((self.freq.clone(), self.cross_spectrum(a, b)?))
    }
}
