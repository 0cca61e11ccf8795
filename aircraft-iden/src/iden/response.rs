//! Packaged multi-output frequency responses and their CSV export.

use crate::iden::derive::amp_pha_from_h;
use crate::kernel::{ConfigError, ExecInvariantViolation};
use rustfft::num_complex::Complex;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Slack allowed above γ² = 1 before a bin counts as unhealthy.
const COHERENCE_SLACK: f64 = 1e-9;

/// Errors raised while exporting a response.
#[derive(Debug)]
pub enum ExportError {
    /// Underlying filesystem I/O failure.
    Io(std::io::Error),
    /// CSV encoding failure.
    Csv(csv::Error),
    /// Requested channel does not exist.
    ChannelOutOfRange {
        /// Requested channel.
        index: usize,
        /// Number of available channels.
        count: usize,
    },
    /// The response could not be identified.
    Identify(ExecInvariantViolation),
}

impl core::fmt::Display for ExportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExportError::Io(err) => write!(f, "export I/O failure: {err}"),
            ExportError::Csv(err) => write!(f, "CSV encoding failure: {err}"),
            ExportError::ChannelOutOfRange { index, count } => {
                write!(f, "cannot export channel {index}, only {count} available")
            }
            ExportError::Identify(err) => write!(f, "identification failed: {err}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(err) => Some(err),
            ExportError::Csv(err) => Some(err),
            ExportError::Identify(err) => Some(err),
            ExportError::ChannelOutOfRange { .. } => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        ExportError::Io(value)
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        ExportError::Csv(value)
    }
}

impl From<ExecInvariantViolation> for ExportError {
    fn from(value: ExecInvariantViolation) -> Self {
        match value {
            ExecInvariantViolation::ChannelOutOfRange { index, count } => {
                ExportError::ChannelOutOfRange { index, count }
            }
            other => ExportError::Identify(other),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponseRow {
    freq: f64,
    re: f64,
    im: f64,
}

/// Write `(freq, Re H, Im H)` rows, comma delimited, without a header.
pub(crate) fn write_rows<W: Write>(
    freq: &[f64],
    h: &[Complex<f64>],
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for (freq, h) in freq.iter().zip(h.iter()) {
        wtr.serialize(ResponseRow {
            freq: *freq,
            re: h.re,
            im: h.im,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub(crate) fn save_rows<P: AsRef<Path>>(
    freq: &[f64],
    h: &[Complex<f64>],
    path: P,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_rows(freq, h, BufWriter::new(file))
}

/// Numeric degeneracies found in one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumericHealth {
    /// Bins where H is `NaN` or infinite.
    pub non_finite_h: usize,
    /// Bins where γ² is `NaN` or outside `[0, 1]`.
    pub coherence_out_of_range: usize,
}

impl NumericHealth {
    /// No degenerate bin.
    pub fn is_clean(&self) -> bool {
        self.non_finite_h == 0 && self.coherence_out_of_range == 0
    }
}

/// Frequency responses and coherences of several outputs on one frequency
/// vector, together with each output's trim value.
#[derive(Debug, Clone, PartialEq)]
pub struct FreqResponse {
    freq: Vec<f64>,
    hs: Vec<Vec<Complex<f64>>>,
    coherences: Vec<Vec<f64>>,
    trims: Vec<f64>,
}

impl FreqResponse {
    /// Bundle per-channel responses.
    ///
    /// # Errors
    /// [ConfigError::LengthMismatch] when the channel counts of `hs`,
    /// `coherences` and `trims` differ, or a channel's length differs from
    /// `freq`.
    pub fn try_new(
        freq: Vec<f64>,
        hs: Vec<Vec<Complex<f64>>>,
        coherences: Vec<Vec<f64>>,
        trims: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        let count = hs.len();
        for (arg, got) in [("coherences", coherences.len()), ("trims", trims.len())] {
            if got != count {
                return Err(ConfigError::LengthMismatch {
                    arg,
                    expected: count,
                    got,
                });
            }
        }
        let h_lens = hs.iter().map(|h| ("hs", h.len()));
        let c_lens = coherences.iter().map(|c| ("coherences", c.len()));
        if let Some((arg, got)) = h_lens.chain(c_lens).find(|(_, len)| *len != freq.len()) {
            return Err(ConfigError::LengthMismatch {
                arg,
                expected: freq.len(),
                got,
            });
        }
        Ok(Self {
            freq,
            hs,
            coherences,
            trims,
        })
    }

    /// Number of frequency bins.
    pub fn len(&self) -> usize {
        self.freq.len()
    }

    /// Whether there are no frequency bins.
    pub fn is_empty(&self) -> bool {
        self.freq.is_empty()
    }

    /// Number of output channels.
    pub fn channel_count(&self) -> usize {
        self.hs.len()
    }

    /// Frequency vector in rad/s.
    pub fn freq(&self) -> &[f64] {
        &self.freq
    }

    pub fn hs(&self) -> &[Vec<Complex<f64>>] {
        &self.hs
    }

    pub fn coherences(&self) -> &[Vec<f64>] {
        &self.coherences
    }

    pub fn trims(&self) -> &[f64] {
        &self.trims
    }

    /// Frequency response of channel `i`.
    pub fn h(&self, i: usize) -> Option<&[Complex<f64>]> {
        self.hs.get(i).map(Vec::as_slice)
    }

    /// Coherence γ² of channel `i`.
    pub fn coherence(&self, i: usize) -> Option<&[f64]> {
        self.coherences.get(i).map(Vec::as_slice)
    }

    /// First raw sample of output `i`.
    pub fn trim(&self, i: usize) -> Option<f64> {
        self.trims.get(i).copied()
    }

    fn check_channel(&self, i: usize) -> Result<(), ExecInvariantViolation> {
        if i < self.channel_count() {
            Ok(())
        } else {
            Err(ExecInvariantViolation::ChannelOutOfRange {
                index: i,
                count: self.channel_count(),
            })
        }
    }

    /// Amplitude (dB) and unwrapped phase (deg) of channel `i`.
    pub fn amp_phase(&self, i: usize) -> Result<(Vec<f64>, Vec<f64>), ExecInvariantViolation> {
        self.check_channel(i)?;
        Ok(amp_pha_from_h(&self.hs[i]))
    }

    /// Count degenerate bins of channel `i`.
    pub fn numeric_health(&self, i: usize) -> Result<NumericHealth, ExecInvariantViolation> {
        self.check_channel(i)?;
        let non_finite_h = self.hs[i]
            .iter()
            .filter(|h| !(h.re.is_finite() && h.im.is_finite()))
            .count();
        let coherence_out_of_range = self.coherences[i]
            .iter()
            .filter(|c| !(0.0..=1.0 + COHERENCE_SLACK).contains(*c))
            .count();
        Ok(NumericHealth {
            non_finite_h,
            coherence_out_of_range,
        })
    }

    /// Write channel `i` as `freq,re,im` rows.
    pub fn write_csv<W: Write>(&self, i: usize, writer: W) -> Result<(), ExportError> {
        self.check_channel(i)?;
        write_rows(&self.freq, &self.hs[i], writer)
    }

    /// Write channel `i` as `freq,re,im` rows to a file at `path`.
    pub fn save_to_csv<P: AsRef<Path>>(&self, i: usize, path: P) -> Result<(), ExportError> {
        self.check_channel(i)?;
        save_rows(&self.freq, &self.hs[i], path)
    }
}
