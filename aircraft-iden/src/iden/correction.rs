//! Partial-coherence correction for a second, correlated excitation.
//!
//! When an assist input `a` is recorded alongside the primary input `x`,
//! the share of `x` explained by `a` is removed from the input
//! auto-spectrum and the cross-spectrum before the frequency response is
//! formed.
//!
//! Bins where a denominator vanishes are not floored: the factors become
//! `Inf`/`NaN` and carry that into H and γ².

use crate::iden::derive::coherence;
use crate::kernel::ExecInvariantViolation;
use crate::signal::{MultiSignalSpectrum, SignalRole};
use core::ops::Mul;
use itertools::izip;
use rustfft::num_complex::Complex;

/// Multiplicative correction of a spectral density.
#[derive(Debug, Clone, PartialEq)]
pub enum Correction<T> {
    /// Scalar `1`: the spectrum is used as is.
    Identity,
    /// One factor per frequency bin.
    PerBin(Vec<T>),
}

impl<T: Copy> Correction<T> {
    /// Whether this is the scalar identity.
    pub fn is_identity(&self) -> bool {
        matches!(self, Correction::Identity)
    }

    /// Per-bin factors, `None` for the identity.
    pub fn factors(&self) -> Option<&[T]> {
        match self {
            Correction::Identity => None,
            Correction::PerBin(v) => Some(v),
        }
    }

    /// Multiply `spectrum` bin by bin.
    ///
    /// The identity returns an exact copy of `spectrum`.
    pub fn apply<S>(&self, spectrum: &[S]) -> Vec<S>
    where
        S: Copy + Mul<T, Output = S>,
    {
        match self {
            Correction::Identity => spectrum.to_vec(),
            Correction::PerBin(factors) => spectrum
                .iter()
                .zip(factors.iter())
                .map(|(s, f)| *s * *f)
                .collect(),
        }
    }
}

/// `1 - γ²` from two auto-spectra and their cross-spectrum.
pub fn residual_from(gii: &[f64], gij: &[Complex<f64>], gjj: &[f64]) -> Vec<f64> {
    coherence(gii, gij, gjj).into_iter().map(|c| 1.0 - c).collect()
}

/// `1 - (Gxa·Gay) / (Gaa·Gxy)`.
pub fn xy_norm_from(
    gxa: &[Complex<f64>],
    gay: &[Complex<f64>],
    gaa: &[f64],
    gxy: &[Complex<f64>],
) -> Vec<Complex<f64>> {
    izip!(gxa, gay, gaa, gxy)
        .map(|(xa, ay, aa, xy)| Complex::new(1.0, 0.0) - (*xa * *ay) / (*xy * *aa))
        .collect()
}

/// Correction factors drawn from a spectrum holding the primary and the
/// assist input.
#[derive(Debug, Clone, Copy)]
pub struct AssistCorrection<'a> {
    spectrum: &'a MultiSignalSpectrum,
}

impl<'a> AssistCorrection<'a> {
    /// `None` when `spectrum` has no assist input.
    pub fn new(spectrum: &'a MultiSignalSpectrum) -> Option<Self> {
        spectrum
            .has_role(SignalRole::AssistInput)
            .then_some(Self { spectrum })
    }

    /// `|G_ab|² / (G_aa·G_bb)`.
    pub fn cross_coherence(
        &self,
        a: SignalRole,
        b: SignalRole,
    ) -> Result<Vec<f64>, ExecInvariantViolation> {
        let gaa = self.spectrum.auto_spectrum(a)?;
        let gbb = self.spectrum.auto_spectrum(b)?;
        let gab = self.spectrum.cross_spectrum(a, b)?;
        Ok(coherence(&gaa, &gab, &gbb))
    }

    fn residual(&self, a: SignalRole, b: SignalRole) -> Result<Vec<f64>, ExecInvariantViolation> {
        let gaa = self.spectrum.auto_spectrum(a)?;
        let gbb = self.spectrum.auto_spectrum(b)?;
        let gab = self.spectrum.cross_spectrum(a, b)?;
        Ok(residual_from(&gaa, &gab, &gbb))
    }

    /// `1 - γ²(x, a)`, applied to Gxx.
    pub fn xx_norm(&self) -> Result<Vec<f64>, ExecInvariantViolation> {
        self.residual(SignalRole::PrimaryInput, SignalRole::AssistInput)
    }

    /// `1 - γ²(a, y)` for output `y`. Reported only; Gyy is left as is.
    pub fn yy_norm(&self, y: usize) -> Result<Vec<f64>, ExecInvariantViolation> {
        self.residual(SignalRole::AssistInput, SignalRole::Output(y))
    }

    /// Factor applied to Gxy of output `y`.
    pub fn xy_norm(&self, y: usize) -> Result<Vec<Complex<f64>>, ExecInvariantViolation> {
        let (x, a, out) = (
            SignalRole::PrimaryInput,
            SignalRole::AssistInput,
            SignalRole::Output(y),
        );
        let gaa = self.spectrum.auto_spectrum(a)?;
        let gxa = self.spectrum.cross_spectrum(x, a)?;
        let gay = self.spectrum.cross_spectrum(a, out)?;
        let gxy = self.spectrum.cross_spectrum(x, out)?;
        Ok(xy_norm_from(&gxa, &gay, &gaa, &gxy))
    }
}
