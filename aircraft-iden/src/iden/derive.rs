//! Frequency response, Bode quantities and coherence from spectral densities.
//!
//! No guard against zero denominators: empty bins come out as `Inf`/`NaN`.

use aircraft_iden_core::num_rs::unwrap;
use core::f64::consts::PI;
use rustfft::num_complex::Complex;

/// H1 estimate `Gxy / Gxx`.
pub fn h_from_gxy_gxx(gxy: &[Complex<f64>], gxx: &[f64]) -> Vec<Complex<f64>> {
    gxy.iter().zip(gxx.iter()).map(|(xy, xx)| *xy / *xx).collect()
}

/// H2 estimate `Gyy / Gxy`.
pub fn h_from_gyy_gxy(gyy: &[f64], gxy: &[Complex<f64>]) -> Vec<Complex<f64>> {
    gyy.iter()
        .zip(gxy.iter())
        .map(|(yy, xy)| Complex::new(*yy, 0.0) / *xy)
        .collect()
}

/// Amplitude in dB and unwrapped phase in degrees.
pub fn amp_pha_from_h(h: &[Complex<f64>]) -> (Vec<f64>, Vec<f64>) {
    let amp = h.iter().map(|c| 20.0 * c.norm().log10()).collect();
    let wrapped: Vec<f64> = h.iter().map(|c| c.im.atan2(c.re)).collect();
    let pha = unwrap(&wrapped).into_iter().map(|p| p * 180.0 / PI).collect();
    (amp, pha)
}

/// Coherence `|Gxy|² / (|Gxx|·|Gyy|)`.
pub fn coherence(gxx: &[f64], gxy: &[Complex<f64>], gyy: &[f64]) -> Vec<f64> {
    gxx.iter()
        .zip(gxy.iter())
        .zip(gyy.iter())
        .map(|((xx, xy), yy)| xy.norm_sqr() / (xx.abs() * yy.abs()))
        .collect()
}
