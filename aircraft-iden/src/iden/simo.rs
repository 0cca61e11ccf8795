//! Single-input multi-output frequency-response identification.
//!
//! A [FreqIdenKernel] validates the band and windowing once; each
//! [SimoRecord] it identifies is preprocessed onto a shared grid and turned
//! into a [FreqIdenSimo], which answers per-output frequency response,
//! coherence and assist-input correction queries.

use crate::iden::correction::{AssistCorrection, Correction};
use crate::iden::derive::{coherence, h_from_gxy_gxx};
use crate::iden::response::{save_rows, ExportError, FreqResponse};
use crate::kernel::{read_signal, ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D};
use crate::signal::composite::CompositeWindow;
use crate::signal::preprocess::{PreprocessConfig, PreprocessKernel};
use crate::signal::spectral::{MultiSignalSpectrum, SignalRole, SpectralTriple, SpectrumConfig};
use crate::signal::traits::SpectralEstimate;
use crate::signal::FrequencyBand;
use core::fmt;
use log::debug;
use rustfft::num_complex::Complex;
use std::path::Path;

/// Constructor config for [FreqIdenKernel].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreqIdenConfig {
    /// Analysed band in rad/s.
    pub band: FrequencyBand,
    /// Window count for a single-window estimate, `None` for composite.
    pub win_num: Option<usize>,
    /// Input is already uniformly sampled; skip resampling.
    pub uniform_input: bool,
}

impl FreqIdenConfig {
    /// Single-window estimate over `win_num` half-overlapping windows.
    pub fn single_window(band: FrequencyBand, win_num: usize) -> Self {
        Self {
            band,
            win_num: Some(win_num),
            uniform_input: false,
        }
    }

    /// Composite estimate over several window lengths.
    pub fn composite(band: FrequencyBand) -> Self {
        Self {
            band,
            win_num: None,
            uniform_input: false,
        }
    }
}

/// Borrowed time series of one SIMO experiment.
#[derive(Debug, Clone)]
pub struct SimoRecord<'a> {
    time: &'a [f64],
    input: &'a [f64],
    outputs: Vec<&'a [f64]>,
    assist: Option<&'a [f64]>,
}

impl<'a> SimoRecord<'a> {
    /// Bind the time stamps and the primary input.
    pub fn try_new<T, X>(time: &'a T, input: &'a X) -> Result<Self, ConfigError>
    where
        T: Read1D<f64> + ?Sized,
        X: Read1D<f64> + ?Sized,
    {
        Ok(Self {
            time: read_signal("time", time)?,
            input: read_signal("input", input)?,
            outputs: Vec::new(),
            assist: None,
        })
    }

    /// Append a measured output; outputs are indexed in insertion order.
    pub fn with_output<Y>(mut self, output: &'a Y) -> Result<Self, ConfigError>
    where
        Y: Read1D<f64> + ?Sized,
    {
        self.outputs.push(read_signal("output", output)?);
        Ok(self)
    }

    /// Attach a secondary excitation correlated with the primary input.
    pub fn with_assist<A>(mut self, assist: &'a A) -> Result<Self, ConfigError>
    where
        A: Read1D<f64> + ?Sized,
    {
        self.assist = Some(read_signal("assist", assist)?);
        Ok(self)
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }
}

/// Frequency response of one output.
#[derive(Debug, Clone, PartialEq)]
pub struct FreqIdenResult {
    /// Frequency vector in rad/s.
    pub freq: Vec<f64>,
    /// `Gxy / Gxx`.
    pub h: Vec<Complex<f64>>,
    /// Coherence γ².
    pub gamma2: Vec<f64>,
    /// Input auto-spectrum, corrected when an assist input is present.
    pub gxx: Vec<f64>,
    /// Cross-spectrum, corrected when an assist input is present.
    pub gxy: Vec<Complex<f64>>,
    /// Output auto-spectrum.
    pub gyy: Vec<f64>,
}

/// One windowing of every signal, with the assist correction applied to the
/// input and cross spectra when an assist input was recorded.
#[derive(Debug, Clone)]
pub struct SingleWindowEstimate {
    spectrum: MultiSignalSpectrum,
    outputs: usize,
}

impl SingleWindowEstimate {
    pub fn spectrum(&self) -> &MultiSignalSpectrum {
        &self.spectrum
    }

    fn assist(&self) -> Option<AssistCorrection<'_>> {
        AssistCorrection::new(&self.spectrum)
    }
}

impl SpectralEstimate for SingleWindowEstimate {
    fn channel_count(&self) -> usize {
        self.outputs
    }

    fn estimate(&self, channel: usize) -> Result<SpectralTriple, ExecInvariantViolation> {
        check_channel(channel, self.outputs)?;
        let output = SignalRole::Output(channel);
        let mut gxx = self.spectrum.auto_spectrum(SignalRole::PrimaryInput)?;
        let mut gxy = self.spectrum.cross_spectrum(SignalRole::PrimaryInput, output)?;
        let gyy = self.spectrum.auto_spectrum(output)?;
        if let Some(assist) = self.assist() {
            gxx = Correction::PerBin(assist.xx_norm()?).apply(&gxx);
            gxy = Correction::PerBin(assist.xy_norm(channel)?).apply(&gxy);
        }
        Ok(SpectralTriple {
            freq: self.spectrum.freq().to_vec(),
            gxx,
            gxy,
            gyy,
        })
    }
}

/// One composite window per output.
#[derive(Debug, Clone)]
pub struct CompositeEstimate {
    windows: Vec<CompositeWindow>,
}

impl CompositeEstimate {
    pub fn windows(&self) -> &[CompositeWindow] {
        &self.windows
    }
}

impl SpectralEstimate for CompositeEstimate {
    fn channel_count(&self) -> usize {
        self.windows.len()
    }

    fn estimate(&self, channel: usize) -> Result<SpectralTriple, ExecInvariantViolation> {
        check_channel(channel, self.windows.len())?;
        let w = &self.windows[channel];
        Ok(SpectralTriple {
            freq: w.freq.clone(),
            gxx: w.gxx.clone(),
            gxy: w.gxy.clone(),
            gyy: w.gyy.clone(),
        })
    }
}

/// How the spectral densities of a record were estimated.
#[derive(Debug, Clone)]
pub enum SpectralStrategy {
    SingleWindow(SingleWindowEstimate),
    Composite(CompositeEstimate),
}

impl SpectralEstimate for SpectralStrategy {
    fn channel_count(&self) -> usize {
        match self {
            SpectralStrategy::SingleWindow(s) => s.channel_count(),
            SpectralStrategy::Composite(c) => c.channel_count(),
        }
    }

    fn estimate(&self, channel: usize) -> Result<SpectralTriple, ExecInvariantViolation> {
        match self {
            SpectralStrategy::SingleWindow(s) => s.estimate(channel),
            SpectralStrategy::Composite(c) => c.estimate(channel),
        }
    }
}

impl fmt::Display for SpectralStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpectralStrategy::SingleWindow(s) => write!(
                f,
                "single window ({} x {} samples)",
                s.spectrum.window_count(),
                s.spectrum.segment_len()
            ),
            SpectralStrategy::Composite(_) => write!(f, "composite window"),
        }
    }
}

fn check_channel(index: usize, count: usize) -> Result<(), ExecInvariantViolation> {
    if index < count {
        Ok(())
    } else {
        Err(ExecInvariantViolation::ChannelOutOfRange { index, count })
    }
}

/// Validated identification kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreqIdenKernel {
    band: FrequencyBand,
    win_num: Option<usize>,
    preprocess: PreprocessKernel,
}

impl KernelLifecycle for FreqIdenKernel {
    type Config = FreqIdenConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.win_num == Some(0) {
            return Err(ConfigError::InvalidArgument {
                arg: "win_num",
                reason: "window count must be at least 1",
            });
        }
        let preprocess = PreprocessKernel::try_new(PreprocessConfig {
            resample: !config.uniform_input,
            detrend: true,
        })?;
        Ok(Self {
            band: config.band,
            win_num: config.win_num,
            preprocess,
        })
    }
}

impl FreqIdenKernel {
    /// Preprocess `record` and estimate the spectra of every output.
    ///
    /// # Errors
    /// * [ConfigError::EmptyInput] when the record has no output.
    /// * [ExecInvariantViolation::LengthMismatch] when a signal's length
    ///   differs from the time sequence.
    /// * [ExecInvariantViolation::InvalidState] for a time sequence that is
    ///   too short or not strictly increasing.
    /// * [ConfigError::InvalidArgument] when the windowing leaves no usable
    ///   segment or no bin inside the band.
    pub fn identify(&self, record: &SimoRecord<'_>) -> Result<FreqIdenSimo, ExecInvariantViolation> {
        if record.outputs.is_empty() {
            return Err(ConfigError::EmptyInput { arg: "outputs" }.into());
        }
        let trims: Vec<f64> = record.outputs.iter().map(|y| y[0]).collect();

        let mut signals = Vec::with_capacity(record.outputs.len() + 2);
        signals.push(record.input);
        signals.extend(record.outputs.iter().copied());
        if let Some(assist) = record.assist {
            signals.push(assist);
        }
        let processed = self.preprocess.run(record.time, &signals)?;
        let mut processed_signals = processed.signals.into_iter();
        let input = processed_signals.next().unwrap_or_default();
        let outputs: Vec<Vec<f64>> = processed_signals.by_ref().take(record.outputs.len()).collect();
        let assist = processed_signals.next();

        let time = processed.time;
        let time_len = time[time.len() - 1] - time[0];
        let sample_rate = time.len() as f64 / time_len;

        let strategy = match self.win_num {
            None => {
                let windows = outputs
                    .iter()
                    .map(|y| CompositeWindow::try_new(&input, y, sample_rate, self.band))
                    .collect::<Result<Vec<_>, _>>()?;
                SpectralStrategy::Composite(CompositeEstimate { windows })
            }
            Some(win_num) => {
                let mut tagged: Vec<(SignalRole, &[f64])> = outputs
                    .iter()
                    .enumerate()
                    .map(|(i, y)| (SignalRole::Output(i), y.as_slice()))
                    .collect();
                if let Some(assist) = &assist {
                    tagged.push((SignalRole::AssistInput, assist.as_slice()));
                }
                tagged.push((SignalRole::PrimaryInput, input.as_slice()));
                let config = SpectrumConfig {
                    sample_rate,
                    band: self.band,
                    win_num,
                };
                SpectralStrategy::SingleWindow(SingleWindowEstimate {
                    spectrum: MultiSignalSpectrum::try_new(config, &tagged)?,
                    outputs: outputs.len(),
                })
            }
        };
        debug!(
            "identified {} output(s): {} samples over {time_len:.3} s at {sample_rate:.1} Hz, {strategy}",
            outputs.len(),
            time.len()
        );

        Ok(FreqIdenSimo {
            time,
            input,
            outputs,
            assist,
            trims,
            sample_rate,
            time_len,
            band: self.band,
            strategy,
        })
    }
}

/// Identified SIMO record: processed signals plus spectral estimates.
#[derive(Debug, Clone)]
pub struct FreqIdenSimo {
    time: Vec<f64>,
    input: Vec<f64>,
    outputs: Vec<Vec<f64>>,
    assist: Option<Vec<f64>>,
    trims: Vec<f64>,
    sample_rate: f64,
    time_len: f64,
    band: FrequencyBand,
    strategy: SpectralStrategy,
}

impl FreqIdenSimo {
    /// Frequency response and coherence of output `y`.
    pub fn get_freq_iden(&self, y: usize) -> Result<FreqIdenResult, ExecInvariantViolation> {
        let SpectralTriple { freq, gxx, gxy, gyy } = self.strategy.estimate(y)?;
        let h = h_from_gxy_gxx(&gxy, &gxx);
        let gamma2 = coherence(&gxx, &gxy, &gyy);
        Ok(FreqIdenResult {
            freq,
            h,
            gamma2,
            gxx,
            gxy,
            gyy,
        })
    }

    /// Responses of the requested outputs, all outputs for `None`.
    ///
    /// The returned trims are those of the requested outputs only, in
    /// request order, so `trims[i]` belongs to `hs[i]`; they are not the
    /// full per-record trim list of [FreqIdenSimo::trims].
    pub fn get_freqres(&self, indexs: Option<&[usize]>) -> Result<FreqResponse, ExecInvariantViolation> {
        let all: Vec<usize> = (0..self.output_count()).collect();
        let indexs = indexs.unwrap_or(&all[..]);
        if indexs.is_empty() {
            return Err(ConfigError::EmptyInput { arg: "indexs" }.into());
        }
        let mut freq = Vec::new();
        let mut hs = Vec::with_capacity(indexs.len());
        let mut coherences = Vec::with_capacity(indexs.len());
        let mut trims = Vec::with_capacity(indexs.len());
        for &i in indexs {
            let result = self.get_freq_iden(i)?;
            freq = result.freq;
            hs.push(result.h);
            coherences.push(result.gamma2);
            trims.push(self.trims[i]);
        }
        Ok(FreqResponse::try_new(freq, hs, coherences, trims)?)
    }

    fn assist_correction(&self) -> Option<AssistCorrection<'_>> {
        match &self.strategy {
            SpectralStrategy::SingleWindow(s) => s.assist(),
            SpectralStrategy::Composite(_) => None,
        }
    }

    /// `|G_ab|² / (G_aa·G_bb)` of two recorded signals; identity without an
    /// assist input or in composite mode.
    pub fn get_cross_coherence(
        &self,
        a: SignalRole,
        b: SignalRole,
    ) -> Result<Correction<f64>, ExecInvariantViolation> {
        match self.assist_correction() {
            Some(assist) => Ok(Correction::PerBin(assist.cross_coherence(a, b)?)),
            None => Ok(Correction::Identity),
        }
    }

    /// Factor applied to Gxx.
    pub fn get_assit_xx_norm(&self) -> Result<Correction<f64>, ExecInvariantViolation> {
        match self.assist_correction() {
            Some(assist) => Ok(Correction::PerBin(assist.xx_norm()?)),
            None => Ok(Correction::Identity),
        }
    }

    /// `1 - γ²(assist, y)`.
    pub fn get_assit_yy_norm(&self, y: usize) -> Result<Correction<f64>, ExecInvariantViolation> {
        check_channel(y, self.output_count())?;
        match self.assist_correction() {
            Some(assist) => Ok(Correction::PerBin(assist.yy_norm(y)?)),
            None => Ok(Correction::Identity),
        }
    }

    /// Factor applied to Gxy of output `y`.
    pub fn get_assit_xy_norm(
        &self,
        y: usize,
    ) -> Result<Correction<Complex<f64>>, ExecInvariantViolation> {
        check_channel(y, self.output_count())?;
        match self.assist_correction() {
            Some(assist) => Ok(Correction::PerBin(assist.xy_norm(y)?)),
            None => Ok(Correction::Identity),
        }
    }

    /// Write `(freq, Re H, Im H)` of output `index` to `path`, without header.
    pub fn save_to_csv<P: AsRef<Path>>(&self, index: usize, path: P) -> Result<(), ExportError> {
        let result = self.get_freq_iden(index)?;
        save_rows(&result.freq, &result.h, path)
    }

    /// Sample rate of the processed grid in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Record duration in seconds.
    pub fn time_len(&self) -> f64 {
        self.time_len
    }

    /// First raw sample of every output.
    pub fn trims(&self) -> &[f64] {
        &self.trims
    }

    pub fn band(&self) -> FrequencyBand {
        self.band
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn has_assist_input(&self) -> bool {
        self.assist.is_some()
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.strategy, SpectralStrategy::Composite(_))
    }

    pub fn strategy(&self) -> &SpectralStrategy {
        &self.strategy
    }

    /// Processed time grid.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Processed primary input.
    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// Processed outputs.
    pub fn outputs(&self) -> &[Vec<f64>] {
        &self.outputs
    }

    /// Processed assist input.
    pub fn assist(&self) -> Option<&[f64]> {
        self.assist.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;

    fn band() -> FrequencyBand {
        FrequencyBand::try_new(2.0, 600.0).expect("band")
    }

    fn noise(n: usize) -> Vec<f64> {
        let mut rng = rand::rng();
        (0..n).map(|_| rng.random_range(-1.0..1.0)).collect()
    }

    fn time(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 * 0.01).collect()
    }

    #[test]
    fn zero_window_count_rejected() {
        let err = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band(), 0));
        assert!(matches!(
            err,
            Err(ConfigError::InvalidArgument { arg: "win_num", .. })
        ));
        assert!(FreqIdenKernel::try_new(FreqIdenConfig::composite(band())).is_ok());
    }

    #[test]
    fn record_needs_an_output() {
        let t = time(64);
        let x = noise(64);
        let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band(), 2)).expect("kernel");
        let record = SimoRecord::try_new(&t, &x).expect("record");
        assert_eq!(record.output_count(), 0);
        assert!(matches!(
            kernel.identify(&record),
            Err(ExecInvariantViolation::Config(ConfigError::EmptyInput { arg: "outputs" }))
        ));
    }

    #[test]
    fn shape_mismatch_reported() {
        let t = time(64);
        let x = noise(64);
        let y = noise(63);
        let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band(), 2)).expect("kernel");
        let record = SimoRecord::try_new(&t, &x)
            .and_then(|r| r.with_output(&y))
            .expect("record");
        assert_eq!(
            kernel.identify(&record).err(),
            Some(ExecInvariantViolation::LengthMismatch {
                arg: "signal",
                expected: 64,
                got: 63
            })
        );
    }

    #[test]
    fn trims_are_raw_first_samples() {
        let t = time(256);
        let x = noise(256);
        let y0: Vec<f64> = x.iter().map(|v| 10.0 + v).collect();
        let y1: Vec<f64> = x.iter().map(|v| -3.0 + 0.5 * v).collect();
        let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band(), 4)).expect("kernel");
        let record = SimoRecord::try_new(&t, &x)
            .and_then(|r| r.with_output(&y0))
            .and_then(|r| r.with_output(&y1))
            .expect("record");
        let simo = kernel.identify(&record).expect("identify");
        assert_eq!(simo.trims(), &[y0[0], y1[0]]);
        assert_eq!(simo.output_count(), 2);
        assert!(!simo.is_composite());
        assert!(!simo.has_assist_input());
        assert_relative_eq!(simo.time_len(), 2.55, epsilon = 1e-12);
        assert_relative_eq!(simo.sample_rate(), 256.0 / 2.55, epsilon = 1e-9);

        let subset = simo.get_freqres(Some(&[1][..])).expect("freqres");
        assert_eq!(subset.trims(), &[y1[0]]);
        assert_eq!(subset.channel_count(), 1);
        let all = simo.get_freqres(None).expect("freqres");
        assert_eq!(all.channel_count(), 2);
        assert_eq!(all.h(1), subset.h(0));
    }

    #[test]
    fn norms_are_identity_without_assist() {
        let t = time(512);
        let x = noise(512);
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v).collect();
        let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band(), 4)).expect("kernel");
        let record = SimoRecord::try_new(&t, &x)
            .and_then(|r| r.with_output(&y))
            .expect("record");
        let simo = kernel.identify(&record).expect("identify");
        assert!(simo.get_assit_xx_norm().expect("xx").is_identity());
        assert!(simo.get_assit_yy_norm(0).expect("yy").is_identity());
        assert!(simo.get_assit_xy_norm(0).expect("xy").is_identity());
        assert!(simo
            .get_cross_coherence(SignalRole::PrimaryInput, SignalRole::Output(0))
            .expect("coh")
            .is_identity());
        assert!(simo.get_assit_yy_norm(1).is_err());

        let config = SpectrumConfig {
            sample_rate: simo.sample_rate(),
            band: band(),
            win_num: 4,
        };
        let raw = MultiSignalSpectrum::try_new(
            config,
            &[
                (SignalRole::PrimaryInput, simo.input()),
                (SignalRole::Output(0), simo.outputs()[0].as_slice()),
            ],
        )
        .expect("spectrum");
        let result = simo.get_freq_iden(0).expect("iden");
        assert_eq!(result.gxx, raw.auto_spectrum(SignalRole::PrimaryInput).expect("gxx"));
        assert_eq!(
            result.gxy,
            raw.cross_spectrum(SignalRole::PrimaryInput, SignalRole::Output(0))
                .expect("gxy")
        );
    }

    #[test]
    fn assist_changes_input_spectrum() {
        let t = time(1024);
        let a = noise(1024);
        let e = noise(1024);
        let x: Vec<f64> = a.iter().zip(e.iter()).map(|(a, e)| a + e).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band(), 8)).expect("kernel");
        let record = SimoRecord::try_new(&t, &x)
            .and_then(|r| r.with_output(&y))
            .and_then(|r| r.with_assist(&a))
            .expect("record");
        let simo = kernel.identify(&record).expect("identify");
        assert!(simo.has_assist_input());
        let xx = simo.get_assit_xx_norm().expect("xx");
        let factors = xx.factors().expect("per-bin factors");
        assert_eq!(factors.len(), simo.get_freq_iden(0).expect("iden").freq.len());
        assert!(factors.iter().all(|f| *f >= -1e-12 && *f <= 1.0 + 1e-12));
        assert!(factors.iter().any(|f| *f < 0.99));
    }

    #[test]
    fn composite_ignores_assist() {
        let t = time(1024);
        let a = noise(1024);
        let x = noise(1024);
        let y: Vec<f64> = x.iter().map(|v| 0.5 * v).collect();
        let kernel = FreqIdenKernel::try_new(FreqIdenConfig::composite(band())).expect("kernel");
        let record = SimoRecord::try_new(&t, &x)
            .and_then(|r| r.with_output(&y))
            .and_then(|r| r.with_assist(&a))
            .expect("record");
        let simo = kernel.identify(&record).expect("identify");
        assert!(simo.is_composite());
        assert!(simo.get_assit_xx_norm().expect("xx").is_identity());
        assert!(simo.get_assit_xy_norm(0).expect("xy").is_identity());
        let result = simo.get_freq_iden(0).expect("iden");
        for h in &result.h {
            assert_relative_eq!(h.re, 0.5, max_relative = 1e-9);
            assert_relative_eq!(h.im, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn huge_window_count_is_rejected_not_panicking() {
        let t = time(256);
        let x = noise(256);
        let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band(), usize::MAX))
            .expect("kernel");
        let record = SimoRecord::try_new(&t, &x)
            .and_then(|r| r.with_output(&x))
            .expect("record");
        assert!(matches!(
            kernel.identify(&record),
            Err(ExecInvariantViolation::Config(ConfigError::InvalidArgument { arg: "win_num", .. }))
        ));
    }

    #[test]
    fn channel_out_of_range() {
        let t = time(128);
        let x = noise(128);
        let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band(), 2)).expect("kernel");
        let record = SimoRecord::try_new(&t, &x)
            .and_then(|r| r.with_output(&x))
            .expect("record");
        let simo = kernel.identify(&record).expect("identify");
        assert_eq!(
            simo.get_freq_iden(1).err(),
            Some(ExecInvariantViolation::ChannelOutOfRange { index: 1, count: 1 })
        );
        assert!(simo.get_freqres(Some(&[0, 4][..])).is_err());
        assert!(simo.get_freqres(Some(&[][..])).is_err());
    }
}
