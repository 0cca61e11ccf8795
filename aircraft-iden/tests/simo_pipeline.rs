use aircraft_iden::iden::derive::amp_pha_from_h;
use aircraft_iden::iden::{ExportError, FreqIdenConfig, FreqIdenKernel, SimoRecord};
use aircraft_iden::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle};
use aircraft_iden::signal::{FrequencyBand, SignalRole};
use approx::assert_relative_eq;
use ndarray::Array1;
use rand::Rng;
use std::f64::consts::PI;

fn noise(n: usize) -> Vec<f64> {
    let mut rng = rand::rng();
    (0..n).map(|_| rng.random_range(-1.0..1.0)).collect()
}

fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold((0, f64::MIN), |(bi, bv), (i, x)| if *x > bv { (i, *x) } else { (bi, bv) })
        .0
}

#[test]
fn sine_gain_and_lag_recovered() {
    let n = 1024;
    let fs = 1000.0;
    let omega = 2.0 * PI * 50.0;
    let t: Vec<f64> = (0..n).map(|i| i as f64 / fs).collect();
    let x: Vec<f64> = t.iter().map(|t| (omega * t).sin()).collect();
    let y: Vec<f64> = t.iter().map(|t| 2.0 * (omega * t - PI / 4.0).sin()).collect();

    let band = FrequencyBand::try_new(10.0, 2000.0).expect("band");
    let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band, 4)).expect("kernel");
    let record = SimoRecord::try_new(&t, &x)
        .and_then(|r| r.with_output(&y))
        .expect("record");
    let simo = kernel.identify(&record).expect("identify");
    assert_relative_eq!(simo.sample_rate(), 1024.0 / 1.023, max_relative = 1e-12);

    let result = simo.get_freq_iden(0).expect("response");
    let peak = argmax(&result.gxx);
    assert_relative_eq!(result.freq[peak], omega, max_relative = 0.05);

    let (amp, _) = amp_pha_from_h(&result.h);
    let gain = 10f64.powf(amp[peak] / 20.0);
    assert_relative_eq!(gain, 2.0, max_relative = 0.05);
    // Unwrapping may add whole turns below the tone; compare the wrapped angle.
    assert_relative_eq!(result.h[peak].arg().to_degrees(), -45.0, max_relative = 0.05);
    assert!(result.gamma2[peak] > 0.95);

    let response = simo.get_freqres(None).expect("freqres");
    let health = response.numeric_health(0).expect("channel");
    assert_eq!(health.non_finite_h, 0);
}

#[test]
fn assist_correction_isolates_primary_path() {
    let n = 4096;
    let t: Vec<f64> = (0..n).map(|i| i as f64 * 0.01).collect();
    let a = noise(n);
    let e = noise(n);
    let x: Vec<f64> = a.iter().zip(e.iter()).map(|(a, e)| a + e).collect();
    // The output also responds to the assist excitation directly.
    let y: Vec<f64> = x.iter().zip(a.iter()).map(|(x, a)| 2.0 * x + 3.0 * a).collect();

    let band = FrequencyBand::try_new(1.0, 300.0).expect("band");
    let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band, 16)).expect("kernel");

    let with_assist = SimoRecord::try_new(&t, &x)
        .and_then(|r| r.with_output(&y))
        .and_then(|r| r.with_assist(&a))
        .expect("record");
    let corrected = kernel
        .identify(&with_assist)
        .and_then(|s| s.get_freq_iden(0))
        .expect("corrected response");
    for h in &corrected.h {
        assert_relative_eq!(h.re, 2.0, max_relative = 1e-6);
        assert!(h.im.abs() < 1e-6);
    }

    let without = SimoRecord::try_new(&t, &x)
        .and_then(|r| r.with_output(&y))
        .expect("record");
    let raw = kernel
        .identify(&without)
        .and_then(|s| s.get_freq_iden(0))
        .expect("raw response");
    let bias = raw
        .h
        .iter()
        .map(|h| (h.re - 2.0).abs())
        .fold(0.0f64, f64::max);
    assert!(bias > 0.5);
}

#[test]
fn assist_cross_coherence_reported() {
    let n = 2048;
    let t: Vec<f64> = (0..n).map(|i| i as f64 * 0.01).collect();
    let a = noise(n);
    let x: Vec<f64> = a.iter().zip(noise(n)).map(|(a, e)| a + 0.1 * e).collect();
    let y = noise(n);

    let band = FrequencyBand::try_new(1.0, 300.0).expect("band");
    let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band, 8)).expect("kernel");
    let record = SimoRecord::try_new(&t, &x)
        .and_then(|r| r.with_output(&y))
        .and_then(|r| r.with_assist(&a))
        .expect("record");
    let simo = kernel.identify(&record).expect("identify");
    let coh = simo
        .get_cross_coherence(SignalRole::PrimaryInput, SignalRole::AssistInput)
        .expect("coherence");
    let coh = coh.factors().expect("per-bin");
    let mean = coh.iter().sum::<f64>() / coh.len() as f64;
    assert!(mean > 0.9);

    let xx = simo.get_assit_xx_norm().expect("xx norm");
    for (c, norm) in coh.iter().zip(xx.factors().expect("per-bin")) {
        assert_relative_eq!(*norm, 1.0 - c, epsilon = 1e-12);
    }
    assert_eq!(
        simo.get_assit_yy_norm(0).expect("yy").factors().map(|f| f.len()),
        Some(coh.len())
    );
}

#[test]
fn composite_shares_frequency_vector() {
    let n = 2048;
    let t: Vec<f64> = (0..n).map(|i| i as f64 * 0.005).collect();
    let x = noise(n);
    let y0: Vec<f64> = x.iter().map(|v| 0.5 * v).collect();
    let y1: Vec<f64> = x.iter().zip(noise(n)).map(|(v, e)| -v + 0.2 * e).collect();

    let band = FrequencyBand::try_new(2.0, 600.0).expect("band");
    let kernel = FreqIdenKernel::try_new(FreqIdenConfig::composite(band)).expect("kernel");
    let x_arr = Array1::from(x.clone());
    let record = SimoRecord::try_new(&t, &x_arr)
        .and_then(|r| r.with_output(&y0))
        .and_then(|r| r.with_output(&y1))
        .expect("record");
    let simo = kernel.identify(&record).expect("identify");
    assert!(simo.is_composite());

    let r0 = simo.get_freq_iden(0).expect("channel 0");
    let r1 = simo.get_freq_iden(1).expect("channel 1");
    assert_eq!(r0.freq, r1.freq);
    assert!(r0.freq.windows(2).all(|w| w[0] < w[1]));
    for h in &r0.h {
        assert_relative_eq!(h.re, 0.5, max_relative = 1e-9);
    }

    let response = simo.get_freqres(None).expect("freqres");
    assert_eq!(response.freq(), r0.freq.as_slice());
    assert_eq!(response.trims(), &[y0[0], y1[0]]);
}

#[test]
fn csv_export_round_trip() {
    let n = 1024;
    let t: Vec<f64> = (0..n).map(|i| i as f64 * 0.01).collect();
    let x = noise(n);
    let y: Vec<f64> = x.iter().map(|v| -4.0 * v).collect();
    let band = FrequencyBand::try_new(1.0, 300.0).expect("band");
    let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band, 4)).expect("kernel");
    let record = SimoRecord::try_new(&t, &x)
        .and_then(|r| r.with_output(&y))
        .expect("record");
    let simo = kernel.identify(&record).expect("identify");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("h.csv");
    simo.save_to_csv(0, &path).expect("export");

    let result = simo.get_freq_iden(0).expect("response");
    let text = std::fs::read_to_string(&path).expect("read back");
    let rows: Vec<Vec<f64>> = text
        .lines()
        .map(|l| l.split(',').map(|v| v.parse().expect("float")).collect())
        .collect();
    assert_eq!(rows.len(), result.freq.len());
    for (row, (f, h)) in rows.iter().zip(result.freq.iter().zip(result.h.iter())) {
        assert_eq!(row.len(), 3);
        assert_eq!(row[0], *f);
        assert_eq!(row[1], h.re);
        assert_eq!(row[2], h.im);
    }

    let err = simo.save_to_csv(1, dir.path().join("missing.csv"));
    assert!(matches!(
        err,
        Err(ExportError::ChannelOutOfRange { index: 1, count: 1 })
    ));
}

#[test]
fn invalid_inputs_rejected() {
    assert!(matches!(
        FrequencyBand::try_new(10.0, 5.0),
        Err(ConfigError::InvalidBand { .. })
    ));
    assert!(matches!(
        FrequencyBand::try_new(0.0, 5.0),
        Err(ConfigError::InvalidBand { .. })
    ));

    let band = FrequencyBand::try_new(1.0, 300.0).expect("band");
    assert!(FreqIdenKernel::try_new(FreqIdenConfig::single_window(band, 0)).is_err());

    let t: Vec<f64> = (0..32).map(|i| i as f64 * 0.01).collect();
    let mut x = noise(32);
    let y = noise(32);
    let kernel = FreqIdenKernel::try_new(FreqIdenConfig::single_window(band, 32)).expect("kernel");
    let record = SimoRecord::try_new(&t, &x)
        .and_then(|r| r.with_output(&y))
        .expect("record");
    assert!(matches!(
        kernel.identify(&record),
        Err(ExecInvariantViolation::Config(ConfigError::InvalidArgument { arg: "win_num", .. }))
    ));

    x[5] = f64::NAN;
    assert_eq!(
        SimoRecord::try_new(&t, &x).err(),
        Some(ConfigError::NonFinite { arg: "input", index: 5 })
    );
    let empty: Vec<f64> = Vec::new();
    assert!(matches!(
        SimoRecord::try_new(&t, &y).and_then(|r| r.with_output(&empty)),
        Err(ConfigError::EmptyInput { arg: "output" })
    ));
}
