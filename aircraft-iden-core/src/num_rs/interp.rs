use crate::{Error, Result};
use num_traits::Float;

fn cast<F: Float>(n: usize) -> F {
    F::from(n).unwrap_or_else(F::nan)
}

/// Arithmetic mean of `x`, numpy's `np.average` without weights.
///
/// # Errors
/// [Error::InvalidArg] when `x` is empty.
///
/// # Examples
/// ```
/// use aircraft_iden_core::num_rs::average;
///
/// assert_eq!(average(&[1.0f64, 2.0, 3.0, 6.0]).unwrap(), 3.0);
/// assert!(average::<f64>(&[]).is_err());
/// ```
pub fn average<F: Float>(x: &[F]) -> Result<F> {
    if x.is_empty() {
        return Err(Error::InvalidArg {
            arg: "x".to_string(),
            reason: "cannot average an empty sequence".to_string(),
        });
    }
    let sum = x.iter().fold(F::zero(), |acc, v| acc + *v);
    Ok(sum / cast(x.len()))
}

/// `num` evenly spaced samples over `[start, stop]`, endpoint included.
///
/// Matches `np.linspace(start, stop, num=num, endpoint=True)`: the first
/// sample is exactly `start` and the last exactly `stop`.
///
/// # Examples
/// ```
/// use aircraft_iden_core::num_rs::linspace;
///
/// assert_eq!(linspace(0.0f64, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(2.0f64, 3.0, 1), vec![2.0]);
/// assert!(linspace(0.0f64, 1.0, 0).is_empty());
/// ```
pub fn linspace<F: Float>(start: F, stop: F, num: usize) -> Vec<F> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / cast(num - 1);
            let mut out: Vec<F> = (0..num).map(|i| start + step * cast(i)).collect();
            out[num - 1] = stop;
            out
        }
    }
}

/// One-dimensional piecewise-linear interpolation, `np.interp(x, xp, fp)`.
///
/// Points left of `xp[0]` take `fp[0]`, points right of the last sample
/// take the last `fp`. `NaN` queries produce `NaN`.
///
/// # Errors
/// * [Error::InvalidArg] when `xp` is empty or not strictly increasing.
/// * [Error::ConflictArg] when `xp` and `fp` lengths differ.
///
/// # Examples
/// ```
/// use aircraft_iden_core::num_rs::interp;
///
/// let xp = [0.0f64, 1.0, 3.0];
/// let fp = [0.0f64, 2.0, 6.0];
/// let y = interp(&[-1.0, 0.5, 2.0, 4.0], &xp, &fp).unwrap();
/// assert_eq!(y, vec![0.0, 1.0, 4.0, 6.0]);
/// ```
pub fn interp<F: Float>(x: &[F], xp: &[F], fp: &[F]) -> Result<Vec<F>> {
    if xp.is_empty() {
        return Err(Error::InvalidArg {
            arg: "xp".to_string(),
            reason: "sample coordinates must be non-empty".to_string(),
        });
    }
    if xp.len() != fp.len() {
        return Err(Error::ConflictArg {
            reason: format!(
                "xp has {} samples but fp has {}",
                xp.len(),
                fp.len()
            ),
        });
    }
    if xp.windows(2).any(|w| !(w[0] < w[1])) {
        return Err(Error::InvalidArg {
            arg: "xp".to_string(),
            reason: "sample coordinates must be strictly increasing".to_string(),
        });
    }

    let last = xp.len() - 1;
    let out = x
        .iter()
        .map(|&xi| {
            if xi.is_nan() {
                return F::nan();
            }
            let hi = xp.partition_point(|&v| v <= xi);
            if hi == 0 {
                fp[0]
            } else if hi > last {
                fp[last]
            } else {
                let lo = hi - 1;
                let t = (xi - xp[lo]) / (xp[hi] - xp[lo]);
                fp[lo] + t * (fp[hi] - fp[lo])
            }
        })
        .collect();
    Ok(out)
}
