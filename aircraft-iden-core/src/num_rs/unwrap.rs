use num_traits::{Float, FloatConst};

/// Remove the `2π` discontinuities of a phase sequence in radians.
///
/// Same semantics as `np.unwrap(p)`: whenever two consecutive samples jump
/// by more than `π`, every following sample is shifted by the multiple of
/// `2π` that brings the jump back into `[-π, π]`.
///
/// # Examples
/// ```
/// use aircraft_iden_core::num_rs::unwrap;
/// use approx::assert_relative_eq;
/// use core::f64::consts::PI;
///
/// let wrapped = [0.9 * PI, -0.9 * PI, -0.7 * PI];
/// let y = unwrap(&wrapped);
/// assert_relative_eq!(y[1], 1.1 * PI, epsilon = 1e-12);
/// assert_relative_eq!(y[2], 1.3 * PI, epsilon = 1e-12);
/// ```
pub fn unwrap<F: Float + FloatConst>(p: &[F]) -> Vec<F> {
    unwrap_period(p, F::TAU())
}

/// [unwrap] for an arbitrary period, e.g. `360` for phase in degrees.
///
/// The discontinuity threshold is half the period.
pub fn unwrap_period<F: Float>(p: &[F], period: F) -> Vec<F> {
    let Some(&first) = p.first() else {
        return Vec::new();
    };
    let two = F::one() + F::one();
    let high = period / two;
    let low = -high;

    let mut out = Vec::with_capacity(p.len());
    out.push(first);
    let mut correction = F::zero();
    for w in p.windows(2) {
        let dd = w[1] - w[0];
        let mut ddmod = floor_mod(dd - low, period) + low;
        if ddmod == low && dd > F::zero() {
            ddmod = high;
        }
        if dd.abs() >= high {
            correction = correction + (ddmod - dd);
        }
        out.push(w[1] + correction);
    }
    out
}

/// Remainder with the sign of the divisor, numpy's `np.mod`.
fn floor_mod<F: Float>(a: F, m: F) -> F {
    let r = a % m;
    if r < F::zero() {
        r + m
    } else {
        r
    }
}
