//! Finite difference helpers shared by the derivative based methods.
//!
//! Derivatives are approximated numerically from evaluations of the function on either side
//! of a point, there is no symbolic differentiation.

/// The fixed step used for all finite differences.
pub const STEP: f64 = 0.01;

/// Classify which side of zero `x` lies on: `-1`, `0`, or `+1`.
///
/// `NaN` is propagated.
pub fn sign(x: f64) -> f64 {
    if x.is_nan() {
        x
    } else if x == 0.0 {
        0.0
    } else {
        1f64.copysign(x)
    }
}

/// Returns `true` if `a` carries the same sign bit as `b`.
pub fn sign_matches(a: f64, b: f64) -> bool {
    a.copysign(b) == a
}

/// Central difference approximation of `f'(x)`.
pub fn derivative<F>(f: &F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + STEP) - f(x - STEP)) / (2. * STEP)
}

/// The unscaled second difference `f(x+h) - 2f(x) + f(x-h)`.
pub fn second_difference<F>(f: &F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    f(x + STEP) - 2. * f(x) + f(x - STEP)
}

/// The second difference divided by `2h`.
///
/// Note this is _not_ the textbook `h²` scaling. The chord method's anchor selection and
/// Halley's correction are both calibrated against this value, so it must stay as is.
pub fn second_derivative<F>(f: &F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    second_difference(f, x) / (2. * STEP)
}
