use super::*;

/// Finds a root by repeatedly halving the bracket `[x1, x2]`.
///
/// The bracket length halves every step, so a bracket of length `L` converges in
/// `ceil(log2(L / precision))` steps.
///
/// # Example
/// ```rust
/// use rootme::solve::{bisection, Params};
///
/// let params = Params { precision: 1e-8, max_steps: 100 };
/// let root = bisection(&|x: f64| x * x - 2.0, 1.0, 2.0, &params, |_| ()).unwrap();
/// assert!((root - 2f64.sqrt()).abs() < 1e-8);
/// ```
///
/// # Errors
/// - [`Failure::NoSignChange`] if `f` has the same sign at both endpoints,
/// - [`Failure::NonFinite`] if `f` is `NaN` at an endpoint or midpoint,
/// - [`Failure::BudgetExhausted`] if the bracket is still too wide after the budget.
pub fn bisection<F, R>(
    f: &F,
    x1: f64,
    x2: f64,
    params: &Params,
    mut report: R,
) -> Result<f64, Failure>
where
    F: Fn(f64) -> f64,
    R: FnMut(Step),
{
    let s1 = sign(f(x1));
    let s2 = sign(f(x2));

    if s1 == 0. {
        return Ok(x1);
    }
    if s2 == 0. {
        return Ok(x2);
    }
    if s1.is_nan() {
        return Err(Failure::NonFinite { step: 0, x: x1 });
    }
    if s2.is_nan() {
        return Err(Failure::NonFinite { step: 0, x: x2 });
    }
    #[allow(clippy::float_cmp)]
    if s1 == s2 {
        return Err(Failure::NoSignChange { a: x1, b: x2 });
    }

    // keep `pos` on the positive side
    let (mut pos, mut neg) = if s1 > 0. { (x1, x2) } else { (x2, x1) };

    for step in 1..=params.max_steps {
        let mid = (pos + neg) / 2.;

        if (neg - pos).abs() <= params.precision {
            return Ok(mid);
        }

        let y = f(mid);
        report(Step { step, x: mid, y });

        match sign(y) {
            s if s == 0. => return Ok(mid),
            s if s > 0. => pos = mid,
            s if s < 0. => neg = mid,
            _ => return Err(Failure::NonFinite { step, x: mid }),
        }
    }

    Err(Failure::BudgetExhausted {
        steps: params.max_steps,
    })
}
