use super::*;

/// Simple (fixed point) iteration `x <- x - λ f(x)`.
///
/// The relaxation factor `λ = sign(f'(x1)) / max(|f'(x1)|, |f'(x2)|)` makes the iteration a
/// contraction when the derivative keeps one sign over the bracket. Iteration starts from
/// whichever of `x1`, `x2`, and the midpoint has the smallest `|f|`.
///
/// # Errors
/// - [`Failure::DerivativeSignChange`] if the derivative has opposite signs at `x1` and `x2`,
/// - [`Failure::ZeroDerivative`] if the derivative vanishes at either endpoint,
/// - [`Failure::NonFinite`] if an approximation is `NaN` or infinite,
/// - [`Failure::BudgetExhausted`] if no step converges.
pub fn simple<F, R>(
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
    let d1 = derivative(f, x1);
    let d2 = derivative(f, x2);
    let s1 = sign(d1);
    let s2 = sign(d2);

    if s1.is_nan() {
        return Err(Failure::NonFinite { step: 0, x: x1 });
    }
    if s2.is_nan() {
        return Err(Failure::NonFinite { step: 0, x: x2 });
    }
    if s1 == 0. {
        return Err(Failure::ZeroDerivative { x: x1 });
    }
    if s2 == 0. {
        return Err(Failure::ZeroDerivative { x: x2 });
    }
    #[allow(clippy::float_cmp)]
    if s1 != s2 {
        return Err(Failure::DerivativeSignChange { a: x1, b: x2 });
    }

    let factor = s1 / d1.abs().max(d2.abs());

    let mut x = [x1, x2, (x1 + x2) / 2.]
        .into_iter()
        .min_by(|a, b| f(*a).abs().total_cmp(&f(*b).abs()))
        .unwrap_or(x1);

    for step in 1..=params.max_steps {
        let dx = factor * f(x);
        x -= dx;

        report(Step::at(f, step, x));
        finite(step, x)?;

        if dx.abs() <= params.precision / 2. {
            return Ok(x);
        }
    }

    Err(Failure::BudgetExhausted {
        steps: params.max_steps,
    })
}
