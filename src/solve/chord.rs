use super::*;

/// Chord method: regula falsi with a fixed anchor.
///
/// Before iterating, the anchor is picked as whichever endpoint has a function value whose
/// sign matches the local second difference, putting it on the convex side so the moving
/// point approaches the root monotonically.
///
/// # Errors
/// - [`Failure::ZeroDerivative`] if both endpoints share a function value,
/// - [`Failure::NonFinite`] if an approximation is `NaN` or infinite,
/// - [`Failure::BudgetExhausted`] if no step converges.
pub fn chord<F, R>(
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
    let (anchor, mut x) = if sign_matches(f(x1), second_difference(f, x1)) {
        (x1, x2)
    } else {
        (x2, x1)
    };

    let fa = f(anchor);

    #[allow(clippy::float_cmp)]
    if fa == f(x) {
        return Err(Failure::ZeroDerivative { x });
    }

    for step in 1..=params.max_steps {
        let fx = f(x);
        let dx = fx * (x - anchor) / (fx - fa);
        let next = x - dx;

        report(Step::at(f, step, next));
        finite(step, next)?;

        if dx.abs() <= params.precision / 2. {
            return Ok(next);
        }

        x = next;
    }

    Err(Failure::BudgetExhausted {
        steps: params.max_steps,
    })
}
