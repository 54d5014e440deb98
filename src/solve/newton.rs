use super::*;

/// Newton's method with a central difference derivative.
///
/// # Errors
/// - [`Failure::ZeroDerivative`] if the derivative vanishes at an approximation,
/// - [`Failure::NonFinite`] if an approximation is `NaN` or infinite,
/// - [`Failure::BudgetExhausted`] if no step converges.
pub fn newton<F, R>(f: &F, mut x: f64, params: &Params, mut report: R) -> Result<f64, Failure>
where
    F: Fn(f64) -> f64,
    R: FnMut(Step),
{
    for step in 1..=params.max_steps {
        finite(step, x)?;

        let dfdx = derivative(f, x);
        if dfdx == 0. {
            return Err(Failure::ZeroDerivative { x });
        }

        let dx = f(x) / dfdx;
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
