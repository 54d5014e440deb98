use super::*;

/// Halley's method: Newton's step with a second order correction.
///
/// The step is `a / b` with `a = f/f'` and `b = 1 - a f'' / 2f'`, derivatives by finite
/// differences.
///
/// # Errors
/// - [`Failure::ZeroDerivative`] if the first derivative vanishes at an approximation,
/// - [`Failure::NonFinite`] if an approximation is `NaN` or infinite,
/// - [`Failure::BudgetExhausted`] if no step converges.
pub fn halley<F, R>(f: &F, mut x: f64, params: &Params, mut report: R) -> Result<f64, Failure>
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

        let a = f(x) / dfdx;
        let b = 1. - a * second_derivative(f, x) / (2. * dfdx);
        let dx = a / b;
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn finds_root_of_sinc_plus_x() {
        let f = |x: f64| x.sin() / x + x;
        let root = halley(&f, -1., &Params::default(), |_| ()).expect("converges");
        assert_relative_eq!(f(root), 0., epsilon = 1e-10);
    }

    #[test]
    fn finds_cube_root() {
        let f = |x: f64| x * x * x - 8.;
        let mut steps = Vec::new();
        let root = halley(&f, 3., &Params::default(), |s| steps.push(s)).expect("converges");
        assert_relative_eq!(root, 2., epsilon = 1e-10);
        assert!(steps.len() < 20);
    }

    #[test]
    fn zero_derivative_is_rejected() {
        let f = |x: f64| x.cos();
        let result = halley(&f, 0., &Params::default(), |_| ());
        assert_eq!(result, Err(Failure::ZeroDerivative { x: 0. }));
    }

    #[test]
    fn budget_exhaustion() {
        let f = |x: f64| x * x + 1.;
        let params = Params {
            precision: 1e-10,
            max_steps: 3,
        };
        let mut calls = 0;
        let result = halley(&f, 1., &params, |_| calls += 1);

        assert_eq!(result, Err(Failure::BudgetExhausted { steps: 3 }));
        assert_eq!(calls, 3);
    }
}
