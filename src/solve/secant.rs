use super::*;

/// Secant method.
///
/// Each step interpolates linearly through the two most recent points. Stops once a step is
/// no larger than half the precision.
///
/// # Errors
/// - [`Failure::NonFinite`] if an approximation is `NaN` or infinite (for instance when the
///   two points share a function value),
/// - [`Failure::BudgetExhausted`] if no step converges.
pub fn secant<F, R>(
    f: &F,
    mut x1: f64,
    mut x2: f64,
    params: &Params,
    mut report: R,
) -> Result<f64, Failure>
where
    F: Fn(f64) -> f64,
    R: FnMut(Step),
{
    for step in 1..=params.max_steps {
        let f1 = f(x1);
        let f2 = f(x2);
        let dx = f1 * (x2 - x1) / (f2 - f1);
        let x3 = x1 - dx;

        report(Step::at(f, step, x3));
        finite(step, x3)?;

        if dx.abs() <= params.precision / 2. {
            return Ok(x3);
        }

        x1 = x2;
        x2 = x3;
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
    fn finds_cube_root() {
        let f = |x: f64| x * x * x - 27.;
        let root = secant(&f, 1., 5., &Params::default(), |_| ()).expect("converges");
        assert_relative_eq!(root, 3., epsilon = 1e-9);
    }

    #[test]
    fn equal_points_are_non_finite() {
        let f = |x: f64| x * x - 2.;
        let mut steps = Vec::new();
        let result = secant(&f, 1., 1., &Params::default(), |s| steps.push(s));

        assert!(matches!(result, Err(Failure::NonFinite { step: 1, .. })));
        assert_eq!(steps.len(), 1);
        assert!(steps[0].x.is_nan());
    }

    #[test]
    fn budget_exhaustion() {
        // no real root
        let f = |x: f64| x * x + 1.;
        let params = Params {
            max_steps: 5,
            ..Params::default()
        };
        let mut calls = 0;
        let result = secant(&f, 1., 2., &params, |_| calls += 1);

        assert!(matches!(
            result,
            Err(Failure::BudgetExhausted { steps: 5 } | Failure::NonFinite { .. })
        ));
        assert!(calls <= 5);
    }
}
