//! An [`Equation`] backed by the `meval` crate.
//!
//! Handy for cross-checking the built-in engine. `meval` validates by parsing, and binds
//! `x` once up front so evaluation is a plain function call.

use super::*;
use meval::Expr;

pub struct Eq {
    /// The source text.
    expr: String,

    /// The expression with `x` bound.
    func: Box<dyn Fn(f64) -> f64>,
}

impl Equation for Eq {
    fn parse(expr: &str) -> Result<Self> {
        let func = expr
            .parse::<Expr>()
            .into_diagnostic()
            .wrap_err_with(|| format!("parsing '{expr}' failed"))?
            .bind(v1::VARIABLE)
            .into_diagnostic()
            .wrap_err_with(|| format!("'{expr}' must only use the variable 'x'"))?;

        Ok(Self {
            expr: expr.to_string(),
            func: Box::new(func),
        })
    }

    fn eval(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    fn expr(&self) -> String {
        self.expr.clone()
    }
}
