//! Mathematical expression parsing and evaluation.

use super::*;

pub mod meval_eq;
pub mod v1;

/// Parse and evaluate a single variable expression in `x`.
pub trait Equation: Sized {
    /// Parse _and validate_ a text expression.
    ///
    /// Anything returned from here is safe to evaluate.
    fn parse(expr: &str) -> Result<Self>;

    /// Evaluate the expression with `x` bound to the given value.
    ///
    /// Evaluation never fails, domain errors surface as non-finite values.
    fn eval(&self, x: f64) -> f64;

    /// Fetch the string form of the expression.
    fn expr(&self) -> String;
}
