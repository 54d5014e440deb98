//! Root finding methods.
//!
//! Every method treats the function under test as an opaque `Fn(f64) -> f64`, runs under a
//! step budget and a precision target on the step size, and hands each approximation to a
//! `report` callback before checking for termination. Nothing is retained between runs.
//!
//! Outcomes are either a converged approximation or a [`Failure`], there is no partial
//! success.

use super::*;
use crate::diff::{derivative, second_derivative, second_difference, sign, sign_matches};
use serde::*;

mod bisection;
mod chord;
mod halley;
mod newton;
mod secant;
mod simple;

pub use bisection::bisection;
pub use chord::chord;
pub use halley::halley;
pub use newton::newton;
pub use secant::secant;
pub use simple::simple;

/// Run parameters shared by every method.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Params {
    /// Convergence threshold on the step size (not the function value).
    pub precision: f64,

    /// Step budget, exceeding it is a failure.
    pub max_steps: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            precision: 1e-10,
            max_steps: 100,
        }
    }
}

/// One approximation emitted by a method.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Step {
    /// 1-based step index.
    pub step: usize,
    /// The approximation.
    pub x: f64,
    /// The function value at the approximation.
    pub y: f64,
}

impl Step {
    fn at<F: Fn(f64) -> f64>(f: &F, step: usize, x: f64) -> Self {
        Self { step, x, y: f(x) }
    }
}

/// Why a method did not produce a root.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Failure {
    #[error("no convergence within {steps} steps")]
    BudgetExhausted { steps: usize },

    #[error("approximation became non-finite at step {step}: x = {x}")]
    NonFinite { step: usize, x: f64 },

    #[error("f({a}) and f({b}) share a sign, no root is bracketed")]
    NoSignChange { a: f64, b: f64 },

    #[error("the derivative changes sign between {a} and {b}")]
    DerivativeSignChange { a: f64, b: f64 },

    #[error("the derivative vanishes at x = {x}")]
    ZeroDerivative { x: f64 },
}

/// Fails with [`Failure::NonFinite`] if `x` is `NaN` or infinite.
fn finite(step: usize, x: f64) -> Result<f64, Failure> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(Failure::NonFinite { step, x })
    }
}

/// The available methods.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Secant method, from two starting points.
    Secant,
    /// Chord method (regula falsi with a fixed anchor), over a bracket.
    Chord,
    /// Bisection, over a sign changing bracket.
    Bisection,
    /// Newton's method, from one starting point.
    Newton,
    /// Halley's method, from one starting point.
    Halley,
    /// Simple (fixed point) iteration, over a bracket with a monotonic derivative.
    Simple,
}

impl Method {
    /// Every method, in reporting order.
    pub const ALL: [Method; 6] = [
        Method::Secant,
        Method::Chord,
        Method::Bisection,
        Method::Newton,
        Method::Halley,
        Method::Simple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Method::Secant => "secant",
            Method::Chord => "chord",
            Method::Bisection => "bisection",
            Method::Newton => "newton",
            Method::Halley => "halley",
            Method::Simple => "simple",
        }
    }

    /// Run the method with starting values `a` and `b`.
    ///
    /// Single point methods ignore `b`.
    pub fn run<F, R>(
        self,
        f: &F,
        a: f64,
        b: f64,
        params: &Params,
        report: R,
    ) -> Result<f64, Failure>
    where
        F: Fn(f64) -> f64,
        R: FnMut(Step),
    {
        match self {
            Method::Secant => secant(f, a, b, params, report),
            Method::Chord => chord(f, a, b, params, report),
            Method::Bisection => bisection(f, a, b, params, report),
            Method::Newton => newton(f, a, params, report),
            Method::Halley => halley(f, a, params, report),
            Method::Simple => simple(f, a, b, params, report),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
