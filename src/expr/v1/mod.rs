//! The built-in formula engine.
//!
//! A [`Formula`] keeps only its cleaned text. Nothing is cached: every [`Formula::evaluate`]
//! re-parses the text with a fresh cursor, which keeps a formula immutable and freely
//! shareable between solvers.

use super::*;
use parse::{Cursor, Mode, Stall, StallKind, DRY_RUN_VALUE};
use simsearch::SimSearch;
use std::fmt;

mod parse;
mod table;

pub use parse::VARIABLE;
pub use table::{Function, Operator};

/// Value returned by [`Formula::evaluate`] when the text does not parse.
pub const SENTINEL: f64 = f64::NAN;

/// A single variable formula in `x`.
///
/// # Example
/// ```rust
/// use rootme::Formula;
///
/// let f = Formula::new("x ^ 2 - 2");
/// assert_eq!(f.text(), "x^2-2");
/// assert!(f.validate().is_ok());
/// assert_eq!(f.evaluate(3.0), 7.0);
///
/// let bad = Formula::new("(x + 1");
/// assert_eq!(bad.validate().unwrap_err().pos(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    text: String,
}

/// Why a formula failed validation.
///
/// Positions are byte offsets into the cleaned (whitespace stripped) text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// A closing parenthesis with nothing open.
    #[error("unexpected ')'")]
    UnexpectedClose { pos: usize },

    /// Parentheses left open at the end of the text.
    #[error("no ')' to match '('")]
    UnclosedOpen { pos: usize },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String, pos: usize },

    /// The token sequence could not be classified.
    #[error("{message}")]
    Grammar { message: String, pos: usize },
}

impl SyntaxError {
    pub fn pos(&self) -> usize {
        match self {
            SyntaxError::UnexpectedClose { pos }
            | SyntaxError::UnclosedOpen { pos }
            | SyntaxError::UnknownFunction { pos, .. }
            | SyntaxError::Grammar { pos, .. } => *pos,
        }
    }
}

impl From<Stall> for SyntaxError {
    fn from(Stall { pos, kind }: Stall) -> Self {
        let message = match kind {
            StallKind::UnknownFunction(name) => return SyntaxError::UnknownFunction { name, pos },
            StallKind::Unclassified => "failed to classify token sequence".to_string(),
            StallKind::EndOfInput => "unexpected end of formula".to_string(),
            StallKind::ExpectedClose => "expected ')'".to_string(),
            StallKind::Unrecognized(token) => format!("unrecognized token '{token}'"),
        };

        SyntaxError::Grammar { message, pos }
    }
}

impl Formula {
    /// Construct a formula, stripping all whitespace.
    ///
    /// This never fails, malformed text is only detected by [`Formula::validate`].
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }

    /// The cleaned text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check parenthesis balance, then dry-run the grammar over the whole text.
    ///
    /// The dry run binds `x` to a placeholder and never calls a real math function, so
    /// domain errors such as `ln(0)` cannot fail validation.
    pub fn validate(&self) -> Result<(), SyntaxError> {
        check_parens(&self.text)?;

        let (_, end) = Cursor::new(&self.text, DRY_RUN_VALUE, Mode::Validate).expression()?;

        if end.at_end() {
            Ok(())
        } else {
            Err(SyntaxError::Grammar {
                message: format!("unrecognized token '{}'", end.token()),
                pos: end.pos(),
            })
        }
    }

    /// Evaluate the formula with `x` bound to `arg`.
    ///
    /// This does not validate! Text that does not parse yields [`SENTINEL`], and text
    /// trailing a complete leading expression is ignored (`abs(x)y` evaluates as `abs(x)`).
    /// Call [`Formula::validate`] first.
    pub fn evaluate(&self, arg: f64) -> f64 {
        Cursor::new(&self.text, arg, Mode::Evaluate)
            .expression()
            .map(|(value, _)| value)
            .unwrap_or(SENTINEL)
    }

    /// The formula as a plain callable.
    pub fn as_fn(&self) -> impl Fn(f64) -> f64 + '_ {
        move |x| self.evaluate(x)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn check_parens(text: &str) -> Result<(), SyntaxError> {
    let mut depth = 0usize;

    for (pos, b) in text.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' if depth == 0 => return Err(SyntaxError::UnexpectedClose { pos }),
            b')' => depth -= 1,
            _ => (),
        }
    }

    if depth == 0 {
        Ok(())
    } else {
        Err(SyntaxError::UnclosedOpen { pos: text.len() })
    }
}

/// A [`SyntaxError`] rendered against its source text.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{error}")]
#[diagnostic(code(rootme::syntax))]
pub struct InvalidFormula {
    error: SyntaxError,

    #[source_code]
    src: String,

    #[label("here")]
    at: SourceSpan,

    #[help]
    help: Option<String>,
}

impl InvalidFormula {
    pub fn new(formula: &Formula, error: SyntaxError) -> Self {
        let pos = error.pos();
        let len = usize::from(pos < formula.text.len());

        let help = match &error {
            SyntaxError::UnknownFunction { name, .. } => Some(suggest_function(name)),
            SyntaxError::UnclosedOpen { .. } => Some("close every '(' with a ')'".to_string()),
            _ => None,
        };

        Self {
            error,
            src: formula.text.clone(),
            at: (pos, len).into(),
            help,
        }
    }
}

/// Suggest known function names resembling `name`.
fn suggest_function(name: &str) -> String {
    let mut engine = SimSearch::new();
    for f in Function::ALL {
        engine.insert(f.name(), f.name());
    }

    let found: Vec<&str> = engine.search(name);

    if found.is_empty() {
        let all = Function::ALL
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(", ");
        format!("available functions: {all}")
    } else {
        let names = found
            .iter()
            .take(3)
            .map(|n| format!("'{n}'"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("did you mean {names}?")
    }
}

impl Equation for Formula {
    fn parse(expr: &str) -> Result<Self> {
        let formula = Formula::new(expr);
        formula
            .validate()
            .map_err(|e| InvalidFormula::new(&formula, e))
            .wrap_err_with(|| format!("parsing '{expr}' failed"))?;
        Ok(formula)
    }

    fn eval(&self, x: f64) -> f64 {
        self.evaluate(x)
    }

    fn expr(&self) -> String {
        self.text.clone()
    }
}
