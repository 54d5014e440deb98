use clap::{Parser, ValueEnum};
use miette::*;
use std::io::{self, BufRead, Write};

pub mod diff;
pub mod expr;
mod report;
pub mod solve;

pub use expr::v1::{Formula, SyntaxError};
pub use expr::Equation;
pub use report::Run;
pub use solve::{Failure, Method, Params, Step};

/// CLI root finder.
/// Locate a root of a single variable formula in `x` with classic iterative methods.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct App {
    /// The formula in `x`.
    /// If left blank, formulas are read from stdin until one is valid.
    #[arg(allow_hyphen_values = true)]
    pub expr: Option<String>,

    /// The root finding method to run.
    #[arg(short, long, default_value_t, value_enum)]
    pub method: MethodChoice,

    /// The first starting value. The only one used by single point methods.
    #[arg(short, long = "start", default_value_t = 1.0, allow_negative_numbers = true)]
    pub a: f64,

    /// The second starting value, making the bracket `[a, b]`.
    #[arg(short, long = "end", default_value_t = 2.0, allow_negative_numbers = true)]
    pub b: f64,

    /// Convergence threshold on the step size.
    #[arg(
        short,
        long,
        default_value_t = Params::default().precision,
        allow_negative_numbers = true
    )]
    pub precision: f64,

    /// Step budget for each method.
    #[arg(short = 'n', long, default_value_t = Params::default().max_steps)]
    pub max_steps: usize,

    /// The version of equation resolver to use.
    #[arg(long, default_value_t, value_enum)]
    pub eq_resolver: EquationResolver,

    /// The output format to write to stdout.
    #[arg(short, long, default_value_t, value_enum)]
    pub out: Output,

    /// Do not output each step, only the outcome of each method.
    /// Applies to the table and plain formats.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum, Default)]
pub enum MethodChoice {
    /// Run every method.
    #[default]
    All,
    Secant,
    Chord,
    Bisection,
    Newton,
    Halley,
    Simple,
}

impl MethodChoice {
    pub fn methods(self) -> Vec<Method> {
        match self {
            MethodChoice::All => Method::ALL.to_vec(),
            MethodChoice::Secant => vec![Method::Secant],
            MethodChoice::Chord => vec![Method::Chord],
            MethodChoice::Bisection => vec![Method::Bisection],
            MethodChoice::Newton => vec![Method::Newton],
            MethodChoice::Halley => vec![Method::Halley],
            MethodChoice::Simple => vec![Method::Simple],
        }
    }
}

#[derive(Debug, Copy, Clone, ValueEnum, Default)]
pub enum EquationResolver {
    /// The built-in formula engine.
    #[default]
    V1,

    /// The `meval` crate.
    Meval,
}

#[derive(Debug, Copy, Clone, ValueEnum, Default)]
pub enum Output {
    /// Rich table view.
    #[default]
    Table,

    /// Plain, one line per step.
    Plain,

    /// Every step as CSV rows.
    Csv,

    /// JSON array of runs.
    Json,
}

impl App {
    pub fn run(self) -> Result<()> {
        match self.eq_resolver {
            EquationResolver::V1 => run::<Formula>(self),
            EquationResolver::Meval => run::<expr::meval_eq::Eq>(self),
        }
    }
}

fn run<E>(app: App) -> Result<()>
where
    E: Equation,
{
    let App {
        expr,
        method,
        a,
        b,
        precision,
        max_steps,
        eq_resolver: _,
        out,
        quiet,
    } = app;

    ensure!(
        precision.is_finite() && precision >= 0.,
        "precision must be a finite, non-negative number, found {precision}"
    );
    ensure!(
        a.is_finite() && b.is_finite(),
        "starting values must be finite, found a = {a}, b = {b}"
    );

    let eq = match expr {
        Some(expr) => E::parse(&expr)?,
        None => {
            eprintln!("Reading formula from stdin");
            prompt::<E, _, _>(io::stdin().lock(), &mut io::stderr())?
        }
    };

    let params = Params {
        precision,
        max_steps,
    };
    let f = |x| eq.eval(x);

    let runs = method
        .methods()
        .into_iter()
        .map(|m| Run::new(m, &f, a, b, &params))
        .collect::<Vec<_>>();

    let w = &mut io::stdout().lock();

    match out {
        Output::Table => report::write_table(w, &eq.expr(), &runs, !quiet).into_diagnostic(),
        Output::Plain => report::write_plain(w, &runs, !quiet).into_diagnostic(),
        Output::Csv => report::write_csv(w, &runs).into_diagnostic(),
        Output::Json => report::write_json(w, &runs).into_diagnostic(),
    }
    .wrap_err("failed to write results to stdout")
}

/// Read formulas line by line until one parses.
///
/// Each failure is written to `err` and the prompt repeats.
fn prompt<E, R, W>(input: R, err: &mut W) -> Result<E>
where
    E: Equation,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(err, "formula> ")
            .and_then(|_| err.flush())
            .into_diagnostic()?;

        let line = match lines.next() {
            Some(line) => line
                .into_diagnostic()
                .wrap_err("failed to read formula from stdin")?,
            None => {
                writeln!(err).into_diagnostic()?;
                bail!("no valid formula was provided");
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match E::parse(&line) {
            Ok(eq) => return Ok(eq),
            Err(e) => writeln!(err, "{e:?}").into_diagnostic()?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_retries_until_valid() {
        let input = "\n(1 + 2\nx^2 - 2\nnever read\n".as_bytes();
        let mut err = Vec::new();

        let f: Formula = prompt(input, &mut err).expect("second formula is valid");
        assert_eq!(f.text(), "x^2-2");

        let err = String::from_utf8(err).expect("utf8");
        assert_eq!(err.matches("formula> ").count(), 3);
        assert!(err.contains("no ')' to match '('"), "{err}");
    }

    #[test]
    fn prompt_gives_up_at_eof() {
        let input = "foo(x)\n".as_bytes();
        let mut err = Vec::new();

        let e = prompt::<Formula, _, _>(input, &mut err).expect_err("nothing valid");
        assert_eq!(e.to_string(), "no valid formula was provided");

        let err = String::from_utf8(err).expect("utf8");
        assert!(err.contains("unknown function 'foo'"), "{err}");
    }

    #[test]
    fn app_definition() {
        use clap::CommandFactory;
        App::command().debug_assert();
    }

    #[test]
    fn method_choice() {
        assert_eq!(MethodChoice::All.methods(), Method::ALL);
        assert_eq!(MethodChoice::Halley.methods(), [Method::Halley]);
    }
}
