//! Rendering runs to stdout.

use super::*;
use comfy_table::{Cell, CellAlignment as CA, Row, Table};
use serde::*;

/// The outcome of running one method, along with every step it reported.
#[derive(Debug, Serialize)]
pub struct Run {
    pub method: Method,
    pub steps: Vec<Step>,
    /// The converged approximation.
    pub root: Option<f64>,
    /// Why the method failed.
    pub error: Option<String>,
}

impl Run {
    /// Run `method`, collecting its step trace.
    pub fn new<F>(method: Method, f: &F, a: f64, b: f64, params: &Params) -> Self
    where
        F: Fn(f64) -> f64,
    {
        let mut steps = Vec::new();
        let result = method.run(f, a, b, params, |s| steps.push(s));

        let (root, error) = match result {
            Ok(x) => (Some(x), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            method,
            steps,
            root,
            error,
        }
    }

    fn outcome(&self) -> String {
        match (&self.root, &self.error) {
            (Some(x), _) => format!("Root: {x}"),
            (None, Some(e)) => format!("Failed: {e}"),
            (None, None) => "Failed".to_string(),
        }
    }
}

pub fn write_table<W: Write>(
    w: &mut W,
    expr: &str,
    runs: &[Run],
    write_steps: bool,
) -> io::Result<()> {
    let mut nfmtr = "[~6]".parse::<numfmt::Formatter>().expect("just fine");

    writeln!(w, "f(x) = {expr}")?;

    for run in runs {
        writeln!(w)?;
        writeln!(w, "{}", run.method)?;

        if write_steps && !run.steps.is_empty() {
            let mut table = Table::new();
            table.set_header(["Step", "x", "f(x)"]);

            for Step { step, x, y } in &run.steps {
                let mut row = Row::new();
                row.add_cell(Cell::new(step).set_alignment(CA::Right))
                    .add_cell(Cell::new(nfmtr.fmt(*x)).set_alignment(CA::Right))
                    .add_cell(Cell::new(nfmtr.fmt(*y)).set_alignment(CA::Right));
                table.add_row(row);
            }

            table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);

            writeln!(w, "{table}")?;
        }

        writeln!(w, "  {}", run.outcome())?;
    }

    Ok(())
}

/// One line per step, `x1 = ... y1 = ...`.
pub fn write_plain<W: Write>(w: &mut W, runs: &[Run], write_steps: bool) -> io::Result<()> {
    for run in runs {
        writeln!(w, "{}:", run.method)?;

        if write_steps {
            for Step { step, x, y } in &run.steps {
                writeln!(w, "x{step} = {x:<+24e} y{step} = {y:<+24e}")?;
            }
        }

        match run.root {
            Some(x) => writeln!(w, "root = {x}")?,
            None => writeln!(w, "failed: {}", run.error.as_deref().unwrap_or("unknown"))?,
        }
    }

    Ok(())
}

pub fn write_csv<W: Write>(w: &mut W, runs: &[Run]) -> csv::Result<()> {
    #[derive(Serialize)]
    struct Record {
        method: Method,
        step: usize,
        x: f64,
        y: f64,
    }

    let mut wtr = csv::Writer::from_writer(w);

    for run in runs {
        for Step { step, x, y } in &run.steps {
            wtr.serialize(Record {
                method: run.method,
                step: *step,
                x: *x,
                y: *y,
            })?;
        }
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(w: &mut W, runs: &[Run]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *w, runs)?;
    writeln!(w).map_err(serde_json::Error::io)
}
