use assert_cmd::Command;
use serde_json::Value;

const SQRT_2: f64 = std::f64::consts::SQRT_2;

fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

fn stdout(c: &mut Command) -> String {
    let out = c.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

fn json(c: &mut Command) -> Value {
    serde_json::from_str(&stdout(c.args(["--out", "json"]))).unwrap()
}

#[test]
fn bisection_finds_root_two() {
    let v = json(cmd().args(["x^2 - 2", "-m", "bisection", "-p", "1e-8"]));

    let runs = v.as_array().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0]["method"], "bisection");
    assert_eq!(runs[0]["steps"].as_array().unwrap().len(), 27);

    let root = runs[0]["root"].as_f64().unwrap();
    assert!((root - 1.41421356).abs() < 1e-8, "{root}");
}

#[test]
fn every_method_runs() {
    let v = json(cmd().arg("x^2 - 2"));
    let runs = v.as_array().unwrap();

    let names = runs
        .iter()
        .map(|r| r["method"].as_str().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        ["secant", "chord", "bisection", "newton", "halley", "simple"]
    );

    for r in runs {
        let root = r["root"].as_f64().unwrap();
        assert!((root - SQRT_2).abs() < 1e-9, "{r}");
        assert!(r["error"].is_null());
    }
}

#[test]
fn failures_are_reported_not_fatal() {
    let v = json(cmd().args(["x + 5", "-m", "bisection"]));
    assert!(v[0]["root"].is_null());
    assert_eq!(
        v[0]["error"],
        "f(1) and f(2) share a sign, no root is bracketed"
    );
}

#[test]
fn negative_starting_values() {
    let v = json(cmd().args(["x^3 + 8", "-m", "newton", "-a", "-3"]));
    let root = v[0]["root"].as_f64().unwrap();
    assert!((root + 2.).abs() < 1e-9, "{root}");
}

#[test]
fn meval_resolver() {
    let v = json(cmd().args(["x^2 - 2", "-m", "secant", "--eq-resolver", "meval"]));
    let root = v[0]["root"].as_f64().unwrap();
    assert!((root - SQRT_2).abs() < 1e-9, "{root}");
}

#[test]
fn formula_from_stdin() {
    let mut c = cmd();
    c.args(["-m", "bisection", "--out", "json"])
        .write_stdin("(x^2 - 2\nx^2 - 2\n");
    let out = c.assert().success().get_output().clone();

    let err = String::from_utf8(out.stderr).unwrap();
    assert!(err.contains("no ')' to match '('"), "{err}");

    let v: Value = serde_json::from_slice(&out.stdout).unwrap();
    let root = v[0]["root"].as_f64().unwrap();
    assert!((root - SQRT_2).abs() < 1e-9, "{root}");
}

#[test]
fn plain() {
    let s = stdout(cmd().args(["x^2 - 2", "-m", "bisection", "-o", "plain"]));
    let mut lines = s.lines();

    assert_eq!(lines.next(), Some("bisection:"));
    assert!(lines.next().unwrap().starts_with("x1 = +1.5e0"));
    assert!(lines.last().unwrap().starts_with("root = 1.41421356"));
}

#[test]
fn table_quiet() {
    let s = stdout(cmd().args(["x^2 - 2", "-m", "halley", "--quiet"]));
    let lines = s.lines().collect::<Vec<_>>();

    assert_eq!(lines[..3], ["f(x) = x^2-2", "", "halley"]);
    assert!(lines[3].starts_with("  Root: 1.41421356"), "{s}");
    assert_eq!(lines.len(), 4);
}

#[test]
fn csv() {
    let s = stdout(cmd().args([
        "x^2 - 2",
        "-m",
        "bisection",
        "-p",
        "1e-8",
        "-o",
        "csv",
    ]));
    let mut lines = s.lines();

    assert_eq!(lines.next(), Some("method,step,x,y"));
    assert_eq!(lines.next(), Some("bisection,1,1.5,0.25"));
    assert_eq!(lines.count(), 26);
}
