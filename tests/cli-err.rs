use assert_cmd::Command;

fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

fn stderr(c: &mut Command) -> String {
    let out = c.assert().failure().get_output().stderr.clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn unclosed_paren() {
    let s = stderr(cmd().arg("(1 + 2"));
    assert!(s.contains("parsing '(1 + 2' failed"), "{s}");
    assert!(s.contains("no ')' to match '('"), "{s}");
}

#[test]
fn stray_close_paren() {
    let s = stderr(cmd().arg("1 + 2)"));
    assert!(s.contains("unexpected ')'"), "{s}");
}

#[test]
fn unknown_function() {
    let s = stderr(cmd().arg("sine(x) - 1"));
    assert!(s.contains("unknown function 'sine'"), "{s}");
    assert!(s.contains("did you mean"), "{s}");
}

#[test]
fn unknown_method() {
    let s = stderr(cmd().args(["x - 1", "--method", "brent"]));
    assert!(s.contains("invalid value 'brent'"), "{s}");
}

#[test]
fn negative_precision() {
    let s = stderr(cmd().args(["x - 1", "--precision", "-1"]));
    assert!(
        s.contains("precision must be a finite, non-negative number"),
        "{s}"
    );
}

#[test]
fn stdin_without_a_valid_formula() {
    let s = stderr(cmd().write_stdin("(x\nfoo(x)\n"));
    assert!(s.contains("Reading formula from stdin"), "{s}");
    assert!(s.contains("no ')' to match '('"), "{s}");
    assert!(s.contains("unknown function 'foo'"), "{s}");
    assert!(s.contains("no valid formula was provided"), "{s}");
}

#[test]
fn meval_rejects_other_variables() {
    let s = stderr(cmd().args(["x + y", "--eq-resolver", "meval"]));
    assert!(s.contains("must only use the variable 'x'"), "{s}");
}
