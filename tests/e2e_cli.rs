#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output, Stdio};

const INPUT: &str = "ThisTest.txt\ntest.txt\nThis3Test.txt\nConfigDialog.java\nabcd\n";

fn qp_bin() -> &'static str {
    env!("CARGO_BIN_EXE_qp")
}

fn run_qp(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(qp_bin())
        .args(args)
        .env("QP_DEFAULT_OPTIONS", "")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn qp");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("run qp")
}

#[test]
fn prints_matching_lines_in_input_order() {
    let output = run_qp(&["TT"], INPUT);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "ThisTest.txt\nThis3Test.txt\n");
}

#[test]
fn no_match_exits_with_one() {
    let output = run_qp(&["zzz"], INPUT);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn highlight_and_ranges() {
    let output = run_qp(&["--highlight", "--ranges", "CD"], INPUT);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "[C]onfig[D]ialog.java\t0:1,6:1\nab[cd]\t2:2\n"
    );
}

#[test]
fn explain_goes_to_stderr() {
    let output = run_qp(&["--explain", ">abcd<"], INPUT);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "abcd\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rule: exact"), "stderr: {stderr}");
    assert!(stderr.contains("pattern: \"abcd\""), "stderr: {stderr}");
}

#[test]
fn substring_and_rules() {
    let output = run_qp(&["--substring", "txt"], INPUT);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "ThisTest.txt\ntest.txt\nThis3Test.txt\n"
    );

    let output = run_qp(&["--rules", "blank,prefix", "TT"], INPUT);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn nul_separated_io() {
    let output = run_qp(&["--read0", "--print0", "a*"], "abc\0xyz\0bar\0");
    assert_eq!(output.stdout, b"abc\0bar\0");
}

#[test]
fn default_options_from_env() {
    let mut child = Command::new(qp_bin())
        .arg("--substring")
        .arg("Dialog")
        .env("QP_DEFAULT_OPTIONS", "--highlight")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn qp");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(INPUT.as_bytes())
        .expect("write stdin");
    let output = child.wait_with_output().expect("run qp");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Config[Dialog].java\n");
}

#[test]
fn missing_input_file_exits_with_two() {
    let output = run_qp(&["--input", "/nonexistent/qp-input", "a"], "");
    assert_eq!(output.status.code(), Some(2));
}
