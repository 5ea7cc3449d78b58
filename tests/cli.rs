//! Pipeline-level smoke tests for the `parens` binary, run as a black box
//! via `Command` rather than calling into the library crates directly —
//! the point is to exercise argument parsing, stdin/file reading, and exit
//! codes the way a real invocation would.

use std::io::Write as _;
use std::process::{Command, Stdio};

fn parens() -> Command {
    Command::new(env!("CARGO_BIN_EXE_parens"))
}

#[test]
fn running_an_arithmetic_file_prints_nothing_and_exits_zero() {
    let dir = std::env::temp_dir();
    let path = dir.join("parens_cli_test_arith.lisp");
    std::fs::write(&path, "(print (+ 1 2))").unwrap();

    let output = parens().arg(&path).output().expect("binary should run");

    std::fs::remove_file(&path).ok();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "3");
}

#[test]
fn reading_from_stdin_works_when_no_path_is_given() {
    let mut child = parens()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("binary should spawn");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"(print (* 6 7))")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "42");
}

#[test]
fn a_parse_error_exits_non_zero_and_reports_on_stderr() {
    let output = parens()
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            child.stdin.take().unwrap().write_all(b"(")?;
            child.wait_with_output()
        })
        .expect("binary should run");

    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}

#[test]
fn disassemble_flag_prints_a_bytecode_table_instead_of_running() {
    let output = parens()
        .arg("--disassemble")
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            child.stdin.take().unwrap().write_all(b"(+ 1 2)")?;
            child.wait_with_output()
        })
        .expect("binary should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("F64"));
    assert!(stdout.contains("Add"));
}
