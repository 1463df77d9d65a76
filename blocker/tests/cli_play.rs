//! CLI tests for `blocker play`.
//!
//! Spawns the blocker binary, feeds a whole game on stdin, and checks the
//! cut lines on stdout and the exit code.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use blocker::exit_codes;
use blocker::test_support::{game_input, setup};

fn play(input: &str, extra_args: &[&str]) -> Output {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut child = Command::new(env!("CARGO_BIN_EXE_blocker"))
        .current_dir(temp.path())
        .arg("play")
        .args(extra_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn blocker play");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("blocker play")
}

#[test]
fn linear_chain_cuts_link_before_gateway() {
    let input = game_input(&setup(3, &[(0, 1), (1, 2)], &[2]), &[0]);
    let output = play(&input, &[]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1 2\n");
}

#[test]
fn star_of_gateways_is_cut_one_link_per_turn() {
    let input = game_input(&setup(4, &[(0, 1), (0, 2), (0, 3)], &[1, 2, 3]), &[0, 0, 0, 0]);
    let output = play(&input, &[]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0 1\n0 2\n0 3\n");
}

#[test]
fn unknown_position_exits_invalid() {
    let input = game_input(&setup(2, &[(0, 1)], &[1]), &[4]);
    let output = play(&input, &[]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("node 4 does not exist"));
}

#[test]
fn truncated_setup_exits_invalid() {
    let output = play("3 2 1\n0 1\n", &[]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stdout).is_empty());
}

#[test]
fn transcript_records_every_turn() {
    let temp = tempfile::tempdir().expect("tempdir");
    let transcript = temp.path().join("turns.jsonl");
    let input = game_input(&setup(4, &[(0, 1), (2, 3)], &[1, 3]), &[0, 0]);
    let output = play(
        &input,
        &["--transcript", transcript.to_str().expect("utf8 path")],
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let contents = std::fs::read_to_string(&transcript).expect("read transcript");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(r#""kind":"immediate""#));
    assert!(lines[1].contains(r#""kind":"hold""#));
}
