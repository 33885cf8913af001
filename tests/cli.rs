use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

fn run_cli(input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_grid-path"))
        .env_remove("GRID_PATH_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn grid-path");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn single_cell_prints_start() {
    let output = run_cli("1 1\n5\n0 0 0 0\n");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "0 0\n.\n");
}

#[test]
fn cheaper_route_is_printed() {
    let output = run_cli("2 2\n1 1\n9 1\n0 0 1 1\n");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "0 0\n0 1\n1 1\n.\n");
    assert!(stderr(&output).is_empty(), "{}", stderr(&output));
}

#[test]
fn wall_row_means_no_path() {
    let output = run_cli("3 3\n1 1 1\n0 0 0\n1 1 1\n0 0 2 2\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("No path found"));
}

#[test]
fn parse_error_exits_with_message() {
    let output = run_cli("2 2\n1 1\n1 10\n0 0 1 1\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Invalid cell value at (1,1)"));
}

#[test]
fn wall_endpoint_is_rejected() {
    let output = run_cli("1 2\n1 0\n0 0 0 1\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("End point cannot be a wall"));
}
