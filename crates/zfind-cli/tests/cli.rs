//! End-to-end coverage of the `zfind` binary itself: argument handling,
//! output formats and the exit-code policy (spec.md §6.1/§7), driven the way
//! the teacher's `cli/tests/help.rs` drives `watchexec` — through
//! `assert_cmd::Command::cargo_bin`, not through the library API.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn zfind() -> Command {
	Command::cargo_bin("zfind").unwrap()
}

fn fixture() -> tempfile::TempDir {
	let dir = tempfile::tempdir().unwrap();
	fs::write(dir.path().join("foo.txt"), b"hello").unwrap();
	fs::write(dir.path().join("bar.md"), b"# hi").unwrap();
	dir
}

#[test]
fn defaults_to_matching_everything_under_the_given_path() {
	let dir = fixture();
	zfind()
		.arg(dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("foo.txt"))
		.stdout(predicate::str::contains("bar.md"));
}

#[test]
fn filter_expression_narrows_the_results() {
	let dir = fixture();
	zfind()
		.args(["ext = 'txt'", dir.path().to_str().unwrap()])
		.assert()
		.success()
		.stdout(predicate::str::contains("foo.txt"))
		.stdout(predicate::str::contains("bar.md").not());
}

#[test]
fn dash_filter_also_matches_everything() {
	let dir = fixture();
	zfind().args(["-", dir.path().to_str().unwrap()]).assert().success().stdout(predicate::str::contains("foo.txt"));
}

#[test]
fn malformed_filter_is_a_fatal_parse_error() {
	zfind().arg("size <").assert().failure();
}

#[test]
fn unknown_variable_is_a_non_fatal_per_record_error_with_nonzero_exit() {
	let dir = fixture();
	zfind()
		.args(["nosuchfield = 'x'", dir.path().to_str().unwrap()])
		.assert()
		.failure()
		.stderr(predicate::str::contains("is unknown"));
}

#[test]
fn long_format_includes_size_and_timestamp() {
	let dir = fixture();
	let output = zfind().args(["-l", "ext = 'txt'", dir.path().to_str().unwrap()]).output().unwrap();
	assert!(output.status.success());
	let stdout = String::from_utf8(output.stdout).unwrap();
	let line = stdout.lines().find(|l| l.ends_with("foo.txt")).expect("foo.txt line present");
	let mut fields = line.split_whitespace();
	let date = fields.next().unwrap();
	let time = fields.next().unwrap();
	let size = fields.next().unwrap();
	assert_eq!(date.len(), 10, "YYYY-MM-DD: {date}");
	assert_eq!(time.len(), 8, "HH:MM:SS: {time}");
	assert!(size.parse::<u64>().is_ok(), "size should be numeric: {size}");
}

#[test]
fn csv_format_writes_the_field_header() {
	let dir = fixture();
	zfind()
		.args(["--csv", "ext = 'txt'", dir.path().to_str().unwrap()])
		.assert()
		.success()
		.stdout(predicate::str::starts_with("name,path,container,size,date,time,ext,ext2,type,archive\n"));
}

#[test]
fn csv_no_head_suppresses_the_header() {
	let dir = fixture();
	zfind()
		.args(["--csv", "--csv-no-head", "ext = 'txt'", dir.path().to_str().unwrap()])
		.assert()
		.success()
		.stdout(predicate::str::starts_with("name,path,container,size,date,time,ext,ext2,type,archive\n").not());
}

#[test]
fn csv_no_head_without_csv_is_rejected_by_the_arg_parser() {
	zfind().arg("--csv-no-head").assert().failure();
}

#[test]
fn nul_separated_output_uses_nul_bytes() {
	let dir = fixture();
	let output = zfind().args(["-0", "ext = 'txt'", dir.path().to_str().unwrap()]).output().unwrap();
	assert!(output.status.success());
	assert!(output.stdout.contains(&0u8));
	assert!(!output.stdout.contains(&b'\n'));
}

#[test]
fn filter_help_flag_prints_help_and_exits_cleanly() {
	zfind().arg("-H").assert().success().stdout(predicate::str::contains("SQL WHERE"));
}
