//! rar archives, listed by shelling out to the system `unrar` binary.
//!
//! Like 7z, no pure-Rust rar decoder exists in the corpus — the only crate
//! that speaks the format (`unrar_rs`, see the `contextal-platform` backend)
//! links against `libunrar` itself, which is no more "pure Rust" than
//! shelling out. `unrar lt` prints the same kind of machine-readable
//! technical listing as `7z l -slt`, just with `Key: Value` instead of
//! `Key = Value`.

use std::path::Path;
use std::process::Command;

use chrono::NaiveDateTime;

use crate::error::Error;
use crate::file_info::{EntryKind, FileInfo};

use super::common::{local_from_unix, member};

pub fn list(path: &Path) -> Result<Vec<FileInfo>, Error> {
	let container = path.display().to_string();
	let output = Command::new("unrar")
		.args(["lt", "-p-", &container])
		.output()
		.map_err(|e| Error::find(path, format!("unrar not available: {e}")))?;

	if !output.status.success() {
		let stderr = String::from_utf8_lossy(&output.stderr);
		return Err(Error::find(path, format!("unrar exited with an error: {}", stderr.trim())));
	}

	let stdout = String::from_utf8_lossy(&output.stdout);
	Ok(parse_lt(&stdout, &container))
}

/// Parse `unrar lt` output: blank-line-separated blocks of `Key: Value`
/// lines, one block per archive member.
fn parse_lt(output: &str, container: &str) -> Vec<FileInfo> {
	let mut out = Vec::new();
	let mut current_name: Option<String> = None;
	let mut current_size: i64 = 0;
	let mut current_is_dir = false;
	let mut current_mtime = String::new();

	let mut flush = |name: &mut Option<String>, size: i64, is_dir: bool, mtime: &str, out: &mut Vec<FileInfo>| {
		if let Some(n) = name.take() {
			let kind = if is_dir { EntryKind::Dir } else { EntryKind::File };
			let when = parse_lt_datetime(mtime);
			out.push(member(container, n, size, when, kind, "rar"));
		}
	};

	for line in output.lines() {
		let line = line.trim_end();
		if line.is_empty() {
			flush(&mut current_name, current_size, current_is_dir, &current_mtime, &mut out);
			current_size = 0;
			current_is_dir = false;
			current_mtime.clear();
			continue;
		}

		let Some((key, value)) = line.split_once(':') else { continue };
		let value = value.trim();
		match key.trim() {
			"Name" => current_name = Some(value.replace('\\', "/")),
			"Type" => current_is_dir = value.eq_ignore_ascii_case("directory"),
			"Size" => current_size = value.parse().unwrap_or(0),
			"mtime" => current_mtime = value.split(',').next().unwrap_or(value).to_string(),
			_ => {}
		}
	}
	flush(&mut current_name, current_size, current_is_dir, &current_mtime, &mut out);

	out
}

fn parse_lt_datetime(s: &str) -> chrono::DateTime<chrono::Local> {
	NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
		.map(|dt| local_from_unix(dt.and_utc().timestamp()))
		.unwrap_or_else(|_| local_from_unix(0))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_lt_blocks() {
		let sample = "\
Name: dir
Type: Directory
Size: 0
mtime: 2024-01-15 10:30:22,000000000

Name: dir/file.txt
Type: File
Size: 42
mtime: 2024-01-15 10:31:00,000000000
";
		let entries = parse_lt(sample, "archive.rar");
		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].path, "dir");
		assert_eq!(entries[0].kind, EntryKind::Dir);
		assert_eq!(entries[1].path, "dir/file.txt");
		assert_eq!(entries[1].size, 42);
		assert_eq!(entries[1].kind, EntryKind::File);
	}
}
