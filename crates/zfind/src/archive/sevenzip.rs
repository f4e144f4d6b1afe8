//! 7z archives, listed by shelling out to the system `7z` binary.
//!
//! No pure-Rust 7z decoder appears anywhere in the corpus; shelling out and
//! parsing `7z l -slt`'s machine-readable `Key = Value` blocks is the
//! pattern the corpus actually uses for this format (see the archive lister
//! in `fenio-furman`'s file manager backend).

use std::path::Path;
use std::process::Command;

use chrono::NaiveDateTime;

use crate::error::Error;
use crate::file_info::{EntryKind, FileInfo};

use super::common::{local_from_unix, member};

pub fn list(path: &Path) -> Result<Vec<FileInfo>, Error> {
	let container = path.display().to_string();
	let output = Command::new("7z")
		.args(["l", "-slt", &container])
		.output()
		.map_err(|e| Error::find(path, format!("7z not available: {e}")))?;

	if !output.status.success() {
		let stderr = String::from_utf8_lossy(&output.stderr);
		return Err(Error::find(path, format!("7z exited with an error: {}", stderr.trim())));
	}

	let stdout = String::from_utf8_lossy(&output.stdout);
	Ok(parse_slt(&stdout, &container))
}

/// Parse `7z l -slt` output: blank-line-separated blocks of `Key = Value`
/// lines, one block per archive entry (the very first block describes the
/// archive itself, not a member, and is skipped).
fn parse_slt(output: &str, container: &str) -> Vec<FileInfo> {
	let mut out = Vec::new();
	let mut current_path: Option<String> = None;
	let mut current_size: i64 = 0;
	let mut current_is_dir = false;
	let mut current_mtime = String::new();
	let mut seen_first_path = false;

	let mut flush = |path: &mut Option<String>, size: i64, is_dir: bool, mtime: &str, out: &mut Vec<FileInfo>| {
		if let Some(p) = path.take() {
			if !p.is_empty() {
				let kind = if is_dir { EntryKind::Dir } else { EntryKind::File };
				let when = parse_slt_datetime(mtime);
				out.push(member(container, p, size, when, kind, "7z"));
			}
		}
	};

	for line in output.lines() {
		let line = line.trim();
		if line.is_empty() {
			if seen_first_path {
				flush(&mut current_path, current_size, current_is_dir, &current_mtime, &mut out);
			}
			current_size = 0;
			current_is_dir = false;
			current_mtime.clear();
			continue;
		}

		let Some((key, value)) = line.split_once(" = ") else { continue };
		match key.trim() {
			"Path" => {
				if seen_first_path {
					flush(&mut current_path, current_size, current_is_dir, &current_mtime, &mut out);
					current_size = 0;
					current_is_dir = false;
					current_mtime.clear();
				}
				seen_first_path = true;
				current_path = Some(value.trim().replace('\\', "/"));
			}
			"Size" => current_size = value.trim().parse().unwrap_or(0),
			"Folder" => current_is_dir = value.trim() == "+",
			"Modified" => current_mtime = value.trim().to_string(),
			_ => {}
		}
	}
	flush(&mut current_path, current_size, current_is_dir, &current_mtime, &mut out);

	// The first block in `-slt` output describes the archive file itself,
	// not a member.
	if !out.is_empty() {
		out.remove(0);
	}
	out
}

fn parse_slt_datetime(s: &str) -> chrono::DateTime<chrono::Local> {
	NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
		.map(|dt| local_from_unix(dt.and_utc().timestamp()))
		.unwrap_or_else(|_| local_from_unix(0))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_slt_blocks() {
		let sample = "\
Path = archive.7z
Type = 7z

----------
Path = dir
Folder = +
Size = 0
Modified = 2024-01-15 10:30:22

Path = dir/file.txt
Size = 42
Modified = 2024-01-15 10:31:00
";
		let entries = parse_slt(sample, "archive.7z");
		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].path, "dir");
		assert_eq!(entries[0].kind, EntryKind::Dir);
		assert_eq!(entries[1].path, "dir/file.txt");
		assert_eq!(entries[1].size, 42);
	}
}
