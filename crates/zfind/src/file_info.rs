//! [`FileInfo`]: the record shared by real filesystem entries and archive
//! members, and its field getter used by the filter evaluator.

use std::fmt;

use chrono::{DateTime, Datelike, Local, NaiveDate, Weekday};

use crate::eval::VariableGetter;
use crate::value::Value;

/// What kind of thing a [`FileInfo`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
	File,
	Dir,
	Link,
}

impl EntryKind {
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::File => "file",
			Self::Dir => "dir",
			Self::Link => "link",
		}
	}
}

impl fmt::Display for EntryKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A real filesystem entry, or a member listed inside an archive.
///
/// `container` is empty for real filesystem entries; `archive` is empty iff
/// `container` is (see the archive/container invariant in `SPEC_FULL.md` §8).
#[derive(Debug, Clone)]
pub struct FileInfo {
	/// Basename.
	pub name: String,
	/// Path relative to the walk root, or path within the archive for members.
	/// Stored with forward-slash separators as produced by the walker or by
	/// archive listers.
	pub path: String,
	/// The filesystem path of the enclosing archive, empty for real entries.
	pub container: String,
	/// `tar|zip|7z|rar`, empty for real entries.
	pub archive: String,
	/// Uncompressed size in bytes.
	pub size: i64,
	/// Modification timestamp.
	pub mod_time: DateTime<Local>,
	pub kind: EntryKind,
}

impl FileInfo {
	#[must_use]
	pub fn is_container_member(&self) -> bool {
		!self.container.is_empty()
	}

	/// The combined path reported to the user: `container<sep>path` for
	/// archive members, or just `path` for real filesystem entries.
	#[must_use]
	pub fn virtual_path(&self, archive_separator: &str) -> String {
		if self.container.is_empty() {
			self.path.clone()
		} else {
			format!("{}{archive_separator}{}", self.container, self.path)
		}
	}

	/// The short extension: characters after the last `.` in `name`, or `""`.
	#[must_use]
	pub fn ext(&self) -> String {
		ext_of(&self.name)
	}

	/// The long extension: the last two `.`-separated suffixes of `name`
	/// (e.g. `tar.gz`), or `""` if `name` has fewer than two dots.
	#[must_use]
	pub fn ext2(&self) -> String {
		ext2_of(&self.name)
	}
}

impl VariableGetter for FileInfo {
	fn get(&self, name: &str) -> Option<Value> {
		Some(match name.to_ascii_lowercase().as_str() {
			"name" => Value::Text(self.name.clone()),
			"path" => Value::Text(self.path.clone()),
			"container" => Value::Text(self.container.clone()),
			"archive" => Value::Text(self.archive.clone()),
			"type" => Value::Text(self.kind.as_str().to_string()),
			"size" => Value::Int(self.size),
			"date" => Value::Text(self.mod_time.format("%Y-%m-%d").to_string()),
			"time" => Value::Text(self.mod_time.format("%H:%M:%S").to_string()),
			"ext" => Value::Text(self.ext()),
			"ext2" => Value::Text(self.ext2()),
			"today" => Value::Text(today().format("%Y-%m-%d").to_string()),
			"mo" => Value::Text(last_weekday(Weekday::Mon).format("%Y-%m-%d").to_string()),
			"tu" => Value::Text(last_weekday(Weekday::Tue).format("%Y-%m-%d").to_string()),
			"we" => Value::Text(last_weekday(Weekday::Wed).format("%Y-%m-%d").to_string()),
			"th" => Value::Text(last_weekday(Weekday::Thu).format("%Y-%m-%d").to_string()),
			"fr" => Value::Text(last_weekday(Weekday::Fri).format("%Y-%m-%d").to_string()),
			"sa" => Value::Text(last_weekday(Weekday::Sat).format("%Y-%m-%d").to_string()),
			"su" => Value::Text(last_weekday(Weekday::Sun).format("%Y-%m-%d").to_string()),
			_ => return None,
		})
	}
}

/// The CSV field manifest, in the order the `--csv` formatter writes them.
pub const CSV_FIELDS: [&str; 10] =
	["name", "path", "container", "size", "date", "time", "ext", "ext2", "type", "archive"];

fn ext_of(name: &str) -> String {
	name.rfind('.').map_or_else(String::new, |i| name[i + 1..].to_string())
}

fn ext2_of(name: &str) -> String {
	let bytes = name.as_bytes();
	let mut dots = 0;
	for i in (0..bytes.len()).rev() {
		if bytes[i] == b'.' {
			dots += 1;
			if dots == 2 {
				return name[i + 1..].to_string();
			}
		}
	}
	String::new()
}

fn today() -> NaiveDate {
	Local::now().date_naive()
}

/// Date of the most recent occurrence of `target`, strictly on or before
/// today (today itself counts if it is already that weekday).
fn last_weekday(target: Weekday) -> NaiveDate {
	let mut d = today();
	loop {
		if d.weekday() == target {
			return d;
		}
		d = d.pred_opt().expect("NaiveDate underflow is astronomically unlikely");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ext_is_last_suffix() {
		assert_eq!(ext_of("archive.tar.gz"), "gz");
		assert_eq!(ext_of("README"), "");
	}

	#[test]
	fn ext2_needs_two_distinct_dots() {
		assert_eq!(ext2_of("archive.tar.gz"), "tar.gz");
		assert_eq!(ext2_of("foo.txt"), "");
		assert_eq!(ext2_of("foo"), "");
	}

	#[test]
	fn container_archive_invariant_holds_for_fs_entry() {
		let fi = FileInfo {
			name: "foo.txt".into(),
			path: "a/foo.txt".into(),
			container: String::new(),
			archive: String::new(),
			size: 0,
			mod_time: Local::now(),
			kind: EntryKind::File,
		};
		assert_eq!(fi.container.is_empty(), fi.archive.is_empty());
	}

	#[test]
	fn weekday_helper_never_lands_in_the_future() {
		let today = today();
		for wd in [
			Weekday::Mon,
			Weekday::Tue,
			Weekday::Wed,
			Weekday::Thu,
			Weekday::Fri,
			Weekday::Sat,
			Weekday::Sun,
		] {
			assert!(last_weekday(wd) <= today);
		}
	}
}
