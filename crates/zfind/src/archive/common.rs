//! Small helpers shared by the archive listers.

use chrono::{DateTime, Local, TimeZone};

use crate::file_info::FileInfo;

/// The basename of a `/`-separated archive member path.
#[must_use]
pub fn basename(path: &str) -> String {
	path.trim_end_matches('/').rsplit('/').next().unwrap_or(path).to_string()
}

/// Convert a Unix timestamp (seconds since epoch) to a local datetime,
/// falling back to the epoch itself for out-of-range values.
#[must_use]
pub fn local_from_unix(secs: i64) -> DateTime<Local> {
	Local.timestamp_opt(secs, 0).single().unwrap_or_else(|| Local.timestamp_opt(0, 0).single().expect("epoch is representable"))
}

/// `true` if a zip/7z-style member path designates a directory (trailing
/// `/`), with that slash stripped from the returned path.
#[must_use]
pub fn strip_trailing_slash(path: &str) -> (String, bool) {
	path.strip_suffix('/').map_or_else(|| (path.to_string(), false), |stripped| (stripped.to_string(), true))
}

pub fn member(
	container: &str,
	path: String,
	size: i64,
	mod_time: DateTime<Local>,
	kind: crate::file_info::EntryKind,
	archive: &'static str,
) -> FileInfo {
	FileInfo {
		name: basename(&path),
		path,
		container: container.to_string(),
		archive: archive.to_string(),
		size,
		mod_time,
		kind,
	}
}
