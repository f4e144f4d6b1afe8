//! zip archives, read from the central directory without decompressing any
//! payload (only name/size/mtime/dir-ness are needed).

use std::fs::File;
use std::path::Path;

use chrono::{Local, TimeZone};
use ::zip::ZipArchive;

use crate::error::Error;
use crate::file_info::{EntryKind, FileInfo};

use super::common::{member, strip_trailing_slash};

pub fn list(path: &Path) -> Result<Vec<FileInfo>, Error> {
	let container = path.display().to_string();
	let file = File::open(path).map_err(|e| Error::find(path, e))?;
	let mut archive = ZipArchive::new(file).map_err(|e| Error::find(path, e))?;

	let mut out = Vec::with_capacity(archive.len());
	for i in 0..archive.len() {
		let entry = archive.by_index(i).map_err(|e| Error::find(path, e))?;
		let (member_path, is_dir) = strip_trailing_slash(entry.name());
		let kind = if is_dir || entry.is_dir() { EntryKind::Dir } else { EntryKind::File };

		let mod_time = entry
			.last_modified()
			.and_then(|dt| {
				Local
					.with_ymd_and_hms(
						i32::from(dt.year()),
						u32::from(dt.month()),
						u32::from(dt.day()),
						u32::from(dt.hour()),
						u32::from(dt.minute()),
						u32::from(dt.second()),
					)
					.single()
			})
			.unwrap_or_else(|| Local.timestamp_opt(0, 0).single().expect("epoch is representable"));

		out.push(member(&container, member_path, entry.size() as i64, mod_time, kind, "zip"));
	}

	Ok(out)
}
