//! The tar family: `.tar`, and gzip/bzip2/xz-compressed variants selected by
//! filename suffix.
//!
//! Grounded in the `tar` + `flate2`/`bzip2`/`xz2` combination the corpus uses
//! for streaming tar decoding (e.g. `paketkoll`, `tar-rs`): one streaming
//! reader chosen up front, wrapped so its lifetime ends before the file
//! handle's.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ::tar::{Archive, EntryType};
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use xz2::read::XzDecoder;

use crate::error::Error;
use crate::file_info::{EntryKind, FileInfo};

use super::common::{local_from_unix, member};

pub fn list(path: &Path) -> Result<Vec<FileInfo>, Error> {
	let container = path.display().to_string();
	let file = File::open(path).map_err(|e| Error::find(path, e))?;
	let name = path.to_string_lossy().to_ascii_lowercase();

	let reader: Box<dyn Read> = if name.ends_with(".gz") || name.ends_with(".tgz") {
		Box::new(GzDecoder::new(file))
	} else if name.ends_with(".bz2") || name.ends_with(".tbz2") {
		Box::new(BzDecoder::new(file))
	} else if name.ends_with(".xz") || name.ends_with(".txz") {
		Box::new(XzDecoder::new(file))
	} else {
		Box::new(file)
	};

	let mut archive = Archive::new(reader);
	let mut out = Vec::new();
	for entry in archive.entries().map_err(|e| Error::find(path, e))? {
		let entry = entry.map_err(|e| Error::find(path, e))?;
		let header = entry.header();

		let kind = match header.entry_type() {
			EntryType::Regular => EntryKind::File,
			EntryType::Directory => EntryKind::Dir,
			EntryType::Symlink => EntryKind::Link,
			_ => continue,
		};

		let member_path = entry.path().map_err(|e| Error::find(path, e))?.to_string_lossy().replace('\\', "/");
		let size = header.size().map_err(|e| Error::find(path, e))? as i64;
		let mtime = header.mtime().map_err(|e| Error::find(path, e))? as i64;

		out.push(member(&container, member_path, size, local_from_unix(mtime), kind, "tar"));
	}

	Ok(out)
}
