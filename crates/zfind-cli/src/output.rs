//! Output formatters: plain, long listing, CSV, NUL-separated.
//!
//! Kept out of `zfind`'s library crate per spec §1 ("deliberately out of
//! scope: output formatters... these consume the match stream").

use std::io::{self, Write};

use csv::WriterBuilder;
use zfind::file_info::CSV_FIELDS;
use zfind::size::format_size;
use zfind::FileInfo;

/// How a matched record is rendered to stdout.
#[derive(Debug, Clone, Copy)]
pub enum Format {
	/// One combined path per record.
	Plain,
	/// `date time   size  path`, aligned.
	Long,
	/// CSV with the `Fields` manifest as its header (unless suppressed).
	Csv { header: bool },
}

/// A line/record writer that separates records with `\n` or `\0` per `-0`.
pub struct Printer<W: Write> {
	out: W,
	format: Format,
	archive_separator: String,
	nul_separated: bool,
	csv_writer: Option<csv::Writer<Vec<u8>>>,
}

impl<W: Write> Printer<W> {
	#[must_use]
	pub fn new(out: W, format: Format, archive_separator: String, nul_separated: bool) -> Self {
		let csv_writer = match format {
			Format::Csv { header } => {
				let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
				if header {
					writer.write_record(CSV_FIELDS).expect("in-memory CSV write cannot fail");
				}
				Some(writer)
			}
			_ => None,
		};
		Self { out, format, archive_separator, nul_separated, csv_writer }
	}

	/// Render one matched record.
	///
	/// # Errors
	///
	/// Returns an error if writing to the underlying writer fails.
	pub fn print(&mut self, file: &FileInfo) -> io::Result<()> {
		match self.format {
			Format::Plain => self.write_line(&file.virtual_path(&self.archive_separator)),
			Format::Long => {
				let size = format_size(file.size);
				let line = format!(
					"{} {:>10} {}",
					file.mod_time.format("%Y-%m-%d %H:%M:%S"),
					size,
					file.virtual_path(&self.archive_separator)
				);
				self.write_line(&line)
			}
			Format::Csv { .. } => {
				let writer = self.csv_writer.as_mut().expect("csv_writer set for Format::Csv");
				let record = csv_record(file);
				writer.write_record(&record).map_err(io::Error::other)?;
				writer.flush()?;
				let bytes = std::mem::take(writer.get_mut());
				self.out.write_all(&bytes)
			}
		}
	}

	fn write_line(&mut self, line: &str) -> io::Result<()> {
		self.out.write_all(line.as_bytes())?;
		self.out.write_all(if self.nul_separated { b"\0" } else { b"\n" })
	}

	/// Flush the underlying writer.
	///
	/// # Errors
	///
	/// Returns an error if the flush fails.
	pub fn finish(&mut self) -> io::Result<()> {
		self.out.flush()
	}
}

fn csv_record(file: &FileInfo) -> Vec<String> {
	vec![
		file.name.clone(),
		file.path.clone(),
		file.container.clone(),
		file.size.to_string(),
		file.mod_time.format("%Y-%m-%d").to_string(),
		file.mod_time.format("%H:%M:%S").to_string(),
		file.ext(),
		file.ext2(),
		file.kind.to_string(),
		file.archive.clone(),
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Local;
	use zfind::file_info::EntryKind;

	fn sample() -> FileInfo {
		FileInfo {
			name: "foo.txt".into(),
			path: "a/foo.txt".into(),
			container: String::new(),
			archive: String::new(),
			size: 1024,
			mod_time: Local::now(),
			kind: EntryKind::File,
		}
	}

	#[test]
	fn plain_format_prints_virtual_path() {
		let mut buf = Vec::new();
		let mut printer = Printer::new(&mut buf, Format::Plain, "//".into(), false);
		printer.print(&sample()).unwrap();
		assert_eq!(String::from_utf8(buf).unwrap(), "a/foo.txt\n");
	}

	#[test]
	fn nul_separated_uses_nul_not_newline() {
		let mut buf = Vec::new();
		let mut printer = Printer::new(&mut buf, Format::Plain, "//".into(), true);
		printer.print(&sample()).unwrap();
		assert_eq!(buf.last(), Some(&0u8));
	}

	#[test]
	fn csv_format_writes_header_then_record() {
		let mut buf = Vec::new();
		let mut printer = Printer::new(&mut buf, Format::Csv { header: true }, "//".into(), false);
		printer.print(&sample()).unwrap();
		let text = String::from_utf8(buf).unwrap();
		let mut lines = text.lines();
		assert_eq!(lines.next().unwrap(), "name,path,container,size,date,time,ext,ext2,type,archive");
		assert!(lines.next().unwrap().starts_with("foo.txt,a/foo.txt,,1024,"));
	}
}
