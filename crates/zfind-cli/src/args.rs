//! Command-line surface: one flat [`Args`] struct, doc comments becoming
//! `--help` text, following the teacher's `#[derive(Parser)]` convention.

use std::path::PathBuf;

use clap::Parser;

/// Search for files, including inside tar, zip, 7z and rar archives.
///
/// zfind makes finding files easy with a filter syntax that is similar to
/// an SQL-WHERE clause. Run `zfind -H` for filter syntax help.
#[derive(Debug, Clone, Parser)]
#[command(name = "zfind", version, about, long_about = None)]
pub struct Args {
	/// The filter expression (sql-where syntax, see `-H`).
	///
	/// Omitted or given as `-`, this defaults to `1`, matching everything.
	#[arg(value_name = "where")]
	pub filter: Option<String>,

	/// Paths to search. Defaults to the current directory if none are given.
	#[arg(value_name = "path")]
	pub paths: Vec<PathBuf>,

	/// Show where-filter help and exit.
	#[arg(short = 'H', long = "help-filter")]
	pub filter_help: bool,

	/// Show long listing: modified date/time, size, path.
	#[arg(short = 'l', long = "long")]
	pub long: bool,

	/// Show listing as CSV, with a header row naming each field.
	#[arg(long = "csv")]
	pub csv: bool,

	/// Used with `--csv`: omit the header row.
	#[arg(long = "csv-no-head", requires = "csv")]
	pub csv_no_head: bool,

	/// Follow symbolic links.
	#[arg(short = 'L', long = "follow-symlinks")]
	pub follow_symlinks: bool,

	/// Don't look inside archives (tar, zip, 7z, rar).
	#[arg(short = 'n', long = "no-archive")]
	pub no_archive: bool,

	/// Separate output records with NUL instead of a newline.
	#[arg(short = '0', long = "print0")]
	pub nul_separated: bool,

	/// Separator joining a container's path and a member's path within it.
	#[arg(long = "archive-separator", default_value = "//", value_name = "S")]
	pub archive_separator: String,

	/// Increase logging verbosity; repeatable (`-v`, `-vv`, `-vvv`).
	#[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
	pub verbose: u8,
}

impl Args {
	/// The effective filter source: the given expression, or `1` if omitted
	/// or given as `-` (spec §6.1).
	#[must_use]
	pub fn effective_filter(&self) -> &str {
		match self.filter.as_deref() {
			None | Some("-") => "1",
			Some(expr) => expr,
		}
	}

	/// The effective search roots: the given paths, or `.` if none were given.
	#[must_use]
	pub fn effective_paths(&self) -> Vec<PathBuf> {
		if self.paths.is_empty() {
			vec![PathBuf::from(".")]
		} else {
			self.paths.clone()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_where_to_match_everything() {
		let args = Args::parse_from(["zfind"]);
		assert_eq!(args.effective_filter(), "1");
		assert_eq!(args.effective_paths(), vec![PathBuf::from(".")]);
	}

	#[test]
	fn dash_also_defaults_the_filter() {
		let args = Args::parse_from(["zfind", "-"]);
		assert_eq!(args.effective_filter(), "1");
	}

	#[test]
	fn explicit_filter_and_paths_are_kept() {
		let args = Args::parse_from(["zfind", "size<10K", "a", "b"]);
		assert_eq!(args.effective_filter(), "size<10K");
		assert_eq!(args.effective_paths(), vec![PathBuf::from("a"), PathBuf::from("b")]);
	}

	#[test]
	fn csv_no_head_requires_csv() {
		assert!(Args::try_parse_from(["zfind", "--csv-no-head"]).is_err());
		assert!(Args::try_parse_from(["zfind", "--csv", "--csv-no-head"]).is_ok());
	}
}
