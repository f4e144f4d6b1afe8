//! Archive-aware depth-first walker.
//!
//! Traversal uses an explicit work-stack rather than recursion (deep trees
//! would otherwise risk a stack overflow), in the same shape as
//! `DirTourist` in the teacher's ignore-file discovery: a `Vec` of pending
//! entries, popped one at a time, with a directory's children pushed back
//! on top before the loop continues. Because entries are pushed in reverse
//! sorted order, popping still visits children ascending and fully drains
//! one subtree before moving to the next sibling.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{trace, trace_span};

use crate::archive;
use crate::error::Error;
use crate::file_info::{EntryKind, FileInfo};
use crate::filter::Filter;

/// Options governing a single [`walk`] call.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
	/// Resolve symlinks and descend into their targets, relabeling them `dir`.
	pub follow_symlinks: bool,
	/// Skip archive expansion entirely; archives are then reported as plain files.
	pub no_archive: bool,
}

struct WorkItem {
	/// The path to actually `stat`/`read_dir`.
	phys_path: PathBuf,
	/// The path reported to the user; unaffected by symlink resolution.
	virt_path: String,
}

/// Walk `root`, filter-testing every real entry and expanding recognized
/// archives into their member list per `findIn` (spec §4.H).
///
/// `on_match` is called for every record (real or archive member) the
/// filter accepts; `on_error` is called for every per-record failure.
/// Neither callback aborts the walk — a bad entry or archive is skipped and
/// traversal continues with its siblings.
pub fn walk(
	root: &Path,
	options: WalkOptions,
	filter: &Filter,
	on_match: &mut dyn FnMut(FileInfo),
	on_error: &mut dyn FnMut(Error),
) {
	let mut stack = vec![WorkItem { phys_path: root.to_path_buf(), virt_path: root.to_string_lossy().into_owned() }];

	while let Some(item) = stack.pop() {
		let _span = trace_span!("walk_entry", path = %item.virt_path).entered();
		visit(item, options, filter, &mut stack, on_match, on_error);
	}
}

fn visit(
	item: WorkItem,
	options: WalkOptions,
	filter: &Filter,
	stack: &mut Vec<WorkItem>,
	on_match: &mut dyn FnMut(FileInfo),
	on_error: &mut dyn FnMut(Error),
) {
	let meta = match fs::symlink_metadata(&item.phys_path) {
		Ok(meta) => meta,
		Err(e) => {
			on_error(Error::find(&item.phys_path, e));
			return;
		}
	};

	let name = entry_name(&item);
	let file_type = meta.file_type();

	if file_type.is_dir() {
		let fi = build_file_info(&item, &name, &meta, EntryKind::Dir);
		find_in(&fi, &item.phys_path, filter, options, on_match, on_error);
		descend(&item.phys_path, &item.virt_path, stack, on_error);
	} else if file_type.is_symlink() && options.follow_symlinks {
		match fs::canonicalize(&item.phys_path) {
			Ok(real) => {
				let fi = build_file_info(&item, &name, &meta, EntryKind::Dir);
				find_in(&fi, &item.phys_path, filter, options, on_match, on_error);
				descend(&real, &item.virt_path, stack, on_error);
			}
			Err(e) => on_error(Error::find(&item.phys_path, e)),
		}
	} else {
		let kind = if file_type.is_symlink() { EntryKind::Link } else { EntryKind::File };
		let fi = build_file_info(&item, &name, &meta, kind);
		find_in(&fi, &item.phys_path, filter, options, on_match, on_error);
	}
}

/// Test `fi` against the filter, emitting on a match; on success, if `fi` is
/// an archive and archive expansion is enabled, list and filter-test its
/// members too (spec §4.H).
fn find_in(
	fi: &FileInfo,
	phys_path: &Path,
	filter: &Filter,
	options: WalkOptions,
	on_match: &mut dyn FnMut(FileInfo),
	on_error: &mut dyn FnMut(Error),
) {
	match filter.test(fi) {
		Ok(true) => on_match(fi.clone()),
		Ok(false) => {}
		Err(e) => {
			on_error(e);
			return;
		}
	}

	if fi.kind == EntryKind::Dir || options.no_archive {
		return;
	}

	let Some(kind) = archive::classify(&fi.name) else { return };

	trace!(archive = kind.as_str(), path = %fi.path, "expanding archive");
	let members = match archive::list(phys_path, kind) {
		Ok(members) => members,
		Err(e) => {
			on_error(e);
			return;
		}
	};

	for member in members {
		match filter.test(&member) {
			Ok(true) => on_match(member),
			Ok(false) => {}
			Err(e) => on_error(e),
		}
	}
}

fn descend(dir: &Path, virt_path: &str, stack: &mut Vec<WorkItem>, on_error: &mut dyn FnMut(Error)) {
	let entries = match fs::read_dir(dir) {
		Ok(entries) => entries,
		Err(e) => {
			on_error(Error::find(dir, e));
			return;
		}
	};

	let mut names = Vec::new();
	for entry in entries {
		match entry {
			Ok(entry) => names.push(entry.file_name()),
			Err(e) => on_error(Error::find(dir, e)),
		}
	}
	names.sort();

	for name in names.into_iter().rev() {
		let name = name.to_string_lossy().into_owned();
		stack.push(WorkItem { phys_path: dir.join(&name), virt_path: virt_join(virt_path, &name) });
	}
}

/// Join a virtual path and a child name, collapsing a bare `.` root the way
/// `filepath.Join` would, so the default root doesn't leak a `./` prefix
/// into every reported path.
fn virt_join(base: &str, name: &str) -> String {
	if base == "." {
		name.to_string()
	} else {
		format!("{base}/{name}")
	}
}

fn entry_name(item: &WorkItem) -> String {
	item.phys_path.file_name().map_or_else(|| item.virt_path.clone(), |n| n.to_string_lossy().into_owned())
}

fn build_file_info(item: &WorkItem, name: &str, meta: &fs::Metadata, kind: EntryKind) -> FileInfo {
	let mod_time = meta.modified().map(DateTime::<Local>::from).unwrap_or_else(|_| Local::now());
	FileInfo {
		name: name.to_string(),
		path: item.virt_path.clone(),
		container: String::new(),
		archive: String::new(),
		size: meta.len() as i64,
		mod_time,
		kind,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::filter;

	/// Pretty, span-scoped tracing output for `cargo test -- --nocapture`,
	/// matching the teacher's `tests/helpers/mod.rs::tracing_init`.
	fn tracing_init() {
		use tracing_subscriber::fmt::{format::FmtSpan, Subscriber};
		use tracing_subscriber::util::SubscriberInitExt;
		use tracing_subscriber::EnvFilter;
		Subscriber::builder()
			.pretty()
			.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
			.with_env_filter(EnvFilter::from_default_env())
			.finish()
			.try_init()
			.ok();
	}

	#[test]
	fn visits_siblings_in_sorted_order() {
		tracing_init();
		let dir = tempfile::tempdir().unwrap();
		for name in ["b.txt", "a.txt", "c.txt"] {
			std::fs::write(dir.path().join(name), b"x").unwrap();
		}

		let filter = filter::compile("1").unwrap();
		let mut names = Vec::new();
		let mut on_match = |fi: FileInfo| names.push(fi.name);
		let mut on_error = |_: Error| panic!("unexpected error");
		walk(dir.path(), WalkOptions::default(), &filter, &mut on_match, &mut on_error);

		// First match is the root directory itself, then its children ascending.
		assert_eq!(names[0], dir.path().file_name().unwrap().to_string_lossy());
		assert_eq!(&names[1..], ["a.txt", "b.txt", "c.txt"]);
	}

	#[test]
	fn filter_rejects_entries_and_reports_no_error_for_false() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("keep.txt"), b"x").unwrap();
		std::fs::write(dir.path().join("skip.md"), b"x").unwrap();

		let filter = filter::compile("ext = 'txt'").unwrap();
		let mut names = Vec::new();
		let mut on_match = |fi: FileInfo| names.push(fi.name);
		let mut on_error = |_: Error| panic!("unexpected error");
		walk(dir.path(), WalkOptions::default(), &filter, &mut on_match, &mut on_error);

		assert!(names.contains(&"keep.txt".to_string()));
		assert!(!names.contains(&"skip.md".to_string()));
	}

	#[test]
	fn unreadable_entry_is_reported_without_aborting_the_walk() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("real.txt"), b"x").unwrap();

		let filter = filter::compile("1").unwrap();
		let mut names = Vec::new();
		let mut errors = Vec::new();
		let mut on_match = |fi: FileInfo| names.push(fi.name);
		let mut on_error = |e: Error| errors.push(e);
		walk(dir.path(), WalkOptions::default(), &filter, &mut on_match, &mut on_error);

		assert!(errors.is_empty());
		assert!(names.contains(&"real.txt".to_string()));
	}
}
