//! Channel-based producer/consumer glue bridging the walker to a caller's
//! formatter.
//!
//! One producer thread walks every root sequentially, writing matches into
//! an unbuffered (`sync_channel(0)`) rendezvous channel and per-record
//! errors into a second one; it closes both by simply finishing once the
//! last root has been walked (the `SyncSender` drops with the thread).
//! [`run`] spawns that thread and hands back the two receiving ends plus a
//! `JoinHandle`, matching spec §5's "single producer, single consumer...
//! with parallel threads": the consumer and the error reporter are the
//! caller's concern (`zfind-cli` spawns one thread per each and joins all
//! three), since formatting is explicitly outside this crate's scope.

use std::path::PathBuf;
use std::sync::mpsc::{sync_channel, Receiver};
use std::thread::{self, JoinHandle};

use crate::error::Error;
use crate::file_info::FileInfo;
use crate::filter::Filter;
use crate::walker::{self, WalkOptions};

/// The receiving ends of a running walk, plus the producer thread's handle.
pub struct Pipeline {
	/// Rendezvous channel of accepted records, filesystem and archive alike.
	pub matches: Receiver<FileInfo>,
	/// Rendezvous channel of per-record errors (unknown variables, type
	/// mismatches, I/O and decode failures).
	pub errors: Receiver<Error>,
	/// The producer thread's handle. Public so a caller that moves `matches`
	/// and `errors` into separate consumer threads (a partial move of this
	/// struct) can still join the producer afterwards.
	pub producer: JoinHandle<()>,
}

impl Pipeline {
	/// Block until the producer has walked every root. Both channels are
	/// already exhausted by the time this returns, since their senders were
	/// owned by the producer thread and drop with it.
	///
	/// # Panics
	///
	/// Panics if the producer thread itself panicked.
	pub fn join(self) {
		self.producer.join().expect("walker thread panicked");
	}
}

/// Spawn the producer thread that walks every root in `roots` sequentially,
/// in argument order, streaming matches and errors through rendezvous
/// channels.
#[must_use]
pub fn run(roots: Vec<PathBuf>, filter: Filter, options: WalkOptions) -> Pipeline {
	let (matches_tx, matches_rx) = sync_channel(0);
	let (errors_tx, errors_rx) = sync_channel(0);

	let producer = thread::spawn(move || {
		for root in roots {
			walker::walk(
				&root,
				options,
				&filter,
				&mut |fi| {
					let _ = matches_tx.send(fi);
				},
				&mut |err| {
					let _ = errors_tx.send(err);
				},
			);
		}
	});

	Pipeline { matches: matches_rx, errors: errors_rx, producer }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::filter;

	#[test]
	fn streams_matches_and_joins_cleanly() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("a.txt"), b"x").unwrap();

		let filter = filter::compile("1").unwrap();
		let pipeline = run(vec![dir.path().to_path_buf()], filter, WalkOptions::default());

		let mut names = Vec::new();
		while let Ok(fi) = pipeline.matches.recv() {
			names.push(fi.name);
		}
		while pipeline.errors.recv().is_ok() {}

		pipeline.join();
		assert!(names.contains(&"a.txt".to_string()));
	}
}
