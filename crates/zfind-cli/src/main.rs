#![deny(rust_2018_idioms)]

use std::io::{self, Write};
use std::process::ExitCode;
use std::thread;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::debug;
use zfind::{filter, pipeline};
use zfind::walker::WalkOptions;

mod args;
mod filter_help;
mod output;

use args::Args;
use filter_help::FILTER_HELP;
use output::{Format, Printer};

fn main() -> Result<ExitCode> {
	let args = Args::parse();
	init_logging(args.verbose);

	if args.filter_help {
		print!("{FILTER_HELP}");
		return Ok(ExitCode::SUCCESS);
	}

	debug!(?args, "starting zfind");

	let expression = filter::compile(args.effective_filter()).into_diagnostic()?;
	let roots = args.effective_paths();
	let options = WalkOptions { follow_symlinks: args.follow_symlinks, no_archive: args.no_archive };

	let format = if args.csv { Format::Csv { header: !args.csv_no_head } } else if args.long { Format::Long } else { Format::Plain };

	let run = pipeline::run(roots, expression, options);
	let matches = run.matches;
	let errors = run.errors;

	let consumer = thread::spawn(move || -> io::Result<()> {
		let stdout = io::stdout();
		let mut printer = Printer::new(stdout.lock(), format, args.archive_separator.clone(), args.nul_separated);
		while let Ok(file) = matches.recv() {
			printer.print(&file)?;
		}
		printer.finish()
	});

	let error_reporter = thread::spawn(move || -> bool {
		let mut saw_error = false;
		let mut stderr = io::stderr();
		while let Ok(err) = errors.recv() {
			saw_error = true;
			let _ = writeln!(stderr, "{err}");
		}
		saw_error
	});

	run.producer.join().expect("walker thread panicked");
	consumer.join().expect("consumer thread panicked").into_diagnostic()?;
	let saw_error = error_reporter.join().expect("error reporter thread panicked");

	Ok(if saw_error { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn init_logging(verbosity: u8) {
	let directive = match verbosity {
		0 => "zfind=warn",
		1 => "zfind=debug",
		_ => "zfind=trace",
	};
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| directive.into()))
		.try_init()
		.ok();
}
