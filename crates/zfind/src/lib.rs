//! zfind: an archive-aware file finder with an SQL-WHERE-like filter language.
//!
//! This crate is the engine behind the `zfind` CLI. It has no argument parsing or
//! output-formatting concerns of its own; it exposes:
//!
//! - a small filter language (lexer, parser, AST, evaluator) over [`Value`]s,
//! - a [`FileInfo`] record shared by real filesystem entries and archive members,
//! - archive listers for the tar family, zip, 7z and rar,
//! - a [`walker`] that streams matches and errors across a bounded channel pair.
//!
//! ```no_run
//! use zfind::filter;
//! use zfind::pipeline;
//! use zfind::walker::WalkOptions;
//!
//! let expr = filter::compile("size < 10K and name like \"%.rs\"").unwrap();
//! let pipeline = pipeline::run(vec![".".into()], expr, WalkOptions::default());
//! while let Ok(file) = pipeline.matches.recv() {
//!     println!("{}", file.virtual_path("//"));
//! }
//! while let Ok(err) = pipeline.errors.recv() {
//!     eprintln!("{err}");
//! }
//! pipeline.join();
//! ```

#![warn(clippy::unwrap_used)]
#![deny(rust_2018_idioms)]

pub mod archive;
pub mod error;
pub mod eval;
pub mod file_info;
pub mod filter;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod size;
pub mod value;
pub mod walker;

#[doc(inline)]
pub use crate::{error::Error, file_info::FileInfo, value::Value};
