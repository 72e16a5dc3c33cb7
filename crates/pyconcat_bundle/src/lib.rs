//! Dependency bundling for Python projects.
//!
//! Starting from one or more entry scripts, this crate follows import
//! statements to every local module inside a project root and concatenates
//! the files into a single text artifact, entry scripts first.
//!
//! # Examples
//!
//! ```no_run
//! use pyconcat_bundle::{Config, run_bundle};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     root: std::path::PathBuf::from("/path/to/project"),
//!     entries: vec![std::path::PathBuf::from("/path/to/project/main.py")],
//!     output: None,
//!     json: false,
//! };
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! let report = run_bundle(&cfg, &mut stdout)?;
//! stdout.flush()?;
//! println!("{} files", report.files.len());
//! # Ok(())
//! # }
//! ```

mod bundler;
mod config;
mod emitter;
mod graph;
mod reporter;
mod types;

// Re-export public API
pub use bundler::run_bundle;
pub use config::Config;
pub use emitter::{create_artifact, write_artifact};
pub use graph::walk;
pub use types::{BundleReport, DependencyWalk, EmitSummary, SkippedFile};
