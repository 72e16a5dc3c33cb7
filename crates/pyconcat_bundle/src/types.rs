use serde::Serialize;
use std::path::PathBuf;

/// A file kept in the output but not searched for imports.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct DependencyWalk {
    /// Entry files in argument order, then discovered files sorted by path
    pub files: Vec<PathBuf>,
    pub entry_count: usize,
    pub files_parsed: usize,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Clone, Default)]
pub struct EmitSummary {
    pub sections_written: usize,
    pub read_failures: Vec<PathBuf>,
}

/// Outcome of one run, printed with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct BundleReport {
    pub root: String,
    pub entries: Vec<String>,
    /// Labels relative to the root, in artifact order
    pub files: Vec<String>,
    pub output: String,
    pub files_parsed: usize,
    pub warnings: Vec<String>,
}
