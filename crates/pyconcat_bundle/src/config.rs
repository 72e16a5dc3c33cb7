use clap::Parser;
use std::path::{Path, PathBuf};

use pyconcat_core::artifact_name;

#[derive(Debug, Clone, Parser)]
#[command(name = "pyconcat")]
#[command(
    about = "Concatenate Python script(s) and all their local dependencies into a single text file",
    long_about = "Concatenate Python script(s) and all their local dependencies into a single text file.\n\
                  Modules imported by the scripts are searched for recursively inside the project root.",
    after_help = "Example:\n  pyconcat project_root/ project_root/src/main.py"
)]
pub struct Config {
    /// The top-level project root folder to search for dependencies
    pub root: PathBuf,

    /// One or more Python scripts to start the search from
    #[arg(required = true, num_args = 1..)]
    pub entries: Vec<PathBuf>,

    /// Write the artifact to this path instead of <root name>_concatenated.txt
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a JSON report on stdout instead of progress messages
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Where the artifact is written. Defaults to the current directory.
    pub fn output_path(&self, canonical_root: &Path) -> PathBuf {
        match &self.output {
            Some(p) => p.clone(),
            None => PathBuf::from(artifact_name(&self.root, canonical_root)),
        }
    }
}
