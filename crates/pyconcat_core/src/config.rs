use log::{debug, trace};
use path_clean::clean;
use std::path::{Path, PathBuf};

use crate::{
    constants::ARTIFACT_SUFFIX,
    error::{ConcatError, Result},
};

/// Check that `root` is an existing directory and return its canonical form.
pub fn validate_root(root: &Path) -> Result<PathBuf> {
    debug!("Validating project root: {:?}", root);
    if !root.is_dir() {
        return Err(ConcatError::InvalidRoot { path: root.to_path_buf() });
    }
    root.canonicalize().map_err(|source| ConcatError::Read { path: root.to_path_buf(), source })
}

/// Check that every entry exists as a regular file. Reports the first
/// offender in argument order.
pub fn validate_entries(entries: &[PathBuf]) -> Result<()> {
    for entry in entries {
        trace!("Validating entry file: {:?}", entry);
        if !entry.is_file() {
            return Err(ConcatError::MissingEntry { path: entry.clone() });
        }
    }
    debug!("All {} entry files exist", entries.len());
    Ok(())
}

/// Default artifact file name: `<root name>_concatenated.txt`.
///
/// The name is taken from the root argument as typed (after cleaning), so a
/// symlinked root keeps the name the user knows it by. Arguments with no
/// final name component such as `.` fall back to the canonical root.
pub fn artifact_name(root_arg: &Path, canonical_root: &Path) -> String {
    let cleaned = clean(root_arg);
    let base = cleaned
        .file_name()
        .or_else(|| canonical_root.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string());
    format!("{}{}", base, ARTIFACT_SUFFIX)
}
