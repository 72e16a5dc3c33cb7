use anyhow::Result;
use log::{debug, trace, warn};
use rayon::prelude::*;
use std::{
    collections::{HashSet, VecDeque},
    path::{Path, PathBuf},
};

use pyconcat_core::{ConcatError, ResolveCache, imports_for, resolve_declaration};

use crate::types::{DependencyWalk, SkippedFile};

/// Find every local file reachable from `entries` through imports.
///
/// `root` must be canonical. The worklist is processed in frontiers: all
/// queued files are parsed and resolved in parallel, then their results are
/// merged into the dependency set in queue order on this thread. A file is
/// queued only when it is first inserted into the set, so each file is parsed
/// exactly once and import cycles terminate.
///
/// Files that cannot be read or parsed stay in the result but contribute no
/// imports; they are reported in [`DependencyWalk::skipped`].
pub fn walk(entries: &[PathBuf], root: &Path, cache: &ResolveCache) -> Result<DependencyWalk> {
    let mut found: HashSet<PathBuf> = HashSet::new();
    let mut entry_paths: Vec<PathBuf> = Vec::new();
    let mut worklist: VecDeque<PathBuf> = VecDeque::new();

    for entry in entries {
        let canonical = entry
            .canonicalize()
            .map_err(|_| ConcatError::MissingEntry { path: entry.clone() })?;
        if found.insert(canonical.clone()) {
            entry_paths.push(canonical.clone());
            worklist.push_back(canonical);
        } else {
            debug!("Ignoring repeated entry file: {}", entry.display());
        }
    }

    let mut files_parsed = 0;
    let mut skipped = Vec::new();

    while !worklist.is_empty() {
        let frontier: Vec<PathBuf> = worklist.drain(..).collect();
        trace!("Processing frontier of {} files", frontier.len());

        let outcomes: Vec<pyconcat_core::Result<Vec<PathBuf>>> =
            frontier.par_iter().map(|file| local_imports(root, file, cache)).collect();

        for (file, outcome) in frontier.into_iter().zip(outcomes) {
            files_parsed += 1;
            match outcome {
                Ok(deps) => {
                    for dep in deps {
                        if found.insert(dep.clone()) {
                            trace!("Adding to worklist: {}", dep.display());
                            worklist.push_back(dep);
                        }
                    }
                }
                Err(e) if e.is_recoverable() => {
                    warn!("Could not read or parse '{}'. Skipping. Error: {}", file.display(), e);
                    skipped.push(SkippedFile { path: file, reason: e.to_string() });
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    debug!("Found {} files from {} entries", found.len(), entry_paths.len());
    let entry_count = entry_paths.len();
    let files = order_files(entry_paths, found);
    Ok(DependencyWalk { files, entry_count, files_parsed, skipped })
}

/// Resolved local dependencies of one file, in import order
fn local_imports(
    root: &Path,
    file: &Path,
    cache: &ResolveCache,
) -> pyconcat_core::Result<Vec<PathBuf>> {
    let decls = imports_for(file)?;
    Ok(decls.iter().filter_map(|decl| resolve_declaration(root, file, decl, cache)).collect())
}

/// Entries first in their given order, everything else sorted by path string.
fn order_files(entries: Vec<PathBuf>, found: HashSet<PathBuf>) -> Vec<PathBuf> {
    let entry_set: HashSet<&PathBuf> = entries.iter().collect();
    let mut others: Vec<PathBuf> = found.into_iter().filter(|p| !entry_set.contains(p)).collect();
    others.sort_by_cached_key(|p| p.to_string_lossy().to_string());

    let mut files = entries;
    files.extend(others);
    files
}
