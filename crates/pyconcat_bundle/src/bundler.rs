use anyhow::Result;
use log::{debug, info};
use std::io::Write;

use pyconcat_core::{ResolveCache, relative_label, validate_entries, validate_root};

use crate::{
    config::Config,
    emitter::create_artifact,
    graph::walk,
    reporter::{print_file_list, print_json_report, print_search_header, print_success},
    types::BundleReport,
};

/// Validate inputs, collect the dependency closure and write the artifact.
///
/// Progress goes to `out` unless `cfg.json` is set, in which case only the
/// final [`BundleReport`] is printed. Invalid input fails before anything is
/// written, with a [`pyconcat_core::ConcatError`] as the root cause.
pub fn run_bundle<W: Write>(cfg: &Config, out: &mut W) -> Result<BundleReport> {
    info!("Starting dependency search");

    let root = validate_root(&cfg.root)?;
    validate_entries(&cfg.entries)?;
    info!("Using root directory: {}", root.display());

    if !cfg.json {
        print_search_header(out, &root, &cfg.entries)?;
    }

    let cache = ResolveCache::new();
    let deps = walk(&cfg.entries, &root, &cache)?;
    info!("Found {} files to concatenate", deps.files.len());
    debug!("Resolver cache holds {} entries", cache.len());

    if !cfg.json {
        print_file_list(out, &deps.files, &root)?;
    }

    let output = cfg.output_path(&root);
    let summary = create_artifact(&output, &deps.files, &root)?;

    let mut warnings: Vec<String> = deps
        .skipped
        .iter()
        .map(|s| format!("Could not read or parse '{}': {}", s.path.display(), s.reason))
        .collect();
    warnings.extend(
        summary
            .read_failures
            .iter()
            .map(|p| format!("Could not read '{}' while writing the artifact", p.display())),
    );

    let report = BundleReport {
        root: root.to_string_lossy().to_string(),
        entries: deps.files[..deps.entry_count].iter().map(|p| relative_label(p, &root)).collect(),
        files: deps.files.iter().map(|p| relative_label(p, &root)).collect(),
        output: output.to_string_lossy().to_string(),
        files_parsed: deps.files_parsed,
        warnings,
    };

    if cfg.json {
        print_json_report(out, &report)?;
    } else {
        print_success(out, &output)?;
    }

    info!("Wrote {} sections to {}", summary.sections_written, output.display());
    Ok(report)
}
