use anyhow::{Context, Result};
use log::{debug, warn};
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use pyconcat_core::{DELIMITER_WIDTH, relative_label};

use crate::types::EmitSummary;

/// Write the concatenated artifact for `files` to `output`.
pub fn create_artifact(output: &Path, files: &[PathBuf], root: &Path) -> Result<EmitSummary> {
    let output_name = output
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| output.to_string_lossy().to_string());

    let file = File::create(output)
        .with_context(|| format!("Could not write to output file {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    let summary = write_artifact(&mut writer, files, root, &output_name)
        .with_context(|| format!("Could not write to output file {}", output.display()))?;
    writer
        .flush()
        .with_context(|| format!("Could not write to output file {}", output.display()))?;

    debug!("Wrote {} sections to {}", summary.sections_written, output.display());
    Ok(summary)
}

/// Serialize every file as a delimited section:
///
/// ```text
/// ================================================================================
/// cat pkg/mod.py
/// ================================================================================
/// <raw file bytes>
///
/// ```
///
/// A file that cannot be read gets an inline error marker instead of its
/// content, so the artifact always covers every listed file.
pub fn write_artifact<W: Write>(
    writer: &mut W,
    files: &[PathBuf],
    root: &Path,
    output_name: &str,
) -> io::Result<EmitSummary> {
    let delimiter = "=".repeat(DELIMITER_WIDTH);
    let mut summary = EmitSummary::default();

    writeln!(writer, "--- START OF FILE {} ---\n", output_name)?;
    for path in files {
        let label = relative_label(path, root);
        writeln!(writer, "{}\ncat {}\n{}", delimiter, label, delimiter)?;
        match fs::read(path) {
            Ok(content) => {
                writer.write_all(&content)?;
                writer.write_all(b"\n\n")?;
            }
            Err(e) => {
                warn!("Could not read {} while writing artifact: {}", path.display(), e);
                writeln!(writer, "!!! ERROR: Could not read file {}: {} !!!\n", label, e)?;
                summary.read_failures.push(path.clone());
            }
        }
        summary.sections_written += 1;
    }
    Ok(summary)
}
