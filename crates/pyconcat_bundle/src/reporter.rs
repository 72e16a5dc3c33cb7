use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;
use log::debug;

use pyconcat_core::relative_label;

use crate::types::BundleReport;

pub fn print_search_header<W: Write>(
    writer: &mut W,
    root: &Path,
    entries: &[PathBuf],
) -> io::Result<()> {
    writeln!(
        writer,
        "Searching for dependencies in project root: {}",
        root.display().to_string().bright_white().bold()
    )?;
    writeln!(writer, "Starting scripts:")?;
    for entry in entries {
        writeln!(writer, "  - {}", entry.display().to_string().blue())?;
    }
    writeln!(writer)?;
    Ok(())
}

pub fn print_file_list<W: Write>(
    writer: &mut W,
    files: &[PathBuf],
    root: &Path,
) -> io::Result<()> {
    debug!("Printing list of {} files", files.len());
    writeln!(writer, "Found the following python files to concatenate:")?;
    for file in files {
        writeln!(writer, "  - {}", relative_label(file, root).cyan())?;
    }
    writeln!(writer, "{}", "-".repeat(20).dimmed())?;
    Ok(())
}

pub fn print_success<W: Write>(writer: &mut W, output: &Path) -> io::Result<()> {
    writeln!(
        writer,
        "{} Successfully created concatenated file: {}",
        "✓".green().bold(),
        output.display().to_string().bright_white().bold()
    )?;
    writer.flush()?;
    Ok(())
}

pub fn print_json_report<W: Write>(writer: &mut W, report: &BundleReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
