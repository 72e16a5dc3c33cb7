use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::{debug, info};
use pyconcat_bundle::Config;
use pyconcat_core::ConcatError;
use std::io::{BufWriter, Write};
use std::time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cfg = Config::parse();
    debug!("Parsed CLI arguments: {:?}", cfg);

    if let Err(e) = run(cfg) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        // Bad input exits like a clap usage error
        let code = match e.downcast_ref::<ConcatError>() {
            Some(ce) if ce.is_usage_error() => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

fn run(cfg: Config) -> Result<()> {
    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let start = Instant::now();
    let num_threads = rayon::current_num_threads();
    info!("Bundling {} entry files (using {} threads)", cfg.entries.len(), num_threads);

    let report = pyconcat_bundle::run_bundle(&cfg, &mut stdout)?;
    let elapsed_ms = start.elapsed().as_millis();

    if !cfg.json {
        writeln!(
            stdout,
            "\n{} Finished in {}ms on {} files (using {} threads).",
            "●".bright_blue(),
            elapsed_ms.to_string().cyan(),
            report.files.len().to_string().cyan(),
            num_threads.to_string().cyan()
        )?;
    }
    stdout.flush()?;

    Ok(())
}
