//! Formatting driver: stdin or files, sequential printing or parallel
//! in-place rewriting, and the --check verdict.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use rayon::prelude::*;
use std::env;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};

use crate::args::Cli;
use crate::config;
use formatter::{format_source, Config};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(&cli);
    let config = config::resolve(&cli)?;
    debug!(
        indent = config.indent_size,
        trailing_newline = config.trailing_newline,
        space_redirects = config.space_redirects,
        "configuration resolved"
    );
    if cli.files.is_empty() {
        return run_stdin(&cli, &config);
    }
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.threads)
        .build_global()
    {
        error!("failed to build thread pool: {e}");
    }
    run_files(&cli, &config)
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        LevelFilter::OFF
    } else if cli.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Exit code 2 when any file failed to parse or could not be touched,
/// 1 when --check found unformatted files, 0 otherwise.
fn run_files(cli: &Cli, config: &Config) -> Result<()> {
    // printing keeps file order; rewriting and checking may run in parallel
    let outcomes: Vec<(&Path, Result<bool>)> = if cli.write || cli.check {
        cli.files
            .par_iter()
            .map(|path| (path.as_path(), process_file(path, cli, config)))
            .collect()
    } else {
        cli.files
            .iter()
            .map(|path| (path.as_path(), process_file(path, cli, config)))
            .collect()
    };
    let mut failed = 0usize;
    let mut unformatted = 0usize;
    for (path, outcome) in outcomes {
        match outcome {
            Ok(true) if cli.check => {
                report_unformatted(&path.display().to_string());
                unformatted += 1;
            }
            Ok(_) => {}
            Err(e) => {
                error!("{}: {e:#}", path.display());
                failed += 1;
            }
        }
    }
    if failed > 0 {
        std::process::exit(2);
    }
    if unformatted > 0 {
        std::process::exit(1);
    }
    info!(files = cli.files.len(), "formatting completed");
    Ok(())
}

/// Formats one file. `Ok(true)` means the canonical form differs from
/// what is on disk.
fn process_file(path: &Path, cli: &Cli, config: &Config) -> Result<bool> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if cli.dump_ast {
        print!("{}", dump_ast(&source)?);
        return Ok(false);
    }
    let formatted = format_source(&source, config)?;
    let changed = formatted != source;
    if cli.write {
        if changed {
            fs::write(path, &formatted)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(file = %path.display(), "reformatted");
        } else {
            debug!(file = %path.display(), "already formatted");
        }
    } else if !cli.check {
        print!("{formatted}");
    }
    Ok(changed)
}

fn run_stdin(cli: &Cli, config: &Config) -> Result<()> {
    if cli.write {
        bail!("--write needs file arguments; stdin cannot be rewritten in place");
    }
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("failed to read stdin")?;
    if cli.dump_ast {
        print!("{}", dump_ast(&source)?);
        return Ok(());
    }
    let formatted = format_source(&source, config)?;
    if cli.check {
        if formatted != source {
            report_unformatted("<stdin>");
            std::process::exit(1);
        }
        return Ok(());
    }
    print!("{formatted}");
    Ok(())
}

fn dump_ast(source: &str) -> Result<String> {
    let file = parser::parse(source)?;
    let mut json = serde_json::to_string_pretty(&file)?;
    json.push('\n');
    Ok(json)
}

/// Check if colored output should be used
fn use_colored_output() -> bool {
    // NO_COLOR is the standard opt-out
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" || term == "unknown" {
            return false;
        }
    }
    if env::var("CI").is_ok() || env::var("CONTINUOUS_INTEGRATION").is_ok() {
        return false;
    }
    true
}

fn report_unformatted(name: &str) {
    if use_colored_output() {
        println!("{} {name}", "would reformat".yellow().bold());
    } else {
        println!("would reformat {name}");
    }
}
