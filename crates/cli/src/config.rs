//! Configuration file handling and flag overlay.
//!
//! Style options resolve in three layers: built-in defaults, then a
//! TOML file (`--config`, or `.dockfmt.toml` in the working directory),
//! then command-line flags.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::args::Cli;
use formatter::Config;

pub const CONFIG_FILE_NAME: &str = ".dockfmt.toml";

/// On-disk settings. Every field is optional so a file can pin a single
/// option; unknown keys are rejected to catch typos.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub indent_size: Option<usize>,
    pub trailing_newline: Option<bool>,
    pub space_redirects: Option<bool>,
}

pub fn load_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn discover() -> Option<PathBuf> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    path.exists().then_some(path)
}

/// Resolves the effective style: defaults, file, then flags.
pub fn resolve(cli: &Cli) -> Result<Config> {
    let mut config = Config::default();
    let file = match &cli.config {
        Some(path) => Some(load_file(path)?),
        None => discover().map(|path| load_file(&path)).transpose()?,
    };
    if let Some(file) = file {
        if let Some(v) = file.indent_size {
            config.indent_size = v;
        }
        if let Some(v) = file.trailing_newline {
            config.trailing_newline = v;
        }
        if let Some(v) = file.space_redirects {
            config.space_redirects = v;
        }
    }
    if let Some(v) = cli.indent {
        config.indent_size = v;
    }
    if cli.no_trailing_newline {
        config.trailing_newline = false;
    }
    if cli.space_redirects {
        config.space_redirects = true;
    }
    Ok(config)
}
