//! Dockerfile reformatter.
//!
//! Canonicalizes instruction casing, argument layout and the style of
//! embedded shell payloads while keeping every comment, blank-line gap
//! and unrecognized line verbatim. The entry point is [`format_source`];
//! everything else hangs off the per-instruction dispatch in
//! `instructions`.

mod config;
mod instructions;
mod json;
mod layout;
mod node;
mod shell;

pub use config::Config;

use anyhow::{bail, Result};

/// Formats Dockerfile source text.
///
/// Returns the canonicalized file, or an error when the source does not
/// parse structurally. Nothing is partially formatted: on error the
/// caller keeps its input untouched.
///
/// # Example
///
/// ```
/// use formatter::{format_source, Config};
///
/// let out = format_source("from alpine\nrun echo hi\n", &Config::default()).unwrap();
/// assert_eq!(out, "FROM alpine\nRUN echo hi\n");
/// ```
pub fn format_source(source: &str, config: &Config) -> Result<String> {
    if config.indent_size == 0 {
        bail!("indent_size must be at least 1");
    }
    let normalized = normalize(source);
    let file = parser::parse(&normalized)?;
    let lines: Vec<&str> = normalized.split_inclusive('\n').collect();
    let nodes = node::build_nodes(&file.instructions, &lines);
    let mut state = layout::FormatState::new(&lines, config, file.escape);
    for node in &nodes {
        state.emit_node(node);
    }
    Ok(state.finish())
}

/// Strips a UTF-8 BOM and normalizes CRLF endings up front, so spans
/// computed by the parser line up with the line store used for slicing.
fn normalize(source: &str) -> String {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    source.replace("\r\n", "\n")
}
