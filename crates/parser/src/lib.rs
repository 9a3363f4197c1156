//! Structural parser for Dockerfiles.
//!
//! Produces an ordered list of [`Instruction`]s carrying keyword and
//! flag tokens, argument words, exec-form detection, heredoc bodies and
//! 1-indexed source spans. Continuation lines are joined; comment and
//! blank lines inside a continuation are skipped the way build
//! frontends skip them. Unknown keywords parse like any other
//! instruction so callers decide what to do with them.

mod ast;
mod directives;
mod tokens;

pub use ast::{Dockerfile, Heredoc, Instruction};
pub use directives::DEFAULT_ESCAPE;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

/// Parses Dockerfile source into its instruction list.
///
/// # Example
/// ```
/// let file = parser::parse("from alpine\nRUN echo hi\n").unwrap();
/// assert_eq!(file.instructions.len(), 2);
/// assert_eq!(file.instructions[0].keyword, "from");
/// assert_eq!(file.instructions[1].start_line, 2);
/// ```
pub fn parse(source: &str) -> Result<Dockerfile> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let escape = directives::scan_escape(source)?;
    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    let mut instructions = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        let line = trim_terminator(lines[idx]);
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            idx += 1;
            continue;
        }
        instructions.push(read_instruction(&lines, &mut idx, escape)?);
    }
    debug!(instructions = instructions.len(), "dockerfile parsed");
    Ok(Dockerfile {
        instructions,
        escape,
    })
}

/// Strips the line terminator, tolerating CRLF endings.
fn trim_terminator(line: &str) -> &str {
    line.trim_end_matches('\n').trim_end_matches('\r')
}

/// Removes a trailing continuation character. An even run of escape
/// characters is self-escaped and does not continue the line.
fn strip_continuation(line: &str, escape: char) -> Option<&str> {
    let trimmed = line.trim_end();
    let trailing = trimmed.chars().rev().take_while(|&c| c == escape).count();
    if trailing % 2 == 1 {
        Some(&trimmed[..trimmed.len() - escape.len_utf8()])
    } else {
        None
    }
}

/// Reads one instruction starting at `lines[*idx]`, leaving `*idx` just
/// past its last line (heredoc bodies included).
fn read_instruction(lines: &[&str], idx: &mut usize, escape: char) -> Result<Instruction> {
    let start_line = *idx + 1;
    let mut joined = String::new();
    let mut first = true;
    let mut terminated = false;
    while *idx < lines.len() {
        let raw = trim_terminator(lines[*idx]);
        if !first {
            if raw.trim().is_empty() {
                warn!(line = *idx + 1, "empty line inside a continuation");
                *idx += 1;
                continue;
            }
            if raw.trim_start().starts_with('#') {
                *idx += 1;
                continue;
            }
        }
        first = false;
        *idx += 1;
        match strip_continuation(raw, escape) {
            Some(text) => joined.push_str(text),
            None => {
                joined.push_str(raw);
                terminated = true;
                break;
            }
        }
    }
    if !terminated {
        warn!(line = lines.len(), "line continuation at end of file");
    }
    let mut instruction = parse_command(joined.trim(), start_line)?;
    collect_heredoc_bodies(lines, idx, &mut instruction)?;
    instruction.end_line = *idx;
    if let Some(child) = instruction.children.first_mut() {
        child.end_line = *idx;
    }
    Ok(instruction)
}

/// Splits a joined single-line command into keyword, flags and
/// arguments. ONBUILD recurses once to parse the wrapped instruction.
fn parse_command(text: &str, start_line: usize) -> Result<Instruction> {
    let Some(keyword) = text.split_whitespace().next() else {
        bail!("empty instruction at line {start_line}");
    };
    let lower = keyword.to_ascii_lowercase();
    let keyword = keyword.to_string();
    let original = text.to_string();

    if lower == "onbuild" {
        let rest = tokens::skip_words(text, 1);
        let children = if rest.is_empty() {
            Vec::new()
        } else {
            vec![parse_command(rest, start_line)?]
        };
        return Ok(Instruction {
            keyword,
            flags: Vec::new(),
            args: rest.split_whitespace().map(str::to_string).collect(),
            exec_form: false,
            original,
            heredocs: Vec::new(),
            start_line,
            end_line: start_line,
            children,
        });
    }

    let mut flags = Vec::new();
    let mut rest = tokens::skip_words(text, 1);
    while let Some(word) = rest.split_whitespace().next() {
        if word == "--" || !word.starts_with("--") {
            break;
        }
        flags.push(word.to_string());
        rest = tokens::skip_words(rest, 1);
    }

    let mut args = Vec::new();
    let mut exec_form = false;
    let mut heredocs = Vec::new();
    if tokens::EXEC_KEYWORDS.contains(&lower.as_str()) {
        if let Some(items) =
            tokens::parse_exec_form(rest).with_context(|| format!("at line {start_line}"))?
        {
            args = items;
            exec_form = true;
        }
    }
    if !exec_form {
        args = rest.split_whitespace().map(str::to_string).collect();
        if tokens::HEREDOC_KEYWORDS.contains(&lower.as_str()) {
            heredocs = args.iter().filter_map(|w| tokens::heredoc_word(w)).collect();
        }
    }

    Ok(Instruction {
        keyword,
        flags,
        args,
        exec_form,
        original,
        heredocs,
        start_line,
        end_line: start_line,
        children: Vec::new(),
    })
}

/// Consumes heredoc body lines for the instruction (or, for ONBUILD,
/// its wrapped child), filling each body in source order.
fn collect_heredoc_bodies(
    lines: &[&str],
    idx: &mut usize,
    instruction: &mut Instruction,
) -> Result<()> {
    let start_line = instruction.start_line;
    let owner = if !instruction.heredocs.is_empty() {
        &mut *instruction
    } else if let Some(child) = instruction
        .children
        .first_mut()
        .filter(|c| !c.heredocs.is_empty())
    {
        child
    } else {
        return Ok(());
    };
    for slot in 0..owner.heredocs.len() {
        let name = owner.heredocs[slot].name.clone();
        let chomp = owner.heredocs[slot].chomp;
        let mut content = String::new();
        let mut closed = false;
        while *idx < lines.len() {
            let line = trim_terminator(lines[*idx]);
            *idx += 1;
            let candidate = if chomp {
                line.trim_start_matches('\t')
            } else {
                line
            };
            if candidate == name {
                closed = true;
                break;
            }
            content.push_str(line);
            content.push('\n');
        }
        if !closed {
            bail!("unterminated heredoc {name:?} in instruction at line {start_line}");
        }
        owner.heredocs[slot].content = content;
    }
    Ok(())
}
