//! Document-order assembly and line-level helpers.
//!
//! `FormatState` walks the instruction list, fills the gaps between
//! formatted instructions with the original comment and blank lines,
//! and applies the trailing newline policy. The helpers at the bottom
//! are shared by the per-instruction formatters.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::Config;
use crate::instructions;
use crate::node::SourceNode;

pub(crate) struct FormatState<'a> {
    /// Count of raw lines already consumed, i.e. the index of the next
    /// unconsumed line. Monotonically non-decreasing.
    current_line: usize,
    out: String,
    lines: &'a [&'a str],
    config: &'a Config,
    escape: char,
}

impl<'a> FormatState<'a> {
    pub(crate) fn new(lines: &'a [&'a str], config: &'a Config, escape: char) -> Self {
        Self {
            current_line: 0,
            out: String::new(),
            lines,
            config,
            escape,
        }
    }

    /// Emits one top-level node: the comment filler covering the gap
    /// before it, then its formatted text. When the dispatcher declines
    /// the keyword the raw span is copied through byte-for-byte; the
    /// filler never sees instruction lines, so its trimming only ever
    /// touches comments and blanks.
    pub(crate) fn emit_node(&mut self, node: &SourceNode) {
        let start = node.instruction.start_line;
        let end = node.instruction.end_line;
        if start == 0 || end < start {
            return;
        }
        if self.current_line < start - 1 {
            let filler = comment_filler(&self.lines[self.current_line..start - 1]);
            self.out.push_str(&filler);
        }
        match instructions::format_node(node, self.config, self.escape) {
            Some(text) => self.out.push_str(&text),
            None => self.out.push_str(&node.original_multiline),
        }
        self.current_line = end;
    }

    /// Flushes trailing comment lines and applies the newline policy.
    pub(crate) fn finish(mut self) -> String {
        if self.current_line < self.lines.len() {
            let filler = comment_filler(&self.lines[self.current_line..]);
            self.out.push_str(&filler);
        }
        let mut out = self.out.trim_end_matches('\n').to_string();
        if self.config.trailing_newline {
            out.push('\n');
        }
        out
    }
}

/// Joins gap lines: surrounding whitespace trimmed per line, runs of
/// three or more newlines collapsed to one. A single blank line between
/// comments or instructions survives; longer runs do not.
fn comment_filler(lines: &[&str]) -> String {
    static BLANK_RUN: OnceLock<Regex> = OnceLock::new();
    let re = BLANK_RUN.get_or_init(|| Regex::new(r"\n{3,}").expect("valid blank run regex"));
    let mut block = String::new();
    for line in lines {
        let had_newline = line.ends_with('\n');
        block.push_str(line.trim_matches([' ', '\t', '\n', '\r']));
        if had_newline {
            block.push('\n');
        }
    }
    re.replace_all(&block, "\n").into_owned()
}

/// Re-indents every line after the first to `indent` spaces, dropping
/// whatever indentation it had. Whitespace-only lines stay bare.
pub(crate) fn indent_following_lines(text: &str, indent: usize) -> String {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return String::new();
    };
    let mut out = first.to_string();
    for line in lines {
        if line.trim().is_empty() {
            out.push_str(line.trim_matches([' ', '\t']));
        } else {
            out.push_str(&" ".repeat(indent));
            out.push_str(line.trim_start_matches([' ', '\t']));
        }
    }
    out
}

/// Removes trailing spaces and tabs from every line, keeping newlines.
pub(crate) fn strip_trailing_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let had_newline = line.ends_with('\n');
        out.push_str(line.trim_end_matches(['\n', '\r', ' ', '\t']));
        if had_newline {
            out.push('\n');
        }
    }
    out
}

/// Returns `text` after its first `count` words, where a lone
/// continuation backslash does not count as a word. Spaces and tabs
/// after the last skipped word are consumed; line structure beyond that
/// is preserved.
pub(crate) fn rest_after_words(text: &str, count: usize) -> &str {
    let mut rest = text.trim_start();
    for _ in 0..count {
        loop {
            let end = rest
                .find(|c: char| c.is_whitespace())
                .unwrap_or(rest.len());
            let word = &rest[..end];
            rest = rest[end..].trim_start_matches([' ', '\t']);
            if word.is_empty() || word == "\\" {
                rest = rest.trim_start();
                if rest.is_empty() {
                    return rest;
                }
                continue;
            }
            break;
        }
    }
    rest
}

/// Guarantees the fragment ends with exactly one newline.
pub(crate) fn ensure_newline(mut text: String) -> String {
    while text.ends_with('\n') && text[..text.len() - 1].ends_with('\n') {
        text.pop();
    }
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
