//! Typed representation of a parsed Dockerfile.
//!
//! Instructions keep their source spans and joined text so a formatter
//! can slice the raw file back out; comment and blank lines are not
//! represented here and must be recovered from the source via the spans.

use serde::{Deserialize, Serialize};

use crate::tokens;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A parsed Dockerfile: the ordered instruction list plus the parser
/// directives that affected parsing.
pub struct Dockerfile {
    pub instructions: Vec<Instruction>,
    /// Line continuation character, `\` unless overridden by a
    /// `# escape=` directive.
    pub escape: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One instruction with everything needed to reformat or reprint it.
pub struct Instruction {
    /// Keyword exactly as written in the source (`run`, `FROM`, ...).
    pub keyword: String,
    /// Leading `--option` tokens, verbatim and in order.
    pub flags: Vec<String>,
    /// Argument words, or the decoded elements when the arguments were
    /// written as a JSON array.
    pub args: Vec<String>,
    /// True when `args` came from exec-form (JSON array) syntax.
    pub exec_form: bool,
    /// The instruction joined onto a single line: continuations removed,
    /// comment and blank lines inside them skipped, surrounding
    /// whitespace trimmed.
    pub original: String,
    /// Heredoc bodies attached to this instruction, in source order.
    pub heredocs: Vec<Heredoc>,
    /// 1-indexed first source line.
    pub start_line: usize,
    /// 1-indexed last source line, inclusive. Covers continuation lines,
    /// skipped comments inside them, and heredoc bodies.
    pub end_line: usize,
    /// Wrapped sub-instructions; only ONBUILD produces one.
    pub children: Vec<Instruction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A heredoc opened by an instruction (`<<EOF` ... `EOF`).
pub struct Heredoc {
    /// Delimiter word with any quoting removed.
    pub name: String,
    /// Redirected file descriptor; 0 means stdin.
    pub file_descriptor: u32,
    /// Body text, verbatim, one trailing newline per line. The closing
    /// delimiter line is not part of the body.
    pub content: String,
    /// False when the delimiter was quoted (`<<'EOF'`), which disables
    /// build-time variable expansion.
    pub expand: bool,
    /// True for `<<-`: leading tabs are stripped when the body is used.
    pub chomp: bool,
}

impl Instruction {
    /// The argument portion of [`Instruction::original`]: everything
    /// after the keyword and flag tokens.
    pub fn arguments_text(&self) -> &str {
        tokens::skip_words(&self.original, 1 + self.flags.len())
    }

    /// Opening line for a heredoc instruction: keyword dropped, flags
    /// and argument words joined by single spaces.
    pub fn heredoc_opener(&self) -> String {
        let mut words: Vec<&str> = self.flags.iter().map(String::as_str).collect();
        words.extend(self.args.iter().map(String::as_str));
        words.join(" ")
    }
}
