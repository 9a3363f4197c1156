//! Rebuilds fragment text from tokens with canonical spacing.
//!
//! Lines are collected first and terminators decided afterwards, so a
//! chain operator stays glued to the line it was written on and a
//! comment never grows a trailing backslash.

use super::lexer::{Operator, Token};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// RUN payloads: line breaks are escaped continuations, every line
    /// after the first is indented.
    Fragment,
    /// Heredoc bodies: line breaks are real, commands start at the left
    /// margin, a single blank line may survive.
    Script,
    /// Semicolon pieces: everything lands on one line, no terminator.
    Flat,
}

pub(crate) fn print(tokens: &[Token], mode: Mode, config: &Config) -> String {
    let mut printer = Printer {
        mode,
        indent: " ".repeat(config.indent_size),
        lines: Vec::new(),
        continued: Vec::new(),
        current: String::new(),
        ends_with_comment: false,
    };
    if mode == Mode::Fragment && matches!(tokens.first(), Some(Token::Comment(_))) {
        // A leading comment has to move below the instruction keyword,
        // so the first output line is a lone escape.
        printer.lines.push(String::new());
        printer.continued.push(true);
    }
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Word(word) => printer.push_atom(word),
            Token::Op(Operator::Semi) => printer.push_glued(";"),
            Token::Op(op) => printer.push_atom(op.text()),
            Token::Redirect(op) => {
                if let Some(Token::Word(target)) = tokens.get(i + 1) {
                    let atom = join_redirect(op, target, config.space_redirects);
                    printer.push_atom(&atom);
                    i += 1;
                } else {
                    printer.push_atom(op);
                }
            }
            Token::Comment(text) => printer.push_comment(text),
            Token::Continuation | Token::Newline => {
                printer.break_line(matches!(tokens[i], Token::Newline));
            }
        }
        i += 1;
    }
    printer.finish()
}

/// A duplicating redirect like `2>&1` stays glued even when redirect
/// spacing is on.
fn join_redirect(op: &str, target: &str, spaced: bool) -> String {
    if spaced && !op.ends_with('&') {
        format!("{op} {target}")
    } else {
        format!("{op}{target}")
    }
}

struct Printer {
    mode: Mode,
    indent: String,
    /// Completed lines, no terminators.
    lines: Vec<String>,
    /// Whether the line at the same index flows on with a backslash.
    continued: Vec<bool>,
    current: String,
    ends_with_comment: bool,
}

impl Printer {
    fn push_atom(&mut self, atom: &str) {
        if !self.current.is_empty() {
            self.current.push(' ');
        }
        self.current.push_str(atom);
        self.ends_with_comment = false;
    }

    fn push_glued(&mut self, atom: &str) {
        self.current.push_str(atom);
        self.ends_with_comment = false;
    }

    fn push_comment(&mut self, text: &str) {
        if !self.current.is_empty() {
            self.current.push(' ');
        }
        self.current.push_str(text);
        self.ends_with_comment = true;
    }

    fn break_line(&mut self, hard_newline: bool) {
        if self.mode == Mode::Flat {
            return; // the piece stays on one line
        }
        // after a comment the break carries no backslash
        let hard = self.ends_with_comment || (self.mode == Mode::Script && hard_newline);
        if self.current.is_empty() {
            if self.mode == Mode::Fragment && self.lines.is_empty() && !hard_newline {
                // a continuation before the first word keeps the payload
                // below the instruction keyword
                self.lines.push(String::new());
                self.continued.push(true);
                return;
            }
            // merge break runs; scripts keep one blank line
            if self.mode == Mode::Script
                && hard_newline
                && self.lines.last().is_some_and(|line| !line.is_empty())
            {
                self.lines.push(String::new());
                self.continued.push(false);
            }
            return;
        }
        self.lines.push(std::mem::take(&mut self.current));
        self.continued.push(!hard);
        self.ends_with_comment = false;
    }

    fn finish(mut self) -> String {
        if !self.current.is_empty() {
            self.lines.push(self.current);
            self.continued.push(false);
        }
        while self.lines.last().is_some_and(|line| line.is_empty()) {
            self.lines.pop();
            self.continued.pop();
        }
        let mut out = String::new();
        for i in 0..self.lines.len() {
            if i > 0 && !self.lines[i].is_empty() {
                let indented = match self.mode {
                    Mode::Fragment => true,
                    Mode::Script => self.continued[i - 1],
                    Mode::Flat => false,
                };
                if indented {
                    out.push_str(&self.indent);
                }
            }
            out.push_str(&self.lines[i]);
            if i + 1 < self.lines.len() {
                if !self.continued[i] {
                    out.push('\n');
                } else if self.lines[i].is_empty() {
                    out.push_str("\\\n");
                } else {
                    out.push_str(" \\\n");
                }
            }
        }
        if self.mode != Mode::Flat {
            out.push('\n');
        }
        out
    }
}
