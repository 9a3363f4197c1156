//! Tokenizer for embedded shell fragments.
//!
//! The dialect is what a build frontend hands to `/bin/sh -c` after
//! joining continuation lines, with one extension: a full-line comment
//! may sit inside a continuation chain without ending it. Words keep
//! quoting, escapes and substitutions verbatim; the printer only ever
//! rearranges the whitespace between tokens.
//!
//! `lex` returns `None` for fragments the printer must not touch:
//! control-flow keywords in command position, brace groups, subshells,
//! shell-level heredocs, unterminated quotes, and any quoted text or
//! substitution spanning a raw line break.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A word, verbatim.
    Word(String),
    Op(Operator),
    /// Redirect operator with any fd prefix attached (`>`, `2>>`, `>&`).
    Redirect(String),
    /// `#` to end of line, trailing whitespace dropped.
    Comment(String),
    /// Backslash-newline, or the line break after an in-chain comment.
    Continuation,
    /// Hard line break.
    Newline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    And,
    Or,
    Pipe,
    Semi,
    Background,
}

impl Operator {
    pub(crate) fn text(self) -> &'static str {
        match self {
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Pipe => "|",
            Operator::Semi => ";",
            Operator::Background => "&",
        }
    }
}

/// Words that open shell control flow. Reflowing around them would need
/// a real parser, so they force pass-through when in command position.
const CONTROL_KEYWORDS: [&str; 14] = [
    "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done", "case", "esac",
    "select", "function",
];

const REDIRECT_OPS: [&str; 8] = ["<<<", ">>", ">|", ">&", "<&", "<>", ">", "<"];

pub(crate) fn lex(fragment: &str) -> Option<Vec<Token>> {
    Lexer {
        src: fragment,
        pos: 0,
        tokens: Vec::new(),
    }
    .run()
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    tokens: Vec<Token>,
}

impl Lexer<'_> {
    fn run(mut self) -> Option<Vec<Token>> {
        while self.pos < self.src.len() {
            self.step()?;
        }
        Some(self.tokens)
    }

    fn step(&mut self) -> Option<()> {
        let bytes = self.src.as_bytes();
        match bytes[self.pos] {
            b' ' | b'\t' | b'\r' => self.pos += 1,
            b'\\' if bytes.get(self.pos + 1) == Some(&b'\n') => {
                self.tokens.push(Token::Continuation);
                self.pos += 2;
            }
            b'\n' => {
                if matches!(self.tokens.last(), Some(Token::Comment(_))) {
                    self.tokens.push(Token::Continuation);
                } else {
                    self.tokens.push(Token::Newline);
                }
                self.pos += 1;
            }
            b'#' => {
                let end = self.src[self.pos..]
                    .find('\n')
                    .map_or(self.src.len(), |p| self.pos + p);
                let comment = self.src[self.pos..end].trim_end().to_string();
                self.tokens.push(Token::Comment(comment));
                self.pos = end;
            }
            b'&' => match bytes.get(self.pos + 1) {
                Some(b'&') => {
                    self.tokens.push(Token::Op(Operator::And));
                    self.pos += 2;
                }
                Some(b'>') => self.scan_redirect()?,
                _ => {
                    self.tokens.push(Token::Op(Operator::Background));
                    self.pos += 1;
                }
            },
            b'|' => match bytes.get(self.pos + 1) {
                Some(b'|') => {
                    self.tokens.push(Token::Op(Operator::Or));
                    self.pos += 2;
                }
                // |& duplicates stderr into the pipe; leave it alone
                Some(b'&') => return None,
                _ => {
                    self.tokens.push(Token::Op(Operator::Pipe));
                    self.pos += 1;
                }
            },
            b';' => {
                // ;; and friends only appear in case clauses
                if bytes.get(self.pos + 1) == Some(&b';') {
                    return None;
                }
                self.tokens.push(Token::Op(Operator::Semi));
                self.pos += 1;
            }
            b'(' | b')' => return None,
            b'<' | b'>' => self.scan_redirect()?,
            c if c.is_ascii_digit() && self.digits_then_redirect() => self.scan_redirect()?,
            _ => self.scan_word()?,
        }
        Some(())
    }

    /// True when the run of digits at the cursor is an fd prefix.
    fn digits_then_redirect(&self) -> bool {
        let bytes = self.src.as_bytes();
        let mut i = self.pos;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        matches!(bytes.get(i), Some(b'<') | Some(b'>'))
    }

    fn scan_redirect(&mut self) -> Option<()> {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        if bytes[self.pos] == b'&' {
            self.pos += 1;
        }
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        let rest = &self.src[self.pos..];
        if rest.starts_with("<<") && !rest.starts_with("<<<") {
            return None; // shell heredoc
        }
        for op in REDIRECT_OPS {
            if rest.starts_with(op) {
                self.pos += op.len();
                self.tokens
                    .push(Token::Redirect(self.src[start..self.pos].to_string()));
                return Some(());
            }
        }
        None
    }

    fn scan_word(&mut self) -> Option<()> {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b' ' | b'\t' | b'\r' | b'\n' | b'&' | b'|' | b';' | b'<' | b'>' | b'(' | b')' => {
                    break
                }
                b'\'' => self.skip_single_quoted()?,
                b'"' => self.skip_double_quoted()?,
                b'`' => self.skip_backquoted()?,
                b'$' => self.skip_dollar()?,
                b'\\' => match bytes.get(self.pos + 1) {
                    Some(b'\n') | None => break,
                    Some(_) => self.pos += 2,
                },
                _ => self.advance_char(),
            }
        }
        let word = &self.src[start..self.pos];
        if word.is_empty() {
            // a lone trailing backslash; keep it as a word
            self.pos = self.src.len().min(self.pos + 1);
            self.tokens.push(Token::Word("\\".to_string()));
            return Some(());
        }
        if matches!(word, "{" | "}") {
            return None; // brace group
        }
        if self.at_command_start() && CONTROL_KEYWORDS.contains(&word) {
            return None;
        }
        self.tokens.push(Token::Word(word.to_string()));
        Some(())
    }

    /// Command position: fragment start, or right after an operator or
    /// hard line break, looking through comments and continuations.
    fn at_command_start(&self) -> bool {
        for token in self.tokens.iter().rev() {
            match token {
                Token::Comment(_) | Token::Continuation => continue,
                Token::Op(_) | Token::Newline => return true,
                Token::Word(_) | Token::Redirect(_) => return false,
            }
        }
        true
    }

    fn advance_char(&mut self) {
        let mut next = self.pos + 1;
        while next < self.src.len() && !self.src.is_char_boundary(next) {
            next += 1;
        }
        self.pos = next;
    }

    fn skip_single_quoted(&mut self) -> Option<()> {
        let rest = &self.src[self.pos + 1..];
        let close = rest.find('\'')?;
        if rest[..close].contains('\n') {
            return None;
        }
        self.pos += close + 2;
        Some(())
    }

    fn skip_double_quoted(&mut self) -> Option<()> {
        self.pos += 1;
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'"' => {
                    self.pos += 1;
                    return Some(());
                }
                b'\n' => return None,
                b'\\' => match bytes.get(self.pos + 1) {
                    Some(b'\n') | None => return None,
                    Some(_) => self.pos += 2,
                },
                b'$' => self.skip_dollar()?,
                b'`' => self.skip_backquoted()?,
                _ => self.advance_char(),
            }
        }
        None
    }

    fn skip_backquoted(&mut self) -> Option<()> {
        let rest = &self.src[self.pos + 1..];
        let close = rest.find('`')?;
        if rest[..close].contains('\n') {
            return None;
        }
        self.pos += close + 2;
        Some(())
    }

    fn skip_dollar(&mut self) -> Option<()> {
        let bytes = self.src.as_bytes();
        match bytes.get(self.pos + 1) {
            Some(b'(') => {
                self.pos += 2;
                let mut depth = 1usize;
                while self.pos < bytes.len() && depth > 0 {
                    match bytes[self.pos] {
                        b'(' => {
                            depth += 1;
                            self.pos += 1;
                        }
                        b')' => {
                            depth -= 1;
                            self.pos += 1;
                        }
                        b'\n' => return None,
                        b'\'' => self.skip_single_quoted()?,
                        b'"' => self.skip_double_quoted()?,
                        b'`' => self.skip_backquoted()?,
                        b'\\' => match bytes.get(self.pos + 1) {
                            Some(b'\n') | None => return None,
                            Some(_) => self.pos += 2,
                        },
                        _ => self.advance_char(),
                    }
                }
                if depth > 0 {
                    return None;
                }
                Some(())
            }
            Some(b'{') => {
                self.pos += 2;
                while self.pos < bytes.len() {
                    match bytes[self.pos] {
                        b'}' => {
                            self.pos += 1;
                            return Some(());
                        }
                        b'\n' => return None,
                        b'\'' => self.skip_single_quoted()?,
                        b'"' => self.skip_double_quoted()?,
                        b'\\' => match bytes.get(self.pos + 1) {
                            Some(b'\n') | None => return None,
                            Some(_) => self.pos += 2,
                        },
                        _ => self.advance_char(),
                    }
                }
                None
            }
            _ => {
                self.pos += 1;
                Some(())
            }
        }
    }
}
