//! Formatting for the shell payloads of RUN instructions and the
//! shell-form detection used by CMD-style instructions.
//!
//! Anything the tokenizer cannot model without a full shell grammar
//! comes back verbatim; reflowing is strictly opt-in per fragment.

mod lexer;
mod printer;

use crate::config::Config;
use crate::layout::ensure_newline;
use lexer::{lex, Operator, Token};
use printer::{print, Mode};

/// Formats the payload of a shell-form RUN written across continuation
/// lines.
pub(crate) fn format_fragment(fragment: &str, config: &Config) -> String {
    let Some(tokens) = lex(fragment) else {
        return ensure_newline(fragment.to_string());
    };
    if !tokens.iter().any(is_content) {
        return ensure_newline(fragment.to_string());
    }
    if tokens.iter().any(|t| matches!(t, Token::Op(Operator::Semi))) {
        if tokens.iter().any(|t| matches!(t, Token::Comment(_))) {
            // splitting would detach comments from their commands
            return ensure_newline(fragment.to_string());
        }
        return split_semicolons(&tokens, config);
    }
    print(&tokens, Mode::Fragment, config)
}

/// Formats a heredoc body attached to a RUN instruction. Bodies the
/// tokenizer declines, and bodies with nothing to format (empty or
/// whitespace only), come back byte-for-byte.
pub(crate) fn format_script(script: &str, config: &Config) -> String {
    let Some(tokens) = lex(script) else {
        return script.to_string();
    };
    if !tokens.iter().any(is_content) {
        return script.to_string();
    }
    print(&tokens, Mode::Script, config)
}

/// True when a shell-form command relies on an implicit shell: written
/// as a plain exec array its control operators would become literal
/// arguments.
pub(crate) fn needs_shell(line: &str) -> bool {
    match lex(line) {
        None => true,
        Some(tokens) => tokens.iter().any(|t| {
            matches!(
                t,
                Token::Op(Operator::And) | Token::Op(Operator::Or) | Token::Op(Operator::Semi)
            )
        }),
    }
}

fn is_content(token: &Token) -> bool {
    matches!(
        token,
        Token::Word(_) | Token::Op(_) | Token::Redirect(_)
    )
}

/// Rewrites `a;  b` as one `; `-joined line. Each piece flattens onto a
/// single line first, so a split chain never keeps stray continuations.
fn split_semicolons(tokens: &[Token], config: &Config) -> String {
    let mut pieces: Vec<String> = Vec::new();
    for group in tokens.split(|t| matches!(t, Token::Op(Operator::Semi))) {
        let piece = print(group, Mode::Flat, config);
        if !piece.is_empty() {
            pieces.push(piece);
        }
    }
    ensure_newline(pieces.join("; "))
}
