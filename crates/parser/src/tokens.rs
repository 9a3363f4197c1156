//! Word-level helpers shared by the instruction parser.

use anyhow::{bail, Result};

use crate::ast::Heredoc;

/// Instructions whose arguments may be written as a JSON array.
pub(crate) const EXEC_KEYWORDS: [&str; 7] =
    ["add", "cmd", "copy", "entrypoint", "run", "shell", "volume"];

/// Instructions whose arguments may open heredocs.
pub(crate) const HEREDOC_KEYWORDS: [&str; 3] = ["add", "copy", "run"];

/// Returns `text` with its first `count` whitespace-separated words
/// removed, left-trimmed.
pub(crate) fn skip_words(text: &str, count: usize) -> &str {
    let mut rest = text.trim_start();
    for _ in 0..count {
        match rest.find(char::is_whitespace) {
            Some(pos) => rest = rest[pos..].trim_start(),
            None => return "",
        }
    }
    rest
}

/// Probes argument text for exec form. `Ok(None)` means shell form. A
/// well-formed JSON array holding anything but strings is an error, the
/// same rule build frontends apply.
pub(crate) fn parse_exec_form(rest: &str) -> Result<Option<Vec<String>>> {
    let trimmed = rest.trim();
    if !trimmed.starts_with('[') {
        return Ok(None);
    }
    if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
        return Ok(Some(items));
    }
    if let Ok(serde_json::Value::Array(_)) = serde_json::from_str::<serde_json::Value>(trimmed) {
        bail!("arrays in this instruction must contain only strings: {trimmed}");
    }
    Ok(None)
}

/// Parses a word of the shape `[fd]<<[-]NAME`, the heredoc opener.
/// Returns `None` for anything else, including herestrings (`<<<`).
pub(crate) fn heredoc_word(word: &str) -> Option<Heredoc> {
    let digits_end = word
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(word.len());
    let rest = word[digits_end..].strip_prefix("<<")?;
    if rest.starts_with('<') {
        return None;
    }
    let (rest, chomp) = match rest.strip_prefix('-') {
        Some(r) => (r, true),
        None => (rest, false),
    };
    let (name, expand) = unquote_delimiter(rest);
    if name.is_empty() {
        return None;
    }
    let file_descriptor = if digits_end == 0 {
        0
    } else {
        word[..digits_end].parse().ok()?
    };
    Some(Heredoc {
        name,
        file_descriptor,
        content: String::new(),
        expand,
        chomp,
    })
}

fn unquote_delimiter(raw: &str) -> (String, bool) {
    for quote in ['\'', '"'] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return (raw[1..raw.len() - 1].to_string(), false);
        }
    }
    (raw.to_string(), true)
}
