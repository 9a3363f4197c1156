//! Parser directives: `# escape=` and `# syntax=` comment lines at the
//! very top of a Dockerfile. An empty line, a non-directive comment or
//! the first instruction ends directive processing.

use anyhow::{bail, Result};
use tracing::debug;

/// Default line continuation character.
pub const DEFAULT_ESCAPE: char = '\\';

/// Scans the leading lines for an escape directive and returns the
/// active continuation character.
pub(crate) fn scan_escape(source: &str) -> Result<char> {
    let mut escape = DEFAULT_ESCAPE;
    for line in source.lines() {
        let Some(comment) = line.trim().strip_prefix('#') else {
            break;
        };
        let Some((key, value)) = comment.split_once('=') else {
            break;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "escape" => {
                escape = match value {
                    "\\" => '\\',
                    "`" => '`',
                    other => bail!("invalid escape directive: {other:?}"),
                };
                debug!(escape = %escape, "escape directive");
            }
            "syntax" => debug!(syntax = value, "ignoring syntax directive"),
            _ => break,
        }
    }
    Ok(escape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_escape() {
        assert_eq!(scan_escape("FROM alpine\n").unwrap(), '\\');
    }

    #[test]
    fn backtick_escape() {
        assert_eq!(scan_escape("# escape=`\nFROM alpine\n").unwrap(), '`');
    }

    #[test]
    fn directive_after_comment_is_plain_text() {
        let src = "# a comment\n# escape=`\nFROM alpine\n";
        assert_eq!(scan_escape(src).unwrap(), '\\');
    }

    #[test]
    fn invalid_escape_rejected() {
        assert!(scan_escape("# escape=^\n").is_err());
    }
}
