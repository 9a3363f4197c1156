//! Style options for a formatting run.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
/// Options supplied once per run and never mutated.
pub struct Config {
    /// Spaces used to indent continuation lines. Must be at least 1.
    pub indent_size: usize,
    /// Terminate the output with exactly one newline.
    pub trailing_newline: bool,
    /// Print a space between a redirect operator and its target.
    pub space_redirects: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_size: 4,
            trailing_newline: true,
            space_redirects: false,
        }
    }
}
