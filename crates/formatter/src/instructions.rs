//! Per-instruction formatters behind a closed keyword dispatch.
//!
//! Every formatter receives the node with its verbatim source text and
//! returns replacement text ending in a newline. Keywords outside the
//! dispatch are declined so their lines pass through untouched.

use std::collections::BTreeMap;

use tracing::warn;

use parser::Instruction;

use crate::config::Config;
use crate::json::serialize_string_array;
use crate::layout::{
    ensure_newline, indent_following_lines, rest_after_words, strip_trailing_whitespace,
};
use crate::node::SourceNode;
use crate::shell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InstructionKind {
    Add,
    Arg,
    Cmd,
    Copy,
    Entrypoint,
    Env,
    Expose,
    From,
    Healthcheck,
    Label,
    Maintainer,
    Onbuild,
    Run,
    Shell,
    StopSignal,
    User,
    Volume,
    Workdir,
}

impl InstructionKind {
    pub(crate) fn from_keyword(keyword: &str) -> Option<Self> {
        let kind = match keyword.to_ascii_lowercase().as_str() {
            "add" => Self::Add,
            "arg" => Self::Arg,
            "cmd" => Self::Cmd,
            "copy" => Self::Copy,
            "entrypoint" => Self::Entrypoint,
            "env" => Self::Env,
            "expose" => Self::Expose,
            "from" => Self::From,
            "healthcheck" => Self::Healthcheck,
            "label" => Self::Label,
            "maintainer" => Self::Maintainer,
            "onbuild" => Self::Onbuild,
            "run" => Self::Run,
            "shell" => Self::Shell,
            "stopsignal" => Self::StopSignal,
            "user" => Self::User,
            "volume" => Self::Volume,
            "workdir" => Self::Workdir,
            _ => return None,
        };
        Some(kind)
    }
}

/// Formats one node, or `None` when the keyword is not recognized.
pub(crate) fn format_node(node: &SourceNode, config: &Config, escape: char) -> Option<String> {
    let kind = InstructionKind::from_keyword(&node.instruction.keyword)?;
    let text = match kind {
        InstructionKind::Arg
        | InstructionKind::Healthcheck
        | InstructionKind::StopSignal
        | InstructionKind::User
        | InstructionKind::Volume => format_basic(node, config),
        InstructionKind::Add
        | InstructionKind::Copy
        | InstructionKind::Expose
        | InstructionKind::From
        | InstructionKind::Workdir => format_space_separated(node),
        InstructionKind::Cmd | InstructionKind::Entrypoint | InstructionKind::Shell => {
            format_cmd(node)
        }
        InstructionKind::Env => format_env(node, config),
        InstructionKind::Label => format_label(node, config),
        InstructionKind::Maintainer => format_maintainer(node),
        InstructionKind::Onbuild => format_onbuild(node, config, escape),
        InstructionKind::Run => format_run(node, config, escape),
    };
    Some(ensure_newline(text))
}

/// Keyword uppercased, everything after it kept as written, with
/// continuation lines re-indented.
fn format_basic(node: &SourceNode, config: &Config) -> String {
    let keyword = node.instruction.keyword.to_ascii_uppercase();
    let rest = rest_after_words(&node.original_multiline, 1);
    if rest.trim().is_empty() {
        return keyword;
    }
    indent_following_lines(&format!("{keyword} {rest}"), config.indent_size)
}

/// Flags and argument words rejoined by single spaces on one line.
fn format_space_separated(node: &SourceNode) -> String {
    let instruction = node.instruction;
    let keyword = instruction.keyword.to_ascii_uppercase();
    if !instruction.heredocs.is_empty() {
        return format!("{keyword} {}", reassemble_heredocs(instruction, None));
    }
    let mut words: Vec<&str> = instruction.flags.iter().map(String::as_str).collect();
    words.extend(instruction.args.iter().map(String::as_str));
    if words.is_empty() {
        return keyword;
    }
    format!("{keyword} {}", words.join(" "))
}

/// CMD, ENTRYPOINT and SHELL always come out in exec form.
fn format_cmd(node: &SourceNode) -> String {
    let instruction = node.instruction;
    let keyword = instruction.keyword.to_ascii_uppercase();
    let argv = if instruction.exec_form {
        instruction.args.clone()
    } else {
        shell_form_argv(instruction)
    };
    with_flags(&keyword, instruction, serialize_string_array(&argv))
}

/// Tokenizes a shell-form command line. A line that relies on an
/// implicit shell, or that cannot be split at all, keeps its meaning
/// through an explicit `/bin/sh -c` wrapper.
fn shell_form_argv(instruction: &Instruction) -> Vec<String> {
    let line = instruction.arguments_text().trim();
    if line.is_empty() {
        return Vec::new();
    }
    if !shell::needs_shell(line) {
        if let Some(words) = shlex::split(line) {
            return words;
        }
    }
    vec!["/bin/sh".to_string(), "-c".to_string(), line.to_string()]
}

fn format_env(node: &SourceNode, config: &Config) -> String {
    let instruction = node.instruction;
    let keyword = instruction.keyword.to_ascii_uppercase();
    let rest = rest_after_words(&node.original_multiline, 1);
    if rest.trim().is_empty() {
        return keyword;
    }
    // legacy space-separated form: `ENV key value` stays as written,
    // rewriting it could change the value
    let legacy = instruction
        .args
        .first()
        .is_some_and(|first| !first.contains('='));
    if legacy {
        return indent_following_lines(&format!("{keyword} {rest}"), config.indent_size);
    }
    let content = strip_trailing_whitespace(rest);
    indent_following_lines(&format!("{keyword} {content}"), config.indent_size)
}

/// Labels come out sorted by key, each value double-quoted.
fn format_label(node: &SourceNode, config: &Config) -> String {
    let instruction = node.instruction;
    let mut labels: BTreeMap<String, String> = BTreeMap::new();
    let words = shlex::split(instruction.arguments_text()).unwrap_or_default();
    for word in &words {
        if let Some((key, value)) = word.split_once('=') {
            labels.insert(
                key.trim_matches('"').to_string(),
                value.trim_matches('"').to_string(),
            );
        }
    }
    if labels.is_empty() {
        return format_basic(node, config);
    }
    let pairs: Vec<String> = labels
        .iter()
        .map(|(key, value)| format!("{key}={}", quote_value(value)))
        .collect();
    format!(
        "{} {}",
        instruction.keyword.to_ascii_uppercase(),
        pairs.join(" ")
    )
}

fn quote_value(value: &str) -> String {
    let mut quoted = String::from("\"");
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// MAINTAINER is deprecated; it comes back as the OCI authors label.
fn format_maintainer(node: &SourceNode) -> String {
    let author = node.instruction.arguments_text().trim().trim_matches('"');
    format!("LABEL org.opencontainers.image.authors=\"{author}\"")
}

/// The wrapped instruction formats like a top-level one and the result
/// rides behind the uppercased keyword. An unrecognized child keeps the
/// whole line as written.
fn format_onbuild(node: &SourceNode, config: &Config, escape: char) -> String {
    if node.children.len() == 1 {
        if let Some(child) = format_node(&node.children[0], config, escape) {
            return format!("{} {child}", node.instruction.keyword.to_ascii_uppercase());
        }
    }
    node.original_multiline.clone()
}

fn format_run(node: &SourceNode, config: &Config, escape: char) -> String {
    let instruction = node.instruction;
    let keyword = instruction.keyword.to_ascii_uppercase();
    if instruction.exec_form {
        let array = serialize_string_array(&instruction.args);
        return with_flags(&keyword, instruction, array);
    }
    if let Some(first) = instruction.heredocs.first() {
        if first.file_descriptor != 0 {
            warn!(
                fd = first.file_descriptor,
                "heredoc does not target stdin, formatting its body anyway"
            );
        }
        let body = shell::format_script(&first.content, config);
        return format!("{keyword} {}", reassemble_heredocs(instruction, Some(body)));
    }
    let rest = rest_after_words(&node.original_multiline, 1 + instruction.flags.len());
    if rest.trim().is_empty() {
        if instruction.flags.is_empty() {
            return keyword;
        }
        return format!("{keyword} {}", instruction.flags.join(" "));
    }
    let content = if escape != parser::DEFAULT_ESCAPE {
        // a non-backslash escape char means the payload is not POSIX
        // continuation text; leave it as written
        ensure_newline(rest.to_string())
    } else {
        shell::format_fragment(rest, config)
    };
    with_flags(&keyword, instruction, content)
}

fn with_flags(keyword: &str, instruction: &Instruction, content: String) -> String {
    if instruction.flags.is_empty() {
        format!("{keyword} {content}")
    } else {
        format!("{keyword} {} {content}", instruction.flags.join(" "))
    }
}

/// Rebuilds a heredoc instruction: opening line, then each body
/// followed by its delimiter. `formatted_first` substitutes the first
/// body; later bodies stay verbatim.
fn reassemble_heredocs(instruction: &Instruction, formatted_first: Option<String>) -> String {
    let mut out = instruction.heredoc_opener();
    out.push('\n');
    for (i, heredoc) in instruction.heredocs.iter().enumerate() {
        match (i, &formatted_first) {
            (0, Some(body)) => out.push_str(body),
            _ => out.push_str(&heredoc.content),
        }
        out.push_str(&heredoc.name);
        out.push('\n');
    }
    out
}
