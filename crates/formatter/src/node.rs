//! Pairs each parsed instruction with the raw source text it spans.

use parser::Instruction;

/// The unit the formatter dispatches on: an instruction plus the
/// verbatim lines it covers. ONBUILD children carry their own
/// sub-command text so child formatters slice the right words.
pub(crate) struct SourceNode<'a> {
    pub instruction: &'a Instruction,
    /// `lines[start_line-1 .. end_line]` concatenated, or empty when the
    /// span is invalid.
    pub original_multiline: String,
    pub children: Vec<SourceNode<'a>>,
}

pub(crate) fn build_nodes<'a>(
    instructions: &'a [Instruction],
    lines: &[&str],
) -> Vec<SourceNode<'a>> {
    instructions
        .iter()
        .map(|instruction| SourceNode {
            instruction,
            original_multiline: slice_span(lines, instruction.start_line, instruction.end_line),
            children: instruction
                .children
                .iter()
                .map(|child| SourceNode {
                    instruction: child,
                    original_multiline: child.original.clone(),
                    children: Vec::new(),
                })
                .collect(),
        })
        .collect()
}

fn slice_span(lines: &[&str], start: usize, end: usize) -> String {
    if start == 0 || start > end || end > lines.len() {
        return String::new();
    }
    lines[start - 1..end].concat()
}
