use std::sync::LazyLock;

use regex::Regex;

static FOUR_OR_MORE_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{4,}").expect("valid newline run pattern"));

static THREE_OR_MORE_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline run pattern"));

/// How far runs of blank lines are squeezed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collapse {
    /// At most two blank lines in a row. Used by the enhance pipeline.
    Loose,
    /// At most one blank line in a row. Used by the format pipeline.
    Tight,
}

/// Squeeze blank-line runs, drop trailing whitespace and end the text with
/// exactly one newline.
pub fn collapse_blank_lines(text: &str, mode: Collapse) -> String {
    let collapsed = match mode {
        Collapse::Loose => FOUR_OR_MORE_NEWLINES.replace_all(text, "\n\n\n"),
        Collapse::Tight => THREE_OR_MORE_NEWLINES.replace_all(text, "\n\n"),
    };
    let mut out = collapsed.trim_end().to_string();
    out.push('\n');
    out
}
