use std::sync::LazyLock;

use regex::Regex;

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.+)$").expect("valid numbered line pattern"));

/// Turn bare numbered lines into level-2 headings: `1. Overview` becomes
/// `## 1. Overview`.
///
/// Runs without fence tracking, so numbered list items are promoted too.
pub fn normalize_headings(text: &str) -> String {
    text.split('\n')
        .map(normalize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_line(line: &str) -> String {
    if line.starts_with('#') {
        return line.to_string();
    }
    match NUMBERED_LINE.captures(line.trim()) {
        Some(caps) => format!("## {}. {}", &caps[1], &caps[2]),
        None => line.to_string(),
    }
}
