use specdoc::fence::fence_language;
use specdoc::{FenceTracker, LineRole};

type Sniff = fn(&str) -> bool;

/// Content sniffers, checked in order against the trimmed first line of a
/// code block. The first hit decides the tag.
const LANGUAGE_RULES: &[(Sniff, &str)] = &[
    (looks_like_schema, "prisma"),
    (looks_like_data, "json"),
    (looks_like_script, "typescript"),
    (looks_like_source_tree, "plaintext"),
    (looks_like_http, "http"),
    (looks_like_shell, "bash"),
];

fn looks_like_schema(line: &str) -> bool {
    line.starts_with("model ") || line.contains("String") || line.contains("@id")
}

fn looks_like_data(line: &str) -> bool {
    line.starts_with('{') || line.starts_with('[')
}

fn looks_like_script(line: &str) -> bool {
    line.starts_with("import ") || line.starts_with("export ") || line.contains("const ")
}

fn looks_like_source_tree(line: &str) -> bool {
    line.starts_with("/app/") || line.starts_with("/components/")
}

fn looks_like_http(line: &str) -> bool {
    line.starts_with("GET ") || line.starts_with("POST ")
}

fn looks_like_shell(line: &str) -> bool {
    line.contains("npm ") || line.contains("npx ")
}

/// Guess a fence language from the first line of the block.
pub fn sniff_language(first_line: &str) -> Option<&'static str> {
    let line = first_line.trim();
    LANGUAGE_RULES
        .iter()
        .find(|(sniff, _)| sniff(line))
        .map(|(_, tag)| *tag)
}

/// Add a language tag to opening fences that have none.
///
/// Only the opening fence line is touched; tagged fences, closing fences and
/// code are copied through.
pub fn tag_code_blocks(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut tracker = FenceTracker::new();
    let mut out = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let role = tracker.advance(line);
        let tag = if role == LineRole::OpeningFence && fence_language(line).is_none() {
            lines.get(i + 1).and_then(|next| sniff_language(next))
        } else {
            None
        };

        match tag {
            Some(tag) => out.push(format!("{}{}", line.trim_end(), tag)),
            None => out.push(line.to_string()),
        }
    }

    out.join("\n")
}
