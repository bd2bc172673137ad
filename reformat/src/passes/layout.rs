use std::sync::LazyLock;

use regex::Regex;
use specdoc::line::is_list_item;
use specdoc::{FenceTracker, LineRole};

/// Heading markup as written by hand: the space after the hashes is optional.
static LOOSE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s*(.+)$").expect("valid heading pattern"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?。]\s+").expect("valid sentence pattern"));

/// Kind of the last line the layout pass looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Fence,
    Blank,
    Heading,
    List,
    Text,
}

/// General block spacing for the format pipeline.
///
/// Outside fenced code: runs of blank lines shrink to one, headings get a
/// space after their hashes and a blank line on both sides, lists are set
/// off from preceding text, other lines are trimmed and lines longer than
/// `wrap_width` characters are broken at sentence ends. Code blocks are
/// copied verbatim and get a blank line before and after.
pub fn layout(text: &str, wrap_width: usize) -> String {
    let mut tracker = FenceTracker::new();
    let mut out: Vec<String> = Vec::new();
    let mut prev: Option<Kind> = None;
    let mut after_code = false;

    for line in text.split('\n') {
        match tracker.advance(line) {
            LineRole::OpeningFence => {
                ensure_blank(&mut out);
                out.push(line.to_string());
                prev = Some(Kind::Fence);
                after_code = false;
                continue;
            }
            LineRole::ClosingFence => {
                out.push(line.to_string());
                prev = Some(Kind::Fence);
                after_code = true;
                continue;
            }
            LineRole::Code => {
                out.push(line.to_string());
                continue;
            }
            LineRole::Text => {}
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            if prev != Some(Kind::Blank) {
                out.push(String::new());
                prev = Some(Kind::Blank);
            }
            after_code = false;
            continue;
        }

        if after_code {
            out.push(String::new());
            after_code = false;
        }

        if trimmed.starts_with('#') {
            if let Some(caps) = LOOSE_HEADING.captures(trimmed) {
                ensure_blank(&mut out);
                out.push(format!("{} {}", &caps[1], caps[2].trim()));
                out.push(String::new());
                prev = Some(Kind::Heading);
                continue;
            }
        }

        if is_list_item(trimmed) {
            if !matches!(prev, Some(Kind::List | Kind::Blank | Kind::Heading)) {
                ensure_blank(&mut out);
            }
            out.push(trimmed.to_string());
            prev = Some(Kind::List);
            continue;
        }

        if trimmed.chars().count() > wrap_width {
            out.extend(wrap_sentences(trimmed, wrap_width));
        } else {
            out.push(trimmed.to_string());
        }
        prev = Some(Kind::Text);
    }

    out.join("\n")
}

fn ensure_blank(out: &mut Vec<String>) {
    if out.last().is_some_and(|line| !line.is_empty()) {
        out.push(String::new());
    }
}

/// Break `text` into lines of at most `width` characters at sentence ends.
///
/// A single sentence longer than `width` stays on one line.
pub fn wrap_sentences(text: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in SENTENCE_END.find_iter(text) {
        pieces.push(&text[last..m.start()]);
        pieces.push(m.as_str());
        last = m.end();
    }
    pieces.push(&text[last..]);

    let mut lines = Vec::new();
    let mut current = String::new();
    for piece in pieces {
        if current.chars().count() + piece.chars().count() <= width {
            current.push_str(piece);
        } else {
            if !current.is_empty() {
                lines.push(current.trim().to_string());
            }
            current = piece.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current.trim().to_string());
    }
    lines
}
