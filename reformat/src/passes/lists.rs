use specdoc::line::{is_blank, is_list_item, starts_with_heading_marker};
use specdoc::{FenceTracker, LineRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    OutsideList,
    InsideList,
}

/// Separate list blocks from the surrounding text with blank lines.
///
/// A heading right after a list does not close it, so no blank line is
/// forced between them. Fenced code is copied through. List items keep
/// their indentation instead of being stripped, so nested items and the
/// table of contents stay nested.
pub fn format_lists(text: &str) -> String {
    let mut tracker = FenceTracker::new();
    let mut state = ListState::OutsideList;
    let mut out: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let role = tracker.advance(line);
        if role == LineRole::Code {
            out.push(line);
            continue;
        }

        if role == LineRole::Text && is_list_item(line) {
            if state == ListState::OutsideList && ends_with_text(&out) {
                out.push("");
            }
            state = ListState::InsideList;
        } else if state == ListState::InsideList
            && !is_blank(line)
            && !starts_with_heading_marker(line)
        {
            state = ListState::OutsideList;
            if ends_with_text(&out) {
                out.push("");
            }
        }
        out.push(line);
    }

    out.join("\n")
}

fn ends_with_text(out: &[&str]) -> bool {
    out.last().is_some_and(|line| !is_blank(line))
}
