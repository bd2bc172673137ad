use specdoc::line::{is_blank, is_numbered_section};
use specdoc::{FenceTracker, LineRole};

pub const RULE: &str = "---";

/// Put a horizontal rule, padded by blank lines, before every numbered
/// level-2 heading (`## 3. Storage`), the first one included.
pub fn insert_dividers(text: &str) -> String {
    let mut tracker = FenceTracker::new();
    let mut out: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if tracker.advance(line) == LineRole::Text && is_numbered_section(line) {
            if out.last().is_some_and(|prev| !is_blank(prev)) {
                out.push("");
            }
            out.push(RULE);
            out.push("");
        }
        out.push(line);
    }

    out.join("\n")
}
