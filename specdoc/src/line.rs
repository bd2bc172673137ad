//! Single-line classification shared by the rewriting passes.

use std::sync::LazyLock;

use regex::Regex;

static BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+]\s+").expect("valid bullet pattern"));

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+").expect("valid numbered pattern"));

static NUMBERED_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+\d+\.").expect("valid section pattern"));

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// `- a`, `* a`, `+ a` or `12. a`, ignoring indentation.
pub fn is_list_item(line: &str) -> bool {
    let trimmed = line.trim();
    BULLET_ITEM.is_match(trimmed) || NUMBERED_ITEM.is_match(trimmed)
}

/// A trimmed line that starts with a heading marker. Looser than heading
/// markup: `#tag` counts too.
pub fn starts_with_heading_marker(line: &str) -> bool {
    line.trim().starts_with('#')
}

/// A level-2 heading whose title starts with a section number, e.g. `## 2. Next`.
pub fn is_numbered_section(line: &str) -> bool {
    NUMBERED_SECTION.is_match(line)
}
