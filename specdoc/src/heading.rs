use std::sync::LazyLock;

use regex::Regex;

use crate::document::Document;
use crate::fence::{FenceTracker, LineRole};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid heading pattern"));

/// Characters kept in an anchor: word characters, whitespace, Hangul
/// syllables and hyphens.
static ANCHOR_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s가-힣-]").expect("valid anchor pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// A heading found in a document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1 = document title (`#`), 2-6 = sections (`##`-`######`).
    pub level: u8,
    /// Heading text with surrounding whitespace removed.
    pub title: String,
}

impl Heading {
    pub fn new(level: u8, title: impl Into<String>) -> Self {
        Heading {
            level,
            title: title.into(),
        }
    }

    pub fn anchor(&self) -> String {
        anchor(&self.title)
    }
}

/// Match a single line against heading markup.
pub fn parse_heading(line: &str) -> Option<Heading> {
    let caps = HEADING.captures(line)?;
    Some(Heading {
        level: caps[1].len() as u8,
        title: caps[2].trim().to_string(),
    })
}

/// Collect the headings of a document, skipping everything between fences.
pub fn extract_headings(document: &Document) -> Vec<Heading> {
    let mut tracker = FenceTracker::new();
    document
        .lines()
        .iter()
        .filter(|line| tracker.advance(line) == LineRole::Text)
        .filter_map(|line| parse_heading(line))
        .collect()
}

/// Derive the link target for a heading title.
///
/// Follows the static-site convention: lowercase, drop punctuation and
/// symbols, hyphenate whitespace runs. `"1. Overview"` becomes `"1-overview"`.
pub fn anchor(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = ANCHOR_STRIP.replace_all(&lowered, "");
    WHITESPACE_RUN.replace_all(&stripped, "-").into_owned()
}
