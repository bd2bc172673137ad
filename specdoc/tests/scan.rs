use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use specdoc::document::first_difference;
use specdoc::fence::{fence_language, unterminated_fence};
use specdoc::heading::parse_heading;
use specdoc::line::{is_list_item, is_numbered_section};
use specdoc::{Document, FenceTracker, Heading, LineRole, anchor, extract_headings};

fn headings(source: &str) -> Vec<(u8, String)> {
    extract_headings(&Document::parse(source))
        .into_iter()
        .map(|h| (h.level, h.title))
        .collect()
}

/// Headings as a CommonMark parser sees them (plain-text titles only).
fn cmark_headings(source: &str) -> Vec<(u8, String)> {
    let mut out = Vec::new();
    let mut current: Option<(u8, String)> = None;
    for event in Parser::new(source) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let level = match level {
                    HeadingLevel::H1 => 1,
                    HeadingLevel::H2 => 2,
                    HeadingLevel::H3 => 3,
                    HeadingLevel::H4 => 4,
                    HeadingLevel::H5 => 5,
                    HeadingLevel::H6 => 6,
                };
                current = Some((level, String::new()));
            }
            Event::Text(text) => {
                if let Some((_, title)) = current.as_mut() {
                    title.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = current.take() {
                    out.push(heading);
                }
            }
            _ => {}
        }
    }
    out
}

#[test]
fn document_round_trips_text() {
    let text = "# Title\n\nbody\n";
    let doc = Document::parse(text);
    assert_eq!(doc.line_count(), 4);
    assert_eq!(doc.newline_count(), 3);
    assert_eq!(doc.to_string(), text);
}

#[test]
fn line_spans_point_into_text() {
    let text = "ab\ncde\n\nf";
    let doc = Document::parse(text);
    assert_eq!(&text[doc.line_span(1)], "cde");
    assert_eq!(doc.line_span(2), 7..7);
    assert_eq!(&text[doc.line_span(3)], "f");
}

#[test]
fn first_difference_finds_changed_line() {
    let a = Document::parse("a\nb\nc");
    assert_eq!(first_difference(&a, &Document::parse("a\nb\nc")), None);
    assert_eq!(first_difference(&a, &Document::parse("a\nx\nc")), Some(1));
    assert_eq!(first_difference(&a, &Document::parse("a\nb")), Some(2));
}

#[test]
fn fence_roles_follow_pairs() {
    let mut tracker = FenceTracker::new();
    let roles: Vec<LineRole> = ["text", "```rust", "let x = 1;", "```", "more"]
        .into_iter()
        .map(|l| tracker.advance(l))
        .collect();
    assert_eq!(
        roles,
        vec![
            LineRole::Text,
            LineRole::OpeningFence,
            LineRole::Code,
            LineRole::ClosingFence,
            LineRole::Text,
        ]
    );
    assert_eq!(tracker.open_fence(), None);
}

#[test]
fn unterminated_fence_is_reported_by_line() {
    assert_eq!(unterminated_fence(["a", "```", "b"]), Some(1));
    assert_eq!(unterminated_fence(["```", "b", "```"]), None);
}

#[test]
fn fence_language_tags() {
    assert_eq!(fence_language("```json"), Some("json"));
    assert_eq!(fence_language("  ```  "), None);
    assert_eq!(fence_language("```ts "), Some("ts"));
}

#[test]
fn heading_markup() {
    assert_eq!(parse_heading("## 1. Overview"), Some(Heading::new(2, "1. Overview")));
    assert_eq!(parse_heading("###### deep  "), Some(Heading::new(6, "deep")));
    assert_eq!(parse_heading("####### too deep"), None);
    assert_eq!(parse_heading("#no-space"), None);
    assert_eq!(parse_heading("## "), None);
}

#[test]
fn extractor_keeps_document_order() {
    let src = "# Doc\n## A\n### A.1\n## B\n";
    assert_eq!(
        headings(src),
        vec![
            (1, "Doc".to_string()),
            (2, "A".to_string()),
            (3, "A.1".to_string()),
            (2, "B".to_string()),
        ]
    );
}

#[test]
fn extractor_ignores_headings_inside_fences() {
    let src = "# Doc\n\n```bash\n# install deps\nnpm ci\n```\n\n## Usage\n\n```\n## not a heading\n```\n";
    assert_eq!(
        headings(src),
        vec![(1, "Doc".to_string()), (2, "Usage".to_string())]
    );
}

#[test]
fn extractor_agrees_with_commonmark_on_fenced_documents() {
    let src = "# Guide\n\n## Setup\n\n```sh\n# comment\n```\n\n### Details\n\n```\n## fake\n```\n\n## 2. Next\n";
    assert_eq!(headings(src), cmark_headings(src));
}

#[test]
fn unterminated_fence_hides_the_rest() {
    let src = "## Before\n```\n## After\n";
    assert_eq!(headings(src), vec![(2, "Before".to_string())]);
}

#[test]
fn anchors_follow_static_site_convention() {
    assert_eq!(anchor("1. Overview"), "1-overview");
    assert_eq!(anchor("Data Model (v2)"), "data-model-v2");
    assert_eq!(anchor("snake_case and-hyphen"), "snake_case-and-hyphen");
    assert_eq!(anchor("3. 핵심 도메인 모듈"), "3-핵심-도메인-모듈");
    assert_eq!(anchor("Next.js 설정"), "nextjs-설정");
}

#[test]
fn line_classification() {
    assert!(is_list_item("- a"));
    assert!(is_list_item("  * nested"));
    assert!(is_list_item("10. ten"));
    assert!(!is_list_item("---"));
    assert!(!is_list_item("**bold**"));
    assert!(is_numbered_section("## 2. Next"));
    assert!(!is_numbered_section("### 2. Next"));
    assert!(!is_numbered_section("## Next"));
}
