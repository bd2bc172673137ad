use specdoc::document::first_difference;
use specdoc::fence::unterminated_fence;
use specdoc::{Document, Notice};

use crate::pipeline::Rewrite;

/// Compare a document with its rewrite without writing anything.
///
/// Reports an unterminated fence as a warning and the first line the rewrite
/// would change as an error. An empty result means the document is already
/// in shape.
pub fn check(source: &str, rewrite: &Rewrite, file_id: usize) -> Vec<Notice> {
    let original = Document::parse(source);
    let mut notices = Vec::new();

    if let Some(line) = unterminated_fence(original.lines().iter().map(String::as_str)) {
        notices.push(
            Notice::warning("unterminated code fence", original.line_span(line), file_id)
                .with_note("the rest of the document is treated as code"),
        );
    }

    let rewritten = Document::parse(&rewrite.text);
    if let Some(line) = first_difference(&original, &rewritten) {
        let span = if line < original.line_count() {
            original.line_span(line)
        } else {
            source.len()..source.len()
        };
        let mut notice = Notice::error("document would be rewritten", span, file_id);
        if let Some(expected) = rewritten.line(line) {
            notice = notice.with_note(format!("line {} becomes: {:?}", line + 1, expected));
        }
        if !rewrite.changed_by.is_empty() {
            notice = notice.with_note(format!("changed by: {}", rewrite.changed_by.join(", ")));
        }
        notices.push(notice);
    }

    notices
}
