use specdoc::{Document, Heading, extract_headings};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Error;
use crate::passes::{
    Collapse, Emphasis, collapse_blank_lines, format_lists, generate_toc, insert_dividers,
    insert_toc, layout, normalize_headings, tag_code_blocks,
};

/// Result of running a pipeline over a document.
#[derive(Debug, Clone)]
pub struct Rewrite {
    /// The rewritten document text.
    pub text: String,
    /// Headings the table of contents was built from. Empty for `format`.
    pub headings: Vec<Heading>,
    /// Names of the passes that changed the text, in the order they ran.
    pub changed_by: Vec<&'static str>,
}

/// Threads the text through passes and records which ones changed it.
#[derive(Default)]
struct Trace {
    changed_by: Vec<&'static str>,
}

impl Trace {
    fn apply(
        &mut self,
        name: &'static str,
        text: String,
        pass: impl FnOnce(&str) -> String,
    ) -> String {
        let next = pass(&text);
        if next != text {
            debug!(
                pass = name,
                lines_before = text.split('\n').count(),
                lines_after = next.split('\n').count(),
                "pass rewrote document"
            );
            self.changed_by.push(name);
        } else {
            debug!(pass = name, "pass left document unchanged");
        }
        next
    }
}

/// Enhance a formatted document: table of contents, code tags, section
/// dividers, emphasis, list spacing, then loose blank-line collapsing.
pub fn enhance(source: &str, config: &Config) -> Result<Rewrite, Error> {
    let emphasis = Emphasis::new(&config.keywords)?;
    let headings = extract_headings(&Document::parse(source));
    debug!(count = headings.len(), "extracted headings");

    let toc = generate_toc(&headings, &config.toc_title);
    let mut trace = Trace::default();
    let text = trace.apply("toc", source.to_string(), |t| insert_toc(t, &toc));
    let text = trace.apply("code-tags", text, tag_code_blocks);
    let text = trace.apply("dividers", text, insert_dividers);
    let text = trace.apply("emphasis", text, |t| emphasis.apply(t));
    let text = trace.apply("lists", text, format_lists);
    let text = trace.apply("whitespace", text, |t| {
        collapse_blank_lines(t, Collapse::Loose)
    });

    info!(
        headings = headings.len(),
        bytes_in = source.len(),
        bytes_out = text.len(),
        "enhanced document"
    );

    Ok(Rewrite {
        text,
        headings,
        changed_by: trace.changed_by,
    })
}

/// Format a raw document: numbered lines become headings, blocks are
/// spaced out, then blank lines collapse tightly.
pub fn format(source: &str, config: &Config) -> Rewrite {
    let mut trace = Trace::default();
    let text = trace.apply("headings", source.to_string(), normalize_headings);
    let text = trace.apply("layout", text, |t| layout(t, config.wrap_width));
    let text = trace.apply("whitespace", text, |t| {
        collapse_blank_lines(t, Collapse::Tight)
    });

    info!(
        bytes_in = source.len(),
        bytes_out = text.len(),
        "formatted document"
    );

    Rewrite {
        text,
        headings: Vec::new(),
        changed_by: trace.changed_by,
    }
}
