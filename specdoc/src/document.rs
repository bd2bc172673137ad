use std::fmt;
use std::ops::Range;

/// A Document is the full text of a Markdown file held as an ordered
/// sequence of lines.
///
/// Lines are obtained by splitting on `\n` only, so a trailing newline yields
/// a trailing empty line and joining the lines with `\n` gives back the
/// original text byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        Document {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Number of lines, counting the empty line after a trailing newline.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of `\n` characters in the text, the way line counts are
    /// reported in progress summaries.
    pub fn newline_count(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Byte range of line `index` (without its newline) in the joined text.
    pub fn line_span(&self, index: usize) -> Range<usize> {
        let start: usize = self.lines[..index.min(self.lines.len())]
            .iter()
            .map(|l| l.len() + 1)
            .sum();
        let len = self.lines.get(index).map_or(0, String::len);
        start..start + len
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Index of the first line at which two texts differ, comparing line by line.
/// Returns `None` when the texts are identical.
pub fn first_difference(a: &Document, b: &Document) -> Option<usize> {
    let common = a.line_count().min(b.line_count());
    (0..common)
        .find(|&i| a.lines[i] != b.lines[i])
        .or_else(|| (a.line_count() != b.line_count()).then_some(common))
}
