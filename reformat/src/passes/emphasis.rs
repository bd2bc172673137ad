use std::sync::LazyLock;

use regex::Regex;
use specdoc::fence::is_fence_line;

use crate::error::Error;

/// An absolute path ending in a file extension, e.g. `/app/api/route.ts`.
static FILE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[\w/-]+\.\w+").expect("valid path pattern"));

const BOLD: &str = "**";

/// Compiled keyword vocabulary for the emphasis pass.
#[derive(Debug, Clone)]
pub struct Emphasis {
    keywords: Vec<(String, Regex)>,
}

impl Emphasis {
    /// Blank entries are skipped; they would match every word boundary.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, Error> {
        let keywords = keywords
            .iter()
            .map(|keyword| keyword.as_ref().trim())
            .filter(|keyword| !keyword.is_empty())
            .map(|keyword| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword)))
                    .map(|re| (keyword.to_string(), re))
                    .map_err(|source| Error::Keyword {
                        keyword: keyword.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Emphasis { keywords })
    }

    /// Bold every keyword, then put file paths in inline code.
    ///
    /// Code inside fences is rewritten too. Fence lines are left alone so
    /// their language tags survive.
    pub fn apply(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| {
                if is_fence_line(line) {
                    line.to_string()
                } else {
                    self.apply_line(line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn apply_line(&self, line: &str) -> String {
        let bolded = self
            .keywords
            .iter()
            .fold(line.to_string(), |line, (keyword, re)| {
                bold_matches(&line, keyword, re)
            });
        mark_paths(&bolded)
    }
}

/// Replace whole-word matches with the keyword's own spelling in bold,
/// leaving matches that already touch a `*`.
fn bold_matches(text: &str, keyword: &str, re: &Regex) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in re.find_iter(text) {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        if before == Some('*') || after == Some('*') {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str(BOLD);
        out.push_str(keyword);
        out.push_str(BOLD);
        last = m.end();
    }

    out.push_str(&text[last..]);
    out
}

/// Wrap absolute file paths in backticks.
pub fn mark_paths(text: &str) -> String {
    FILE_PATH.replace_all(text, "`$0`").into_owned()
}
