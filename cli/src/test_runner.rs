//! Runner for `.test.md` fixtures.
//!
//! A fixture is a Markdown document preceded by TOML front matter between
//! `+++` lines. The front matter names the transform to run and what its
//! output must look like:
//!
//! ```text
//! +++
//! description = "lists get blank lines around them"
//! transform = "lists"
//! expect_output = """
//! Para.
//!
//! - a
//! """
//! +++
//! Para.
//! - a
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use codespan_reporting::term::termcolor::{
    Color, ColorChoice, ColorSpec, StandardStream, WriteColor,
};
use serde::Deserialize;

use reformat::passes::{
    Collapse, Emphasis, collapse_blank_lines, format_lists, generate_toc, insert_dividers,
    insert_toc, layout, normalize_headings, tag_code_blocks,
};
use reformat::{Config, Rewrite};
use specdoc::{Document, Notice, extract_headings};

const FRONT_MATTER: &str = "+++";
const FIXTURE_SUFFIX: &str = ".test.md";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectedNotice {
    /// Substring that must appear in the notice message.
    pub contains: String,

    /// If set, the notice must point at this 1-based source line.
    #[serde(default)]
    pub line: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestConfig {
    #[serde(default)]
    pub description: Option<String>,

    /// `enhance`, `format`, or the name of a single pass.
    #[serde(default = "default_transform")]
    pub transform: String,

    /// Exact expected output.
    #[serde(default)]
    pub expect_output: Option<String>,

    /// Substrings the output must contain.
    #[serde(default)]
    pub expect_contains: Vec<String>,

    /// Substrings the output must not contain.
    #[serde(default)]
    pub expect_absent: Vec<String>,

    /// Notices a `--check` run must report. If present (even empty), count
    /// and content are checked.
    #[serde(default)]
    pub expect_notices: Option<Vec<ExpectedNotice>>,

    /// Overrides for keywords, TOC title and wrap width.
    #[serde(default)]
    pub config: Config,
}

fn default_transform() -> String {
    "enhance".to_string()
}

/// Split a fixture into its front matter and document body.
fn parse_fixture(content: &str) -> Result<(TestConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}');
    let rest = content
        .strip_prefix(FRONT_MATTER)
        .ok_or("missing opening +++ front matter delimiter")?;
    let rest = rest
        .strip_prefix('\n')
        .or_else(|| rest.strip_prefix("\r\n"))
        .ok_or("opening +++ must be on its own line")?;

    let close = rest
        .find("\n+++")
        .ok_or("missing closing +++ front matter delimiter")?;
    let front = rest[..close].trim_end_matches('\r');
    let after = &rest[close + 1 + FRONT_MATTER.len()..];
    let body = after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))
        .unwrap_or(after);

    let config: TestConfig = toml::from_str(front).map_err(|e| format!("TOML parse error: {}", e))?;
    Ok((config, body))
}

/// Run the named transform. Single passes report themselves as the only
/// changing pass when their output differs.
fn apply_transform(name: &str, source: &str, config: &Config) -> Result<Rewrite, String> {
    let (pass, text): (&'static str, String) = match name {
        "enhance" => return reformat::enhance(source, config).map_err(|e| e.to_string()),
        "format" => return Ok(reformat::format(source, config)),
        "headings" => ("headings", normalize_headings(source)),
        "toc" => {
            let headings = extract_headings(&Document::parse(source));
            let toc = generate_toc(&headings, &config.toc_title);
            ("toc", insert_toc(source, &toc))
        }
        "code-tags" => ("code-tags", tag_code_blocks(source)),
        "dividers" => ("dividers", insert_dividers(source)),
        "emphasis" => {
            let emphasis = Emphasis::new(&config.keywords).map_err(|e| e.to_string())?;
            ("emphasis", emphasis.apply(source))
        }
        "lists" => ("lists", format_lists(source)),
        "layout" => ("layout", layout(source, config.wrap_width)),
        "whitespace-loose" => ("whitespace", collapse_blank_lines(source, Collapse::Loose)),
        "whitespace-tight" => ("whitespace", collapse_blank_lines(source, Collapse::Tight)),
        other => return Err(format!("unknown transform '{}'", other)),
    };

    let changed_by = if text == source { Vec::new() } else { vec![pass] };
    Ok(Rewrite {
        text,
        headings: Vec::new(),
        changed_by,
    })
}

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub label: String,
    pub outcome: TestOutcome,
}

fn run_single_test(path: &Path) -> TestResult {
    let fallback_label = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.trim_end_matches(FIXTURE_SUFFIX).to_string())
        .unwrap_or_else(|| "?".to_string());

    let fail = |label: String, reason: String| TestResult {
        path: path.to_path_buf(),
        label,
        outcome: TestOutcome::Fail(reason),
    };

    let content = match reformat::fs::read_text(path) {
        Ok(c) => c,
        Err(e) => return fail(fallback_label, e.to_string()),
    };

    let (config, source) = match parse_fixture(&content) {
        Ok(pair) => pair,
        Err(e) => return fail(fallback_label, format!("front matter error: {}", e)),
    };
    let label = config.description.clone().unwrap_or(fallback_label);

    let rewrite = match apply_transform(&config.transform, source, &config.config) {
        Ok(r) => r,
        Err(e) => return fail(label, e),
    };

    let reason = check_output(&config, &rewrite.text).or_else(|| {
        config.expect_notices.as_ref().and_then(|expected| {
            let notices = reformat::check::check(source, &rewrite, 0);
            check_notices(source, &notices, expected)
        })
    });

    match reason {
        Some(reason) => fail(label, reason),
        None => TestResult {
            path: path.to_path_buf(),
            label,
            outcome: TestOutcome::Pass,
        },
    }
}

/// Returns `Some(reason)` when the output misses an expectation.
fn check_output(config: &TestConfig, actual: &str) -> Option<String> {
    if let Some(expected) = &config.expect_output {
        if actual != expected.as_str() {
            return Some(format!(
                "output mismatch\n--- expected\n{}\n--- actual\n{}",
                expected, actual
            ));
        }
    }
    if let Some(missing) = config.expect_contains.iter().find(|s| !actual.contains(s.as_str())) {
        return Some(format!("output does not contain {:?}\n--- actual\n{}", missing, actual));
    }
    if let Some(present) = config.expect_absent.iter().find(|s| actual.contains(s.as_str())) {
        return Some(format!("output unexpectedly contains {:?}\n--- actual\n{}", present, actual));
    }
    None
}

/// Convert a byte offset in `source` to a 1-based line number.
fn byte_offset_to_line(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
        + 1
}

/// Check reported notices against expectations. Returns `Some(reason)` on mismatch.
fn check_notices(source: &str, notices: &[Notice], expected: &[ExpectedNotice]) -> Option<String> {
    if notices.len() != expected.len() {
        let actual: Vec<String> = notices.iter().map(|n| format!("  - {}", n.message)).collect();
        return Some(format!(
            "expected {} notice(s), got {}\n{}",
            expected.len(),
            notices.len(),
            if actual.is_empty() {
                "  (none)".to_string()
            } else {
                actual.join("\n")
            }
        ));
    }

    for (i, (notice, want)) in notices.iter().zip(expected).enumerate() {
        if !notice.message.contains(&want.contains) {
            return Some(format!(
                "notice[{}]: expected message containing {:?}, got {:?}",
                i, want.contains, notice.message
            ));
        }
        if let Some(line) = want.line {
            let actual_line = byte_offset_to_line(source, notice.span.start);
            if actual_line != line {
                return Some(format!(
                    "notice[{}]: expected on line {}, but it points at line {}",
                    i, line, actual_line
                ));
            }
        }
    }

    None
}

/// Fixtures grouped by category (directory relative to `root`, "" for root
/// itself), both levels sorted.
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    if root.is_file() {
        categories.entry(String::new()).or_default().push(root.to_path_buf());
        return categories;
    }
    collect_fixtures(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_fixtures(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect_fixtures(&path, root, out);
            continue;
        }
        let is_fixture = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(FIXTURE_SUFFIX));
        if is_fixture {
            let category = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            out.entry(category).or_default().push(path);
        }
    }
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

/// List available categories for the given test path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }
    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return;
    }
    eprintln!("available categories:");
    for (category, files) in &categories {
        eprintln!("  {} ({} tests)", category_label(category), files.len());
    }
}

/// Keep the categories that were asked for (a prefix selects subfolders too).
fn select_categories<'a>(
    all: &'a BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<&'a str, &'a Vec<PathBuf>> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v)).collect();
    }

    let mut selected = BTreeMap::new();
    for req in requested {
        let req = req.trim_matches('/');
        let prefix = format!("{}/", req);
        let before = selected.len();
        for (category, files) in all {
            if category == req || category.starts_with(&prefix) {
                selected.insert(category.as_str(), files);
            }
        }
        if selected.len() == before {
            let available: Vec<&str> = all.keys().map(|k| category_label(k)).collect();
            eprintln!(
                "warning: category '{}' not found (available: {})",
                req,
                available.join(", ")
            );
        }
    }
    selected
}

/// Colored status words on stderr.
struct Reporter {
    stream: StandardStream,
}

impl Reporter {
    fn new(no_color: bool) -> Self {
        let choice = if no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        Reporter {
            stream: StandardStream::stderr(choice),
        }
    }

    fn styled(&mut self, text: &str, color: Option<Color>, bold: bool) {
        let mut spec = ColorSpec::new();
        spec.set_fg(color).set_bold(bold);
        let _ = self.stream.set_color(&spec);
        let _ = write!(self.stream, "{}", text);
        let _ = self.stream.reset();
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.stream, "{}", text);
    }

    fn status(&mut self, passed: bool, label: &str) {
        let _ = write!(self.stream, "  ");
        if passed {
            self.styled("PASS", Some(Color::Green), false);
        } else {
            self.styled("FAIL", Some(Color::Red), false);
        }
        self.line(&format!("  {}", label));
    }

    fn heading(&mut self, text: &str) {
        self.line("");
        self.styled(text, None, true);
        self.line("");
    }
}

/// Run all fixtures under `path` (or a single file).
/// If `categories` is non-empty, only run tests in those categories.
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let all = discover_categorized(path);
    if all.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return 1;
    }

    let selected = select_categories(&all, categories);
    if selected.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut reporter = Reporter::new(no_color);
    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (category, files) in &selected {
        if !path.is_file() {
            reporter.heading(category_label(category));
        }
        for file in files.iter() {
            let result = run_single_test(file);
            let ok = matches!(result.outcome, TestOutcome::Pass);
            reporter.status(ok, &result.label);
            if ok {
                passed += 1;
            } else {
                failures.push(result);
            }
        }
    }

    if !failures.is_empty() {
        reporter.line("");
        reporter.line("failures:");
        for failure in &failures {
            reporter.line("");
            reporter.line(&format!("  --- {} ---", failure.path.display()));
            if let TestOutcome::Fail(reason) = &failure.outcome {
                for line in reason.lines() {
                    reporter.line(&format!("  {}", line));
                }
            }
        }
    }

    reporter.line("");
    let _ = write!(reporter.stream, "test result: ");
    if failures.is_empty() {
        reporter.styled("ok", Some(Color::Green), false);
        reporter.line(&format!(". {} passed, 0 failed", passed));
        0
    } else {
        reporter.styled("FAILED", Some(Color::Red), false);
        reporter.line(&format!(
            ". {} passed, {} failed (of {})",
            passed,
            failures.len(),
            passed + failures.len()
        ));
        1
    }
}
