use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::fs;

/// Keywords wrapped in bold by the emphasis pass, spelled the way they are
/// written back.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "IMPORTANT",
    "중요",
    "주의",
    "NOTE",
    "참고",
    "tRPC",
    "Prisma",
    "Supabase",
    "Next.js",
    "Clean Architecture",
    "클린 아키텍처",
];

pub const DEFAULT_TOC_TITLE: &str = "Table of Contents";

/// Longest line the layout pass leaves unsplit, in characters.
pub const DEFAULT_WRAP_WIDTH: usize = 120;

/// Tunables shared by both pipelines.
///
/// Every field is optional in the TOML file:
///
/// ```toml
/// keywords = ["NOTE", "Rust"]
/// toc_title = "Contents"
/// wrap_width = 100
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub keywords: Vec<String>,
    pub toc_title: String,
    pub wrap_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            toc_title: DEFAULT_TOC_TITLE.to_string(),
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_text(path)?;
        toml::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` when given, otherwise fall back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
