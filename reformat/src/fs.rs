use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Error;

/// File-name marker of a formatted document, swapped for
/// [`ENHANCED_MARKER`] when deriving the enhance output path.
pub const FORMATTED_MARKER: &str = "_formatted";
pub const ENHANCED_MARKER: &str = "_enhanced";

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String, Error> {
    let bytes = std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_text(path: &Path, text: &str) -> Result<(), Error> {
    std::fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Default output of the enhance pipeline: `spec_formatted.md` becomes
/// `spec_enhanced.md` next to it. A file name without the marker maps to
/// itself, so the input is overwritten.
pub fn enhanced_path(input: &Path) -> PathBuf {
    let Some(name) = input.file_name().and_then(|n| n.to_str()) else {
        return input.to_path_buf();
    };
    if !name.contains(FORMATTED_MARKER) {
        warn!(
            path = %input.display(),
            "file name has no '{FORMATTED_MARKER}' marker, output overwrites the input"
        );
        return input.to_path_buf();
    }
    input.with_file_name(name.replace(FORMATTED_MARKER, ENHANCED_MARKER))
}
