//! Rewriting passes. Each one takes the full text and returns the full
//! rewritten text; none of them shares state with another.

pub mod code_tags;
pub mod dividers;
pub mod emphasis;
pub mod headings;
pub mod layout;
pub mod lists;
pub mod toc;
pub mod whitespace;

pub use code_tags::{sniff_language, tag_code_blocks};
pub use dividers::insert_dividers;
pub use emphasis::{Emphasis, mark_paths};
pub use headings::normalize_headings;
pub use layout::layout;
pub use lists::format_lists;
pub use toc::{generate_toc, insert_toc};
pub use whitespace::{Collapse, collapse_blank_lines};
