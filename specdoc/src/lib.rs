pub mod document;
pub mod fence;
pub mod heading;
pub mod line;
pub mod notice;

pub use document::Document;
pub use fence::{FenceTracker, LineRole};
pub use heading::{Heading, anchor, extract_headings};
pub use notice::Notice;
