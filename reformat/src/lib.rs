pub mod check;
pub mod config;
pub mod error;
pub mod fs;
pub mod passes;
pub mod pipeline;

pub use config::Config;
pub use error::Error;
pub use pipeline::{Rewrite, enhance, format};
