//! Version counter: the build number persisted in the VERSION file.

pub mod parse;
pub mod store;

pub use parse::parse_counter;
pub use store::VersionCounter;
