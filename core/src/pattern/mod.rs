pub mod core;
pub mod document;
pub mod info;

pub use self::core::*;
pub use document::*;
pub use info::{pattern_hash, PatternInfo, PatternStatus};
