//! Generic helpers over `serde_json::Value`: dotted-path access and deep merge

mod merge;
mod path;

pub use merge::deep_merge;
pub use path::{get_path, set_path, take_path, KeyPath, Segment, MAX_INDEX};
