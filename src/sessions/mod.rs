//! Session extraction from a parsed SecureCRT document.
//!
//! - [`record`]: the exported [`SessionRecord`] and its defaults
//! - [`walker`]: the depth-first [`SessionWalker`]

pub mod record;
pub mod walker;

// Re-export main types
pub use record::{SessionRecord, DEFAULT_PORT, DEFAULT_PROTOCOL, PATH_SEPARATOR};
pub use walker::{SessionWalker, WalkSummary};
