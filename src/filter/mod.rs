//! Change-set filtering: exclusion patterns, per-file decisions, and
//! context normalization.

pub mod context;
pub mod files;
pub mod patterns;

pub use context::{classify, normalize, ContextShape};
pub use files::{FileFilter, FileRecord, DIFF_WORD_THRESHOLD};
pub use patterns::ExclusionMatcher;
