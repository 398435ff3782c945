//! # review-triage
//!
//! Change-set triage and AI review dispatch for code-review automation.
//!
//! Given a set of modified files and their diffs, review-triage decides which
//! files are worth forwarding to a hosted reasoning model, normalizes the
//! heterogeneous context shapes hosts supply into a single well-formed
//! payload, invokes the model, and returns its verdict.
//!
//! ## Quick Start
//!
//! ```rust
//! use review_triage::filter::{ExclusionMatcher, FileFilter, FileRecord};
//!
//! let filter = FileFilter::new(ExclusionMatcher::builtin().unwrap());
//! let record = FileRecord::new("Cargo.lock", Some("tiny change"));
//! assert!(!filter.keep(&record));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod review;

pub use crate::cli::Cli;
pub use crate::error::TriageError;

/// The current version of review-triage.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
