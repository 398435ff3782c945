//! Review request construction and dispatch to the reasoning backend.

pub mod client;
pub mod invoker;
pub mod prompts;

pub use client::ReviewClient;
pub use invoker::{ReviewOutcome, Reviewer, FALLBACK_VERDICT};
pub use prompts::{ChatMessage, Role};
