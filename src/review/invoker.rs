//! Review invocation: normalize, dispatch, and deliver the verdict.

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, warn};

use crate::filter::{normalize, FileFilter};
use crate::review::client::ReviewClient;
use crate::review::prompts::build_messages;

/// Verdict substituted when the backend response carries no usable choice.
pub const FALLBACK_VERDICT: &str = "context was too big for api, try with smaller context object";

/// Outcome of one review invocation.
#[derive(Debug)]
pub enum ReviewOutcome {
    /// The backend returned a usable verdict.
    Completed(String),
    /// The backend answered but without usable content; the caller gets the
    /// fallback verdict.
    Degraded(String),
    /// The call itself failed (transport error, non-success status).
    Failed(anyhow::Error),
}

impl ReviewOutcome {
    /// Collapses the outcome into the string verdict the legacy host
    /// contract expects: completed text, or the fallback for everything else.
    pub fn into_verdict(self) -> String {
        match self {
            Self::Completed(text) => text,
            Self::Degraded(_) | Self::Failed(_) => FALLBACK_VERDICT.to_string(),
        }
    }
}

/// Drives a full review: context normalization followed by a single backend
/// call. Normalization fully determines the outbound payload before the call
/// is issued.
pub struct Reviewer {
    client: ReviewClient,
    filter: FileFilter,
}

impl Reviewer {
    /// Creates a reviewer over a backend client and a file filter.
    pub fn new(client: ReviewClient, filter: FileFilter) -> Self {
        Self { client, filter }
    }

    /// Runs one review and returns the tagged outcome.
    pub async fn review(&self, context: &Value, prompt: &str) -> ReviewOutcome {
        let normalized = normalize(context, &self.filter);

        let serialized = match serde_json::to_string(&normalized) {
            Ok(serialized) => serialized,
            Err(e) => return ReviewOutcome::Failed(e.into()),
        };
        debug!(
            context_len = serialized.len(),
            "Serialized normalized context"
        );

        let messages = build_messages(&serialized, prompt);

        match self.client.send_chat(messages).await {
            Ok(Some(text)) => ReviewOutcome::Completed(text),
            Ok(None) => {
                warn!("Backend response carried no usable choice");
                ReviewOutcome::Degraded("no usable choice in backend response".to_string())
            }
            Err(e) => ReviewOutcome::Failed(e),
        }
    }

    /// Callback-based boundary adapter reproducing the legacy host contract:
    /// the callback always receives `(None, verdict)`. Degraded outcomes
    /// collapse into the fallback verdict; failures do too, after being
    /// logged, because the host expects a string verdict and never a
    /// structured error.
    pub async fn review_with_callback<F>(&self, context: &Value, prompt: &str, callback: F)
    where
        F: FnOnce(Option<anyhow::Error>, String),
    {
        let outcome = self.review(context, prompt).await;
        if let ReviewOutcome::Failed(ref e) = outcome {
            warn!(error = %e, "Review call failed; delivering fallback verdict");
        }
        callback(None, outcome.into_verdict());
    }

    /// Runs one review and surfaces failures as errors, for callers that
    /// want transport problems distinguished from a degraded verdict.
    pub async fn review_strict(&self, context: &Value, prompt: &str) -> Result<String> {
        match self.review(context, prompt).await {
            ReviewOutcome::Completed(text) => Ok(text),
            ReviewOutcome::Degraded(_) => Ok(FALLBACK_VERDICT.to_string()),
            ReviewOutcome::Failed(e) => Err(e),
        }
    }
}
