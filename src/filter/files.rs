//! Per-file keep/exclude decisions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filter::patterns::ExclusionMatcher;

/// Diff word count below which a matching file is excluded. A larger diff
/// against a noise path is unusual enough to warrant review, so it is kept.
pub const DIFF_WORD_THRESHOLD: usize = 800;

/// A changed file in the review context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path of the file, relative to the repository root.
    pub path: String,
    /// Change text for the file, when the host supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl FileRecord {
    /// Creates a record from a path and optional diff text.
    pub fn new(path: impl Into<String>, diff: Option<impl Into<String>>) -> Self {
        Self {
            path: path.into(),
            diff: diff.map(Into::into),
        }
    }

    /// Number of whitespace-delimited tokens in the diff; 0 when absent.
    pub fn diff_word_count(&self) -> usize {
        self.diff
            .as_deref()
            .map_or(0, |diff| diff.split_whitespace().count())
    }
}

/// Applies the exclusion matcher to individual file records.
#[derive(Debug, Clone)]
pub struct FileFilter {
    matcher: ExclusionMatcher,
}

impl FileFilter {
    /// Creates a filter over a compiled exclusion matcher.
    pub fn new(matcher: ExclusionMatcher) -> Self {
        Self { matcher }
    }

    /// Returns true when the record should be forwarded for review.
    ///
    /// A file is excluded only when its path matches the exclusion pattern
    /// and its diff is below [`DIFF_WORD_THRESHOLD`] words.
    pub fn keep(&self, record: &FileRecord) -> bool {
        !self.matcher.is_match(&record.path) || record.diff_word_count() >= DIFF_WORD_THRESHOLD
    }

    /// Keep/exclude decision over an untyped JSON element.
    ///
    /// The filter only suppresses recognizable noise files: non-object
    /// values and objects without a string `path` are always kept, and a
    /// missing or non-string `diff` counts as zero words. Never errors.
    pub fn keep_value(&self, value: &Value) -> bool {
        let Some(object) = value.as_object() else {
            return true;
        };
        let Some(path) = object.get("path").and_then(Value::as_str) else {
            return true;
        };

        let diff_words = object
            .get("diff")
            .and_then(Value::as_str)
            .map_or(0, |diff| diff.split_whitespace().count());

        !self.matcher.is_match(path) || diff_words >= DIFF_WORD_THRESHOLD
    }
}
