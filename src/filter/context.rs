//! Context shape detection and normalization.
//!
//! Hosts supply the review context in one of three shapes: an ordered list of
//! entries, a wrapper object exposing changed files under `diff.files`, or an
//! opaque value. Normalization filters out noise files and passes everything
//! it does not recognize through unchanged; it runs to completion before the
//! payload is serialized, so excluded files never reach the outbound request.

use serde_json::Value;
use tracing::debug;

use crate::filter::files::FileFilter;

/// The three accepted context shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextShape {
    /// Ordered sequence of entries, each a file-like object or an opaque value.
    EntryList,
    /// Object carrying a sequence of file records under `diff.files`.
    DiffWrapper,
    /// Anything else; passed through unmodified.
    Opaque,
}

/// Detects which shape the caller supplied.
pub fn classify(context: &Value) -> ContextShape {
    if context.is_array() {
        return ContextShape::EntryList;
    }

    if context
        .get("diff")
        .and_then(|diff| diff.get("files"))
        .is_some_and(Value::is_array)
    {
        return ContextShape::DiffWrapper;
    }

    ContextShape::Opaque
}

/// Produces the filtered context that will be serialized into the request.
///
/// Entry lists are mapped per element: non-object entries are kept
/// unconditionally, object entries are individually run through the file
/// filter. Diff wrappers reduce to the kept `diff.files` entries in original
/// order. Unrecognized shapes come back unchanged — normalization is a
/// no-op, never an error, for input it does not understand.
pub fn normalize(context: &Value, filter: &FileFilter) -> Value {
    match classify(context) {
        ContextShape::EntryList => {
            // Each element's inclusion depends only on that element.
            let entries = context.as_array().map_or_else(Vec::new, |entries| {
                entries
                    .iter()
                    .filter(|entry| filter.keep_value(entry))
                    .cloned()
                    .collect()
            });
            debug!(kept = entries.len(), "Filtered entry-list context");
            Value::Array(entries)
        }
        ContextShape::DiffWrapper => {
            let files: Vec<Value> = context["diff"]["files"]
                .as_array()
                .map_or_else(Vec::new, |files| {
                    files
                        .iter()
                        .filter(|file| filter.keep_value(file))
                        .cloned()
                        .collect()
                });
            debug!(kept = files.len(), "Filtered diff-wrapper context");
            Value::Array(files)
        }
        ContextShape::Opaque => context.clone(),
    }
}
