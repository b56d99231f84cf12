// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Case-insensitive substring search over named text fields.

use crate::record::{FieldName, Record};

/// Search term lowered once, reused across a whole collection.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Build a matcher for `term`.
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    /// True when the term is empty (identity filter).
    pub fn is_identity(&self) -> bool {
        self.needle.is_empty()
    }

    /// True if the term is empty or occurs in at least one listed text field.
    ///
    /// Missing and non-text fields never match.
    pub fn matches<R: Record + ?Sized>(&self, record: &R, fields: &[FieldName]) -> bool {
        if self.is_identity() {
            return true;
        }
        fields.iter().any(|name| {
            record
                .field(name)
                .and_then(|v| v.as_text().map(str::to_lowercase))
                .is_some_and(|hay| hay.contains(&self.needle))
        })
    }
}

/// One-shot form of [`TextMatcher::matches`].
pub fn matches<R: Record + ?Sized>(record: &R, fields: &[FieldName], term: &str) -> bool {
    TextMatcher::new(term).matches(record, fields)
}
