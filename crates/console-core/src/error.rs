// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors surfaced by console sessions.

use thiserror::Error;

/// Failure reported by a host persistence adapter.
pub type PersistError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for session operations.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// A required field is missing at save time; the save was blocked.
    #[error("{field}: {message}")]
    Validation {
        /// Field the message belongs to (shown inline next to it).
        field: &'static str,
        /// Operator-facing message.
        message: String,
    },
    /// The host `persist` call failed. In-memory edits are kept.
    #[error("save failed: {0}")]
    Collaborator(#[source] PersistError),
}

impl ConsoleError {
    /// Validation error scoped to `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Field a validation error belongs to.
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            Self::Collaborator(_) => None,
        }
    }
}
