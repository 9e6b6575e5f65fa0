//! Error types for the triage engine.

use thiserror::Error;

/// Errors that can occur while triaging tickets.
#[derive(Debug, Error)]
pub enum TriageError {
    /// A ticket failed validation at ingestion.
    #[error("invalid ticket #{index}: field `{field}` {reason}")]
    InvalidTicket {
        /// Position of the ticket in the submitted list.
        index: usize,
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl TriageError {
    /// Re-tag an `InvalidTicket` error with its position in a larger list.
    pub fn at_index(self, index: usize) -> Self {
        match self {
            Self::InvalidTicket { field, reason, .. } => Self::InvalidTicket {
                index,
                field,
                reason,
            },
            other => other,
        }
    }
}

/// Result type for triage operations.
pub type TriageResult<T> = Result<T, TriageError>;
