use alloc::string::String;

use thiserror::Error;

use crate::EventKind;

// -----------------------------------------------------------------------------
// EventError

/// Structural errors raised by the event reader and writer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventError {
    #[error("expected {expected} event, found {found}")]
    Unexpected {
        expected: EventKind,
        found: EventKind,
    },

    #[error("expected {expected} event, found end of stream")]
    UnexpectedEnd { expected: EventKind },

    #[error("event source failed: {0}")]
    Source(String),
}
