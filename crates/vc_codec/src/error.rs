use alloc::string::String;

use thiserror::Error;
use vc_event::EventError;

use crate::descriptor::ScalarKind;

// -----------------------------------------------------------------------------
// SerialError

/// Errors raised while reading or writing a document.
///
/// Every kind is fatal for the current document: it propagates through all
/// recursive codec calls and the whole operation fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerialError {
    #[error("no codec claims type `{type_name}`")]
    NoCodec { type_name: String },

    #[error("type `{type_name}` is not registered")]
    UnknownType { type_name: String },

    #[error(transparent)]
    Event(#[from] EventError),

    #[error("type mismatch for `{type_name}`: {reason}")]
    TypeMismatch { type_name: String, reason: String },

    #[error("alias `{alias}` was never resolved")]
    UnresolvedAlias { alias: String },

    #[error("type `{type_name}` has no member `{member}`")]
    UnknownMember { type_name: String, member: String },

    #[error("cannot read `{value}` as {kind}")]
    InvalidScalar { value: String, kind: ScalarKind },

    #[error("object of type `{type_name}` contains itself, cycles need `emit_alias`")]
    CyclicValue { type_name: String },

    #[error("the context was opened for {0}")]
    WrongDirection(&'static str),
}

impl SerialError {
    #[inline]
    pub(crate) fn mismatch(type_name: &str, reason: impl Into<String>) -> Self {
        Self::TypeMismatch {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}
