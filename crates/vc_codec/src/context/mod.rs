//! Request-scoped state shared by every codec call of one document.
//!
//! ## Menu
//!
//! - [`SerializerContext`]: owns the event reader or writer, the alias table,
//!   the write anchors and the codec cache.
//! - [`AliasTable`] / [`AliasBinding`]: anchors seen so far and deferred
//!   mutations waiting for an anchor that appears later in the document.
//! - [`WriteAnchors`]: which objects need an anchor when written.
//!
//! A context serves exactly one top-level read or write and is dropped
//! afterwards, so bindings never leak from one document into the next.

// -----------------------------------------------------------------------------
// Modules

mod alias;
mod anchors;
mod serializer_context;

// -----------------------------------------------------------------------------
// Exports

pub use alias::{AliasBinding, AliasTable};
pub use anchors::{AnchorState, WriteAnchors};
pub use serializer_context::SerializerContext;
