//! The codec capability and its implementations.
//!
//! ## Menu
//!
//! - [`Codec`] / [`CodecFactory`]: the read/write contract and the per-type
//!   constructor consulted by the registry.
//! - [`CodecRegistry`]: ordered first-match selection over factories.
//! - [`ChainedCodec`] / [`ChainedFactory`]: pass-through wrappers that
//!   override one direction of a codec and forward the other.
//! - [`ObjectCodec`] and [`ObjectLike`]: member-by-member mapping codec with
//!   the extension points reused by collections.
//! - [`CollectionCodec`]: pure sequence or mapping with a reserved items key.
//! - [`PrimitiveCodec`]: scalar leaves.
//!
//! ## Selection order
//!
//! [`CodecRegistry::new`] registers `PrimitiveCodec`, `CollectionCodec` and
//! `ObjectCodec` in that order. [`ObjectCodec`] claims every composite type, so
//! anything more specific must be placed ahead of it.

// -----------------------------------------------------------------------------
// Modules

mod chained;
mod collection;
mod object;
mod primitive;
mod registry;
mod traits;

// -----------------------------------------------------------------------------
// Exports

pub use chained::{ChainedCodec, ChainedFactory, ReadHook, WriteHook};
pub use collection::CollectionCodec;
pub use object::{ObjectCodec, ObjectLike, read_member, write_member};
pub use primitive::PrimitiveCodec;
pub use registry::CodecRegistry;
pub use traits::{Codec, CodecFactory, ValueInput, ValueOutput};
