#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod hash;
mod serializer;
mod settings;

pub mod codec;
pub mod context;
pub mod descriptor;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::SerialError;
pub use serializer::Serializer;
pub use settings::{DEFAULT_SPECIAL_COLLECTION_MEMBER, SerializerSettings};
