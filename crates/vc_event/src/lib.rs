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
mod event;
mod reader;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use error::EventError;
pub use event::{Event, EventKind, MappingStyle, SequenceStyle};
pub use reader::{EventParser, EventReader, EventStream};
pub use writer::{EventEmitter, EventWriter};
