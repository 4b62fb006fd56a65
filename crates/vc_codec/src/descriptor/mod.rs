//! Per-type metadata consumed by the codecs.
//!
//! ## Menu
//!
//! - [`TypeDescriptor`]: name, [`TypeKind`] and ordered member list of a type.
//! - [`MemberDescriptor`]: a named, typed member slot with getter and setter.
//! - [`TypeTable`]: the process-lifetime cache of descriptors, looked up by name.
//!
//! Declared types (member types, element types) are referenced by name and
//! resolved through the [`TypeTable`], so descriptors may refer to each other
//! recursively.

// -----------------------------------------------------------------------------
// Modules

mod member;
mod type_descriptor;
mod type_table;

// -----------------------------------------------------------------------------
// Exports

pub use member::MemberDescriptor;
pub use type_descriptor::{CAPACITY_MEMBER, CollectionInfo, ScalarKind, TypeDescriptor, TypeKind};
pub use type_table::TypeTable;
