use alloc::string::String;

use crate::value::{Object, Value};

// -----------------------------------------------------------------------------
// MemberDescriptor

/// A named member of a composite type.
///
/// `index` is the position of the member slot inside an [`Object`],
/// parallel to the owning descriptor's member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    name: String,
    ty: String,
    index: usize,
}

impl MemberDescriptor {
    #[inline]
    pub(crate) fn new(name: String, ty: String, index: usize) -> Self {
        Self { name, ty, index }
    }

    /// Member name, used as the mapping key.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the declared member type.
    #[inline]
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Slot index inside the owning object.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Reads the member's current value, `Null` if the slot is missing.
    #[inline]
    pub fn get(&self, object: &Object) -> Value {
        object.member(self.index).cloned().unwrap_or(Value::Null)
    }

    /// Overwrites the member's value.
    #[inline]
    pub fn set(&self, object: &mut Object, value: Value) {
        object.set_member(self.index, value);
    }
}
