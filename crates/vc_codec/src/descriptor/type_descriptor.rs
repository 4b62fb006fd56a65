use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::descriptor::MemberDescriptor;

/// Name of the non-semantic size hint a collection type may declare.
pub const CAPACITY_MEMBER: &str = "Capacity";

// -----------------------------------------------------------------------------
// ScalarKind

/// The primitive kinds a scalar type converts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Str,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.pad("bool"),
            Self::Int => f.pad("int"),
            Self::Float => f.pad("float"),
            Self::Str => f.pad("string"),
        }
    }
}

// -----------------------------------------------------------------------------
// CollectionInfo

/// Collection-specific part of a [`TypeDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    element: String,
    fixed: bool,
}

impl CollectionInfo {
    /// Name of the declared element type.
    #[inline]
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Whether instances refuse appends (fixed-size or read-only).
    #[inline]
    pub const fn is_fixed(&self) -> bool {
        self.fixed
    }
}

// -----------------------------------------------------------------------------
// TypeKind

/// The shape of a described type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Scalar(ScalarKind),
    Object,
    Collection(CollectionInfo),
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// Immutable metadata of one runtime type.
///
/// Built once, registered into a [`TypeTable`](crate::descriptor::TypeTable)
/// and shared for the rest of the process.
///
/// # Examples
///
/// ```
/// use vc_codec::descriptor::TypeDescriptor;
///
/// let plain = TypeDescriptor::collection("IntList", "int");
/// assert!(plain.is_pure_collection());
///
/// let sized = TypeDescriptor::collection("SizedList", "int").with_member("Capacity", "int");
/// assert!(!sized.is_pure_collection());
/// assert!(sized.has_only_capacity());
///
/// let labeled = TypeDescriptor::collection("Inventory", "int").with_member("Label", "string");
/// assert!(!labeled.has_only_capacity());
/// assert_eq!(labeled.element_type(), Some("int"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    members: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            members: Vec::new(),
        }
    }

    /// Describes a scalar type.
    #[inline]
    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self::new(name, TypeKind::Scalar(kind))
    }

    /// Describes a composite type without members; add them with
    /// [`with_member`](Self::with_member).
    #[inline]
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Object)
    }

    /// Describes an appendable collection of `element`.
    #[inline]
    pub fn collection(name: impl Into<String>, element: impl Into<String>) -> Self {
        Self::new(
            name,
            TypeKind::Collection(CollectionInfo {
                element: element.into(),
                fixed: false,
            }),
        )
    }

    /// Describes a collection of `element` that cannot be appended to.
    ///
    /// Such values can be written but not read.
    #[inline]
    pub fn fixed_collection(name: impl Into<String>, element: impl Into<String>) -> Self {
        Self::new(
            name,
            TypeKind::Collection(CollectionInfo {
                element: element.into(),
                fixed: true,
            }),
        )
    }

    /// Appends a member of the declared type `ty`.
    ///
    /// Member names are expected to be unique; lookups return the first match.
    pub fn with_member(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        let index = self.members.len();
        self.members
            .push(MemberDescriptor::new(name.into(), ty.into(), index));
        self
    }

    /// The type name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The [`TypeKind`].
    #[inline]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Members in declaration order.
    #[inline]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Finds a member by name.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Returns the [`ScalarKind`] for scalar types.
    #[inline]
    pub const fn scalar_kind(&self) -> Option<ScalarKind> {
        match &self.kind {
            TypeKind::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns the [`CollectionInfo`] for collection-like types.
    #[inline]
    pub const fn as_collection(&self) -> Option<&CollectionInfo> {
        match &self.kind {
            TypeKind::Collection(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_collection(&self) -> bool {
        matches!(self.kind, TypeKind::Collection(_))
    }

    /// Name of the declared element type, for collection-like types.
    #[inline]
    pub fn element_type(&self) -> Option<&str> {
        self.as_collection().map(CollectionInfo::element)
    }

    /// A collection with no serializable state besides its items.
    #[inline]
    pub fn is_pure_collection(&self) -> bool {
        self.is_collection() && self.members.is_empty()
    }

    /// A collection whose only extra member is the [`CAPACITY_MEMBER`] hint.
    #[inline]
    pub fn has_only_capacity(&self) -> bool {
        self.is_collection() && self.members.len() == 1 && self.members[0].name() == CAPACITY_MEMBER
    }
}

#[cfg(test)]
mod tests {
    use super::{ScalarKind, TypeDescriptor, TypeKind};

    #[test]
    fn member_indices_follow_declaration() {
        let ty = TypeDescriptor::object("Node")
            .with_member("name", "string")
            .with_member("next", "Node");

        assert_eq!(ty.members().len(), 2);
        assert_eq!(ty.member("name").unwrap().index(), 0);
        assert_eq!(ty.member("next").unwrap().index(), 1);
        assert_eq!(ty.member("next").unwrap().ty(), "Node");
        assert!(ty.member("missing").is_none());
    }

    #[test]
    fn flags() {
        let int = TypeDescriptor::scalar("int", ScalarKind::Int);
        assert_eq!(int.scalar_kind(), Some(ScalarKind::Int));
        assert!(!int.is_collection());
        assert!(!int.is_pure_collection());

        let object = TypeDescriptor::object("Empty");
        assert_eq!(object.kind(), &TypeKind::Object);
        assert!(!object.is_pure_collection());

        let fixed = TypeDescriptor::fixed_collection("Triple", "int");
        assert!(fixed.as_collection().unwrap().is_fixed());
        assert!(fixed.is_pure_collection());

        let two = TypeDescriptor::collection("Two", "int")
            .with_member("Capacity", "int")
            .with_member("Label", "string");
        assert!(!two.has_only_capacity());
    }
}
