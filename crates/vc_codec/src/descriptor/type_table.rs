use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use hashbrown::hash_map::Entry;

use crate::SerialError;
use crate::descriptor::{ScalarKind, TypeDescriptor};
use crate::hash::HashMap;

// -----------------------------------------------------------------------------
// TypeTable

/// The store of [`TypeDescriptor`]s, keyed by type name.
///
/// Each type is described once and shared for the life of the table.
///
/// # Example
///
/// ```
/// use vc_codec::descriptor::{TypeDescriptor, TypeTable};
///
/// let mut types = TypeTable::new();
/// types.register(TypeDescriptor::collection("IntList", "int"));
///
/// assert!(types.contains("int"));
/// assert!(types.get("IntList").unwrap().is_pure_collection());
/// assert!(types.get("Missing").is_none());
/// ```
pub struct TypeTable {
    types: HashMap<String, Arc<TypeDescriptor>>,
}

impl Default for TypeTable {
    /// See [`TypeTable::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    /// Creates an empty table, without the scalar types.
    #[inline]
    pub fn empty() -> Self {
        Self {
            types: HashMap::default(),
        }
    }

    /// Creates a table with the scalar types registered:
    ///
    /// - `bool`
    /// - `int`
    /// - `float`
    /// - `string`
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.register(TypeDescriptor::scalar("bool", ScalarKind::Bool));
        table.register(TypeDescriptor::scalar("int", ScalarKind::Int));
        table.register(TypeDescriptor::scalar("float", ScalarKind::Float));
        table.register(TypeDescriptor::scalar("string", ScalarKind::Str));
        table
    }

    /// Registers a descriptor and returns the shared instance.
    ///
    /// If the name is already taken, the existing descriptor is kept and returned.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Arc<TypeDescriptor> {
        match self.types.entry(String::from(descriptor.name())) {
            Entry::Occupied(entry) => {
                log::warn!(
                    "type `{}` is already registered, keeping the first descriptor",
                    descriptor.name()
                );
                entry.get().clone()
            }
            Entry::Vacant(entry) => entry.insert(Arc::new(descriptor)).clone(),
        }
    }

    /// Whether a type with this name is registered.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the descriptor registered under `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(name)
    }

    /// Like [`get`](Self::get), but an unknown name is an error.
    pub fn resolve(&self, name: &str) -> Result<Arc<TypeDescriptor>, SerialError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| SerialError::UnknownType {
                type_name: String::from(name),
            })
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl fmt::Debug for TypeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeTable")
            .field("types", &self.types.len())
            .finish()
    }
}
