use alloc::format;
use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use crate::SerialError;
use crate::descriptor::TypeDescriptor;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Object

/// A composite value: member slots plus, for collection types, an item list.
///
/// Member slots are parallel to the descriptor's member list and start as
/// [`Value::Null`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_codec::descriptor::TypeDescriptor;
/// use vc_codec::value::{Object, Value};
///
/// let ty = Arc::new(TypeDescriptor::collection("Inventory", "int").with_member("Label", "string"));
/// let mut inventory = Object::new(ty);
///
/// inventory.set("Label", Value::from("tools"));
/// inventory.push_item(Value::from(1)).unwrap();
/// inventory.push_item(Value::from(2)).unwrap();
///
/// assert_eq!(inventory.get("Label").and_then(Value::as_str), Some("tools"));
/// assert_eq!(inventory.len(), Some(2));
/// ```
pub struct Object {
    ty: Arc<TypeDescriptor>,
    members: Vec<Value>,
    items: Option<Vec<Value>>,
}

impl Object {
    /// Creates an instance with `Null` members and, for collections, no items.
    pub fn new(ty: Arc<TypeDescriptor>) -> Self {
        let members = alloc::vec![Value::Null; ty.members().len()];
        let items = ty.is_collection().then(Vec::new);
        Self { ty, members, items }
    }

    /// Creates a collection instance holding `items`.
    ///
    /// This is the only way to fill a fixed collection.
    pub fn with_items(ty: Arc<TypeDescriptor>, items: Vec<Value>) -> Result<Self, SerialError> {
        if !ty.is_collection() {
            return Err(SerialError::mismatch(ty.name(), "not a collection type"));
        }
        let mut object = Self::new(ty);
        object.items = Some(items);
        Ok(object)
    }

    /// The descriptor of this instance.
    #[inline]
    pub fn ty(&self) -> &Arc<TypeDescriptor> {
        &self.ty
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// The value in member slot `index`.
    #[inline]
    pub fn member(&self, index: usize) -> Option<&Value> {
        self.members.get(index)
    }

    /// Overwrites member slot `index`; out-of-range indices are ignored.
    #[inline]
    pub fn set_member(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.members.get_mut(index) {
            *slot = value;
        }
    }

    /// The value of the member called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.ty.member(name)?.index();
        self.members.get(index)
    }

    /// Sets the member called `name`, returns `false` if there is no such member.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self.ty.member(name).map(|m| m.index()) {
            Some(index) => {
                self.set_member(index, value);
                true
            }
            None => false,
        }
    }

    /// The items, `None` for non-collection types.
    #[inline]
    pub fn items(&self) -> Option<&[Value]> {
        self.items.as_deref()
    }

    /// Number of items, `None` for non-collection types.
    #[inline]
    pub fn len(&self) -> Option<usize> {
        self.items.as_ref().map(Vec::len)
    }

    /// Whether [`push_item`](Self::push_item) can succeed.
    #[inline]
    pub fn is_appendable(&self) -> bool {
        self.items.is_some() && self.ty.as_collection().is_some_and(|c| !c.is_fixed())
    }

    /// Appends an item and returns its index.
    pub fn push_item(&mut self, value: Value) -> Result<usize, SerialError> {
        if !self.is_appendable() {
            return Err(SerialError::mismatch(
                self.ty.name(),
                "instance does not support appending items",
            ));
        }
        let items = self.items.get_or_insert_with(Vec::new);
        items.push(value);
        Ok(items.len() - 1)
    }

    /// Overwrites the item at `index`.
    pub fn set_item(&mut self, index: usize, value: Value) -> Result<(), SerialError> {
        let name = self.ty.name();
        match self.items.as_mut().and_then(|items| items.get_mut(index)) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SerialError::mismatch(
                name,
                format!("no item slot at index {index}"),
            )),
        }
    }

    /// Resets every member to `Null` and drops all items.
    pub fn clear(&mut self) {
        self.members.fill(Value::Null);
        if let Some(items) = &mut self.items {
            items.clear();
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Members may point back at this object, print one level only.
        f.debug_struct("Object")
            .field("ty", &self.ty.name())
            .field("members", &self.members.len())
            .field("items", &self.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ObjectRef

/// A shared handle to an [`Object`].
///
/// Cloning the handle shares the object. Equality is identity.
///
/// Handles are reference counted, so a graph with a cycle is never freed on
/// its own. Call [`Object::clear`] on one object of each cycle once the graph
/// is no longer needed.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    #[inline]
    pub fn new(object: Object) -> Self {
        Self(Rc::new(RefCell::new(object)))
    }

    /// Immutably borrows the object.
    ///
    /// # Panics
    ///
    /// Panics if the object is currently mutably borrowed.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, Object> {
        self.0.borrow()
    }

    /// Mutably borrows the object.
    ///
    /// # Panics
    ///
    /// Panics if the object is currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, Object> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared object, stable while any handle is alive.
    #[inline]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl PartialEq for ObjectRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(object) => write!(f, "ObjectRef({:#x}, {})", self.addr(), object.type_name()),
            Err(_) => write!(f, "ObjectRef({:#x}, <borrowed>)", self.addr()),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::sync::Arc;
    use alloc::vec;

    use super::{Object, ObjectRef};
    use crate::SerialError;
    use crate::descriptor::TypeDescriptor;
    use crate::value::Value;

    #[test]
    fn members_start_null() {
        let ty = Arc::new(
            TypeDescriptor::object("Node")
                .with_member("name", "string")
                .with_member("next", "Node"),
        );
        let mut node = Object::new(ty);

        assert_eq!(node.get("name"), Some(&Value::Null));
        assert!(node.set("name", Value::from("a")));
        assert!(!node.set("missing", Value::from(1)));
        assert_eq!(node.member(0), Some(&Value::from("a")));
        assert_eq!(node.items(), None);
        assert!(!node.is_appendable());
    }

    #[test]
    fn fixed_refuses_push() {
        let ty = Arc::new(TypeDescriptor::fixed_collection("Triple", "int"));
        let mut triple = Object::with_items(ty, vec![Value::from(1), Value::from(2)]).unwrap();

        assert_eq!(triple.len(), Some(2));
        assert!(matches!(
            triple.push_item(Value::from(3)),
            Err(SerialError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn set_item_slot() {
        let ty = Arc::new(TypeDescriptor::collection("List", "int"));
        let mut list = Object::new(ty);

        assert_eq!(list.push_item(Value::from(1)).unwrap(), 0);
        assert_eq!(list.push_item(Value::Null).unwrap(), 1);
        list.set_item(1, Value::from(2)).unwrap();
        assert_eq!(list.items(), Some(&[Value::from(1), Value::from(2)][..]));
        assert!(list.set_item(5, Value::Null).is_err());
    }

    #[test]
    fn clear_releases_cycle() {
        let ty = Arc::new(TypeDescriptor::collection("Ring", "Ring").with_member("next", "Ring"));
        let ring = ObjectRef::new(Object::new(ty));
        ring.borrow_mut().set("next", Value::from(ring.clone()));
        ring.borrow_mut().push_item(Value::from(ring.clone())).unwrap();
        assert_eq!(Rc::strong_count(&ring.0), 3);

        ring.borrow_mut().clear();
        assert_eq!(Rc::strong_count(&ring.0), 1);
        assert_eq!(ring.borrow().get("next"), Some(&Value::Null));
        assert_eq!(ring.borrow().len(), Some(0));
    }

    #[test]
    fn identity_equality() {
        let ty = Arc::new(TypeDescriptor::object("Empty"));
        let a = ObjectRef::new(Object::new(ty.clone()));
        let b = ObjectRef::new(Object::new(ty));

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.addr(), a.clone().addr());
    }
}
