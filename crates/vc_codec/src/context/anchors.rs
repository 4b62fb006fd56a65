use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::hash::{HashMap, HashSet};
use crate::value::{ObjectRef, Value};

// -----------------------------------------------------------------------------
// AnchorState

/// What to emit for an object about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorState {
    /// Reached once, write it inline without an anchor.
    Unshared,
    /// First visit of a shared object, write it with this anchor.
    First(String),
    /// Already written, emit an alias to this anchor.
    Written(String),
}

// -----------------------------------------------------------------------------
// WriteAnchors

/// Assigns anchors to objects reachable more than once from a root.
///
/// Anchors are named `id001`, `id002`, … in first-write order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_codec::context::{AnchorState, WriteAnchors};
/// use vc_codec::descriptor::TypeDescriptor;
/// use vc_codec::value::{Object, ObjectRef, Value};
///
/// let node = ObjectRef::new(Object::new(Arc::new(TypeDescriptor::object("Node"))));
/// let list = Object::with_items(
///     Arc::new(TypeDescriptor::collection("Nodes", "Node")),
///     vec![Value::from(node.clone()), Value::from(node.clone())],
/// ).unwrap();
///
/// let mut anchors = WriteAnchors::new();
/// anchors.scan(&Value::from(list));
///
/// assert_eq!(anchors.visit(&node), AnchorState::First("id001".into()));
/// assert_eq!(anchors.visit(&node), AnchorState::Written("id001".into()));
/// ```
#[derive(Default)]
pub struct WriteAnchors {
    shared: HashSet<usize>,
    written: HashMap<usize, String>,
}

impl WriteAnchors {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks the graph under `root` and records objects reached more than once.
    ///
    /// Each object's children are walked once, so cycles terminate.
    pub fn scan(&mut self, root: &Value) {
        let mut seen: HashSet<usize> = HashSet::default();
        let mut stack: Vec<ObjectRef> = Vec::new();

        if let Value::Object(object) = root {
            stack.push(object.clone());
        }

        while let Some(object) = stack.pop() {
            if !seen.insert(object.addr()) {
                self.shared.insert(object.addr());
                continue;
            }

            let object = object.borrow();
            let children = (0..object.ty().members().len())
                .filter_map(|index| object.member(index))
                .chain(object.items().unwrap_or_default());

            // Reverse so that the pop order follows document order.
            let mut nested: Vec<ObjectRef> = children
                .filter_map(Value::as_object)
                .cloned()
                .collect();
            nested.reverse();
            stack.extend(nested);
        }
    }

    /// Whether `object` was found to be shared by [`scan`](Self::scan).
    #[inline]
    pub fn is_shared(&self, object: &ObjectRef) -> bool {
        self.shared.contains(&object.addr())
    }

    /// Decides how `object` is written and records the visit.
    pub fn visit(&mut self, object: &ObjectRef) -> AnchorState {
        let addr = object.addr();
        if let Some(anchor) = self.written.get(&addr) {
            return AnchorState::Written(anchor.clone());
        }
        if !self.shared.contains(&addr) {
            return AnchorState::Unshared;
        }

        let anchor = format!("id{:03}", self.written.len() + 1);
        self.written.insert(addr, anchor.clone());
        AnchorState::First(anchor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;

    use super::{AnchorState, WriteAnchors};
    use crate::descriptor::TypeDescriptor;
    use crate::value::{Object, ObjectRef, Value};

    fn node() -> ObjectRef {
        let ty = TypeDescriptor::object("Node").with_member("next", "Node");
        ObjectRef::new(Object::new(Arc::new(ty)))
    }

    #[test]
    fn unshared_objects_get_no_anchor() {
        let a = node();
        let b = node();
        a.borrow_mut().set("next", Value::from(b.clone()));

        let mut anchors = WriteAnchors::new();
        anchors.scan(&Value::from(a.clone()));

        assert!(!anchors.is_shared(&a));
        assert_eq!(anchors.visit(&a), AnchorState::Unshared);
        assert_eq!(anchors.visit(&b), AnchorState::Unshared);
    }

    #[test]
    fn cycle_is_shared() {
        let a = node();
        a.borrow_mut().set("next", Value::from(a.clone()));

        let mut anchors = WriteAnchors::new();
        anchors.scan(&Value::from(a.clone()));

        assert!(anchors.is_shared(&a));
        assert_eq!(anchors.visit(&a), AnchorState::First("id001".into()));
        assert_eq!(anchors.visit(&a), AnchorState::Written("id001".into()));

        a.borrow_mut().clear();
    }

    #[test]
    fn anchors_numbered_in_write_order() {
        let a = node();
        let b = node();
        let list = Object::with_items(
            Arc::new(TypeDescriptor::collection("Nodes", "Node")),
            vec![
                Value::from(b.clone()),
                Value::from(a.clone()),
                Value::from(b.clone()),
                Value::from(a.clone()),
            ],
        )
        .unwrap();

        let mut anchors = WriteAnchors::new();
        anchors.scan(&Value::from(list));

        assert_eq!(anchors.visit(&b), AnchorState::First("id001".into()));
        assert_eq!(anchors.visit(&a), AnchorState::First("id002".into()));
    }
}
