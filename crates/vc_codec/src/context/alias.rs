use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::SerialError;
use crate::hash::HashMap;
use crate::value::Value;

// -----------------------------------------------------------------------------
// AliasBinding

/// A deferred mutation waiting for an anchor to be defined.
///
/// The action runs exactly once, with the anchored value.
pub struct AliasBinding {
    alias: String,
    action: Box<dyn FnOnce(Value) -> Result<(), SerialError>>,
}

impl AliasBinding {
    #[inline]
    pub fn new(
        alias: impl Into<String>,
        action: impl FnOnce(Value) -> Result<(), SerialError> + 'static,
    ) -> Self {
        Self {
            alias: alias.into(),
            action: Box::new(action),
        }
    }

    /// The anchor name this binding waits for.
    #[inline]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Runs the deferred mutation.
    #[inline]
    pub fn resolve(self, value: Value) -> Result<(), SerialError> {
        (self.action)(value)
    }
}

impl fmt::Debug for AliasBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasBinding")
            .field("alias", &self.alias)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// AliasTable

/// Anchors defined so far in a document, plus bindings for anchors not yet seen.
///
/// # Examples
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use vc_codec::context::{AliasBinding, AliasTable};
/// use vc_codec::value::Value;
///
/// let slot = Rc::new(RefCell::new(Value::Null));
/// let mut table = AliasTable::new();
///
/// let target = slot.clone();
/// table.add_binding(AliasBinding::new("late", move |value| {
///     *target.borrow_mut() = value;
///     Ok(())
/// }));
/// assert!(table.finish().is_err());
///
/// table.define("late".into(), Value::from(7)).unwrap();
/// assert_eq!(*slot.borrow(), Value::from(7));
/// assert!(table.finish().is_ok());
/// ```
#[derive(Default)]
pub struct AliasTable {
    anchors: HashMap<String, Value>,
    pending: HashMap<String, Vec<AliasBinding>>,
}

impl AliasTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The value anchored under `alias`, if already defined.
    #[inline]
    pub fn resolve(&self, alias: &str) -> Option<Value> {
        self.anchors.get(alias).cloned()
    }

    /// Registers a binding to run once its anchor is defined.
    pub fn add_binding(&mut self, binding: AliasBinding) {
        log::trace!("deferring alias `{}`", binding.alias());
        self.pending
            .entry(String::from(binding.alias()))
            .or_default()
            .push(binding);
    }

    /// Defines an anchor and runs every binding waiting for it, in
    /// registration order.
    ///
    /// A later definition of the same name replaces the earlier one for
    /// subsequent aliases.
    pub fn define(&mut self, anchor: String, value: Value) -> Result<(), SerialError> {
        if let Some(bindings) = self.pending.remove(&anchor) {
            log::trace!("resolving {} binding(s) for `{anchor}`", bindings.len());
            for binding in bindings {
                binding.resolve(value.clone())?;
            }
        }
        self.anchors.insert(anchor, value);
        Ok(())
    }

    /// Number of bindings not yet resolved.
    pub fn pending_len(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    /// Fails with [`SerialError::UnresolvedAlias`] if any binding is pending.
    ///
    /// When several aliases are pending, the error names the smallest one so
    /// the result does not depend on hash order.
    pub fn finish(&self) -> Result<(), SerialError> {
        match self.pending.keys().min() {
            Some(alias) => Err(SerialError::UnresolvedAlias {
                alias: alias.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for AliasTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasTable")
            .field("anchors", &self.anchors.len())
            .field("pending", &self.pending_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::{AliasBinding, AliasTable};
    use crate::SerialError;
    use crate::value::Value;

    #[test]
    fn bindings_fire_once_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut table = AliasTable::new();

        for tag in [1, 2] {
            let log = log.clone();
            table.add_binding(AliasBinding::new("a", move |value| {
                log.borrow_mut().push((tag, value));
                Ok(())
            }));
        }
        assert_eq!(table.pending_len(), 2);

        table.define("a".into(), Value::from("x")).unwrap();
        table.define("a".into(), Value::from("y")).unwrap();

        assert_eq!(
            *log.borrow(),
            [(1, Value::from("x")), (2, Value::from("x"))]
        );
        assert_eq!(table.pending_len(), 0);
        assert_eq!(table.resolve("a"), Some(Value::from("y")));
    }

    #[test]
    fn unresolved_names_smallest_alias() {
        let mut table = AliasTable::new();
        table.add_binding(AliasBinding::new("zeta", |_| Ok(())));
        table.add_binding(AliasBinding::new("alpha", |_| Ok(())));

        assert!(matches!(
            table.finish(),
            Err(SerialError::UnresolvedAlias { alias }) if alias == "alpha"
        ));
    }

    #[test]
    fn failing_binding_propagates() {
        let mut table = AliasTable::new();
        table.add_binding(AliasBinding::new("a", |_| {
            Err(SerialError::UnresolvedAlias { alias: "inner".into() })
        }));

        assert!(table.define("a".into(), Value::Null).is_err());
    }
}
