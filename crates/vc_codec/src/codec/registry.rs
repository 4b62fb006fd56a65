use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::SerialError;
use crate::codec::{Codec, CodecFactory, CollectionCodec, ObjectCodec, PrimitiveCodec};
use crate::context::SerializerContext;
use crate::descriptor::TypeDescriptor;

// -----------------------------------------------------------------------------
// CodecRegistry

/// An ordered list of codec factories.
///
/// Selection asks each factory in turn and takes the first codec offered.
/// More specific factories must come before generic fallbacks.
///
/// # Examples
///
/// ```
/// use vc_codec::codec::CodecRegistry;
///
/// let registry = CodecRegistry::new();
/// assert_eq!(registry.len(), 3);
///
/// let empty = CodecRegistry::empty();
/// assert!(empty.is_empty());
/// ```
pub struct CodecRegistry {
    factories: Vec<Box<dyn CodecFactory>>,
}

impl CodecRegistry {
    /// Creates a registry without any factory.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Creates a registry with the built-in codecs:
    /// primitives, then collections, then generic objects.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.push(PrimitiveCodec);
        registry.push(CollectionCodec);
        registry.push(ObjectCodec);
        registry
    }

    /// Appends a factory with the lowest priority.
    #[inline]
    pub fn push(&mut self, factory: impl CodecFactory + 'static) {
        self.factories.push(Box::new(factory));
    }

    /// Inserts a factory with the highest priority.
    #[inline]
    pub fn insert_front(&mut self, factory: impl CodecFactory + 'static) {
        self.factories.insert(0, Box::new(factory));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Selects the codec of the first factory that claims `ty`.
    ///
    /// No claiming factory is a configuration error.
    pub fn select(
        &self,
        ctx: &SerializerContext<'_>,
        ty: &TypeDescriptor,
    ) -> Result<Rc<dyn Codec>, SerialError> {
        for (index, factory) in self.factories.iter().enumerate() {
            if let Some(codec) = factory.try_create(ctx, ty) {
                log::debug!("type `{}` handled by factory #{index}", ty.name());
                return Ok(codec);
            }
        }
        Err(SerialError::NoCodec {
            type_name: String::from(ty.name()),
        })
    }
}

/// A registry claims whatever one of its factories claims, so a whole set of
/// codecs can sit behind a [`ChainedFactory`](crate::codec::ChainedFactory).
impl CodecFactory for CodecRegistry {
    fn try_create(
        &self,
        ctx: &SerializerContext<'_>,
        ty: &TypeDescriptor,
    ) -> Option<Rc<dyn Codec>> {
        self.select(ctx, ty).ok()
    }
}

impl Default for CodecRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("factories", &self.factories.len())
            .finish()
    }
}
