use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use crate::SerialError;
use crate::codec::{Codec, CodecFactory, ValueInput, ValueOutput};
use crate::context::SerializerContext;
use crate::descriptor::TypeDescriptor;
use crate::value::Value;

/// Replacement for [`Codec::read`]; receives the wrapped codec as first argument.
pub type ReadHook = Box<
    dyn Fn(
        &dyn Codec,
        &mut SerializerContext<'_>,
        Option<Value>,
        &Arc<TypeDescriptor>,
    ) -> Result<ValueInput, SerialError>,
>;

/// Replacement for [`Codec::write`]; receives the wrapped codec as first argument.
pub type WriteHook = Box<
    dyn Fn(
        &dyn Codec,
        &mut SerializerContext<'_>,
        ValueOutput,
        &Arc<TypeDescriptor>,
    ) -> Result<(), SerialError>,
>;

// -----------------------------------------------------------------------------
// ChainedCodec

/// A codec that forwards to the codec it wraps, except for the directions it
/// overrides.
///
/// Wrappers nest: the wrapped codec may itself be a `ChainedCodec`, each one
/// owning its successor.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use vc_codec::codec::{ChainedCodec, Codec, ObjectCodec};
///
/// let plain: Rc<dyn Codec> = Rc::new(ObjectCodec);
/// let chained = ChainedCodec::new(plain).on_write(|next, ctx, mut output, ty| {
///     output.anchor = None;
///     next.write(ctx, output, ty)
/// });
/// assert!(chained.overrides_write());
/// assert!(!chained.overrides_read());
/// ```
pub struct ChainedCodec {
    next: Rc<dyn Codec>,
    read: Option<ReadHook>,
    write: Option<WriteHook>,
}

impl ChainedCodec {
    /// Wraps `next`; both directions forward until overridden.
    #[inline]
    pub fn new(next: Rc<dyn Codec>) -> Self {
        Self {
            next,
            read: None,
            write: None,
        }
    }

    /// The wrapped codec.
    #[inline]
    pub fn next(&self) -> &Rc<dyn Codec> {
        &self.next
    }

    /// Overrides the read direction.
    pub fn on_read(
        mut self,
        hook: impl Fn(
            &dyn Codec,
            &mut SerializerContext<'_>,
            Option<Value>,
            &Arc<TypeDescriptor>,
        ) -> Result<ValueInput, SerialError>
        + 'static,
    ) -> Self {
        self.read = Some(Box::new(hook));
        self
    }

    /// Overrides the write direction.
    pub fn on_write(
        mut self,
        hook: impl Fn(
            &dyn Codec,
            &mut SerializerContext<'_>,
            ValueOutput,
            &Arc<TypeDescriptor>,
        ) -> Result<(), SerialError>
        + 'static,
    ) -> Self {
        self.write = Some(Box::new(hook));
        self
    }

    #[inline]
    pub fn overrides_read(&self) -> bool {
        self.read.is_some()
    }

    #[inline]
    pub fn overrides_write(&self) -> bool {
        self.write.is_some()
    }
}

impl Codec for ChainedCodec {
    fn read(
        &self,
        ctx: &mut SerializerContext<'_>,
        existing: Option<Value>,
        ty: &Arc<TypeDescriptor>,
    ) -> Result<ValueInput, SerialError> {
        match &self.read {
            Some(hook) => hook(&*self.next, ctx, existing, ty),
            None => self.next.read(ctx, existing, ty),
        }
    }

    fn write(
        &self,
        ctx: &mut SerializerContext<'_>,
        output: ValueOutput,
        ty: &Arc<TypeDescriptor>,
    ) -> Result<(), SerialError> {
        match &self.write {
            Some(hook) => hook(&*self.next, ctx, output, ty),
            None => self.next.write(ctx, output, ty),
        }
    }
}

impl fmt::Debug for ChainedCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedCodec")
            .field("read", &self.overrides_read())
            .field("write", &self.overrides_write())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// ChainedFactory

/// Wraps whatever codec `inner` creates for one type name.
///
/// Typically `inner` is a [`CodecRegistry`] holding the default codecs and the
/// factory is inserted at the front of the registry used for serialization.
///
/// [`CodecRegistry`]: crate::codec::CodecRegistry
pub struct ChainedFactory {
    type_name: String,
    inner: Box<dyn CodecFactory>,
    wrap: Box<dyn Fn(Rc<dyn Codec>) -> ChainedCodec>,
}

impl ChainedFactory {
    pub fn new(
        type_name: impl Into<String>,
        inner: impl CodecFactory + 'static,
        wrap: impl Fn(Rc<dyn Codec>) -> ChainedCodec + 'static,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            inner: Box::new(inner),
            wrap: Box::new(wrap),
        }
    }
}

impl CodecFactory for ChainedFactory {
    fn try_create(&self, ctx: &SerializerContext<'_>, ty: &TypeDescriptor) -> Option<Rc<dyn Codec>> {
        if ty.name() != self.type_name {
            return None;
        }
        let next = self.inner.try_create(ctx, ty)?;
        Some(Rc::new((self.wrap)(next)))
    }
}

impl fmt::Debug for ChainedFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedFactory")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
