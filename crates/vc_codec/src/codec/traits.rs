use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;

use crate::SerialError;
use crate::context::SerializerContext;
use crate::descriptor::TypeDescriptor;
use crate::value::Value;

// -----------------------------------------------------------------------------
// ValueInput

/// The result of reading one value.
///
/// A read either produces a value or finds an alias whose anchor has not been
/// defined yet. In the second case the caller must register a binding to
/// finish the mutation later.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueInput {
    Value(Value),
    Alias(String),
}

impl ValueInput {
    #[inline]
    pub const fn is_alias(&self) -> bool {
        matches!(self, Self::Alias(_))
    }

    /// The pending alias name, if any.
    #[inline]
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Alias(name) => Some(name),
            Self::Value(_) => None,
        }
    }

    /// The value read, or `UnresolvedAlias` if the read produced a pending alias.
    pub fn into_value(self) -> Result<Value, SerialError> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Alias(alias) => Err(SerialError::UnresolvedAlias { alias }),
        }
    }
}

impl From<Value> for ValueInput {
    #[inline]
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

// -----------------------------------------------------------------------------
// ValueOutput

/// A request to write one value.
#[derive(Debug, Clone)]
pub struct ValueOutput {
    pub value: Value,
    /// Anchor to attach to the first event of the value.
    pub anchor: Option<String>,
}

impl ValueOutput {
    #[inline]
    pub fn new(value: Value) -> Self {
        Self {
            value,
            anchor: None,
        }
    }
}

// -----------------------------------------------------------------------------
// Codec

/// Reads and writes values of one type as structural events.
///
/// Codecs never read or write nested values directly; they go through
/// [`SerializerContext::read_value`] and [`SerializerContext::write_value`]
/// so that aliases and nulls are handled uniformly.
pub trait Codec {
    /// Reads one value of type `ty`.
    ///
    /// `existing` is an instance to fill in place of a fresh one, when the
    /// caller has it.
    fn read(
        &self,
        ctx: &mut SerializerContext<'_>,
        existing: Option<Value>,
        ty: &Arc<TypeDescriptor>,
    ) -> Result<ValueInput, SerialError>;

    /// Writes `output.value` as type `ty`.
    fn write(
        &self,
        ctx: &mut SerializerContext<'_>,
        output: ValueOutput,
        ty: &Arc<TypeDescriptor>,
    ) -> Result<(), SerialError>;
}

// -----------------------------------------------------------------------------
// CodecFactory

/// Decides whether it handles a type and builds the codec for it.
///
/// `try_create` must be a pure predicate over the descriptor and settings:
/// the result is cached per context.
pub trait CodecFactory {
    fn try_create(&self, ctx: &SerializerContext<'_>, ty: &TypeDescriptor)
    -> Option<Rc<dyn Codec>>;
}
