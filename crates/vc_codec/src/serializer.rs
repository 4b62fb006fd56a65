use vc_event::{EventEmitter, EventParser};

use crate::codec::CodecRegistry;
use crate::context::SerializerContext;
use crate::descriptor::TypeTable;
use crate::value::Value;
use crate::{SerialError, SerializerSettings};

// -----------------------------------------------------------------------------
// Serializer

/// Reads and writes whole documents.
///
/// Each call runs in a fresh [`SerializerContext`], so anchors and pending
/// aliases never carry over from one document to the next.
///
/// # Examples
///
/// ```
/// use vc_codec::descriptor::{TypeDescriptor, TypeTable};
/// use vc_codec::value::{Object, Value};
/// use vc_codec::{Serializer, SerializerSettings};
/// use vc_event::{EventStream, EventWriter};
///
/// let mut types = TypeTable::new();
/// let list_ty = types.register(TypeDescriptor::collection("IntList", "int"));
///
/// let serializer = Serializer::with_settings(types, SerializerSettings {
///     limit_flow_sequence: 8,
///     ..SerializerSettings::default()
/// });
///
/// let list = Object::with_items(list_ty, vec![Value::from(1), Value::from(2)]).unwrap();
/// let mut writer = EventWriter::new();
/// serializer.serialize(&Value::from(list), "IntList", &mut writer).unwrap();
///
/// let mut stream = EventStream::from(writer.into_events());
/// let back = serializer.deserialize(&mut stream, "IntList").unwrap();
/// let back = back.as_object().unwrap().borrow();
/// assert_eq!(back.items(), Some(&[Value::from(1), Value::from(2)][..]));
/// ```
#[derive(Debug, Default)]
pub struct Serializer {
    settings: SerializerSettings,
    types: TypeTable,
    registry: CodecRegistry,
}

impl Serializer {
    /// Creates a serializer with default settings and the built-in codecs.
    #[inline]
    pub fn new(types: TypeTable) -> Self {
        Self::with_settings(types, SerializerSettings::default())
    }

    /// Creates a serializer with the built-in codecs.
    #[inline]
    pub fn with_settings(types: TypeTable, settings: SerializerSettings) -> Self {
        Self {
            settings,
            types,
            registry: CodecRegistry::new(),
        }
    }

    #[inline]
    pub fn settings(&self) -> &SerializerSettings {
        &self.settings
    }

    #[inline]
    pub fn settings_mut(&mut self) -> &mut SerializerSettings {
        &mut self.settings
    }

    #[inline]
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    #[inline]
    pub fn types_mut(&mut self) -> &mut TypeTable {
        &mut self.types
    }

    #[inline]
    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// The codec registry, e.g. to put a [`ChainedFactory`] in front.
    ///
    /// [`ChainedFactory`]: crate::codec::ChainedFactory
    #[inline]
    pub fn registry_mut(&mut self) -> &mut CodecRegistry {
        &mut self.registry
    }

    /// Writes `value` as one document of type `type_name`.
    pub fn serialize(
        &self,
        value: &Value,
        type_name: &str,
        emitter: &mut dyn EventEmitter,
    ) -> Result<(), SerialError> {
        log::debug!("writing document as `{type_name}`");

        let mut ctx =
            SerializerContext::for_write(&self.settings, &self.types, &self.registry, emitter);
        if self.settings.emit_alias {
            ctx.prepare_anchors(value);
        }
        ctx.write_value(value, type_name)?;
        ctx.finish()
    }

    /// Reads one document of type `type_name` into a fresh value.
    ///
    /// A document with a cycle yields a cyclic graph, which stays alive until
    /// one object of the cycle is [cleared](crate::value::Object::clear).
    #[inline]
    pub fn deserialize(
        &self,
        parser: &mut dyn EventParser,
        type_name: &str,
    ) -> Result<Value, SerialError> {
        self.read_document(parser, None, type_name)
    }

    /// Reads one document of type `type_name` into `existing`.
    ///
    /// Collections get the document's items appended.
    #[inline]
    pub fn deserialize_into(
        &self,
        parser: &mut dyn EventParser,
        existing: Value,
        type_name: &str,
    ) -> Result<Value, SerialError> {
        self.read_document(parser, Some(existing), type_name)
    }

    fn read_document(
        &self,
        parser: &mut dyn EventParser,
        existing: Option<Value>,
        type_name: &str,
    ) -> Result<Value, SerialError> {
        log::debug!("reading document as `{type_name}`");

        let mut ctx =
            SerializerContext::for_read(&self.settings, &self.types, &self.registry, parser);
        let value = ctx.read_value(existing, type_name)?.into_value()?;
        ctx.finish()?;
        Ok(value)
    }
}
