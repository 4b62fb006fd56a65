use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;

use vc_event::{Event, EventEmitter, EventKind, EventParser, EventReader};

use crate::codec::{Codec, CodecRegistry, ValueInput, ValueOutput};
use crate::context::{AliasBinding, AliasTable, AnchorState, WriteAnchors};
use crate::descriptor::{TypeDescriptor, TypeTable};
use crate::hash::{HashMap, HashSet};
use crate::value::{ObjectRef, Value};
use crate::{SerialError, SerializerSettings};

/// Scalar text standing for [`Value::Null`].
pub(crate) const NULL_SCALAR: &str = "~";

enum Channel<'a> {
    Read(EventReader<'a>),
    Write(&'a mut dyn EventEmitter),
}

// -----------------------------------------------------------------------------
// SerializerContext

/// The state of one top-level read or write.
///
/// Passed by mutable reference through every codec call. All value
/// production and consumption funnels through [`read_value`] and
/// [`write_value`], which handle aliases before dispatching to a codec.
///
/// A context opened with [`for_read`] has no writer and vice versa; using
/// the wrong direction fails with [`SerialError::WrongDirection`].
///
/// [`read_value`]: Self::read_value
/// [`write_value`]: Self::write_value
/// [`for_read`]: Self::for_read
pub struct SerializerContext<'a> {
    settings: &'a SerializerSettings,
    types: &'a TypeTable,
    registry: &'a CodecRegistry,
    channel: Channel<'a>,
    aliases: AliasTable,
    anchors: WriteAnchors,
    writing: HashSet<usize>,
    codecs: HashMap<String, Rc<dyn Codec>>,
}

impl<'a> SerializerContext<'a> {
    fn new(
        settings: &'a SerializerSettings,
        types: &'a TypeTable,
        registry: &'a CodecRegistry,
        channel: Channel<'a>,
    ) -> Self {
        Self {
            settings,
            types,
            registry,
            channel,
            aliases: AliasTable::new(),
            anchors: WriteAnchors::new(),
            writing: HashSet::default(),
            codecs: HashMap::default(),
        }
    }

    /// Opens a context that reads events from `parser`.
    #[inline]
    pub fn for_read(
        settings: &'a SerializerSettings,
        types: &'a TypeTable,
        registry: &'a CodecRegistry,
        parser: &'a mut dyn EventParser,
    ) -> Self {
        Self::new(settings, types, registry, Channel::Read(EventReader::new(parser)))
    }

    /// Opens a context that writes events to `emitter`.
    #[inline]
    pub fn for_write(
        settings: &'a SerializerSettings,
        types: &'a TypeTable,
        registry: &'a CodecRegistry,
        emitter: &'a mut dyn EventEmitter,
    ) -> Self {
        Self::new(settings, types, registry, Channel::Write(emitter))
    }

    #[inline]
    pub fn settings(&self) -> &'a SerializerSettings {
        self.settings
    }

    #[inline]
    pub fn types(&self) -> &'a TypeTable {
        self.types
    }

    #[inline]
    pub fn registry(&self) -> &'a CodecRegistry {
        self.registry
    }

    /// The event reader of a read context.
    pub fn reader(&mut self) -> Result<&mut EventReader<'a>, SerialError> {
        match &mut self.channel {
            Channel::Read(reader) => Ok(reader),
            Channel::Write(_) => Err(SerialError::WrongDirection("writing")),
        }
    }

    /// Emits one event through the writer of a write context.
    pub fn emit(&mut self, event: Event) -> Result<(), SerialError> {
        match &mut self.channel {
            Channel::Write(emitter) => Ok(emitter.emit(event)?),
            Channel::Read(_) => Err(SerialError::WrongDirection("reading")),
        }
    }

    /// Resolves a declared type name.
    #[inline]
    pub fn descriptor(&self, type_name: &str) -> Result<Arc<TypeDescriptor>, SerialError> {
        self.types.resolve(type_name)
    }

    /// The codec for `ty`, selected once per context.
    pub fn codec_for(&mut self, ty: &TypeDescriptor) -> Result<Rc<dyn Codec>, SerialError> {
        if let Some(codec) = self.codecs.get(ty.name()) {
            return Ok(codec.clone());
        }
        let registry = self.registry;
        let codec = registry.select(self, ty)?;
        self.codecs.insert(String::from(ty.name()), codec.clone());
        Ok(codec)
    }

    /// Reads one value of the declared type `type_name`.
    ///
    /// - An alias to a known anchor yields the anchored value.
    /// - An alias to an anchor not defined yet yields [`ValueInput::Alias`];
    ///   the caller decides how to defer the mutation.
    /// - A `~` scalar yields [`Value::Null`].
    /// - Anything else is read by the type's codec, reusing `existing` if given.
    pub fn read_value(
        &mut self,
        existing: Option<Value>,
        type_name: &str,
    ) -> Result<ValueInput, SerialError> {
        let ty = self.descriptor(type_name)?;

        if let Some(Event::Alias { name }) = self.reader()?.next_if(EventKind::Alias)? {
            return Ok(match self.aliases.resolve(&name) {
                Some(value) => ValueInput::Value(value),
                None => ValueInput::Alias(name),
            });
        }

        let reader = self.reader()?;
        if reader.peek_scalar()? == Some(NULL_SCALAR) {
            let (anchor, _) = reader.expect_scalar()?;
            if let Some(anchor) = anchor {
                self.define_anchor(anchor, Value::Null)?;
            }
            return Ok(ValueInput::Value(Value::Null));
        }

        let codec = self.codec_for(&ty)?;
        codec.read(self, existing, &ty)
    }

    /// Writes one value against the declared type `type_name`.
    ///
    /// `Null` is written as `~`. A shared object already written is
    /// written as an alias when [`emit_alias`] is set. Without it, reaching
    /// an object from inside itself fails with [`SerialError::CyclicValue`].
    ///
    /// [`emit_alias`]: SerializerSettings::emit_alias
    pub fn write_value(&mut self, value: &Value, type_name: &str) -> Result<(), SerialError> {
        let ty = self.descriptor(type_name)?;

        if value.is_null() {
            return self.emit(Event::scalar(NULL_SCALAR));
        }

        let mut anchor = None;
        if let Value::Object(object) = value
            && self.settings.emit_alias
        {
            match self.anchors.visit(object) {
                AnchorState::Written(name) => return self.emit(Event::alias(name)),
                AnchorState::First(name) => anchor = Some(name),
                AnchorState::Unshared => {}
            }
        }

        let codec = self.codec_for(&ty)?;
        let addr = value.as_object().map(ObjectRef::addr);
        if let Some(addr) = addr
            && !self.writing.insert(addr)
        {
            return Err(SerialError::CyclicValue {
                type_name: String::from(ty.name()),
            });
        }

        let output = ValueOutput {
            value: value.clone(),
            anchor,
        };
        let result = codec.write(self, output, &ty);

        if let Some(addr) = addr {
            self.writing.remove(&addr);
        }
        result
    }

    /// Records which objects under `root` need anchors.
    ///
    /// Call once before writing `root`; without it every object is written inline.
    #[inline]
    pub fn prepare_anchors(&mut self, root: &Value) {
        self.anchors.scan(root);
    }

    /// Defines an anchor and runs every binding waiting for it.
    #[inline]
    pub fn define_anchor(&mut self, anchor: String, value: Value) -> Result<(), SerialError> {
        self.aliases.define(anchor, value)
    }

    /// Defers a mutation until `alias` is defined.
    #[inline]
    pub fn add_alias_binding(
        &mut self,
        alias: String,
        action: impl FnOnce(Value) -> Result<(), SerialError> + 'static,
    ) {
        self.aliases.add_binding(AliasBinding::new(alias, action));
    }

    /// Number of bindings still waiting for their anchor.
    #[inline]
    pub fn pending_aliases(&self) -> usize {
        self.aliases.pending_len()
    }

    /// Ends the operation, failing if any alias binding is unresolved.
    pub fn finish(self) -> Result<(), SerialError> {
        self.aliases.finish()
    }
}
