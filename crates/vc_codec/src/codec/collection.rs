use alloc::format;
use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec::Vec;

use vc_event::{Event, EventError, EventKind, SequenceStyle};

use crate::SerialError;
use crate::codec::{Codec, CodecFactory, ObjectLike, ValueInput, ValueOutput};
use crate::codec::{read_member, write_member};
use crate::context::SerializerContext;
use crate::descriptor::{CAPACITY_MEMBER, TypeDescriptor};
use crate::value::{ObjectRef, Value};

// -----------------------------------------------------------------------------
// CollectionCodec

/// Codec for collection-like types.
///
/// A collection is written in one of two shapes:
///
/// - A bare sequence, when the type has no members besides its items, or
///   only a `Capacity` member that is not emitted.
/// - A mapping of its members followed by the reserved items key
///   ([`special_collection_member`]) holding the item sequence.
///
/// ```text
/// [1, 2, 3]            # sequence, flow below `limit_flow_sequence`
///
/// Label: tools         # mapping
/// __items__:
///   - 1
///   - 2
/// ```
///
/// On read the reserved key is recognized wherever it appears among the
/// mapping's keys. An item that is an alias to a later anchor keeps its
/// position: a `Null` placeholder is appended and overwritten once the anchor
/// is defined.
///
/// [`special_collection_member`]: crate::SerializerSettings::special_collection_member
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectionCodec;

impl CollectionCodec {
    fn element_type(ty: &TypeDescriptor) -> Result<&str, SerialError> {
        ty.element_type()
            .ok_or_else(|| SerialError::mismatch(ty.name(), "not a collection type"))
    }

    /// The mapping shape needs a reserved key no member can shadow.
    fn check_reserved_key(
        ctx: &SerializerContext<'_>,
        ty: &TypeDescriptor,
    ) -> Result<(), SerialError> {
        let reserved = ctx.settings().special_collection_member.as_str();
        if ty.member(reserved).is_some() {
            return Err(SerialError::mismatch(
                ty.name(),
                format!("member `{reserved}` collides with the reserved items key"),
            ));
        }
        Ok(())
    }

    /// Reads items until the sequence end, which is left in the reader.
    fn read_sequence_items(
        ctx: &mut SerializerContext<'_>,
        object: &ObjectRef,
        ty: &TypeDescriptor,
    ) -> Result<(), SerialError> {
        if !object.borrow().is_appendable() {
            return Err(SerialError::mismatch(
                ty.name(),
                "cannot deserialize list to type",
            ));
        }
        let element = Self::element_type(ty)?;

        loop {
            match ctx.reader()?.peek_kind()? {
                Some(EventKind::SequenceEnd) => return Ok(()),
                Some(_) => {}
                None => {
                    return Err(EventError::UnexpectedEnd {
                        expected: EventKind::SequenceEnd,
                    }
                    .into());
                }
            }

            match ctx.read_value(None, element)? {
                ValueInput::Value(value) => {
                    object.borrow_mut().push_item(value)?;
                }
                ValueInput::Alias(alias) => {
                    let index = object.borrow_mut().push_item(Value::Null)?;
                    let target = object.clone();
                    ctx.add_alias_binding(alias, move |value| {
                        target.borrow_mut().set_item(index, value)
                    });
                }
            }
        }
    }

    fn write_sequence_items(
        ctx: &mut SerializerContext<'_>,
        object: &ObjectRef,
        ty: &TypeDescriptor,
    ) -> Result<(), SerialError> {
        let element = Self::element_type(ty)?;
        let items: Vec<Value> = object.borrow().items().unwrap_or_default().to_vec();

        for item in &items {
            ctx.write_value(item, element)?;
        }
        Ok(())
    }
}

impl ObjectLike for CollectionCodec {
    fn check_is_sequence(&self, ctx: &SerializerContext<'_>, ty: &TypeDescriptor) -> bool {
        ty.is_pure_collection()
            || (ty.has_only_capacity() && !ctx.settings().emit_capacity_for_list)
    }

    fn sequence_style(
        &self,
        ctx: &SerializerContext<'_>,
        object: &ObjectRef,
        _ty: &TypeDescriptor,
    ) -> SequenceStyle {
        let limit = ctx.settings().limit_flow_sequence;
        match object.borrow().len() {
            Some(len) if len > 0 && len < limit => SequenceStyle::Flow,
            _ => SequenceStyle::Block,
        }
    }

    fn read_item(
        &self,
        ctx: &mut SerializerContext<'_>,
        object: &ObjectRef,
        ty: &TypeDescriptor,
    ) -> Result<(), SerialError> {
        if self.check_is_sequence(ctx, ty) {
            return Self::read_sequence_items(ctx, object, ty);
        }
        Self::check_reserved_key(ctx, ty)?;

        let reserved = ctx.settings().special_collection_member.as_str();
        let reader = ctx.reader()?;
        if reader.peek_scalar()? != Some(reserved) {
            return read_member(ctx, object, ty);
        }

        reader.next()?;
        reader.expect(EventKind::SequenceStart)?;
        Self::read_sequence_items(ctx, object, ty)?;
        ctx.reader()?.expect(EventKind::SequenceEnd)?;
        Ok(())
    }

    fn write_items(
        &self,
        ctx: &mut SerializerContext<'_>,
        object: &ObjectRef,
        ty: &TypeDescriptor,
    ) -> Result<(), SerialError> {
        if self.check_is_sequence(ctx, ty) {
            return Self::write_sequence_items(ctx, object, ty);
        }
        Self::check_reserved_key(ctx, ty)?;

        let settings = ctx.settings();
        for member in ty.members() {
            if member.name() == CAPACITY_MEMBER && !settings.emit_capacity_for_list {
                continue;
            }
            write_member(ctx, object, member)?;
        }

        let style = self.sequence_style(ctx, object, ty);
        ctx.emit(Event::scalar(settings.special_collection_member.as_str()))?;
        ctx.emit(Event::sequence_start(style))?;
        Self::write_sequence_items(ctx, object, ty)?;
        ctx.emit(Event::SequenceEnd)
    }
}

impl CodecFactory for CollectionCodec {
    fn try_create(
        &self,
        _ctx: &SerializerContext<'_>,
        ty: &TypeDescriptor,
    ) -> Option<Rc<dyn Codec>> {
        ty.is_collection().then(|| Rc::new(Self) as Rc<dyn Codec>)
    }
}

impl Codec for CollectionCodec {
    #[inline]
    fn read(
        &self,
        ctx: &mut SerializerContext<'_>,
        existing: Option<Value>,
        ty: &Arc<TypeDescriptor>,
    ) -> Result<ValueInput, SerialError> {
        self.read_object(ctx, existing, ty)
    }

    #[inline]
    fn write(
        &self,
        ctx: &mut SerializerContext<'_>,
        output: ValueOutput,
        ty: &Arc<TypeDescriptor>,
    ) -> Result<(), SerialError> {
        self.write_object(ctx, output, ty)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use vc_event::{Event, EventError, EventKind, EventStream, EventWriter};
    use vc_event::{MappingStyle, SequenceStyle};

    use crate::codec::CodecRegistry;
    use crate::context::SerializerContext;
    use crate::descriptor::{TypeDescriptor, TypeTable};
    use crate::value::{Object, Value};
    use crate::{SerialError, SerializerSettings};

    fn types() -> TypeTable {
        let mut types = TypeTable::new();
        types.register(TypeDescriptor::collection("IntList", "int"));
        types.register(TypeDescriptor::collection("SizedList", "int").with_member("Capacity", "int"));
        types.register(TypeDescriptor::collection("Inventory", "int").with_member("Label", "string"));
        types.register(TypeDescriptor::fixed_collection("IntArray", "int"));
        types
    }

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Int).collect()
    }

    fn write(settings: &SerializerSettings, value: &Value, type_name: &str) -> Vec<Event> {
        let types = types();
        let registry = CodecRegistry::new();
        let mut writer = EventWriter::new();

        let mut ctx = SerializerContext::for_write(settings, &types, &registry, &mut writer);
        ctx.write_value(value, type_name).unwrap();
        ctx.finish().unwrap();
        writer.into_events()
    }

    fn read(
        settings: &SerializerSettings,
        events: Vec<Event>,
        existing: Option<Value>,
        type_name: &str,
    ) -> Result<Value, SerialError> {
        let types = types();
        let registry = CodecRegistry::new();
        let mut stream = EventStream::from(events);

        let mut ctx = SerializerContext::for_read(settings, &types, &registry, &mut stream);
        let value = ctx.read_value(existing, type_name)?.into_value()?;
        ctx.finish()?;
        Ok(value)
    }

    fn items_of(value: &Value) -> Vec<Value> {
        let object = value.as_object().unwrap().borrow();
        object.items().unwrap().to_vec()
    }

    #[test]
    fn flow_below_limit() {
        let types = types();
        let settings = SerializerSettings {
            limit_flow_sequence: 4,
            ..SerializerSettings::default()
        };
        let list = |n: i64| {
            let items = ints(&(1..=n).collect::<Vec<_>>());
            Value::from(Object::with_items(types.resolve("IntList").unwrap(), items).unwrap())
        };

        let events = write(&settings, &list(3), "IntList");
        assert_eq!(events[0], Event::sequence_start(SequenceStyle::Flow));
        assert_eq!(events.len(), 5);

        let events = write(&settings, &list(4), "IntList");
        assert_eq!(events[0], Event::sequence_start(SequenceStyle::Block));
        assert_eq!(
            &events[1..],
            &[
                Event::scalar("1"),
                Event::scalar("2"),
                Event::scalar("3"),
                Event::scalar("4"),
                Event::SequenceEnd,
            ]
        );

        let events = write(&settings, &list(0), "IntList");
        assert_eq!(
            events,
            [Event::sequence_start(SequenceStyle::Block), Event::SequenceEnd]
        );
    }

    #[test]
    fn capacity_suppressed() {
        let types = types();
        let mut sized = Object::with_items(types.resolve("SizedList").unwrap(), ints(&[7])).unwrap();
        sized.set("Capacity", Value::from(10));
        let sized = Value::from(sized);

        let settings = SerializerSettings::default();
        let events = write(&settings, &sized, "SizedList");
        assert_eq!(
            events,
            [
                Event::sequence_start(SequenceStyle::Block),
                Event::scalar("7"),
                Event::SequenceEnd,
            ]
        );
        let back = read(&settings, events, None, "SizedList").unwrap();
        assert_eq!(items_of(&back), ints(&[7]));

        let settings = SerializerSettings {
            emit_capacity_for_list: true,
            ..SerializerSettings::default()
        };
        let events = write(&settings, &sized, "SizedList");
        assert_eq!(
            events,
            [
                Event::mapping_start(MappingStyle::Any),
                Event::scalar("Capacity"),
                Event::scalar("10"),
                Event::scalar("__items__"),
                Event::sequence_start(SequenceStyle::Block),
                Event::scalar("7"),
                Event::SequenceEnd,
                Event::MappingEnd,
            ]
        );
    }

    #[test]
    fn mapping_shape_with_members() {
        let types = types();
        let mut inventory =
            Object::with_items(types.resolve("Inventory").unwrap(), ints(&[1, 2])).unwrap();
        inventory.set("Label", Value::from("tools"));

        let settings = SerializerSettings::default();
        let events = write(&settings, &Value::from(inventory), "Inventory");
        assert_eq!(
            events,
            [
                Event::mapping_start(MappingStyle::Any),
                Event::scalar("Label"),
                Event::scalar("tools"),
                Event::scalar("__items__"),
                Event::sequence_start(SequenceStyle::Block),
                Event::scalar("1"),
                Event::scalar("2"),
                Event::SequenceEnd,
                Event::MappingEnd,
            ]
        );
    }

    #[test]
    fn nested_items_follow_flow_limit() {
        let types = types();
        let settings = SerializerSettings {
            limit_flow_sequence: 4,
            ..SerializerSettings::default()
        };
        let inventory = |n: i64| {
            let items = ints(&(1..=n).collect::<Vec<_>>());
            let mut inventory =
                Object::with_items(types.resolve("Inventory").unwrap(), items).unwrap();
            inventory.set("Label", Value::from("tools"));
            Value::from(inventory)
        };

        let events = write(&settings, &inventory(2), "Inventory");
        assert_eq!(events[3], Event::scalar("__items__"));
        assert_eq!(events[4], Event::sequence_start(SequenceStyle::Flow));

        let events = write(&settings, &inventory(4), "Inventory");
        assert_eq!(events[3], Event::scalar("__items__"));
        assert_eq!(events[4], Event::sequence_start(SequenceStyle::Block));
    }

    #[test]
    fn member_named_like_reserved_key() {
        let mut types = types();
        let odd = types.register(
            TypeDescriptor::collection("Odd", "int").with_member("__items__", "string"),
        );
        let settings = SerializerSettings::default();
        let registry = CodecRegistry::new();

        let mut value = Object::with_items(odd, ints(&[1])).unwrap();
        value.set("__items__", Value::from("meta"));

        let mut writer = EventWriter::new();
        let mut ctx = SerializerContext::for_write(&settings, &types, &registry, &mut writer);
        assert!(matches!(
            ctx.write_value(&Value::from(value), "Odd"),
            Err(SerialError::TypeMismatch { type_name, .. }) if type_name == "Odd"
        ));
        ctx.finish().unwrap();
        assert!(!writer.events().contains(&Event::scalar("meta")));

        let events = vec![
            Event::mapping_start(MappingStyle::Block),
            Event::scalar("__items__"),
            Event::scalar("meta"),
            Event::MappingEnd,
        ];
        let mut stream = EventStream::from(events);
        let mut ctx = SerializerContext::for_read(&settings, &types, &registry, &mut stream);
        assert!(matches!(
            ctx.read_value(None, "Odd"),
            Err(SerialError::TypeMismatch { type_name, .. }) if type_name == "Odd"
        ));
    }

    #[test]
    fn reserved_key_in_any_position() {
        let settings = SerializerSettings::default();
        let items = [
            Event::scalar("__items__"),
            Event::sequence_start(SequenceStyle::Flow),
            Event::scalar("1"),
            Event::scalar("2"),
            Event::SequenceEnd,
        ];
        let label = [Event::scalar("Label"), Event::scalar("tools")];

        for items_first in [true, false] {
            let mut events = vec![Event::mapping_start(MappingStyle::Block)];
            if items_first {
                events.extend(items.iter().cloned());
                events.extend(label.iter().cloned());
            } else {
                events.extend(label.iter().cloned());
                events.extend(items.iter().cloned());
            }
            events.push(Event::MappingEnd);

            let value = read(&settings, events, None, "Inventory").unwrap();
            assert_eq!(items_of(&value), ints(&[1, 2]));
            let object = value.as_object().unwrap().borrow();
            assert_eq!(object.get("Label"), Some(&Value::from("tools")));
        }
    }

    #[test]
    fn custom_reserved_key() {
        let settings = SerializerSettings {
            special_collection_member: "~items".into(),
            ..SerializerSettings::default()
        };
        let events = vec![
            Event::mapping_start(MappingStyle::Block),
            Event::scalar("~items"),
            Event::sequence_start(SequenceStyle::Block),
            Event::scalar("5"),
            Event::SequenceEnd,
            Event::MappingEnd,
        ];

        let value = read(&settings, events, None, "Inventory").unwrap();
        assert_eq!(items_of(&value), ints(&[5]));
    }

    #[test]
    fn fixed_collection_refuses_items() {
        let settings = SerializerSettings::default();
        let events = vec![
            Event::sequence_start(SequenceStyle::Flow),
            Event::scalar("1"),
            Event::SequenceEnd,
        ];

        assert!(matches!(
            read(&settings, events, None, "IntArray"),
            Err(SerialError::TypeMismatch { type_name, .. }) if type_name == "IntArray"
        ));
    }

    #[test]
    fn unclosed_sequence() {
        let settings = SerializerSettings::default();
        let events = vec![
            Event::sequence_start(SequenceStyle::Block),
            Event::scalar("1"),
            Event::scalar("2"),
        ];

        assert!(matches!(
            read(&settings, events, None, "IntList"),
            Err(SerialError::Event(EventError::UnexpectedEnd {
                expected: EventKind::SequenceEnd
            }))
        ));
    }

    #[test]
    fn read_into_existing_appends() {
        let types = types();
        let existing = Object::with_items(types.resolve("IntList").unwrap(), ints(&[1])).unwrap();
        let existing = Value::from(existing);

        let settings = SerializerSettings::default();
        let events = vec![
            Event::sequence_start(SequenceStyle::Flow),
            Event::scalar("2"),
            Event::SequenceEnd,
        ];

        let value = read(&settings, events, Some(existing.clone()), "IntList").unwrap();
        assert_eq!(value, existing);
        assert_eq!(items_of(&value), ints(&[1, 2]));
    }

    #[test]
    fn deferred_item_keeps_position() {
        let mut types = types();
        types.register(TypeDescriptor::object("Tag").with_member("name", "string"));
        types.register(TypeDescriptor::collection("Tags", "Tag"));
        types.register(
            TypeDescriptor::object("Doc")
                .with_member("tags", "Tags")
                .with_member("late", "Tag"),
        );
        let settings = SerializerSettings::default();
        let registry = CodecRegistry::new();

        let tag = |anchor: Option<&str>, name: &str| {
            [
                Event::MappingStart {
                    anchor: anchor.map(Into::into),
                    style: MappingStyle::Flow,
                },
                Event::scalar("name"),
                Event::scalar(name),
                Event::MappingEnd,
            ]
        };

        let mut events = vec![
            Event::mapping_start(MappingStyle::Block),
            Event::scalar("tags"),
            Event::sequence_start(SequenceStyle::Block),
        ];
        events.extend(tag(None, "a"));
        events.push(Event::alias("later"));
        events.extend(tag(None, "c"));
        events.push(Event::SequenceEnd);
        events.push(Event::scalar("late"));
        events.extend(tag(Some("later"), "b"));
        events.push(Event::MappingEnd);

        let mut stream = EventStream::from(events);
        let mut ctx = SerializerContext::for_read(&settings, &types, &registry, &mut stream);
        let doc = ctx.read_value(None, "Doc").unwrap().into_value().unwrap();
        assert_eq!(ctx.pending_aliases(), 0);
        ctx.finish().unwrap();

        let doc = doc.as_object().unwrap().borrow();
        let names: Vec<Value> = items_of(doc.get("tags").unwrap())
            .iter()
            .map(|tag| tag.as_object().unwrap().borrow().get("name").cloned().unwrap())
            .collect();
        assert_eq!(
            names,
            [Value::from("a"), Value::from("b"), Value::from("c")]
        );
        assert_eq!(&items_of(doc.get("tags").unwrap())[1], doc.get("late").unwrap());
    }
}
