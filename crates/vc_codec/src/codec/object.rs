use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;

use vc_event::{Event, EventError, EventKind, MappingStyle, SequenceStyle};

use crate::SerialError;
use crate::codec::{Codec, CodecFactory, ValueInput, ValueOutput};
use crate::context::SerializerContext;
use crate::descriptor::{MemberDescriptor, TypeDescriptor};
use crate::value::{Object, ObjectRef, Value};

// -----------------------------------------------------------------------------
// Member helpers

/// Reads one `key: value` entry into the matching member of `object`.
///
/// Unknown keys fail with [`SerialError::UnknownMember`], or are skipped
/// with a warning when [`ignore_unmapped`] is set. A value that is an alias
/// to an anchor defined later is assigned once the anchor appears.
///
/// [`ignore_unmapped`]: crate::SerializerSettings::ignore_unmapped
pub fn read_member(
    ctx: &mut SerializerContext<'_>,
    object: &ObjectRef,
    ty: &TypeDescriptor,
) -> Result<(), SerialError> {
    let (_, key) = ctx.reader()?.expect_scalar()?;

    let Some(member) = ty.member(&key) else {
        if ctx.settings().ignore_unmapped {
            log::warn!("skipping unmapped key `{key}` of type `{}`", ty.name());
            ctx.reader()?.skip_node()?;
            return Ok(());
        }
        return Err(SerialError::UnknownMember {
            type_name: String::from(ty.name()),
            member: key,
        });
    };

    // Nested objects are filled in place.
    let existing = match member.get(&object.borrow()) {
        value @ Value::Object(_) => Some(value),
        _ => None,
    };

    let index = member.index();
    match ctx.read_value(existing, member.ty())? {
        ValueInput::Value(value) => member.set(&mut object.borrow_mut(), value),
        ValueInput::Alias(alias) => {
            let target = object.clone();
            ctx.add_alias_binding(alias, move |value| {
                target.borrow_mut().set_member(index, value);
                Ok(())
            });
        }
    }
    Ok(())
}

/// Writes the member name as a key, then its current value.
pub fn write_member(
    ctx: &mut SerializerContext<'_>,
    object: &ObjectRef,
    member: &MemberDescriptor,
) -> Result<(), SerialError> {
    let value = member.get(&object.borrow());
    ctx.emit(Event::scalar(member.name()))?;
    ctx.write_value(&value, member.ty())
}

// -----------------------------------------------------------------------------
// ObjectLike

/// A composite codec written as a mapping of members, with hooks that let a
/// specialization switch to a sequence or add entries.
///
/// Implementors override the hooks; [`read_object`] and [`write_object`]
/// handle markers, anchors and instance creation around them.
///
/// [`read_object`]: ObjectLike::read_object
/// [`write_object`]: ObjectLike::write_object
pub trait ObjectLike {
    /// Whether instances of `ty` are written as a bare sequence.
    fn check_is_sequence(&self, _ctx: &SerializerContext<'_>, _ty: &TypeDescriptor) -> bool {
        false
    }

    /// Style of the sequence marker when [`check_is_sequence`](Self::check_is_sequence) holds.
    fn sequence_style(
        &self,
        _ctx: &SerializerContext<'_>,
        _object: &ObjectRef,
        _ty: &TypeDescriptor,
    ) -> SequenceStyle {
        SequenceStyle::Any
    }

    /// Reads the body between the start and end markers.
    ///
    /// For a mapping this is called once per entry. For a sequence it is called
    /// once and must consume every item.
    fn read_item(
        &self,
        ctx: &mut SerializerContext<'_>,
        object: &ObjectRef,
        ty: &TypeDescriptor,
    ) -> Result<(), SerialError> {
        read_member(ctx, object, ty)
    }

    /// Writes the body between the start and end markers.
    fn write_items(
        &self,
        ctx: &mut SerializerContext<'_>,
        object: &ObjectRef,
        ty: &TypeDescriptor,
    ) -> Result<(), SerialError> {
        for member in ty.members() {
            write_member(ctx, object, member)?;
        }
        Ok(())
    }

    /// Reads a whole instance of `ty`, reusing `existing` when it is an
    /// instance of the same type.
    fn read_object(
        &self,
        ctx: &mut SerializerContext<'_>,
        existing: Option<Value>,
        ty: &Arc<TypeDescriptor>,
    ) -> Result<ValueInput, SerialError> {
        let is_sequence = self.check_is_sequence(ctx, ty);
        let (start, end) = if is_sequence {
            (EventKind::SequenceStart, EventKind::SequenceEnd)
        } else {
            (EventKind::MappingStart, EventKind::MappingEnd)
        };
        let mut event = ctx.reader()?.expect(start)?;

        let object = match existing {
            Some(Value::Object(object)) if object.borrow().type_name() == ty.name() => object,
            None | Some(Value::Null) => ObjectRef::new(Object::new(ty.clone())),
            Some(_) => {
                return Err(SerialError::mismatch(
                    ty.name(),
                    "existing value is not an instance of the type",
                ));
            }
        };

        // Defined before the body so that nested aliases can point back here.
        if let Some(anchor) = event.take_anchor() {
            ctx.define_anchor(anchor, Value::Object(object.clone()))?;
        }

        if is_sequence {
            self.read_item(ctx, &object, ty)?;
            ctx.reader()?.expect(end)?;
        } else {
            loop {
                let reader = ctx.reader()?;
                match reader.peek_kind()? {
                    Some(kind) if kind == end => {
                        reader.next()?;
                        break;
                    }
                    Some(_) => self.read_item(ctx, &object, ty)?,
                    None => return Err(EventError::UnexpectedEnd { expected: end }.into()),
                }
            }
        }

        Ok(ValueInput::Value(Value::Object(object)))
    }

    /// Writes a whole instance of `ty`.
    fn write_object(
        &self,
        ctx: &mut SerializerContext<'_>,
        output: ValueOutput,
        ty: &Arc<TypeDescriptor>,
    ) -> Result<(), SerialError> {
        let Value::Object(object) = output.value else {
            return Err(SerialError::mismatch(ty.name(), "expected an object value"));
        };
        if object.borrow().type_name() != ty.name() {
            return Err(SerialError::mismatch(
                ty.name(),
                "object is an instance of another type",
            ));
        }

        let anchor = output.anchor;
        if self.check_is_sequence(ctx, ty) {
            let style = self.sequence_style(ctx, &object, ty);
            ctx.emit(Event::SequenceStart { anchor, style })?;
            self.write_items(ctx, &object, ty)?;
            ctx.emit(Event::SequenceEnd)
        } else {
            let style = MappingStyle::Any;
            ctx.emit(Event::MappingStart { anchor, style })?;
            self.write_items(ctx, &object, ty)?;
            ctx.emit(Event::MappingEnd)
        }
    }
}

// -----------------------------------------------------------------------------
// ObjectCodec

/// The generic fallback: any composite type as a mapping of its members.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectCodec;

impl ObjectLike for ObjectCodec {}

impl CodecFactory for ObjectCodec {
    fn try_create(
        &self,
        _ctx: &SerializerContext<'_>,
        ty: &TypeDescriptor,
    ) -> Option<Rc<dyn Codec>> {
        ty.scalar_kind().is_none().then(|| Rc::new(Self) as Rc<dyn Codec>)
    }
}

impl Codec for ObjectCodec {
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
