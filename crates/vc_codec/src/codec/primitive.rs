use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::sync::Arc;

use vc_event::Event;

use crate::SerialError;
use crate::codec::{Codec, CodecFactory, ValueInput, ValueOutput};
use crate::context::SerializerContext;
use crate::descriptor::{ScalarKind, TypeDescriptor};
use crate::value::Value;

// -----------------------------------------------------------------------------
// PrimitiveCodec

/// Reads and writes scalar leaves with `core` parsing and formatting.
///
/// | kind  | text                 |
/// |-------|----------------------|
/// | bool  | `true` / `false`     |
/// | int   | decimal `i64`        |
/// | float | `f64` display form   |
/// | str   | the text unchanged   |
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimitiveCodec;

impl PrimitiveCodec {
    fn parse(text: String, kind: ScalarKind) -> Result<Value, SerialError> {
        let parsed = match kind {
            ScalarKind::Bool => match text.as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            ScalarKind::Int => text.parse().ok().map(Value::Int),
            ScalarKind::Float => text.parse().ok().map(Value::Float),
            ScalarKind::Str => return Ok(Value::Str(text)),
        };
        parsed.ok_or(SerialError::InvalidScalar { value: text, kind })
    }

    fn format(value: &Value, ty: &TypeDescriptor, kind: ScalarKind) -> Result<String, SerialError> {
        match (kind, value) {
            (ScalarKind::Bool, Value::Bool(v)) => Ok(v.to_string()),
            (ScalarKind::Int, Value::Int(v)) => Ok(v.to_string()),
            (ScalarKind::Float, Value::Float(v)) => Ok(v.to_string()),
            (ScalarKind::Float, Value::Int(v)) => Ok(v.to_string()),
            (ScalarKind::Str, Value::Str(v)) => Ok(v.clone()),
            _ => Err(SerialError::mismatch(
                ty.name(),
                "value does not match the scalar kind",
            )),
        }
    }
}

impl CodecFactory for PrimitiveCodec {
    fn try_create(
        &self,
        _ctx: &SerializerContext<'_>,
        ty: &TypeDescriptor,
    ) -> Option<Rc<dyn Codec>> {
        ty.scalar_kind().map(|_| Rc::new(Self) as Rc<dyn Codec>)
    }
}

impl Codec for PrimitiveCodec {
    fn read(
        &self,
        ctx: &mut SerializerContext<'_>,
        _existing: Option<Value>,
        ty: &Arc<TypeDescriptor>,
    ) -> Result<ValueInput, SerialError> {
        let Some(kind) = ty.scalar_kind() else {
            return Err(SerialError::mismatch(ty.name(), "not a scalar type"));
        };

        let (anchor, text) = ctx.reader()?.expect_scalar()?;
        let value = Self::parse(text, kind)?;
        if let Some(anchor) = anchor {
            ctx.define_anchor(anchor, value.clone())?;
        }
        Ok(ValueInput::Value(value))
    }

    fn write(
        &self,
        ctx: &mut SerializerContext<'_>,
        output: ValueOutput,
        ty: &Arc<TypeDescriptor>,
    ) -> Result<(), SerialError> {
        let Some(kind) = ty.scalar_kind() else {
            return Err(SerialError::mismatch(ty.name(), "not a scalar type"));
        };

        let value = Self::format(&output.value, ty, kind)?;
        ctx.emit(Event::Scalar {
            anchor: output.anchor,
            value,
        })
    }
}
