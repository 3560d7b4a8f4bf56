//! Minimal object types backing the serializer tests.

use alloc::string::String;
use alloc::vec;
use core::any::Any;

use crate::args::{Args, FromArgs};
use crate::error::ReadError;
use crate::form::CompactForm;
use crate::object::ScriptObject;
use crate::registry::{TypeRegistry, object_factory};
use crate::serde::SerializeContext;
use crate::uid::{Uid, UidSource};
use crate::value::Value;

/// A plain value type: no uid, duplicated freely in the stream.
#[derive(Debug, PartialEq)]
pub(crate) struct Widget {
    pub x: f64,
    pub y: f64,
}

impl Widget {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl FromArgs for Widget {
    fn from_slot(value: &Value) -> Option<Self> {
        let widget = value.downcast_ref::<Widget>()?;
        Some(Self::new(widget.x, widget.y))
    }

    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
        let x = args.read::<f64>()?;
        let y = args.read::<f64>()?;
        Ok(Self::new(x, y))
    }
}

impl ScriptObject for Widget {
    fn type_tag(&self) -> &'static str {
        "Widget"
    }

    fn to_compact(&self, ctx: &mut SerializeContext) -> CompactForm {
        CompactForm::Seq(vec![ctx.number(self.x), ctx.number(self.y)])
    }

    fn equals_object(&self, other: &dyn ScriptObject) -> bool {
        other.downcast_ref::<Widget>() == Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A dictionary-eligible type: owns a uid, serialized once per pass.
#[derive(Debug)]
pub(crate) struct Palette {
    uid: Uid,
    pub tone: f64,
}

impl Palette {
    pub fn new(tone: f64) -> Self {
        Self {
            uid: UidSource::global().mint(),
            tone,
        }
    }

    pub fn uid_key(&self) -> String {
        self.uid.reference_key()
    }
}

impl FromArgs for Palette {
    fn from_slot(value: &Value) -> Option<Self> {
        let palette = value.downcast_ref::<Palette>()?;
        Some(Self::new(palette.tone))
    }

    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
        Ok(Self::new(args.read::<f64>()?))
    }
}

impl ScriptObject for Palette {
    fn type_tag(&self) -> &'static str {
        "Palette"
    }

    fn uid(&self) -> Option<Uid> {
        Some(self.uid)
    }

    fn to_compact(&self, ctx: &mut SerializeContext) -> CompactForm {
        let tone = ctx.number(self.tone);
        ctx.add(self.uid, |_| {
            CompactForm::Seq(vec![CompactForm::from("Palette"), tone])
        })
    }

    fn equals_object(&self, other: &dyn ScriptObject) -> bool {
        match other.downcast_ref::<Palette>() {
            Some(palette) => palette.tone == self.tone,
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub(crate) fn test_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register("Widget", object_factory::<Widget>);
    registry.register("Palette", object_factory::<Palette>);
    registry
}
