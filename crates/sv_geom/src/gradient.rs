//! Gradients and their color stops.
//!
//! A gradient is the canonical shared object: any number of styled
//! values can point at the same gradient, so it owns a
//! [`Uid`](sv_object::uid::Uid) and serializes through the
//! shared-definition dictionary — one definition per pass, reference
//! markers everywhere else.

use alloc::vec;
use alloc::vec::Vec;
use core::any::Any;

use sv_object::args::{Args, FromArgs};
use sv_object::error::ReadError;
use sv_object::form::CompactForm;
use sv_object::object::ScriptObject;
use sv_object::serde::SerializeContext;
use sv_object::uid::{Uid, UidSource};
use sv_object::value::Value;

use crate::color::Color;
use crate::fields;

// -----------------------------------------------------------------------------
// GradientStop

/// One color stop along a gradient ramp.
///
/// Constructible from `(color)`, `(color, offset)`, a
/// `{color, offset}` property object, or an existing stop.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GradientStop {
    pub color: Color,
    /// Position along the ramp in `0..=1`.
    pub offset: f64,
}

impl GradientStop {
    #[inline]
    pub const fn new(color: Color, offset: f64) -> Self {
        Self { color, offset }
    }
}

impl FromArgs for GradientStop {
    fn from_slot(value: &Value) -> Option<Self> {
        value.downcast_ref::<GradientStop>().copied()
    }

    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
        if let Some(map) = args.named_map()
            && map.contains_key("color")
        {
            let color = args.read_named::<Color>("color")?;
            let offset = fields::number(map, "offset");
            return Ok(Self::new(color, offset));
        }
        let color = args.read::<Color>()?;
        let offset = args.read_opt::<f64>()?.unwrap_or(0.0);
        Ok(Self::new(color, offset))
    }
}

impl ScriptObject for GradientStop {
    fn type_tag(&self) -> &'static str {
        "GradientStop"
    }

    fn to_compact(&self, ctx: &mut SerializeContext) -> CompactForm {
        // The color stays untagged: the stop position implies its type.
        CompactForm::Seq(vec![self.color.to_compact(ctx), ctx.number(self.offset)])
    }

    fn equals_object(&self, other: &dyn ScriptObject) -> bool {
        other.downcast_ref::<GradientStop>() == Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(feature = "auto_register")]
inventory::submit! {
    sv_object::TagRegistration::new("GradientStop", sv_object::object_factory::<GradientStop>)
}

// -----------------------------------------------------------------------------
// Gradient

/// A linear or radial color ramp.
///
/// Constructible from `(stops)`, `(stops, radial)`, a
/// `{stops, radial}` property object, or an existing gradient (which
/// copies the stops into a fresh identity).
#[derive(Debug)]
pub struct Gradient {
    uid: Uid,
    pub stops: Vec<GradientStop>,
    pub radial: bool,
}

impl Gradient {
    pub fn new(stops: Vec<GradientStop>, radial: bool) -> Self {
        Self {
            uid: UidSource::global().mint(),
            stops,
            radial,
        }
    }

    /// A two-stop ramp between `from` and `to`.
    pub fn between(from: Color, to: Color) -> Self {
        Self::new(
            vec![GradientStop::new(from, 0.0), GradientStop::new(to, 1.0)],
            false,
        )
    }

    #[inline]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }
}

fn read_stops(args: &mut Args<'_>) -> Result<Vec<GradientStop>, ReadError> {
    match args.peek() {
        Some(Value::Seq(items)) => {
            let mut nested = Args::new(items);
            let stops = nested.read_all::<GradientStop>()?;
            args.next_value();
            Ok(stops)
        }
        None => Ok(Vec::new()),
        _ => Err(ReadError::invalid_argument(
            "Gradient",
            "expected a sequence of color stops",
        )),
    }
}

impl FromArgs for Gradient {
    fn from_slot(value: &Value) -> Option<Self> {
        let gradient = value.downcast_ref::<Gradient>()?;
        // Copying mints a fresh identity.
        Some(Self::new(gradient.stops.clone(), gradient.radial))
    }

    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
        if let Some(map) = args.named_map()
            && (map.contains_key("stops") || map.contains_key("radial"))
        {
            let stops = match map.get("stops") {
                Some(Value::Seq(items)) => Args::new(items).read_all::<GradientStop>()?,
                Some(_) => {
                    return Err(ReadError::invalid_argument(
                        "Gradient",
                        "stops must be a sequence",
                    ));
                }
                None => Vec::new(),
            };
            let radial = matches!(map.get("radial"), Some(Value::Bool(true)));
            return Ok(Self::new(stops, radial));
        }
        if let Some(slot) = args.peek()
            && let Some(gradient) = Self::from_slot(slot)
        {
            args.next_value();
            return Ok(gradient);
        }
        let stops = read_stops(args)?;
        let radial = args.read_opt::<bool>()?.unwrap_or(false);
        Ok(Self::new(stops, radial))
    }
}

impl ScriptObject for Gradient {
    fn type_tag(&self) -> &'static str {
        "Gradient"
    }

    fn uid(&self) -> Option<Uid> {
        Some(self.uid)
    }

    fn to_compact(&self, ctx: &mut SerializeContext) -> CompactForm {
        ctx.add(self.uid, |ctx| {
            // The definition embeds its own tag so the dictionary entry
            // rebuilds as a typed instance.
            let stops = self
                .stops
                .iter()
                .map(|stop| stop.to_compact(ctx))
                .collect::<Vec<_>>();
            CompactForm::Seq(vec![
                CompactForm::from("Gradient"),
                CompactForm::Seq(stops),
                CompactForm::Bool(self.radial),
            ])
        })
    }

    fn equals_object(&self, other: &dyn ScriptObject) -> bool {
        match other.downcast_ref::<Gradient>() {
            Some(gradient) => gradient.stops == self.stops && gradient.radial == self.radial,
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(feature = "auto_register")]
inventory::submit! {
    sv_object::TagRegistration::new("Gradient", sv_object::object_factory::<Gradient>)
}
