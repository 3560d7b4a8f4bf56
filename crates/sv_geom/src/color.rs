//! An RGBA color.

use alloc::vec;
use alloc::vec::Vec;
use core::any::Any;

use sv_object::args::{Args, FromArgs};
use sv_object::error::ReadError;
use sv_object::form::CompactForm;
use sv_object::object::ScriptObject;
use sv_object::serde::SerializeContext;
use sv_object::value::Value;

use crate::fields;

/// An RGBA color with components in the `0..=1` range.
///
/// Constructible from `(gray)`, `(gray, alpha)`, `(r, g, b)`,
/// `(r, g, b, a)`, a component sequence, a
/// `{red, green, blue, alpha}` / `{gray}` property object, or an
/// existing color. Optional color slots are spelled `null` in scripts,
/// so the type reads null as absent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    pub components: [f64; 4],
}

impl Color {
    pub const BLACK: Color = Color {
        components: [0.0, 0.0, 0.0, 1.0],
    };
    pub const WHITE: Color = Color {
        components: [1.0, 1.0, 1.0, 1.0],
    };

    #[inline]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self {
            components: [red, green, blue, 1.0],
        }
    }

    #[inline]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            components: [red, green, blue, alpha],
        }
    }

    #[inline]
    pub const fn gray(value: f64) -> Self {
        Self::rgb(value, value, value)
    }

    #[inline]
    pub const fn red(self) -> f64 {
        self.components[0]
    }

    #[inline]
    pub const fn green(self) -> f64 {
        self.components[1]
    }

    #[inline]
    pub const fn blue(self) -> f64 {
        self.components[2]
    }

    #[inline]
    pub const fn alpha(self) -> f64 {
        self.components[3]
    }

    #[inline]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.components[3] = alpha;
        self
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.alpha() >= 1.0
    }
}

// -----------------------------------------------------------------------------
// Protocol

impl FromArgs for Color {
    const READ_NULL: bool = true;

    fn from_slot(value: &Value) -> Option<Self> {
        value.downcast_ref::<Color>().copied()
    }

    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
        match args.peek() {
            None => Ok(Self::BLACK),
            Some(Value::Number(_)) => {
                let mut components = Vec::with_capacity(4);
                while components.len() < 4
                    && matches!(args.peek(), Some(Value::Number(_)))
                {
                    components.push(args.read::<f64>()?);
                }
                Ok(match components.as_slice() {
                    [gray] => Self::gray(*gray),
                    [gray, alpha] => Self::gray(*gray).with_alpha(*alpha),
                    [r, g, b] => Self::rgb(*r, *g, *b),
                    [r, g, b, a] => Self::rgba(*r, *g, *b, *a),
                    _ => unreachable!(),
                })
            }
            Some(Value::Seq(items)) => {
                let mut nested = Args::new(items);
                let color = Self::from_args(&mut nested)?;
                args.next_value();
                Ok(color)
            }
            Some(Value::Null) => {
                args.next_value();
                Ok(Self::BLACK)
            }
            Some(Value::Map(map)) => {
                let color = if map.contains_key("gray") {
                    Self::gray(fields::number(map, "gray"))
                        .with_alpha(fields::number_or(map, "alpha", 1.0))
                } else if map.contains_key("red")
                    || map.contains_key("green")
                    || map.contains_key("blue")
                {
                    Self::rgba(
                        fields::number(map, "red"),
                        fields::number(map, "green"),
                        fields::number(map, "blue"),
                        fields::number_or(map, "alpha", 1.0),
                    )
                } else {
                    return Err(ReadError::invalid_argument(
                        "Color",
                        "property object carries no recognized color fields",
                    ));
                };
                args.next_value();
                Ok(color)
            }
            Some(slot) => match Self::from_slot(slot) {
                Some(color) => {
                    args.next_value();
                    Ok(color)
                }
                None => Err(ReadError::invalid_argument(
                    "Color",
                    "expected components, a sequence, a property object, or a color",
                )),
            },
        }
    }
}

impl ScriptObject for Color {
    fn type_tag(&self) -> &'static str {
        "Color"
    }

    fn to_compact(&self, ctx: &mut SerializeContext) -> CompactForm {
        let [r, g, b, a] = self.components;
        let mut items = vec![ctx.number(r), ctx.number(g), ctx.number(b)];
        if a != 1.0 {
            items.push(ctx.number(a));
        }
        CompactForm::Seq(items)
    }

    fn equals_object(&self, other: &dyn ScriptObject) -> bool {
        other.downcast_ref::<Color>() == Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(feature = "auto_register")]
inventory::submit! {
    sv_object::TagRegistration::new("Color", sv_object::object_factory::<Color>)
}
