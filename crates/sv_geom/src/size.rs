//! A width/height extent.

use alloc::vec;
use core::any::Any;
use core::ops::{Add, Mul, Sub};

use sv_object::args::{Args, FromArgs};
use sv_object::error::ReadError;
use sv_object::form::CompactForm;
use sv_object::object::ScriptObject;
use sv_object::serde::SerializeContext;
use sv_object::value::Value;

use crate::fields;
use crate::point::Point;

/// A width/height extent.
///
/// Reads the same constructor conventions as [`Point`], with
/// `{width, height}` as its native property spelling.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// The area covered by this extent.
    #[inline]
    pub fn area(self) -> f64 {
        self.width * self.height
    }
}

impl Add for Size {
    type Output = Size;

    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Sub for Size {
    type Output = Size;

    #[inline]
    fn sub(self, rhs: Size) -> Size {
        Size::new(self.width - rhs.width, self.height - rhs.height)
    }
}

impl Mul<f64> for Size {
    type Output = Size;

    #[inline]
    fn mul(self, rhs: f64) -> Size {
        Size::new(self.width * rhs, self.height * rhs)
    }
}

impl From<(f64, f64)> for Size {
    #[inline]
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

// -----------------------------------------------------------------------------
// Protocol

impl FromArgs for Size {
    fn from_slot(value: &Value) -> Option<Self> {
        value.downcast_ref::<Size>().copied()
    }

    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
        match args.peek() {
            None => Ok(Self::ZERO),
            Some(Value::Number(_)) => {
                let width = args.read::<f64>()?;
                let height = match args.peek() {
                    Some(Value::Number(_)) => args.read::<f64>()?,
                    _ => width,
                };
                Ok(Self::new(width, height))
            }
            Some(Value::Seq(items)) => {
                let mut nested = Args::new(items);
                let size = Self::from_args(&mut nested)?;
                args.next_value();
                Ok(size)
            }
            Some(Value::Null) => {
                args.next_value();
                Ok(Self::ZERO)
            }
            Some(Value::Map(map)) => {
                let size = if map.contains_key("width") || map.contains_key("height") {
                    Self::new(fields::number(map, "width"), fields::number(map, "height"))
                } else if map.contains_key("x") || map.contains_key("y") {
                    Self::new(fields::number(map, "x"), fields::number(map, "y"))
                } else {
                    return Err(ReadError::invalid_argument(
                        "Size",
                        "property object carries neither width/height nor x/y",
                    ));
                };
                args.next_value();
                Ok(size)
            }
            Some(slot @ Value::Obj(_)) => {
                if let Some(size) = Self::from_slot(slot) {
                    args.next_value();
                    Ok(size)
                } else if let Some(point) = slot.downcast_ref::<Point>() {
                    let size = Self::new(point.x, point.y);
                    args.next_value();
                    Ok(size)
                } else {
                    Err(ReadError::invalid_argument(
                        "Size",
                        "object slot is neither a size nor a point",
                    ))
                }
            }
            Some(_) => Err(ReadError::invalid_argument(
                "Size",
                "expected numbers, a sequence, a property object, or a size",
            )),
        }
    }
}

impl ScriptObject for Size {
    fn type_tag(&self) -> &'static str {
        "Size"
    }

    fn to_compact(&self, ctx: &mut SerializeContext) -> CompactForm {
        CompactForm::Seq(vec![ctx.number(self.width), ctx.number(self.height)])
    }

    fn equals_object(&self, other: &dyn ScriptObject) -> bool {
        other.downcast_ref::<Size>() == Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(feature = "auto_register")]
inventory::submit! {
    sv_object::TagRegistration::new("Size", sv_object::object_factory::<Size>)
}

#[cfg(test)]
mod tests {
    use sv_object::value::Map;

    use super::*;

    #[test]
    fn constructor_conventions() {
        assert_eq!(Args::new(&[]).read::<Size>().unwrap(), Size::ZERO);
        assert_eq!(
            Args::new(&[Value::from(5.0)]).read::<Size>().unwrap(),
            Size::new(5.0, 5.0)
        );

        let list = [Value::from(2.0), Value::from(3.0)];
        assert_eq!(
            Args::new(&list).read::<Size>().unwrap(),
            Size::new(2.0, 3.0)
        );

        let mut map = Map::new();
        map.insert("width".into(), Value::from(4.0));
        map.insert("height".into(), Value::from(6.0));
        assert_eq!(
            Args::new(&[Value::Map(map)]).read::<Size>().unwrap(),
            Size::new(4.0, 6.0)
        );
    }

    #[test]
    fn point_converts_to_size() {
        let list = [Value::object(Point::new(2.0, 3.0))];
        assert_eq!(
            Args::new(&list).read::<Size>().unwrap(),
            Size::new(2.0, 3.0)
        );
    }

    #[test]
    fn arithmetic() {
        let size = Size::new(2.0, 3.0);
        assert_eq!(size.area(), 6.0);
        assert_eq!(size + Size::new(1.0, 1.0), Size::new(3.0, 4.0));
        assert_eq!(size * 2.0, Size::new(4.0, 6.0));
    }
}
