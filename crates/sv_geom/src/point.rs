//! A point in 2D space.

use alloc::vec;
use core::any::Any;
use core::ops::{Add, Mul, Neg, Sub};

use sv_object::args::{Args, FromArgs};
use sv_object::error::ReadError;
use sv_object::form::CompactForm;
use sv_object::object::ScriptObject;
use sv_object::serde::SerializeContext;
use sv_object::value::Value;

use crate::fields;
use crate::size::Size;

/// A point in 2D space.
///
/// Constructible from every convention the scripting surface uses:
/// `()`, `(n)` (both coordinates), `(x, y)`, an existing point (copy),
/// a `[x, y]` sequence, or an `{x, y}` / `{width, height}` property
/// object.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Distance from the origin.
    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Cross product z-component.
    #[inline]
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Linear interpolation between self and other.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// The vector scaled to length 1, or unchanged if zero.
    pub fn normalize(self) -> Point {
        let length = self.length();
        if length == 0.0 { self } else { self * (1.0 / length) }
    }

    /// The angle from the positive x axis, in degrees.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    /// The vector rotated by `angle` degrees around the origin.
    pub fn rotate(self, angle: f64) -> Point {
        let (sin, cos) = angle.to_radians().sin_cos();
        Point {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

// -----------------------------------------------------------------------------
// Protocol

impl FromArgs for Point {
    fn from_slot(value: &Value) -> Option<Self> {
        value.downcast_ref::<Point>().copied()
    }

    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
        match args.peek() {
            None => Ok(Self::ZERO),
            Some(Value::Number(_)) => {
                let x = args.read::<f64>()?;
                let y = match args.peek() {
                    Some(Value::Number(_)) => args.read::<f64>()?,
                    _ => x,
                };
                Ok(Self::new(x, y))
            }
            Some(Value::Seq(items)) => {
                let mut nested = Args::new(items);
                let point = Self::from_args(&mut nested)?;
                args.next_value();
                Ok(point)
            }
            Some(Value::Null) => {
                args.next_value();
                Ok(Self::ZERO)
            }
            Some(Value::Map(map)) => {
                let point = if map.contains_key("x") || map.contains_key("y") {
                    Self::new(fields::number(map, "x"), fields::number(map, "y"))
                } else if map.contains_key("width") || map.contains_key("height") {
                    Self::new(fields::number(map, "width"), fields::number(map, "height"))
                } else {
                    return Err(ReadError::invalid_argument(
                        "Point",
                        "property object carries neither x/y nor width/height",
                    ));
                };
                args.next_value();
                Ok(point)
            }
            Some(slot @ Value::Obj(_)) => {
                if let Some(point) = Self::from_slot(slot) {
                    args.next_value();
                    Ok(point)
                } else if let Some(size) = slot.downcast_ref::<Size>() {
                    let point = Self::new(size.width, size.height);
                    args.next_value();
                    Ok(point)
                } else {
                    Err(ReadError::invalid_argument(
                        "Point",
                        "object slot is neither a point nor a size",
                    ))
                }
            }
            Some(_) => Err(ReadError::invalid_argument(
                "Point",
                "expected numbers, a sequence, a property object, or a point",
            )),
        }
    }
}

impl ScriptObject for Point {
    fn type_tag(&self) -> &'static str {
        "Point"
    }

    fn to_compact(&self, ctx: &mut SerializeContext) -> CompactForm {
        CompactForm::Seq(vec![ctx.number(self.x), ctx.number(self.y)])
    }

    fn equals_object(&self, other: &dyn ScriptObject) -> bool {
        other.downcast_ref::<Point>() == Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(feature = "auto_register")]
inventory::submit! {
    sv_object::TagRegistration::new("Point", sv_object::object_factory::<Point>)
}

#[cfg(test)]
mod tests {
    use sv_object::value::Map;

    use super::*;

    fn read_point(list: &[Value]) -> Point {
        Args::new(list).read::<Point>().unwrap()
    }

    #[test]
    fn empty_window_is_origin() {
        assert_eq!(read_point(&[]), Point::ZERO);
    }

    #[test]
    fn one_number_fills_both_coordinates() {
        assert_eq!(read_point(&[Value::from(3.0)]), Point::new(3.0, 3.0));
    }

    #[test]
    fn two_numbers_are_x_and_y() {
        let list = [Value::from(3.0), Value::from(4.0)];
        let mut args = Args::new(&list);
        assert_eq!(args.read::<Point>().unwrap(), Point::new(3.0, 4.0));
        assert_eq!(args.consumed(), 2);
    }

    #[test]
    fn sequence_slot_reads_as_pair() {
        let list = [Value::Seq(alloc::vec![Value::from(1.0), Value::from(2.0)])];
        assert_eq!(read_point(&list), Point::new(1.0, 2.0));
    }

    #[test]
    fn property_object_reads_named_fields() {
        let mut map = Map::new();
        map.insert("x".into(), Value::from(3.0));
        map.insert("y".into(), Value::from(4.0));
        assert_eq!(read_point(&[Value::Map(map)]), Point::new(3.0, 4.0));

        let mut map = Map::new();
        map.insert("width".into(), Value::from(5.0));
        map.insert("height".into(), Value::from(6.0));
        assert_eq!(read_point(&[Value::Map(map)]), Point::new(5.0, 6.0));
    }

    #[test]
    fn existing_instance_is_taken_as_is() {
        let list = [Value::object(Point::new(7.0, 8.0))];
        let mut args = Args::new(&list);
        assert_eq!(args.read::<Point>().unwrap(), Point::new(7.0, 8.0));
        assert_eq!(args.consumed(), 1);
    }

    #[test]
    fn size_converts_to_point() {
        let list = [Value::object(Size::new(2.0, 3.0))];
        assert_eq!(read_point(&list), Point::new(2.0, 3.0));
    }

    #[test]
    fn readers_share_one_list() {
        // Two points packed flat into one argument list.
        let list = [
            Value::from(1.0),
            Value::from(2.0),
            Value::from(3.0),
            Value::from(4.0),
        ];
        let mut args = Args::new(&list);
        assert_eq!(args.read::<Point>().unwrap(), Point::new(1.0, 2.0));
        assert_eq!(args.read::<Point>().unwrap(), Point::new(3.0, 4.0));
        assert!(args.is_exhausted());
    }

    #[test]
    fn vector_math() {
        let a = Point::new(3.0, 4.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(a.distance(Point::ZERO), 5.0);
        assert_eq!(a + Point::new(1.0, 1.0), Point::new(4.0, 5.0));
        assert_eq!(-a, Point::new(-3.0, -4.0));
        assert_eq!(a.lerp(Point::ZERO, 1.0), Point::ZERO);

        let rotated = Point::new(1.0, 0.0).rotate(90.0);
        assert!((rotated.x).abs() < 1e-12);
        assert!((rotated.y - 1.0).abs() < 1e-12);
    }
}
