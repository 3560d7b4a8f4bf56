//! An axis-aligned rectangle.

use alloc::vec;
use core::any::Any;

use sv_object::args::{Args, FromArgs};
use sv_object::error::ReadError;
use sv_object::form::CompactForm;
use sv_object::object::ScriptObject;
use sv_object::serde::SerializeContext;
use sv_object::value::Value;

use crate::fields;
use crate::point::Point;
use crate::size::Size;

/// An axis-aligned rectangle.
///
/// Constructible from `(x, y, width, height)`, a point and a size, two
/// corner points, an existing rectangle (copy), or a property object
/// spelled `{x, y, width, height}`, `{from, to}`, or `{point, size}`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub const ZERO: Rectangle = Rectangle {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle spanning two corner points, in any order.
    pub fn from_points(from: Point, to: Point) -> Self {
        let x = from.x.min(to.x);
        let y = from.y.min(to.y);
        Self::new(x, y, from.x.max(to.x) - x, from.y.max(to.y) - y)
    }

    #[inline]
    pub const fn from_point_size(point: Point, size: Size) -> Self {
        Self::new(point.x, point.y, size.width, size.height)
    }

    #[inline]
    pub const fn point(self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub const fn top_left(self) -> Point {
        self.point()
    }

    #[inline]
    pub fn bottom_right(self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(self, other: Rectangle) -> Rectangle {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rectangle::new(
            x,
            y,
            self.bottom_right().x.max(other.bottom_right().x) - x,
            self.bottom_right().y.max(other.bottom_right().y) - y,
        )
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn expand(self, amount: Size) -> Rectangle {
        Rectangle::new(
            self.x - amount.width / 2.0,
            self.y - amount.height / 2.0,
            self.width + amount.width,
            self.height + amount.height,
        )
    }

    /// Scales the rectangle around its center.
    pub fn scale(self, factor: f64) -> Rectangle {
        self.expand(Size::new(
            self.width * factor - self.width,
            self.height * factor - self.height,
        ))
    }

    /// Moves the rectangle by the given offset.
    pub fn translate(self, offset: Point) -> Rectangle {
        Rectangle::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }
}

// -----------------------------------------------------------------------------
// Protocol

impl FromArgs for Rectangle {
    fn from_slot(value: &Value) -> Option<Self> {
        value.downcast_ref::<Rectangle>().copied()
    }

    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
        if let Some(map) = args.named_map() {
            if map.contains_key("from") || map.contains_key("to") {
                let from = args.read_named::<Point>("from")?;
                let to = args.read_named::<Point>("to")?;
                return Ok(Self::from_points(from, to));
            }
            if map.contains_key("point") || map.contains_key("size") {
                let point = args.read_named::<Point>("point")?;
                let size = args.read_named::<Size>("size")?;
                return Ok(Self::from_point_size(point, size));
            }
            if map.contains_key("x") || map.contains_key("width") {
                return Ok(Self::new(
                    fields::number(map, "x"),
                    fields::number(map, "y"),
                    fields::number(map, "width"),
                    fields::number(map, "height"),
                ));
            }
            return Err(ReadError::invalid_argument(
                "Rectangle",
                "property object carries no recognized rectangle fields",
            ));
        }
        match args.peek() {
            None => Ok(Self::ZERO),
            Some(Value::Number(_)) => {
                let x = args.read::<f64>()?;
                let y = args.read::<f64>()?;
                let width = args.read::<f64>()?;
                let height = args.read::<f64>()?;
                Ok(Self::new(x, y, width, height))
            }
            Some(Value::Seq(items)) if args.remaining() == 1 => {
                let mut nested = Args::new(items);
                let rectangle = Self::from_args(&mut nested)?;
                args.next_value();
                Ok(rectangle)
            }
            Some(Value::Null) => {
                args.next_value();
                Ok(Self::ZERO)
            }
            Some(slot) => {
                if let Some(rectangle) = Self::from_slot(slot) {
                    args.next_value();
                    return Ok(rectangle);
                }
                // A point first, then either a size or the opposite corner.
                let first = args.read::<Point>()?;
                match args.peek() {
                    Some(second) if second.downcast_ref::<Point>().is_some() => {
                        let to = args.read::<Point>()?;
                        Ok(Self::from_points(first, to))
                    }
                    Some(_) => {
                        let size = args.read::<Size>()?;
                        Ok(Self::from_point_size(first, size))
                    }
                    None => Ok(Self::from_point_size(first, Size::ZERO)),
                }
            }
        }
    }
}

impl ScriptObject for Rectangle {
    fn type_tag(&self) -> &'static str {
        "Rectangle"
    }

    fn to_compact(&self, ctx: &mut SerializeContext) -> CompactForm {
        CompactForm::Seq(vec![
            ctx.number(self.x),
            ctx.number(self.y),
            ctx.number(self.width),
            ctx.number(self.height),
        ])
    }

    fn equals_object(&self, other: &dyn ScriptObject) -> bool {
        other.downcast_ref::<Rectangle>() == Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(feature = "auto_register")]
inventory::submit! {
    sv_object::TagRegistration::new("Rectangle", sv_object::object_factory::<Rectangle>)
}
