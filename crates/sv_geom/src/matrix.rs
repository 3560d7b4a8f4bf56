//! An affine transformation matrix.

use alloc::vec;
use core::any::Any;

use sv_object::args::{Args, FromArgs};
use sv_object::error::ReadError;
use sv_object::form::CompactForm;
use sv_object::object::ScriptObject;
use sv_object::serde::SerializeContext;
use sv_object::value::Value;

use crate::point::Point;

/// An affine transformation in 2D space:
///
/// ```text
/// | x' |   | a  c  tx |   | x |
/// | y' | = | b  d  ty | * | y |
/// | 1  |   | 0  0  1  |   | 1 |
/// ```
///
/// Constructible from `()` (identity), six numbers `(a, b, c, d, tx,
/// ty)`, a flat `[a, b, c, d, tx, ty]` sequence, or an existing matrix.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Matrix {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Concatenates `other` after this transformation.
    pub fn append(self, other: Matrix) -> Matrix {
        Matrix::new(
            other.a * self.a + other.c * self.b,
            other.b * self.a + other.d * self.b,
            other.a * self.c + other.c * self.d,
            other.b * self.c + other.d * self.d,
            other.a * self.tx + other.c * self.ty + other.tx,
            other.b * self.tx + other.d * self.ty + other.ty,
        )
    }

    /// Adds a translation.
    pub fn translate(self, dx: f64, dy: f64) -> Matrix {
        self.append(Matrix::new(1.0, 0.0, 0.0, 1.0, dx, dy))
    }

    /// Adds a scaling around the origin.
    pub fn scale(self, sx: f64, sy: f64) -> Matrix {
        self.append(Matrix::new(sx, 0.0, 0.0, sy, 0.0, 0.0))
    }

    /// Adds a rotation by `angle` degrees around the origin.
    pub fn rotate(self, angle: f64) -> Matrix {
        let (sin, cos) = angle.to_radians().sin_cos();
        self.append(Matrix::new(cos, sin, -sin, cos, 0.0, 0.0))
    }

    /// Adds a shear.
    pub fn shear(self, shx: f64, shy: f64) -> Matrix {
        self.append(Matrix::new(1.0, shy, shx, 1.0, 0.0, 0.0))
    }

    /// Applies the transformation to a point.
    pub fn transform_point(self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }

    #[inline]
    pub fn determinant(self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// The inverse transformation, or `None` when singular.
    pub fn invert(self) -> Option<Matrix> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Matrix::new(
            self.d / det,
            -self.b / det,
            -self.c / det,
            self.a / det,
            (self.c * self.ty - self.d * self.tx) / det,
            (self.b * self.tx - self.a * self.ty) / det,
        ))
    }

    /// The translation component.
    #[inline]
    pub const fn translation(self) -> Point {
        Point::new(self.tx, self.ty)
    }

    /// The scaling component per axis.
    pub fn scaling(self) -> Point {
        Point::new(
            (self.a * self.a + self.b * self.b).sqrt(),
            (self.c * self.c + self.d * self.d).sqrt(),
        )
    }

    /// The rotation component in degrees.
    pub fn rotation(self) -> f64 {
        self.b.atan2(self.a).to_degrees()
    }
}

// -----------------------------------------------------------------------------
// Protocol

impl FromArgs for Matrix {
    fn from_slot(value: &Value) -> Option<Self> {
        value.downcast_ref::<Matrix>().copied()
    }

    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
        match args.peek() {
            None => Ok(Self::IDENTITY),
            Some(Value::Number(_)) => {
                let a = args.read::<f64>()?;
                let b = args.read::<f64>()?;
                let c = args.read::<f64>()?;
                let d = args.read::<f64>()?;
                let tx = args.read::<f64>()?;
                let ty = args.read::<f64>()?;
                Ok(Self::new(a, b, c, d, tx, ty))
            }
            Some(Value::Seq(items)) => {
                let mut nested = Args::new(items);
                let matrix = Self::from_args(&mut nested)?;
                args.next_value();
                Ok(matrix)
            }
            Some(Value::Null) => {
                args.next_value();
                Ok(Self::IDENTITY)
            }
            Some(slot) => match Self::from_slot(slot) {
                Some(matrix) => {
                    args.next_value();
                    Ok(matrix)
                }
                None => Err(ReadError::invalid_argument(
                    "Matrix",
                    "expected six numbers, a sequence, or a matrix",
                )),
            },
        }
    }
}

impl ScriptObject for Matrix {
    fn type_tag(&self) -> &'static str {
        "Matrix"
    }

    fn to_compact(&self, ctx: &mut SerializeContext) -> CompactForm {
        CompactForm::Seq(vec![
            ctx.number(self.a),
            ctx.number(self.b),
            ctx.number(self.c),
            ctx.number(self.d),
            ctx.number(self.tx),
            ctx.number(self.ty),
        ])
    }

    fn equals_object(&self, other: &dyn ScriptObject) -> bool {
        other.downcast_ref::<Matrix>() == Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(feature = "auto_register")]
inventory::submit! {
    sv_object::TagRegistration::new("Matrix", sv_object::object_factory::<Matrix>)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_is_identity() {
        assert_eq!(Args::new(&[]).read::<Matrix>().unwrap(), Matrix::IDENTITY);
        assert!(Matrix::IDENTITY.is_identity());
    }

    #[test]
    fn six_numbers() {
        let list = [
            Value::from(1.0),
            Value::from(2.0),
            Value::from(3.0),
            Value::from(4.0),
            Value::from(5.0),
            Value::from(6.0),
        ];
        let mut args = Args::new(&list);
        let matrix = args.read::<Matrix>().unwrap();
        assert_eq!(matrix, Matrix::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
        assert_eq!(args.consumed(), 6);
    }

    #[test]
    fn translate_then_transform() {
        let matrix = Matrix::IDENTITY.translate(2.0, 3.0);
        assert_eq!(
            matrix.transform_point(Point::new(1.0, 1.0)),
            Point::new(3.0, 4.0)
        );
    }

    #[test]
    fn scale_composes() {
        // Scales first, then translates.
        let matrix = Matrix::IDENTITY.scale(2.0, 3.0).translate(1.0, 1.0);
        assert_eq!(
            matrix.transform_point(Point::new(1.0, 1.0)),
            Point::new(3.0, 4.0)
        );
    }

    #[test]
    fn invert_round_trips() {
        let matrix = Matrix::IDENTITY
            .translate(5.0, -3.0)
            .rotate(30.0)
            .scale(2.0, 0.5);
        let inverse = matrix.invert().unwrap();
        let point = Point::new(7.0, 11.0);
        let back = inverse.transform_point(matrix.transform_point(point));
        assert!((back.x - point.x).abs() < 1e-9);
        assert!((back.y - point.y).abs() < 1e-9);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Matrix::new(0.0, 0.0, 0.0, 0.0, 1.0, 1.0).invert().is_none());
    }

    #[test]
    fn decomposition() {
        let matrix = Matrix::IDENTITY.rotate(90.0).scale(2.0, 2.0);
        assert!((matrix.rotation() - 90.0).abs() < 1e-9);
        let scaling = matrix.scaling();
        assert!((scaling.x - 2.0).abs() < 1e-9);
        assert!((scaling.y - 2.0).abs() < 1e-9);
    }
}
