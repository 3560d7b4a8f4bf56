#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod color;
mod fields;
mod gradient;
mod matrix;
mod point;
mod rectangle;
mod register;
mod size;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use color::Color;
pub use gradient::{Gradient, GradientStop};
pub use matrix::Matrix;
pub use point::Point;
pub use rectangle::Rectangle;
pub use register::{register_default_types, registry_with_default_types};
pub use size::Size;
