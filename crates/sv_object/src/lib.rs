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

pub mod args;
pub mod compare;
pub mod error;
pub mod form;
pub mod object;
pub mod registry;
pub mod serde;
pub mod uid;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use args::{Args, FromArgs};
pub use error::{DecodeError, ReadError};
pub use form::CompactForm;
pub use object::ScriptObject;
pub use registry::{Factory, TagRegistration, TypeRegistry, object_factory};
pub use serde::{SerializeOptions, deserialize, export_json, import_json, serialize};
pub use uid::{Uid, UidSource};
pub use value::Value;
