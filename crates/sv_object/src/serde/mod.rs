//! The compact-form serialization protocol.
//!
//! This module primarily serves two purposes:
//!
//! 1. Turns live [`Value`](crate::value::Value) graphs into schema-less
//!    [`CompactForm`](crate::form::CompactForm) trees and back, restoring
//!    polymorphic types through the
//!    [`TypeRegistry`](crate::registry::TypeRegistry).
//! 2. Deduplicates objects reachable from several paths: one shared
//!    definition per identity, lightweight `["#id"]` reference markers
//!    everywhere else, and identity-preserving reconstruction.
//!
//! # Overview
//!
//! ## Serialization
//!
//! - [`SerializeOptions`]: numeric precision configuration
//!   (default 5 significant digits).
//! - [`SerializeContext`]: one serialization pass — walks the graph
//!   top-down, asks objects for their compact description, and owns the
//!   pass-scoped [`Dictionary`] of shared definitions.
//! - [`serialize`]: the top-level entry point; emits the
//!   `[["dictionary", {...}], payload]` envelope only when at least one
//!   shared definition was recorded.
//!
//! ## Deserialization
//!
//! - [`deserialize`]: the top-level entry point; installs the dictionary
//!   envelope (if present) into a pass-scoped session, then rebuilds the
//!   payload leaves-first, dispatching tagged sequences through the
//!   registry and resolving `["#id"]` markers to shared instances.
//!
//! Unknown tags stay plain sequences so newer streams keep loading;
//! a marker without a matching definition is a hard
//! [`DecodeError::MalformedReference`](crate::error::DecodeError).
//!
//! ## JSON boundary
//!
//! - [`export_json`] / [`import_json`]: `stringify(serialize(..))` and
//!   `deserialize(parse(..))` over `serde_json`.

// -----------------------------------------------------------------------------
// Modules

mod de;
mod json;
mod ser;

#[cfg(test)]
pub(crate) mod testing;

// -----------------------------------------------------------------------------
// Exports

pub use de::deserialize;
pub use json::{export_json, import_json};
pub use ser::{Dictionary, SerializeContext, SerializeOptions, serialize};
