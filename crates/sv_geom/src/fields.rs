//! Property-object field access shared by the constructors.

use sv_object::value::{Map, Value};

/// A numeric field, `0.0` when absent or non-numeric.
#[inline]
pub(crate) fn number(map: &Map, key: &str) -> f64 {
    map.get(key).and_then(Value::as_number).unwrap_or(0.0)
}

/// A numeric field with an explicit fallback.
#[inline]
pub(crate) fn number_or(map: &Map, key: &str, default: f64) -> f64 {
    map.get(key).and_then(Value::as_number).unwrap_or(default)
}
