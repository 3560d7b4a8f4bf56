use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::object::ScriptObject;

// -----------------------------------------------------------------------------
// Value

/// A plain property map, ordered by key.
///
/// Plain maps (as opposed to [`Value::Obj`] instances) carry no type tag
/// and serialize key-wise; the ordering keeps emitted JSON deterministic.
pub type Map = BTreeMap<String, Value>;

/// A dynamic value as the scripting surface sees it.
///
/// `Value` is the argument and result currency of the whole object
/// infrastructure: constructor argument lists are `&[Value]`, the
/// deserializer produces a `Value`, and the serializer consumes one.
///
/// Object identity is `Arc` identity: cloning a `Value::Obj` clones the
/// handle, not the object, so a graph can reach the same instance from
/// several paths and serialization will preserve that sharing.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(Map),
    Obj(Arc<dyn ScriptObject>),
}

impl Value {
    /// Wraps a concrete object into a shared handle.
    #[inline]
    pub fn object(object: impl ScriptObject) -> Self {
        Self::Obj(Arc::new(object))
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&dyn ScriptObject> {
        match self {
            Self::Obj(obj) => Some(&**obj),
            _ => None,
        }
    }

    /// Borrows the slot as a concrete object type, if it holds one.
    #[inline]
    pub fn downcast_ref<T: ScriptObject>(&self) -> Option<&T> {
        self.as_object()?.downcast_ref::<T>()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => fmt::Debug::fmt(b, f),
            Self::Number(n) => fmt::Debug::fmt(n, f),
            Self::Str(s) => fmt::Debug::fmt(s, f),
            Self::Seq(items) => f.debug_list().entries(items).finish(),
            Self::Map(map) => f.debug_map().entries(map).finish(),
            Self::Obj(obj) => fmt::Debug::fmt(obj, f),
        }
    }
}

/// Structural equality, see [`equals`](crate::compare::equals).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::compare::equals(self, other)
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(value: u32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::Seq(value)
    }
}

impl From<Map> for Value {
    #[inline]
    fn from(value: Map) -> Self {
        Self::Map(value)
    }
}

impl From<Arc<dyn ScriptObject>> for Value {
    #[inline]
    fn from(value: Arc<dyn ScriptObject>) -> Self {
        Self::Obj(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

// -----------------------------------------------------------------------------
// Map merging

/// Merges the given property maps into a new one, later maps winning on
/// key collisions.
///
/// # Examples
///
/// ```
/// use sv_object::value::{Map, Value, merge};
///
/// let mut a = Map::new();
/// a.insert("x".into(), Value::from(1.0));
/// let mut b = Map::new();
/// b.insert("x".into(), Value::from(2.0));
/// b.insert("y".into(), Value::from(3.0));
///
/// let merged = merge([a, b]);
/// assert_eq!(merged.get("x"), Some(&Value::from(2.0)));
/// assert_eq!(merged.get("y"), Some(&Value::from(3.0)));
/// ```
pub fn merge<I: IntoIterator<Item = Map>>(maps: I) -> Map {
    let mut out = Map::new();
    for map in maps {
        out.extend(map);
    }
    out
}
