use alloc::sync::Arc;

use crate::args::Args;
use crate::error::ReadError;
use crate::registry::TypeRegistry;
use crate::value::Value;

// -----------------------------------------------------------------------------
// equals

/// Structural deep equality over dynamic values.
///
/// Identity shortcuts run first (`Arc` pointer equality for objects,
/// scalar `==`); objects then delegate to their own
/// [`equals_object`](crate::object::ScriptObject::equals_object)
/// capability; sequences require equal length and pairwise equality; maps
/// require the same key set and pairwise-equal values. Everything else
/// compares unequal.
///
/// # Examples
///
/// ```
/// use sv_object::compare::equals;
/// use sv_object::value::{Map, Value};
///
/// let a = Value::Seq(vec![
///     Value::from(1.0),
///     Value::Seq(vec![Value::from(2.0), Value::from(3.0)]),
/// ]);
/// let b = Value::Seq(vec![
///     Value::from(1.0),
///     Value::Seq(vec![Value::from(2.0), Value::from(3.0)]),
/// ]);
/// assert!(equals(&a, &b));
///
/// let mut small = Map::new();
/// small.insert("a".into(), Value::from(1.0));
/// let mut large = small.clone();
/// large.insert("b".into(), Value::from(2.0));
/// assert!(!equals(&Value::Map(small), &Value::Map(large)));
/// ```
pub fn equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Obj(x), Value::Obj(y)) => {
            Arc::ptr_eq(x, y) || x.equals_object(&**y)
        }
        (Value::Seq(x), Value::Seq(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| equals(a, b))
        }
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x.iter().all(|(key, a)| match y.get(key) {
                    Some(b) => equals(a, b),
                    None => false,
                })
        }
        _ => false,
    }
}

// -----------------------------------------------------------------------------
// clone_value

/// Clones a dynamic value.
///
/// Scalars and containers clone structurally. Objects are rebuilt by
/// handing the existing instance to their registered canonical
/// constructor as the sole argument — the copy overload every
/// constructible type supports — so the result is a fresh instance, not
/// a shared handle.
///
/// An object whose tag has no registry entry reports
/// [`ReadError::UnknownType`].
pub fn clone_value(value: &Value, registry: &TypeRegistry) -> Result<Value, ReadError> {
    match value {
        Value::Obj(obj) => {
            let tag = obj.type_tag();
            let factory = registry
                .resolve(tag)
                .ok_or(ReadError::UnknownType { tag: tag.into() })?;
            let list = [value.clone()];
            let mut args = Args::new(&list);
            Ok(Value::Obj(factory(&mut args)?))
        }
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::value::Map;

    #[test]
    fn scalar_equality() {
        assert!(equals(&Value::Null, &Value::Null));
        assert!(equals(&Value::from(1.5), &Value::from(1.5)));
        assert!(!equals(&Value::from(1.5), &Value::from(2.5)));
        assert!(!equals(&Value::from(1.0), &Value::from("1")));
    }

    #[test]
    fn nested_sequence_equality() {
        let a = Value::Seq(vec![
            Value::from(1.0),
            Value::Seq(vec![Value::from(2.0), Value::from(3.0)]),
        ]);
        let b = Value::Seq(vec![
            Value::from(1.0),
            Value::Seq(vec![Value::from(2.0), Value::from(3.0)]),
        ]);
        assert!(equals(&a, &b));
    }

    #[test]
    fn map_key_sets_must_match() {
        let mut small = Map::new();
        small.insert("a".into(), Value::from(1.0));
        let mut large = small.clone();
        large.insert("b".into(), Value::from(2.0));
        assert!(!equals(&Value::Map(small.clone()), &Value::Map(large)));
        assert!(equals(&Value::Map(small.clone()), &Value::Map(small)));
    }

    #[test]
    fn length_mismatch_is_unequal() {
        let a = Value::Seq(vec![Value::from(1.0)]);
        let b = Value::Seq(vec![Value::from(1.0), Value::from(2.0)]);
        assert!(!equals(&a, &b));
    }

    #[test]
    fn clone_of_containers_is_structural() {
        let registry = TypeRegistry::new();
        let original = Value::Seq(vec![Value::from(1.0), Value::from("x")]);
        let cloned = clone_value(&original, &registry).unwrap();
        assert!(equals(&original, &cloned));
    }
}
