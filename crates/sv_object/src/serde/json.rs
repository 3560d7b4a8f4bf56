use alloc::string::String;

use crate::error::DecodeError;
use crate::form::CompactForm;
use crate::registry::TypeRegistry;
use crate::serde::{SerializeOptions, deserialize, serialize};
use crate::value::Value;

/// Serializes a value graph to JSON text.
///
/// Equivalent to stringifying [`serialize`]'s compact form.
///
/// # Examples
///
/// ```
/// use sv_object::serde::{SerializeOptions, export_json};
/// use sv_object::value::Value;
///
/// let value = Value::Seq(vec![Value::from(1.0), Value::from("x")]);
/// assert_eq!(export_json(&value, SerializeOptions::new()), r#"[1,"x"]"#);
/// ```
pub fn export_json(value: &Value, options: SerializeOptions) -> String {
    let form = serialize(value, options);
    // Compact forms only contain string keys and JSON scalars.
    serde_json::to_string(&form).expect("compact forms are valid JSON trees")
}

/// Rebuilds a value graph from JSON text.
///
/// Equivalent to [`deserialize`] over the parsed compact form; parse
/// failures surface as [`DecodeError::Json`].
pub fn import_json(registry: &TypeRegistry, text: &str) -> Result<Value, DecodeError> {
    let form: CompactForm = serde_json::from_str(text).map_err(DecodeError::Json)?;
    deserialize(registry, &form)
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;

    use super::*;
    use crate::compare::equals;
    use crate::serde::testing::{Palette, Widget, test_registry};

    #[test]
    fn json_text_round_trip() {
        let registry = test_registry();
        let value = Value::Seq(vec![
            Value::object(Widget::new(3.0, 4.0)),
            Value::from(1.0 / 3.0),
        ]);

        let text = export_json(&value, SerializeOptions::new());
        assert_eq!(text, r#"[["Widget",3,4],0.33333]"#);

        let back = import_json(&registry, &text).unwrap();
        let expected = Value::Seq(vec![
            Value::object(Widget::new(3.0, 4.0)),
            Value::from(0.33333),
        ]);
        assert!(equals(&back, &expected));
    }

    #[test]
    fn exported_sharing_survives_text() {
        let registry = test_registry();
        let palette = Arc::new(Palette::new(0.125));
        let value = Value::Seq(vec![
            Value::Obj(palette.clone()),
            Value::Obj(palette.clone()),
        ]);

        let text = export_json(&value, SerializeOptions::new());
        assert!(text.contains("dictionary"));

        let back = import_json(&registry, &text).unwrap();
        match back.as_seq().unwrap() {
            [Value::Obj(a), Value::Obj(b)] => assert!(Arc::ptr_eq(a, b)),
            other => panic!("expected two object slots, got {other:?}"),
        }
    }

    #[test]
    fn invalid_json_reports_parse_error() {
        let registry = test_registry();
        assert!(matches!(
            import_json(&registry, "[1, 2"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn reserialization_is_idempotent() {
        let registry = test_registry();
        let options = SerializeOptions::new();
        let value = Value::from(1.0 / 3.0);

        let text = export_json(&value, options);
        let back = import_json(&registry, &text).unwrap();
        assert_eq!(export_json(&back, options), text);
    }
}
