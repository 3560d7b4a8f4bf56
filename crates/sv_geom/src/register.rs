//! Start-up registration of the object model.

use sv_object::registry::{TypeRegistry, object_factory};

use crate::color::Color;
use crate::gradient::{Gradient, GradientStop};
use crate::matrix::Matrix;
use crate::point::Point;
use crate::rectangle::Rectangle;
use crate::size::Size;

/// Registers every type of this crate into `registry`.
///
/// Equivalent to what [`TypeRegistry::auto_register`] collects when the
/// `auto_register` feature is enabled; explicit registration works on
/// every platform and makes the start-up set visible in one place.
pub fn register_default_types(registry: &mut TypeRegistry) {
    registry.register("Point", object_factory::<Point>);
    registry.register("Size", object_factory::<Size>);
    registry.register("Rectangle", object_factory::<Rectangle>);
    registry.register("Matrix", object_factory::<Matrix>);
    registry.register("Color", object_factory::<Color>);
    registry.register("GradientStop", object_factory::<GradientStop>);
    registry.register("Gradient", object_factory::<Gradient>);
}

/// A fresh registry with the whole object model registered.
///
/// # Examples
///
/// ```
/// use sv_geom::{Point, registry_with_default_types};
/// use sv_object::serde::{SerializeOptions, export_json, import_json};
/// use sv_object::value::Value;
///
/// let registry = registry_with_default_types();
/// let value = Value::object(Point::new(3.0, 4.0));
///
/// let text = export_json(&value, SerializeOptions::new());
/// assert_eq!(text, r#"["Point",3,4]"#);
///
/// let back = import_json(&registry, &text).unwrap();
/// assert_eq!(back.downcast_ref::<Point>(), Some(&Point::new(3.0, 4.0)));
/// ```
pub fn registry_with_default_types() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    register_default_types(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;

    use sv_object::compare::{clone_value, equals};
    use sv_object::form::CompactForm;
    use sv_object::serde::{
        SerializeOptions, deserialize, export_json, import_json, serialize,
    };
    use sv_object::value::{Map, Value};

    use super::*;

    fn sample_graph() -> Value {
        let mut style = Map::new();
        style.insert("fill".into(), Value::object(Color::rgb(1.0, 0.0, 0.0)));
        style.insert("weight".into(), Value::from(1.5));
        Value::Seq(vec![
            Value::object(Point::new(10.0, 20.0)),
            Value::object(Rectangle::new(0.0, 0.0, 100.0, 50.0)),
            Value::object(Matrix::IDENTITY.translate(5.0, 5.0)),
            Value::Map(style),
            Value::from("caption"),
            Value::Null,
        ])
    }

    #[test]
    fn object_model_round_trips() {
        let registry = registry_with_default_types();
        let value = sample_graph();
        let form = serialize(&value, SerializeOptions::new());
        let back = deserialize(&registry, &form).unwrap();
        assert!(equals(&value, &back));
    }

    #[test]
    fn object_model_round_trips_through_json() {
        let registry = registry_with_default_types();
        let value = sample_graph();
        let text = export_json(&value, SerializeOptions::new());
        let back = import_json(&registry, &text).unwrap();
        assert!(equals(&value, &back));
    }

    #[test]
    fn shared_gradient_serializes_once() {
        let registry = registry_with_default_types();
        let gradient: Arc<Gradient> = Arc::new(Gradient::between(Color::BLACK, Color::WHITE));
        let value = Value::Seq(vec![
            Value::Obj(gradient.clone()),
            Value::Obj(gradient.clone()),
            Value::Obj(gradient.clone()),
        ]);

        let form = serialize(&value, SerializeOptions::new());
        let top = form.as_seq().unwrap();
        let envelope = top[0].as_seq().unwrap();
        assert_eq!(envelope[0].as_str(), Some("dictionary"));
        assert_eq!(envelope[1].as_map().unwrap().len(), 1);

        let back = deserialize(&registry, &form).unwrap();
        let slots = back.as_seq().unwrap();
        match (&slots[0], &slots[1], &slots[2]) {
            (Value::Obj(a), Value::Obj(b), Value::Obj(c)) => {
                assert!(Arc::ptr_eq(a, b));
                assert!(Arc::ptr_eq(b, c));
                let rebuilt = a.downcast_ref::<Gradient>().unwrap();
                assert_eq!(rebuilt.stops().len(), 2);
            }
            other => panic!("expected three object slots, got {other:?}"),
        }
    }

    #[test]
    fn gradient_free_graph_has_no_envelope() {
        let value = Value::Seq(vec![Value::object(Point::new(1.0, 2.0))]);
        let form = serialize(&value, SerializeOptions::new());
        let text = export_json(&value, SerializeOptions::new());
        assert!(!text.contains("dictionary"));
        assert_eq!(form.as_seq().unwrap().len(), 1);
    }

    #[test]
    fn unknown_tag_survives_next_to_known_ones() {
        let registry = registry_with_default_types();
        let form = CompactForm::Seq(vec![
            CompactForm::Seq(vec![
                CompactForm::from("Point"),
                CompactForm::from(1.0),
                CompactForm::from(2.0),
            ]),
            CompactForm::Seq(vec![
                CompactForm::from("Starburst"),
                CompactForm::from(3.0),
            ]),
        ]);
        let back = deserialize(&registry, &form).unwrap();
        let slots = back.as_seq().unwrap();
        assert!(slots[0].downcast_ref::<Point>().is_some());
        let kept = slots[1].as_seq().unwrap();
        assert_eq!(kept[0].as_str(), Some("Starburst"));
    }

    #[test]
    fn clone_rebuilds_through_the_constructor() {
        let registry = registry_with_default_types();
        let value = Value::object(Point::new(3.0, 4.0));
        let cloned = clone_value(&value, &registry).unwrap();
        assert!(equals(&value, &cloned));
        // A rebuilt instance, not the same handle.
        match (&value, &cloned) {
            (Value::Obj(a), Value::Obj(b)) => assert!(!Arc::ptr_eq(a, b)),
            other => panic!("expected object slots, got {other:?}"),
        }
    }

    #[test]
    fn numbers_round_trip_at_export_precision() {
        let registry = registry_with_default_types();
        let value = Value::object(Point::new(1.0 / 3.0, 2.0 / 3.0));
        let text = export_json(&value, SerializeOptions::new());
        assert_eq!(text, r#"["Point",0.33333,0.66667]"#);

        let back = import_json(&registry, &text).unwrap();
        assert_eq!(export_json(&back, SerializeOptions::new()), text);
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_registration_matches_explicit_registration() {
        let mut auto = TypeRegistry::new();
        assert!(auto.auto_register() >= 7);

        let explicit = registry_with_default_types();
        for (tag, _) in explicit.iter() {
            assert!(auto.contains(tag), "missing auto registration for {tag}");
        }
    }
}
