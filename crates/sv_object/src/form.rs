use alloc::borrow::ToOwned;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

// -----------------------------------------------------------------------------
// CompactForm

/// Definitions map used inside compact forms, ordered by key.
pub type FormMap = BTreeMap<String, CompactForm>;

/// The serialized, schema-less representation of one value.
///
/// A compact form is a plain JSON-compatible tree. Three sequence shapes
/// carry extra meaning by convention:
///
/// - a sequence whose first element is a registered type tag denotes a
///   typed node, `[tag, arg1, arg2, ...]`;
/// - a one-element sequence `["#<uid>"]` is a reference marker into the
///   shared-definition dictionary;
/// - a top-level `[["dictionary", {"#<uid>": form, ...}], payload]` pair
///   carries the dictionary itself.
///
/// Everything else — scalars, untagged sequences, and maps — represents
/// itself. The type implements serde `Serialize`/`Deserialize`, so any
/// self-describing format can carry it; the JSON boundary lives in
/// [`export_json`](crate::serde::export_json) and
/// [`import_json`](crate::serde::import_json).
#[derive(Clone, Debug, PartialEq)]
pub enum CompactForm {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Seq(Vec<CompactForm>),
    Map(FormMap),
}

/// Integral numbers up to this bound are emitted as JSON integers.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl CompactForm {
    /// Whether this form is a dictionary reference marker, `["#<uid>"]`.
    pub fn is_reference_marker(&self) -> bool {
        self.reference_key().is_some()
    }

    /// The reference key of a marker form, or `None`.
    pub fn reference_key(&self) -> Option<&str> {
        match self {
            Self::Seq(items) => match items.as_slice() {
                [Self::Str(key)] if key.starts_with('#') => Some(key),
                _ => None,
            },
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
    pub fn as_seq(&self) -> Option<&[CompactForm]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&FormMap> {
        match self {
            Self::Map(map) => Some(map),
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
}

impl From<bool> for CompactForm {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for CompactForm {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CompactForm {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for CompactForm {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<CompactForm>> for CompactForm {
    #[inline]
    fn from(value: Vec<CompactForm>) -> Self {
        Self::Seq(value)
    }
}

// -----------------------------------------------------------------------------
// Serde integration

impl Serialize for CompactForm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => {
                // Integral values stay integers on the wire.
                if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Self::Str(s) => serializer.serialize_str(s),
            Self::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for CompactForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FormVisitor;

        impl<'de> Visitor<'de> for FormVisitor {
            type Value = CompactForm;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON-compatible value")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(CompactForm::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(CompactForm::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(CompactForm::Number(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(CompactForm::Number(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(CompactForm::Str(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(CompactForm::Str(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(CompactForm::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(CompactForm::Null)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
                Deserialize::deserialize(d)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(CompactForm::Seq(items))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut out = FormMap::new();
                while let Some((key, value)) = map.next_entry::<String, CompactForm>()? {
                    out.insert(key, value);
                }
                Ok(CompactForm::Map(out))
            }
        }

        deserializer.deserialize_any(FormVisitor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn reference_marker_shape() {
        let marker = CompactForm::Seq(vec![CompactForm::from("#7")]);
        assert!(marker.is_reference_marker());
        assert_eq!(marker.reference_key(), Some("#7"));

        let tagged = CompactForm::Seq(vec![CompactForm::from("Point"), CompactForm::from(3.0)]);
        assert!(!tagged.is_reference_marker());

        let long = CompactForm::Seq(vec![CompactForm::from("#7"), CompactForm::from(1.0)]);
        assert!(!long.is_reference_marker());
    }

    #[test]
    fn integral_numbers_emit_as_integers() {
        let text = serde_json::to_string(&CompactForm::Number(2.0)).unwrap();
        assert_eq!(text, "2");
        let text = serde_json::to_string(&CompactForm::Number(2.5)).unwrap();
        assert_eq!(text, "2.5");
    }

    #[test]
    fn json_round_trip() {
        let form = CompactForm::Seq(vec![
            CompactForm::from("Point"),
            CompactForm::from(1.5),
            CompactForm::Null,
            CompactForm::from(true),
        ]);
        let text = serde_json::to_string(&form).unwrap();
        assert_eq!(text, r#"["Point",1.5,null,true]"#);
        let back: CompactForm = serde_json::from_str(&text).unwrap();
        assert_eq!(back, form);
    }

    #[test]
    fn map_keys_stay_ordered() {
        let mut map = FormMap::new();
        map.insert("b".into(), CompactForm::from(2.0));
        map.insert("a".into(), CompactForm::from(1.0));
        let text = serde_json::to_string(&CompactForm::Map(map)).unwrap();
        assert_eq!(text, r#"{"a":1,"b":2}"#);
    }
}
