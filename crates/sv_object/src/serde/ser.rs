use alloc::vec;

use crate::form::{CompactForm, FormMap};
use crate::uid::Uid;
use crate::value::Value;

// -----------------------------------------------------------------------------
// SerializeOptions

/// Options governing one serialization pass.
#[derive(Copy, Clone, Debug)]
pub struct SerializeOptions {
    /// Significant digits kept when emitting numbers.
    pub precision: u32,
}

impl Default for SerializeOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SerializeOptions {
    /// The default options: 5 significant digits.
    #[inline]
    pub const fn new() -> Self {
        Self { precision: 5 }
    }

    /// Options with the given significant-digit precision.
    #[inline]
    pub const fn with_precision(precision: u32) -> Self {
        Self { precision }
    }

    /// Rounds `value` to this precision.
    ///
    /// Rounding is a fixpoint: re-rounding an already rounded value at
    /// the same precision changes nothing, so re-serializing emitted
    /// output is idempotent.
    pub fn round(&self, value: f64) -> f64 {
        if value == 0.0 || !value.is_finite() {
            return value;
        }
        let magnitude = value.abs().log10().floor() as i32;
        let digits = self.precision as i32 - 1 - magnitude;
        let scale = 10f64.powi(digits);
        (value * scale).round() / scale
    }
}

// -----------------------------------------------------------------------------
// Dictionary

/// The pass-scoped store of shared-object definitions.
///
/// Keys are `"#<uid>"` reference keys; each identity is defined at most
/// once per pass, however many paths reach it. The dictionary lives for
/// exactly one top-level [`serialize`] call and is discarded after the
/// envelope is emitted.
#[derive(Default, Debug)]
pub struct Dictionary {
    definitions: FormMap,
}

impl Dictionary {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any shared definition was recorded this pass.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// The number of recorded definitions.
    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// The recorded definitions, keyed by `"#<uid>"`.
    #[inline]
    pub fn definitions(&self) -> &FormMap {
        &self.definitions
    }
}

// -----------------------------------------------------------------------------
// SerializeContext

/// One serialization pass: the options plus the shared [`Dictionary`].
///
/// Objects receive the context in
/// [`ScriptObject::to_compact`](crate::object::ScriptObject::to_compact)
/// and use it to serialize children ([`serialize_value`]), format numbers
/// ([`number`]), and register shared definitions ([`add`]).
///
/// Contexts must not be shared across concurrent passes; every top-level
/// [`serialize`] call constructs its own.
///
/// [`serialize_value`]: Self::serialize_value
/// [`number`]: Self::number
/// [`add`]: Self::add
pub struct SerializeContext {
    options: SerializeOptions,
    dictionary: Dictionary,
}

impl SerializeContext {
    /// Creates a fresh pass with an empty dictionary.
    pub fn new(options: SerializeOptions) -> Self {
        Self {
            options,
            dictionary: Dictionary::new(),
        }
    }

    /// The options of this pass.
    #[inline]
    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// The dictionary recorded so far.
    #[inline]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Formats a number at this pass's precision.
    #[inline]
    pub fn number(&self, value: f64) -> CompactForm {
        CompactForm::Number(self.options.round(value))
    }

    /// Registers a shared definition and returns its reference marker.
    ///
    /// The first call for a given uid runs `create` to produce the
    /// definition; every call, first or repeat, returns the one-element
    /// marker `["#<uid>"]`. The key is reserved before `create` runs, so
    /// a cycle that re-enters through this identity terminates with a
    /// marker instead of recursing.
    pub fn add(
        &mut self,
        uid: Uid,
        create: impl FnOnce(&mut Self) -> CompactForm,
    ) -> CompactForm {
        let key = uid.reference_key();
        if !self.dictionary.definitions.contains_key(&key) {
            self.dictionary
                .definitions
                .insert(key.clone(), CompactForm::Null);
            let definition = create(self);
            self.dictionary.definitions.insert(key.clone(), definition);
        }
        CompactForm::Seq(vec![CompactForm::Str(key)])
    }

    /// Serializes one value within this pass.
    ///
    /// With `compact` set the type tag is left implicit — the form for
    /// nested positions whose expected type is known from context.
    pub fn serialize_value(&mut self, value: &Value, compact: bool) -> CompactForm {
        match value {
            Value::Null => CompactForm::Null,
            Value::Bool(b) => CompactForm::Bool(*b),
            Value::Number(n) => self.number(*n),
            Value::Str(s) => CompactForm::Str(s.clone()),
            Value::Seq(items) => CompactForm::Seq(
                items
                    .iter()
                    .map(|item| self.serialize_value(item, compact))
                    .collect(),
            ),
            Value::Map(map) => CompactForm::Map(
                map.iter()
                    .map(|(key, item)| (key.clone(), self.serialize_value(item, compact)))
                    .collect(),
            ),
            Value::Obj(obj) => {
                let form = obj.to_compact(self);
                // Reference markers resolve through the dictionary, which
                // holds the tagged definition; never prefix them.
                if compact || form.is_reference_marker() {
                    return form;
                }
                let tag = obj.type_tag();
                match form {
                    CompactForm::Seq(mut items) => {
                        let tagged =
                            matches!(items.first(), Some(CompactForm::Str(s)) if s.as_str() == tag);
                        if !tagged {
                            items.insert(0, CompactForm::Str(tag.into()));
                        }
                        CompactForm::Seq(items)
                    }
                    other => CompactForm::Seq(vec![CompactForm::Str(tag.into()), other]),
                }
            }
        }
    }

    fn finish(self, payload: CompactForm) -> CompactForm {
        if self.dictionary.is_empty() {
            return payload;
        }
        CompactForm::Seq(vec![
            CompactForm::Seq(vec![
                CompactForm::Str("dictionary".into()),
                CompactForm::Map(self.dictionary.definitions),
            ]),
            payload,
        ])
    }
}

// -----------------------------------------------------------------------------
// serialize

/// Serializes a value graph into its compact form.
///
/// If any shared definitions were recorded, the result is wrapped as
/// `[["dictionary", definitions], payload]`; otherwise the payload is
/// returned bare, keeping the envelope invisible for graphs without
/// sharing.
///
/// # Examples
///
/// ```
/// use sv_object::serde::{SerializeOptions, serialize};
/// use sv_object::value::Value;
///
/// let value = Value::Seq(vec![Value::from(1.0 / 3.0), Value::from("x")]);
/// let form = serialize(&value, SerializeOptions::new());
/// let seq = form.as_seq().unwrap();
/// assert_eq!(seq[0].as_number(), Some(0.33333));
/// ```
pub fn serialize(value: &Value, options: SerializeOptions) -> CompactForm {
    let mut ctx = SerializeContext::new(options);
    let payload = ctx.serialize_value(value, false);
    ctx.finish(payload)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::serde::testing::{Palette, Widget};

    #[test]
    fn scalars_pass_through() {
        let options = SerializeOptions::new();
        assert_eq!(serialize(&Value::Null, options), CompactForm::Null);
        assert_eq!(
            serialize(&Value::from(true), options),
            CompactForm::Bool(true)
        );
        assert_eq!(
            serialize(&Value::from("hi"), options),
            CompactForm::from("hi")
        );
    }

    #[test]
    fn numbers_round_to_significant_digits() {
        let options = SerializeOptions::new();
        let form = serialize(&Value::from(1.0 / 3.0), options);
        assert_eq!(form.as_number(), Some(0.33333));

        // Idempotent at the same precision.
        let again = serialize(&Value::from(0.33333), options);
        assert_eq!(again.as_number(), Some(0.33333));

        // Precision counts significant digits, not decimals.
        let form = serialize(&Value::from(123456.789), options);
        assert_eq!(form.as_number(), Some(123460.0));
    }

    #[test]
    fn precision_is_configurable() {
        let form = serialize(&Value::from(1.0 / 3.0), SerializeOptions::with_precision(2));
        assert_eq!(form.as_number(), Some(0.33));
    }

    #[test]
    fn objects_get_tag_prefixed() {
        let value = Value::object(Widget::new(3.0, 4.0));
        let form = serialize(&value, SerializeOptions::new());
        assert_eq!(
            form,
            CompactForm::Seq(vec![
                CompactForm::from("Widget"),
                CompactForm::from(3.0),
                CompactForm::from(4.0),
            ])
        );
    }

    #[test]
    fn no_sharing_means_no_envelope() {
        let value = Value::Seq(vec![Value::object(Widget::new(1.0, 2.0))]);
        let form = serialize(&value, SerializeOptions::new());
        // The result is the bare payload, not a dictionary wrapper.
        assert!(form.as_seq().unwrap()[0].as_seq().unwrap()[0].as_str() == Some("Widget"));
    }

    #[test]
    fn shared_objects_serialize_once() {
        let palette = alloc::sync::Arc::new(Palette::new(0.25));
        let value = Value::Seq(vec![
            Value::Obj(palette.clone()),
            Value::Obj(palette.clone()),
        ]);
        let form = serialize(&value, SerializeOptions::new());

        let top = form.as_seq().unwrap();
        assert_eq!(top.len(), 2);
        let envelope = top[0].as_seq().unwrap();
        assert_eq!(envelope[0].as_str(), Some("dictionary"));
        let definitions = envelope[1].as_map().unwrap();
        assert_eq!(definitions.len(), 1);

        let payload = top[1].as_seq().unwrap();
        let key = palette.uid_key();
        for marker in payload {
            assert_eq!(marker.reference_key(), Some(key.as_str()));
        }
    }

    #[test]
    fn markers_are_not_tag_prefixed() {
        let palette = alloc::sync::Arc::new(Palette::new(0.5));
        let value = Value::Seq(vec![Value::Obj(palette.clone()), Value::Obj(palette)]);
        let form = serialize(&value, SerializeOptions::new());
        let payload = form.as_seq().unwrap()[1].clone();
        for marker in payload.as_seq().unwrap() {
            assert!(marker.is_reference_marker());
        }
    }
}
