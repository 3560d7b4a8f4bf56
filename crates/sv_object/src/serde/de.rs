use alloc::string::String;
use alloc::vec::Vec;

use sv_utils::HashMap;

use crate::args::Args;
use crate::error::DecodeError;
use crate::form::{CompactForm, FormMap};
use crate::registry::TypeRegistry;
use crate::value::{Map, Value};

// -----------------------------------------------------------------------------
// DecodeSession

/// One deserialization pass: the registry plus the recovered dictionary.
///
/// The session is scoped to exactly one top-level [`deserialize`] call.
/// Its table maps `"#<uid>"` keys to the rebuilt shared instances; every
/// reference marker found later in the tree resolves to an `Arc` clone of
/// the same instance, preserving identity.
struct DecodeSession<'r> {
    registry: &'r TypeRegistry,
    dictionary: HashMap<String, Value>,
    has_dictionary: bool,
}

impl<'r> DecodeSession<'r> {
    fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            dictionary: HashMap::default(),
            has_dictionary: false,
        }
    }

    /// Decodes the dictionary definitions, deferring entries whose
    /// references are not resolvable yet.
    ///
    /// Emission order is first-encounter order, so a definition may
    /// reference another that appears later; the deferral loop makes
    /// resolution order-independent. A full round without progress means
    /// an unresolvable (cyclic or dangling) reference and fails hard.
    fn install_dictionary(&mut self, definitions: &FormMap) -> Result<(), DecodeError> {
        self.has_dictionary = true;
        let mut pending: Vec<(&String, &CompactForm)> = definitions.iter().collect();
        while !pending.is_empty() {
            let round = core::mem::take(&mut pending);
            let before = round.len();
            for (key, form) in round {
                match self.decode(form) {
                    Ok(value) => {
                        self.dictionary.insert(key.clone(), value);
                    }
                    Err(DecodeError::MalformedReference { .. }) => pending.push((key, form)),
                    Err(err) => return Err(err),
                }
            }
            if pending.len() == before {
                return Err(DecodeError::MalformedReference {
                    key: pending[0].0.clone(),
                });
            }
        }
        Ok(())
    }

    fn decode(&mut self, form: &CompactForm) -> Result<Value, DecodeError> {
        match form {
            CompactForm::Null => Ok(Value::Null),
            CompactForm::Bool(b) => Ok(Value::Bool(*b)),
            CompactForm::Number(n) => Ok(Value::Number(*n)),
            CompactForm::Str(s) => Ok(Value::Str(s.clone())),
            CompactForm::Map(map) => {
                let mut out = Map::new();
                for (key, item) in map {
                    out.insert(key.clone(), self.decode(item)?);
                }
                Ok(Value::Map(out))
            }
            CompactForm::Seq(items) => self.decode_seq(items),
        }
    }

    fn decode_seq(&mut self, items: &[CompactForm]) -> Result<Value, DecodeError> {
        if let Some(CompactForm::Str(head)) = items.first() {
            // A one-element `["#id"]` sequence is a reference marker —
            // the only path by which shared identity is restored.
            if self.has_dictionary && items.len() == 1 && head.starts_with('#') {
                return self
                    .dictionary
                    .get(head.as_str())
                    .cloned()
                    .ok_or_else(|| DecodeError::MalformedReference { key: head.clone() });
            }
            if let Some(factory) = self.registry.resolve(head) {
                // The tail is the argument list, decoded leaves-first.
                let mut args = Vec::with_capacity(items.len() - 1);
                for item in &items[1..] {
                    args.push(self.decode(item)?);
                }
                let mut cursor = Args::new(&args);
                let object = factory(&mut cursor)?;
                return Ok(Value::Obj(object));
            }
        }
        // Unknown tags fall through here on purpose: the node stays a
        // plain sequence, tag included, so newer streams keep loading.
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            out.push(self.decode(item)?);
        }
        Ok(Value::Seq(out))
    }
}

// -----------------------------------------------------------------------------
// deserialize

/// Rebuilds a live value graph from its compact form.
///
/// A top-level `[["dictionary", definitions], payload]` envelope is
/// consumed first: the definitions are rebuilt into the session table and
/// the visible result is the decoded payload. Without an envelope the
/// form itself is the payload.
///
/// # Errors
///
/// - [`DecodeError::MalformedReference`] for a `["#id"]` marker with no
///   definition (including unresolvable definition cycles);
/// - [`DecodeError::InvalidArgument`] when a registered factory rejects
///   its decoded arguments.
///
/// An unknown type tag is *not* an error; the node stays a plain
/// sequence (forward compatibility).
pub fn deserialize(registry: &TypeRegistry, form: &CompactForm) -> Result<Value, DecodeError> {
    let mut session = DecodeSession::new(registry);
    if let Some((definitions, payload)) = split_envelope(form) {
        session.install_dictionary(definitions)?;
        return session.decode(payload);
    }
    session.decode(form)
}

/// Detects the top-level dictionary envelope.
fn split_envelope(form: &CompactForm) -> Option<(&FormMap, &CompactForm)> {
    let [envelope, payload] = form.as_seq()? else {
        return None;
    };
    let [tag, definitions] = envelope.as_seq()? else {
        return None;
    };
    if tag.as_str()? != "dictionary" {
        return None;
    }
    Some((definitions.as_map()?, payload))
}
