use alloc::sync::Arc;

use sv_utils::HashMap;

use crate::args::{Args, FromArgs};
use crate::error::ReadError;
use crate::object::ScriptObject;

// -----------------------------------------------------------------------------
// Factory

/// A canonical-constructor entry point stored in the [`TypeRegistry`].
///
/// The deserializer hands the decoded tail of a tagged sequence to the
/// factory as an argument cursor; the factory builds the instance or
/// reports [`ReadError::InvalidArgument`].
pub type Factory = fn(&mut Args<'_>) -> Result<Arc<dyn ScriptObject>, ReadError>;

/// The ready-made factory for types implementing both halves of the
/// protocol. Registered as `registry.register(TAG, object_factory::<T>)`.
pub fn object_factory<T: FromArgs + ScriptObject>(
    args: &mut Args<'_>,
) -> Result<Arc<dyn ScriptObject>, ReadError> {
    Ok(Arc::new(T::from_args(args)?))
}

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of serializable types, keyed by their short string tags.
///
/// This is the deserialization dispatch table: a tagged compact sequence
/// `[tag, args...]` rebuilds through the factory registered under `tag`.
/// Registration is a plain insert with last-writer-wins semantics — no
/// duplicate-tag error is raised, so a later registration can override an
/// earlier one on purpose. There is no removal; after start-up the
/// registry is read-mostly, and concurrent registration needs external
/// synchronization.
///
/// The registry is a constructed value handed to the deserializer, never
/// ambient state.
///
/// # Examples
///
/// ```
/// use sv_object::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
/// assert!(registry.resolve("Point").is_none());
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    table: HashMap<&'static str, Factory>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            table: HashMap::default(),
        }
    }

    /// Stores `factory` under `tag`. The last writer for a tag wins.
    #[inline]
    pub fn register(&mut self, tag: &'static str, factory: Factory) {
        self.table.insert(tag, factory);
    }

    /// Looks a tag up, returning its factory if one is registered.
    #[inline]
    pub fn resolve(&self, tag: &str) -> Option<Factory> {
        self.table.get(tag).copied()
    }

    /// Whether a factory is registered under `tag`.
    #[inline]
    pub fn contains(&self, tag: &str) -> bool {
        self.table.contains_key(tag)
    }

    /// The number of registered tags.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterates the registered `(tag, factory)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Factory)> + '_ {
        self.table.iter().map(|(tag, factory)| (*tag, *factory))
    }

    /// Registers every [`TagRegistration`] submitted through `inventory`.
    ///
    /// Submitted registrations do not override tags already present, so
    /// explicit [`register`](Self::register) calls keep priority. Repeat
    /// calls are cheap. Returns the number of submissions visited; with
    /// the `auto_register` feature disabled this is always `0`.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> usize {
        let mut seen = 0;
        for registration in inventory::iter::<TagRegistration> {
            seen += 1;
            self.table
                .entry(registration.tag)
                .or_insert(registration.factory);
        }
        seen
    }

    /// Does nothing without the `auto_register` feature.
    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    pub fn auto_register(&mut self) -> usize {
        0
    }
}

// -----------------------------------------------------------------------------
// TagRegistration

/// A static registration record for [`TypeRegistry::auto_register`].
///
/// Types that declare themselves serializable submit one of these next to
/// their definition:
///
/// ```ignore
/// inventory::submit! {
///     TagRegistration::new("Point", object_factory::<Point>)
/// }
/// ```
pub struct TagRegistration {
    /// The tag the type serializes under.
    pub tag: &'static str,
    /// The type's canonical-constructor entry point.
    pub factory: Factory,
}

impl TagRegistration {
    pub const fn new(tag: &'static str, factory: Factory) -> Self {
        Self { tag, factory }
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(TagRegistration);

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;

    use super::*;
    use crate::form::CompactForm;
    use crate::serde::SerializeContext;
    use crate::value::Value;

    #[derive(Debug, PartialEq)]
    struct Marker(f64);

    impl FromArgs for Marker {
        fn from_slot(value: &Value) -> Option<Self> {
            value.downcast_ref::<Marker>().map(|m| Marker(m.0))
        }

        fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
            Ok(Marker(args.read::<f64>()?))
        }
    }

    impl ScriptObject for Marker {
        fn type_tag(&self) -> &'static str {
            "Marker"
        }

        fn to_compact(&self, ctx: &mut SerializeContext) -> CompactForm {
            CompactForm::Seq(vec![ctx.number(self.0)])
        }

        fn equals_object(&self, other: &dyn ScriptObject) -> bool {
            other.downcast_ref::<Marker>() == Some(self)
        }

        fn as_any(&self) -> &dyn core::any::Any {
            self
        }
    }

    #[test]
    fn register_and_resolve() {
        let mut registry = TypeRegistry::new();
        registry.register("Marker", object_factory::<Marker>);
        assert!(registry.contains("Marker"));

        let factory = registry.resolve("Marker").unwrap();
        let list = [Value::from(5.0)];
        let built = factory(&mut Args::new(&list)).unwrap();
        assert_eq!(built.downcast_ref::<Marker>(), Some(&Marker(5.0)));
    }

    #[test]
    fn last_registration_wins() {
        fn failing(_: &mut Args<'_>) -> Result<Arc<dyn ScriptObject>, ReadError> {
            Err(ReadError::invalid_argument("Marker", "overridden"))
        }

        let mut registry = TypeRegistry::new();
        registry.register("Marker", object_factory::<Marker>);
        registry.register("Marker", failing);
        assert_eq!(registry.len(), 1);

        let factory = registry.resolve("Marker").unwrap();
        assert!(factory(&mut Args::new(&[])).is_err());
    }

    #[test]
    fn unknown_tag_resolves_to_none() {
        let registry = TypeRegistry::new();
        assert!(registry.resolve("Nothing").is_none());
    }
}
