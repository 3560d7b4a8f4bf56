use core::any::Any;
use core::fmt::Debug;

use crate::form::CompactForm;
use crate::serde::SerializeContext;
use crate::uid::Uid;

// -----------------------------------------------------------------------------
// ScriptObject

/// The capability contract every serializable collaborator type implements.
///
/// Together with [`FromArgs`](crate::args::FromArgs) (the canonical
/// constructor) this is the whole protocol a type needs to participate in
/// the object infrastructure:
///
/// - [`type_tag`](Self::type_tag) names the type in serialized streams and
///   in the [`TypeRegistry`](crate::registry::TypeRegistry);
/// - [`to_compact`](Self::to_compact) describes the instance as a
///   [`CompactForm`], normally *without* the tag — the serializer prefixes
///   it, so nested contexts that imply the type can stay compact;
/// - [`uid`](Self::uid) opts the type into shared-definition
///   deduplication: instances returning `Some` serialize through
///   [`SerializeContext::add`] and are emitted once per pass, no matter
///   how many paths reach them;
/// - [`equals_object`](Self::equals_object) backs structural equality for
///   [`Value::Obj`](crate::value::Value) slots.
///
/// Types are free to produce a *tagged* form from `to_compact` (first
/// sequence element equal to their tag); the serializer detects this and
/// does not prefix twice. Reference markers returned by
/// [`SerializeContext::add`] are likewise passed through untouched.
pub trait ScriptObject: Debug + 'static {
    /// The short, stable tag this type registers under.
    fn type_tag(&self) -> &'static str;

    /// The identity used for shared-definition deduplication, or `None`
    /// for plain value types that are cheap to duplicate in the stream.
    fn uid(&self) -> Option<Uid> {
        None
    }

    /// Describes this instance compactly.
    fn to_compact(&self, ctx: &mut SerializeContext) -> CompactForm;

    /// Structural equality against another object.
    ///
    /// Implementations downcast `other` and compare fields; a foreign
    /// type compares unequal.
    fn equals_object(&self, other: &dyn ScriptObject) -> bool;

    /// Upcast used for downcasting, see [`dyn ScriptObject::downcast_ref`].
    fn as_any(&self) -> &dyn Any;
}

impl dyn ScriptObject {
    /// Returns `true` if the object is an instance of `T`.
    #[inline]
    pub fn is<T: ScriptObject>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrows the object as its concrete type, if it is one.
    #[inline]
    pub fn downcast_ref<T: ScriptObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
