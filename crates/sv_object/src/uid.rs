use alloc::string::String;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

// -----------------------------------------------------------------------------
// Uid

/// A process-unique identity for a shareable object.
///
/// Minted once at creation from a [`UidSource`] and never reused. During
/// one serialization pass the uid keys the shared-definition dictionary;
/// it is never persisted, so a round trip assigns fresh uids to the
/// rebuilt instances.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Uid(u64);

impl Uid {
    /// Returns the raw counter value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The dictionary key spelling of this uid, `"#<n>"`.
    pub fn reference_key(self) -> String {
        alloc::format!("#{}", self.0)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// -----------------------------------------------------------------------------
// UidSource

/// An atomic uid allocator.
///
/// The counter is an ordinary constructible object rather than a hidden
/// global: ordinary construction paths use [`UidSource::global`], while
/// tests that need deterministic ids can mint from a private source.
///
/// # Examples
///
/// ```
/// use sv_object::uid::UidSource;
///
/// let source = UidSource::new();
/// let a = source.mint();
/// let b = source.mint();
/// assert_ne!(a, b);
/// ```
#[derive(Debug)]
pub struct UidSource {
    next: AtomicU64,
}

impl UidSource {
    /// Creates a source whose first minted uid is `#1`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Mints the next uid. Safe to call from any thread.
    #[inline]
    pub fn mint(&self) -> Uid {
        Uid(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The process-wide source used by ordinary construction paths.
    pub fn global() -> &'static UidSource {
        static GLOBAL: UidSource = UidSource::new();
        &GLOBAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uids_are_unique_and_ordered() {
        let source = UidSource::new();
        let a = source.mint();
        let b = source.mint();
        assert!(a < b);
        assert_eq!(a.get() + 1, b.get());
    }

    #[test]
    fn reference_key_spelling() {
        let source = UidSource::new();
        assert_eq!(source.mint().reference_key(), "#1");
    }

    #[test]
    fn global_source_is_shared() {
        let a = UidSource::global().mint();
        let b = UidSource::global().mint();
        assert_ne!(a, b);
    }
}
