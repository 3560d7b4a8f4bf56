//! Index-tracked list splicing.
//!
//! Scene lists (projects, item children) hand every entry a back-pointer to
//! its own position so removal and reordering stay O(1) lookups from the
//! entry side. [`splice`] is the single mutation point that keeps those
//! positions consistent.

use alloc::vec::Vec;

/// An entry that records its own position inside an owning list.
///
/// The index slot is interior-mutable so that shared handles
/// (`Arc<T>`, `Rc<T>`) can be re-indexed while the list holds them.
pub trait Indexed {
    /// Current position in the owning list, `None` while detached.
    fn index(&self) -> Option<usize>;

    /// Store a new position, or `None` to mark the entry detached.
    fn set_index(&self, index: Option<usize>);
}

impl<T: Indexed + ?Sized> Indexed for alloc::sync::Arc<T> {
    fn index(&self) -> Option<usize> {
        (**self).index()
    }

    fn set_index(&self, index: Option<usize>) {
        (**self).set_index(index);
    }
}

/// Inserts `items` into `list` and removes `remove` entries, keeping every
/// entry's recorded index in sync. Returns the removed entries, detached.
///
/// With `index` of `None` the items are appended and nothing is removed.
/// An out-of-range `index` is clamped to the list length.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use sv_utils::list::{Indexed, splice};
///
/// #[derive(Clone)]
/// struct Entry(Rc<Cell<Option<usize>>>);
///
/// impl Indexed for Entry {
///     fn index(&self) -> Option<usize> { self.0.get() }
///     fn set_index(&self, index: Option<usize>) { self.0.set(index) }
/// }
///
/// let entry = || Entry(Rc::new(Cell::new(None)));
/// let mut list = Vec::new();
/// let (a, b, c) = (entry(), entry(), entry());
///
/// splice(&mut list, &[a.clone(), c.clone()], None, 0);
/// splice(&mut list, &[b.clone()], Some(1), 0);
///
/// assert_eq!(a.index(), Some(0));
/// assert_eq!(b.index(), Some(1));
/// assert_eq!(c.index(), Some(2));
///
/// let removed = splice(&mut list, &[], Some(0), 1);
/// assert_eq!(removed[0].index(), None);
/// assert_eq!(b.index(), Some(0));
/// ```
pub fn splice<T: Indexed + Clone>(
    list: &mut Vec<T>,
    items: &[T],
    index: Option<usize>,
    remove: usize,
) -> Vec<T> {
    let append = index.is_none();
    let index = index.unwrap_or(list.len()).min(list.len());

    // Update the positions of the items to be added first.
    for (offset, item) in items.iter().enumerate() {
        item.set_index(Some(index + offset));
    }
    if append {
        list.extend_from_slice(items);
        return Vec::new();
    }

    let remove = remove.min(list.len() - index);
    let removed: Vec<T> = list
        .splice(index..index + remove, items.iter().cloned())
        .collect();
    for item in &removed {
        item.set_index(None);
    }
    // Re-index everything above the insertion.
    for (position, item) in list.iter().enumerate().skip(index + items.len()) {
        item.set_index(Some(position));
    }
    removed
}
