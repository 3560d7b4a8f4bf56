use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::slice;

use crate::error::ReadError;
use crate::value::{Map, Value};

// -----------------------------------------------------------------------------
// FromArgs

/// The canonical constructor every readable type exposes.
///
/// One constructor covers every calling convention the scripting surface
/// supports: a full positional window, an existing instance of the same
/// type (copying), a nested sequence, or a single plain property map
/// (named fields). Implementations consume slots through the [`Args`]
/// cursor; how far they advance it *is* their self-reported argument
/// count, which is what lets several readers share one argument list.
pub trait FromArgs: Sized + 'static {
    /// Whether a lone `null` slot reads as "absent" for this type:
    /// [`Args::read`] consumes it and falls back to the constructor's
    /// empty-window case. Mirrors types whose optional slots are spelled
    /// `null` in scripts, like colors.
    const READ_NULL: bool = false;

    /// Accepts a slot that already carries this type, without running the
    /// constructor. Scalars convert, object slots downcast.
    fn from_slot(value: &Value) -> Option<Self>;

    /// Builds an instance from the cursor's remaining window.
    ///
    /// A window the constructor cannot interpret is reported as
    /// [`ReadError::InvalidArgument`]; the reader never pre-validates.
    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError>;
}

// -----------------------------------------------------------------------------
// Args

/// An explicit cursor over a positional argument list.
///
/// The cursor owns all reading state (position, last-read slot count, the
/// cached named-convention probe); the list itself is never touched.
/// Constructors receive a sub-cursor over their window and advance it by
/// exactly the slots they consume.
///
/// # Examples
///
/// Positional and named reading through the same path:
///
/// ```
/// use sv_object::args::Args;
/// use sv_object::value::{Map, Value};
///
/// let positional = [Value::from(3.0), Value::from(4.0)];
/// let mut args = Args::new(&positional);
/// assert_eq!(args.read::<f64>().unwrap(), 3.0);
/// assert_eq!(args.read::<f64>().unwrap(), 4.0);
///
/// let mut map = Map::new();
/// map.insert("x".into(), Value::from(3.0));
/// map.insert("y".into(), Value::from(4.0));
/// let named = [Value::Map(map)];
/// let mut args = Args::new(&named);
/// assert_eq!(args.read_named::<f64>("x").unwrap(), 3.0);
/// assert_eq!(args.read_named::<f64>("y").unwrap(), 4.0);
/// ```
pub struct Args<'a> {
    list: &'a [Value],
    index: usize,
    read: usize,
    has_object: Option<bool>,
}

impl<'a> Args<'a> {
    /// Creates a cursor at the start of `list`.
    #[inline]
    pub const fn new(list: &'a [Value]) -> Self {
        Self {
            list,
            index: 0,
            read: 0,
            has_object: None,
        }
    }

    /// Slots left in front of the cursor.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.list.len() - self.index
    }

    /// Whether every slot has been consumed.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.index >= self.list.len()
    }

    /// How many slots the last `read*` call consumed.
    #[inline]
    pub const fn consumed(&self) -> usize {
        self.read
    }

    /// The current slot, without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<&'a Value> {
        self.list.get(self.index)
    }

    /// The "plain reader": returns the current slot unmodified and
    /// advances by one.
    pub fn next_value(&mut self) -> Option<&'a Value> {
        let value = self.list.get(self.index)?;
        self.index += 1;
        self.read = 1;
        Some(value)
    }

    /// Reads a `T` from the remaining window.
    ///
    /// If the current slot already carries a `T` it is taken as-is and one
    /// slot is consumed; otherwise `T`'s canonical constructor runs over
    /// the window and the cursor advances by the count it reports.
    pub fn read<T: FromArgs>(&mut self) -> Result<T, ReadError> {
        let remaining = self.remaining();
        self.read_window::<T>(remaining)
    }

    /// Like [`read`](Self::read), restricted to a window of `length`
    /// slots. Readers sharing one list use this to ration slots.
    pub fn read_len<T: FromArgs>(&mut self, length: usize) -> Result<T, ReadError> {
        self.read_window::<T>(length)
    }

    /// The allow-null form: a `null` or absent slot reads as `None`,
    /// consuming the slot if present.
    pub fn read_opt<T: FromArgs>(&mut self) -> Result<Option<T>, ReadError> {
        match self.peek() {
            None => Ok(None),
            Some(Value::Null) => {
                self.index += 1;
                self.read = 1;
                Ok(None)
            }
            Some(_) => self.read::<T>().map(Some),
        }
    }

    fn read_window<T: FromArgs>(&mut self, length: usize) -> Result<T, ReadError> {
        if let Some(slot) = self.list.get(self.index)
            && let Some(value) = T::from_slot(slot)
        {
            self.index += 1;
            self.read = 1;
            return Ok(value);
        }
        // A lone null slot reads as "absent" for types that opt in; the
        // constructor's empty-window case supplies the absent reading.
        if T::READ_NULL
            && length <= 1
            && matches!(self.list.get(self.index), Some(Value::Null))
        {
            self.index += 1;
            self.read = 1;
            return T::from_args(&mut Args::new(&[]));
        }
        let end = (self.index + length).min(self.list.len());
        let mut window = Args::new(&self.list[self.index..end]);
        let value = T::from_args(&mut window)?;
        // Named-convention constructors read through the property map
        // without touching the cursor; the map slot still counts.
        let consumed = if window.index == 0 && window.has_object == Some(true) {
            1
        } else {
            window.index
        };
        self.index += consumed;
        self.read = consumed;
        Ok(value)
    }

    /// Reads every remaining top-level slot as a `T`.
    ///
    /// A slot that is itself a plain sequence is treated as its own
    /// nested argument list, so flattened batch construction like a list
    /// of coordinate pairs reads naturally.
    pub fn read_all<T: FromArgs>(&mut self) -> Result<Vec<T>, ReadError> {
        let start = self.index;
        let mut out = Vec::new();
        while let Some(slot) = self.peek() {
            if let Value::Seq(items) = slot {
                let mut nested = Args::new(items);
                out.push(nested.read::<T>()?);
                self.index += 1;
            } else {
                out.push(self.read_len::<T>(1)?);
            }
        }
        self.read = self.index - start;
        Ok(out)
    }

    // -------------------------------------------------------------------------
    // Named arguments

    /// The property map, if this list uses the single-property-object
    /// calling convention. The probe runs once and is cached.
    pub fn named_map(&mut self) -> Option<&'a Map> {
        let has = match self.has_object {
            Some(has) => has,
            None => {
                let has = self.list.len() == 1 && matches!(self.list.first(), Some(Value::Map(_)));
                self.has_object = Some(has);
                has
            }
        };
        if has {
            match self.list.first() {
                Some(Value::Map(map)) => Some(map),
                _ => None,
            }
        } else {
            None
        }
    }

    /// Whether this list uses the property-object convention at all.
    #[inline]
    pub fn uses_named(&mut self) -> bool {
        self.named_map().is_some()
    }

    /// The named value, or `None` when the convention is not in use or
    /// the key is absent.
    pub fn get_named(&mut self, name: &str) -> Option<&'a Value> {
        self.named_map().and_then(|map| map.get(name))
    }

    /// Whether a non-null named value is present for `name`.
    pub fn has_named(&mut self, name: &str) -> bool {
        matches!(self.get_named(name), Some(value) if !value.is_null())
    }

    /// Reads a `T` from the named slot when the property-object
    /// convention is in use, falling through to positional reading
    /// otherwise. An absent key default-constructs.
    pub fn read_named<T: FromArgs>(&mut self, name: &str) -> Result<T, ReadError> {
        match self.named_map() {
            Some(map) => match map.get(name) {
                Some(value) => read_single(value),
                None => T::from_args(&mut Args::new(&[])),
            },
            None => self.read::<T>(),
        }
    }

    /// The allow-null named form: absent or null reads as `None`. Types
    /// with [`FromArgs::READ_NULL`] get the same treatment through
    /// [`read_named`](Self::read_named) callers that expect options.
    pub fn read_named_opt<T: FromArgs>(&mut self, name: &str) -> Result<Option<T>, ReadError> {
        match self.named_map() {
            Some(map) => match map.get(name) {
                None | Some(Value::Null) => Ok(None),
                Some(value) => read_single(value).map(Some),
            },
            None => self.read_opt::<T>(),
        }
    }
}

/// Reads one `T` out of a single detached slot.
fn read_single<T: FromArgs>(value: &Value) -> Result<T, ReadError> {
    if let Some(v) = T::from_slot(value) {
        return Ok(v);
    }
    T::from_args(&mut Args::new(slice::from_ref(value)))
}

// -----------------------------------------------------------------------------
// Scalar readers

impl FromArgs for f64 {
    fn from_slot(value: &Value) -> Option<Self> {
        value.as_number()
    }

    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
        match args.next_value() {
            Some(Value::Number(n)) => Ok(*n),
            other => Err(ReadError::invalid_argument(
                "number",
                alloc::format!("expected a number slot, found {other:?}"),
            )),
        }
    }
}

impl FromArgs for bool {
    fn from_slot(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
        match args.next_value() {
            Some(Value::Bool(b)) => Ok(*b),
            other => Err(ReadError::invalid_argument(
                "boolean",
                alloc::format!("expected a boolean slot, found {other:?}"),
            )),
        }
    }
}

impl FromArgs for String {
    fn from_slot(value: &Value) -> Option<Self> {
        value.as_str().map(ToOwned::to_owned)
    }

    fn from_args(args: &mut Args<'_>) -> Result<Self, ReadError> {
        match args.next_value() {
            Some(Value::Str(s)) => Ok(s.clone()),
            other => Err(ReadError::invalid_argument(
                "string",
                alloc::format!("expected a string slot, found {other:?}"),
            )),
        }
    }
}
