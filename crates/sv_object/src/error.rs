use alloc::borrow::Cow;
use alloc::string::String;
use core::{error, fmt};

// -----------------------------------------------------------------------------
// ReadError

/// A enumeration of all error outcomes that might happen when a canonical
/// constructor interprets an argument list.
///
/// The argument reader itself never pre-validates; a constructor that
/// cannot make sense of its window reports [`InvalidArgument`] when invoked.
///
/// [`InvalidArgument`]: ReadError::InvalidArgument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A constructor received positional arguments it cannot interpret.
    InvalidArgument {
        type_tag: Cow<'static, str>,
        reason: Cow<'static, str>,
    },
    /// A type tag has no entry in the registry that was asked to build it.
    UnknownType { tag: Cow<'static, str> },
}

impl ReadError {
    /// Shorthand used by constructors to report an uninterpretable window.
    #[inline]
    pub fn invalid_argument(
        type_tag: impl Into<Cow<'static, str>>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidArgument {
            type_tag: type_tag.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { type_tag, reason } => {
                write!(f, "cannot construct `{type_tag}`: {reason}")
            }
            Self::UnknownType { tag } => {
                write!(f, "type tag `{tag}` is not registered")
            }
        }
    }
}

impl error::Error for ReadError {}

// -----------------------------------------------------------------------------
// DecodeError

/// A enumeration of all error outcomes that might happen when decoding a
/// compact form back into a live value tree.
///
/// An unknown type tag is deliberately *not* an error: the stream must
/// tolerate tags from newer library versions, so such nodes stay plain
/// sequences (see [`deserialize`](crate::serde::deserialize)).
#[derive(Debug)]
pub enum DecodeError {
    /// A `"#id"` reference marker has no corresponding dictionary entry.
    MalformedReference { key: String },
    /// A registered factory rejected the decoded argument list.
    InvalidArgument(ReadError),
    /// The JSON text handed to [`import_json`](crate::serde::import_json)
    /// failed to parse.
    Json(serde_json::Error),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedReference { key } => {
                write!(f, "reference marker `{key}` has no dictionary definition")
            }
            Self::InvalidArgument(err) => {
                write!(f, "constructor rejected decoded arguments: {err}")
            }
            Self::Json(err) => write!(f, "invalid JSON input: {err}"),
        }
    }
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidArgument(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::MalformedReference { .. } => None,
        }
    }
}

impl From<ReadError> for DecodeError {
    #[inline]
    fn from(value: ReadError) -> Self {
        Self::InvalidArgument(value)
    }
}
