use core::fmt;

use crate::error::{NonExistentError, NonExistentValue};

/// A computed value or an error: never both, never neither.
///
/// `Resonad` is a closed sum over exactly two variants. Every operation
/// matches exhaustively on the variant, so callers can chain combinators
/// without branching themselves.
///
/// Payloads are fixed at construction. Combinators consume the instance
/// and hand back either a new one or the receiver untouched; there are no
/// `&mut` accessors.
///
/// `Resonad<V, E>` is `Send`/`Sync` exactly when `V` and `E` are, so a
/// shared reference can be read from many threads without locking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "a Resonad may be a Failure, which should be handled"]
pub enum Resonad<V, E> {
    /// Holds a computed value.
    Success(V),
    /// Holds an error.
    Failure(E),
}

/// Variant tag for destructuring without touching the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Success,
    Failure,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Success => "success",
            Tag::Failure => "failure",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Constructors ──────────────────────────────────────────────────

/// Build a `Success`.
///
/// ```
/// use resonad::success;
/// let r = success::<_, ()>(5);
/// assert_eq!(r.value(), Ok(&5));
/// ```
#[inline]
pub const fn success<V, E>(value: V) -> Resonad<V, E> {
    Resonad::Success(value)
}

/// Build a `Failure`.
///
/// ```
/// use resonad::failure;
/// let r = failure::<(), _>("buzz");
/// assert_eq!(r.error(), Ok(&"buzz"));
/// ```
#[inline]
pub const fn failure<V, E>(error: E) -> Resonad<V, E> {
    Resonad::Failure(error)
}

impl<V, E> Resonad<V, E> {
    #[inline]
    pub const fn success(value: V) -> Self {
        Resonad::Success(value)
    }

    #[inline]
    pub const fn failure(error: E) -> Self {
        Resonad::Failure(error)
    }
}

impl<E> Resonad<(), E> {
    /// The canonical payload-less `Success`.
    ///
    /// Zero-sized payload: every call yields an equal instance at no cost.
    #[inline]
    pub const fn empty_success() -> Self {
        Resonad::Success(())
    }
}

impl<V> Resonad<V, ()> {
    /// The canonical payload-less `Failure`.
    #[inline]
    pub const fn empty_failure() -> Self {
        Resonad::Failure(())
    }
}

// ── Predicates & accessors ────────────────────────────────────────

impl<V, E> Resonad<V, E> {
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Resonad::Success(_))
    }

    #[inline]
    pub const fn is_failure(&self) -> bool {
        !self.is_success()
    }

    #[inline]
    pub const fn tag(&self) -> Tag {
        match self {
            Resonad::Success(_) => Tag::Success,
            Resonad::Failure(_) => Tag::Failure,
        }
    }

    /// Borrow the value. A `Failure` has none.
    #[inline]
    pub fn value(&self) -> Result<&V, NonExistentValue> {
        match self {
            Resonad::Success(value) => Ok(value),
            Resonad::Failure(_) => Err(NonExistentValue),
        }
    }

    /// Borrow the error. A `Success` has none.
    #[inline]
    pub fn error(&self) -> Result<&E, NonExistentError> {
        match self {
            Resonad::Success(_) => Err(NonExistentError),
            Resonad::Failure(error) => Ok(error),
        }
    }

    pub fn into_value(self) -> Result<V, NonExistentValue> {
        match self {
            Resonad::Success(value) => Ok(value),
            Resonad::Failure(_) => Err(NonExistentValue),
        }
    }

    pub fn into_error(self) -> Result<E, NonExistentError> {
        match self {
            Resonad::Success(_) => Err(NonExistentError),
            Resonad::Failure(error) => Ok(error),
        }
    }

    /// Take the value, panicking with a [`NonExistentValue`] payload on a
    /// `Failure`.
    ///
    /// The payload is the condition object itself, so
    /// `ErrorKind::of::<NonExistentValue>()`, `error::<NonExistentValue>()`
    /// and `any_error()` all rescue it.
    #[track_caller]
    pub fn unwrap_value(self) -> V {
        match self {
            Resonad::Success(value) => value,
            Resonad::Failure(_) => std::panic::panic_any(NonExistentValue),
        }
    }

    /// Take the error, panicking with a [`NonExistentError`] payload on a
    /// `Success`.
    #[track_caller]
    pub fn unwrap_error(self) -> E {
        match self {
            Resonad::Success(_) => std::panic::panic_any(NonExistentError),
            Resonad::Failure(error) => error,
        }
    }

    #[inline]
    pub const fn as_ref(&self) -> Resonad<&V, &E> {
        match self {
            Resonad::Success(value) => Resonad::Success(value),
            Resonad::Failure(error) => Resonad::Failure(error),
        }
    }
}
