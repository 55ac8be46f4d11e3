//! Chaining operations over `Resonad`.
//!
//! Each combinator acts on one side only and carries the other side
//! through untouched, without calling the supplied closure:
//!
//! | Operation     | On `Success(v)`          | On `Failure(e)`          |
//! |---------------|--------------------------|--------------------------|
//! | `map`         | `Success(f(v))`          | carried through          |
//! | `map_error`   | carried through          | `Failure(f(e))`          |
//! | `chain`       | `f(v)`                   | carried through          |
//! | `chain_error` | carried through          | `f(e)`                   |
//! | `on_success`  | `f(&v)`, returns self    | returns self             |
//! | `on_failure`  | returns self             | `f(&e)`, returns self    |
//!
//! `map`/`map_error` never change the variant; `chain`/`chain_error` let
//! the closure decide.
//!
//! Payloads move through every combinator, so none of them allocates. A
//! closure that returns its argument yields the very same payload, and a
//! shared payload (`Arc<T>`, `&T`) keeps its identity.

use crate::Resonad;

impl<V, E> Resonad<V, E> {
    /// Transform the value of a `Success`.
    ///
    /// ```
    /// use resonad::success;
    /// let r = success::<_, ()>("hello").map(|v| format!("{v} world"));
    /// assert_eq!(r.value().map(String::as_str), Ok("hello world"));
    /// ```
    #[inline]
    pub fn map<V2, F>(self, f: F) -> Resonad<V2, E>
    where
        F: FnOnce(V) -> V2,
    {
        match self {
            Resonad::Success(value) => Resonad::Success(f(value)),
            Resonad::Failure(error) => Resonad::Failure(error),
        }
    }

    /// Transform the error of a `Failure`.
    #[inline]
    pub fn map_error<E2, F>(self, f: F) -> Resonad<V, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Resonad::Success(value) => Resonad::Success(value),
            Resonad::Failure(error) => Resonad::Failure(f(error)),
        }
    }

    /// Sequence a fallible step after a `Success`.
    ///
    /// The closure's result is returned as is, so a `Failure` it produces
    /// becomes the outcome of the whole chain.
    ///
    /// ```
    /// use resonad::{failure, success, Resonad};
    /// let r = success::<_, &str>("hello").chain(|v| success(format!("{v} moto")));
    /// assert_eq!(r.value().map(String::as_str), Ok("hello moto"));
    ///
    /// let r: Resonad<u8, _> = success("hello").chain(|_| failure("boo"));
    /// assert_eq!(r.error(), Ok(&"boo"));
    /// ```
    #[inline]
    pub fn chain<V2, F>(self, f: F) -> Resonad<V2, E>
    where
        F: FnOnce(V) -> Resonad<V2, E>,
    {
        match self {
            Resonad::Success(value) => f(value),
            Resonad::Failure(error) => Resonad::Failure(error),
        }
    }

    /// Recover from, or translate, a `Failure`.
    ///
    /// Retry policies belong to the caller: wrap the retry loop in `f`.
    #[inline]
    pub fn chain_error<E2, F>(self, f: F) -> Resonad<V, E2>
    where
        F: FnOnce(E) -> Resonad<V, E2>,
    {
        match self {
            Resonad::Success(value) => Resonad::Success(value),
            Resonad::Failure(error) => f(error),
        }
    }

    /// Inspect the value of a `Success`, then hand `self` back.
    #[inline]
    pub fn on_success<F>(self, f: F) -> Self
    where
        F: FnOnce(&V),
    {
        if let Resonad::Success(value) = &self {
            f(value);
        }
        self
    }

    /// Inspect the error of a `Failure`, then hand `self` back.
    #[inline]
    pub fn on_failure<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Resonad::Failure(error) = &self {
            f(error);
        }
        self
    }
}
