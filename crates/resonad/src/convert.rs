use crate::Resonad;

// ── std::result::Result interop ───────────────────────────────────

impl<V, E> From<Result<V, E>> for Resonad<V, E> {
    #[inline]
    fn from(result: Result<V, E>) -> Self {
        match result {
            Ok(value) => Resonad::Success(value),
            Err(error) => Resonad::Failure(error),
        }
    }
}

impl<V, E> From<Resonad<V, E>> for Result<V, E> {
    #[inline]
    fn from(resonad: Resonad<V, E>) -> Self {
        resonad.into_result()
    }
}

impl<V, E> Resonad<V, E> {
    /// Hand the outcome back to `?`-style code.
    #[inline]
    pub fn into_result(self) -> Result<V, E> {
        match self {
            Resonad::Success(value) => Ok(value),
            Resonad::Failure(error) => Err(error),
        }
    }
}

/// Extension trait for lifting any `Result` into a `Resonad`.
///
/// ```
/// use resonad::ResultExt;
///
/// let r = "42".parse::<u32>().into_resonad().map(|n| n + 1);
/// assert_eq!(r.value(), Ok(&43));
/// ```
pub trait ResultExt<V, E> {
    fn into_resonad(self) -> Resonad<V, E>;
}

impl<V, E> ResultExt<V, E> for Result<V, E> {
    #[inline]
    fn into_resonad(self) -> Resonad<V, E> {
        Resonad::from(self)
    }
}
