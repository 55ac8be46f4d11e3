/// Terse form of [`rescuing_from`](crate::rescuing_from).
///
/// # Forms
///
/// ```ignore
/// // Rescue every panic:
/// rescue!({ risky() })
///
/// // Rescue payloads of the listed types, re-raise the rest:
/// rescue!([ArgError, ZeroDivision], { risky() })
/// ```
///
/// Each listed type becomes an `ErrorKind::of::<T>()`.
#[macro_export]
macro_rules! rescue {
    ($body:block) => {
        $crate::rescuing_from(&[], || $body)
    };

    ([$($kind:ty),+ $(,)?], $body:block) => {
        $crate::rescuing_from(&[$($crate::ErrorKind::of::<$kind>()),+], || $body)
    };
}
