//! Panic-to-`Resonad` adapter.
//!
//! `rescuing_from` is the only place where this crate catches anything.
//! It runs a body under `catch_unwind` and:
//!
//! ```text
//! body returns v ─────────────────────────────► Success(v)
//! body panics ──┬─ kinds empty ────────────────► Failure(Raised)
//!               ├─ some ErrorKind matches ─────► Failure(Raised)
//!               └─ no match ───────────────────► resume_unwind(payload)
//! ```
//!
//! Re-raising uses the original payload box, so the caller's caller sees
//! exactly what the body panicked with. The panic hook does not run twice.

use std::any::{type_name, Any};
use std::error::Error;
use std::fmt;
use std::panic::{self, UnwindSafe};
use std::sync::Arc;

use crate::{kdebug, ktrace, NonExistentError, NonExistentValue, Resonad};

/// Payload type-erased by `catch_unwind`.
pub type Payload = Box<dyn Any + Send + 'static>;

/// Boxed error payload, as raised by `panic_any(Box::new(err) as BoxError)`.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

// ── ErrorKind ─────────────────────────────────────────────────────

type Predicate = Arc<dyn Fn(&(dyn Any + Send)) -> bool + Send + Sync>;

#[derive(Clone)]
enum Matcher {
    Plain(fn(&(dyn Any + Send)) -> bool),
    Custom(Predicate),
}

/// A class of panic payloads that `rescuing_from` may convert.
///
/// An *error payload* is a boxed `dyn Error` (`BoxError` or
/// `Box<dyn Error + Send>`), or a bare [`NonExistentValue`] /
/// [`NonExistentError`] as raised by `unwrap_value` / `unwrap_error`.
///
/// | Kind                          | Matches                                      |
/// |-------------------------------|----------------------------------------------|
/// | `any_error()`                 | any error payload                            |
/// | `error::<T>()`                | an error payload whose concrete type is `T`  |
/// | `of::<T>()`                   | a bare `T` payload                           |
/// | `matching::<T>(name, pred)`   | a bare `T` payload for which `pred` holds    |
/// | `message()`                   | `&'static str` / `String` from `panic!`      |
///
/// Two pairs nest: `any_error()` covers every `error::<T>()`, and
/// `of::<T>()` covers every `matching::<T>(..)`. A bare user error,
/// `panic_any(MyError)`, is not an error payload; rescue it with
/// `of::<MyError>()`.
#[derive(Clone)]
pub struct ErrorKind {
    name: &'static str,
    matcher: Matcher,
}

impl ErrorKind {
    /// Payloads of exactly type `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            name: type_name::<T>(),
            matcher: Matcher::Plain(is_payload::<T>),
        }
    }

    /// Error payloads whose concrete type is `T`.
    pub fn error<T: Error + 'static>() -> Self {
        Self {
            name: type_name::<T>(),
            matcher: Matcher::Plain(is_error::<T>),
        }
    }

    /// Any error payload.
    pub fn any_error() -> Self {
        Self {
            name: "dyn Error",
            matcher: Matcher::Plain(is_any_error),
        }
    }

    /// Message panics: `panic!("...")` with or without format arguments.
    pub fn message() -> Self {
        Self {
            name: "message",
            matcher: Matcher::Plain(is_message),
        }
    }

    /// `T` payloads for which `predicate` holds.
    ///
    /// ```
    /// use resonad::{rescuing_from, ErrorKind};
    ///
    /// #[derive(Debug)]
    /// enum Io { Timeout, Closed }
    ///
    /// let timeouts = ErrorKind::matching::<Io, _>("timeout", |e| matches!(e, Io::Timeout));
    /// let r = rescuing_from(&[timeouts], || -> u8 { std::panic::panic_any(Io::Timeout) });
    /// assert!(r.is_failure());
    /// ```
    pub fn matching<T, P>(name: &'static str, predicate: P) -> Self
    where
        T: Any,
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            matcher: Matcher::Custom(Arc::new(move |payload: &(dyn Any + Send)| {
                payload.downcast_ref::<T>().is_some_and(&predicate)
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this kind covers `payload`.
    pub fn matches(&self, payload: &(dyn Any + Send)) -> bool {
        match &self.matcher {
            Matcher::Plain(f) => f(payload),
            Matcher::Custom(f) => f(payload),
        }
    }
}

impl fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorKind").field(&self.name).finish()
    }
}

fn is_payload<T: Any>(payload: &(dyn Any + Send)) -> bool {
    payload.is::<T>()
}

fn is_error<T: Error + 'static>(payload: &(dyn Any + Send)) -> bool {
    payload_error(payload).is_some_and(|e| e.is::<T>())
}

fn is_any_error(payload: &(dyn Any + Send)) -> bool {
    payload_error(payload).is_some()
}

fn is_message(payload: &(dyn Any + Send)) -> bool {
    payload_message(payload).is_some()
}

// Both `error::<T>()` and `any_error()` go through here, so the first can
// never match a payload the second rejects.
fn payload_error(payload: &(dyn Any + Send)) -> Option<&(dyn Error + 'static)> {
    if let Some(e) = payload.downcast_ref::<BoxError>() {
        let e: &(dyn Error + 'static) = &**e;
        return Some(e);
    }
    if let Some(e) = payload.downcast_ref::<Box<dyn Error + Send + 'static>>() {
        let e: &(dyn Error + 'static) = &**e;
        return Some(e);
    }
    if let Some(e) = payload.downcast_ref::<NonExistentValue>() {
        return Some(e);
    }
    payload
        .downcast_ref::<NonExistentError>()
        .map(|e| e as &(dyn Error + 'static))
}

fn payload_message(payload: &(dyn Any + Send)) -> Option<&str> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        return Some(*s);
    }
    payload.downcast_ref::<String>().map(String::as_str)
}

// ── Raised ────────────────────────────────────────────────────────

/// A panic payload caught by `rescuing_from`.
///
/// The payload is kept as is; nothing is stringified or re-wrapped.
pub struct Raised {
    payload: Payload,
}

impl Raised {
    pub fn new(payload: Payload) -> Self {
        Self { payload }
    }

    /// True if the payload is exactly a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Take the payload as `T`, or get `self` back if it is something else.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self.payload.downcast::<T>() {
            Ok(v) => Ok(*v),
            Err(payload) => Err(Self { payload }),
        }
    }

    /// Borrow an error of type `T`, raised bare or boxed as a `BoxError`.
    pub fn error_ref<T: Error + 'static>(&self) -> Option<&T> {
        if let Some(e) = self.payload.downcast_ref::<T>() {
            return Some(e);
        }
        payload_error(self.payload.as_ref())?.downcast_ref::<T>()
    }

    /// The payload as a `dyn Error`, when it is an error payload.
    pub fn as_error(&self) -> Option<&(dyn Error + 'static)> {
        payload_error(self.payload.as_ref())
    }

    /// The panic message, when the payload came from `panic!`.
    pub fn message(&self) -> Option<&str> {
        payload_message(self.payload.as_ref())
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Re-raise the original payload.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.payload)
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Raised");
        if let Some(msg) = self.message() {
            d.field("message", &msg);
        } else if let Some(err) = self.as_error() {
            d.field("error", &format_args!("{}", err));
        } else {
            d.field("payload", &format_args!("<opaque>"));
        }
        d.finish()
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(msg) = self.message() {
            write!(f, "panicked: {}", msg)
        } else if let Some(err) = self.as_error() {
            write!(f, "panicked with error: {}", err)
        } else {
            write!(f, "panicked with an opaque payload")
        }
    }
}

impl Error for Raised {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.as_error()
    }
}

// ── Adapter ───────────────────────────────────────────────────────

/// What `rescuing_from` did with a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RescueOutcome {
    /// The body returned normally.
    Completed,
    /// The body panicked and the payload became a `Failure`.
    Rescued,
    /// The body panicked outside the given kinds; the payload was re-raised.
    Reraised,
}

cfg_if::cfg_if! {
    if #[cfg(feature = "metrics")] {
        use crate::metrics::record;
    } else {
        #[inline(always)]
        fn record(_outcome: RescueOutcome) {}
    }
}

/// Run `body`, turning a panic into a `Failure`.
///
/// With `kinds` empty every panic is rescued. Otherwise only payloads
/// matched by one of `kinds` are; anything else is re-raised with its
/// original payload and never becomes a `Resonad`.
///
/// # Panics
///
/// Re-raises panics outside `kinds`. A rescued panic has still been
/// reported: the process panic hook runs before unwinding starts, so the
/// default hook prints its `thread '..' panicked at ..` line to stderr even
/// when the result is a `Failure`. Callers that expect panics can swap the
/// hook around the call:
///
/// ```
/// use resonad::{rescuing_from, ErrorKind};
///
/// let previous = std::panic::take_hook();
/// std::panic::set_hook(Box::new(|_| {}));
/// let r = rescuing_from(&[ErrorKind::message()], || -> u8 { panic!("quiet") });
/// std::panic::set_hook(previous);
///
/// assert_eq!(r.error().unwrap().message(), Some("quiet"));
/// ```
///
/// # Examples
///
/// ```
/// use resonad::{rescuing_from, ErrorKind};
///
/// #[derive(Debug)]
/// struct ArgError;
///
/// let ok = rescuing_from(&[], || "hello");
/// assert_eq!(ok.value(), Ok(&"hello"));
///
/// let bad = rescuing_from(&[ErrorKind::of::<ArgError>()], || -> u8 {
///     std::panic::panic_any(ArgError)
/// });
/// assert!(bad.error().unwrap().is::<ArgError>());
/// ```
pub fn rescuing_from<V, F>(kinds: &[ErrorKind], body: F) -> Resonad<V, Raised>
where
    F: FnOnce() -> V + UnwindSafe,
{
    let payload = match panic::catch_unwind(body) {
        Ok(value) => {
            ktrace!("rescuing_from: body completed");
            record(RescueOutcome::Completed);
            return Resonad::Success(value);
        }
        Err(payload) => payload,
    };

    if kinds.is_empty() {
        kdebug!("rescuing_from: rescued panic (all kinds)");
        record(RescueOutcome::Rescued);
        return Resonad::Failure(Raised::new(payload));
    }

    match kinds.iter().find(|kind| kind.matches(payload.as_ref())) {
        Some(kind) => {
            kdebug!("rescuing_from: rescued panic as {}", kind.name());
            record(RescueOutcome::Rescued);
            Resonad::Failure(Raised::new(payload))
        }
        None => {
            kdebug!("rescuing_from: re-raising panic outside {} kind(s)", kinds.len());
            record(RescueOutcome::Reraised);
            panic::resume_unwind(payload)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{failure, success};
    use std::panic::{catch_unwind, panic_any};

    #[derive(Debug)]
    struct ArgError;

    #[derive(Debug)]
    struct ZeroDivision;

    #[derive(Debug, PartialEq)]
    struct NameError(u32);

    #[derive(Debug)]
    enum Io {
        Timeout,
        Closed,
    }

    #[derive(Debug)]
    struct ParseFailure;

    impl fmt::Display for ParseFailure {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "could not parse")
        }
    }

    impl Error for ParseFailure {}

    fn boxed(e: impl Error + Send + Sync + 'static) -> BoxError {
        Box::new(e)
    }

    #[test]
    fn success_if_nothing_raised() {
        let r = rescuing_from(&[], || "hello");
        assert!(r.is_success());
        assert_eq!(r.value(), Ok(&"hello"));
    }

    #[test]
    fn rescues_specified_kinds() {
        let kinds = [ErrorKind::of::<ArgError>(), ErrorKind::of::<ZeroDivision>()];
        let r = rescuing_from(&kinds, || -> i32 { panic_any(ArgError) });
        assert!(r.is_failure());
        assert!(r.error().unwrap().is::<ArgError>());

        let r = rescuing_from(&kinds, || -> i32 { panic_any(ZeroDivision) });
        assert!(r.error().unwrap().is::<ZeroDivision>());
    }

    #[test]
    fn reraises_unspecified_kinds_unchanged() {
        let outer = catch_unwind(|| {
            let kinds = [ErrorKind::of::<ArgError>(), ErrorKind::of::<ZeroDivision>()];
            rescuing_from(&kinds, || -> i32 { panic_any(NameError(7)) })
        });
        let payload = outer.expect_err("NameError must propagate past rescuing_from");
        assert_eq!(payload.downcast_ref::<NameError>(), Some(&NameError(7)));
    }

    #[test]
    fn rescues_everything_without_kinds() {
        let r = rescuing_from(&[], || -> i32 { panic_any(ArgError) });
        assert!(r.is_failure());
        assert!(r.error().unwrap().is::<ArgError>());

        let r = rescuing_from(&[], || -> i32 { panic!("boom {}", 42) });
        assert_eq!(r.error().unwrap().message(), Some("boom 42"));
    }

    #[test]
    fn base_kind_rescues_concrete_errors() {
        let r = rescuing_from(&[ErrorKind::any_error()], || -> u8 {
            panic_any(boxed(ParseFailure))
        });
        let raised = r.error().unwrap();
        assert!(raised.error_ref::<ParseFailure>().is_some());
        assert_eq!(raised.as_error().map(|e| e.to_string()), Some("could not parse".into()));
    }

    #[test]
    fn error_kind_matches_boxed_errors() {
        let kinds = [ErrorKind::error::<ParseFailure>()];
        let r = rescuing_from(&kinds, || -> u8 { panic_any(boxed(ParseFailure)) });
        assert!(r.error().unwrap().error_ref::<ParseFailure>().is_some());

        let outer = catch_unwind(|| {
            let kinds = [ErrorKind::error::<ParseFailure>()];
            rescuing_from(&kinds, || -> u8 { panic_any(boxed(NonExistentError)) })
        });
        assert!(outer.is_err());
    }

    #[test]
    fn bare_user_errors_need_of_kind() {
        let outer = catch_unwind(|| {
            let kinds = [ErrorKind::error::<ParseFailure>(), ErrorKind::any_error()];
            rescuing_from(&kinds, || -> u8 { panic_any(ParseFailure) })
        });
        assert!(outer.expect_err("bare ParseFailure is not an error payload").is::<ParseFailure>());

        let r = rescuing_from(&[ErrorKind::of::<ParseFailure>()], || -> u8 { panic_any(ParseFailure) });
        assert!(r.error().unwrap().error_ref::<ParseFailure>().is_some());
    }

    fn payload<T: Any + Send>(value: T) -> Payload {
        Box::new(value)
    }

    fn sample_payloads() -> Vec<Payload> {
        vec![
            payload(NonExistentValue),
            payload(NonExistentError),
            payload(boxed(ParseFailure)),
            payload(boxed(NonExistentValue)),
            payload(Box::new(ParseFailure) as Box<dyn Error + Send>),
            payload(ParseFailure),
            payload(Io::Timeout),
            payload(Io::Closed),
            payload("static message"),
            payload(String::from("formatted message")),
        ]
    }

    #[test]
    fn broad_kinds_cover_narrow_kinds() {
        let pairs = [
            (ErrorKind::error::<ParseFailure>(), ErrorKind::any_error()),
            (ErrorKind::error::<NonExistentValue>(), ErrorKind::any_error()),
            (ErrorKind::error::<NonExistentError>(), ErrorKind::any_error()),
            (
                ErrorKind::matching::<Io, _>("timeout", |e| matches!(e, Io::Timeout)),
                ErrorKind::of::<Io>(),
            ),
        ];
        let mut narrow_hits = 0;
        for sample in sample_payloads() {
            for (narrow, broad) in &pairs {
                if narrow.matches(sample.as_ref()) {
                    narrow_hits += 1;
                    assert!(
                        broad.matches(sample.as_ref()),
                        "{:?} matched a payload {:?} rejects",
                        narrow,
                        broad
                    );
                }
            }
        }
        assert_eq!(narrow_hits, 6);
    }

    #[test]
    fn any_error_rescues_misuse_conditions() {
        let r = rescuing_from(&[ErrorKind::any_error()], || failure::<i32, _>("x").unwrap_value());
        let raised = r.error().unwrap();
        assert!(raised.is::<NonExistentValue>());
        assert_eq!(raised.to_string(), "panicked with error: Failure resonads do not have values");

        let r = rescuing_from(&[ErrorKind::error::<NonExistentError>()], || {
            success::<u8, &str>(1).unwrap_error()
        });
        assert!(r.error().unwrap().error_ref::<NonExistentError>().is_some());
    }

    #[test]
    fn family_kind_covers_narrow_kind() {
        let family = [ErrorKind::of::<Io>()];
        let r = rescuing_from(&family, || -> u8 { panic_any(Io::Closed) });
        assert!(r.error().unwrap().is::<Io>());

        let outer = catch_unwind(|| {
            let timeouts = [ErrorKind::matching::<Io, _>("timeout", |e| matches!(e, Io::Timeout))];
            rescuing_from(&timeouts, || -> u8 { panic_any(Io::Closed) })
        });
        assert!(outer.expect_err("Io::Closed is outside the timeout kind").is::<Io>());

        let timeouts = [ErrorKind::matching::<Io, _>("timeout", |e| matches!(e, Io::Timeout))];
        let r = rescuing_from(&timeouts, || -> u8 { panic_any(Io::Timeout) });
        assert!(r.is_failure());
    }

    #[test]
    fn message_kind() {
        let kinds = [ErrorKind::message()];
        let r = rescuing_from(&kinds, || -> u8 { panic!("static message") });
        assert_eq!(r.error().unwrap().message(), Some("static message"));

        let outer = catch_unwind(|| {
            let kinds = [ErrorKind::message()];
            rescuing_from(&kinds, || -> u8 { panic_any(ArgError) })
        });
        assert!(outer.is_err());
    }

    #[test]
    fn rescues_misuse_condition() {
        let kinds = [ErrorKind::of::<NonExistentValue>(), ErrorKind::error::<NonExistentValue>()];
        let r = rescuing_from(&kinds, || failure::<i32, _>("nope").unwrap_value());
        assert!(r.error().unwrap().is::<NonExistentValue>());
    }

    #[test]
    fn raised_resume_reraises_payload() {
        let outer = catch_unwind(|| {
            let raised = rescuing_from(&[], || -> u8 { panic_any(NameError(3)) }).unwrap_error();
            raised.resume()
        });
        let payload = outer.expect_err("resume must re-raise");
        assert_eq!(payload.downcast_ref::<NameError>(), Some(&NameError(3)));
    }

    #[test]
    fn raised_downcast() {
        let raised = rescuing_from(&[], || -> u8 { panic_any(NameError(5)) }).unwrap_error();
        let raised = raised.downcast::<ArgError>().expect_err("payload is not an ArgError");
        assert_eq!(raised.downcast::<NameError>().ok(), Some(NameError(5)));
    }

    #[test]
    fn raised_display() {
        let msg = rescuing_from(&[], || -> u8 { panic!("oops") }).unwrap_error();
        assert_eq!(msg.to_string(), "panicked: oops");
        assert!(format!("{:?}", msg).contains("oops"));

        let err = rescuing_from(&[], || -> u8 { panic_any(boxed(ParseFailure)) }).unwrap_error();
        assert_eq!(err.to_string(), "panicked with error: could not parse");
        assert!(err.source().is_some());

        let opaque = rescuing_from(&[], || -> u8 { panic_any(ArgError) }).unwrap_error();
        assert_eq!(opaque.to_string(), "panicked with an opaque payload");
    }

    #[test]
    fn kind_names() {
        assert!(ErrorKind::of::<ArgError>().name().ends_with("ArgError"));
        assert_eq!(ErrorKind::message().name(), "message");
        assert_eq!(format!("{:?}", ErrorKind::any_error()), "ErrorKind(\"dyn Error\")");
    }
}
