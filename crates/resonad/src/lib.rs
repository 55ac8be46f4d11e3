//! # resonad
//!
//! A success/failure result type with chainable combinators, and one
//! adapter that turns panics into failures.
//!
//! ## Design
//!
//! `Resonad<V, E>` is a closed enum:
//!
//! - **Success(V)**: a computed value.
//! - **Failure(E)**: an error, carried opaquely.
//!
//! Both variants answer the same operations: `is_success`, `is_failure`,
//! `value`, `error`, `map`, `map_error`, `chain`, `chain_error`,
//! `on_success`, `on_failure`. Each operation branches internally, so a
//! pipeline never has to.
//!
//! Reading the missing side is a programming error: `value()` on a Failure
//! yields `NonExistentValue`, `error()` on a Success yields
//! `NonExistentError`.
//!
//! ## Quick Start
//!
//! ```rust
//! use resonad::{failure, success, Resonad};
//!
//! fn parse(input: &str) -> Resonad<u32, String> {
//!     input.parse::<u32>().map_err(|e| e.to_string()).into()
//! }
//!
//! fn non_zero(n: u32) -> Resonad<u32, String> {
//!     if n == 0 { failure("zero".to_string()) } else { success(n) }
//! }
//!
//! let r = parse("21")
//!     .chain(non_zero)
//!     .map(|n| n * 2)
//!     .on_failure(|e| eprintln!("failed: {e}"));
//! assert_eq!(r, success(42));
//!
//! let r = parse("0").chain(non_zero).chain_error(|_| success::<_, String>(1));
//! assert_eq!(r, success(1));
//! ```
//!
//! ## Panics as failures
//!
//! ```rust
//! use resonad::{rescuing_from, ErrorKind};
//!
//! #[derive(Debug)]
//! struct ArgError;
//!
//! let r = rescuing_from(&[ErrorKind::of::<ArgError>()], || -> u8 {
//!     std::panic::panic_any(ArgError)
//! });
//! assert!(r.is_failure());
//! ```
//!
//! Panics outside the given kinds are re-raised untouched.
//!
//! ## Feature Flags
//!
//! | Flag      | Effect |
//! |-----------|--------|
//! | `metrics` | AtomicU64 counters of `rescuing_from` outcomes, Prometheus dump |
//!
//! ## Environment
//!
//! | Variable               | Effect |
//! |------------------------|--------|
//! | `RESONAD_LOG_LEVEL`    | off, error, warn, info, debug, trace (default info) |
//! | `RESONAD_FLUSH_EPRINT` | flush stderr after every log line |

mod result;
mod combinators;
mod convert;
mod error;
mod rescue;
#[macro_use]
mod macros;

pub mod env;
pub mod kprint;

cfg_if::cfg_if! {
    if #[cfg(feature = "metrics")] {
        pub mod metrics;
    }
}

// ── Public API ────────────────────────────────────────────────────

pub use result::{failure, success, Resonad, Tag};
pub use error::{NonExistentError, NonExistentValue};
pub use convert::ResultExt;
pub use rescue::{rescuing_from, BoxError, ErrorKind, Payload, Raised, RescueOutcome};

pub use kprint::{init as init_logging, set_flush_enabled, set_log_level, LogLevel};
pub use env::{env_get, env_get_bool, env_get_opt};
