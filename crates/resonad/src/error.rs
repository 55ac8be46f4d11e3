//! Misuse errors raised when reading the wrong side of a `Resonad`.
//!
//! These are programming errors, not domain errors: a `Failure` was asked
//! for its value, or a `Success` for its error. Domain errors travel as the
//! `E` payload of a `Failure` and are never inspected here.

use core::fmt;

/// Returned (or raised) when the value of a `Failure` is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonExistentValue;

impl fmt::Display for NonExistentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failure resonads do not have values")
    }
}

impl std::error::Error for NonExistentValue {}

/// Returned (or raised) when the error of a `Success` is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonExistentError;

impl fmt::Display for NonExistentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Success resonads do not have errors")
    }
}

impl std::error::Error for NonExistentError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", NonExistentValue), "Failure resonads do not have values");
        assert_eq!(format!("{}", NonExistentError), "Success resonads do not have errors");
    }

    #[test]
    fn test_boxes_as_std_error() {
        let boxed: Box<dyn Error + Send + Sync> = Box::new(NonExistentValue);
        assert!(boxed.is::<NonExistentValue>());
        assert!(boxed.source().is_none());
    }
}
