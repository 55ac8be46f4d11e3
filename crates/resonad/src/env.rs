//! Typed environment-variable lookups.
//!
//! ```ignore
//! use resonad::env::{env_get, env_get_bool, env_get_opt};
//!
//! let retries: u32 = env_get("APP_RETRIES", 3);
//! let verbose = env_get_bool("APP_VERBOSE", false);
//! let level: Option<LogLevel> = env_get_opt("RESONAD_LOG_LEVEL");
//! ```

use std::str::FromStr;

/// Parse `key` as `T`, falling back to `default` when unset or unparseable.
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    env_get_opt(key).unwrap_or(default)
}

/// Accepts "1", "true", "yes", "on" (case-insensitive) as true; any other
/// set value is false. Unset returns `default`.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

/// `Some(T)` if `key` is set and parses.
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
