//! Environment variable sources
//!
//! Credential resolution reads every input through [`Env`] so callers can swap
//! the process environment for an in-memory map (tests, embedding hosts that
//! carry their own settings).

use std::collections::HashMap;

use crate::error::{Error, Result};

/// A read-only source of environment-style key/value settings.
pub trait Env {
    /// Raw value for `key`, if set.
    fn var(&self, key: &str) -> Option<String>;

    /// Value for `key` with surrounding whitespace trimmed, treating an empty
    /// value the same as an unset one.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    /// Boolean-like flag: `true`, `1` and `yes` (any case) are on, everything
    /// else including an unset variable is off.
    fn flag(&self, key: &str) -> bool {
        self.var(key)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false)
    }

    /// Like [`Env::non_empty`] but reports the missing key as an error.
    fn require(&self, key: &str) -> Result<String> {
        self.non_empty(key)
            .ok_or_else(|| Error::MissingVar(key.to_owned()))
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Env for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Env + ?Sized> Env for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}
