//! Cache-key derivation for request arguments.
//!
//! This is the entry point for the caching layer: hand over the request
//! arguments, get back either the canonical key or `None` ("not cacheable").
//! `None` is never a key; in particular it is distinct from the key of
//! `null`, which is the string `null`.
//!
//! ```
//! use trustkey::{derive_key, ArgValue};
//!
//! let a = ArgValue::object([("a", ArgValue::Int(1)), ("b", ArgValue::Int(2))]);
//! let b = ArgValue::object([("b", ArgValue::Int(2)), ("a", ArgValue::Int(1))]);
//! assert_eq!(derive_key(&a), derive_key(&b));
//! assert_eq!(derive_key(&a).unwrap().as_str(), r#"{"a":1,"b":2}"#);
//!
//! assert!(derive_key(&ArgValue::Float(f64::NAN)).is_none());
//! ```

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ErrorCategory, ErrorCode, KeyResult};
use crate::json::{self, JsonValue, Limits};
use crate::value::ArgValue;

/// Canonical text of a strict JSON value.
///
/// Contains no whitespace outside string literals and is identical for
/// structurally equal values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalString(String);

impl CanonicalString {
    /// The key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the key text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True only for an empty key, which canonicalization never produces.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<CanonicalString> for String {
    fn from(key: CanonicalString) -> Self {
        key.0
    }
}

impl AsRef<str> for CanonicalString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives cache keys under a fixed set of structural limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyDeriver {
    limits: Limits,
}

impl KeyDeriver {
    /// Create a deriver with custom limits.
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// The limits in force.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Returns true if the argument can be keyed.
    pub fn validate(&self, value: &ArgValue) -> bool {
        json::check(value, self.limits).is_ok()
    }

    /// Canonicalize an argument, reporting why it was rejected.
    pub fn canonicalize(&self, value: &ArgValue) -> KeyResult<CanonicalString> {
        let json = json::to_json_value(value, self.limits)?;
        to_key(&json, self.limits.max_nesting_depth)
    }

    /// Derive the cache key, or `None` if the argument is not cacheable.
    pub fn derive_key(&self, args: &ArgValue) -> Option<CanonicalString> {
        match self.canonicalize(args) {
            Ok(key) => Some(key),
            Err(err) => {
                log_rejection(&err);
                None
            }
        }
    }

    /// Derive a key bound to an operation name.
    ///
    /// The key is the canonical form of `[scope, args]`, so equal arguments
    /// passed to different operations never share a key.
    pub fn derive_scoped_key(&self, scope: &str, args: &ArgValue) -> Option<CanonicalString> {
        let scoped = json::to_json_value(args, self.limits).and_then(|json| {
            let scoped = JsonValue::Array(vec![JsonValue::String(scope.to_string()), json]);
            // The wrapping array adds one level
            to_key(&scoped, self.limits.max_nesting_depth.saturating_add(1))
        });
        match scoped {
            Ok(key) => Some(key),
            Err(err) => {
                log_rejection(&err);
                None
            }
        }
    }
}

fn to_key(json: &JsonValue, max_depth: u64) -> KeyResult<CanonicalString> {
    json::canonicalize(json, max_depth).map(CanonicalString)
}

fn log_rejection(err: &ErrorCode) {
    match err.category() {
        ErrorCategory::StructuralLimitExceeded => warn!(
            code = err.code(),
            name = err.name(),
            detail = %err,
            "request argument exceeds structural limits, bypassing cache"
        ),
        ErrorCategory::NotJsonValue | ErrorCategory::CyclicStructure => debug!(
            code = err.code(),
            name = err.name(),
            detail = %err,
            "request argument is not cacheable"
        ),
    }
}

/// Derive the cache key under default limits.
pub fn derive_key(args: &ArgValue) -> Option<CanonicalString> {
    KeyDeriver::default().derive_key(args)
}

/// Derive an operation-scoped cache key under default limits.
pub fn derive_scoped_key(scope: &str, args: &ArgValue) -> Option<CanonicalString> {
    KeyDeriver::default().derive_scoped_key(scope, args)
}

/// Canonicalize an argument under default limits.
pub fn canonicalize(value: &ArgValue) -> KeyResult<CanonicalString> {
    KeyDeriver::default().canonicalize(value)
}
