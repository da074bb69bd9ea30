//! trustkey - canonical cache keys for trust-score requests.
//!
//! The scoring service memoizes expensive answers (trust score of a node
//! relative to a source, profile metrics) behind a TTL cache. This crate
//! turns arbitrary request arguments into the cache key: a deterministic,
//! canonical JSON string, or an explicit "not cacheable" signal when the
//! arguments are not strict JSON.
//!
//! # Architecture
//!
//! - [`value`] - `ArgValue`, the loosely typed argument as received
//! - [`json`] - Strict JSON validation and canonical serialization
//! - [`key`] - `derive_key`, the entry point for the cache store
//! - [`digest`] - Optional fixed-length digests of a key
//! - [`error`] - Rejection codes
//! - [`logging`] - Subscriber setup for the CLI
//!
//! # Guarantees
//!
//! Structurally equal arguments (object key order ignored) always produce
//! byte-identical keys; anything strict JSON cannot express (absent values,
//! callables, symbols, big integers, non-finite numbers, cycles) yields
//! `None` at any depth. The computation is pure and safe to call from any
//! number of threads.

// Rejections must surface as values, never as panics.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod digest;
pub mod error;
pub mod json;
pub mod key;
pub mod logging;
pub mod value;

// Re-export commonly used types
pub use error::{ErrorCategory, ErrorCode, KeyResult};
pub use json::{JsonValue, Limits};
pub use key::{canonicalize, derive_key, derive_scoped_key, CanonicalString, KeyDeriver};
pub use value::ArgValue;
