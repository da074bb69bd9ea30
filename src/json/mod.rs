//! Strict JSON validation and canonicalization.
//!
//! Turns loosely typed request arguments into strict JSON and renders strict
//! JSON in a single canonical text form.
//!
//! # Architecture
//!
//! - [`types`] - `JsonValue` and finite `Number`
//! - [`limits`] - Structural limits against adversarial input
//! - [`validate`] - Total, depth-guarded conversion from `ArgValue`
//! - [`number`] - Canonical number rendering
//! - [`jcs`] - Canonical serialization, depth-guarded like validation
//!
//! # Example
//!
//! ```
//! use trustkey::json::{canonicalize, to_json_value, Limits};
//! use trustkey::ArgValue;
//!
//! let args = ArgValue::object([("b", ArgValue::Int(2)), ("a", ArgValue::Float(1.0))]);
//! let limits = Limits::default();
//! let value = to_json_value(&args, limits).unwrap();
//!
//! // Keys are sorted and 1.0 renders as 1
//! let text = canonicalize(&value, limits.max_nesting_depth).unwrap();
//! assert_eq!(text, "{\"a\":1,\"b\":2}");
//! ```

pub mod jcs;
pub mod limits;
pub mod number;
pub mod types;
pub mod validate;

// Re-export commonly used items
pub use jcs::canonicalize;
pub use limits::Limits;
pub use types::{JsonValue, Number};
pub use validate::{check, to_json_value, validate, Validator};
